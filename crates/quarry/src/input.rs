//! # Input Abstraction
//!
//! Keyboard and mouse polling is someone else's job. The simulation asks
//! three questions per tick: is a control held, was it newly pressed, and
//! how far did the view move.

use quarry_shared::Vec2;

/// Controls the character responds to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Control {
    /// Move forward.
    Forward = 0,
    /// Move backward.
    Back = 1,
    /// Strafe left.
    Left = 2,
    /// Strafe right.
    Right = 3,
    /// Sprint modifier.
    Sprint = 4,
    /// Jump on land, ascend in water.
    Jump = 5,
    /// Descend in water.
    Dive = 6,
    /// Break the targeted block (held).
    Break = 7,
    /// Place the selected block (pressed).
    Place = 8,
}

impl Control {
    #[inline]
    const fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

/// Source of per-tick input.
pub trait InputSource {
    /// Level-sensitive: is `control` down right now.
    fn is_held(&self, control: Control) -> bool;

    /// Edge-sensitive: did `control` go down since the previous tick.
    fn was_pressed(&self, control: Control) -> bool;

    /// Relative look movement since the previous tick (x = yaw, y = pitch).
    fn look_delta(&self) -> Vec2;
}

/// A frozen set of inputs for one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputSnapshot {
    held: u16,
    pressed: u16,
    look: Vec2,
}

impl InputSnapshot {
    /// No input at all.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            held: 0,
            pressed: 0,
            look: Vec2::ZERO,
        }
    }

    /// Marks `control` as held.
    #[must_use]
    pub const fn hold(mut self, control: Control) -> Self {
        self.held |= control.bit();
        self
    }

    /// Marks `control` as newly pressed (and therefore held).
    #[must_use]
    pub const fn press(mut self, control: Control) -> Self {
        self.held |= control.bit();
        self.pressed |= control.bit();
        self
    }

    /// Sets the look delta.
    #[must_use]
    pub const fn look(mut self, dx: f32, dy: f32) -> Self {
        self.look = Vec2::new(dx, dy);
        self
    }

    /// Releases everything.
    pub fn clear(&mut self) {
        *self = Self::new();
    }
}

impl InputSource for InputSnapshot {
    fn is_held(&self, control: Control) -> bool {
        self.held & control.bit() != 0
    }

    fn was_pressed(&self, control: Control) -> bool {
        self.pressed & control.bit() != 0
    }

    fn look_delta(&self) -> Vec2 {
        self.look
    }
}

/// Forwards held state only. Used for the second and later ticks run in
/// one frame, so a single press or mouse movement is consumed once.
pub struct HeldOnly<'a, I: ?Sized>(pub &'a I);

impl<I: InputSource + ?Sized> InputSource for HeldOnly<'_, I> {
    fn is_held(&self, control: Control) -> bool {
        self.0.is_held(control)
    }

    fn was_pressed(&self, _control: Control) -> bool {
        false
    }

    fn look_delta(&self) -> Vec2 {
        Vec2::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_implies_held() {
        let input = InputSnapshot::new().press(Control::Place);
        assert!(input.is_held(Control::Place));
        assert!(input.was_pressed(Control::Place));
        assert!(!input.is_held(Control::Break));
    }

    #[test]
    fn test_hold_is_not_press() {
        let input = InputSnapshot::new().hold(Control::Break).hold(Control::Forward);
        assert!(input.is_held(Control::Break));
        assert!(input.is_held(Control::Forward));
        assert!(!input.was_pressed(Control::Break));
    }

    #[test]
    fn test_held_only_masks_edges() {
        let input = InputSnapshot::new().press(Control::Place).look(3.0, -1.0);
        let masked = HeldOnly(&input);
        assert!(masked.is_held(Control::Place));
        assert!(!masked.was_pressed(Control::Place));
        assert_eq!(masked.look_delta(), Vec2::ZERO);
    }

    #[test]
    fn test_clear() {
        let mut input = InputSnapshot::new().hold(Control::Sprint);
        input.clear();
        assert_eq!(input, InputSnapshot::new());
    }
}
