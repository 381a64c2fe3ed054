//! # Character Events
//!
//! Read-only notifications from the simulation to presentation (particles,
//! sounds, HUD).
//!
//! ```text
//! ┌─────────────┐      ┌─────────────┐      ┌──────────────┐
//! │ CharacterSim│─────>│   bounded   │─────>│ presentation │
//! │   (tick)    │      │   channel   │      │  (drain)     │
//! └─────────────┘      └─────────────┘      └──────────────┘
//! ```
//!
//! Sending never blocks the tick. When the channel is full the event is
//! dropped.

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use quarry_shared::{BlockKind, BlockPos};

/// Default channel capacity.
pub const DEFAULT_EVENT_CAPACITY: usize = 256;

/// Something presentation may want to react to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CharacterEvent {
    /// A block was broken and collected.
    BlockBroken {
        /// Cell that was cleared.
        pos: BlockPos,
        /// Kind that was there.
        kind: BlockKind,
    },

    /// A block was placed from the inventory.
    BlockPlaced {
        /// Cell that was filled.
        pos: BlockPos,
        /// Kind placed.
        kind: BlockKind,
    },

    /// An inventory quantity changed.
    InventoryChanged {
        /// Kind that changed.
        kind: BlockKind,
        /// New total (not delta).
        quantity: u32,
    },

    /// The first water probe got wet.
    WaterEntered,

    /// The last water probe dried.
    WaterExited,

    /// A fall was stopped by a floor.
    Landed {
        /// Downward speed just before the stop (blocks per second).
        impact_speed: f32,
    },

    /// A rise was stopped by a ceiling.
    HeadBumped {
        /// Upward speed just before the stop (blocks per second).
        impact_speed: f32,
    },
}

/// Owns both ends of a bounded event channel.
pub struct EventBus {
    sender: Sender<CharacterEvent>,
    receiver: Receiver<CharacterEvent>,
}

impl EventBus {
    /// Creates a bus holding at most `capacity` undrained events.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity);
        Self { sender, receiver }
    }

    /// Creates a sender handle.
    #[must_use]
    pub fn sender(&self) -> EventSender {
        EventSender {
            sender: self.sender.clone(),
        }
    }

    /// Creates a receiver handle.
    #[must_use]
    pub fn receiver(&self) -> EventReceiver {
        EventReceiver {
            receiver: self.receiver.clone(),
        }
    }

    /// Creates a bus and returns its two ends.
    #[must_use]
    pub fn create_pair(capacity: usize) -> (EventSender, EventReceiver) {
        let bus = Self::new(capacity);
        (bus.sender(), bus.receiver())
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_CAPACITY)
    }
}

/// Handle for sending events.
#[derive(Clone)]
pub struct EventSender {
    sender: Sender<CharacterEvent>,
}

impl EventSender {
    /// Sends without blocking. Returns `false` if the event was dropped.
    #[inline]
    pub fn send(&self, event: CharacterEvent) -> bool {
        match self.sender.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(event)) => {
                tracing::trace!(?event, "event channel full, dropping");
                false
            }
            Err(TrySendError::Disconnected(event)) => {
                tracing::trace!(?event, "no event receiver, dropping");
                false
            }
        }
    }
}

/// Handle for receiving events.
#[derive(Clone)]
pub struct EventReceiver {
    receiver: Receiver<CharacterEvent>,
}

impl EventReceiver {
    /// Takes every pending event.
    #[inline]
    pub fn drain(&self) -> Vec<CharacterEvent> {
        self.receiver.try_iter().collect()
    }

    /// Takes one event, if any.
    #[inline]
    pub fn try_recv(&self) -> Option<CharacterEvent> {
        self.receiver.try_recv().ok()
    }

    /// Number of pending events.
    #[inline]
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }

    /// Whether anything is pending.
    #[inline]
    #[must_use]
    pub fn has_events(&self) -> bool {
        !self.receiver.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_send_receive() {
        let bus = EventBus::new(8);
        let sender = bus.sender();
        let receiver = bus.receiver();

        assert!(sender.send(CharacterEvent::BlockPlaced {
            pos: BlockPos::new(1, 2, 3),
            kind: BlockKind::Glass,
        }));
        assert!(receiver.has_events());

        match receiver.try_recv() {
            Some(CharacterEvent::BlockPlaced { pos, kind }) => {
                assert_eq!(pos, BlockPos::new(1, 2, 3));
                assert_eq!(kind, BlockKind::Glass);
            }
            other => panic!("wrong event: {other:?}"),
        }
    }

    #[test]
    fn test_event_drain() {
        let (sender, receiver) = EventBus::create_pair(16);
        for quantity in 0..10 {
            let _ = sender.send(CharacterEvent::InventoryChanged {
                kind: BlockKind::Dirt,
                quantity,
            });
        }

        assert_eq!(receiver.pending_count(), 10);
        assert_eq!(receiver.drain().len(), 10);
        assert!(!receiver.has_events());
    }

    #[test]
    fn test_full_channel_drops() {
        let (sender, receiver) = EventBus::create_pair(2);
        assert!(sender.send(CharacterEvent::WaterEntered));
        assert!(sender.send(CharacterEvent::WaterExited));
        assert!(!sender.send(CharacterEvent::WaterEntered));

        assert_eq!(
            receiver.drain(),
            vec![CharacterEvent::WaterEntered, CharacterEvent::WaterExited]
        );
    }

    #[test]
    fn test_disconnected_receiver_does_not_block() {
        let sender = EventBus::new(4).sender();
        assert!(!sender.send(CharacterEvent::Landed { impact_speed: 3.0 }));
    }
}
