//! # Block Property Table
//!
//! What each block kind does physically. Built once at startup and handed
//! by reference to everything that classifies cells, so tests can swap in
//! a synthetic table.

use quarry_shared::BlockKind;

use crate::config::SimConfig;

/// Physical properties of one block kind.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlockProperties {
    /// Relative break effort. Only used when hardness scaling is on.
    pub hardness: f32,
    /// Blocks movement and stops rays.
    pub solid: bool,
    /// Lets light and sight through (presentation only).
    pub transparent: bool,
}

impl BlockProperties {
    /// Non-solid, see-through, instantly broken.
    pub const EMPTY: Self = Self {
        hardness: 0.0,
        solid: false,
        transparent: true,
    };

    /// Solid and opaque with the given hardness.
    #[must_use]
    pub const fn opaque(hardness: f32) -> Self {
        Self {
            hardness,
            solid: true,
            transparent: false,
        }
    }

    /// Solid but see-through with the given hardness.
    #[must_use]
    pub const fn clear(hardness: f32) -> Self {
        Self {
            hardness,
            solid: true,
            transparent: true,
        }
    }
}

/// Per-kind property lookup.
#[derive(Clone, Debug, PartialEq)]
pub struct BlockTable {
    props: [BlockProperties; BlockKind::COUNT],
}

impl BlockTable {
    /// The standard table.
    #[must_use]
    pub fn standard() -> Self {
        let mut table = Self {
            props: [BlockProperties::EMPTY; BlockKind::COUNT],
        };
        for kind in BlockKind::ALL {
            table.props[kind.index()] = match kind {
                BlockKind::Air | BlockKind::Water => BlockProperties::EMPTY,
                BlockKind::Grass => BlockProperties::opaque(0.6),
                BlockKind::Dirt | BlockKind::Sand => BlockProperties::opaque(0.5),
                BlockKind::Gravel => BlockProperties::opaque(0.6),
                BlockKind::Stone => BlockProperties::opaque(1.5),
                BlockKind::Cobblestone => BlockProperties::opaque(2.0),
                BlockKind::Wood | BlockKind::Planks => BlockProperties::opaque(2.0),
                BlockKind::Leaves => BlockProperties::clear(0.2),
                BlockKind::Glass => BlockProperties::clear(0.3),
                BlockKind::CoalOre | BlockKind::IronOre => BlockProperties::opaque(3.0),
                BlockKind::Bedrock => BlockProperties::opaque(50.0),
            };
        }
        table
    }

    /// The standard table with the config's `[blocks.*]` overrides applied.
    #[must_use]
    pub fn from_config(config: &SimConfig) -> Self {
        let mut table = Self::standard();
        for (kind, over) in &config.blocks {
            let props = &mut table.props[kind.index()];
            if let Some(hardness) = over.hardness {
                props.hardness = hardness;
            }
            if let Some(solid) = over.solid {
                props.solid = solid;
            }
            if let Some(transparent) = over.transparent {
                props.transparent = transparent;
            }
        }
        table
    }

    /// Replaces the properties of one kind.
    pub fn set(&mut self, kind: BlockKind, props: BlockProperties) {
        self.props[kind.index()] = props;
    }

    /// Properties of `kind`.
    #[inline]
    #[must_use]
    pub fn get(&self, kind: BlockKind) -> BlockProperties {
        self.props[kind.index()]
    }

    /// Break effort of `kind`.
    #[inline]
    #[must_use]
    pub fn hardness(&self, kind: BlockKind) -> f32 {
        self.props[kind.index()].hardness
    }

    /// Whether `kind` blocks movement and rays.
    #[inline]
    #[must_use]
    pub fn is_solid(&self, kind: BlockKind) -> bool {
        self.props[kind.index()].solid
    }

    /// Whether `kind` is see-through.
    #[inline]
    #[must_use]
    pub fn is_transparent(&self, kind: BlockKind) -> bool {
        self.props[kind.index()].transparent
    }

    /// Whether `kind` is a liquid. Decided by the kind, not the table.
    #[inline]
    #[must_use]
    pub fn is_liquid(&self, kind: BlockKind) -> bool {
        kind.is_liquid()
    }
}

impl Default for BlockTable {
    fn default() -> Self {
        Self::standard()
    }
}
