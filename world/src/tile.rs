//! Single cell of the map grid.

use glam::Vec2;
use reef_defence_core::{Countdown, TileKind, UnitId};

/// One cell of the staggered grid together with its occupancy and training state.
#[derive(Clone, Debug, PartialEq)]
pub struct Tile {
    kind: TileKind,
    position: Vec2,
    size: Vec2,
    unit: Option<UnitId>,
    is_training: bool,
    training_cooldown: Countdown,
}

impl Tile {
    pub(crate) fn new(kind: TileKind, position: Vec2, size: Vec2) -> Self {
        Self {
            kind,
            position,
            size,
            unit: None,
            is_training: false,
            training_cooldown: Countdown::default(),
        }
    }

    /// Kind currently assigned to the tile.
    #[must_use]
    pub fn kind(&self) -> TileKind {
        self.kind
    }

    /// Top-left corner of the tile in world pixels.
    #[must_use]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Width and height of the tile in world pixels.
    #[must_use]
    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Centre of the tile in world pixels.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        self.position + self.size * 0.5
    }

    /// Unit standing on the tile, if any.
    #[must_use]
    pub fn unit(&self) -> Option<UnitId> {
        self.unit
    }

    /// Whether a unit stands on the tile.
    #[must_use]
    pub fn is_unit_on_tile(&self) -> bool {
        self.unit.is_some()
    }

    /// Whether the training ground is busy raising a unit.
    #[must_use]
    pub fn is_training(&self) -> bool {
        self.is_training
    }

    /// Seconds until the training ground becomes available again.
    #[must_use]
    pub fn training_cooldown(&self) -> f32 {
        self.training_cooldown.remaining()
    }

    pub(crate) fn change_kind(&mut self, kind: TileKind) {
        self.kind = kind;
        self.is_training = false;
        self.training_cooldown = Countdown::default();
    }

    pub(crate) fn set_unit(&mut self, unit: Option<UnitId>) {
        self.unit = unit;
    }

    pub(crate) fn start_training(&mut self, seconds: f32) -> bool {
        if self.kind != TileKind::Training || self.is_training {
            return false;
        }
        self.training_cooldown.start(seconds);
        self.is_training = self.training_cooldown.is_active();
        true
    }

    pub(crate) fn update(&mut self, dt: f32) {
        if self.training_cooldown.tick(dt) {
            self.is_training = false;
        }
    }
}
