#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Reef Defence game.
//!
//! This crate defines the vocabulary that connects the authoritative map,
//! the pure systems and the adapters: grid coordinates, the closed set of
//! tile kinds together with their traits table, unit identifiers and tiers,
//! prices and the externalised [`Tuning`] configuration. Nothing in here
//! touches a window, a texture or an input device.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod tuning;

pub use tuning::{
    Adjacency, CameraTuning, CastleTuning, EconomyTuning, MapTuning, TierTuning, TilePrice,
    TilePrices, TrainingTuning, Tuning, TuningError, WaveTuning, MAX_GRID_SIDE, MIN_INTERVAL,
};

/// Canonical title used by adapters when opening a window.
pub const GAME_TITLE: &str = "Reef Defence";

/// Location of a single tile expressed as column and row indices.
///
/// Coordinates are signed so that clamping callers can represent positions
/// that fall outside the grid, such as a cursor hovering beyond the map edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCoord {
    column: i32,
    row: i32,
}

impl GridCoord {
    /// Creates a new grid coordinate.
    #[must_use]
    pub const fn new(column: i32, row: i32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the tile.
    #[must_use]
    pub const fn column(&self) -> i32 {
        self.column
    }

    /// Zero-based row index of the tile.
    #[must_use]
    pub const fn row(&self) -> i32 {
        self.row
    }

    /// Returns the coordinate shifted by the provided column and row deltas.
    #[must_use]
    pub const fn offset(self, columns: i32, rows: i32) -> Self {
        Self {
            column: self.column.saturating_add(columns),
            row: self.row.saturating_add(rows),
        }
    }

    /// Reports whether the coordinate lies in an odd, half-tile shifted column.
    #[must_use]
    pub const fn is_odd_column(&self) -> bool {
        self.column.rem_euclid(2) == 1
    }
}

/// A castle level or unit tier outside `1..=5`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("{0} is outside 1..=5")]
pub struct OutOfRange(pub u8);

/// Level of the player's castle, always within `1..=5`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct CastleLevel(u8);

impl CastleLevel {
    /// Level every castle starts at.
    pub const FIRST: Self = Self(1);
    /// Highest level a castle can reach.
    pub const MAX: Self = Self(5);

    /// Creates a castle level, returning `None` outside `1..=5`.
    #[must_use]
    pub const fn new(level: u8) -> Option<Self> {
        if level >= Self::FIRST.0 && level <= Self::MAX.0 {
            Some(Self(level))
        } else {
            None
        }
    }

    /// Numeric level.
    #[must_use]
    pub const fn get(&self) -> u8 {
        self.0
    }

    /// Level reached after one more upgrade, or `None` at the top.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        Self::new(self.0 + 1)
    }

    /// Whether the castle is fully upgraded.
    #[must_use]
    pub const fn is_max(&self) -> bool {
        self.0 == Self::MAX.0
    }
}

impl TryFrom<u8> for CastleLevel {
    type Error = OutOfRange;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        Self::new(level).ok_or(OutOfRange(level))
    }
}

impl From<CastleLevel> for u8 {
    fn from(level: CastleLevel) -> Self {
        level.0
    }
}

/// Strength tier of a unit, always within `1..=5`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct UnitTier(u8);

impl UnitTier {
    /// Every tier in ascending order.
    pub const ALL: [Self; 5] = [Self(1), Self(2), Self(3), Self(4), Self(5)];

    /// Creates a tier, returning `None` outside `1..=5`.
    #[must_use]
    pub const fn new(tier: u8) -> Option<Self> {
        if tier >= 1 && tier <= 5 {
            Some(Self(tier))
        } else {
            None
        }
    }

    /// Numeric tier.
    #[must_use]
    pub const fn get(&self) -> u8 {
        self.0
    }

    /// Zero-based index into per-tier tables.
    #[must_use]
    pub const fn index(&self) -> usize {
        (self.0 - 1) as usize
    }

    /// Whether a castle at `level` is allowed to train this tier.
    #[must_use]
    pub const fn unlocked_at(&self, level: CastleLevel) -> bool {
        self.0 <= level.get()
    }
}

impl TryFrom<u8> for UnitTier {
    type Error = OutOfRange;

    fn try_from(tier: u8) -> Result<Self, Self::Error> {
        Self::new(tier).ok_or(OutOfRange(tier))
    }
}

impl From<UnitTier> for u8 {
    fn from(tier: UnitTier) -> Self {
        tier.0
    }
}

/// Side a unit fights for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Owner {
    /// Units trained by the player.
    Player,
    /// Units spawned by an attacking wave.
    Enemy,
}

/// Stable identifier assigned to a unit by the roster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnitId(u32);

impl UnitId {
    /// Creates a new unit identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Byte RGB colour used by adapters when no texture is available.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    red: u8,
    green: u8,
    blue: u8,
}

impl Rgb {
    /// Creates a new colour from byte RGB components.
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Red component of the colour.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Green component of the colour.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Blue component of the colour.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }
}

/// Closed set of tile kinds that can appear on the map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TileKind {
    /// Unusable tile that can never be built on.
    Locked,
    /// Open water, the default unclaimed tile.
    Sea,
    /// Algae farm producing food.
    Food,
    /// Coral reef producing coral.
    Coral,
    /// Training ground where the player raises units.
    Training,
    /// The player's castle at the given level.
    Castle(CastleLevel),
}

/// Behavioural and visual metadata attached to a [`TileKind`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileTraits {
    /// Stable tag used by asset manifests and logs.
    pub tag: &'static str,
    /// Player build actions may never overwrite this kind.
    pub locked: bool,
    /// Counts as owned territory for adjacency checks.
    pub claimed: bool,
    /// Fill colour used when no sprite is loaded.
    pub color: Rgb,
}

const CASTLE_TAGS: [&str; 5] = ["castleV1", "castleV2", "castleV3", "castleV4", "castleV5"];

impl TileKind {
    /// Kinds offered by the build menu, in menu order.
    pub const BUILDABLE: [Self; 3] = [Self::Food, Self::Coral, Self::Training];

    /// Every tile kind, castles ordered by level.
    pub const ALL: [Self; 10] = [
        Self::Locked,
        Self::Sea,
        Self::Food,
        Self::Coral,
        Self::Training,
        Self::Castle(CastleLevel(1)),
        Self::Castle(CastleLevel(2)),
        Self::Castle(CastleLevel(3)),
        Self::Castle(CastleLevel(4)),
        Self::Castle(CastleLevel(5)),
    ];

    /// Looks up the traits row for this kind.
    #[must_use]
    pub const fn traits(self) -> TileTraits {
        match self {
            Self::Locked => TileTraits {
                tag: "locked",
                locked: true,
                claimed: false,
                color: Rgb::from_rgb(0x33, 0x33, 0x3d),
            },
            Self::Sea => TileTraits {
                tag: "sea",
                locked: false,
                claimed: false,
                color: Rgb::from_rgb(0x1e, 0x5a, 0x8c),
            },
            Self::Food => TileTraits {
                tag: "food",
                locked: false,
                claimed: true,
                color: Rgb::from_rgb(0x3c, 0x9a, 0x4a),
            },
            Self::Coral => TileTraits {
                tag: "coral",
                locked: false,
                claimed: true,
                color: Rgb::from_rgb(0xe0, 0x6c, 0x7a),
            },
            Self::Training => TileTraits {
                tag: "training",
                locked: false,
                claimed: true,
                color: Rgb::from_rgb(0xc8, 0x9b, 0x3c),
            },
            Self::Castle(level) => TileTraits {
                tag: CASTLE_TAGS[(level.0 - 1) as usize],
                locked: true,
                claimed: true,
                color: Rgb::from_rgb(0xd9, 0xd4, 0xc7),
            },
        }
    }

    /// Stable string tag of the kind.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        self.traits().tag
    }

    /// Whether the kind is any castle level.
    #[must_use]
    pub const fn is_castle(self) -> bool {
        matches!(self, Self::Castle(_))
    }

    /// Whether the kind can be placed from the build menu.
    #[must_use]
    pub const fn is_buildable(self) -> bool {
        matches!(self, Self::Food | Self::Coral | Self::Training)
    }
}

/// Amount of food and coral required for a purchase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Price {
    /// Food component of the price.
    #[serde(default)]
    pub food: u32,
    /// Coral component of the price.
    #[serde(default)]
    pub coral: u32,
}

impl Price {
    /// Price of nothing.
    pub const FREE: Self = Self { food: 0, coral: 0 };

    /// Creates a price from its components.
    #[must_use]
    pub const fn new(food: u32, coral: u32) -> Self {
        Self { food, coral }
    }

    /// Price consisting only of food.
    #[must_use]
    pub const fn food(food: u32) -> Self {
        Self { food, coral: 0 }
    }

    /// Price consisting only of coral.
    #[must_use]
    pub const fn coral(coral: u32) -> Self {
        Self { food: 0, coral }
    }

    /// Component-wise saturating sum.
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self {
            food: self.food.saturating_add(other.food),
            coral: self.coral.saturating_add(other.coral),
        }
    }

    /// Component-wise saturating multiplication by a count.
    #[must_use]
    pub const fn saturating_mul(self, count: u32) -> Self {
        Self {
            food: self.food.saturating_mul(count),
            coral: self.coral.saturating_mul(count),
        }
    }
}

/// Timer counting down towards zero, never below it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Countdown {
    remaining: f32,
}

impl Countdown {
    /// Creates a countdown with the provided number of seconds left.
    #[must_use]
    pub fn new(seconds: f32) -> Self {
        Self {
            remaining: seconds.max(0.0),
        }
    }

    /// Restarts the countdown.
    pub fn start(&mut self, seconds: f32) {
        self.remaining = seconds.max(0.0);
    }

    /// Advances the countdown by `dt` seconds; returns `true` when it expired on this tick.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.remaining <= 0.0 {
            return false;
        }
        self.remaining = (self.remaining - dt.max(0.0)).max(0.0);
        self.remaining <= 0.0
    }

    /// Seconds left before the countdown expires.
    #[must_use]
    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    /// Whether time is still left on the countdown.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.remaining > 0.0
    }
}
