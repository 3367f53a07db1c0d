//! Externalised tuning values: costs, cadences and camera constants.
//!
//! Every section falls back to its defaults, so a tuning file only needs to
//! list the values it overrides.

use serde::Deserialize;
use thiserror::Error;

use crate::{CastleLevel, Price, TileKind, UnitTier};

/// Complete set of tuning values consumed by the game.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Tuning {
    /// Grid dimensions and adjacency rule.
    pub map: MapTuning,
    /// Camera pan and zoom behaviour.
    pub camera: CameraTuning,
    /// Starting balances, harvest income and tile prices.
    pub economy: EconomyTuning,
    /// Castle health and upgrade prices.
    pub castle: CastleTuning,
    /// Per-tier unit statistics and training costs.
    pub training: TrainingTuning,
    /// Enemy wave cadence.
    pub wave: WaveTuning,
}

/// Shortest accepted cadence, in seconds.
pub const MIN_INTERVAL: f32 = 0.01;

/// Longest accepted side of the grid, in tiles.
pub const MAX_GRID_SIDE: u32 = 1024;

fn positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

fn non_negative(value: f32) -> bool {
    value.is_finite() && value >= 0.0
}

fn cadence(value: f32) -> bool {
    value.is_finite() && value >= MIN_INTERVAL
}

impl Tuning {
    /// Checks that the tuning values describe a playable game.
    ///
    /// NaN and infinities are rejected wherever a float is read.
    pub fn validate(&self) -> Result<(), TuningError> {
        let map = &self.map;
        if map.rows == 0 || map.columns == 0 {
            return Err(TuningError::EmptyGrid {
                rows: map.rows,
                columns: map.columns,
            });
        }
        if map.rows > MAX_GRID_SIDE || map.columns > MAX_GRID_SIDE {
            return Err(TuningError::OversizedGrid {
                rows: map.rows,
                columns: map.columns,
            });
        }
        if !positive(map.tile_width) || !positive(map.tile_height) {
            return Err(TuningError::InvalidTileSize {
                width: map.tile_width,
                height: map.tile_height,
            });
        }

        let camera = &self.camera;
        if !positive(camera.min_zoom)
            || !positive(camera.max_zoom)
            || camera.min_zoom > camera.max_zoom
        {
            return Err(TuningError::InvalidZoomRange {
                min: camera.min_zoom,
                max: camera.max_zoom,
            });
        }
        for (field, value) in [
            ("camera.pan_speed", camera.pan_speed),
            ("camera.zoom_speed", camera.zoom_speed),
            ("camera.drag_speed", camera.drag_speed),
            ("wave.first_wave_delay", self.wave.first_wave_delay),
        ] {
            if !non_negative(value) {
                return Err(TuningError::InvalidValue { field });
            }
        }
        if !positive(self.castle.max_health) {
            return Err(TuningError::InvalidValue {
                field: "castle.max_health",
            });
        }

        for (field, value) in [
            ("economy.harvest_interval", self.economy.harvest_interval),
            ("wave.interval", self.wave.interval),
        ] {
            if !cadence(value) {
                return Err(TuningError::IntervalTooShort { field });
            }
        }
        if let Some(tier) = self.training.tiers.iter().position(|tier| {
            !positive(tier.health)
                || !cadence(tier.step_interval)
                || !non_negative(tier.cooldown)
                || !non_negative(tier.attack_damage)
        }) {
            return Err(TuningError::InvalidTier { tier: tier + 1 });
        }
        Ok(())
    }

    /// Statistics of the provided unit tier.
    #[must_use]
    pub fn tier(&self, tier: UnitTier) -> &TierTuning {
        &self.training.tiers[tier.index()]
    }
}

/// Reasons a tuning file is rejected.
#[derive(Debug, Error, PartialEq)]
pub enum TuningError {
    /// The grid must contain at least one tile.
    #[error("map must contain at least one tile (rows = {rows}, columns = {columns})")]
    EmptyGrid {
        /// Configured row count.
        rows: u32,
        /// Configured column count.
        columns: u32,
    },
    /// The grid exceeds [`MAX_GRID_SIDE`] on some side.
    #[error("map sides are limited to {MAX_GRID_SIDE} tiles (rows = {rows}, columns = {columns})")]
    OversizedGrid {
        /// Configured row count.
        rows: u32,
        /// Configured column count.
        columns: u32,
    },
    /// Tiles need a positive footprint.
    #[error("tile size must be positive (width = {width}, height = {height})")]
    InvalidTileSize {
        /// Configured tile width.
        width: f32,
        /// Configured tile height.
        height: f32,
    },
    /// Zoom bounds must be positive and ordered.
    #[error("zoom range must satisfy 0 < min <= max (min = {min}, max = {max})")]
    InvalidZoomRange {
        /// Configured minimum zoom.
        min: f32,
        /// Configured maximum zoom.
        max: f32,
    },
    /// A speed, delay or health value was negative or not a number.
    #[error("{field} must be a finite, non-negative number")]
    InvalidValue {
        /// Dotted path of the offending field.
        field: &'static str,
    },
    /// A cadence was shorter than [`MIN_INTERVAL`] or not a number.
    #[error("{field} must be at least {MIN_INTERVAL} seconds")]
    IntervalTooShort {
        /// Dotted path of the offending field.
        field: &'static str,
    },
    /// A unit tier has no health, cannot move or has a negative attack.
    #[error("training tier {tier} needs positive health and step interval")]
    InvalidTier {
        /// One-based tier number.
        tier: usize,
    },
}

/// Rule deciding when a tile counts as surrounded by claimed territory.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Adjacency {
    /// At least one neighbour must be claimed.
    #[default]
    Any,
    /// Every in-bounds neighbour must be claimed.
    All,
}

/// Grid dimensions.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MapTuning {
    /// Number of tile rows.
    pub rows: u32,
    /// Number of tile columns.
    pub columns: u32,
    /// Horizontal tile pitch in world pixels.
    pub tile_width: f32,
    /// Vertical tile pitch in world pixels.
    pub tile_height: f32,
    /// Rule used by the buildability check.
    pub adjacency: Adjacency,
}

impl Default for MapTuning {
    fn default() -> Self {
        Self {
            rows: 17,
            columns: 17,
            tile_width: 100.0,
            tile_height: 115.0,
            adjacency: Adjacency::Any,
        }
    }
}

/// Camera pan and zoom behaviour.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CameraTuning {
    /// Keyboard pan speed in screen pixels per second.
    pub pan_speed: f32,
    /// Zoom change per second while the wheel turns.
    pub zoom_speed: f32,
    /// Multiplier applied to mouse drag deltas.
    pub drag_speed: f32,
    /// Smallest allowed zoom.
    pub min_zoom: f32,
    /// Largest allowed zoom.
    pub max_zoom: f32,
}

impl Default for CameraTuning {
    fn default() -> Self {
        Self {
            pan_speed: 250.0,
            zoom_speed: 10.0,
            drag_speed: 1.0,
            min_zoom: 0.3,
            max_zoom: 3.0,
        }
    }
}

/// Price of a buildable tile: `base + growth * owned`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TilePrice {
    /// Price of the first tile of this kind.
    pub base: Price,
    /// Increase for every tile of this kind already owned.
    pub growth: Price,
}

impl TilePrice {
    /// Price of the next tile when `owned` tiles of this kind exist.
    #[must_use]
    pub const fn for_owned(&self, owned: u32) -> Price {
        self.base.saturating_add(self.growth.saturating_mul(owned))
    }
}

/// Price table keyed by buildable tile kind.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TilePrices {
    /// Algae farm price.
    pub food: TilePrice,
    /// Coral reef price.
    pub coral: TilePrice,
    /// Training ground price.
    pub training: TilePrice,
}

impl TilePrices {
    /// Price entry for the provided kind, `None` for kinds that cannot be bought.
    #[must_use]
    pub const fn for_kind(&self, kind: TileKind) -> Option<&TilePrice> {
        match kind {
            TileKind::Food => Some(&self.food),
            TileKind::Coral => Some(&self.coral),
            TileKind::Training => Some(&self.training),
            TileKind::Locked | TileKind::Sea | TileKind::Castle(_) => None,
        }
    }
}

impl Default for TilePrices {
    fn default() -> Self {
        Self {
            food: TilePrice {
                base: Price::coral(5),
                growth: Price::coral(2),
            },
            coral: TilePrice {
                base: Price::food(5),
                growth: Price::food(2),
            },
            training: TilePrice {
                base: Price::new(10, 10),
                growth: Price::new(5, 5),
            },
        }
    }
}

/// Starting balances and periodic income.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EconomyTuning {
    /// Food available when the game starts.
    pub starting_food: u32,
    /// Coral available when the game starts.
    pub starting_coral: u32,
    /// Seconds between two harvests.
    pub harvest_interval: f32,
    /// Income granted by the castle on every harvest.
    pub castle_income: Price,
    /// Food produced by every algae farm on every harvest.
    pub food_tile_yield: u32,
    /// Coral produced by every reef on every harvest.
    pub coral_tile_yield: u32,
    /// Prices of the buildable tiles.
    pub tile_prices: TilePrices,
}

impl Default for EconomyTuning {
    fn default() -> Self {
        Self {
            starting_food: 20,
            starting_coral: 20,
            harvest_interval: 5.0,
            castle_income: Price::new(1, 1),
            food_tile_yield: 2,
            coral_tile_yield: 2,
            tile_prices: TilePrices::default(),
        }
    }
}

/// Castle health and upgrades.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CastleTuning {
    /// Health of the castle at the start of the game.
    pub max_health: f32,
    /// Prices of the upgrades to levels 2, 3, 4 and 5.
    pub upgrade_prices: [Price; 4],
}

impl Default for CastleTuning {
    fn default() -> Self {
        Self {
            max_health: 100.0,
            upgrade_prices: [
                Price::new(20, 20),
                Price::new(40, 40),
                Price::new(80, 80),
                Price::new(160, 160),
            ],
        }
    }
}

impl CastleTuning {
    /// Price of upgrading a castle to `level`, or `None` for the starting level.
    #[must_use]
    pub fn upgrade_price(&self, level: CastleLevel) -> Option<Price> {
        let index = usize::from(level.get()).checked_sub(2)?;
        self.upgrade_prices.get(index).copied()
    }
}

/// Statistics of one unit tier.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TierTuning {
    /// Food spent to train a unit of this tier.
    pub food_cost: u32,
    /// Seconds the training ground stays busy afterwards.
    pub cooldown: f32,
    /// Hit points of a fresh unit.
    pub health: f32,
    /// Damage dealt per second of contact.
    pub attack_damage: f32,
    /// Seconds between two steps.
    pub step_interval: f32,
}

/// Per-tier unit table.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrainingTuning {
    /// Tiers one to five in order.
    pub tiers: [TierTuning; 5],
}

impl Default for TrainingTuning {
    fn default() -> Self {
        const fn tier(food_cost: u32, cooldown: f32, health: f32, attack_damage: f32) -> TierTuning {
            TierTuning {
                food_cost,
                cooldown,
                health,
                attack_damage,
                step_interval: 1.0,
            }
        }

        Self {
            tiers: [
                tier(10, 10.0, 10.0, 1.0),
                tier(20, 13.0, 20.0, 2.0),
                tier(40, 16.0, 40.0, 4.0),
                tier(80, 20.0, 80.0, 8.0),
                tier(160, 24.0, 160.0, 16.0),
            ],
        }
    }
}

/// Enemy wave cadence.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WaveTuning {
    /// Seconds before the first wave arrives.
    pub first_wave_delay: f32,
    /// Seconds between two waves.
    pub interval: f32,
    /// Enemies in the first wave.
    pub base_units: u32,
    /// Extra enemies added by every later wave.
    pub units_per_wave: u32,
    /// Number of waves before the enemy tier rises by one.
    pub tier_step: u32,
    /// Seed of the spawn position generator.
    pub rng_seed: u64,
    /// Score awarded per tier of every defeated enemy.
    pub score_per_tier: u32,
}

impl Default for WaveTuning {
    fn default() -> Self {
        Self {
            first_wave_delay: 30.0,
            interval: 45.0,
            base_units: 2,
            units_per_wave: 1,
            tier_step: 3,
            rng_seed: 0x5eed_c0a1_d4a5_3c21,
            score_per_tier: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let tuning: Tuning = toml::from_str("").expect("empty tuning parses");
        assert_eq!(tuning, Tuning::default());
        assert_eq!(tuning.validate(), Ok(()));
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let tuning: Tuning = toml::from_str(
            r#"
                [map]
                rows = 9
                adjacency = "all"

                [wave]
                interval = 12.5
            "#,
        )
        .expect("partial tuning parses");

        assert_eq!(tuning.map.rows, 9);
        assert_eq!(tuning.map.columns, 17);
        assert_eq!(tuning.map.adjacency, Adjacency::All);
        assert!((tuning.wave.interval - 12.5).abs() < f32::EPSILON);
        assert_eq!(tuning.wave.base_units, WaveTuning::default().base_units);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result: Result<Tuning, _> = toml::from_str("[map]\nhexes = 3\n");
        assert!(result.is_err());
    }

    #[test]
    fn validate_rejects_inverted_zoom_range() {
        let mut tuning = Tuning::default();
        tuning.camera.min_zoom = 4.0;
        assert_eq!(
            tuning.validate(),
            Err(TuningError::InvalidZoomRange { min: 4.0, max: 3.0 })
        );
    }

    #[test]
    fn validate_rejects_empty_grid_and_idle_waves() {
        let mut tuning = Tuning::default();
        tuning.map.columns = 0;
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::EmptyGrid { columns: 0, .. })
        ));

        let mut tuning = Tuning::default();
        tuning.wave.interval = 0.0;
        assert_eq!(
            tuning.validate(),
            Err(TuningError::IntervalTooShort {
                field: "wave.interval"
            })
        );
    }

    #[test]
    fn validate_rejects_cadences_below_the_minimum() {
        let mut tuning = Tuning::default();
        tuning.economy.harvest_interval = 1e-10;
        assert_eq!(
            tuning.validate(),
            Err(TuningError::IntervalTooShort {
                field: "economy.harvest_interval"
            })
        );

        tuning.economy.harvest_interval = MIN_INTERVAL;
        assert_eq!(tuning.validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_nan_in_every_float_field() {
        type Field = fn(&mut Tuning) -> &mut f32;
        let fields: [(&str, Field); 13] = [
            ("tile_width", |t| &mut t.map.tile_width),
            ("tile_height", |t| &mut t.map.tile_height),
            ("min_zoom", |t| &mut t.camera.min_zoom),
            ("max_zoom", |t| &mut t.camera.max_zoom),
            ("pan_speed", |t| &mut t.camera.pan_speed),
            ("zoom_speed", |t| &mut t.camera.zoom_speed),
            ("drag_speed", |t| &mut t.camera.drag_speed),
            ("harvest_interval", |t| &mut t.economy.harvest_interval),
            ("max_health", |t| &mut t.castle.max_health),
            ("first_wave_delay", |t| &mut t.wave.first_wave_delay),
            ("interval", |t| &mut t.wave.interval),
            ("health", |t| &mut t.training.tiers[2].health),
            ("step_interval", |t| &mut t.training.tiers[4].step_interval),
        ];
        for (name, field) in fields {
            for bad in [f32::NAN, f32::INFINITY] {
                let mut tuning = Tuning::default();
                *field(&mut tuning) = bad;
                assert!(tuning.validate().is_err(), "{name} = {bad} was accepted");
            }
        }

        let mut tuning = Tuning::default();
        tuning.camera.max_zoom = f32::NAN;
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::InvalidZoomRange { .. })
        ));
    }

    #[test]
    fn nan_from_a_tuning_file_is_rejected() {
        let tuning: Tuning =
            toml::from_str("[camera]\nmin_zoom = nan\n").expect("toml accepts nan floats");
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::InvalidZoomRange { .. })
        ));
    }

    #[test]
    fn validate_bounds_the_grid_size() {
        let mut tuning = Tuning::default();
        tuning.map.rows = MAX_GRID_SIDE + 1;
        tuning.map.columns = u32::MAX;
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::OversizedGrid { .. })
        ));

        tuning.map.rows = MAX_GRID_SIDE;
        tuning.map.columns = MAX_GRID_SIDE;
        assert_eq!(tuning.validate(), Ok(()));
    }

    #[test]
    fn upgrade_prices_are_keyed_by_target_level() {
        let castle = CastleTuning::default();
        assert_eq!(castle.upgrade_price(CastleLevel::FIRST), None);
        assert_eq!(
            castle.upgrade_price(CastleLevel::new(2).expect("level")),
            Some(Price::new(20, 20))
        );
        assert_eq!(
            castle.upgrade_price(CastleLevel::MAX),
            Some(Price::new(160, 160))
        );
    }

    #[test]
    fn tile_prices_grow_with_ownership() {
        let prices = TilePrices::default();
        let food = prices.for_kind(TileKind::Food).expect("food is buildable");
        assert_eq!(food.for_owned(0), Price::coral(5));
        assert_eq!(food.for_owned(3), Price::coral(11));
        assert!(prices.for_kind(TileKind::Sea).is_none());
    }
}
