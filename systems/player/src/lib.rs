#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Player state: camera control, resource wallet, castle progression and
//! unit training.

mod camera;

use std::collections::BTreeMap;

use glam::Vec2;
use reef_defence_core::{
    CameraTuning, CastleLevel, CastleTuning, EconomyTuning, Price, TierTuning, TileKind,
    TrainingTuning, Tuning, UnitId, UnitTier,
};
use thiserror::Error;

pub use camera::{Camera, CameraInput};

/// Food and coral balances. Debits never drive a balance below zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Wallet {
    food: u32,
    coral: u32,
}

impl Wallet {
    /// Creates a wallet holding the provided balances.
    #[must_use]
    pub const fn new(food: u32, coral: u32) -> Self {
        Self { food, coral }
    }

    /// Food currently held.
    #[must_use]
    pub const fn food(&self) -> u32 {
        self.food
    }

    /// Coral currently held.
    #[must_use]
    pub const fn coral(&self) -> u32 {
        self.coral
    }

    /// Whether both balances cover the price.
    #[must_use]
    pub const fn can_afford(&self, price: Price) -> bool {
        self.food >= price.food && self.coral >= price.coral
    }

    /// Debits the price when affordable; leaves the wallet untouched otherwise.
    pub fn debit(&mut self, price: Price) -> bool {
        if !self.can_afford(price) {
            return false;
        }
        self.food -= price.food;
        self.coral -= price.coral;
        true
    }

    /// Adds the amount to both balances, saturating at the numeric limit.
    pub fn credit(&mut self, amount: Price) {
        self.food = self.food.saturating_add(amount.food);
        self.coral = self.coral.saturating_add(amount.coral);
    }
}

/// Reason a training request was refused.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum TrainingRejection {
    /// The castle is not developed enough for the tier.
    #[error("tier {tier} requires castle level {tier} (current level {castle_level})")]
    TierLocked {
        /// Requested tier.
        tier: u8,
        /// Current castle level.
        castle_level: u8,
    },
    /// The wallet does not hold enough food.
    #[error("training costs {cost} food but only {available} is available")]
    InsufficientFood {
        /// Food required for the tier.
        cost: u32,
        /// Food currently held.
        available: u32,
    },
}

/// The human player: camera, economy, castle and trained units.
#[derive(Debug)]
pub struct Player {
    camera: Camera,
    camera_tuning: CameraTuning,
    economy: EconomyTuning,
    castle_tuning: CastleTuning,
    training: TrainingTuning,
    wallet: Wallet,
    owned: BTreeMap<TileKind, u32>,
    castle_level: CastleLevel,
    castle_health: f32,
    roster: Vec<UnitId>,
    harvest_timer: f32,
}

impl Player {
    /// Creates a player with starting balances, looking at `camera_target`.
    #[must_use]
    pub fn new(tuning: &Tuning, camera_target: Vec2) -> Self {
        Self {
            camera: Camera::new(camera_target),
            camera_tuning: tuning.camera.clone(),
            economy: tuning.economy.clone(),
            castle_tuning: tuning.castle.clone(),
            training: tuning.training.clone(),
            wallet: Wallet::new(tuning.economy.starting_food, tuning.economy.starting_coral),
            owned: BTreeMap::new(),
            castle_level: CastleLevel::FIRST,
            castle_health: tuning.castle.max_health,
            roster: Vec::new(),
            harvest_timer: 0.0,
        }
    }

    /// Camera the map is viewed through.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Applies pan, drag and zoom input for one frame.
    pub fn update_camera(&mut self, input: &CameraInput, dt: f32) {
        self.camera.apply(input, &self.camera_tuning, dt);
    }

    /// Current balances.
    #[must_use]
    pub fn wallet(&self) -> &Wallet {
        &self.wallet
    }

    /// Food currently held.
    #[must_use]
    pub fn food(&self) -> u32 {
        self.wallet.food()
    }

    /// Coral currently held.
    #[must_use]
    pub fn coral(&self) -> u32 {
        self.wallet.coral()
    }

    /// Number of tiles of `kind` bought so far.
    #[must_use]
    pub fn owned(&self, kind: TileKind) -> u32 {
        self.owned.get(&kind).copied().unwrap_or(0)
    }

    /// Price of the next tile of `kind`, or `None` for kinds that cannot be bought.
    #[must_use]
    pub fn tile_cost(&self, kind: TileKind) -> Option<Price> {
        self.economy
            .tile_prices
            .for_kind(kind)
            .map(|price| price.for_owned(self.owned(kind)))
    }

    /// Pays for a tile of `kind`. Returns `false` and leaves balances untouched
    /// when the tile is not for sale or unaffordable.
    pub fn buy_tile(&mut self, kind: TileKind) -> bool {
        let Some(price) = self.tile_cost(kind) else {
            return false;
        };
        if !self.wallet.debit(price) {
            return false;
        }
        *self.owned.entry(kind).or_insert(0) += 1;
        true
    }

    /// Current castle level.
    #[must_use]
    pub fn castle_level(&self) -> CastleLevel {
        self.castle_level
    }

    /// Price of the next castle level, or `None` once the castle is maxed out.
    #[must_use]
    pub fn upgrade_cost(&self) -> Option<Price> {
        self.castle_tuning.upgrade_price(self.castle_level.next()?)
    }

    /// Pays for and applies the next castle level.
    pub fn buy_castle_upgrade(&mut self) -> bool {
        let (Some(next), Some(price)) = (self.castle_level.next(), self.upgrade_cost()) else {
            return false;
        };
        if !self.wallet.debit(price) {
            return false;
        }
        self.castle_level = next;
        true
    }

    /// Stats and cost of a tier as configured.
    #[must_use]
    pub fn tier_tuning(&self, tier: UnitTier) -> &TierTuning {
        &self.training.tiers[tier.index()]
    }

    /// Pays the food cost of a tier when the castle level allows it.
    pub fn train(&mut self, tier: UnitTier) -> Result<TierTuning, TrainingRejection> {
        if !tier.unlocked_at(self.castle_level) {
            return Err(TrainingRejection::TierLocked {
                tier: tier.get(),
                castle_level: self.castle_level.get(),
            });
        }
        let stats = *self.tier_tuning(tier);
        if !self.wallet.debit(Price::food(stats.food_cost)) {
            return Err(TrainingRejection::InsufficientFood {
                cost: stats.food_cost,
                available: self.wallet.food(),
            });
        }
        Ok(stats)
    }

    /// Identifiers of the units the player trained and that are still alive.
    #[must_use]
    pub fn roster(&self) -> &[UnitId] {
        &self.roster
    }

    /// Records a freshly trained unit.
    pub fn enlist(&mut self, id: UnitId) {
        self.roster.push(id);
    }

    /// Forgets a unit that left the map.
    pub fn discharge(&mut self, id: UnitId) {
        self.roster.retain(|unit| *unit != id);
    }

    /// Accumulates time and pays out income every harvest interval.
    ///
    /// Returns the total credited this call, if any.
    pub fn harvest(&mut self, dt: f32, food_tiles: u32, coral_tiles: u32) -> Option<Price> {
        let interval = self.economy.harvest_interval;
        if !(interval > 0.0) {
            return None;
        }
        self.harvest_timer += dt.max(0.0);
        if self.harvest_timer < interval {
            return None;
        }

        // Float to integer casts saturate.
        let payouts = (self.harvest_timer / interval).floor() as u32;
        self.harvest_timer %= interval;

        let income = self
            .economy
            .castle_income
            .saturating_add(Price::new(
                food_tiles.saturating_mul(self.economy.food_tile_yield),
                coral_tiles.saturating_mul(self.economy.coral_tile_yield),
            ))
            .saturating_mul(payouts);
        self.wallet.credit(income);
        Some(income)
    }

    /// Remaining castle health.
    #[must_use]
    pub fn castle_health(&self) -> f32 {
        self.castle_health
    }

    /// Castle health as a fraction of the maximum.
    #[must_use]
    pub fn castle_health_ratio(&self) -> f32 {
        if self.castle_tuning.max_health <= 0.0 {
            return 0.0;
        }
        (self.castle_health / self.castle_tuning.max_health).clamp(0.0, 1.0)
    }

    /// Subtracts damage from the castle, never dropping below zero.
    pub fn damage_castle(&mut self, amount: f32) {
        self.castle_health = (self.castle_health - amount.max(0.0)).max(0.0);
    }

    /// Whether the castle has fallen.
    #[must_use]
    pub fn is_castle_destroyed(&self) -> bool {
        self.castle_health <= 0.0
    }
}
