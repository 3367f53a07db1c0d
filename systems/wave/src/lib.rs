#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Time-driven enemy wave controller.
//!
//! The controller counts down to the next wave and, when the timer runs
//! out, emits one [`SpawnOrder`] per enemy unit. Placement on the map is the
//! caller's job; the controller only picks free edge tiles at random from the
//! candidates it is handed.

use rand::{seq::SliceRandom, SeedableRng};
use rand_chacha::ChaCha8Rng;
use reef_defence_core::{GridCoord, UnitId, UnitTier, WaveTuning};

/// Request to place one enemy unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpawnOrder {
    /// Edge tile the unit appears on.
    pub coord: GridCoord,
    /// Tier of the unit.
    pub tier: UnitTier,
}

/// Enemy wave state: counters, countdown and the units it sent.
#[derive(Debug)]
pub struct Wave {
    wave_count: u32,
    time_until_next_wave: f32,
    interval: f32,
    base_units: u32,
    units_per_wave: u32,
    tier_step: u32,
    rng: ChaCha8Rng,
    spawned: Vec<UnitId>,
}

impl Wave {
    /// Creates the controller with the first wave `first_wave_delay` seconds away.
    #[must_use]
    pub fn new(tuning: &WaveTuning) -> Self {
        Self {
            wave_count: 0,
            time_until_next_wave: tuning.first_wave_delay.max(0.0),
            interval: tuning.interval,
            base_units: tuning.base_units,
            units_per_wave: tuning.units_per_wave,
            tier_step: tuning.tier_step.max(1),
            rng: ChaCha8Rng::seed_from_u64(tuning.rng_seed),
            spawned: Vec::new(),
        }
    }

    /// Number of waves spawned so far.
    #[must_use]
    pub const fn wave_count(&self) -> u32 {
        self.wave_count
    }

    /// Seconds left before the next wave.
    #[must_use]
    pub const fn time_until_next_wave(&self) -> f32 {
        self.time_until_next_wave
    }

    /// Seconds between two waves.
    #[must_use]
    pub const fn interval(&self) -> f32 {
        self.interval
    }

    /// Tier of the units in the most recent wave.
    #[must_use]
    pub fn current_tier(&self) -> UnitTier {
        let step = self.wave_count.saturating_sub(1) / self.tier_step;
        let tier = (step + 1).min(UnitTier::ALL.len() as u32) as u8;
        UnitTier::new(tier).unwrap_or(UnitTier::ALL[0])
    }

    /// Number of units the current wave is made of.
    #[must_use]
    pub fn units_in_wave(&self) -> u32 {
        self.base_units
            .saturating_add(self.units_per_wave.saturating_mul(self.wave_count.saturating_sub(1)))
    }

    /// Advances the countdown and spawns a wave when it runs out.
    ///
    /// Spawn orders are written to `out`, one per unit, on distinct tiles
    /// drawn from `free_edges`. Returns `true` when a wave started.
    pub fn update(&mut self, dt: f32, free_edges: &[GridCoord], out: &mut Vec<SpawnOrder>) -> bool {
        self.time_until_next_wave -= dt.max(0.0);
        if self.time_until_next_wave > 0.0 {
            return false;
        }

        self.wave_count += 1;
        self.time_until_next_wave = self.interval;

        let tier = self.current_tier();
        let count = self.units_in_wave() as usize;
        out.extend(
            free_edges
                .choose_multiple(&mut self.rng, count)
                .map(|coord| SpawnOrder {
                    coord: *coord,
                    tier,
                }),
        );
        true
    }

    /// Records an enemy unit placed for this controller.
    pub fn track(&mut self, id: UnitId) {
        self.spawned.push(id);
    }

    /// Forgets an enemy unit that left the map.
    pub fn forget(&mut self, id: UnitId) {
        self.spawned.retain(|unit| *unit != id);
    }

    /// Enemy units still alive.
    #[must_use]
    pub fn spawned(&self) -> &[UnitId] {
        &self.spawned
    }
}
