#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Top-level orchestrator tying the map, units, player, overlay and waves
//! together.
//!
//! [`Game::frame`] consumes one [`FrameInput`], advances every subsystem and
//! rebuilds the [`Scene`] the backend draws.

mod render;

use glam::Vec2;
use log::{debug, info, warn};
use reef_defence_core::{
    GridCoord, Owner, Price, TileKind, Tuning, TuningError, UnitId, UnitTier,
};
use reef_defence_rendering::{FrameControl, FrameInput, MenuKey, Scene};
use reef_defence_system_overlay::{MenuState, Overlay};
use reef_defence_system_player::{CameraInput, Player, TrainingRejection};
use reef_defence_system_wave::{SpawnOrder, Wave};
use reef_defence_world::{Casualty, Map, UnitRoster};

/// Complete game session.
#[derive(Debug)]
pub struct Game {
    tuning: Tuning,
    map: Map,
    units: UnitRoster,
    player: Player,
    overlay: Overlay,
    wave: Wave,
    game_time: f32,
    score: u32,
    running: bool,
    cursor: Vec2,
    selected_unit: Option<UnitId>,
    spawn_orders: Vec<SpawnOrder>,
}

impl Game {
    /// Starts a session for a window of `screen` pixels, centring the camera on the castle.
    pub fn new(tuning: Tuning, screen: Vec2) -> Result<Self, TuningError> {
        tuning.validate()?;

        let map = Map::new(&tuning.map);
        let castle_centre = map.tile(map.castle_coord()).center();
        let player = Player::new(&tuning, castle_centre - screen * 0.5);
        let overlay = Overlay::new(screen);
        let wave = Wave::new(&tuning.wave);

        let mut game = Self {
            tuning,
            map,
            units: UnitRoster::new(),
            player,
            overlay,
            wave,
            game_time: 0.0,
            score: 0,
            running: true,
            cursor: screen * 0.5,
            selected_unit: None,
            spawn_orders: Vec::new(),
        };
        game.refresh_costs();
        info!(
            "session started on a {}x{} map",
            game.map.columns(),
            game.map.rows()
        );
        Ok(game)
    }

    /// Authoritative map.
    #[must_use]
    pub fn map(&self) -> &Map {
        &self.map
    }

    /// Every unit alive on the map.
    #[must_use]
    pub fn units(&self) -> &UnitRoster {
        &self.units
    }

    /// Player state.
    #[must_use]
    pub fn player(&self) -> &Player {
        &self.player
    }

    /// HUD state.
    #[must_use]
    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    /// Enemy wave controller.
    #[must_use]
    pub fn wave(&self) -> &Wave {
        &self.wave
    }

    /// Points scored by killing enemy units.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Seconds the session has been running.
    #[must_use]
    pub fn game_time(&self) -> f32 {
        self.game_time
    }

    /// Whether the castle still stands.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Player unit currently selected for move orders.
    #[must_use]
    pub fn selected_unit(&self) -> Option<UnitId> {
        self.selected_unit
    }

    /// Places an enemy unit of `tier` on `coord`.
    pub fn spawn_enemy(&mut self, tier: UnitTier, coord: GridCoord) -> Option<UnitId> {
        let stats = *self.tuning.tier(tier);
        let id = self
            .units
            .spawn(&mut self.map, Owner::Enemy, tier, &stats, coord)?;
        self.wave.track(id);
        Some(id)
    }

    /// Runs one frame: updates the session while it is running and rebuilds the scene.
    ///
    /// After the castle fell the game-over summary is shown until the next click.
    pub fn frame(&mut self, dt: f32, input: &FrameInput, scene: &mut Scene) -> FrameControl {
        if self.running {
            self.update(dt, input);
        } else if input.primary_pressed {
            return FrameControl::Exit;
        }
        self.render(scene);
        FrameControl::Continue
    }

    /// Advances the session by `dt` seconds.
    pub fn update(&mut self, dt: f32, input: &FrameInput) {
        if !self.running {
            return;
        }
        if input.screen_size.x > 0.0 && input.screen_size.y > 0.0 {
            self.overlay.resize(input.screen_size);
        }
        self.cursor = input.cursor;

        self.resolve_castle_contact(dt);
        if !self.running {
            return;
        }

        if input.pressed(MenuKey::ToggleBuildMode) {
            self.overlay.toggle_build_mode();
        }
        if input.primary_pressed {
            self.handle_click(input.cursor);
        }
        self.handle_menu_keys(input);
        self.overlay.update(dt);

        let drag = (input.primary_held && !input.primary_pressed).then_some(input.cursor_delta);
        self.player.update_camera(
            &CameraInput {
                pan: input.pan,
                drag,
                wheel: input.wheel,
            },
            dt,
        );
        if let Some(income) = self.player.harvest(
            dt,
            self.map.count(TileKind::Food),
            self.map.count(TileKind::Coral),
        ) {
            debug!("harvested {} food and {} coral", income.food, income.coral);
        }

        self.advance_wave(dt);
        self.map.update(dt);

        let castle = self.map.castle_coord();
        self.units.advance(&mut self.map, dt, castle);
        let casualties = self.units.skirmish(&mut self.map, dt);
        for casualty in casualties {
            self.record_casualty(casualty);
        }

        self.game_time += dt.max(0.0);
    }

    fn resolve_castle_contact(&mut self, dt: f32) {
        let castle = self.map.castle_coord();
        let damage: f32 = self
            .map
            .surrounding_coords(castle)
            .into_iter()
            .filter_map(|coord| self.map.tile(coord).unit())
            .filter_map(|id| self.units.get(id))
            .filter(|unit| unit.owner() == Owner::Enemy)
            .map(|unit| unit.attack_damage() * dt.max(0.0))
            .sum();
        if damage <= 0.0 {
            return;
        }

        self.player.damage_castle(damage);
        if self.player.is_castle_destroyed() {
            self.running = false;
            info!(
                "castle destroyed after {:.1}s with score {} on wave {}",
                self.game_time,
                self.score,
                self.wave.wave_count()
            );
        }
    }

    fn handle_click(&mut self, cursor: Vec2) {
        if self.overlay.is_mouse_on_overlay(cursor) {
            if self.overlay.is_build_mode() {
                if let Some(index) = self.overlay.mouse_on_build_tile(cursor) {
                    self.overlay.select_build_tile(index);
                    self.selected_unit = None;
                }
            }
            return;
        }

        let coord = self
            .map
            .world_to_grid(self.player.camera().screen_to_world(cursor));
        if !self.map.contains(coord) {
            return;
        }

        let selection = self.overlay.selected_kind();
        if let Some(kind) = selection {
            if !self.overlay.is_menu_open()
                && self.map.is_surrounded(coord)
                && self.map.is_tile_available(coord, kind)
            {
                self.try_build(coord, kind);
                return;
            }
        }

        let tile = self.map.tile(coord);
        if tile.kind().is_castle() {
            self.overlay.open_castle_menu();
        } else if selection.is_none() {
            if tile.kind() == TileKind::Training && self.player_unit_at(coord).is_none() {
                let cooldown = tile.training_cooldown();
                self.overlay.open_training_menu(coord, cooldown);
            } else {
                self.command_units(coord);
            }
        }
    }

    fn player_unit_at(&self, coord: GridCoord) -> Option<UnitId> {
        self.map
            .tile(coord)
            .unit()
            .filter(|id| self.units.get(*id).is_some_and(|unit| unit.owner() == Owner::Player))
    }

    fn try_build(&mut self, coord: GridCoord, kind: TileKind) {
        if !self.player.buy_tile(kind) {
            debug!("cannot afford a {} tile", kind.tag());
            self.overlay.show_notice();
            return;
        }
        if self.map.change_tile_type(coord, kind) {
            info!(
                "built {} at ({}, {})",
                kind.tag(),
                coord.column(),
                coord.row()
            );
        }
        self.refresh_costs();
    }

    fn command_units(&mut self, coord: GridCoord) {
        match (self.player_unit_at(coord), self.selected_unit) {
            (Some(id), Some(selected)) if id == selected => self.selected_unit = None,
            (Some(id), _) => self.selected_unit = Some(id),
            (None, Some(selected)) => {
                if self.units.set_destination(selected, coord) {
                    debug!(
                        "unit {} ordered to ({}, {})",
                        selected.get(),
                        coord.column(),
                        coord.row()
                    );
                } else {
                    self.selected_unit = None;
                }
            }
            (None, None) => {}
        }
    }

    fn handle_menu_keys(&mut self, input: &FrameInput) {
        match self.overlay.menu() {
            MenuState::Normal => {}
            MenuState::Castle => {
                if input.pressed(MenuKey::CloseMenu) {
                    self.overlay.close_menu();
                } else if input.pressed(MenuKey::UpgradeCastle) {
                    self.upgrade_castle();
                }
            }
            MenuState::Training { tile } => {
                if input.pressed(MenuKey::CloseMenu) {
                    self.overlay.close_menu();
                    return;
                }
                let requested = input.keys.iter().find_map(|key| match key {
                    MenuKey::Train(tier) => Some(*tier),
                    _ => None,
                });
                if let Some(tier) = requested {
                    self.train_at(tile, tier);
                }
            }
        }
    }

    fn upgrade_castle(&mut self) {
        if !self.player.buy_castle_upgrade() {
            self.overlay.show_notice();
            return;
        }
        let level = self.player.castle_level();
        self.map.set_castle_level(level);
        self.overlay.close_menu();
        info!("castle upgraded to level {}", level.get());
    }

    fn train_at(&mut self, coord: GridCoord, tier: UnitTier) {
        let tile = self.map.tile(coord);
        if tile.kind() != TileKind::Training || tile.is_training() || tile.is_unit_on_tile() {
            debug!("training ground at ({}, {}) is busy", coord.column(), coord.row());
            return;
        }

        let stats = match self.player.train(tier) {
            Ok(stats) => stats,
            Err(rejection @ TrainingRejection::TierLocked { .. }) => {
                debug!("{rejection}");
                return;
            }
            Err(rejection @ TrainingRejection::InsufficientFood { .. }) => {
                debug!("{rejection}");
                self.overlay.show_notice();
                return;
            }
        };

        match self
            .units
            .spawn(&mut self.map, Owner::Player, tier, &stats, coord)
        {
            Some(id) => {
                self.player.enlist(id);
                let _ = self.map.start_training(coord, stats.cooldown);
                self.overlay.close_menu();
                info!("trained tier {} unit {}", tier.get(), id.get());
            }
            None => warn!(
                "training ground at ({}, {}) rejected the new unit",
                coord.column(),
                coord.row()
            ),
        }
    }

    fn advance_wave(&mut self, dt: f32) {
        let free_edges: Vec<GridCoord> = self
            .map
            .edge_coords()
            .into_iter()
            .filter(|coord| {
                let tile = self.map.tile(*coord);
                !tile.is_unit_on_tile() && !self.map.is_locked(tile.kind())
            })
            .collect();

        let mut orders = std::mem::take(&mut self.spawn_orders);
        if self.wave.update(dt, &free_edges, &mut orders) {
            info!(
                "wave {} arrives with {} tier {} units",
                self.wave.wave_count(),
                orders.len(),
                self.wave.current_tier().get()
            );
        }
        for order in orders.drain(..) {
            if self.spawn_enemy(order.tier, order.coord).is_none() {
                warn!(
                    "could not place enemy at ({}, {})",
                    order.coord.column(),
                    order.coord.row()
                );
            }
        }
        self.spawn_orders = orders;
    }

    fn record_casualty(&mut self, casualty: Casualty) {
        match casualty.owner {
            Owner::Enemy => {
                self.wave.forget(casualty.id);
                let reward = self
                    .tuning
                    .wave
                    .score_per_tier
                    .saturating_mul(u32::from(casualty.tier.get()));
                self.score = self.score.saturating_add(reward);
                debug!("enemy {} defeated, +{reward} score", casualty.id.get());
            }
            Owner::Player => {
                self.player.discharge(casualty.id);
                if self.selected_unit == Some(casualty.id) {
                    self.selected_unit = None;
                }
                debug!("unit {} fell", casualty.id.get());
            }
        }
    }

    fn refresh_costs(&mut self) {
        let costs = TileKind::BUILDABLE.map(|kind| self.player.tile_cost(kind).unwrap_or(Price::FREE));
        self.overlay.set_costs(costs);
    }
}
