use glam::Vec2;
use reef_defence_core::{
    CastleLevel, EconomyTuning, GridCoord, Owner, TileKind, Tuning, UnitTier, WaveTuning,
};
use reef_defence_game::Game;
use reef_defence_rendering::{FrameControl, FrameInput, MenuKey, Scene};

const SCREEN: Vec2 = Vec2::new(1920.0, 1080.0);

fn tuning(food: u32, coral: u32) -> Tuning {
    let mut tuning = Tuning {
        economy: EconomyTuning {
            starting_food: food,
            starting_coral: coral,
            harvest_interval: 1_000.0,
            ..EconomyTuning::default()
        },
        wave: WaveTuning {
            first_wave_delay: 1_000.0,
            ..WaveTuning::default()
        },
        ..Tuning::default()
    };
    for tier in &mut tuning.training.tiers {
        tier.step_interval = 1_000.0;
    }
    tuning
}

fn game(food: u32, coral: u32) -> Game {
    Game::new(tuning(food, coral), SCREEN).expect("default tuning is valid")
}

fn idle() -> FrameInput {
    FrameInput {
        screen_size: SCREEN,
        cursor: SCREEN / 2.0,
        ..FrameInput::default()
    }
}

fn screen_of(game: &Game, coord: GridCoord) -> Vec2 {
    let centre = game.map().tile(coord).center();
    game.player().camera().world_to_screen(centre)
}

fn click(game: &mut Game, cursor: Vec2) {
    let input = FrameInput {
        cursor,
        primary_pressed: true,
        primary_held: true,
        ..idle()
    };
    game.update(0.016, &input);
}

fn press(game: &mut Game, key: MenuKey) {
    let input = FrameInput {
        keys: vec![key],
        ..idle()
    };
    game.update(0.016, &input);
}

fn click_tile(game: &mut Game, coord: GridCoord) {
    let cursor = screen_of(game, coord);
    click(game, cursor);
}

fn click_build_icon(game: &mut Game, index: usize) {
    let rect = game.overlay().layout().build_tiles()[index];
    click(game, rect.origin + rect.size / 2.0);
}

fn tier(value: u8) -> UnitTier {
    UnitTier::new(value).expect("tier in range")
}

const TRAINING_GROUND: GridCoord = GridCoord::new(8, 7);

fn build_training_ground(game: &mut Game) {
    click_build_icon(game, 2);
    assert_eq!(game.overlay().selected_kind(), Some(TileKind::Training));
    click_tile(game, TRAINING_GROUND);
    assert_eq!(game.map().tile(TRAINING_GROUND).kind(), TileKind::Training);
    click_build_icon(game, 2);
    assert_eq!(game.overlay().selected_kind(), None);
}

#[test]
fn camera_starts_centred_on_the_castle() {
    let game = game(0, 0);
    let castle = game.map().castle_coord();
    assert_eq!(castle, GridCoord::new(8, 8));
    let screen = screen_of(&game, castle);
    assert!((screen - SCREEN / 2.0).length() < 1e-3);
}

#[test]
fn building_next_to_the_castle_debits_and_raises_the_price() {
    let mut game = game(0, 20);
    let target = GridCoord::new(9, 8);

    click_build_icon(&mut game, 0);
    click_tile(&mut game, target);

    assert_eq!(game.map().tile(target).kind(), TileKind::Food);
    assert_eq!(game.player().coral(), 15);
    assert_eq!(game.overlay().costs()[0].coral, 7);
    assert!(!game.overlay().is_notice_visible());
}

#[test]
fn detached_tiles_cannot_be_built() {
    let mut game = game(0, 20);
    let far = GridCoord::new(2, 2);

    click_build_icon(&mut game, 0);
    click_tile(&mut game, far);

    assert_eq!(game.map().tile(far).kind(), TileKind::Sea);
    assert_eq!(game.player().coral(), 20);
}

#[test]
fn unaffordable_tiles_show_the_notice() {
    let mut game = game(0, 2);
    let target = GridCoord::new(8, 9);

    click_build_icon(&mut game, 1);
    click_tile(&mut game, target);

    assert_eq!(game.map().tile(target).kind(), TileKind::Sea);
    assert!(game.overlay().is_notice_visible());
    assert_eq!(game.player().food(), 0);

    game.update(1.5, &idle());
    assert!(!game.overlay().is_notice_visible());
}

#[test]
fn training_without_enough_food_creates_no_unit() {
    let mut game = game(15, 20);
    build_training_ground(&mut game);
    assert_eq!(game.player().food(), 5);

    click_tile(&mut game, TRAINING_GROUND);
    assert!(game.overlay().is_menu_open());
    press(&mut game, MenuKey::Train(tier(1)));

    assert_eq!(game.player().food(), 5);
    assert!(game.units().is_empty());
    assert!(game.overlay().is_notice_visible());
    assert!(game.overlay().is_menu_open());
}

#[test]
fn training_spawns_a_unit_and_starts_the_cooldown() {
    let mut game = game(100, 100);
    build_training_ground(&mut game);

    click_tile(&mut game, TRAINING_GROUND);
    press(&mut game, MenuKey::Train(tier(2)));
    assert!(game.units().is_empty(), "tier two needs castle level two");

    press(&mut game, MenuKey::Train(tier(1)));

    assert_eq!(game.player().food(), 100 - 10 - 10);
    assert_eq!(game.units().len(), 1);
    assert_eq!(game.player().roster().len(), 1);
    let tile = game.map().tile(TRAINING_GROUND);
    assert!(tile.is_training());
    assert!(tile.is_unit_on_tile());
    assert!(!game.overlay().is_menu_open());
}

#[test]
fn castle_menu_upgrades_and_closes() {
    let mut game = game(10, 10);
    let castle = game.map().castle_coord();

    click_tile(&mut game, castle);
    assert!(game.overlay().is_menu_open());
    press(&mut game, MenuKey::UpgradeCastle);
    assert!(game.overlay().is_notice_visible());
    assert_eq!(game.player().castle_level(), CastleLevel::FIRST);
    press(&mut game, MenuKey::CloseMenu);
    assert!(!game.overlay().is_menu_open());

    let mut rich = self::game(1_000, 1_000);
    click_tile(&mut rich, castle);
    press(&mut rich, MenuKey::UpgradeCastle);
    let level = CastleLevel::new(2).expect("valid level");
    assert_eq!(rich.player().castle_level(), level);
    assert_eq!(rich.map().tile(castle).kind(), TileKind::Castle(level));
    assert!(!rich.overlay().is_menu_open());
}

#[test]
fn expiring_wave_timer_spawns_enemies_on_the_edge() {
    let mut tuning = tuning(0, 0);
    tuning.wave.first_wave_delay = 0.1;
    let mut game = Game::new(tuning, SCREEN).expect("valid tuning");

    game.update(0.2, &idle());

    assert_eq!(game.wave().wave_count(), 1);
    assert_eq!(game.wave().time_until_next_wave(), game.wave().interval());
    assert_eq!(game.units().count_owned(Owner::Enemy), 2);
    let edges = game.map().edge_coords();
    assert!(game.units().iter().all(|unit| edges.contains(&unit.coord())));
    assert_eq!(game.wave().spawned().len(), 2);
}

#[test]
fn enemies_at_the_castle_end_the_session() {
    let mut tuning = tuning(0, 0);
    tuning.castle.max_health = 1.0;
    let mut game = Game::new(tuning, SCREEN).expect("valid tuning");
    let _ = game
        .spawn_enemy(tier(1), GridCoord::new(8, 9))
        .expect("free tile");

    game.update(0.5, &idle());
    assert!(game.is_running());
    game.update(0.6, &idle());
    assert!(!game.is_running());
    assert_eq!(game.player().castle_health(), 0.0);

    let mut scene = Scene::default();
    assert_eq!(game.frame(0.016, &idle(), &mut scene), FrameControl::Continue);
    assert!(scene.hud.game_over.is_some());

    let click = FrameInput {
        primary_pressed: true,
        ..idle()
    };
    assert_eq!(game.frame(0.016, &click, &mut scene), FrameControl::Exit);
}

#[test]
fn killing_enemies_scores_by_tier() {
    let mut game = game(100, 100);
    build_training_ground(&mut game);
    click_tile(&mut game, TRAINING_GROUND);
    press(&mut game, MenuKey::Train(tier(1)));
    let enemy = game
        .spawn_enemy(tier(1), GridCoord::new(8, 6))
        .expect("free tile");

    game.update(10.5, &idle());

    assert!(game.units().get(enemy).is_none());
    assert!(game.units().is_empty());
    assert!(game.player().roster().is_empty());
    assert!(game.wave().spawned().is_empty());
    assert_eq!(game.score(), 10);
    assert!(!game.map().tile(TRAINING_GROUND).is_unit_on_tile());
}

#[test]
fn trained_units_follow_move_orders() {
    let mut game = game(100, 100);
    build_training_ground(&mut game);
    click_tile(&mut game, TRAINING_GROUND);
    press(&mut game, MenuKey::Train(tier(1)));
    let unit = game.player().roster()[0];

    click_tile(&mut game, TRAINING_GROUND);
    assert_eq!(game.selected_unit(), Some(unit));
    assert!(!game.overlay().is_menu_open(), "training ground is busy");

    let destination = GridCoord::new(8, 5);
    click_tile(&mut game, destination);
    assert_eq!(
        game.units().get(unit).and_then(|unit| unit.destination()),
        Some(destination)
    );
}

#[test]
fn build_mode_toggle_hides_the_menu() {
    let mut game = game(0, 0);
    let mut scene = Scene::default();
    game.render(&mut scene);
    assert!(scene.hud.build_menu.is_some());

    press(&mut game, MenuKey::ToggleBuildMode);
    game.render(&mut scene);

    assert!(!game.overlay().is_build_mode());
    assert!(scene.hud.build_menu.is_none());
}

#[test]
fn scene_lists_tiles_units_and_ghost() {
    let mut game = game(0, 100);
    click_build_icon(&mut game, 1);
    let near = screen_of(&game, GridCoord::new(7, 8));
    let hover = FrameInput {
        cursor: near,
        ..idle()
    };
    game.update(0.016, &hover);
    let _ = game.spawn_enemy(tier(3), GridCoord::new(0, 0));

    let mut scene = Scene::default();
    game.render(&mut scene);

    assert_eq!(scene.tiles.len(), 17 * 17);
    assert_eq!(scene.units.len(), 1);
    assert_eq!(scene.units[0].tier, tier(3));
    let ghost = scene.ghost.expect("ghost under the cursor");
    assert_eq!(ghost.kind, TileKind::Coral);
    assert!(ghost.placeable);
    assert!(scene.hud.inventory.is_some());
    assert!(scene.hud.menu.is_none());
}
