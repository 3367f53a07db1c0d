use glam::Vec2;
use reef_defence_core::{CastleLevel, GridCoord, Price, TileKind, TrainingTuning};
use reef_defence_system_overlay::{MenuState, Overlay, BUILD_TILE_SIZE};

const SCREEN: Vec2 = Vec2::new(1920.0, 1080.0);

fn centre_of_build_tile(overlay: &Overlay, index: usize) -> Vec2 {
    let rect = overlay.layout().build_tiles()[index];
    rect.origin + rect.size / 2.0
}

#[test]
fn selecting_the_same_tile_twice_clears_the_selection() {
    let mut overlay = Overlay::new(SCREEN);

    overlay.select_build_tile(2);
    assert_eq!(overlay.selected_kind(), Some(TileKind::Training));

    overlay.select_build_tile(2);
    assert_eq!(overlay.selected(), None);
    assert_eq!(overlay.selected_kind(), None);
}

#[test]
fn selecting_another_tile_switches_the_selection() {
    let mut overlay = Overlay::new(SCREEN);
    overlay.select_build_tile(0);
    overlay.select_build_tile(1);
    assert_eq!(overlay.selected_kind(), Some(TileKind::Coral));
}

#[test]
fn build_tiles_are_hit_tested_in_menu_order() {
    let overlay = Overlay::new(SCREEN);

    for index in 0..3 {
        let centre = centre_of_build_tile(&overlay, index);
        assert_eq!(overlay.mouse_on_build_tile(centre), Some(index));
        assert!(overlay.is_mouse_on_overlay(centre));
    }

    assert_eq!(overlay.mouse_on_build_tile(Vec2::new(10.0, 10.0)), None);
    assert_eq!(
        overlay.layout().build_tiles()[0].size,
        Vec2::new(BUILD_TILE_SIZE * 1.15, BUILD_TILE_SIZE)
    );
}

#[test]
fn build_menu_only_blocks_clicks_in_build_mode() {
    let mut overlay = Overlay::new(SCREEN);
    let menu = overlay.layout().build_menu();
    let inside = menu.origin + Vec2::new(5.0, 5.0);
    let inventory = overlay.layout().inventory().origin + Vec2::new(5.0, 5.0);

    assert!(overlay.is_mouse_on_overlay(inside));
    overlay.toggle_build_mode();
    assert!(!overlay.is_mouse_on_overlay(inside));
    assert!(overlay.is_mouse_on_overlay(inventory));
    assert!(!overlay.is_mouse_on_overlay(SCREEN / 2.0));
}

#[test]
fn layout_follows_the_screen_size() {
    let mut overlay = Overlay::new(SCREEN);
    overlay.resize(Vec2::new(800.0, 600.0));

    let menu = overlay.layout().build_menu();
    assert_eq!(menu.origin, Vec2::new(200.0, 525.0));
    assert_eq!(menu.size, Vec2::new(400.0, 75.0));

    let inventory = overlay.layout().inventory();
    assert_eq!(inventory.origin, Vec2::new(600.0, 0.0));
    assert_eq!(inventory.size, Vec2::new(200.0, 60.0));
}

#[test]
fn countdowns_clamp_at_zero() {
    let mut overlay = Overlay::new(SCREEN);
    overlay.show_notice();
    overlay.set_training_cooldown(0.5);

    overlay.update(0.4);
    assert!(overlay.is_notice_visible());
    overlay.update(2.0);

    assert!(!overlay.is_notice_visible());
    assert_eq!(overlay.training_cooldown(), 0.0);
}

#[test]
fn only_one_modal_menu_is_open() {
    let mut overlay = Overlay::new(SCREEN);
    let tile = GridCoord::new(3, 4);

    overlay.open_training_menu(tile, 4.0);
    assert_eq!(overlay.menu(), MenuState::Training { tile });
    assert_eq!(overlay.training_cooldown(), 4.0);

    overlay.open_castle_menu();
    assert_eq!(overlay.menu(), MenuState::Castle);

    overlay.close_menu();
    assert!(!overlay.is_menu_open());
}

#[test]
fn menus_describe_prices_and_locks() {
    let castle = Overlay::castle_menu(CastleLevel::FIRST, Some(Price::new(20, 20)));
    assert_eq!(castle.title, "Castle");
    assert!(castle.lines.contains(&"[L] Upgrade: 20 food, 20 coral".to_owned()));

    let maxed = Overlay::castle_menu(CastleLevel::MAX, None);
    assert!(maxed.lines.contains(&"Fully upgraded".to_owned()));

    let overlay = Overlay::new(SCREEN);
    let training = overlay.training_menu(CastleLevel::FIRST, &TrainingTuning::default().tiers);
    assert_eq!(training.lines[0], "[1] Tier 1: 10 food, 10s");
    assert_eq!(training.lines[1], "[2] Tier 2: castle level 2");
    assert_eq!(training.lines.last().map(String::as_str), Some("[C] Close"));
}
