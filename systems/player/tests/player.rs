use glam::Vec2;
use reef_defence_core::{CastleLevel, EconomyTuning, Price, TileKind, Tuning, UnitTier};
use reef_defence_system_player::{CameraInput, Player, TrainingRejection};

fn tier(value: u8) -> UnitTier {
    UnitTier::new(value).expect("tier in range")
}

fn player_with(food: u32, coral: u32) -> Player {
    let tuning = Tuning {
        economy: EconomyTuning {
            starting_food: food,
            starting_coral: coral,
            ..EconomyTuning::default()
        },
        ..Tuning::default()
    };
    Player::new(&tuning, Vec2::ZERO)
}

#[test]
fn training_without_enough_food_leaves_the_wallet_alone() {
    let mut player = player_with(5, 0);

    let outcome = player.train(tier(1));

    assert_eq!(
        outcome,
        Err(TrainingRejection::InsufficientFood {
            cost: 10,
            available: 5,
        })
    );
    assert_eq!(player.food(), 5);
    assert!(player.roster().is_empty());
}

#[test]
fn training_is_gated_by_castle_level() {
    let mut player = player_with(1_000, 1_000);

    assert_eq!(
        player.train(tier(2)),
        Err(TrainingRejection::TierLocked {
            tier: 2,
            castle_level: 1,
        })
    );
    assert_eq!(player.food(), 1_000);

    assert!(player.buy_castle_upgrade());
    let stats = player.train(tier(2)).expect("tier two unlocked at level two");
    assert_eq!(stats.food_cost, 20);
    assert_eq!(player.food(), 1_000 - 20 - 20);
}

#[test]
fn failed_purchases_never_touch_balances() {
    let mut player = player_with(0, 4);

    assert!(!player.buy_tile(TileKind::Food));
    assert!(!player.buy_tile(TileKind::Sea));
    assert!(!player.buy_tile(TileKind::Castle(CastleLevel::FIRST)));
    assert!(!player.buy_castle_upgrade());

    assert_eq!((player.food(), player.coral()), (0, 4));
    assert_eq!(player.owned(TileKind::Food), 0);
    assert_eq!(player.castle_level(), CastleLevel::FIRST);
}

#[test]
fn tile_prices_grow_with_ownership() {
    let mut player = player_with(0, 100);
    assert_eq!(player.tile_cost(TileKind::Food), Some(Price::coral(5)));

    assert!(player.buy_tile(TileKind::Food));
    assert_eq!(player.coral(), 95);
    assert_eq!(player.owned(TileKind::Food), 1);
    assert_eq!(player.tile_cost(TileKind::Food), Some(Price::coral(7)));
    assert_eq!(player.tile_cost(TileKind::Sea), None);
}

#[test]
fn castle_upgrades_stop_at_the_last_level() {
    let mut player = player_with(10_000, 10_000);
    for _ in 0..4 {
        assert!(player.buy_castle_upgrade());
    }
    assert_eq!(player.castle_level(), CastleLevel::MAX);
    assert_eq!(player.upgrade_cost(), None);

    let food = player.food();
    assert!(!player.buy_castle_upgrade());
    assert_eq!(player.food(), food);
}

#[test]
fn harvest_pays_once_per_interval() {
    let mut player = player_with(0, 0);

    assert_eq!(player.harvest(4.0, 2, 1), None);
    let income = player.harvest(1.5, 2, 1).expect("interval elapsed");

    assert_eq!(income, Price::new(1 + 2 * 2, 1 + 2));
    assert_eq!((player.food(), player.coral()), (5, 3));
    assert_eq!(player.harvest(1.0, 2, 1), None);
}

#[test]
fn long_frames_pay_every_elapsed_interval_at_once() {
    let mut player = player_with(0, 0);

    let income = player.harvest(12.0, 1, 0).expect("two intervals elapsed");

    assert_eq!(income, Price::new(2 * (1 + 2), 2));
    assert_eq!(player.harvest(2.9, 1, 0), None);
    assert!(player.harvest(0.2, 1, 0).is_some());
}

#[test]
fn tiny_harvest_intervals_return_immediately() {
    let tuning = Tuning {
        economy: EconomyTuning {
            starting_food: 0,
            starting_coral: 0,
            harvest_interval: 1e-10,
            ..EconomyTuning::default()
        },
        ..Tuning::default()
    };
    let mut player = Player::new(&tuning, Vec2::ZERO);

    let income = player.harvest(0.016, 3, 3).expect("many intervals elapsed");

    assert!(income.food > 1_000_000);
    assert_eq!(player.food(), income.food);
}

#[test]
fn zoom_only_uses_the_wheel_direction_and_stays_clamped() {
    let mut player = player_with(0, 0);
    let zoom_in = CameraInput {
        wheel: 0.01,
        ..CameraInput::default()
    };
    let huge_zoom_in = CameraInput {
        wheel: 50.0,
        ..CameraInput::default()
    };

    let mut small = player_with(0, 0);
    small.update_camera(&zoom_in, 0.01);
    player.update_camera(&huge_zoom_in, 0.01);
    assert!((small.camera().zoom() - player.camera().zoom()).abs() < 1e-6);

    for _ in 0..100 {
        player.update_camera(&huge_zoom_in, 0.1);
    }
    assert_eq!(player.camera().zoom(), 3.0);

    let zoom_out = CameraInput {
        wheel: -1.0,
        ..CameraInput::default()
    };
    for _ in 0..100 {
        player.update_camera(&zoom_out, 0.1);
    }
    assert!((player.camera().zoom() - 0.3).abs() < 1e-6);
}

#[test]
fn dragging_moves_the_camera_against_the_mouse() {
    let mut player = player_with(0, 0);
    let drag = CameraInput {
        drag: Some(Vec2::new(30.0, -10.0)),
        ..CameraInput::default()
    };

    player.update_camera(&drag, 0.016);

    assert_eq!(player.camera().target(), Vec2::new(-30.0, 10.0));
}
