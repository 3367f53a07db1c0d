//! Device polling that produces the per-frame [`FrameInput`] snapshot.

use glam::Vec2;
use macroquad::input::{
    is_key_down, is_key_pressed, is_mouse_button_down, is_mouse_button_pressed, mouse_position,
    mouse_wheel, KeyCode, MouseButton,
};
use reef_defence_core::UnitTier;
use reef_defence_rendering::{FrameInput, MenuKey};

const TRAINING_KEYS: [KeyCode; 5] = [
    KeyCode::Key1,
    KeyCode::Key2,
    KeyCode::Key3,
    KeyCode::Key4,
    KeyCode::Key5,
];

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct KeyboardShortcuts {
    /// `Escape` closes the window.
    pub(crate) quit_requested: bool,
    /// `W`/`A`/`S`/`D` held this frame.
    pub(crate) pan: Vec2,
    /// `B` toggles build mode.
    pub(crate) toggle_build_mode: bool,
    /// `C` closes the open menu.
    pub(crate) close_menu: bool,
    /// `L` buys the next castle level.
    pub(crate) upgrade_castle: bool,
    /// `1`-`5` train the matching tier.
    pub(crate) train: [bool; 5],
}

impl KeyboardShortcuts {
    pub(crate) fn poll() -> Self {
        let axis = |negative: KeyCode, positive: KeyCode| {
            f32::from(u8::from(is_key_down(positive))) - f32::from(u8::from(is_key_down(negative)))
        };

        Self {
            quit_requested: is_key_pressed(KeyCode::Escape),
            pan: Vec2::new(axis(KeyCode::A, KeyCode::D), axis(KeyCode::W, KeyCode::S)),
            toggle_build_mode: is_key_pressed(KeyCode::B),
            close_menu: is_key_pressed(KeyCode::C),
            upgrade_castle: is_key_pressed(KeyCode::L),
            train: TRAINING_KEYS.map(is_key_pressed),
        }
    }

    fn menu_keys(&self) -> Vec<MenuKey> {
        let mut keys = Vec::new();
        if self.toggle_build_mode {
            keys.push(MenuKey::ToggleBuildMode);
        }
        if self.close_menu {
            keys.push(MenuKey::CloseMenu);
        }
        if self.upgrade_castle {
            keys.push(MenuKey::UpgradeCastle);
        }
        keys.extend(
            UnitTier::ALL
                .into_iter()
                .zip(self.train)
                .filter_map(|(tier, pressed)| pressed.then_some(MenuKey::Train(tier))),
        );
        keys
    }
}

/// Raw device readings for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct Observations {
    pub(crate) screen_size: Vec2,
    pub(crate) cursor: Vec2,
    pub(crate) wheel: f32,
    pub(crate) primary_pressed: bool,
    pub(crate) primary_held: bool,
    pub(crate) keyboard: KeyboardShortcuts,
}

impl Observations {
    pub(crate) fn poll(screen_size: Vec2, keyboard: KeyboardShortcuts) -> Self {
        let (cursor_x, cursor_y) = mouse_position();
        let (_, wheel) = mouse_wheel();
        Self {
            screen_size,
            cursor: Vec2::new(cursor_x, cursor_y),
            wheel,
            primary_pressed: is_mouse_button_pressed(MouseButton::Left),
            primary_held: is_mouse_button_down(MouseButton::Left),
            keyboard,
        }
    }
}

/// Remembers the previous cursor so drags can be reported as deltas.
#[derive(Debug, Default)]
pub(crate) struct InputTracker {
    previous_cursor: Option<Vec2>,
}

impl InputTracker {
    pub(crate) fn frame_input(&mut self, observations: Observations) -> FrameInput {
        let cursor_delta = self
            .previous_cursor
            .map_or(Vec2::ZERO, |previous| observations.cursor - previous);
        self.previous_cursor = Some(observations.cursor);

        FrameInput {
            screen_size: observations.screen_size,
            cursor: observations.cursor,
            cursor_delta,
            pan: observations.keyboard.pan,
            wheel: observations.wheel,
            primary_pressed: observations.primary_pressed,
            primary_held: observations.primary_held,
            keys: observations.keyboard.menu_keys(),
        }
    }
}
