#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Heads-up display state: build menu selection, inventory panel, modal
//! castle and training menus and the transient notices shown on screen.

mod layout;

use glam::Vec2;
use reef_defence_core::{CastleLevel, Countdown, GridCoord, Price, TileKind, TierTuning, UnitTier};

pub use layout::{Layout, Rect, BUILD_TILE_SIZE};

/// Seconds the "not enough money" notice stays visible.
pub const NOTICE_SECONDS: f32 = 1.0;

/// Text of the insufficient funds notice.
pub const NOTICE_TEXT: &str = "NOT ENOUGH MONEY";

/// Modal menu currently capturing keyboard input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MenuState {
    /// No modal menu is open.
    #[default]
    Normal,
    /// Castle upgrade menu.
    Castle,
    /// Training menu bound to a training ground.
    Training {
        /// Training ground the menu was opened on.
        tile: GridCoord,
    },
}

/// Title and body lines of a modal menu ready to be drawn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuView {
    /// Heading of the menu.
    pub title: String,
    /// One entry per line below the heading.
    pub lines: Vec<String>,
}

/// Figures shown in the inventory panel.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InventoryStats {
    /// Food held by the player.
    pub food: u32,
    /// Coral held by the player.
    pub coral: u32,
    /// Points scored so far.
    pub score: u32,
    /// Seconds since the session started.
    pub game_time: f32,
    /// Number of waves spawned so far.
    pub wave_count: u32,
    /// Seconds until the next wave spawns.
    pub time_until_next_wave: f32,
    /// Castle health fraction in `[0, 1]`.
    pub castle_health: f32,
}

impl InventoryStats {
    /// Formats the panel lines in display order.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        vec![
            format!("Food: {}  Coral: {}", self.food, self.coral),
            format!("Score: {}  Time: {}", self.score, self.game_time as u32),
            format!(
                "Wave: {}  Next in: {}",
                self.wave_count,
                self.time_until_next_wave.round() as u32
            ),
            format!("Castle: {}%", (self.castle_health * 100.0).round() as u32),
        ]
    }
}

/// HUD state owned by the game.
#[derive(Clone, Debug)]
pub struct Overlay {
    layout: Layout,
    build_mode: bool,
    selected: Option<usize>,
    costs: [Price; 3],
    training_cooldown: Countdown,
    notice: Countdown,
    menu: MenuState,
}

impl Overlay {
    /// Creates the overlay for the given screen size with build mode enabled.
    #[must_use]
    pub fn new(screen: Vec2) -> Self {
        Self {
            layout: Layout::new(screen),
            build_mode: true,
            selected: None,
            costs: [Price::FREE; 3],
            training_cooldown: Countdown::default(),
            notice: Countdown::default(),
            menu: MenuState::Normal,
        }
    }

    /// Current screen layout.
    #[must_use]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Recomputes the layout when the window size changed.
    pub fn resize(&mut self, screen: Vec2) {
        if self.layout.screen() != screen {
            self.layout = Layout::new(screen);
        }
    }

    /// Whether the build menu is shown.
    #[must_use]
    pub fn is_build_mode(&self) -> bool {
        self.build_mode
    }

    /// Shows or hides the build menu; hiding it clears the selection.
    pub fn toggle_build_mode(&mut self) {
        self.build_mode = !self.build_mode;
        if !self.build_mode {
            self.selected = None;
        }
    }

    /// Index of the build tile under `pos`, if any.
    #[must_use]
    pub fn mouse_on_build_tile(&self, pos: Vec2) -> Option<usize> {
        self.layout
            .build_tiles()
            .iter()
            .position(|rect| rect.contains(pos))
    }

    /// Whether `pos` lies over a HUD panel that swallows map clicks.
    #[must_use]
    pub fn is_mouse_on_overlay(&self, pos: Vec2) -> bool {
        (self.build_mode && self.layout.build_menu().contains_strict(pos))
            || self.layout.inventory().contains_strict(pos)
    }

    /// Toggles the selection of a build tile. Selecting the same tile twice
    /// clears the selection.
    pub fn select_build_tile(&mut self, index: usize) {
        if index >= TileKind::BUILDABLE.len() {
            return;
        }
        self.selected = if self.selected == Some(index) {
            None
        } else {
            Some(index)
        };
    }

    /// Index of the selected build tile.
    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Kind of the selected build tile; `None` means nothing is selected.
    #[must_use]
    pub fn selected_kind(&self) -> Option<TileKind> {
        self.selected
            .and_then(|index| TileKind::BUILDABLE.get(index).copied())
    }

    /// Stores the prices displayed under the build tiles, in menu order.
    pub fn set_costs(&mut self, costs: [Price; 3]) {
        self.costs = costs;
    }

    /// Prices displayed under the build tiles.
    #[must_use]
    pub fn costs(&self) -> [Price; 3] {
        self.costs
    }

    /// Seconds left on the cooldown of the training ground shown in the menu.
    #[must_use]
    pub fn training_cooldown(&self) -> f32 {
        self.training_cooldown.remaining()
    }

    /// Mirrors the cooldown of the training ground the menu was opened on.
    pub fn set_training_cooldown(&mut self, seconds: f32) {
        self.training_cooldown.start(seconds);
    }

    /// Shows the insufficient funds notice.
    pub fn show_notice(&mut self) {
        self.notice.start(NOTICE_SECONDS);
    }

    /// Whether the insufficient funds notice is visible.
    #[must_use]
    pub fn is_notice_visible(&self) -> bool {
        self.notice.is_active()
    }

    /// Ticks the overlay countdowns.
    pub fn update(&mut self, dt: f32) {
        let _ = self.training_cooldown.tick(dt);
        let _ = self.notice.tick(dt);
    }

    /// Modal menu state.
    #[must_use]
    pub fn menu(&self) -> MenuState {
        self.menu
    }

    /// Whether a modal menu is open.
    #[must_use]
    pub fn is_menu_open(&self) -> bool {
        self.menu != MenuState::Normal
    }

    /// Opens the castle menu, replacing any other modal menu.
    pub fn open_castle_menu(&mut self) {
        self.menu = MenuState::Castle;
    }

    /// Opens the training menu for `tile`, replacing any other modal menu.
    pub fn open_training_menu(&mut self, tile: GridCoord, cooldown: f32) {
        self.menu = MenuState::Training { tile };
        self.set_training_cooldown(cooldown);
    }

    /// Closes the modal menu.
    pub fn close_menu(&mut self) {
        self.menu = MenuState::Normal;
    }

    /// Lines of the castle menu for the given level and upgrade price.
    #[must_use]
    pub fn castle_menu(level: CastleLevel, upgrade: Option<Price>) -> MenuView {
        let mut lines = vec![format!("Level {}", level.get())];
        match upgrade {
            Some(price) => lines.push(format!(
                "[L] Upgrade: {} food, {} coral",
                price.food, price.coral
            )),
            None => lines.push("Fully upgraded".to_owned()),
        }
        lines.push("[C] Close".to_owned());
        MenuView {
            title: "Castle".to_owned(),
            lines,
        }
    }

    /// Lines of the training menu listing every tier.
    #[must_use]
    pub fn training_menu(&self, level: CastleLevel, tiers: &[TierTuning; 5]) -> MenuView {
        let mut lines: Vec<String> = UnitTier::ALL
            .into_iter()
            .zip(tiers)
            .map(|(tier, stats)| {
                if tier.unlocked_at(level) {
                    format!(
                        "[{}] Tier {}: {} food, {}s",
                        tier.get(),
                        tier.get(),
                        stats.food_cost,
                        stats.cooldown
                    )
                } else {
                    format!("[{}] Tier {}: castle level {}", tier.get(), tier.get(), tier.get())
                }
            })
            .collect();
        if self.training_cooldown.is_active() {
            lines.push(format!(
                "Training... {}s",
                self.training_cooldown.remaining().ceil() as u32
            ));
        }
        lines.push("[C] Close".to_owned());
        MenuView {
            title: "Training".to_owned(),
            lines,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hiding_the_build_menu_clears_the_selection() {
        let mut overlay = Overlay::new(Vec2::new(1920.0, 1080.0));
        overlay.select_build_tile(1);
        overlay.toggle_build_mode();
        assert!(!overlay.is_build_mode());
        assert_eq!(overlay.selected(), None);
    }

    #[test]
    fn out_of_range_selection_is_ignored() {
        let mut overlay = Overlay::new(Vec2::new(1920.0, 1080.0));
        overlay.select_build_tile(7);
        assert_eq!(overlay.selected(), None);
    }

    #[test]
    fn inventory_lines_round_the_wave_timer() {
        let stats = InventoryStats {
            food: 3,
            coral: 4,
            score: 20,
            game_time: 61.8,
            wave_count: 2,
            time_until_next_wave: 9.6,
            castle_health: 0.5,
        };
        assert_eq!(
            stats.lines(),
            vec![
                "Food: 3  Coral: 4".to_owned(),
                "Score: 20  Time: 61".to_owned(),
                "Wave: 2  Next in: 10".to_owned(),
                "Castle: 50%".to_owned(),
            ]
        );
    }
}
