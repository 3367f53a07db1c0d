//! Scene population in back-to-front order.

use glam::Vec2;
use reef_defence_core::TileKind;
use reef_defence_rendering::{
    BuildMenu, BuildTileIcon, GhostTile, Hud, Scene, SceneCamera, SceneTile, SceneUnit,
    ScreenRect, TextPanel,
};
use reef_defence_system_overlay::{InventoryStats, MenuState, MenuView, Overlay, NOTICE_TEXT};

use crate::Game;

impl Game {
    /// Rebuilds `scene` from the current session state.
    pub fn render(&self, scene: &mut Scene) {
        scene.clear();

        let camera = self.player.camera();
        scene.camera = SceneCamera {
            target: camera.target(),
            zoom: camera.zoom(),
        };

        scene.tiles.extend(self.map.tiles().map(|(coord, tile)| SceneTile {
            coord,
            kind: tile.kind(),
            position: tile.position(),
            size: tile.size(),
            training: tile.is_training().then(|| tile.training_cooldown()),
        }));
        scene.ghost = self.ghost_tile();
        scene.units.extend(self.units.iter().map(|unit| {
            let tile = self.map.tile(unit.coord());
            SceneUnit {
                id: unit.id(),
                owner: unit.owner(),
                tier: unit.tier(),
                position: tile.position(),
                size: tile.size(),
                health: unit.health_ratio(),
                selected: self.selected_unit == Some(unit.id()),
            }
        }));

        scene.hud = self.hud();
    }

    fn ghost_tile(&self) -> Option<GhostTile> {
        let kind = self.overlay.selected_kind()?;
        if !self.overlay.is_build_mode()
            || self.overlay.menu() == MenuState::Castle
            || self.overlay.is_mouse_on_overlay(self.cursor)
        {
            return None;
        }

        let coord = self
            .map
            .world_to_grid(self.player.camera().screen_to_world(self.cursor));
        if !self.map.contains(coord) {
            return None;
        }
        let tile = self.map.tile(coord);
        Some(GhostTile {
            kind,
            position: tile.position(),
            size: tile.size(),
            placeable: self.map.is_surrounded(coord) && self.map.is_tile_available(coord, kind),
        })
    }

    fn hud(&self) -> Hud {
        let screen = self.overlay.layout().screen();
        let menu = match self.overlay.menu() {
            MenuState::Normal => None,
            MenuState::Castle => Some(Overlay::castle_menu(
                self.player.castle_level(),
                self.player.upgrade_cost(),
            )),
            MenuState::Training { .. } if self.overlay.selected_kind().is_none() => Some(
                self.overlay
                    .training_menu(self.player.castle_level(), &self.tuning.training.tiers),
            ),
            MenuState::Training { .. } => None,
        };

        let inventory = InventoryStats {
            food: self.player.food(),
            coral: self.player.coral(),
            score: self.score,
            game_time: self.game_time,
            wave_count: self.wave.wave_count(),
            time_until_next_wave: self.wave.time_until_next_wave(),
            castle_health: self.player.castle_health_ratio(),
        };
        let inventory_rect = self.overlay.layout().inventory();

        Hud {
            menu: menu.map(|view| centred_panel(view, screen, 3.0)),
            notice: self
                .overlay
                .is_notice_visible()
                .then(|| NOTICE_TEXT.to_owned()),
            inventory: Some(TextPanel {
                rect: ScreenRect::new(inventory_rect.origin, inventory_rect.size),
                title: None,
                lines: inventory.lines(),
            }),
            build_menu: self.overlay.is_build_mode().then(|| self.build_menu()),
            game_over: (!self.running).then(|| self.game_over(screen)),
        }
    }

    fn build_menu(&self) -> BuildMenu {
        let layout = self.overlay.layout();
        let costs = self.overlay.costs();
        let icons = TileKind::BUILDABLE
            .into_iter()
            .zip(layout.build_tiles())
            .zip(costs)
            .enumerate()
            .map(|(index, ((kind, rect), cost))| BuildTileIcon {
                kind,
                rect: ScreenRect::new(rect.origin, rect.size),
                cost,
                selected: self.overlay.selected() == Some(index),
            })
            .collect();
        let panel = layout.build_menu();
        BuildMenu {
            panel: ScreenRect::new(panel.origin, panel.size),
            icons,
        }
    }

    fn game_over(&self, screen: Vec2) -> TextPanel {
        let view = MenuView {
            title: "The castle has fallen".to_owned(),
            lines: vec![
                format!("Survived: {}s", self.game_time as u32),
                format!("Score: {}", self.score),
                format!("Waves: {}", self.wave.wave_count()),
                "Click to exit".to_owned(),
            ],
        };
        centred_panel(view, screen, 2.5)
    }
}

fn centred_panel(view: MenuView, screen: Vec2, fraction: f32) -> TextPanel {
    let size = screen / fraction;
    TextPanel {
        rect: ScreenRect::new((screen - size) * 0.5, size),
        title: Some(view.title),
        lines: view.lines,
    }
}
