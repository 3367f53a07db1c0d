//! Immediate-mode drawing of a [`Scene`], back to front.

use glam::Vec2;
use macroquad::{
    color::{BLACK, WHITE},
    shapes, text,
};
use reef_defence_core::{Owner, TileKind};
use reef_defence_rendering::{
    BuildMenu, Color, GhostTile, Scene, SceneCamera, SceneTile, SceneUnit, ScreenRect, TextPanel,
};

use crate::{
    sprites::{DrawParams, SpriteAtlas, SpriteKey},
    to_macroquad_color,
};

const PANEL_COLOR: Color = Color::new(0.05, 0.09, 0.16, 0.85);
const PANEL_BORDER: Color = Color::new(0.55, 0.75, 0.85, 1.0);
const NOTICE_COLOR: Color = Color::new(0.9, 0.15, 0.15, 1.0);
const PLAYER_COLOR: Color = Color::new(0.2, 0.55, 0.95, 1.0);
const ENEMY_COLOR: Color = Color::new(0.85, 0.2, 0.2, 1.0);
const HEALTH_COLOR: Color = Color::new(0.78, 0.0, 0.0, 1.0);
const BLOCKED_TINT: Color = Color::new(1.0, 0.35, 0.35, 0.5);
const GHOST_TINT: Color = Color::new(1.0, 1.0, 1.0, 0.5);

const TEXT_SIZE: f32 = 24.0;
const TITLE_SIZE: f32 = 32.0;
const NOTICE_SIZE: f32 = 48.0;
const PANEL_PADDING: f32 = 16.0;

/// Draws every member of `scene` in presentation order.
pub(crate) fn draw_scene(scene: &Scene, atlas: Option<&SpriteAtlas>) {
    let camera = scene.camera;
    for tile in &scene.tiles {
        draw_tile(tile, camera, atlas);
    }
    if let Some(ghost) = scene.ghost {
        draw_ghost(ghost, camera, atlas);
    }
    for unit in &scene.units {
        draw_unit(unit, camera, atlas);
    }

    let hud = &scene.hud;
    if let Some(menu) = &hud.menu {
        draw_text_panel(menu);
    }
    if let Some(notice) = &hud.notice {
        draw_notice(notice);
    }
    if let Some(inventory) = &hud.inventory {
        draw_text_panel(inventory);
    }
    if let Some(build_menu) = &hud.build_menu {
        draw_build_menu(build_menu, atlas);
    }
    if let Some(game_over) = &hud.game_over {
        draw_text_panel(game_over);
    }
}

/// Screen rectangle covered by a world-space rectangle.
fn project(camera: SceneCamera, position: Vec2, size: Vec2) -> ScreenRect {
    ScreenRect::new(camera.world_to_screen(position), size * camera.zoom)
}

fn draw_tile(tile: &SceneTile, camera: SceneCamera, atlas: Option<&SpriteAtlas>) {
    let rect = project(camera, tile.position, tile.size);
    draw_tile_kind(tile.kind, rect, None, atlas);

    if let Some(remaining) = tile.training {
        draw_centred_text(&format!("{remaining:.1}"), rect.center(), TEXT_SIZE, WHITE);
    }
}

fn draw_ghost(ghost: GhostTile, camera: SceneCamera, atlas: Option<&SpriteAtlas>) {
    let rect = project(camera, ghost.position, ghost.size);
    let tint = if ghost.placeable {
        GHOST_TINT
    } else {
        BLOCKED_TINT
    };
    draw_tile_kind(ghost.kind, rect, Some(tint), atlas);
}

fn draw_tile_kind(kind: TileKind, rect: ScreenRect, tint: Option<Color>, atlas: Option<&SpriteAtlas>) {
    let key = SpriteKey::Tile(kind);
    let mut params = DrawParams::new(rect.origin, rect.size);
    if let Some(tint) = tint {
        params = params.with_tint(tint);
    }
    if atlas.is_some_and(|atlas| atlas.draw(key, params)) {
        return;
    }

    let fill = Color::from(kind.traits().color);
    let fill = match tint {
        Some(tint) => Color::new(
            fill.red * tint.red,
            fill.green * tint.green,
            fill.blue * tint.blue,
            tint.alpha,
        ),
        None => fill,
    };
    draw_hexagon(rect, fill);
}

/// Circumradius of the flat-topped hexagon drawn for a tile of `size`.
///
/// Columns sit `1.5 * radius` apart and rows `sqrt(3) * radius` apart, so the
/// larger of the two keeps neighbouring hexagons touching on both axes.
fn hex_radius(size: Vec2) -> f32 {
    (size.x / 1.5).max(size.y / 3f32.sqrt())
}

/// Flat-topped hexagon centred on `rect`, sized to tile the staggered grid.
fn draw_hexagon(rect: ScreenRect, fill: Color) {
    let center = rect.center();
    let radius = hex_radius(rect.size);
    if radius <= f32::EPSILON {
        return;
    }
    shapes::draw_poly(center.x, center.y, 6, radius, 0.0, to_macroquad_color(fill));
    shapes::draw_poly_lines(
        center.x,
        center.y,
        6,
        radius,
        0.0,
        1.0,
        to_macroquad_color(fill.lighten(0.3)),
    );
}

fn draw_unit(unit: &SceneUnit, camera: SceneCamera, atlas: Option<&SpriteAtlas>) {
    let rect = project(camera, unit.position, unit.size);
    let center = rect.center();
    let radius = rect.size.x.min(rect.size.y) * 0.3;
    if radius <= f32::EPSILON {
        return;
    }

    let key = SpriteKey::Unit(unit.owner, unit.tier);
    let drawn = atlas.is_some_and(|atlas| atlas.draw(key, DrawParams::new(rect.origin, rect.size)));
    if !drawn {
        let color = match unit.owner {
            Owner::Player => PLAYER_COLOR,
            Owner::Enemy => ENEMY_COLOR,
        };
        shapes::draw_circle(center.x, center.y, radius, to_macroquad_color(color));
        shapes::draw_circle_lines(center.x, center.y, radius, (radius * 0.1).max(1.0), BLACK);
        draw_centred_text(&unit.tier.get().to_string(), center, TEXT_SIZE, WHITE);
    }

    if unit.selected {
        shapes::draw_circle_lines(
            center.x,
            center.y,
            radius * 1.3,
            (radius * 0.12).max(2.0),
            to_macroquad_color(PANEL_BORDER),
        );
    }

    let bar_width = radius * 2.0;
    let bar_height = (radius * 0.15).max(3.0);
    let bar_left = center.x - radius;
    let bar_top = center.y + radius * 1.2;
    shapes::draw_rectangle(bar_left, bar_top, bar_width, bar_height, BLACK);
    let fill_width = bar_width * unit.health.clamp(0.0, 1.0);
    if fill_width > f32::EPSILON {
        shapes::draw_rectangle(
            bar_left,
            bar_top,
            fill_width,
            bar_height,
            to_macroquad_color(HEALTH_COLOR),
        );
    }
}

fn draw_panel_background(rect: ScreenRect) {
    shapes::draw_rectangle(
        rect.origin.x,
        rect.origin.y,
        rect.size.x,
        rect.size.y,
        to_macroquad_color(PANEL_COLOR),
    );
    shapes::draw_rectangle_lines(
        rect.origin.x,
        rect.origin.y,
        rect.size.x,
        rect.size.y,
        2.0,
        to_macroquad_color(PANEL_BORDER),
    );
}

fn draw_text_panel(panel: &TextPanel) {
    draw_panel_background(panel.rect);

    let left = panel.rect.origin.x + PANEL_PADDING;
    let mut baseline = panel.rect.origin.y + PANEL_PADDING;
    if let Some(title) = &panel.title {
        baseline += TITLE_SIZE;
        let _ = text::draw_text(title, left, baseline, TITLE_SIZE, WHITE);
        baseline += PANEL_PADDING * 0.5;
    }
    for line in &panel.lines {
        baseline += TEXT_SIZE;
        let _ = text::draw_text(line, left, baseline, TEXT_SIZE, WHITE);
    }
}

fn draw_notice(notice: &str) {
    let center = Vec2::new(
        macroquad::window::screen_width(),
        macroquad::window::screen_height(),
    ) * 0.5;
    draw_centred_text(notice, center, NOTICE_SIZE, to_macroquad_color(NOTICE_COLOR));
}

fn draw_build_menu(menu: &BuildMenu, atlas: Option<&SpriteAtlas>) {
    draw_panel_background(menu.panel);

    for icon in &menu.icons {
        draw_tile_kind(icon.kind, icon.rect, None, atlas);
        if icon.selected {
            shapes::draw_rectangle_lines(
                icon.rect.origin.x,
                icon.rect.origin.y,
                icon.rect.size.x,
                icon.rect.size.y,
                3.0,
                WHITE,
            );
        }
        let label = format!("F {}  C {}", icon.cost.food, icon.cost.coral);
        let below = Vec2::new(
            icon.rect.center().x,
            icon.rect.origin.y + icon.rect.size.y + TEXT_SIZE * 0.5,
        );
        draw_centred_text(&label, below, TEXT_SIZE, WHITE);
    }
}

fn draw_centred_text(content: &str, center: Vec2, size: f32, color: macroquad::color::Color) {
    let dimensions = text::measure_text(content, None, size as u16, 1.0);
    let _ = text::draw_text(
        content,
        center.x - dimensions.width * 0.5,
        center.y + dimensions.height * 0.5,
        size,
        color,
    );
}
