#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Reef Defence adapters.
//!
//! The game fills a [`Scene`] from a [`FrameInput`] every frame; a
//! [`RenderingBackend`] owns the window, polls the input devices and draws
//! the scene. Nothing in this crate talks to a graphics library.

use anyhow::Result as AnyResult;
use glam::Vec2;
use reef_defence_core::{GridCoord, Owner, Price, Rgb, TileKind, UnitId, UnitTier};
use std::time::Duration;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: lighten_channel(self.red, amount),
            green: lighten_channel(self.green, amount),
            blue: lighten_channel(self.blue, amount),
            alpha: self.alpha,
        }
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Self::from_rgb_u8(rgb.red(), rgb.green(), rgb.blue())
    }
}

fn lighten_channel(channel: f32, amount: f32) -> f32 {
    channel + (1.0 - channel) * amount
}

/// Discrete key presses the game reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuKey {
    /// Shows or hides the build menu (`B`).
    ToggleBuildMode,
    /// Closes the open modal menu (`C`).
    CloseMenu,
    /// Buys the next castle level while the castle menu is open (`L`).
    UpgradeCastle,
    /// Trains a unit of the given tier while the training menu is open (`1`-`5`).
    Train(UnitTier),
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct FrameInput {
    /// Size of the window in pixels.
    pub screen_size: Vec2,
    /// Cursor position in screen pixels.
    pub cursor: Vec2,
    /// Cursor movement since the previous frame in screen pixels.
    pub cursor_delta: Vec2,
    /// Held pan direction (`W`/`A`/`S`/`D`), each axis in `[-1, 1]`.
    pub pan: Vec2,
    /// Vertical wheel movement this frame.
    pub wheel: f32,
    /// Whether the left mouse button went down this frame.
    pub primary_pressed: bool,
    /// Whether the left mouse button is held.
    pub primary_held: bool,
    /// Keys pressed this frame in the order they were detected.
    pub keys: Vec<MenuKey>,
}

impl FrameInput {
    /// Whether `key` was pressed this frame.
    #[must_use]
    pub fn pressed(&self, key: MenuKey) -> bool {
        self.keys.contains(&key)
    }
}

/// What the backend should do after a frame was updated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameControl {
    /// Keep running.
    Continue,
    /// Close the window and return from [`RenderingBackend::run`].
    Exit,
}

/// Axis-aligned rectangle in screen pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenRect {
    /// Top-left corner.
    pub origin: Vec2,
    /// Width and height.
    pub size: Vec2,
}

impl ScreenRect {
    /// Creates a rectangle from its corner and size.
    #[must_use]
    pub const fn new(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    /// Centre of the rectangle.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        self.origin + self.size * 0.5
    }
}

/// Camera used to project world positions onto the screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneCamera {
    /// World position shown at the top-left corner of the screen.
    pub target: Vec2,
    /// Magnification factor.
    pub zoom: f32,
}

impl SceneCamera {
    /// Projects a world position onto the screen.
    #[must_use]
    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        (world - self.target) * self.zoom
    }
}

impl Default for SceneCamera {
    fn default() -> Self {
        Self {
            target: Vec2::ZERO,
            zoom: 1.0,
        }
    }
}

/// One map tile in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneTile {
    /// Grid location of the tile.
    pub coord: GridCoord,
    /// Kind determining the sprite or fill color.
    pub kind: TileKind,
    /// Top-left corner in world pixels.
    pub position: Vec2,
    /// Width and height in world pixels.
    pub size: Vec2,
    /// Remaining training cooldown when the tile is busy training.
    pub training: Option<f32>,
}

/// Semi-transparent preview of the tile the player is about to build.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GhostTile {
    /// Kind being placed.
    pub kind: TileKind,
    /// Top-left corner in world pixels.
    pub position: Vec2,
    /// Width and height in world pixels.
    pub size: Vec2,
    /// Whether a click would place the tile.
    pub placeable: bool,
}

/// Unit standing on a tile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneUnit {
    /// Identifier of the unit.
    pub id: UnitId,
    /// Side the unit fights for.
    pub owner: Owner,
    /// Tier selecting the sprite.
    pub tier: UnitTier,
    /// Top-left corner of the occupied tile in world pixels.
    pub position: Vec2,
    /// Size of the occupied tile in world pixels.
    pub size: Vec2,
    /// Health fraction in `[0, 1]`.
    pub health: f32,
    /// Whether the player has the unit selected.
    pub selected: bool,
}

/// Build tile icon shown in the build menu.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BuildTileIcon {
    /// Kind the icon stands for.
    pub kind: TileKind,
    /// Screen rectangle of the icon.
    pub rect: ScreenRect,
    /// Price of the next tile of this kind.
    pub cost: Price,
    /// Whether the icon is the current selection.
    pub selected: bool,
}

/// Build menu panel along the bottom of the screen.
#[derive(Clone, Debug, PartialEq)]
pub struct BuildMenu {
    /// Panel background rectangle.
    pub panel: ScreenRect,
    /// Icons in menu order.
    pub icons: Vec<BuildTileIcon>,
}

/// Rectangular panel holding lines of text.
#[derive(Clone, Debug, PartialEq)]
pub struct TextPanel {
    /// Panel background rectangle.
    pub rect: ScreenRect,
    /// Optional heading drawn above the lines.
    pub title: Option<String>,
    /// Lines in display order.
    pub lines: Vec<String>,
}

/// Screen-space interface drawn on top of the map.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Hud {
    /// Open castle or training menu.
    pub menu: Option<TextPanel>,
    /// Transient notice centred on the screen.
    pub notice: Option<String>,
    /// Inventory panel in the top-right corner.
    pub inventory: Option<TextPanel>,
    /// Build menu, present while build mode is on.
    pub build_menu: Option<BuildMenu>,
    /// Summary shown after the castle fell.
    pub game_over: Option<TextPanel>,
}

/// Everything the backend draws for one frame.
///
/// Backends draw the members back to front: tiles, ghost tile, units and
/// then the HUD (menu, notice, inventory, build menu, game over).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    /// Camera for the world-space members.
    pub camera: SceneCamera,
    /// Every map tile.
    pub tiles: Vec<SceneTile>,
    /// Build preview under the cursor.
    pub ghost: Option<GhostTile>,
    /// Every living unit.
    pub units: Vec<SceneUnit>,
    /// Screen-space interface.
    pub hud: Hud,
}

impl Scene {
    /// Empties the scene while keeping its allocations.
    pub fn clear(&mut self) {
        self.tiles.clear();
        self.ghost = None;
        self.units.clear();
        self.hud = Hud::default();
    }
}

/// Describes how a frame should be presented.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed first.
    pub scene: Scene,
}

impl Presentation {
    /// Creates a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Abstraction implemented by rendering adapters.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the frame delta and the
    /// per-frame input captured by the adapter and rebuilds the scene before
    /// it is rendered. Returning [`FrameControl::Exit`] ends the loop.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) -> FrameControl + 'static;
}
