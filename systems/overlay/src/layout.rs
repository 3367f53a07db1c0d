use glam::Vec2;

/// Side length of a build tile icon in screen pixels.
pub const BUILD_TILE_SIZE: f32 = 120.0;

const BUILD_TILE_ASPECT: f32 = 1.15;

/// Axis-aligned screen rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    /// Top-left corner.
    pub origin: Vec2,
    /// Width and height.
    pub size: Vec2,
}

impl Rect {
    /// Creates a rectangle from its corner and size.
    #[must_use]
    pub const fn new(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    /// Whether the point lies inside, edges included.
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        let max = self.origin + self.size;
        point.x >= self.origin.x && point.x <= max.x && point.y >= self.origin.y && point.y <= max.y
    }

    /// Whether the point lies strictly inside, edges excluded.
    #[must_use]
    pub fn contains_strict(&self, point: Vec2) -> bool {
        let max = self.origin + self.size;
        point.x > self.origin.x && point.x < max.x && point.y > self.origin.y && point.y < max.y
    }
}

/// Screen-space placement of the HUD panels for one window size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    screen: Vec2,
    build_menu: Rect,
    inventory: Rect,
    build_tiles: [Rect; 3],
}

impl Layout {
    /// Lays out the build menu along the bottom and the inventory in the top-right corner.
    #[must_use]
    pub fn new(screen: Vec2) -> Self {
        let build_menu = Rect::new(
            Vec2::new(screen.x / 4.0, screen.y * 7.0 / 8.0),
            Vec2::new(screen.x / 2.0, screen.y / 8.0),
        );
        let inventory = Rect::new(
            Vec2::new(screen.x * 3.0 / 4.0, 0.0),
            Vec2::new(screen.x / 4.0, screen.y / 10.0),
        );

        let tile_size = Vec2::new(BUILD_TILE_SIZE * BUILD_TILE_ASPECT, BUILD_TILE_SIZE);
        let centre_y = build_menu.origin.y + build_menu.size.y / 2.0;
        let build_tiles = [1.0 / 3.0, 1.0 / 2.0, 2.0 / 3.0].map(|fraction| {
            let centre_x = build_menu.origin.x + build_menu.size.x * fraction;
            Rect::new(
                Vec2::new(
                    centre_x - BUILD_TILE_SIZE / 2.0,
                    centre_y - BUILD_TILE_SIZE / 2.0,
                ),
                tile_size,
            )
        });

        Self {
            screen,
            build_menu,
            inventory,
            build_tiles,
        }
    }

    /// Screen size the layout was computed for.
    #[must_use]
    pub const fn screen(&self) -> Vec2 {
        self.screen
    }

    /// Panel holding the build tiles.
    #[must_use]
    pub const fn build_menu(&self) -> Rect {
        self.build_menu
    }

    /// Panel listing resources and wave progress.
    #[must_use]
    pub const fn inventory(&self) -> Rect {
        self.inventory
    }

    /// Hit rectangles of the build tiles in menu order.
    #[must_use]
    pub const fn build_tiles(&self) -> &[Rect; 3] {
        &self.build_tiles
    }
}
