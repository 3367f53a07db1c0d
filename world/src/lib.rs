#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative map state for Reef Defence.
//!
//! The map is a staggered grid: every odd column is shifted up by half a tile
//! so neighbouring columns interlock. Tiles are addressed by [`GridCoord`] and
//! mapped to world pixels through [`Map::grid_to_world`] and
//! [`Map::world_to_grid`].

mod tile;
mod units;

use std::collections::BTreeSet;

use glam::Vec2;
use reef_defence_core::{
    Adjacency, CastleLevel, GridCoord, MapTuning, TileKind, UnitId, MAX_GRID_SIDE,
};

pub use tile::Tile;
pub use units::{Casualty, Unit, UnitRoster};

/// Rectangular grid of tiles with the player's castle in the middle.
#[derive(Clone, Debug)]
pub struct Map {
    columns: u32,
    rows: u32,
    tile_size: Vec2,
    tiles: Vec<Tile>,
    locked: BTreeSet<TileKind>,
    adjacency: Adjacency,
    castle: GridCoord,
}

impl Map {
    /// Builds a sea-filled map with a level one castle at the centre tile.
    #[must_use]
    pub fn new(tuning: &MapTuning) -> Self {
        let columns = tuning.columns.clamp(1, MAX_GRID_SIDE);
        let rows = tuning.rows.clamp(1, MAX_GRID_SIDE);
        let tile_size = Vec2::new(tuning.tile_width, tuning.tile_height);
        let castle = GridCoord::new((columns / 2) as i32, (rows / 2) as i32);

        let mut tiles = Vec::with_capacity(columns as usize * rows as usize);
        for row in 0..rows {
            for column in 0..columns {
                let coord = GridCoord::new(column as i32, row as i32);
                let kind = if coord == castle {
                    TileKind::Castle(CastleLevel::FIRST)
                } else {
                    TileKind::Sea
                };
                tiles.push(Tile::new(kind, tile_origin(coord, tile_size), tile_size));
            }
        }

        let locked = TileKind::ALL
            .into_iter()
            .filter(|kind| kind.traits().locked)
            .collect();

        Self {
            columns,
            rows,
            tile_size,
            tiles,
            locked,
            adjacency: tuning.adjacency,
            castle,
        }
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Location of the castle tile.
    #[must_use]
    pub const fn castle_coord(&self) -> GridCoord {
        self.castle
    }

    /// Level of the castle currently standing on the map.
    #[must_use]
    pub fn castle_level(&self) -> CastleLevel {
        match self.tile(self.castle).kind() {
            TileKind::Castle(level) => level,
            _ => CastleLevel::FIRST,
        }
    }

    /// Whether the coordinate addresses a tile on the map.
    #[must_use]
    pub fn contains(&self, coord: GridCoord) -> bool {
        coord.column() >= 0
            && coord.row() >= 0
            && (coord.column() as u32) < self.columns
            && (coord.row() as u32) < self.rows
    }

    /// Clamps the coordinate into the grid bounds.
    #[must_use]
    pub fn clamp(&self, coord: GridCoord) -> GridCoord {
        GridCoord::new(
            coord.column().clamp(0, self.columns as i32 - 1),
            coord.row().clamp(0, self.rows as i32 - 1),
        )
    }

    /// Converts a world position into the grid coordinate of the tile covering it.
    ///
    /// The result may lie outside the map; callers check [`Map::contains`].
    #[must_use]
    pub fn world_to_grid(&self, position: Vec2) -> GridCoord {
        let column = (position.x / self.tile_size.x).floor() as i32;
        let shifted = if column.rem_euclid(2) == 1 {
            position.y + self.tile_size.y * 0.5
        } else {
            position.y
        };
        let row = (shifted / self.tile_size.y).floor() as i32;
        GridCoord::new(column, row)
    }

    /// Returns the top-left world position of the tile at `coord`.
    #[must_use]
    pub fn grid_to_world(&self, coord: GridCoord) -> Vec2 {
        tile_origin(coord, self.tile_size)
    }

    /// Returns the tile at `coord`, clamping out-of-range coordinates to the border.
    #[must_use]
    pub fn tile(&self, coord: GridCoord) -> &Tile {
        &self.tiles[self.index(coord)]
    }

    fn tile_mut(&mut self, coord: GridCoord) -> &mut Tile {
        let index = self.index(coord);
        &mut self.tiles[index]
    }

    fn index(&self, coord: GridCoord) -> usize {
        let coord = self.clamp(coord);
        coord.row() as usize * self.columns as usize + coord.column() as usize
    }

    /// Iterates over every tile in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = (GridCoord, &Tile)> + '_ {
        let columns = self.columns as usize;
        self.tiles.iter().enumerate().map(move |(index, tile)| {
            let coord = GridCoord::new((index % columns) as i32, (index / columns) as i32);
            (coord, tile)
        })
    }

    /// Whether player build actions are forbidden from overwriting the kind.
    #[must_use]
    pub fn is_locked(&self, kind: TileKind) -> bool {
        self.locked.contains(&kind)
    }

    /// Overwrites the tile kind unless the current kind is locked.
    ///
    /// Out-of-range coordinates are clamped to the border like [`Map::tile`].
    /// Returns `true` when the tile changed.
    pub fn change_tile_type(&mut self, coord: GridCoord, kind: TileKind) -> bool {
        if self.is_locked(self.tile(coord).kind()) {
            return false;
        }
        self.tile_mut(coord).change_kind(kind);
        true
    }

    /// Replaces the castle tile with the provided level, bypassing the lock.
    pub fn set_castle_level(&mut self, level: CastleLevel) {
        let castle = self.castle;
        self.tile_mut(castle).change_kind(TileKind::Castle(level));
    }

    /// Lists the in-bounds neighbours of a tile on the staggered grid.
    #[must_use]
    pub fn surrounding_coords(&self, coord: GridCoord) -> Vec<GridCoord> {
        let vertical = if coord.is_odd_column() { -1 } else { 1 };
        [
            coord.offset(0, -1),
            coord.offset(0, 1),
            coord.offset(-1, 0),
            coord.offset(1, 0),
            coord.offset(-1, vertical),
            coord.offset(1, vertical),
        ]
        .into_iter()
        .filter(|neighbour| self.contains(*neighbour))
        .collect()
    }

    /// Whether the tile touches claimed territory according to the adjacency rule.
    #[must_use]
    pub fn is_surrounded(&self, coord: GridCoord) -> bool {
        let neighbours = self.surrounding_coords(coord);
        let claimed = |neighbour: &GridCoord| self.tile(*neighbour).kind().traits().claimed;
        match self.adjacency {
            Adjacency::Any => neighbours.iter().any(claimed),
            Adjacency::All => !neighbours.is_empty() && neighbours.iter().all(claimed),
        }
    }

    /// Whether a tile of `kind` may be placed at `coord`.
    #[must_use]
    pub fn is_tile_available(&self, coord: GridCoord, kind: TileKind) -> bool {
        if !self.contains(coord) || !kind.is_buildable() {
            return false;
        }
        let tile = self.tile(coord);
        tile.kind() == TileKind::Sea && !tile.is_unit_on_tile()
    }

    /// Starts the training cooldown on a training ground.
    ///
    /// Coordinates are clamped to the border. Returns `false` when the tile is
    /// not an idle training ground.
    pub fn start_training(&mut self, coord: GridCoord, seconds: f32) -> bool {
        self.tile_mut(coord).start_training(seconds)
    }

    /// Advances per-tile timers.
    pub fn update(&mut self, dt: f32) {
        for tile in &mut self.tiles {
            tile.update(dt);
        }
    }

    /// Counts the tiles of the given kind.
    #[must_use]
    pub fn count(&self, kind: TileKind) -> u32 {
        self.tiles.iter().filter(|tile| tile.kind() == kind).count() as u32
    }

    /// Lists every tile on the outer border of the grid in row-major order.
    #[must_use]
    pub fn edge_coords(&self) -> Vec<GridCoord> {
        let last_column = self.columns as i32 - 1;
        let last_row = self.rows as i32 - 1;
        self.tiles()
            .map(|(coord, _)| coord)
            .filter(|coord| {
                coord.column() == 0
                    || coord.row() == 0
                    || coord.column() == last_column
                    || coord.row() == last_row
            })
            .collect()
    }

    fn set_unit(&mut self, coord: GridCoord, unit: Option<UnitId>) {
        self.tile_mut(coord).set_unit(unit);
    }
}

fn tile_origin(coord: GridCoord, tile_size: Vec2) -> Vec2 {
    let lift = if coord.is_odd_column() {
        tile_size.y * 0.5
    } else {
        0.0
    };
    Vec2::new(
        coord.column() as f32 * tile_size.x,
        coord.row() as f32 * tile_size.y - lift,
    )
}
