//! # Tile Grid
//!
//! Row-major tile buffer with the coordinate and indexing contract used by every stage
//! of the pipeline.

use super::{Position, Tile};
use crate::trace;
use crate::{TilecarveError, TilecarveResult};

/// A `width` x `height` grid of tiles stored row-major (`index = y * width + x`).
///
/// # Examples
///
/// ```
/// use tilecarve::{Position, Tile, TileGrid};
///
/// let mut grid = TileGrid::new(8, 4).unwrap();
/// assert!(!grid.is_floor(Position::new(2, 2)));
///
/// grid.fill_rect(1, 1, 3, 2, Tile::BLACK);
/// assert!(grid.is_floor(Position::new(2, 2)));
/// assert_eq!(grid.floor_count(), 6);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileGrid {
    width: u32,
    height: u32,
    tiles: Vec<Tile>,
}

impl TileGrid {
    /// Creates a grid filled with [`Tile::NONE`].
    pub fn new(width: u32, height: u32) -> TilecarveResult<Self> {
        Self::filled(width, height, Tile::NONE)
    }

    /// Creates a grid with every tile set to `tile`.
    pub fn filled(width: u32, height: u32, tile: Tile) -> TilecarveResult<Self> {
        if width == 0 || height == 0 {
            return Err(TilecarveError::InvalidConfig(format!(
                "grid dimensions must be positive, got {}x{}",
                width, height
            )));
        }
        Ok(Self {
            width,
            height,
            tiles: vec![tile; width as usize * height as usize],
        })
    }

    /// Wraps an existing row-major tile buffer.
    pub fn from_tiles(width: u32, height: u32, tiles: Vec<Tile>) -> TilecarveResult<Self> {
        if width == 0 || height == 0 || tiles.len() != width as usize * height as usize {
            return Err(TilecarveError::InvalidConfig(format!(
                "{} tiles do not form a {}x{} grid",
                tiles.len(),
                width,
                height
            )));
        }
        Ok(Self {
            width,
            height,
            tiles,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// The raw row-major buffer.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Mutable access to the raw buffer.
    pub fn tiles_mut(&mut self) -> &mut [Tile] {
        &mut self.tiles
    }

    /// Checks whether `pos` lies inside the grid.
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.width && (pos.y as u32) < self.height
    }

    /// Buffer index of an in-bounds position.
    pub fn index(&self, pos: Position) -> Option<usize> {
        self.in_bounds(pos)
            .then(|| pos.y as usize * self.width as usize + pos.x as usize)
    }

    /// Position of a buffer index.
    pub fn position(&self, index: usize) -> Position {
        let width = self.width as usize;
        Position::new((index % width) as i32, (index / width) as i32)
    }

    /// Returns the tile at `pos`, or `None` when out of bounds.
    pub fn tile_at(&self, pos: Position) -> Option<Tile> {
        self.index(pos).map(|i| self.tiles[i])
    }

    /// Sets the tile at `pos`. Out-of-bounds writes are rejected.
    pub fn set(&mut self, pos: Position, tile: Tile) -> TilecarveResult<()> {
        let index = self.index(pos).ok_or_else(|| {
            TilecarveError::InvalidConfig(format!("position {} is outside the grid", pos))
        })?;
        self.tiles[index] = tile;
        Ok(())
    }

    /// True when `pos` is inside the grid and not a wall.
    pub fn is_floor(&self, pos: Position) -> bool {
        self.tile_at(pos).is_some_and(Tile::is_floor)
    }

    /// True when every tile of the rectangle is floor.
    ///
    /// Any part of the rectangle outside the grid counts as wall.
    pub fn valid_rect(&self, x0: i32, y0: i32, width: i32, height: i32) -> bool {
        (y0..y0 + height).all(|y| (x0..x0 + width).all(|x| self.is_floor(Position::new(x, y))))
    }

    /// Overwrites a rectangle with `tile`, clipped to the grid.
    pub fn fill_rect(&mut self, x0: i32, y0: i32, width: i32, height: i32, tile: Tile) {
        let x_start = x0.max(0);
        let x_end = (x0 + width).min(self.width as i32);
        let y_start = y0.max(0);
        let y_end = (y0 + height).min(self.height as i32);
        if x_start >= x_end {
            return;
        }

        for y in y_start..y_end {
            let row = y as usize * self.width as usize;
            self.tiles[row + x_start as usize..row + x_end as usize].fill(tile);
        }
    }

    /// Overwrites every tile.
    pub fn fill_all(&mut self, tile: Tile) {
        self.tiles.fill(tile);
    }

    /// Number of floor tiles.
    pub fn floor_count(&self) -> usize {
        self.tiles.iter().filter(|tile| tile.is_floor()).count()
    }

    /// All floor positions in scan order.
    pub fn floor_positions(&self) -> Vec<Position> {
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, tile)| tile.is_floor())
            .map(|(i, _)| self.position(i))
            .collect()
    }

    /// First floor tile in scan order.
    pub fn first_floor(&self) -> Option<Position> {
        self.tiles
            .iter()
            .position(|tile| tile.is_floor())
            .map(|i| self.position(i))
    }

    /// True when the straight line from `from` to `to` crosses only floor.
    ///
    /// Both end points must be floor as well. Uses the same Bresenham stepping as
    /// [`trace::line`], so a query and its reverse can disagree on exact ties.
    pub fn line_of_sight(&self, from: Position, to: Position) -> bool {
        trace::line(from.x, from.y, to.x, to.y, |x, y| {
            self.is_floor(Position::new(x, y))
        })
    }
}
