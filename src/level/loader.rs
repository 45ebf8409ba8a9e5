//! # Resource Loading
//!
//! Level files reach the parser through [`ResourceLoader`], so descriptions can come
//! from disk, an archive or memory. [`FsLoader`] reads from a directory.

use crate::game::{Position, Tile, TileGrid};
use crate::TilecarveResult;
use image::{Rgba, RgbaImage};
use std::path::PathBuf;

/// Source of level descriptions and their images.
///
/// Paths are relative to whatever root the loader was built with.
pub trait ResourceLoader {
    /// Reads a text resource as lines.
    fn load_strings(&self, path: &str) -> TilecarveResult<Vec<String>>;

    /// Decodes an image resource into a tile grid, one tile per pixel.
    fn load_image(&self, path: &str) -> TilecarveResult<TileGrid>;
}

/// Loads resources from a directory on disk.
#[derive(Debug, Clone)]
pub struct FsLoader {
    root: PathBuf,
}

impl FsLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }
}

impl ResourceLoader for FsLoader {
    fn load_strings(&self, path: &str) -> TilecarveResult<Vec<String>> {
        let text = std::fs::read_to_string(self.resolve(path))?;
        Ok(text.lines().map(String::from).collect())
    }

    fn load_image(&self, path: &str) -> TilecarveResult<TileGrid> {
        let image = image::open(self.resolve(path))?.to_rgba8();
        grid_from_image(&image)
    }
}

/// Converts RGBA pixels to tiles in row-major order.
pub fn grid_from_image(image: &RgbaImage) -> TilecarveResult<TileGrid> {
    let tiles = image.pixels().map(|pixel| Tile::from_rgba(pixel.0)).collect();
    TileGrid::from_tiles(image.width(), image.height(), tiles)
}

/// Renders a grid as an RGBA image, one pixel per tile.
pub fn image_from_grid(grid: &TileGrid) -> RgbaImage {
    RgbaImage::from_fn(grid.width(), grid.height(), |x, y| {
        let tile = grid
            .tile_at(Position::new(x as i32, y as i32))
            .unwrap_or(Tile::NONE);
        Rgba(tile.to_rgba())
    })
}
