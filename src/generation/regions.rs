//! # Region Coloring
//!
//! Partitions the floor into color zones. A handful of seed points are scattered over
//! the level and every floor tile takes the color of the seed closest to it by
//! Manhattan distance, giving a Voronoi-like patchwork of biomes.

use crate::game::{Position, Tile, TileGrid};
use rand::rngs::StdRng;
use rand::Rng;

/// A colored seed point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedPoint {
    pub position: Position,
    pub color: Tile,
}

/// Scatters `count` seeds uniformly over a `width` x `height` level.
///
/// Each seed draws its position first and then its color from
/// [`Tile::REGION_COLORS`].
pub fn sample_seeds(width: u32, height: u32, count: u32, rng: &mut StdRng) -> Vec<SeedPoint> {
    (0..count)
        .map(|_| {
            let x = rng.gen_range(0..width as i32);
            let y = rng.gen_range(0..height as i32);
            let color = Tile::REGION_COLORS[rng.gen_range(0..Tile::REGION_COLORS.len())];
            SeedPoint {
                position: Position::new(x, y),
                color,
            }
        })
        .collect()
}

/// Returns the seed closest to `pos` by Manhattan distance.
///
/// Ties go to the seed that comes first in `seeds`.
///
/// # Examples
///
/// ```
/// use tilecarve::{nearest_seed, Position, SeedPoint, Tile};
///
/// let seeds = [
///     SeedPoint { position: Position::new(0, 0), color: Tile::RED },
///     SeedPoint { position: Position::new(4, 0), color: Tile::BLUE },
/// ];
/// // Equidistant: the first seed wins
/// assert_eq!(nearest_seed(&seeds, Position::new(2, 0)).unwrap().color, Tile::RED);
/// assert_eq!(nearest_seed(&seeds, Position::new(3, 5)).unwrap().color, Tile::BLUE);
/// ```
pub fn nearest_seed(seeds: &[SeedPoint], pos: Position) -> Option<&SeedPoint> {
    let mut best: Option<(&SeedPoint, u32)> = None;
    for seed in seeds {
        let distance = seed.position.manhattan_distance(pos);
        if best.map_or(true, |(_, best_distance)| distance < best_distance) {
            best = Some((seed, distance));
        }
    }
    best.map(|(seed, _)| seed)
}

/// Recolors every floor tile with the color of its nearest seed.
///
/// Walls are left alone. With no seeds the grid is unchanged.
pub fn color_regions(grid: &mut TileGrid, seeds: &[SeedPoint]) {
    if seeds.is_empty() {
        return;
    }

    let width = grid.width() as usize;
    for (i, tile) in grid.tiles_mut().iter_mut().enumerate() {
        if !tile.is_floor() {
            continue;
        }
        let pos = Position::new((i % width) as i32, (i / width) as i32);
        if let Some(seed) = nearest_seed(seeds, pos) {
            *tile = seed.color;
        }
    }
}
