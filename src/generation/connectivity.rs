//! # Connectivity Validation
//!
//! Checks that every floor tile belongs to one 4-connected region.
//!
//! The flood fill records visited tiles in its own buffer, so the grid itself is never
//! written during validation.

use crate::game::{Position, TileGrid};
use crate::trace;

/// Outcome of a connectivity check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connectivity {
    /// All floor tiles are reachable from one another
    Connected { floor: usize },
    /// Some floor tiles cannot be reached from the first floor tile
    Disconnected { reached: usize, unreached: usize },
    /// The grid has no floor at all
    Empty,
}

impl Connectivity {
    pub fn is_connected(self) -> bool {
        matches!(self, Connectivity::Connected { .. })
    }
}

/// Flood fills from the first floor tile in scan order and counts the tiles reached.
///
/// Returns `None` when the grid has no floor.
pub fn reachable_floor_count(grid: &TileGrid) -> Option<usize> {
    let start = grid.first_floor()?;
    let mut visited = vec![false; grid.tiles().len()];
    let mut reached = 0;

    trace::fill(start.x, start.y, |x, y| match grid.index(Position::new(x, y)) {
        Some(i) if grid.tiles()[i].is_floor() && !visited[i] => {
            visited[i] = true;
            reached += 1;
            true
        }
        _ => false,
    });

    Some(reached)
}

/// Checks whether the grid's floor forms a single region.
///
/// # Examples
///
/// ```
/// use tilecarve::{check_connectivity, Connectivity, Tile, TileGrid};
///
/// let mut grid = TileGrid::new(10, 5).unwrap();
/// grid.fill_rect(1, 1, 3, 3, Tile::BLACK);
/// assert_eq!(check_connectivity(&grid), Connectivity::Connected { floor: 9 });
///
/// grid.fill_rect(6, 1, 2, 2, Tile::BLACK);
/// assert!(!check_connectivity(&grid).is_connected());
/// ```
pub fn check_connectivity(grid: &TileGrid) -> Connectivity {
    let Some(reached) = reachable_floor_count(grid) else {
        return Connectivity::Empty;
    };

    let floor = grid.floor_count();
    if reached == floor {
        Connectivity::Connected { floor }
    } else {
        Connectivity::Disconnected {
            reached,
            unreached: floor - reached,
        }
    }
}
