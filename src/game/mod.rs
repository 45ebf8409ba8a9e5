//! # Game Module
//!
//! Data shared between the generator and the systems that consume its output.
//!
//! - Positions and distance metrics
//! - Tile values and the color palette
//! - The tile grid and its queries
//! - Placement descriptors for player, objective and enemies

pub mod grid;
pub mod placement;
pub mod tile;

pub use grid::*;
pub use placement::*;
pub use tile::*;

use serde::{Deserialize, Serialize};

/// Represents a 2D coordinate on the tile grid.
///
/// # Examples
///
/// ```
/// use tilecarve::Position;
///
/// let pos = Position::new(10, 5);
/// assert_eq!(pos.x, 10);
/// assert_eq!(pos.y, 5);
///
/// let adjacent = pos.cardinal_adjacent_positions();
/// assert_eq!(adjacent.len(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Creates a new position with the given coordinates.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Calculates the Manhattan distance to another position.
    ///
    /// # Examples
    ///
    /// ```
    /// use tilecarve::Position;
    ///
    /// let pos1 = Position::new(0, 0);
    /// let pos2 = Position::new(3, 4);
    /// assert_eq!(pos1.manhattan_distance(pos2), 7);
    /// ```
    pub fn manhattan_distance(self, other: Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Calculates the Euclidean distance to another position.
    pub fn euclidean_distance(self, other: Position) -> f64 {
        let dx = (self.x - other.x) as f64;
        let dy = (self.y - other.y) as f64;
        (dx * dx + dy * dy).sqrt()
    }

    /// Returns the 4 cardinal adjacent positions (no diagonals).
    pub fn cardinal_adjacent_positions(self) -> [Position; 4] {
        [
            Position::new(self.x, self.y - 1), // N
            Position::new(self.x - 1, self.y), // W
            Position::new(self.x + 1, self.y), // E
            Position::new(self.x, self.y + 1), // S
        ]
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_distances() {
        let a = Position::new(1, 1);
        let b = Position::new(4, 5);
        assert_eq!(a.manhattan_distance(b), 7);
        assert_eq!(b.manhattan_distance(a), 7);
        assert!((a.euclidean_distance(b) - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_cardinal_neighbours() {
        let around = Position::new(0, 0).cardinal_adjacent_positions();
        assert!(around.contains(&Position::new(0, -1)));
        assert!(around.contains(&Position::new(-1, 0)));
        assert!(around.contains(&Position::new(1, 0)));
        assert!(around.contains(&Position::new(0, 1)));
    }

    #[test]
    fn test_position_display() {
        assert_eq!(Position::new(-2, 9).to_string(), "(-2, 9)");
    }
}
