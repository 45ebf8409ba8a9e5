//! # Placement Data
//!
//! Where the player, objective and enemies start. This is everything the entity
//! systems receive from level construction; behavior is entirely theirs.

use super::{Position, Tile};
use crate::config;
use serde::{Deserialize, Serialize};

/// One stop on an enemy patrol route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteNode {
    /// Tile to walk to
    pub position: Position,
    /// Ticks to wait after arriving
    pub wait_ticks: u32,
}

impl RouteNode {
    pub fn new(position: Position, wait_ticks: u32) -> Self {
        Self {
            position,
            wait_ticks,
        }
    }
}

/// Spawn description for a single enemy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemySpawn {
    /// Spawn tile
    pub position: Position,
    /// Light color of the enemy
    pub color: Tile,
    /// Distance at which the enemy notices the player
    pub view_distance: f64,
    /// Patrol route, if the enemy has one
    pub route: Option<Vec<RouteNode>>,
}

impl EnemySpawn {
    /// Creates a stationary enemy with the default view distance.
    pub fn new(position: Position, color: Tile) -> Self {
        Self {
            position,
            color,
            view_distance: config::DEFAULT_ENEMY_VIEW_DISTANCE,
            route: None,
        }
    }

    /// Attaches a patrol route.
    pub fn with_route(mut self, route: Vec<RouteNode>) -> Self {
        self.route = Some(route);
        self
    }

    /// Overrides how far the enemy can see.
    pub fn with_view_distance(mut self, view_distance: f64) -> Self {
        self.view_distance = view_distance;
        self
    }

    /// Whether `pos` is inside this enemy's view radius.
    pub fn can_see(&self, pos: Position) -> bool {
        self.position.euclidean_distance(pos) < self.view_distance
    }
}

/// Final spawn positions for a level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementResult {
    pub player: Position,
    pub objective: Position,
    /// Enemies in the order they were created
    pub enemies: Vec<EnemySpawn>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enemy_defaults() {
        let enemy = EnemySpawn::new(Position::new(3, 4), Tile::RED);
        assert_eq!(enemy.view_distance, config::DEFAULT_ENEMY_VIEW_DISTANCE);
        assert!(enemy.route.is_none());
    }

    #[test]
    fn test_enemy_view_radius() {
        let enemy = EnemySpawn::new(Position::new(0, 0), Tile::BLUE).with_view_distance(5.0);
        assert!(enemy.can_see(Position::new(3, 3)));
        assert!(!enemy.can_see(Position::new(3, 4)));
        assert!(!enemy.can_see(Position::new(0, 6)));
    }

    #[test]
    fn test_placement_serializes_to_json() {
        let placement = PlacementResult {
            player: Position::new(1, 2),
            objective: Position::new(30, 40),
            enemies: vec![EnemySpawn::new(Position::new(5, 5), Tile::GREEN)
                .with_route(vec![RouteNode::new(Position::new(6, 5), 3)])],
        };
        let json = serde_json::to_string(&placement).unwrap();
        let back: PlacementResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, placement);
    }
}
