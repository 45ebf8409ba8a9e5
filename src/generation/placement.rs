//! # Entity Placement
//!
//! Chooses spawn tiles by acceptance sampling. Spacing rules are best effort: each
//! placement gets a fixed number of draws and keeps the last one if none satisfied the
//! rule, so a cramped level degrades instead of failing.

use crate::config;
use crate::game::{EnemySpawn, PlacementResult, Position, Tile, TileGrid};
use crate::{GenerationConfig, TilecarveError, TilecarveResult};
use log::debug;
use rand::rngs::StdRng;
use rand::Rng;

/// Picks a uniformly random floor tile.
///
/// Draws random positions until one lands on floor. After `width * height` misses it
/// falls back to choosing from the list of floor tiles, which fails only when there is
/// no floor at all.
pub fn random_floor_position(grid: &TileGrid, rng: &mut StdRng) -> TilecarveResult<Position> {
    let draws = grid.width() as usize * grid.height() as usize;
    for _ in 0..draws {
        let pos = Position::new(
            rng.gen_range(0..grid.width() as i32),
            rng.gen_range(0..grid.height() as i32),
        );
        if grid.is_floor(pos) {
            return Ok(pos);
        }
    }

    let floor = grid.floor_positions();
    if floor.is_empty() {
        return Err(TilecarveError::PlacementFailed(
            "level has no floor tiles".to_string(),
        ));
    }
    Ok(floor[rng.gen_range(0..floor.len())])
}

/// Samples floor tiles until `accept` passes, for at most
/// [`config::PLACEMENT_ATTEMPTS`] draws. The last draw is kept if none passed.
fn sample_until<F>(grid: &TileGrid, rng: &mut StdRng, what: &str, accept: F) -> TilecarveResult<Position>
where
    F: Fn(Position) -> bool,
{
    let mut attempts = 0;
    loop {
        let candidate = random_floor_position(grid, rng)?;
        attempts += 1;
        if accept(candidate) {
            return Ok(candidate);
        }
        if attempts >= config::PLACEMENT_ATTEMPTS {
            debug!(
                "Accepting {} at {} after {} unsuccessful attempts",
                what, candidate, attempts
            );
            return Ok(candidate);
        }
    }
}

/// Places the player outside the view radius of every enemy, if possible.
pub fn place_player(
    grid: &TileGrid,
    enemies: &[EnemySpawn],
    rng: &mut StdRng,
) -> TilecarveResult<Position> {
    sample_until(grid, rng, "player", |pos| {
        enemies.iter().all(|enemy| !enemy.can_see(pos))
    })
}

/// Places the objective farther than `min_distance` from the player, if possible.
pub fn place_objective(
    grid: &TileGrid,
    player: Position,
    min_distance: f64,
    rng: &mut StdRng,
) -> TilecarveResult<Position> {
    sample_until(grid, rng, "objective", |pos| {
        pos.euclidean_distance(player) > min_distance
    })
}

/// Creates `config.enemy_count` stationary enemies on random floor tiles.
pub fn spawn_enemies(
    grid: &TileGrid,
    config: &GenerationConfig,
    rng: &mut StdRng,
) -> TilecarveResult<Vec<EnemySpawn>> {
    (0..config.enemy_count)
        .map(|_| {
            let position = random_floor_position(grid, rng)?;
            let color = Tile::random_enemy_color(rng);
            Ok(EnemySpawn::new(position, color).with_view_distance(config.enemy_view_distance))
        })
        .collect()
}

/// Entities known before placement runs.
///
/// Generated levels start with only enemies; level files may also pin the player and
/// the objective.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlacementPlan {
    pub player: Option<Position>,
    pub objective: Option<Position>,
    pub enemies: Vec<EnemySpawn>,
}

impl PlacementPlan {
    /// Fills in whatever is still missing and returns the final placement.
    ///
    /// The player is placed first so the objective can be spaced away from it.
    pub fn complete(
        self,
        grid: &TileGrid,
        objective_min_distance: f64,
        rng: &mut StdRng,
    ) -> TilecarveResult<PlacementResult> {
        let player = match self.player {
            Some(player) => player,
            None => place_player(grid, &self.enemies, rng)?,
        };
        let objective = match self.objective {
            Some(objective) => objective,
            None => place_objective(grid, player, objective_min_distance, rng)?,
        };

        Ok(PlacementResult {
            player,
            objective,
            enemies: self.enemies,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn open_grid(width: u32, height: u32) -> TileGrid {
        TileGrid::filled(width, height, Tile::BLACK).unwrap()
    }

    #[test]
    fn test_random_floor_position_lands_on_floor() {
        let mut grid = TileGrid::new(40, 40).unwrap();
        grid.fill_rect(10, 10, 3, 3, Tile::RED);
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..100 {
            let pos = random_floor_position(&grid, &mut rng).unwrap();
            assert!(grid.is_floor(pos));
        }
    }

    #[test]
    fn test_random_floor_position_single_tile() {
        let mut grid = TileGrid::new(64, 64).unwrap();
        grid.set(Position::new(63, 0), Tile::BLACK).unwrap();
        let mut rng = StdRng::seed_from_u64(2);
        assert_eq!(
            random_floor_position(&grid, &mut rng).unwrap(),
            Position::new(63, 0)
        );
    }

    #[test]
    fn test_random_floor_position_without_floor_fails() {
        let grid = TileGrid::new(8, 8).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        assert!(matches!(
            random_floor_position(&grid, &mut rng),
            Err(TilecarveError::PlacementFailed(_))
        ));
    }

    #[test]
    fn test_player_avoids_enemy_view() {
        let grid = open_grid(100, 20);
        let enemies = vec![EnemySpawn::new(Position::new(10, 10), Tile::RED).with_view_distance(40.0)];
        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..20 {
            let player = place_player(&grid, &enemies, &mut rng).unwrap();
            assert!(!enemies[0].can_see(player));
        }
    }

    #[test]
    fn test_player_placement_falls_back_when_impossible() {
        let grid = open_grid(10, 10);
        let enemies = vec![EnemySpawn::new(Position::new(5, 5), Tile::RED).with_view_distance(1000.0)];
        let mut rng = StdRng::seed_from_u64(5);
        let player = place_player(&grid, &enemies, &mut rng).unwrap();
        assert!(grid.is_floor(player));
        assert!(enemies[0].can_see(player));
    }

    #[test]
    fn test_objective_is_spaced_from_player() {
        let grid = open_grid(120, 10);
        let player = Position::new(0, 5);
        let mut rng = StdRng::seed_from_u64(6);
        for _ in 0..20 {
            let objective = place_objective(&grid, player, 60.0, &mut rng).unwrap();
            assert!(objective.euclidean_distance(player) > 60.0);
        }
    }

    #[test]
    fn test_objective_falls_back_on_small_levels() {
        let grid = open_grid(16, 16);
        let mut rng = StdRng::seed_from_u64(7);
        let objective =
            place_objective(&grid, Position::new(8, 8), config::OBJECTIVE_MIN_DISTANCE, &mut rng)
                .unwrap();
        assert!(grid.is_floor(objective));
    }

    #[test]
    fn test_spawn_enemies() {
        let mut grid = TileGrid::new(30, 30).unwrap();
        grid.fill_rect(5, 5, 20, 20, Tile::BLACK);
        let mut config = GenerationConfig::for_dimensions(30, 30, 8);
        config.enemy_count = 6;
        config.enemy_view_distance = 12.5;
        let mut rng = StdRng::seed_from_u64(8);

        let enemies = spawn_enemies(&grid, &config, &mut rng).unwrap();
        assert_eq!(enemies.len(), 6);
        for enemy in &enemies {
            assert!(grid.is_floor(enemy.position));
            assert!(Tile::ENEMY_COLORS.contains(&enemy.color));
            assert_eq!(enemy.view_distance, 12.5);
            assert!(enemy.route.is_none());
        }
    }

    #[test]
    fn test_plan_keeps_fixed_entities() {
        let grid = open_grid(20, 20);
        let plan = PlacementPlan {
            player: Some(Position::new(1, 1)),
            objective: Some(Position::new(2, 2)),
            enemies: vec![EnemySpawn::new(Position::new(1, 2), Tile::BLUE)],
        };
        let mut rng = StdRng::seed_from_u64(9);
        let result = plan.clone().complete(&grid, 200.0, &mut rng).unwrap();
        assert_eq!(result.player, Position::new(1, 1));
        assert_eq!(result.objective, Position::new(2, 2));
        assert_eq!(result.enemies, plan.enemies);
    }

    #[test]
    fn test_plan_fills_missing_entities() {
        let grid = open_grid(200, 20);
        let mut rng = StdRng::seed_from_u64(10);
        let result = PlacementPlan::default().complete(&grid, 50.0, &mut rng).unwrap();
        assert!(grid.is_floor(result.player));
        assert!(grid.is_floor(result.objective));
        assert!(result.objective.euclidean_distance(result.player) > 50.0);
        assert!(result.enemies.is_empty());
    }
}
