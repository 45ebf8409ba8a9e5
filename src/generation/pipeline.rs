//! # Level Pipeline
//!
//! Drives carving, validation, region coloring and placement in order.

use super::carver::carve_layout;
use super::connectivity::{check_connectivity, Connectivity};
use super::placement::{spawn_enemies, PlacementPlan};
use super::regions::{color_regions, sample_seeds};
use super::{GenerationConfig, Generator};
use crate::game::TileGrid;
use crate::level::Level;
use crate::{TilecarveError, TilecarveResult};
use log::{debug, info};
use rand::rngs::StdRng;

/// Produces connected floor layouts by rejection sampling.
///
/// Each attempt carves a fresh layout from solid wall and keeps it only if its floor is
/// a single region. Gives up with [`TilecarveError::LayoutNotConverged`] after
/// `config.max_layout_attempts` rejected layouts.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutGenerator;

impl Generator<TileGrid> for LayoutGenerator {
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> TilecarveResult<TileGrid> {
        config.validate()?;
        let mut grid = TileGrid::new(config.width, config.height)?;

        for attempt in 1..=config.max_layout_attempts {
            let report = carve_layout(&mut grid, config, rng);
            let connectivity = check_connectivity(&grid);
            if connectivity.is_connected() {
                debug!(
                    "Layout accepted on attempt {} ({:?}, {:?})",
                    attempt, connectivity, report
                );
                return Ok(grid);
            }
            debug!("Layout attempt {} rejected: {:?}", attempt, connectivity);
        }

        Err(TilecarveError::LayoutNotConverged {
            attempts: config.max_layout_attempts,
        })
    }

    fn validate(&self, grid: &TileGrid, config: &GenerationConfig) -> TilecarveResult<()> {
        if grid.width() != config.width || grid.height() != config.height {
            return Err(TilecarveError::GenerationFailed(format!(
                "layout is {}x{}, expected {}x{}",
                grid.width(),
                grid.height(),
                config.width,
                config.height
            )));
        }
        match check_connectivity(grid) {
            Connectivity::Connected { .. } => Ok(()),
            Connectivity::Empty => Err(TilecarveError::GenerationFailed(
                "layout has no floor tiles".to_string(),
            )),
            Connectivity::Disconnected { unreached, .. } => Err(TilecarveError::GenerationFailed(
                format!("{} floor tiles are unreachable", unreached),
            )),
        }
    }

    fn generator_type(&self) -> &'static str {
        "LayoutGenerator"
    }
}

/// Builds a complete level: layout, region colors, enemies, player and objective.
#[derive(Debug, Clone, Copy, Default)]
pub struct LevelGenerator {
    pub layout: LayoutGenerator,
}

impl LevelGenerator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Generator<Level> for LevelGenerator {
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> TilecarveResult<Level> {
        info!(
            "Generating {}x{} level with seed {}",
            config.width, config.height, config.seed
        );

        let mut grid = self.layout.generate(config, rng)?;

        let seeds = sample_seeds(config.width, config.height, config.region_seed_count, rng);
        color_regions(&mut grid, &seeds);

        let plan = PlacementPlan {
            player: None,
            objective: None,
            enemies: spawn_enemies(&grid, config, rng)?,
        };
        let placement = plan.complete(&grid, config.objective_min_distance, rng)?;

        info!(
            "Level ready: {} floor tiles, {} enemies, player at {}, objective at {}",
            grid.floor_count(),
            placement.enemies.len(),
            placement.player,
            placement.objective
        );
        Ok(Level::new(grid, placement))
    }

    fn validate(&self, level: &Level, config: &GenerationConfig) -> TilecarveResult<()> {
        self.layout.validate(&level.grid, config)?;
        level.validate_placement()
    }

    fn generator_type(&self) -> &'static str {
        "LevelGenerator"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Tile;
    use crate::generation::utils;

    #[test]
    fn test_layout_generation_is_connected() {
        let config = GenerationConfig::for_testing(12345);
        let mut rng = utils::create_rng(&config);
        let grid = LayoutGenerator.generate(&config, &mut rng).unwrap();
        assert!(LayoutGenerator.validate(&grid, &config).is_ok());
        assert!(grid.tiles().iter().all(|&t| t == Tile::NONE || t == Tile::BLACK));
    }

    #[test]
    fn test_layout_generation_rejects_bad_config() {
        let config = GenerationConfig::for_dimensions(10, 10, 1);
        let mut rng = utils::create_rng(&config);
        assert!(matches!(
            LayoutGenerator.generate(&config, &mut rng),
            Err(TilecarveError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_layout_generation_gives_up() {
        // Two tiny rooms, no hallways and a single attempt. The outcome must agree
        // with an independent carve from the same seed.
        let mut config = GenerationConfig::for_testing(4);
        config.room_count = 2;
        config.min_room_width = 2;
        config.max_room_width = 2;
        config.min_room_height = 2;
        config.max_room_height = 2;
        config.hallway_count = 0;
        config.max_layout_attempts = 1;
        let mut rng = utils::create_rng(&config);

        let grid = {
            let mut replay = utils::create_rng(&config);
            let mut grid = TileGrid::new(config.width, config.height).unwrap();
            carve_layout(&mut grid, &config, &mut replay);
            grid
        };
        let expected_connected = check_connectivity(&grid).is_connected();

        match LayoutGenerator.generate(&config, &mut rng) {
            Ok(_) => assert!(expected_connected),
            Err(TilecarveError::LayoutNotConverged { attempts }) => {
                assert!(!expected_connected);
                assert_eq!(attempts, 1);
            }
            Err(other) => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_layout_validation_detects_disconnection() {
        let config = GenerationConfig::for_dimensions(20, 20, 1);
        let mut grid = TileGrid::new(20, 20).unwrap();
        grid.fill_rect(1, 1, 3, 3, Tile::BLACK);
        grid.fill_rect(10, 10, 3, 3, Tile::BLACK);
        assert!(matches!(
            LayoutGenerator.validate(&grid, &config),
            Err(TilecarveError::GenerationFailed(_))
        ));

        let empty = TileGrid::new(20, 20).unwrap();
        assert!(LayoutGenerator.validate(&empty, &config).is_err());

        let wrong_size = TileGrid::filled(21, 20, Tile::BLACK).unwrap();
        assert!(LayoutGenerator.validate(&wrong_size, &config).is_err());
    }

    #[test]
    fn test_level_generation() {
        let config = GenerationConfig::for_testing(777);
        let mut rng = utils::create_rng(&config);
        let generator = LevelGenerator::new();
        let level = generator.generate(&config, &mut rng).unwrap();

        assert!(generator.validate(&level, &config).is_ok());
        assert_eq!(level.placement.enemies.len(), config.enemy_count as usize);
        assert!(level.grid.is_floor(level.placement.player));
        assert!(level.grid.is_floor(level.placement.objective));
        assert!(level
            .grid
            .tiles()
            .iter()
            .all(|&t| t == Tile::NONE || Tile::REGION_COLORS.contains(&t)));
    }

    #[test]
    fn test_generator_names() {
        assert_eq!(LayoutGenerator.generator_type(), "LayoutGenerator");
        assert_eq!(LevelGenerator::new().generator_type(), "LevelGenerator");
    }
}
