//! # Levels
//!
//! A [`Level`] is a tile grid plus where everything starts on it. Levels are either
//! generated from a [`GenerationConfig`] or loaded from a description file that names
//! an image and lists entities (see [`parse`] for the format).
//!
//! Loaded levels trust their image: no connectivity check is made. Entity lines are
//! resolved against the grid instead, so an enemy on a wall is moved to a random
//! floor tile and a player or objective without a usable position is placed the same
//! way generated levels place them.

pub mod export;
pub mod loader;
pub mod parse;

pub use loader::*;
pub use parse::*;

use crate::config;
use crate::game::{EnemySpawn, PlacementResult, Position, Tile, TileGrid};
use crate::generation::{random_floor_position, utils, GenerationConfig, Generator, LevelGenerator, PlacementPlan};
use crate::{TilecarveError, TilecarveResult};
use log::{info, warn};
use rand::rngs::StdRng;
use std::path::Path;

/// Options applied while turning a description into a level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelFileOptions {
    pub route_syntax: RouteSyntax,
    /// Spacing used when the objective has to be placed
    pub objective_min_distance: f64,
    /// View distance for enemies whose record has no `view` field
    pub enemy_view_distance: f64,
}

impl Default for LevelFileOptions {
    fn default() -> Self {
        Self {
            route_syntax: RouteSyntax::default(),
            objective_min_distance: config::OBJECTIVE_MIN_DISTANCE,
            enemy_view_distance: config::DEFAULT_ENEMY_VIEW_DISTANCE,
        }
    }
}

/// A playable level.
#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    pub grid: TileGrid,
    pub placement: PlacementResult,
}

impl Level {
    pub fn new(grid: TileGrid, placement: PlacementResult) -> Self {
        Self { grid, placement }
    }

    pub fn width(&self) -> u32 {
        self.grid.width()
    }

    pub fn height(&self) -> u32 {
        self.grid.height()
    }

    /// Generates a level, seeding the random source from `config.seed`.
    pub fn generate(config: &GenerationConfig) -> TilecarveResult<Self> {
        let mut rng = utils::create_rng(config);
        LevelGenerator::new().generate(config, &mut rng)
    }

    /// Loads a description file from disk. The image path inside it is resolved
    /// relative to the file's directory.
    pub fn from_file(
        path: impl AsRef<Path>,
        options: &LevelFileOptions,
        rng: &mut StdRng,
    ) -> TilecarveResult<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| TilecarveError::LevelFile(format!("{} is not a file", path.display())))?;
        let loader = FsLoader::new(path.parent().unwrap_or_else(|| Path::new("")));
        Self::load(name, &loader, options, rng)
    }

    /// Loads a level through `loader`.
    ///
    /// Fails only when the description has no image line or the image cannot be read.
    pub fn load(
        path: &str,
        loader: &dyn ResourceLoader,
        options: &LevelFileOptions,
        rng: &mut StdRng,
    ) -> TilecarveResult<Self> {
        let lines = loader.load_strings(path)?;
        let description = parse_description(&lines, options.route_syntax)
            .ok_or_else(|| TilecarveError::LevelFile(format!("{} does not name an image", path)))?;
        let grid = loader.load_image(&description.image)?;
        info!(
            "Loaded {}x{} level image {} with {} entity records",
            grid.width(),
            grid.height(),
            description.image,
            description.records.len()
        );
        Self::from_description(grid, &description.records, options, rng)
    }

    /// Resolves parsed records against `grid` and places whatever is missing.
    pub fn from_description(
        grid: TileGrid,
        records: &[EntityRecord],
        options: &LevelFileOptions,
        rng: &mut StdRng,
    ) -> TilecarveResult<Self> {
        let mut plan = PlacementPlan::default();

        for record in records {
            let position = record.position().filter(|&pos| grid.is_floor(pos));
            match record.kind {
                EntityKind::Player => {
                    if position.is_none() {
                        warn!("Player has no usable position, it will be placed randomly");
                    }
                    plan.player = position;
                }
                EntityKind::Objective => {
                    if position.is_none() {
                        warn!("Objective has no usable position, it will be placed randomly");
                    }
                    plan.objective = position;
                }
                EntityKind::Enemy => {
                    let position = match position {
                        Some(pos) => pos,
                        None => random_floor_position(&grid, rng)?,
                    };
                    let color = match record.color {
                        Some(color) => color,
                        None => Tile::random_enemy_color(rng),
                    };
                    let view_distance = record.view_distance.unwrap_or(options.enemy_view_distance);
                    let mut enemy = EnemySpawn::new(position, color).with_view_distance(view_distance);
                    if let Some(route) = &record.route {
                        enemy = enemy.with_route(route.clone());
                    }
                    plan.enemies.push(enemy);
                }
            }
        }

        let placement = plan.complete(&grid, options.objective_min_distance, rng)?;
        Ok(Self::new(grid, placement))
    }

    /// Checks that every entity starts on a floor tile.
    pub fn validate_placement(&self) -> TilecarveResult<()> {
        let check = |what: &str, pos: Position| {
            if self.grid.is_floor(pos) {
                Ok(())
            } else {
                Err(TilecarveError::PlacementFailed(format!(
                    "{} at {} is not on floor",
                    what, pos
                )))
            }
        };

        check("player", self.placement.player)?;
        check("objective", self.placement.objective)?;
        for enemy in &self.placement.enemies {
            check("enemy", enemy.position)?;
        }
        Ok(())
    }
}
