//! # Generation Module
//!
//! Procedural level construction.
//!
//! The pipeline runs in four stages, each in its own submodule:
//!
//! 1. [`carver`] cuts rooms and L-shaped hallways out of solid wall
//! 2. [`connectivity`] rejects layouts whose floor is split into several regions
//! 3. [`regions`] recolors the floor by nearest seed point
//! 4. [`placement`] chooses spawn tiles for enemies, the player and the objective
//!
//! [`pipeline`] ties the stages together behind the [`Generator`] trait.

pub mod carver;
pub mod connectivity;
pub mod pipeline;
pub mod placement;
pub mod regions;

pub use carver::*;
pub use connectivity::*;
pub use pipeline::*;
pub use placement::*;
pub use regions::*;

use crate::config;
use crate::{TilecarveError, TilecarveResult};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for procedural generation.
///
/// Every size-dependent parameter is derived from the level dimensions by
/// [`GenerationConfig::for_dimensions`]. Fields are public so callers (or a JSON
/// config file) can override individual values; [`GenerationConfig::validate`] checks
/// the result before generation starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Random seed for reproducible generation
    pub seed: u64,
    /// Level width in tiles
    pub width: u32,
    /// Level height in tiles
    pub height: u32,
    /// Rooms carved per layout attempt
    pub room_count: u32,
    pub min_room_width: u32,
    pub max_room_width: u32,
    pub min_room_height: u32,
    pub max_room_height: u32,
    /// Hallways carved per layout attempt
    pub hallway_count: u32,
    /// Minimum Manhattan distance between hallway endpoints
    pub min_hallway_length: u32,
    /// Maximum Manhattan distance between hallway endpoints
    pub max_hallway_length: u32,
    /// Tiles on either side of a hallway's center line
    pub min_hallway_half_width: u32,
    pub max_hallway_half_width: u32,
    /// Seed points used for region coloring
    pub region_seed_count: u32,
    /// Enemies placed on generated levels
    pub enemy_count: u32,
    /// Minimum player-to-objective distance
    pub objective_min_distance: f64,
    /// View distance given to generated enemies
    pub enemy_view_distance: f64,
    /// Full layout regenerations before giving up
    pub max_layout_attempts: u32,
    /// Endpoint re-samples per hallway before skipping it
    pub max_endpoint_attempts: u32,
}

impl GenerationConfig {
    /// Creates a configuration for the default level size.
    ///
    /// # Examples
    ///
    /// ```
    /// use tilecarve::GenerationConfig;
    ///
    /// let config = GenerationConfig::new(12345);
    /// assert_eq!(config.seed, 12345);
    /// assert!(config.min_room_width <= config.max_room_width);
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn new(seed: u64) -> Self {
        Self::for_dimensions(
            config::DEFAULT_LEVEL_WIDTH,
            config::DEFAULT_LEVEL_HEIGHT,
            seed,
        )
    }

    /// Creates a configuration for testing with smaller levels.
    pub fn for_testing(seed: u64) -> Self {
        Self::for_dimensions(160, 120, seed)
    }

    /// Derives every generation parameter from the level dimensions.
    ///
    /// Counts grow with the area and sizes with the average dimension. Room and
    /// hallway sizes are clamped so small levels still leave room to place them.
    pub fn for_dimensions(width: u32, height: u32, seed: u64) -> Self {
        let (w, h) = (u64::from(width), u64::from(height));
        let average = (w + h) / 2;
        let area = w * h;

        let max_room_width = (100 + average / 20).min(w / 3).max(2);
        let max_room_height = (100 + average / 20).min(h / 3).max(2);
        let max_hallway_half_width = (w.min(h) / 10).clamp(1, 7);

        Self {
            seed,
            width,
            height,
            room_count: narrow(area / 56_000 + 10),
            min_room_width: narrow((25 + average / 50).min(max_room_width / 2).max(1)),
            max_room_width: narrow(max_room_width),
            min_room_height: narrow((25 + average / 50).min(max_room_height / 2).max(1)),
            max_room_height: narrow(max_room_height),
            hallway_count: narrow(area / 32_000 + 10),
            min_hallway_length: narrow(average / 20),
            max_hallway_length: narrow(average / 4 + 50),
            min_hallway_half_width: narrow(3.min(max_hallway_half_width)),
            max_hallway_half_width: narrow(max_hallway_half_width),
            region_seed_count: narrow(1 + average / 100 + area / 128_000),
            enemy_count: narrow(average / 250 + area / 72_000),
            objective_min_distance: config::OBJECTIVE_MIN_DISTANCE,
            enemy_view_distance: config::DEFAULT_ENEMY_VIEW_DISTANCE,
            max_layout_attempts: config::MAX_LAYOUT_ATTEMPTS,
            max_endpoint_attempts: config::MAX_ENDPOINT_ATTEMPTS,
        }
    }

    /// Checks level dimensions alone, before any parameter is derived from them.
    ///
    /// # Examples
    ///
    /// ```
    /// use tilecarve::GenerationConfig;
    ///
    /// assert!(GenerationConfig::check_dimensions(800, 600).is_ok());
    /// assert!(GenerationConfig::check_dimensions(8, 600).is_err());
    /// assert!(GenerationConfig::check_dimensions(70_000, 70_000).is_err());
    /// ```
    pub fn check_dimensions(width: u32, height: u32) -> TilecarveResult<()> {
        if width < config::MIN_LEVEL_DIMENSION || height < config::MIN_LEVEL_DIMENSION {
            return Err(TilecarveError::InvalidConfig(format!(
                "level must be at least {0}x{0}, got {1}x{2}",
                config::MIN_LEVEL_DIMENSION,
                width,
                height
            )));
        }
        if u64::from(width) * u64::from(height) > config::MAX_LEVEL_AREA {
            return Err(TilecarveError::InvalidConfig(format!(
                "level {}x{} exceeds {} tiles",
                width,
                height,
                config::MAX_LEVEL_AREA
            )));
        }
        Ok(())
    }

    /// Loads a configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> TilecarveResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the parameters describe a level the carver can build.
    pub fn validate(&self) -> TilecarveResult<()> {
        let fail = |message: String| Err(TilecarveError::InvalidConfig(message));

        Self::check_dimensions(self.width, self.height)?;
        if self.min_room_width == 0 || self.min_room_width > self.max_room_width {
            return fail(format!(
                "room width range {}..={} is empty",
                self.min_room_width, self.max_room_width
            ));
        }
        if self.min_room_height == 0 || self.min_room_height > self.max_room_height {
            return fail(format!(
                "room height range {}..={} is empty",
                self.min_room_height, self.max_room_height
            ));
        }
        if self.max_room_width.saturating_add(2) > self.width
            || self.max_room_height.saturating_add(2) > self.height
        {
            return fail(format!(
                "rooms up to {}x{} do not fit a {}x{} level",
                self.max_room_width, self.max_room_height, self.width, self.height
            ));
        }
        if self.min_hallway_length > self.max_hallway_length {
            return fail(format!(
                "hallway length range {}..={} is empty",
                self.min_hallway_length, self.max_hallway_length
            ));
        }
        if self.min_hallway_half_width > self.max_hallway_half_width
            || u64::from(self.max_hallway_half_width) * 2 >= u64::from(self.width.min(self.height))
        {
            return fail(format!(
                "hallway half width range {}..={} does not fit the level",
                self.min_hallway_half_width, self.max_hallway_half_width
            ));
        }
        if self.room_count == 0 {
            return fail("at least one room is required".to_string());
        }
        if self.region_seed_count == 0 {
            return fail("at least one region seed is required".to_string());
        }
        if self.max_layout_attempts == 0 || self.max_endpoint_attempts == 0 {
            return fail("attempt limits must be positive".to_string());
        }
        if !(self.objective_min_distance >= 0.0) || !(self.enemy_view_distance >= 0.0) {
            return fail("distances must be non-negative".to_string());
        }
        Ok(())
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(42)
    }
}

/// Narrows a derived parameter, saturating values too large for `u32`.
fn narrow(value: u64) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

/// Trait for procedural generators.
///
/// Each stage that produces a standalone artifact implements this trait so it can be
/// driven and checked the same way.
pub trait Generator<T> {
    /// Generates content using the provided configuration and random number generator.
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> TilecarveResult<T>;

    /// Validates that the generated content meets requirements.
    fn validate(&self, content: &T, config: &GenerationConfig) -> TilecarveResult<()>;

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;
}

/// Utility functions for generation algorithms.
pub mod utils {
    use super::*;
    use rand::SeedableRng;

    /// Creates a seeded random number generator from the config.
    pub fn create_rng(config: &GenerationConfig) -> StdRng {
        StdRng::seed_from_u64(config.seed)
    }
}
