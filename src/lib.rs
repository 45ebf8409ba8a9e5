//! # Tilecarve
//!
//! Procedural level generation for top-down tile games.
//!
//! ## Architecture Overview
//!
//! A level is built by a short pipeline over a single [`TileGrid`]:
//!
//! - **Carving**: rooms and L-shaped hallways are cut out of solid wall
//! - **Validation**: a flood fill rejects layouts whose floor is not one region
//! - **Region coloring**: floor tiles take the color of their Manhattan-nearest seed
//! - **Placement**: player, objective and enemies are placed with spacing constraints
//!
//! The [`trace`] module holds the integer rasterization primitives (line, ray, circle,
//! flood fill) the pipeline is built on. They are also meant to be reused at runtime
//! for vision and area-effect queries.
//!
//! Levels can also be loaded from a text description that points at an image, see
//! [`level`].

pub mod game;
pub mod generation;
pub mod level;
pub mod trace;

// Core module re-exports
pub use game::*;
pub use generation::*;
pub use level::*;

pub use trace::{circle, fill, line, ray};

/// Core error type for the level generator.
#[derive(thiserror::Error, Debug)]
pub enum TilecarveError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Image could not be decoded or encoded
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Level description file is missing required content
    #[error("Invalid level file: {0}")]
    LevelFile(String),

    /// Generation parameters are unusable
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Generated content failed validation
    #[error("Generation failed: {0}")]
    GenerationFailed(String),

    /// No connected layout was produced within the retry cap
    #[error("Layout did not converge after {attempts} attempts")]
    LayoutNotConverged { attempts: u32 },

    /// An entity could not be placed at all
    #[error("Placement failed: {0}")]
    PlacementFailed(String),
}

/// Result type used throughout the crate.
pub type TilecarveResult<T> = Result<T, TilecarveError>;

/// Version information for the crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Generation constants.
pub mod config {
    /// Default level width in tiles
    pub const DEFAULT_LEVEL_WIDTH: u32 = 800;

    /// Default level height in tiles
    pub const DEFAULT_LEVEL_HEIGHT: u32 = 600;

    /// Smallest width or height the carver accepts
    pub const MIN_LEVEL_DIMENSION: u32 = 16;

    /// Largest tile count (`width * height`) a level may have
    pub const MAX_LEVEL_AREA: u64 = 4096 * 4096;

    /// Attempts made by each best-effort placement before accepting the last sample
    pub const PLACEMENT_ATTEMPTS: u32 = 100;

    /// Minimum player-to-objective distance
    pub const OBJECTIVE_MIN_DISTANCE: f64 = 200.0;

    /// How far an enemy can see when none is given
    pub const DEFAULT_ENEMY_VIEW_DISTANCE: f64 = 120.0;

    /// Full layout regenerations before giving up
    pub const MAX_LAYOUT_ATTEMPTS: u32 = 1000;

    /// Endpoint re-samples per hallway before skipping it
    pub const MAX_ENDPOINT_ATTEMPTS: u32 = 1000;
}
