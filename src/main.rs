//! # Tilecarve Command Line
//!
//! Generates a level (or loads one from a description file), prints a summary and
//! optionally writes it out as an image plus description.

use clap::Parser;
use log::{error, info, LevelFilter};
use rand::SeedableRng;
use std::path::PathBuf;
use tilecarve::{
    config, GenerationConfig, Level, LevelFileOptions, RouteSyntax, TilecarveError, TilecarveResult,
};

/// Command line arguments for tilecarve.
#[derive(Parser, Debug)]
#[command(name = "tilecarve")]
#[command(about = "Procedural top-down level generator")]
#[command(version)]
struct Args {
    /// Level width in tiles
    #[arg(long, default_value_t = config::DEFAULT_LEVEL_WIDTH)]
    width: u32,

    /// Level height in tiles
    #[arg(long, default_value_t = config::DEFAULT_LEVEL_HEIGHT)]
    height: u32,

    /// Random seed for generation
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON generation config; overrides width and height
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Load a level description file instead of generating
    #[arg(short, long)]
    load: Option<PathBuf>,

    /// Accept waits glued to route coordinates, as in `1,1(5)`
    #[arg(long)]
    lenient_routes: bool,

    /// Directory to save the level into
    #[arg(long)]
    save: Option<PathBuf>,

    /// Base file name used with --save
    #[arg(long, default_value = "level")]
    name: String,

    /// Print the placement as JSON
    #[arg(long)]
    json: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() {
    let args = Args::parse();
    initialize_logging(&args.log_level);

    if let Err(e) = run(&args) {
        error!("{}", e);
        std::process::exit(1);
    }
}

/// Initializes env_logger, letting `RUST_LOG` override the command line level.
fn initialize_logging(log_level: &str) {
    let level = match log_level.to_lowercase().as_str() {
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .format_target(false)
        .parse_default_env()
        .init();
}

fn seed_from_clock() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

fn run(args: &Args) -> TilecarveResult<()> {
    info!("Starting tilecarve v{}", tilecarve::VERSION);
    let seed = args.seed.unwrap_or_else(seed_from_clock);

    let (level, seed) = match &args.load {
        Some(path) => {
            let options = LevelFileOptions {
                route_syntax: if args.lenient_routes {
                    RouteSyntax::Lenient
                } else {
                    RouteSyntax::Strict
                },
                ..LevelFileOptions::default()
            };
            let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
            (Level::from_file(path, &options, &mut rng)?, seed)
        }
        None => {
            let config = match &args.config {
                Some(path) => {
                    let mut config = GenerationConfig::from_json_file(path)?;
                    if let Some(seed) = args.seed {
                        config.seed = seed;
                    }
                    config
                }
                None => {
                    GenerationConfig::check_dimensions(args.width, args.height)?;
                    GenerationConfig::for_dimensions(args.width, args.height, seed)
                }
            };
            (Level::generate(&config)?, config.seed)
        }
    };

    print_summary(&level, seed);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&level.placement)?);
    }

    if let Some(dir) = &args.save {
        if args.name.is_empty() {
            return Err(TilecarveError::InvalidConfig(
                "--name must not be empty".to_string(),
            ));
        }
        let path = level.save(dir, &args.name)?;
        println!("Saved {}", path.display());
    }

    Ok(())
}

fn print_summary(level: &Level, seed: u64) {
    println!("Level {}x{} (seed {})", level.width(), level.height(), seed);
    println!("  floor tiles: {}", level.grid.floor_count());
    println!("  player:      {}", level.placement.player);
    println!("  objective:   {}", level.placement.objective);
    println!("  enemies:     {}", level.placement.enemies.len());
    for enemy in &level.placement.enemies {
        let route = enemy
            .route
            .as_ref()
            .map_or(0, |route| route.len());
        println!(
            "    {} at {} ({} waypoints)",
            enemy.color, enemy.position, route
        );
    }
}
