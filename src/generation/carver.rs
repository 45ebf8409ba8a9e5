//! # Room and Hallway Carving
//!
//! Cuts a layout out of a grid of solid wall.
//!
//! Rooms are axis-aligned rectangles dropped uniformly at random. Hallways are
//! L-shaped corridors whose two endpoints must both sit inside already carved floor,
//! so every hallway joins existing open space rather than starting a new island.
//! A final cleanup pass opens one-tile-thick walls that would otherwise leave
//! diagonal squeezes between regions.

use crate::game::{Position, Tile, TileGrid};
use crate::GenerationConfig;
use log::debug;
use rand::rngs::StdRng;
use rand::Rng;

/// Tile written into carved space.
pub const CARVED_FLOOR: Tile = Tile::BLACK;

/// A rectangular room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomSpec {
    pub top_left: Position,
    pub width: i32,
    pub height: i32,
}

impl RoomSpec {
    pub fn new(top_left: Position, width: i32, height: i32) -> Self {
        Self {
            top_left,
            width,
            height,
        }
    }

    /// Samples a room that fits inside the level with a free last row and column.
    pub fn sample(config: &GenerationConfig, rng: &mut StdRng) -> Self {
        let width = rng.gen_range(config.min_room_width..=config.max_room_width) as i32;
        let height = rng.gen_range(config.min_room_height..=config.max_room_height) as i32;
        let x = rng.gen_range(0..config.width as i32 - width - 1);
        let y = rng.gen_range(0..config.height as i32 - height - 1);
        Self::new(Position::new(x, y), width, height)
    }

    /// Carves the room into the grid.
    pub fn carve(&self, grid: &mut TileGrid) {
        grid.fill_rect(
            self.top_left.x,
            self.top_left.y,
            self.width,
            self.height,
            CARVED_FLOOR,
        );
    }
}

/// An L-shaped corridor.
///
/// The horizontal leg runs along `start.y` from `start.x` to `end.x`; the vertical leg
/// runs along `end.x` from `start.y` to `end.y`. Both legs extend `half_width` tiles to
/// either side of their center line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HallwaySpec {
    pub start: Position,
    pub end: Position,
    pub half_width: i32,
}

impl HallwaySpec {
    pub fn new(start: Position, end: Position, half_width: i32) -> Self {
        Self {
            start,
            end,
            half_width,
        }
    }

    /// Manhattan distance between the endpoints.
    pub fn length(&self) -> u32 {
        self.start.manhattan_distance(self.end)
    }

    /// Side length of the square neighbourhood around each endpoint.
    fn span(&self) -> i32 {
        self.half_width * 2 + 1
    }

    /// True when the full neighbourhood of both endpoints is already floor.
    pub fn is_anchored(&self, grid: &TileGrid) -> bool {
        let s = self.half_width;
        [self.start, self.end]
            .iter()
            .all(|p| grid.valid_rect(p.x - s, p.y - s, self.span(), self.span()))
    }

    /// Carves both legs into the grid.
    pub fn carve(&self, grid: &mut TileGrid) {
        let s = self.half_width;
        let (start, end) = (self.start, self.end);
        grid.fill_rect(
            start.x.min(end.x) - s,
            start.y - s,
            (end.x - start.x).abs() + self.span(),
            self.span(),
            CARVED_FLOOR,
        );
        grid.fill_rect(
            end.x - s,
            start.y.min(end.y) - s,
            self.span(),
            (end.y - start.y).abs() + self.span(),
            CARVED_FLOOR,
        );
    }

    /// Samples endpoints until a hallway of acceptable length is anchored in floor.
    ///
    /// Returns `None` once `config.max_endpoint_attempts` pairs have been rejected.
    pub fn sample(grid: &TileGrid, config: &GenerationConfig, rng: &mut StdRng) -> Option<Self> {
        let half_width =
            rng.gen_range(config.min_hallway_half_width..=config.max_hallway_half_width) as i32;
        let (w, h) = (config.width as i32, config.height as i32);
        let lengths = config.min_hallway_length..=config.max_hallway_length;

        for _ in 0..config.max_endpoint_attempts {
            let start = Position::new(
                rng.gen_range(half_width..w - half_width),
                rng.gen_range(half_width..h - half_width),
            );
            let end = Position::new(
                rng.gen_range(half_width..w - half_width),
                rng.gen_range(half_width..h - half_width),
            );
            let hallway = Self::new(start, end, half_width);
            if lengths.contains(&hallway.length()) && hallway.is_anchored(grid) {
                return Some(hallway);
            }
        }
        None
    }
}

/// What a single carving pass produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CarveReport {
    pub rooms: u32,
    pub hallways: u32,
    /// Hallways abandoned after running out of endpoint samples
    pub skipped_hallways: u32,
    /// Wall tiles opened by the cleanup pass
    pub artifacts_removed: usize,
}

/// Opens wall tiles that have floor on both horizontal or both vertical sides.
///
/// Only interior tiles are considered. Tiles are scanned in descending index order and
/// each opened tile can enable the next one in the scan.
pub fn remove_artifacts(grid: &mut TileGrid) -> usize {
    let (w, h) = (grid.width() as i32, grid.height() as i32);
    let mut removed = 0;

    for y in (1..h - 1).rev() {
        for x in (1..w - 1).rev() {
            let pos = Position::new(x, y);
            if grid.is_floor(pos) {
                continue;
            }
            let [north, west, east, south] = pos.cardinal_adjacent_positions();
            let horizontal = grid.is_floor(west) && grid.is_floor(east);
            let vertical = grid.is_floor(north) && grid.is_floor(south);
            if horizontal || vertical {
                grid.tiles_mut()[(y * w + x) as usize] = CARVED_FLOOR;
                removed += 1;
            }
        }
    }
    removed
}

/// Runs one full carving pass over `grid`, starting from solid wall.
pub fn carve_layout(grid: &mut TileGrid, config: &GenerationConfig, rng: &mut StdRng) -> CarveReport {
    let mut report = CarveReport::default();
    grid.fill_all(Tile::NONE);

    for _ in 0..config.room_count {
        RoomSpec::sample(config, rng).carve(grid);
        report.rooms += 1;
    }

    for _ in 0..config.hallway_count {
        match HallwaySpec::sample(grid, config, rng) {
            Some(hallway) => {
                hallway.carve(grid);
                report.hallways += 1;
            }
            None => report.skipped_hallways += 1,
        }
    }
    if report.skipped_hallways > 0 {
        debug!(
            "Skipped {} hallways with no anchored endpoints",
            report.skipped_hallways
        );
    }

    report.artifacts_removed = remove_artifacts(grid);
    report
}
