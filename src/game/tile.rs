//! # Tiles
//!
//! Tile values are raw 32-bit ARGB colors. Levels loaded from an image keep the image's
//! pixels verbatim, so any value is a legal tile; the generator only ever writes the
//! named palette entries below.

use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A single grid cell, stored as an ARGB color code.
///
/// [`Tile::NONE`] marks walls. Every other value is walkable floor.
///
/// # Examples
///
/// ```
/// use tilecarve::Tile;
///
/// assert!(!Tile::NONE.is_floor());
/// assert!(Tile::RED.is_floor());
/// assert_eq!(Tile::from_name("Red"), Some(Tile::RED));
/// assert_eq!(Tile::from_name("plaid"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tile(pub u32);

impl Tile {
    /// Wall; never floor.
    pub const NONE: Tile = Tile(0xFF33_3333);
    pub const WHITE: Tile = Tile(0xFFFF_FFFF);
    /// Freshly carved floor.
    pub const BLACK: Tile = Tile(0xFF00_0000);
    pub const RED: Tile = Tile(0xFFFF_0000);
    pub const GREEN: Tile = Tile(0xFF00_FF00);
    pub const BLUE: Tile = Tile(0xFF00_00FF);
    pub const CYAN: Tile = Tile(0xFF00_FFFF);
    pub const YELLOW: Tile = Tile(0xFFFF_FF00);
    pub const MAGENTA: Tile = Tile(0xFFFF_00FF);

    /// Colors used to partition the floor into regions.
    pub const REGION_COLORS: [Tile; 4] = [Tile::BLACK, Tile::RED, Tile::GREEN, Tile::BLUE];

    /// Colors an enemy may take.
    pub const ENEMY_COLORS: [Tile; 7] = [
        Tile::RED,
        Tile::GREEN,
        Tile::BLUE,
        Tile::CYAN,
        Tile::YELLOW,
        Tile::MAGENTA,
        Tile::WHITE,
    ];

    const NAMED: [(&'static str, Tile); 9] = [
        ("none", Tile::NONE),
        ("white", Tile::WHITE),
        ("black", Tile::BLACK),
        ("red", Tile::RED),
        ("green", Tile::GREEN),
        ("blue", Tile::BLUE),
        ("cyan", Tile::CYAN),
        ("yellow", Tile::YELLOW),
        ("magenta", Tile::MAGENTA),
    ];

    /// Whether this tile can be walked on.
    pub fn is_floor(self) -> bool {
        self != Tile::NONE
    }

    /// Looks up a palette entry by name, ignoring case and surrounding whitespace.
    pub fn from_name(name: &str) -> Option<Tile> {
        let name = name.trim();
        Self::NAMED
            .iter()
            .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
            .map(|&(_, tile)| tile)
    }

    /// Returns the palette name of this tile, if it has one.
    pub fn name(self) -> Option<&'static str> {
        Self::NAMED
            .iter()
            .find(|&&(_, tile)| tile == self)
            .map(|&(name, _)| name)
    }

    /// Picks a uniformly random enemy color.
    pub fn random_enemy_color(rng: &mut StdRng) -> Tile {
        Self::ENEMY_COLORS[rng.gen_range(0..Self::ENEMY_COLORS.len())]
    }

    /// Splits the tile into `[r, g, b, a]` bytes.
    pub fn to_rgba(self) -> [u8; 4] {
        let [a, r, g, b] = self.0.to_be_bytes();
        [r, g, b, a]
    }

    /// Packs `[r, g, b, a]` bytes into a tile.
    pub fn from_rgba([r, g, b, a]: [u8; 4]) -> Tile {
        Tile(u32::from_be_bytes([a, r, g, b]))
    }
}

impl std::fmt::Display for Tile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "#{:08X}", self.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_name_lookup_ignores_case() {
        assert_eq!(Tile::from_name("RED"), Some(Tile::RED));
        assert_eq!(Tile::from_name(" magenta "), Some(Tile::MAGENTA));
        assert_eq!(Tile::from_name(""), None);
        assert_eq!(Tile::from_name("0xFF0000"), None);
    }

    #[test]
    fn test_names_round_trip_for_palette() {
        for tile in Tile::ENEMY_COLORS {
            let name = tile.name().unwrap();
            assert_eq!(Tile::from_name(name), Some(tile));
        }
        assert_eq!(Tile(0x1234_5678).name(), None);
    }

    #[test]
    fn test_rgba_packing() {
        assert_eq!(Tile::RED.to_rgba(), [0xFF, 0, 0, 0xFF]);
        assert_eq!(Tile::NONE.to_rgba(), [0x33, 0x33, 0x33, 0xFF]);
        assert_eq!(Tile::from_rgba([0, 0xFF, 0, 0xFF]), Tile::GREEN);
    }

    #[test]
    fn test_random_enemy_color_is_from_palette() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let color = Tile::random_enemy_color(&mut rng);
            assert!(Tile::ENEMY_COLORS.contains(&color));
            assert!(color.is_floor());
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Tile::BLUE.to_string(), "blue");
        assert_eq!(Tile(0x8000_0001).to_string(), "#80000001");
    }
}
