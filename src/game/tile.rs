use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{MahjongError, Result};

pub const CHARACTER_MIN: u8 = 9;
pub const CHARACTER_MAX: u8 = 17;
pub const WIND_MIN: u8 = 27;
pub const WIND_MAX: u8 = 30;
pub const DRAGON_MIN: u8 = 31;
pub const DRAGON_MAX: u8 = 33;

/// Size of a count table indexed directly by tile code.
pub const TILE_CODE_SPACE: usize = DRAGON_MAX as usize + 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileKind {
    Character,
    Wind,
    Dragon,
}

/// A tile identified by its integer code.
///
/// Codes 9-17 are the nine Character ranks, 27-30 the Winds and 31-33 the
/// Dragons. Nothing else is playable in this variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tile(pub u8);

impl Tile {
    /// Checked constructor; rejects codes outside the playable ranges.
    pub fn new(code: u8) -> Result<Self> {
        let tile = Tile(code);
        if tile.kind().is_some() {
            Ok(tile)
        } else {
            Err(MahjongError::InvalidTile(code))
        }
    }

    pub fn code(self) -> u8 {
        self.0
    }

    pub fn kind(self) -> Option<TileKind> {
        match self.0 {
            CHARACTER_MIN..=CHARACTER_MAX => Some(TileKind::Character),
            WIND_MIN..=WIND_MAX => Some(TileKind::Wind),
            DRAGON_MIN..=DRAGON_MAX => Some(TileKind::Dragon),
            _ => None,
        }
    }

    pub fn is_valid(self) -> bool {
        self.kind().is_some()
    }

    pub fn is_character(self) -> bool {
        matches!(self.kind(), Some(TileKind::Character))
    }

    pub fn is_honor(self) -> bool {
        matches!(self.kind(), Some(TileKind::Wind | TileKind::Dragon))
    }

    /// Character rank from 1 to 9, `None` for honors and invalid codes.
    pub fn rank(self) -> Option<u8> {
        self.is_character().then(|| self.0 - CHARACTER_MIN + 1)
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Joins tile codes with commas, e.g. `9,10,11`.
pub fn format_tiles(tiles: &[Tile]) -> String {
    tiles
        .iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Parses a comma separated list of tile codes.
pub fn parse_tiles(input: &str) -> Result<Vec<Tile>> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            let code: u8 = s
                .parse()
                .map_err(|_| MahjongError::InvalidConfig(format!("not a tile code: {:?}", s)))?;
            Tile::new(code)
        })
        .collect()
}

/// Multiplicity of every tile code in `tiles`.
pub fn count_tiles(tiles: &[Tile]) -> [u8; TILE_CODE_SPACE] {
    let mut counts = [0u8; TILE_CODE_SPACE];
    for tile in tiles {
        if let Some(slot) = counts.get_mut(tile.0 as usize) {
            *slot += 1;
        }
    }
    counts
}
