use rand::prelude::*;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::game::tile::{Tile, CHARACTER_MAX, CHARACTER_MIN, DRAGON_MAX, DRAGON_MIN, WIND_MAX, WIND_MIN};
use crate::{MahjongError, Result};

/// Multiset of tiles the wall is built from, before the hand is dealt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WallComposition {
    pub entries: Vec<(Tile, u8)>,
}

impl WallComposition {
    /// Two copies of every Character rank, Dragon and Wind.
    pub fn standard() -> Self {
        let mut entries = Vec::new();
        for code in CHARACTER_MIN..=CHARACTER_MAX {
            entries.push((Tile(code), 2));
        }
        for code in DRAGON_MIN..=DRAGON_MAX {
            entries.push((Tile(code), 2));
        }
        for code in WIND_MIN..=WIND_MAX {
            entries.push((Tile(code), 2));
        }
        Self { entries }
    }

    pub fn total(&self) -> usize {
        self.entries.iter().map(|&(_, copies)| copies as usize).sum()
    }
}

impl Default for WallComposition {
    fn default() -> Self {
        Self::standard()
    }
}

/// Draw pile. Tiles are drawn from the back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wall {
    pub(crate) tiles: Vec<Tile>,
}

impl Wall {
    pub fn new(tiles: Vec<Tile>) -> Self {
        Self { tiles }
    }

    /// Expands `composition` and takes out one copy of every tile in `hand`.
    pub fn build(composition: &WallComposition, hand: &[Tile]) -> Result<Self> {
        let mut tiles = Vec::with_capacity(composition.total());
        for &(tile, copies) in &composition.entries {
            if !tile.is_valid() {
                return Err(MahjongError::InvalidTile(tile.code()));
            }
            tiles.extend(std::iter::repeat(tile).take(copies as usize));
        }
        for &tile in hand {
            let index = tiles
                .iter()
                .position(|&t| t == tile)
                .ok_or(MahjongError::TileNotInWall(tile))?;
            tiles.remove(index);
        }
        Ok(Self { tiles })
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn draw(&mut self) -> Option<Tile> {
        self.tiles.pop()
    }

    pub fn shuffle(&mut self, rng: &mut StdRng) {
        self.tiles.shuffle(rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_composition() {
        let composition = WallComposition::standard();
        assert_eq!(composition.total(), 32, "9 ranks + 3 dragons + 4 winds, 2 copies each");
        assert!(composition.entries.iter().all(|&(_, copies)| copies == 2));
    }

    #[test]
    fn test_build_removes_hand_tiles() {
        let hand: Vec<Tile> = (9..=16).map(Tile).collect();
        let wall = Wall::build(&WallComposition::standard(), &hand).unwrap();
        assert_eq!(wall.len(), 24);
        assert_eq!(wall.tiles().iter().filter(|&&t| t == Tile(9)).count(), 1);
        assert_eq!(wall.tiles().iter().filter(|&&t| t == Tile(17)).count(), 2);
    }

    #[test]
    fn test_build_rejects_unavailable_tile() {
        let hand = vec![Tile(31), Tile(31), Tile(31)];
        let err = Wall::build(&WallComposition::standard(), &hand).unwrap_err();
        assert!(matches!(err, MahjongError::TileNotInWall(Tile(31))));
    }

    #[test]
    fn test_draw_takes_last_tile() {
        let mut wall = Wall::new(vec![Tile(9), Tile(10), Tile(27)]);
        assert_eq!(wall.draw(), Some(Tile(27)));
        assert_eq!(wall.draw(), Some(Tile(10)));
        assert_eq!(wall.len(), 1);
        assert_eq!(wall.draw(), Some(Tile(9)));
        assert_eq!(wall.draw(), None);
    }

    #[test]
    fn test_shuffle_keeps_multiset() {
        let hand: Vec<Tile> = (9..=16).map(Tile).collect();
        let mut wall = Wall::build(&WallComposition::standard(), &hand).unwrap();
        let mut before = wall.tiles().to_vec();
        let mut rng = StdRng::seed_from_u64(7);
        wall.shuffle(&mut rng);
        let mut after = wall.tiles().to_vec();
        before.sort_unstable();
        after.sort_unstable();
        assert_eq!(before, after);
    }
}
