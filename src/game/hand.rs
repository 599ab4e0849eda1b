use crate::game::tile::Tile;
use crate::{MahjongError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hand {
    pub(crate) tiles: Vec<Tile>,
}

impl Hand {
    pub fn new(tiles: Vec<Tile>) -> Self {
        Self { tiles }
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

    /// Removes the first occurrence of `tile`.
    ///
    /// Discarding a tile the hand does not hold is a caller bug and is
    /// reported as [`MahjongError::TileNotInHand`].
    pub fn discard(&mut self, tile: Tile) -> Result<()> {
        let index = self
            .tiles
            .iter()
            .position(|&t| t == tile)
            .ok_or(MahjongError::TileNotInHand(tile))?;
        self.tiles.remove(index);
        Ok(())
    }

    pub fn draw(&mut self, tile: Tile) {
        self.tiles.push(tile);
    }

    /// Distinct tiles in ascending code order; these are the legal discards.
    pub fn distinct_tiles(&self) -> Vec<Tile> {
        let mut tiles = self.tiles.clone();
        tiles.sort_unstable();
        tiles.dedup();
        tiles
    }
}
