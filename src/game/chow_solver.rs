use crate::game::tile::{Tile, CHARACTER_MAX, CHARACTER_MIN};

/// Remaining multiplicity of each Character rank, index 0 is tile 9.
pub type CharacterCounts = [u8; 9];

const LAST_RUN_START: u8 = CHARACTER_MAX - 2;

fn slot(code: u8) -> usize {
    (code - CHARACTER_MIN) as usize
}

/// Decides whether `counts` splits into exactly `runs_remaining` runs of
/// three consecutive ranks with nothing left over.
///
/// `counts` is taken by value, so every branch works on its own copy and the
/// caller's table is never touched.
pub fn can_partition_into_runs(counts: CharacterCounts, runs_remaining: usize) -> bool {
    find_runs(counts, runs_remaining).is_some()
}

/// Same search as [`can_partition_into_runs`], returning the first tile of
/// every run found. Start ranks are tried lowest first.
pub fn find_runs(counts: CharacterCounts, runs_remaining: usize) -> Option<Vec<Tile>> {
    if runs_remaining == 0 {
        return counts.iter().all(|&c| c == 0).then(Vec::new);
    }

    for start in CHARACTER_MIN..=LAST_RUN_START {
        let i = slot(start);
        if counts[i] == 0 || counts[i + 1] == 0 || counts[i + 2] == 0 {
            continue;
        }
        let mut rest = counts;
        rest[i] -= 1;
        rest[i + 1] -= 1;
        rest[i + 2] -= 1;
        if let Some(mut runs) = find_runs(rest, runs_remaining - 1) {
            runs.insert(0, Tile(start));
            return Some(runs);
        }
    }
    None
}

/// Builds a rank table from the Character tiles of `tiles`, ignoring honors.
pub fn character_counts(tiles: &[Tile]) -> CharacterCounts {
    let mut counts = [0u8; 9];
    for tile in tiles.iter().filter(|t| t.is_character()) {
        counts[slot(tile.code())] += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts_of(codes: &[u8]) -> CharacterCounts {
        let tiles: Vec<Tile> = codes.iter().map(|&c| Tile(c)).collect();
        character_counts(&tiles)
    }

    #[test]
    fn test_two_disjoint_runs() {
        let counts = counts_of(&[9, 10, 11, 12, 13, 14]);
        assert!(can_partition_into_runs(counts, 2));
        assert_eq!(find_runs(counts, 2), Some(vec![Tile(9), Tile(12)]));
    }

    #[test]
    fn test_leftover_tile_fails() {
        let counts = counts_of(&[9, 10, 11, 12, 13, 14, 15]);
        assert!(
            !can_partition_into_runs(counts, 2),
            "a seventh tile cannot be absorbed by two runs"
        );
    }

    #[test]
    fn test_zero_runs_needs_empty_table() {
        assert!(can_partition_into_runs([0; 9], 0));
        assert!(!can_partition_into_runs(counts_of(&[9]), 0));
    }

    #[test]
    fn test_overlapping_ranks() {
        let counts = counts_of(&[9, 10, 10, 11, 11, 12, 13, 14, 15]);
        assert_eq!(
            find_runs(counts, 3),
            Some(vec![Tile(9), Tile(10), Tile(13)])
        );
    }

    #[test]
    fn test_general_multiplicities() {
        let counts = counts_of(&[12, 12, 13, 13, 14, 14]);
        assert!(can_partition_into_runs(counts, 2), "two identical runs are allowed");
        assert!(!can_partition_into_runs(counts, 1));
    }

    #[test]
    fn test_runs_never_wrap_past_rank_nine() {
        let counts = counts_of(&[16, 17, 9]);
        assert!(!can_partition_into_runs(counts, 1));
        let counts = counts_of(&[15, 16, 17]);
        assert_eq!(find_runs(counts, 1), Some(vec![Tile(15)]));
    }

    #[test]
    fn test_search_leaves_input_unchanged() {
        let counts = counts_of(&[9, 10, 11, 13, 14, 16]);
        let before = counts;
        let first = can_partition_into_runs(counts, 2);
        let second = can_partition_into_runs(counts, 2);
        assert_eq!(first, second);
        assert!(!first);
        assert_eq!(counts, before);
    }

    #[test]
    fn test_character_counts_skips_honors() {
        let tiles = [Tile(9), Tile(31), Tile(31), Tile(17), Tile(27)];
        let counts = character_counts(&tiles);
        assert_eq!(counts[0], 1);
        assert_eq!(counts[8], 1);
        assert_eq!(counts.iter().sum::<u8>(), 2);
    }
}
