use crate::cascade::Pos;
use crate::engine::{Board, Direction};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

/// A pair of orthogonally adjacent cells whose exchange would line up three.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Swap {
    /// Cell picked first; it seeds the cascade first.
    pub a: Pos,
    /// Its right or upper neighbor.
    pub b: Pos,
}

/// Finds every legal swap on the board.
///
/// Each occupied cell is paired with its right and upper neighbor, so every
/// unordered pair is considered exactly once. The board is not modified.
///
/// # Arguments
/// * `board`: A reference to the `Board` to analyze.
///
/// # Returns
/// The legal swaps in column-major order of their first cell, the rightward
/// pair before the upward one.
pub fn find_valid_swaps(board: &Board) -> Vec<Swap> {
    let mut swaps = Vec::new();
    for cell in board.cells().filter(|c| !c.is_empty()) {
        let a = cell.position();
        for direction in [Direction::Right, Direction::Up] {
            let Some(partner) = board.neighbor(a.0, a.1, direction) else {
                continue;
            };
            if partner.is_empty() {
                continue;
            }
            let b = partner.position();
            if board.would_swap_create_match(a, b) {
                swaps.push(Swap { a, b });
            }
        }
    }
    swaps
}

/// Returns `true` if at least one legal swap exists.
///
/// A stable board without one is dead-locked.
pub fn has_valid_swap(board: &Board) -> bool {
    !find_valid_swaps(board).is_empty()
}

/// Picks one legal swap uniformly at random.
///
/// # Returns
/// `None` if the board is dead-locked.
pub fn choose_swap_random<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Option<Swap> {
    find_valid_swaps(board).choose(rng).copied()
}

/// Calculates the number of distinct symbols currently on the board.
///
/// Empty cells are not counted; all Reverse tiles share one symbol.
pub fn count_unique_symbols(board: &Board) -> usize {
    board
        .cells()
        .filter_map(|c| c.symbol())
        .collect::<HashSet<_>>()
        .len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::board_from_str_array;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_find_valid_swaps_lists_each_pair_once() {
        let board = board_from_str_array(&["ABAA"], 3).unwrap();
        let swaps = find_valid_swaps(&board);
        assert_eq!(swaps, vec![Swap { a: (0, 0), b: (1, 0) }]);
    }

    #[test]
    fn test_find_valid_swaps_vertical_and_horizontal() {
        let board = board_from_str_array(&[
            "BCA",
            "AAB",
            "CBC",
        ], 3)
        .unwrap();
        let swaps = find_valid_swaps(&board);
        // (2,1)=B <-> (2,2)=A completes the middle row.
        assert!(swaps.contains(&Swap { a: (2, 1), b: (2, 2) }));
        for swap in &swaps {
            assert!(board.are_adjacent(swap.a, swap.b));
            assert!(board.would_swap_create_match(swap.a, swap.b));
        }
    }

    #[test]
    fn test_dead_locked_board() {
        let board = board_from_str_array(&[
            "ABC",
            "BCA",
            "CAB",
        ], 3)
        .unwrap();
        assert!(!has_valid_swap(&board));
        let mut rng = SmallRng::seed_from_u64(7);
        assert_eq!(choose_swap_random(&board, &mut rng), None);
    }

    #[test]
    fn test_choose_swap_random_returns_legal_swap() {
        let board = Board::with_seed(8, 8, 5, 99).unwrap();
        let legal = find_valid_swaps(&board);
        let mut rng = SmallRng::seed_from_u64(1);
        match choose_swap_random(&board, &mut rng) {
            Some(swap) => assert!(legal.contains(&swap)),
            None => assert!(legal.is_empty()),
        }
    }

    #[test]
    fn test_empty_cells_are_never_swapped() {
        let board = board_from_str_array(&["A.AA"], 3).unwrap();
        assert!(find_valid_swaps(&board).is_empty());
    }

    #[test]
    fn test_count_unique_symbols() {
        let board = board_from_str_array(&["AB*", "*.A"], 3).unwrap();
        assert_eq!(count_unique_symbols(&board), 3);
        let single = board_from_str_array(&["A."], 2).unwrap();
        assert_eq!(count_unique_symbols(&single), 1);
    }
}
