//! Match detection and swap validation.
//!
//! Runs are found by casting a ray from a seed cell in one direction and
//! collecting cells while they show the target symbol. The seed itself is never
//! part of the returned run: an axis run of length 2 plus the seed is three in a
//! row. Horizontal and vertical axes are always evaluated separately.

use crate::engine::{Board, Direction, Symbol};

/// One of the two board axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Left and right.
    Horizontal,
    /// Up and down.
    Vertical,
}

impl Axis {
    /// Both axes, horizontal first.
    pub const BOTH: [Axis; 2] = [Axis::Horizontal, Axis::Vertical];

    /// The two opposite directions scanned for this axis, in scan order.
    pub fn directions(self) -> [Direction; 2] {
        match self {
            Axis::Horizontal => [Direction::Left, Direction::Right],
            Axis::Vertical => [Direction::Up, Direction::Down],
        }
    }
}

/// Minimum axis run (seed excluded) that counts as a match.
pub const MATCH_RUN: usize = 2;

/// Symbols that differ from the board at a few positions, without touching it.
struct Overlay<'a> {
    board: &'a Board,
    overrides: &'a [((usize, usize), Option<Symbol>)],
}

impl Overlay<'_> {
    fn symbol_at(&self, pos: (usize, usize)) -> Option<Symbol> {
        self.overrides
            .iter()
            .find(|(p, _)| *p == pos)
            .map_or_else(|| self.board.symbol_at(pos.0, pos.1), |(_, s)| *s)
    }

    fn run(&self, x: usize, y: usize, symbol: Symbol, direction: Direction) -> Vec<(usize, usize)> {
        let mut run = Vec::new();
        let mut cursor = self.board.step(x, y, direction);
        while let Some(pos) = cursor {
            if self.symbol_at(pos) != Some(symbol) {
                break;
            }
            run.push(pos);
            cursor = self.board.step(pos.0, pos.1, direction);
        }
        run
    }

    fn axis_run(&self, x: usize, y: usize, symbol: Symbol, axis: Axis) -> Vec<(usize, usize)> {
        axis.directions()
            .iter()
            .flat_map(|&d| self.run(x, y, symbol, d))
            .collect()
    }

    fn creates_match(&self, x: usize, y: usize, symbol: Symbol) -> bool {
        Axis::BOTH
            .iter()
            .any(|&axis| self.axis_run(x, y, symbol, axis).len() >= MATCH_RUN)
    }
}

impl Board {
    fn overlay<'a>(&'a self, overrides: &'a [((usize, usize), Option<Symbol>)]) -> Overlay<'a> {
        Overlay {
            board: self,
            overrides,
        }
    }

    /// Collects the cells showing `symbol` along `direction`, starting one step
    /// away from `(x, y)`.
    ///
    /// The scan stops at the first cell with a different symbol, an empty cell
    /// or the board edge. Cells are ordered by increasing distance from the seed.
    ///
    /// # Examples
    /// ```
    /// use gravity_swap::engine::{Direction, Symbol};
    /// use gravity_swap::utils::board_from_str_array;
    ///
    /// let board = board_from_str_array(&["BAAC"], 3).unwrap();
    /// assert_eq!(board.find_run(0, 0, Symbol(0), Direction::Right), vec![(1, 0), (2, 0)]);
    /// assert!(board.find_run(0, 0, Symbol(0), Direction::Left).is_empty());
    /// ```
    pub fn find_run(
        &self,
        x: usize,
        y: usize,
        symbol: Symbol,
        direction: Direction,
    ) -> Vec<(usize, usize)> {
        self.overlay(&[]).run(x, y, symbol, direction)
    }

    /// Concatenates [`Board::find_run`] for both directions of `axis`.
    ///
    /// For `Horizontal` the left run comes first, for `Vertical` the upper run.
    /// The seed cell is not included.
    pub fn find_matches_along_axis(
        &self,
        x: usize,
        y: usize,
        symbol: Symbol,
        axis: Axis,
    ) -> Vec<(usize, usize)> {
        self.overlay(&[]).axis_run(x, y, symbol, axis)
    }

    /// Tells whether placing `candidate` at `(x, y)` would line up three.
    ///
    /// The board is not modified. The seed cell's own contents are ignored
    /// since the scan starts one step away from it.
    pub fn would_create_match(&self, x: usize, y: usize, candidate: Symbol) -> bool {
        self.overlay(&[]).creates_match(x, y, candidate)
    }

    /// Tells whether exchanging the tiles at `a` and `b` would create a match
    /// at either position.
    ///
    /// Each position is scanned as it would look after the exchange, so the
    /// partner cell counts with its new symbol, not its current one.
    pub fn would_swap_create_match(&self, a: (usize, usize), b: (usize, usize)) -> bool {
        let (sa, sb) = (self.symbol_at(a.0, a.1), self.symbol_at(b.0, b.1));
        let overrides = [(a, sb), (b, sa)];
        let view = self.overlay(&overrides);
        let at_a = sb.is_some_and(|s| view.creates_match(a.0, a.1, s));
        let at_b = sa.is_some_and(|s| view.creates_match(b.0, b.1, s));
        at_a || at_b
    }

    /// Returns `true` if any occupied cell sits in a line of three or more.
    pub fn has_any_match(&self) -> bool {
        self.cells().any(|cell| {
            cell.symbol()
                .is_some_and(|s| self.would_create_match(cell.x(), cell.y(), s))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::board_from_str_array;

    #[test]
    fn test_find_run_stops_at_mismatch_and_empty() {
        let board = board_from_str_array(&["AA.AB"], 3).unwrap();
        assert_eq!(board.find_run(0, 0, Symbol(0), Direction::Right), vec![(1, 0)]);
        assert!(board.find_run(2, 0, Symbol(0), Direction::Right).len() == 1);
        assert!(board.find_run(4, 0, Symbol(0), Direction::Right).is_empty());
    }

    #[test]
    fn test_find_matches_along_axis_orders_and_excludes_seed() {
        let board = board_from_str_array(&[
            "BAB",
            "AAA",
            "CAC",
        ], 3)
        .unwrap();
        let horizontal = board.find_matches_along_axis(1, 1, Symbol(0), Axis::Horizontal);
        assert_eq!(horizontal, vec![(0, 1), (2, 1)]);
        let vertical = board.find_matches_along_axis(1, 1, Symbol(0), Axis::Vertical);
        assert_eq!(vertical, vec![(1, 2), (1, 0)]);
    }

    #[test]
    fn test_would_create_match_both_axes() {
        let board = board_from_str_array(&[
            "A..",
            "A..",
            "BCC",
        ], 3)
        .unwrap();
        // Vertical: two A above (0, 0).
        assert!(board.would_create_match(0, 0, Symbol(0)));
        // Horizontal: C C to the right of (0, 0).
        assert!(board.would_create_match(0, 0, Symbol(2)));
        assert!(!board.would_create_match(0, 0, Symbol(1)));
    }

    #[test]
    fn test_would_create_match_is_side_effect_free() {
        let board = board_from_str_array(&["ABAA", "BABB"], 3).unwrap();
        let before = board.snapshot();
        for _ in 0..10 {
            assert!(board.would_create_match(1, 1, Symbol(0)));
            assert!(!board.would_swap_create_match((0, 0), (3, 0)));
        }
        assert_eq!(board.snapshot(), before);
    }

    #[test]
    fn test_swap_partner_does_not_count_with_old_symbol() {
        // Swapping (0,0)=A with (1,0)=B. Scanning (1,0) with A naively would see
        // the A still sitting at (0,0); after the exchange that cell shows B.
        let board = board_from_str_array(&["ABA"], 3).unwrap();
        assert!(board.would_create_match(1, 0, Symbol(0)));
        assert!(!board.would_swap_create_match((0, 0), (1, 0)));
    }

    #[test]
    fn test_swap_creates_match_at_either_end() {
        let board = board_from_str_array(&[
            "CBC",
            "BAA",
        ], 3)
        .unwrap();
        // Top row becomes B B C: only two in a row.
        assert!(!board.would_swap_create_match((0, 0), (0, 1)));

        let row = board_from_str_array(&["ABAA"], 3).unwrap();
        assert!(row.would_swap_create_match((0, 0), (1, 0)));
        assert!(row.would_swap_create_match((1, 0), (0, 0)));
    }

    #[test]
    fn test_reverse_tiles_match_each_other() {
        let board = board_from_str_array(&["**A*"], 3).unwrap();
        assert!(board.would_swap_create_match((2, 0), (3, 0)));
        assert!(!board.has_any_match());
    }

    #[test]
    fn test_has_any_match() {
        let stable = board_from_str_array(&["ABA", "BAB"], 3).unwrap();
        assert!(!stable.has_any_match());
        let vertical = board_from_str_array(&["AB", "AC", "AB"], 3).unwrap();
        assert!(vertical.has_any_match());
    }
}
