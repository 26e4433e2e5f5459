//! Core grid model for the gravity-swap puzzle.
//!
//! This module defines the game's fundamental components:
//! - `Symbol`: An opaque tile identifier drawn from a finite palette.
//! - `TileKind`: The behavior attached to a tile (`Normal` or `Reverse`), which
//!   governs what happens when the tile is deactivated or converted.
//! - `Cell`: One position on the board with its current symbol and kind.
//! - `Board`: The fixed-size grid of cells, the gravity controller and the random
//!   source used to generate new symbols.
//!
//! Coordinates are `(x, y)` with `x` the column (left to right) and `y` the row
//! (bottom to top). Cells never point at each other; every neighbor lookup is
//! coordinate arithmetic through the `Board`.
use crate::error::{EngineError, Result};
use crate::gravity::{Gravity, GravityController};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::fmt;

/// Smallest palette that can fill a board without adjacent duplicates.
pub const MIN_PALETTE_SIZE: usize = 2;

/// Largest palette; every normal symbol renders as one of `A..=Z`.
pub const MAX_PALETTE_SIZE: usize = 26;

/// An opaque tile identifier.
///
/// Normal symbols are indices `0..palette_size`. Reverse tiles all carry the
/// dedicated [`Symbol::REVERSE`] value, so they match each other like any other
/// symbol but never match a normal tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(pub u8);

impl Symbol {
    /// Symbol shown by every Reverse tile.
    pub const REVERSE: Symbol = Symbol(u8::MAX);

    /// Returns `true` for the Reverse tile symbol.
    pub fn is_reverse(self) -> bool {
        self == Symbol::REVERSE
    }

    /// Converts the symbol to its character representation.
    ///
    /// Normal symbols map to `A`, `B`, `C`, ... and the Reverse symbol to `*`.
    /// Values past `Z` that no palette can hold render as `?`.
    ///
    /// # Examples
    ///
    /// ```
    /// use gravity_swap::engine::Symbol;
    /// assert_eq!(Symbol(0).to_char(), 'A');
    /// assert_eq!(Symbol(2).to_char(), 'C');
    /// assert_eq!(Symbol::REVERSE.to_char(), '*');
    /// assert_eq!(Symbol(200).to_char(), '?');
    /// ```
    pub fn to_char(self) -> char {
        if self.is_reverse() {
            '*'
        } else if usize::from(self.0) < MAX_PALETTE_SIZE {
            char::from(b'A' + self.0)
        } else {
            '?'
        }
    }
}

/// Behavior attached to a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum TileKind {
    /// A plain tile; deactivation only clears it.
    #[default]
    Normal,
    /// Clearing this tile flips the board's gravity.
    Reverse,
}

/// One of the four cardinal directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Toward the top row (`y + 1`).
    Up,
    /// Toward row 0 (`y - 1`).
    Down,
    /// Toward column 0 (`x - 1`).
    Left,
    /// Toward the last column (`x + 1`).
    Right,
}

impl Direction {
    /// All four directions, in the order adjacency is usually reported.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Column and row delta of one step in this direction.
    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::Up => (0, 1),
            Direction::Down => (0, -1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// The direction pointing the other way.
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// A single position on the board.
///
/// The position is fixed for the lifetime of the board; only the symbol and
/// kind change as tiles are cleared, shifted, refilled and converted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    x: usize,
    y: usize,
    symbol: Option<Symbol>,
    kind: TileKind,
}

impl Cell {
    fn empty(x: usize, y: usize) -> Self {
        Cell {
            x,
            y,
            symbol: None,
            kind: TileKind::Normal,
        }
    }

    /// Column of this cell.
    pub fn x(&self) -> usize {
        self.x
    }

    /// Row of this cell.
    pub fn y(&self) -> usize {
        self.y
    }

    /// `(x, y)` of this cell.
    pub fn position(&self) -> (usize, usize) {
        (self.x, self.y)
    }

    /// Current symbol, or `None` if the cell is empty.
    pub fn symbol(&self) -> Option<Symbol> {
        self.symbol
    }

    /// Current kind. Meaningless while the cell is empty.
    pub fn kind(&self) -> TileKind {
        self.kind
    }

    /// Returns `true` if the cell holds no tile.
    pub fn is_empty(&self) -> bool {
        self.symbol.is_none()
    }

    /// Character used by the text rendering: `.` for empty, `*` for Reverse.
    pub fn to_char(&self) -> char {
        self.symbol.map_or('.', Symbol::to_char)
    }
}

/// The game board: a fixed `width × height` grid of cells.
///
/// The board also owns the gravity controller and a seeded random number
/// generator, so a board created with [`Board::with_seed`] always evolves the
/// same way for the same sequence of operations.
#[derive(Clone, Debug)]
pub struct Board {
    width: usize,
    height: usize,
    palette_size: usize,
    cells: Vec<Cell>, // column-major: index = x * height + y
    gravity: GravityController,
    rng: SmallRng,
}

impl Board {
    /// Creates a board filled with random symbols, seeded from OS entropy.
    ///
    /// See [`Board::with_seed`] for the fill rule and the validation performed.
    pub fn new(width: usize, height: usize, palette_size: usize) -> Result<Self> {
        Self::build(width, height, palette_size, SmallRng::from_entropy())
    }

    /// Creates a board filled with random symbols using a fixed seed.
    ///
    /// Cells are filled column by column (left to right, bottom to top). Each
    /// cell receives a symbol that differs from its left neighbor and the
    /// neighbor below it, both of which are already placed, so no two
    /// orthogonally adjacent cells share a symbol when the board is created.
    ///
    /// # Arguments
    /// * `width`, `height`: Board dimensions, both at least 1.
    /// * `palette_size`: Number of normal symbols, between [`MIN_PALETTE_SIZE`]
    ///   and [`MAX_PALETTE_SIZE`].
    /// * `seed`: Seed for the board's random number generator.
    ///
    /// # Errors
    /// [`EngineError::InvalidDimensions`] or [`EngineError::InvalidPalette`]
    /// when the configuration cannot produce a playable board.
    ///
    /// # Examples
    /// ```
    /// use gravity_swap::engine::Board;
    /// let a = Board::with_seed(6, 6, 4, 7).unwrap();
    /// let b = Board::with_seed(6, 6, 4, 7).unwrap();
    /// assert_eq!(a.snapshot(), b.snapshot());
    /// assert!(Board::with_seed(0, 6, 4, 7).is_err());
    /// assert!(Board::with_seed(6, 6, 1, 7).is_err());
    /// ```
    pub fn with_seed(
        width: usize,
        height: usize,
        palette_size: usize,
        seed: u64,
    ) -> Result<Self> {
        Self::build(width, height, palette_size, SmallRng::seed_from_u64(seed))
    }

    /// Creates a board where every cell is empty.
    ///
    /// Used to lay out fixed boards (see [`crate::utils::board_from_str_array`]);
    /// the caller is expected to fill every cell with [`Board::set`].
    pub fn new_empty(
        width: usize,
        height: usize,
        palette_size: usize,
        seed: u64,
    ) -> Result<Self> {
        validate(width, height, palette_size)?;
        let mut cells = Vec::with_capacity(width * height);
        for x in 0..width {
            for y in 0..height {
                cells.push(Cell::empty(x, y));
            }
        }
        Ok(Board {
            width,
            height,
            palette_size,
            cells,
            gravity: GravityController::default(),
            rng: SmallRng::seed_from_u64(seed),
        })
    }

    fn build(width: usize, height: usize, palette_size: usize, rng: SmallRng) -> Result<Self> {
        let mut board = Self::new_empty(width, height, palette_size, 0)?;
        board.rng = rng;
        for x in 0..width {
            for y in 0..height {
                let symbol = board.initial_symbol(x, y);
                board.write(x, y, Some(symbol), TileKind::Normal);
            }
        }
        Ok(board)
    }

    /// Board width (number of columns).
    pub fn width(&self) -> usize {
        self.width
    }

    /// Board height (number of rows).
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of normal symbols in the palette.
    pub fn palette_size(&self) -> usize {
        self.palette_size
    }

    /// Current gravity direction.
    pub fn gravity(&self) -> Gravity {
        self.gravity.direction()
    }

    /// How many times gravity flipped since the board was created.
    pub fn gravity_toggles(&self) -> u32 {
        self.gravity.toggles()
    }

    /// Returns `true` if `(x, y)` lies on the board.
    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    fn check(&self, x: usize, y: usize) -> Result<()> {
        if self.in_bounds(x, y) {
            Ok(())
        } else {
            Err(EngineError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            })
        }
    }

    fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(self.in_bounds(x, y), "({}, {}) out of bounds", x, y);
        x * self.height + y
    }

    /// Returns the cell at `(x, y)`.
    ///
    /// # Errors
    /// [`EngineError::OutOfBounds`] if the coordinate is off the board.
    pub fn get(&self, x: usize, y: usize) -> Result<&Cell> {
        self.check(x, y)?;
        Ok(self.cell(x, y))
    }

    /// Replaces the contents of the cell at `(x, y)`.
    ///
    /// # Errors
    /// * [`EngineError::OutOfBounds`] if the coordinate is off the board.
    /// * [`EngineError::SymbolOutsidePalette`] for a normal symbol the palette
    ///   does not hold. [`Symbol::REVERSE`] is always accepted.
    pub fn set(
        &mut self,
        x: usize,
        y: usize,
        symbol: Option<Symbol>,
        kind: TileKind,
    ) -> Result<()> {
        self.check(x, y)?;
        if let Some(s) = symbol.filter(|s| !s.is_reverse()) {
            if usize::from(s.0) >= self.palette_size {
                return Err(EngineError::SymbolOutsidePalette {
                    symbol: s.0,
                    palette_size: self.palette_size,
                });
            }
        }
        self.write(x, y, symbol, kind);
        Ok(())
    }

    /// Returns the neighbor of `(x, y)` in `direction`, or `None` past an edge.
    pub fn neighbor(&self, x: usize, y: usize, direction: Direction) -> Option<&Cell> {
        self.step(x, y, direction).map(|(nx, ny)| self.cell(nx, ny))
    }

    /// Coordinate one step from `(x, y)` in `direction`, if it is on the board.
    pub fn step(&self, x: usize, y: usize, direction: Direction) -> Option<(usize, usize)> {
        let (dx, dy) = direction.offset();
        let nx = x.checked_add_signed(dx)?;
        let ny = y.checked_add_signed(dy)?;
        if self.in_bounds(nx, ny) {
            Some((nx, ny))
        } else {
            None
        }
    }

    /// Returns `true` if the two coordinates are orthogonal neighbors.
    pub fn are_adjacent(&self, a: (usize, usize), b: (usize, usize)) -> bool {
        Direction::ALL
            .iter()
            .any(|&d| self.step(a.0, a.1, d) == Some(b))
    }

    /// Iterates over every cell in column-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Copies every cell, column-major. Handy for comparing board states.
    pub fn snapshot(&self) -> Vec<Cell> {
        self.cells.clone()
    }

    /// Number of empty cells.
    pub fn count_empty(&self) -> usize {
        self.cells.iter().filter(|c| c.is_empty()).count()
    }

    /// Returns `true` if no cell is empty.
    pub fn is_full(&self) -> bool {
        self.count_empty() == 0
    }

    pub(crate) fn cell(&self, x: usize, y: usize) -> &Cell {
        &self.cells[self.index(x, y)]
    }

    pub(crate) fn symbol_at(&self, x: usize, y: usize) -> Option<Symbol> {
        self.cell(x, y).symbol
    }

    pub(crate) fn write(&mut self, x: usize, y: usize, symbol: Option<Symbol>, kind: TileKind) {
        let idx = self.index(x, y);
        let cell = &mut self.cells[idx];
        cell.symbol = symbol;
        cell.kind = kind;
    }

    /// Exchanges the contents (symbol and kind) of two cells.
    pub(crate) fn swap_contents(&mut self, a: (usize, usize), b: (usize, usize)) {
        let first = *self.cell(a.0, a.1);
        let second = *self.cell(b.0, b.1);
        self.write(a.0, a.1, second.symbol, second.kind);
        self.write(b.0, b.1, first.symbol, first.kind);
    }

    /// Clears the tile at `(x, y)` according to its kind.
    ///
    /// A Normal tile only loses its symbol. A Reverse tile loses its symbol and
    /// flips the board's gravity. The emptied cell's kind resets to `Normal`.
    ///
    /// # Returns
    /// `true` if a tile was cleared, `false` if the cell was already empty (in
    /// which case gravity is left alone).
    pub(crate) fn deactivate(&mut self, x: usize, y: usize) -> bool {
        let cell = *self.cell(x, y);
        if cell.is_empty() {
            return false;
        }
        self.write(x, y, None, TileKind::Normal);
        match cell.kind {
            TileKind::Normal => {}
            TileKind::Reverse => {
                self.gravity.toggle();
            }
        }
        true
    }

    /// Toggles the kind of the tile at `(x, y)` and reassigns its symbol.
    ///
    /// Normal becomes Reverse and shows [`Symbol::REVERSE`]. Reverse becomes
    /// Normal with a fresh symbol that differs from its left and lower
    /// neighbors when the palette allows it.
    pub(crate) fn convert(&mut self, x: usize, y: usize) {
        match self.cell(x, y).kind {
            TileKind::Normal => self.write(x, y, Some(Symbol::REVERSE), TileKind::Reverse),
            TileKind::Reverse => {
                let symbol = self.initial_symbol(x, y);
                self.write(x, y, Some(symbol), TileKind::Normal);
            }
        }
    }

    /// Picks a symbol for `(x, y)` that differs from the cells to its left and
    /// below (fixed geometry, independent of gravity).
    pub(crate) fn initial_symbol(&mut self, x: usize, y: usize) -> Symbol {
        let excluded = [
            self.neighbor(x, y, Direction::Left).and_then(Cell::symbol),
            self.neighbor(x, y, Direction::Down).and_then(Cell::symbol),
        ];
        self.random_symbol_excluding(&excluded)
            .unwrap_or_else(|| self.random_symbol())
    }

    /// Picks a symbol for a tile entering at `(x, y)` from the source edge.
    ///
    /// The symbol avoids the horizontal neighbors and the cell it lands on
    /// (the neighbor toward the sink). With a small palette the horizontal
    /// constraints are dropped first, then all constraints.
    pub(crate) fn refill_symbol(&mut self, x: usize, y: usize) -> Symbol {
        let below = self
            .neighbor(x, y, self.gravity().toward_sink())
            .and_then(Cell::symbol);
        let all = [
            self.neighbor(x, y, Direction::Left).and_then(Cell::symbol),
            self.neighbor(x, y, Direction::Right).and_then(Cell::symbol),
            below,
        ];
        if let Some(symbol) = self.random_symbol_excluding(&all) {
            return symbol;
        }
        self.random_symbol_excluding(&[below])
            .unwrap_or_else(|| self.random_symbol())
    }

    fn random_symbol(&mut self) -> Symbol {
        Symbol(self.rng.gen_range(0..self.palette_size) as u8)
    }

    fn random_symbol_excluding(&mut self, excluded: &[Option<Symbol>]) -> Option<Symbol> {
        let candidates: Vec<Symbol> = (0..self.palette_size as u8)
            .map(Symbol)
            .filter(|s| !excluded.contains(&Some(*s)))
            .collect();
        candidates.choose(&mut self.rng).copied()
    }

    /// Renders the board with an optional highlighted cell.
    ///
    /// The top row is printed first. Column numbers head the output and every
    /// line starts with its row number. The highlighted cell is wrapped in
    /// brackets, e.g. `[B]`.
    ///
    /// # Arguments
    /// * `pos`: `Some((x, y))` to highlight a cell, `None` for a plain render.
    pub fn to_string_with_highlight(&self, pos: Option<(usize, usize)>) -> String {
        let mut output = String::new();

        output.push_str("   ");
        for x in 0..self.width {
            output.push_str(&format!("{:^3}", x));
        }
        output.push('\n');

        for y in (0..self.height).rev() {
            output.push_str(&format!("{:<3}", y));
            for x in 0..self.width {
                let c = self.cell(x, y).to_char();
                if pos == Some((x, y)) {
                    output.push_str(&format!("[{}]", c));
                } else {
                    output.push_str(&format!(" {} ", c));
                }
            }
            if y > 0 {
                output.push('\n');
            }
        }

        output
    }
}

fn validate(width: usize, height: usize, palette_size: usize) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(EngineError::InvalidDimensions { width, height });
    }
    if !(MIN_PALETTE_SIZE..=MAX_PALETTE_SIZE).contains(&palette_size) {
        return Err(EngineError::InvalidPalette {
            size: palette_size,
            min: MIN_PALETTE_SIZE,
            max: MAX_PALETTE_SIZE,
        });
    }
    Ok(())
}

impl fmt::Display for Board {
    /// Formats the board using `to_string_with_highlight(None)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_string_with_highlight(None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::board_from_str_array;

    fn assert_no_adjacent_duplicates(board: &Board) {
        for cell in board.cells() {
            for dir in [Direction::Right, Direction::Up] {
                if let Some(n) = board.neighbor(cell.x(), cell.y(), dir) {
                    assert_ne!(
                        cell.symbol(),
                        n.symbol(),
                        "({}, {}) repeats its {:?} neighbor",
                        cell.x(),
                        cell.y(),
                        dir
                    );
                }
            }
        }
    }

    #[test]
    fn test_new_board_is_full_and_has_no_adjacent_duplicates() {
        for seed in 0..20 {
            let board = Board::with_seed(8, 7, 3, seed).unwrap();
            assert!(board.is_full());
            assert_no_adjacent_duplicates(&board);
            assert!(board
                .cells()
                .all(|c| c.kind() == TileKind::Normal && !c.symbol().unwrap().is_reverse()));
        }
    }

    #[test]
    fn test_two_symbol_palette_still_fills() {
        let board = Board::with_seed(5, 5, 2, 99).unwrap();
        assert!(board.is_full());
        assert_no_adjacent_duplicates(&board);
    }

    #[test]
    fn test_with_seed_determinism() {
        let a = Board::with_seed(6, 6, 5, 123).unwrap();
        let b = Board::with_seed(6, 6, 5, 123).unwrap();
        let c = Board::with_seed(6, 6, 5, 124).unwrap();
        assert_eq!(a.snapshot(), b.snapshot(), "same seed must give the same board");
        assert_ne!(a.snapshot(), c.snapshot(), "different seeds should differ");
    }

    #[test]
    fn test_invalid_configuration_fails_fast() {
        assert_eq!(
            Board::with_seed(0, 4, 3, 1).unwrap_err(),
            EngineError::InvalidDimensions { width: 0, height: 4 }
        );
        assert!(matches!(
            Board::with_seed(4, 4, 1, 1),
            Err(EngineError::InvalidPalette { size: 1, .. })
        ));
        assert!(matches!(
            Board::with_seed(4, 4, MAX_PALETTE_SIZE + 1, 1),
            Err(EngineError::InvalidPalette { .. })
        ));
    }

    #[test]
    fn test_get_and_set_bounds() {
        let mut board = Board::with_seed(3, 2, 3, 5).unwrap();
        assert!(board.get(2, 1).is_ok());
        assert_eq!(
            board.get(3, 0).unwrap_err(),
            EngineError::OutOfBounds { x: 3, y: 0, width: 3, height: 2 }
        );
        assert!(board.set(0, 2, None, TileKind::Normal).is_err());

        board.set(1, 1, Some(Symbol(2)), TileKind::Reverse).unwrap();
        let cell = board.get(1, 1).unwrap();
        assert_eq!(cell.position(), (1, 1));
        assert_eq!(cell.symbol(), Some(Symbol(2)));
        assert_eq!(cell.kind(), TileKind::Reverse);
    }

    #[test]
    fn test_set_rejects_symbols_outside_palette() {
        let mut board = Board::with_seed(3, 2, 3, 5).unwrap();
        let before = board.snapshot();
        assert_eq!(
            board.set(0, 0, Some(Symbol(200)), TileKind::Normal),
            Err(EngineError::SymbolOutsidePalette { symbol: 200, palette_size: 3 })
        );
        assert!(board.set(0, 0, Some(Symbol(3)), TileKind::Normal).is_err());
        assert_eq!(board.snapshot(), before);

        board.set(0, 0, Some(Symbol(2)), TileKind::Normal).unwrap();
        board.set(1, 0, Some(Symbol::REVERSE), TileKind::Reverse).unwrap();
        let rendered = format!("{}", board);
        assert!(rendered.contains(" C  * "));
    }

    #[test]
    fn test_symbol_to_char_is_total() {
        assert_eq!(Symbol(25).to_char(), 'Z');
        assert_eq!(Symbol(26).to_char(), '?');
        assert_eq!(Symbol(254).to_char(), '?');
        assert_eq!(Symbol::REVERSE.to_char(), '*');
    }

    #[test]
    fn test_neighbor_stops_at_edges() {
        let board = Board::with_seed(3, 3, 3, 1).unwrap();
        assert!(board.neighbor(0, 0, Direction::Left).is_none());
        assert!(board.neighbor(0, 0, Direction::Down).is_none());
        assert!(board.neighbor(2, 2, Direction::Right).is_none());
        assert!(board.neighbor(2, 2, Direction::Up).is_none());
        assert_eq!(board.neighbor(1, 1, Direction::Up).unwrap().position(), (1, 2));
        assert_eq!(board.neighbor(1, 1, Direction::Left).unwrap().position(), (0, 1));
    }

    #[test]
    fn test_are_adjacent() {
        let board = Board::with_seed(3, 3, 3, 1).unwrap();
        assert!(board.are_adjacent((0, 0), (1, 0)));
        assert!(board.are_adjacent((1, 1), (1, 0)));
        assert!(!board.are_adjacent((0, 0), (1, 1)));
        assert!(!board.are_adjacent((0, 0), (2, 0)));
        assert!(!board.are_adjacent((1, 1), (1, 1)));
    }

    #[test]
    fn test_deactivate_normal_and_reverse() {
        let mut board = board_from_str_array(&["A*", "BC"], 3).unwrap();
        assert_eq!(board.gravity(), Gravity::Down);

        assert!(board.deactivate(0, 0)); // B
        assert_eq!(board.gravity(), Gravity::Down);
        assert!(board.get(0, 0).unwrap().is_empty());

        assert!(board.deactivate(1, 1)); // *
        assert_eq!(board.gravity(), Gravity::Up);
        assert_eq!(board.gravity_toggles(), 1);
        assert_eq!(board.get(1, 1).unwrap().kind(), TileKind::Normal);

        // Already empty: nothing happens, in particular no second flip.
        assert!(!board.deactivate(1, 1));
        assert_eq!(board.gravity_toggles(), 1);
    }

    #[test]
    fn test_convert_toggles_kind() {
        let mut board = board_from_str_array(&["AB", "BA"], 3).unwrap();
        board.convert(1, 1);
        let cell = *board.get(1, 1).unwrap();
        assert_eq!(cell.kind(), TileKind::Reverse);
        assert_eq!(cell.symbol(), Some(Symbol::REVERSE));

        board.convert(1, 1);
        let cell = *board.get(1, 1).unwrap();
        assert_eq!(cell.kind(), TileKind::Normal);
        let symbol = cell.symbol().unwrap();
        assert!(!symbol.is_reverse());
        // Left is A, below is A: the only free symbols are B and C.
        assert_ne!(symbol, Symbol(0));
    }

    #[test]
    fn test_swap_contents_keeps_positions() {
        let mut board = board_from_str_array(&["A*"], 3).unwrap();
        board.swap_contents((0, 0), (1, 0));
        assert_eq!(board.get(0, 0).unwrap().kind(), TileKind::Reverse);
        assert_eq!(board.get(1, 0).unwrap().symbol(), Some(Symbol(0)));
        assert_eq!(board.get(1, 0).unwrap().position(), (1, 0));
    }

    #[test]
    fn test_refill_symbol_avoids_neighbors() {
        // Top row: A . B, the cell below the gap is C.
        let mut board = board_from_str_array(&["A.B", "BCA"], 4).unwrap();
        for _ in 0..50 {
            let s = board.refill_symbol(1, 1);
            assert_eq!(s, Symbol(3), "only D differs from A, B and C");
        }
    }

    #[test]
    fn test_display_board_formatting() {
        let board = board_from_str_array(&["AB*", "C.A"], 3).unwrap();
        let display_str = format!("{}", board);
        println!("---Board Display Test:\n{}---", display_str);
        assert_eq!(display_str.lines().count(), 3);
        assert!(display_str.lines().nth(1).unwrap().contains(" A  B  * "));
        assert!(display_str.lines().nth(2).unwrap().contains(" C  .  A "));

        let highlighted = board.to_string_with_highlight(Some((2, 0)));
        assert!(highlighted.contains("[A]"));
    }
}
