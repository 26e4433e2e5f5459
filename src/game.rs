//! Session facade driven by a presentation host.
//!
//! `Game` bundles one `Board` with the `CascadeResolver` that mutates it. The
//! host requests swaps, then calls [`Game::step_cascade`] once per animation
//! tick until the returned step reports `done`.

use crate::cascade::{CascadeResolver, CascadeStep, Pos};
use crate::engine::{Board, Cell};
use crate::error::{EngineError, Result};
use crate::gravity::Gravity;

/// Why a well-formed swap request was turned down.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SwapRejection {
    /// The two cells are not orthogonal neighbors (or are the same cell).
    NotAdjacent,
    /// One of the cells holds no tile.
    EmptyCell,
    /// Exchanging the tiles would not line up three at either position.
    NoMatch,
}

/// Outcome of [`Game::request_swap`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SwapOutcome {
    /// The swap was committed and a cascade started.
    Accepted,
    /// Nothing changed.
    Rejected(SwapRejection),
}

impl SwapOutcome {
    /// `true` for [`SwapOutcome::Accepted`].
    pub fn is_accepted(&self) -> bool {
        matches!(self, SwapOutcome::Accepted)
    }
}

/// Manages one board and its cascade resolver.
///
/// # Examples
/// ```
/// use gravity_swap::game::Game;
/// use gravity_swap::hints::find_valid_swaps;
///
/// let mut game = Game::with_seed(8, 8, 5, 42).unwrap();
/// if let Some(swap) = find_valid_swaps(game.board()).first().copied() {
///     let outcome = game.request_swap(swap.a.0, swap.a.1, swap.b.0, swap.b.1).unwrap();
///     assert!(outcome.is_accepted());
///     while !game.step_cascade().done {}
/// }
/// assert!(!game.is_busy());
/// assert!(game.board().is_full());
/// ```
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    resolver: CascadeResolver,
    swaps: u32,
    cascade_steps: u64,
}

impl Game {
    /// Creates a game on a fresh random board seeded from OS entropy.
    ///
    /// # Errors
    /// Fails fast with [`EngineError::InvalidDimensions`] or
    /// [`EngineError::InvalidPalette`] on an unusable configuration.
    pub fn initialize(width: usize, height: usize, palette_size: usize) -> Result<Self> {
        Ok(Self::from_board(Board::new(width, height, palette_size)?))
    }

    /// Creates a game on a reproducible random board.
    pub fn with_seed(width: usize, height: usize, palette_size: usize, seed: u64) -> Result<Self> {
        Ok(Self::from_board(Board::with_seed(width, height, palette_size, seed)?))
    }

    /// Creates a game on an existing board.
    pub fn from_board(board: Board) -> Self {
        Game {
            board,
            resolver: CascadeResolver::new(),
            swaps: 0,
            cascade_steps: 0,
        }
    }

    /// The board, read-only.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The resolver, read-only (phase, pending conversions, waves).
    pub fn resolver(&self) -> &CascadeResolver {
        &self.resolver
    }

    /// Snapshot of the cell at `(x, y)`.
    ///
    /// # Errors
    /// [`EngineError::OutOfBounds`] if the coordinate is off the board.
    pub fn get_cell(&self, x: usize, y: usize) -> Result<Cell> {
        self.board.get(x, y).copied()
    }

    /// `true` while a cascade is running; swaps are refused meanwhile.
    pub fn is_busy(&self) -> bool {
        self.resolver.is_busy()
    }

    /// Current gravity direction.
    pub fn gravity(&self) -> Gravity {
        self.board.gravity()
    }

    /// Number of accepted swaps.
    pub fn swaps(&self) -> u32 {
        self.swaps
    }

    /// Number of cascade steps performed over the whole session.
    pub fn cascade_steps(&self) -> u64 {
        self.cascade_steps
    }

    /// Attempts to swap the tiles at `(x1, y1)` and `(x2, y2)`.
    ///
    /// `(x1, y1)` is the first-selected cell; it is also the first cascade seed.
    /// The swap is validated without touching the board and only committed
    /// if it lines up three at either position.
    ///
    /// # Errors
    /// * [`EngineError::OutOfBounds`] if either coordinate is off the board.
    /// * [`EngineError::Busy`] while a cascade is still running.
    ///
    /// Non-adjacent cells, empty cells and swaps without a match come back as
    /// [`SwapOutcome::Rejected`] with the board unchanged.
    pub fn request_swap(
        &mut self,
        x1: usize,
        y1: usize,
        x2: usize,
        y2: usize,
    ) -> Result<SwapOutcome> {
        let first = *self.board.get(x1, y1)?;
        let second = *self.board.get(x2, y2)?;
        if self.is_busy() {
            return Err(EngineError::Busy);
        }

        let (a, b): (Pos, Pos) = ((x1, y1), (x2, y2));
        let rejection = if !self.board.are_adjacent(a, b) {
            Some(SwapRejection::NotAdjacent)
        } else if first.is_empty() || second.is_empty() {
            Some(SwapRejection::EmptyCell)
        } else if !self.board.would_swap_create_match(a, b) {
            Some(SwapRejection::NoMatch)
        } else {
            None
        };
        if let Some(reason) = rejection {
            tracing::debug!(?a, ?b, ?reason, "swap rejected");
            return Ok(SwapOutcome::Rejected(reason));
        }

        self.board.swap_contents(a, b);
        self.resolver.start(vec![a, b])?;
        self.swaps += 1;
        tracing::debug!(?a, ?b, swaps = self.swaps, "swap accepted");
        Ok(SwapOutcome::Accepted)
    }

    /// Advances the running cascade by one step.
    ///
    /// Calling this while idle is harmless and reports `done`.
    pub fn step_cascade(&mut self) -> CascadeStep {
        let step = self.resolver.step(&mut self.board);
        if !step.mutated.is_empty() {
            self.cascade_steps += 1;
        }
        step
    }

    /// Steps the cascade until it is done and returns every step taken.
    pub fn resolve(&mut self) -> Vec<CascadeStep> {
        let mut steps = Vec::new();
        loop {
            let step = self.step_cascade();
            let done = step.done;
            steps.push(step);
            if done {
                return steps;
            }
        }
    }

    /// Sweeps the whole board and resolves whatever it finds.
    ///
    /// Useful for boards laid out by hand, which may start with matches or
    /// empty cells. Gaps are collapsed and refilled first.
    ///
    /// # Errors
    /// [`EngineError::Busy`] while a cascade is still running.
    pub fn settle(&mut self) -> Result<Vec<CascadeStep>> {
        self.resolver.start_sweep()?;
        Ok(self.resolve())
    }
}
