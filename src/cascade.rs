//! Cascade resolution as a resumable state machine.
//!
//! After a swap the resolver clears matches, lets every column collapse toward
//! the current gravity, refills the source edge, and re-checks the whole board
//! until nothing matches. Conversions queued by long runs are applied once the
//! board is stable. Each call to [`CascadeResolver::step`] performs one unit of
//! work (a clear sweep, a single column shift, a single refill, a conversion
//! batch) so the host can animate between steps.

use crate::engine::{Board, TileKind};
use crate::error::{EngineError, Result};
use crate::matching::{Axis, MATCH_RUN};
use std::mem;

/// A board coordinate `(x, y)`.
pub type Pos = (usize, usize);

/// Where the resolver currently is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum CascadePhase {
    /// Nothing to do; swaps are accepted.
    #[default]
    Idle,
    /// Clearing matches around the swapped cells.
    Clearing,
    /// Shifting one column toward the gravity sink.
    Collapsing,
    /// Filling the source-edge cell vacated by the last shift.
    Refilling,
    /// Sweeping the whole board for matches exposed by the shifts.
    Rechecking,
    /// Applying the queued kind conversions.
    Converting,
}

/// Cells whose kind toggles once the current cascade settles.
///
/// A coordinate is queued at most once; the conversion applies to whatever tile
/// occupies that position when the queue is drained.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PendingConversions {
    cells: Vec<Pos>,
}

impl PendingConversions {
    /// Queues `pos`. Returns `false` if it was already queued.
    pub fn push(&mut self, pos: Pos) -> bool {
        if self.cells.contains(&pos) {
            return false;
        }
        self.cells.push(pos);
        true
    }

    /// Number of queued cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` if nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Queued cells in insertion order.
    pub fn cells(&self) -> &[Pos] {
        &self.cells
    }

    fn take(&mut self) -> Vec<Pos> {
        mem::take(&mut self.cells)
    }
}

/// Result of one [`CascadeResolver::step`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CascadeStep {
    /// Phase whose work this step performed.
    pub phase: CascadePhase,
    /// `true` once the resolver is back to idle.
    pub done: bool,
    /// Cells whose contents changed during this step.
    pub mutated: Vec<Pos>,
}

/// Clears the matches running through `(x, y)`.
///
/// Both axes are scanned with the seed's symbol. Every axis run of at least
/// two cells is deactivated immediately, and a run longer than two queues its
/// first cell for conversion. If any axis matched, the seed itself is
/// deactivated last. An empty seed does nothing.
///
/// # Returns
/// The cleared cells: run cells in scan order, then the seed.
pub fn clear_matches_at(
    board: &mut Board,
    x: usize,
    y: usize,
    pending: &mut PendingConversions,
) -> Vec<Pos> {
    let Some(symbol) = board.symbol_at(x, y) else {
        return Vec::new();
    };

    let mut cleared = Vec::new();
    for axis in Axis::BOTH {
        let run = board.find_matches_along_axis(x, y, symbol, axis);
        if run.len() >= MATCH_RUN {
            for &(rx, ry) in &run {
                if board.deactivate(rx, ry) {
                    cleared.push((rx, ry));
                }
            }
        }
        if run.len() > MATCH_RUN {
            pending.push(run[0]);
        }
    }

    if !cleared.is_empty() {
        board.deactivate(x, y);
        cleared.push((x, y));
    }
    cleared
}

/// Drives clear → collapse → refill → recheck → convert one step at a time.
#[derive(Clone, Debug, Default)]
pub struct CascadeResolver {
    phase: CascadePhase,
    seeds: Vec<Pos>,
    column: usize,
    pending: PendingConversions,
    waves: u32,
}

impl CascadeResolver {
    /// Creates an idle resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    pub fn phase(&self) -> CascadePhase {
        self.phase
    }

    /// `true` while a cascade is in progress.
    pub fn is_busy(&self) -> bool {
        self.phase != CascadePhase::Idle
    }

    /// Conversions queued so far in the running cascade.
    pub fn pending(&self) -> &PendingConversions {
        &self.pending
    }

    /// Number of clearing sweeps that removed tiles since the last start.
    pub fn waves(&self) -> u32 {
        self.waves
    }

    /// Starts a cascade seeded at `seeds` (normally the two swapped cells,
    /// first-selected first).
    ///
    /// # Errors
    /// [`EngineError::Busy`] if a cascade is already running.
    pub fn start(&mut self, seeds: Vec<Pos>) -> Result<()> {
        if self.is_busy() {
            return Err(EngineError::Busy);
        }
        self.seeds = seeds;
        self.waves = 0;
        self.enter(CascadePhase::Clearing);
        Ok(())
    }

    /// Starts a cascade that sweeps the whole board instead of specific seeds.
    ///
    /// Gaps are collapsed and refilled before the first sweep, so a board laid
    /// out with empty cells ends full.
    ///
    /// # Errors
    /// [`EngineError::Busy`] if a cascade is already running.
    pub fn start_sweep(&mut self) -> Result<()> {
        if self.is_busy() {
            return Err(EngineError::Busy);
        }
        self.waves = 0;
        self.column = 0;
        self.enter(CascadePhase::Collapsing);
        Ok(())
    }

    fn enter(&mut self, phase: CascadePhase) {
        tracing::debug!(from = ?self.phase, to = ?phase, "cascade phase");
        self.phase = phase;
    }

    fn begin_collapse(&mut self) {
        self.waves += 1;
        self.column = 0;
        self.enter(CascadePhase::Collapsing);
    }

    /// Performs the next unit of work.
    ///
    /// Phases that turn out to have nothing to do hand over to the next phase
    /// within the same call, so every returned step either mutated at least one
    /// cell or reports `done`.
    pub fn step(&mut self, board: &mut Board) -> CascadeStep {
        loop {
            match self.phase {
                CascadePhase::Idle => return self.report(CascadePhase::Idle, Vec::new()),
                CascadePhase::Clearing => {
                    let mut cleared = Vec::new();
                    for (x, y) in mem::take(&mut self.seeds) {
                        cleared.extend(clear_matches_at(board, x, y, &mut self.pending));
                    }
                    if cleared.is_empty() {
                        self.enter(CascadePhase::Converting);
                        continue;
                    }
                    self.begin_collapse();
                    return self.report(CascadePhase::Clearing, cleared);
                }
                CascadePhase::Collapsing => match self.shift_next_column(board) {
                    Some(shifted) => {
                        self.phase = CascadePhase::Refilling;
                        return self.report(CascadePhase::Collapsing, shifted);
                    }
                    None => self.enter(CascadePhase::Rechecking),
                },
                CascadePhase::Refilling => {
                    let filled = self.refill_column(board);
                    self.phase = CascadePhase::Collapsing;
                    return self.report(CascadePhase::Refilling, vec![filled]);
                }
                CascadePhase::Rechecking => {
                    let cleared = self.sweep(board);
                    if cleared.is_empty() {
                        self.enter(CascadePhase::Converting);
                        continue;
                    }
                    self.begin_collapse();
                    return self.report(CascadePhase::Rechecking, cleared);
                }
                CascadePhase::Converting => {
                    let converted = self.pending.take();
                    if converted.is_empty() {
                        self.enter(CascadePhase::Idle);
                        return self.report(CascadePhase::Converting, Vec::new());
                    }
                    for &(x, y) in &converted {
                        board.convert(x, y);
                    }
                    tracing::debug!(cells = ?converted, "applied conversions");
                    // A converted tile can line up with its neighbors.
                    self.enter(CascadePhase::Rechecking);
                    return self.report(CascadePhase::Converting, converted);
                }
            }
        }
    }

    /// Steps until the resolver is idle and returns how many steps it took.
    pub fn run_to_completion(&mut self, board: &mut Board) -> usize {
        let mut steps = 0;
        loop {
            steps += 1;
            if self.step(board).done {
                return steps;
            }
        }
    }

    fn report(&self, phase: CascadePhase, mutated: Vec<Pos>) -> CascadeStep {
        CascadeStep {
            phase,
            done: !self.is_busy(),
            mutated,
        }
    }

    /// Shifts the first gap of the current column one cell toward the sink.
    ///
    /// Columns without gaps are skipped. Returns `None` once every column is
    /// gap-free.
    fn shift_next_column(&mut self, board: &mut Board) -> Option<Vec<Pos>> {
        let gravity = board.gravity();
        let upstream = gravity.toward_source();
        while self.column < board.width() {
            let x = self.column;
            let gap = gravity
                .rows_from_sink(board.height())
                .find(|&y| board.cell(x, y).is_empty());
            if let Some(gap) = gap {
                let mut shifted = Vec::new();
                let mut y = gap;
                while let Some((_, from)) = board.step(x, y, upstream) {
                    let source = *board.cell(x, from);
                    board.write(x, y, source.symbol(), source.kind());
                    shifted.push((x, y));
                    y = from;
                }
                board.write(x, y, None, TileKind::Normal);
                shifted.push((x, y));
                tracing::trace!(column = x, gap, ?gravity, "shifted column");
                return Some(shifted);
            }
            self.column += 1;
        }
        None
    }

    fn refill_column(&mut self, board: &mut Board) -> Pos {
        let x = self.column;
        let y = board.gravity().source_edge(board.height());
        let symbol = board.refill_symbol(x, y);
        board.write(x, y, Some(symbol), TileKind::Normal);
        tracing::trace!(x, y, symbol = %symbol.to_char(), "refilled");
        (x, y)
    }

    /// Runs the clearing rule with every cell as seed, columns left to right
    /// and each column from the sink edge up.
    fn sweep(&mut self, board: &mut Board) -> Vec<Pos> {
        let mut cleared = Vec::new();
        for x in 0..board.width() {
            for y in board.gravity().rows_from_sink(board.height()) {
                cleared.extend(clear_matches_at(board, x, y, &mut self.pending));
            }
        }
        cleared
    }
}
