//! Error type shared by every fallible board operation.

use thiserror::Error;

/// Errors reported by the engine.
///
/// Rejected-but-valid requests (a swap of non-adjacent cells, a swap that would
/// not create a match) are not errors; they come back as
/// [`SwapOutcome::Rejected`](crate::game::SwapOutcome::Rejected).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A coordinate lies outside the board.
    #[error("coordinate ({x}, {y}) is outside the {width}x{height} board")]
    OutOfBounds {
        /// Column that was requested.
        x: usize,
        /// Row that was requested.
        y: usize,
        /// Board width.
        width: usize,
        /// Board height.
        height: usize,
    },

    /// A swap was requested while a cascade is still resolving.
    #[error("the board is busy resolving a cascade")]
    Busy,

    /// The board dimensions cannot hold a single cell.
    #[error("invalid board dimensions {width}x{height}: both must be at least 1")]
    InvalidDimensions {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
    },

    /// The palette is too small to avoid matches, or too large to render.
    #[error("invalid palette size {size}: expected between {min} and {max}")]
    InvalidPalette {
        /// Requested palette size.
        size: usize,
        /// Smallest accepted palette.
        min: usize,
        /// Largest accepted palette.
        max: usize,
    },

    /// A normal symbol does not belong to the board's palette.
    #[error("symbol {symbol} is outside a palette of {palette_size}")]
    SymbolOutsidePalette {
        /// Raw symbol value.
        symbol: u8,
        /// Number of normal symbols on the board.
        palette_size: usize,
    },

    /// A text board could not be parsed.
    #[error("invalid board text at row {row} col {col}: {reason}")]
    Parse {
        /// Row index in the input (0 = first line, the top of the board).
        row: usize,
        /// Character index within the row.
        col: usize,
        /// What went wrong.
        reason: String,
    },
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, EngineError>;
