//! # Gravity Swap Library
//!
//! This library provides the rule engine of a grid tile-matching puzzle: the
//! player swaps two adjacent tiles, lines of three or more are cleared, and the
//! remaining tiles fall toward the current gravity while new ones are generated
//! at the opposite edge. Clearing a Reverse tile flips gravity.
//!
//! It is used by two binaries:
//! - `human_player`: Allows interactive play via the command line, printing
//!   each cascade step.
//! - `autoplay`: Plays random legal swaps on a configured board and logs what
//!   every cascade did.
//!
//! ## Modules
//! - `engine`: The board representation (`Board`, `Cell`, `Symbol`, `TileKind`)
//!   and symbol generation.
//! - `gravity`: Gravity direction and the controller toggled by Reverse tiles.
//! - `matching`: Run detection and swap validation.
//! - `cascade`: The step-wise clear/collapse/refill/convert state machine.
//! - `game`: The `Game` facade a host drives.
//! - `hints`: Legal-move search for hints and dead-lock detection.
//! - `config`: Host configuration loading.
//! - `utils`: Parsing boards from strings.
//! - `error`: The crate's error type.

pub mod cascade;
pub mod config;
pub mod engine;
pub mod error;
pub mod game;
pub mod gravity;
pub mod hints;
pub mod matching;
pub mod utils;

pub use error::{EngineError, Result};
