//! Board-wide gravity direction.
//!
//! A single flag shared by collapsing, refilling and sweep ordering. Reverse
//! tiles flip it when they are deactivated.

use crate::engine::Direction;

/// The direction tiles fall toward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Gravity {
    /// Tiles fall toward row 0 and new tiles enter at the top row.
    #[default]
    Down,
    /// Tiles fall toward the top row and new tiles enter at row 0.
    Up,
}

impl Gravity {
    /// Returns the opposite direction.
    pub fn flipped(self) -> Gravity {
        match self {
            Gravity::Down => Gravity::Up,
            Gravity::Up => Gravity::Down,
        }
    }

    /// Row that tiles settle against.
    pub fn sink_edge(self, height: usize) -> usize {
        match self {
            Gravity::Down => 0,
            Gravity::Up => height - 1,
        }
    }

    /// Row where fresh tiles enter a column.
    pub fn source_edge(self, height: usize) -> usize {
        match self {
            Gravity::Down => height - 1,
            Gravity::Up => 0,
        }
    }

    /// Direction a tile moves when it falls.
    pub fn toward_sink(self) -> Direction {
        match self {
            Gravity::Down => Direction::Down,
            Gravity::Up => Direction::Up,
        }
    }

    /// Direction of the upstream neighbor (the one that falls into a gap).
    pub fn toward_source(self) -> Direction {
        self.toward_sink().opposite()
    }

    /// Rows of one column ordered from the sink edge to the source edge.
    pub fn rows_from_sink(self, height: usize) -> impl Iterator<Item = usize> {
        let sink = self.sink_edge(height);
        (0..height).map(move |i| sink.abs_diff(i))
    }
}

/// Holds the current gravity and counts how often it flipped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct GravityController {
    direction: Gravity,
    toggles: u32,
}

impl GravityController {
    /// Current direction.
    pub fn direction(&self) -> Gravity {
        self.direction
    }

    /// Number of flips since the controller was created.
    pub fn toggles(&self) -> u32 {
        self.toggles
    }

    /// Flips the direction and returns the new one.
    pub fn toggle(&mut self) -> Gravity {
        self.direction = self.direction.flipped();
        self.toggles += 1;
        tracing::info!(gravity = ?self.direction, toggles = self.toggles, "gravity flipped");
        self.direction
    }
}
