use crate::engine::{Board, Symbol, TileKind, MAX_PALETTE_SIZE};
use crate::error::{EngineError, Result};

/// Seed given to boards parsed from text, so their refills are reproducible.
pub const PARSED_BOARD_SEED: u64 = 514514;

/// Parses an array of string slices into a `Board`.
///
/// Each string slice is one row, listed from the top of the board down: the
/// first string becomes row `height - 1`, the last string row 0. All rows must
/// have the same length, which becomes the board width.
///
/// Valid characters are:
/// - `A`..`Z`: the normal symbol with that index (`A` is `Symbol(0)`), which must
///   lie inside the palette
/// - `*`: a Reverse tile
/// - `.`: an empty cell
///
/// The board's random generator is seeded with [`PARSED_BOARD_SEED`].
///
/// # Errors
/// * [`EngineError::InvalidDimensions`] for no rows or empty rows.
/// * [`EngineError::InvalidPalette`] for an unusable palette size.
/// * [`EngineError::Parse`] for ragged rows, unknown characters, or symbols
///   outside the palette.
///
/// # Examples
/// ```
/// use gravity_swap::engine::{Symbol, TileKind};
/// use gravity_swap::utils::board_from_str_array;
///
/// let board = board_from_str_array(&[
///     "AB*", // top row (y = 1)
///     "C.A", // bottom row (y = 0)
/// ], 3).unwrap();
/// assert_eq!(board.get(0, 1).unwrap().symbol(), Some(Symbol(0)));
/// assert_eq!(board.get(2, 1).unwrap().kind(), TileKind::Reverse);
/// assert!(board.get(1, 0).unwrap().is_empty());
///
/// assert!(board_from_str_array(&["AXB"], 3).is_err());
/// assert!(board_from_str_array(&["AB", "A"], 3).is_err());
/// ```
pub fn board_from_str_array(s: &[&str], palette_size: usize) -> Result<Board> {
    let height = s.len();
    let width = s.first().map_or(0, |row| row.chars().count());
    let mut board = Board::new_empty(width, height, palette_size, PARSED_BOARD_SEED)?;

    for (row, row_str) in s.iter().enumerate() {
        let len = row_str.chars().count();
        if len != width {
            return Err(EngineError::Parse {
                row,
                col: len.min(width),
                reason: format!("row has {} cells, expected {}", len, width),
            });
        }

        let y = height - 1 - row;
        for (x, ch) in row_str.chars().enumerate() {
            let (symbol, kind) = parse_cell(ch, palette_size).map_err(|reason| EngineError::Parse {
                row,
                col: x,
                reason,
            })?;
            board.set(x, y, symbol, kind)?;
        }
    }
    Ok(board)
}

fn parse_cell(
    ch: char,
    palette_size: usize,
) -> std::result::Result<(Option<Symbol>, TileKind), String> {
    match ch {
        '.' => Ok((None, TileKind::Normal)),
        '*' => Ok((Some(Symbol::REVERSE), TileKind::Reverse)),
        'A'..='Z' => {
            let index = ch as usize - 'A' as usize;
            if index >= palette_size.min(MAX_PALETTE_SIZE) {
                return Err(format!(
                    "symbol '{}' is outside a palette of {}",
                    ch, palette_size
                ));
            }
            Ok((Some(Symbol(index as u8)), TileKind::Normal))
        }
        _ => Err(format!("unrecognized character '{}'", ch)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_from_str_array_valid() {
        let board = board_from_str_array(&["ABCD", "*..B"], 4).unwrap();
        assert_eq!(board.width(), 4);
        assert_eq!(board.height(), 2);
        assert_eq!(board.get(3, 1).unwrap().symbol(), Some(Symbol(3)));
        assert_eq!(board.get(0, 0).unwrap().kind(), TileKind::Reverse);
        assert_eq!(board.count_empty(), 2);
    }

    #[test]
    fn test_board_from_str_array_invalid_char() {
        let result = board_from_str_array(&["ABX"], 3);
        match result {
            Err(EngineError::Parse { row, col, reason }) => {
                assert_eq!((row, col), (0, 2));
                assert!(reason.contains("outside a palette"));
            }
            other => panic!("unexpected result: {:?}", other),
        }

        let result = board_from_str_array(&["A B"], 3);
        assert!(matches!(
            result,
            Err(EngineError::Parse { reason, .. }) if reason.contains("unrecognized character ' '")
        ));
    }

    #[test]
    fn test_board_from_str_array_ragged_rows() {
        let result = board_from_str_array(&["ABC", "AB"], 3);
        assert!(matches!(result, Err(EngineError::Parse { row: 1, .. })));
    }

    #[test]
    fn test_board_from_str_array_empty_input() {
        let rows: [&str; 0] = [];
        assert!(matches!(
            board_from_str_array(&rows, 3),
            Err(EngineError::InvalidDimensions { width: 0, height: 0 })
        ));
        assert!(matches!(
            board_from_str_array(&[""], 3),
            Err(EngineError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_board_from_str_array_round_trips_display() {
        let rows = ["AB*", "C.A"];
        let board = board_from_str_array(&rows, 3).unwrap();
        let rendered: Vec<String> = format!("{}", board)
            .lines()
            .skip(1)
            .map(|line| line[3..].chars().filter(|c| !c.is_whitespace()).collect())
            .collect();
        assert_eq!(rendered, vec!["AB*".to_string(), "C.A".to_string()]);
    }
}
