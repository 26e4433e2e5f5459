use anyhow::{Context, Result};
use gravity_swap::config::load_config;
use gravity_swap::game::{Game, SwapOutcome, SwapRejection};
use gravity_swap::hints::{find_valid_swaps, has_valid_swap};
use std::io::{self, Write};

/// The tile the player picked and is about to swap.
#[derive(Debug, Default)]
struct Selection {
    picked: Option<(usize, usize)>,
}

impl Selection {
    /// Handles a click on `pos`. Returns the pair to swap once two tiles are picked.
    fn click(&mut self, pos: (usize, usize)) -> Option<((usize, usize), (usize, usize))> {
        match self.picked.take() {
            None => {
                self.picked = Some(pos);
                None
            }
            Some(first) if first == pos => None,
            Some(first) => Some((first, pos)),
        }
    }

    fn current(&self) -> Option<(usize, usize)> {
        self.picked
    }
}

fn main() -> Result<()> {
    let config = load_config(None);
    tracing_subscriber::fmt()
        .with_max_level(config.debug.level())
        .with_writer(io::stderr)
        .init();

    let board = &config.board;
    let mut game = match board.seed {
        Some(seed) => Game::with_seed(board.width, board.height, board.palette_size, seed),
        None => Game::initialize(board.width, board.height, board.palette_size),
    }
    .context("invalid board configuration")?;
    let mut selection = Selection::default();

    println!("Welcome to Gravity Swap!");

    loop {
        println!("---------------------");
        println!("Swaps: {}, Gravity: {:?}", game.swaps(), game.gravity());
        println!("{}", game.board().to_string_with_highlight(selection.current()));

        if !has_valid_swap(game.board()) {
            println!();
            println!("---------------------");
            println!("No legal swap left. GAME OVER!");
            println!("Total Swaps: {}", game.swaps());
            println!("---------------------");
            break;
        }

        print!("Pick a tile (x y), swap (x1 y1 x2 y2), 'h' for a hint, 'q' to quit: ");
        io::stdout().flush().context("failed to flush stdout")?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input).context("failed to read input")? == 0 {
            break;
        }
        let trimmed_input = input.trim();

        if trimmed_input == "q" {
            println!("Thanks for playing!");
            break;
        }

        if trimmed_input == "h" {
            if let Some(swap) = find_valid_swaps(game.board()).first() {
                println!(
                    "Hint: swap ({}, {}) with ({}, {})",
                    swap.a.0, swap.a.1, swap.b.0, swap.b.1
                );
            }
            continue;
        }

        let numbers: Option<Vec<usize>> = trimmed_input
            .split_whitespace()
            .map(|part| part.parse().ok())
            .collect();
        let pair = match numbers.as_deref() {
            Some(&[x, y]) => {
                if !game.board().in_bounds(x, y) {
                    println!("Invalid coordinates: ({}, {}) is off the board.", x, y);
                    continue;
                }
                selection.click((x, y))
            }
            Some(&[x1, y1, x2, y2]) => {
                selection = Selection::default();
                Some(((x1, y1), (x2, y2)))
            }
            _ => {
                println!("Invalid input format. Use 'x y', 'x1 y1 x2 y2', 'h', or 'q'.");
                continue;
            }
        };

        let Some((a, b)) = pair else {
            continue;
        };
        match game.request_swap(a.0, a.1, b.0, b.1) {
            Ok(SwapOutcome::Accepted) => play_cascade(&mut game),
            Ok(SwapOutcome::Rejected(SwapRejection::NotAdjacent)) => {
                // Picking a far tile starts a new selection.
                selection.click(b);
                println!("Tiles are not adjacent.");
            }
            Ok(SwapOutcome::Rejected(SwapRejection::EmptyCell)) => {
                println!("Cannot swap an empty cell.")
            }
            Ok(SwapOutcome::Rejected(SwapRejection::NoMatch)) => {
                println!("That swap makes no line of three.")
            }
            Err(e) => println!("Invalid move: {}", e),
        }
    }
    Ok(())
}

fn play_cascade(game: &mut Game) {
    loop {
        let step = game.step_cascade();
        if step.done {
            break;
        }
        println!("{:?}: {} cell(s)", step.phase, step.mutated.len());
        println!("{}", game.board());
    }
}
