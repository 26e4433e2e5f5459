use anyhow::{Context, Result};
use clap::Parser;
use gravity_swap::cascade::CascadePhase;
use gravity_swap::config::{load_config, parse_log_level};
use gravity_swap::game::Game;
use gravity_swap::hints::{choose_swap_random, count_unique_symbols};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(
    author,
    version,
    about = "Plays random legal swaps and reports every cascade",
    long_about = None
)]
struct Args {
    /// Board width (overrides the configuration)
    #[clap(long)]
    width: Option<usize>,

    /// Board height (overrides the configuration)
    #[clap(long)]
    height: Option<usize>,

    /// Number of distinct symbols (overrides the configuration)
    #[clap(long)]
    palette: Option<usize>,

    /// Seed for the board and the move picker
    #[clap(long)]
    seed: Option<u64>,

    /// Maximum number of swaps to play
    #[clap(short, long, default_value_t = 20)]
    moves: u32,

    /// Log level (trace, debug, info, warn, error)
    #[clap(long)]
    log_level: Option<String>,

    /// Path to a TOML configuration file
    #[clap(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref());

    let level = match &args.log_level {
        Some(name) => parse_log_level(name)
            .with_context(|| format!("unknown log level '{}'", name))?,
        None => config.debug.level(),
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    let width = args.width.unwrap_or(config.board.width);
    let height = args.height.unwrap_or(config.board.height);
    let palette = args.palette.unwrap_or(config.board.palette_size);
    let seed = args.seed.or(config.board.seed).unwrap_or_else(rand::random);

    let mut game = Game::with_seed(width, height, palette, seed)
        .with_context(|| {
            format!("cannot build a {}x{} board with {} symbols", width, height, palette)
        })?;
    let mut picker = SmallRng::seed_from_u64(seed.wrapping_add(1));

    tracing::info!(width, height, palette, seed, "starting autoplay");
    println!("Initial board:\n{}\n", game.board());

    for turn in 1..=args.moves {
        let Some(swap) = choose_swap_random(game.board(), &mut picker) else {
            tracing::info!(turn, "no legal swap left");
            println!("Dead-locked after {} swap(s).", game.swaps());
            break;
        };

        let toggles_before = game.board().gravity_toggles();
        let outcome = game
            .request_swap(swap.a.0, swap.a.1, swap.b.0, swap.b.1)
            .context("hint produced an unusable swap")?;
        anyhow::ensure!(outcome.is_accepted(), "hint {:?} was rejected: {:?}", swap, outcome);

        let steps = game.resolve();
        let cleared: usize = steps
            .iter()
            .filter(|s| matches!(s.phase, CascadePhase::Clearing | CascadePhase::Rechecking))
            .map(|s| s.mutated.len())
            .sum();
        tracing::info!(
            turn,
            a = ?swap.a,
            b = ?swap.b,
            steps = steps.len(),
            waves = game.resolver().waves(),
            cleared,
            gravity_flips = game.board().gravity_toggles() - toggles_before,
            gravity = ?game.gravity(),
            "swap resolved"
        );
    }

    println!("Final board:\n{}\n", game.board());
    println!("Swaps: {}", game.swaps());
    println!("Cascade steps: {}", game.cascade_steps());
    println!("Gravity flips: {}", game.board().gravity_toggles());
    println!("Symbols on board: {}", count_unique_symbols(game.board()));
    Ok(())
}
