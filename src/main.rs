//! Lines-Rust: a "Lines" ball puzzle engine.
//!
//! ## Usage
//!
//! - `lines-rust` - Watch a random self-play demo
//! - `lines-rust ltp` - Serve the Lines Text Protocol on stdin/stdout
//! - `lines-rust demo` - Run the self-play demo

use std::io;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::Level;

use lines_rust::config::GameConfig;
use lines_rust::constants::{DEFAULT_SIZE, INITIAL_BALLS};
use lines_rust::error::LinesError;
use lines_rust::game::{Game, Outcome};
use lines_rust::ltp::LtpEngine;
use lines_rust::reach::reachable_from;

/// Lines-Rust: a "Lines" ball puzzle engine
#[derive(Parser)]
#[command(name = "lines-rust")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Board side length
    #[arg(long, global = true, default_value_t = DEFAULT_SIZE)]
    size: usize,

    /// Number of ball colors in play (1-7)
    #[arg(
        long,
        global = true,
        default_value_t = 7,
        value_parser = clap::value_parser!(u8).range(1..=7)
    )]
    colors: u8,

    /// Balls on the board at the start of a game
    #[arg(long, global = true, default_value_t = INITIAL_BALLS)]
    initial: usize,

    /// Seed for reproducible games
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the Lines Text Protocol server for use with a front end
    Ltp,
    /// Play random moves until the game ends
    Demo {
        /// Stop after this many moves
        #[arg(long, default_value_t = 500)]
        max_moves: usize,
    },
}

impl Cli {
    fn config(&self) -> Result<GameConfig, LinesError> {
        Ok(GameConfig {
            size: self.size,
            initial_balls: self.initial,
            seed: self.seed,
            ..GameConfig::with_colors(usize::from(self.colors))?
        })
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = cli.config().context("invalid game settings")?;

    match cli.command {
        Some(Commands::Ltp) => {
            let mut engine = LtpEngine::new(config).context("invalid game settings")?;
            let stdin = io::stdin();
            engine
                .run(stdin.lock(), io::stdout())
                .context("protocol I/O failed")?;
        }
        Some(Commands::Demo { max_moves }) => run_demo(config, max_moves)?,
        None => run_demo(config, 500)?,
    }
    Ok(())
}

/// Logs go to stderr so stdout stays clean for the protocol.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn run_demo(config: GameConfig, max_moves: usize) -> Result<()> {
    println!("Lines-Rust: random self-play\n");

    let mut rng = match config.seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    };
    let mut game = Game::new(config).context("invalid game settings")?;
    println!("{}", game.board());

    let mut moves = 0;
    while moves < max_moves && !game.is_over() {
        // Balls that have somewhere to go.
        let movable: Vec<_> = game
            .board()
            .cells()
            .filter(|c| !c.state.is_empty())
            .filter_map(|c| {
                let region = reachable_from(game.board(), c.pos).ok()?;
                (!region.is_empty()).then_some((c.pos, region))
            })
            .collect();
        if movable.is_empty() {
            break;
        }
        let (from, region) = &movable[rng.usize(..movable.len())];
        let to = region[rng.usize(..region.len())];

        if let Outcome::Moved(report) = game.try_move(*from, to)? {
            moves += 1;
            if !report.cleared.is_empty() {
                println!("Move {moves}: {from} -> {to} cleared {} balls", report.cleared.len());
                println!("{}", game.board());
            }
        }
    }

    println!("Final board after {moves} moves:");
    println!("{}", game.board());
    println!("Score: {}", game.score());
    Ok(())
}
