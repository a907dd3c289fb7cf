//! Guess the Number - CLI
//!
//! Number-guessing game with TUI and CLI modes, plus best-score and
//! simulation reports.

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use guess_the_number::{
    commands::{run_simple, run_simulation},
    core::Difficulty,
    logging::{self, LogSink},
    output::{print_best_scores, print_simulation_result},
    storage::BestScoreStore,
};
use log::{info, warn};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "guess-the-number",
    about = "Guess the hidden number with hot/cold hints and beat your best scores",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Level: easy (1-50, default), medium (1-100), hard (1-200), expert (1-500)
    #[arg(short, long, global = true, default_value = "easy")]
    level: Difficulty,

    /// Best-score file (default: platform data directory)
    #[arg(long, global = true, value_name = "PATH")]
    scores_file: Option<PathBuf>,

    /// Keep best scores in memory only
    #[arg(long, global = true)]
    no_save: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive TUI mode (default)
    Play,

    /// Simple CLI mode (line-based prompts without TUI)
    Simple,

    /// Show best scores for every level
    Stats,

    /// Auto-play games with a bisection player and report attempt statistics
    Simulate {
        /// Number of games to play
        #[arg(short = 'n', long, default_value = "1000")]
        count: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Default to Play mode if no command given
    let command = cli.command.unwrap_or(Commands::Play);

    let sink = match (&command, cli.log_file.as_deref()) {
        (_, Some(path)) => LogSink::File(path),
        // The TUI owns the terminal; stray stderr output would corrupt it
        (Commands::Play, None) => LogSink::Off,
        (_, None) => LogSink::Stderr,
    };
    logging::init(cli.verbose, sink)?;

    match command {
        Commands::Play => run_play_command(cli.level, open_store(cli.no_save, cli.scores_file)),
        Commands::Simple => {
            let mut store = open_store(cli.no_save, cli.scores_file);
            run_simple(cli.level, &mut store)?;
            Ok(())
        }
        Commands::Stats => {
            print_best_scores(&open_store(cli.no_save, cli.scores_file));
            Ok(())
        }
        Commands::Simulate { count } => run_simulate_command(cli.level, count),
    }
}

/// Resolve the best-score store: `--no-save`, then `--scores-file`, then the data dir
fn open_store(no_save: bool, scores_file: Option<PathBuf>) -> BestScoreStore {
    if no_save {
        info!("Best scores will not be saved");
        return BestScoreStore::in_memory();
    }

    match scores_file.or_else(BestScoreStore::default_path) {
        Some(path) => BestScoreStore::open(path),
        None => {
            warn!("No data directory available; best scores will not be saved");
            BestScoreStore::in_memory()
        }
    }
}

fn run_play_command(level: Difficulty, store: BestScoreStore) -> Result<()> {
    use guess_the_number::interactive::{App, run_tui};

    let app = App::new(level, store);
    run_tui(app)
}

fn run_simulate_command(level: Difficulty, count: usize) -> Result<()> {
    println!(
        "Simulating {count} {} games with a bisection player...",
        level.name()
    );
    let result = run_simulation(level, count, true)?;
    print_simulation_result(&result);
    Ok(())
}
