//! Line-Clear Puzzle Solver
//!
//! Reads a board and a batch of pieces from a puzzle file and prints where
//! to place each piece to clear the most lines.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use log::{info, LevelFilter};

use lineclear::movegen::legal_positions;
use lineclear::report::format_report;
use lineclear::solver::DEFAULT_LOOKAHEAD;
use lineclear::{Puzzle, SearchConfig};

/// Plans piece placements for a line-clearing block puzzle.
#[derive(Parser)]
#[command(name = "lineclear")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log search progress (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Solve a puzzle file and print each placement.
    Solve {
        file: PathBuf,
        #[command(flatten)]
        search: SearchArgs,
    },
    /// List every legal anchor of one piece on the puzzle's board.
    Moves {
        file: PathBuf,
        /// Piece number, counted from 1 in file order.
        #[arg(short, long, default_value_t = 1)]
        piece: usize,
    },
    /// Print the pieces read from a puzzle file.
    Extract { file: PathBuf },
}

#[derive(Args)]
struct SearchArgs {
    /// Number of pieces to look ahead.
    #[arg(short, long, default_value_t = DEFAULT_LOOKAHEAD)]
    depth: usize,
    /// Explore at most this many anchors per piece.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    max_positions: Option<u32>,
}

impl TryFrom<&SearchArgs> for SearchConfig {
    type Error = std::num::TryFromIntError;

    fn try_from(args: &SearchArgs) -> Result<Self, Self::Error> {
        Ok(SearchConfig {
            depth: args.depth,
            max_positions: args.max_positions.map(usize::try_from).transpose()?,
        })
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Solve { file, search } => run_solve(&file, &search),
        Command::Moves { file, piece } => run_moves(&file, piece),
        Command::Extract { file } => run_extract(&file),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn load(path: &Path) -> anyhow::Result<Puzzle> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    text.parse()
        .with_context(|| format!("failed to parse {}", path.display()))
}

/// Solves the puzzle and prints the step-by-step report.
fn run_solve(path: &Path, search: &SearchArgs) -> anyhow::Result<()> {
    let puzzle = load(path)?;
    let config = SearchConfig::try_from(search).context("--max-positions is out of range")?;
    info!(
        "solving {}: {}x{} board, {} pieces, depth {}",
        path.display(),
        puzzle.board.size(),
        puzzle.board.size(),
        puzzle.pieces.len(),
        config.depth
    );

    let result = puzzle.solve(config);
    print!("{}", format_report(&puzzle.board, &puzzle.pieces, &result)?);
    Ok(())
}

/// Prints the legal anchors of one piece in row-major order.
fn run_moves(path: &Path, number: usize) -> anyhow::Result<()> {
    let puzzle = load(path)?;
    let Some(piece) = number.checked_sub(1).and_then(|index| puzzle.pieces.get(index)) else {
        bail!(
            "piece {number} does not exist ({} has {} pieces)",
            path.display(),
            puzzle.pieces.len()
        );
    };

    let positions = legal_positions(&puzzle.board, piece);
    if positions.is_empty() {
        println!("Piece {number} fits nowhere.");
        return Ok(());
    }

    println!("Piece {number} fits at {} anchors (row, column):", positions.len());
    for at in positions {
        println!("  ({}, {})", at.row, at.col);
    }
    Ok(())
}

/// Prints every piece of the puzzle file.
fn run_extract(path: &Path) -> anyhow::Result<()> {
    let puzzle = load(path)?;
    println!("Found {} pieces", puzzle.pieces.len());
    for (index, piece) in puzzle.pieces.iter().enumerate() {
        println!("\nPiece {} ({}x{}):", index + 1, piece.height(), piece.width());
        print!("{piece}");
    }
    Ok(())
}
