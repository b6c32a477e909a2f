use std::path::PathBuf;

use calibron::config::{PuzzleConfig, parse_dimensions, parse_pieces};
use calibron::error::ConfigError;
use calibron::render;
use calibron::report::format_report;
use calibron::solver::Solver;
use clap::Parser;
use tracing::Level;

#[derive(Parser)]
#[command(
    name = "calibron",
    about = "Exact rectangle tiling solver (defaults to the Calibron 12 puzzle)"
)]
struct Cli {
    /// JSON puzzle file: {"boardWidth", "boardHeight", "pieces": [{"width", "height"}]}
    #[arg(long, conflicts_with_all = ["board", "pieces"])]
    config: Option<PathBuf>,

    /// Board dimensions (WxH, e.g. 56x56)
    #[arg(long, requires = "pieces")]
    board: Option<String>,

    /// Pieces as WxH or WxH:qty (e.g. 28x14 21x18:2)
    #[arg(long, num_args = 1.., requires = "board")]
    pieces: Vec<String>,

    /// Show ASCII layout of the solved board
    #[arg(long)]
    layout: bool,

    /// Print the result as JSON
    #[arg(long, conflicts_with = "layout")]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn puzzle(&self) -> Result<PuzzleConfig, ConfigError> {
        if let Some(path) = &self.config {
            return PuzzleConfig::from_path(path);
        }
        let Some(board) = &self.board else {
            return Ok(PuzzleConfig::default());
        };
        let board = parse_dimensions(board)?;
        let mut pieces = Vec::new();
        for p in &self.pieces {
            pieces.extend(parse_pieces(p)?);
        }
        let config = PuzzleConfig::new(board.w, board.h, pieces);
        config.validate()?;
        Ok(config)
    }
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_max_level(level)
        .init();

    let solver = cli.puzzle().and_then(Solver::new).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });
    let solution = solver.solve();

    if cli.json {
        match serde_json::to_string_pretty(&solution) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        print!("{}", format_report(&solution));
        if cli.layout && solution.is_solved() {
            print!("{}", render::render_board(solution.board, solution.placements()));
        }
    }

    if !solution.is_solved() {
        std::process::exit(2);
    }
}
