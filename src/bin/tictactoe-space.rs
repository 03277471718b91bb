//! tictactoe-space CLI - enumerate, count and solve the Tic-Tac-Toe state space
//!
//! Log output goes through `env_logger`; `RUST_LOG` overrides the level chosen
//! with `-v`.

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tictactoe_space::cli::commands::{count, report, solve, symmetry};

#[derive(Parser)]
#[command(name = "tictactoe-space")]
#[command(version, about = "Exhaustive Tic-Tac-Toe state space analysis", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Count distinct states per ply
    Count(count::CountArgs),

    /// Solve the game and list best moves
    Solve(solve::SolveArgs),

    /// Show the symmetry class of a board
    Symmetry(symmetry::SymmetryArgs),

    /// Compare all builder variants
    Report(report::ReportArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli.command {
        Commands::Count(args) => count::execute(args),
        Commands::Solve(args) => solve::execute(args),
        Commands::Symmetry(args) => symmetry::execute(args),
        Commands::Report(args) => report::execute(args),
    }
}
