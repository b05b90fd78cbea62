use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueHint};

use safmeds::commands::{drill, scores, sets};

#[derive(Parser, Debug)]
#[command(
    name = "safmeds",
    version,
    about = "Timed true/false flashcard drills for the terminal.",
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true,
    disable_help_subcommand = true
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a timed drill session
    Drill {
        /// Paths to study set files or directories containing them.
        /// You can pass a single file, multiple files, or a directory.
        #[arg(
            value_name = "PATHS",
            num_args = 0..,
            default_value = ".",
            value_hint = ValueHint::AnyPath
        )]
        paths: Vec<PathBuf>,
        /// Study set to drill. Prompted interactively when omitted and several sets are found.
        #[arg(long, value_name = "NAME")]
        set: Option<String>,
        /// Session length in seconds.
        #[arg(long, value_name = "SECS", default_value_t = 60)]
        duration: u32,
        /// Seed for the item sequence, for reproducible sessions.
        #[arg(long, value_name = "SEED")]
        seed: Option<u64>,
    },
    /// Show recently saved scores
    Scores {
        /// Number of records to show, most recent last.
        #[arg(long, value_name = "COUNT", default_value_t = 5)]
        limit: usize,
        /// Read this score file instead of the default store.
        #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
    },
    /// List the study sets found under the given paths
    Sets {
        #[arg(
            value_name = "PATHS",
            num_args = 0..,
            default_value = ".",
            value_hint = ValueHint::AnyPath
        )]
        paths: Vec<PathBuf>,
    },
}

fn main() {
    if let Err(err) = run_cli() {
        eprintln!("{:?}", err);
        std::process::exit(1);
    }
}

fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Drill {
            paths,
            set,
            duration,
            seed,
        } => {
            drill::run(paths, set, duration, seed)?;
        }
        Command::Scores { limit, file } => {
            scores::run(limit, file)?;
        }
        Command::Sets { paths } => {
            sets::run(paths)?;
        }
    }

    Ok(())
}
