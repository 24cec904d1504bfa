mod app;
mod commands;
mod render;

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "vocab-deck", about = "Build Anki decks from vocabulary lists", version)]
struct Cli {
    /// Settings file (default: vocab_deck.json, if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Build a deck package from a vocabulary list (the default)
    Build(BuildArgs),

    /// Summarize an existing deck package
    Inspect {
        /// Path to the .apkg file
        package: PathBuf,
    },
}

#[derive(Args, Debug, Default)]
pub struct BuildArgs {
    /// Vocabulary list (JSON array)
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Directory holding the referenced audio files
    #[arg(long)]
    pub media_dir: Option<PathBuf>,

    /// Package to write
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Deck name shown in the flashcard application
    #[arg(long)]
    pub deck_name: Option<String>,

    /// Skip audio files that do not exist instead of failing
    #[arg(long)]
    pub allow_missing_media: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let use_color = !cli.no_color && std::io::stdout().is_terminal();

    match cli.command {
        None => {
            let app = app::App::new(cli.config.as_deref(), &BuildArgs::default())?;
            commands::build::run(&app, &cli.format, use_color)?;
        }
        Some(Command::Build(args)) => {
            let app = app::App::new(cli.config.as_deref(), &args)?;
            commands::build::run(&app, &cli.format, use_color)?;
        }
        Some(Command::Inspect { package }) => {
            commands::inspect::run(&package, &cli.format, use_color)?;
        }
    }

    Ok(())
}
