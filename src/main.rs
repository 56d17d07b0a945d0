use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use study_extract_lib::config::AppConfig;
use study_extract_lib::{validate_file_with, Extractor};

#[derive(Parser, Debug)]
#[command(
    name = "study-extract",
    version,
    about = "Validate study documents and extract questions and definitions from their text."
)]
struct Cli {
    /// JSON file overriding upload limits and parser thresholds
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check existence, size and type of an upload
    Validate { path: PathBuf },

    /// Extract questions and concepts from an already-decoded UTF-8 text file
    Extract { path: PathBuf },
}

fn main() -> Result<()> {
    study_extract_lib::init_logging();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("Cannot load config '{}'", path.display()))?,
        None => AppConfig::default(),
    };

    let output = match cli.command {
        Command::Validate { path } => {
            serde_json::to_string_pretty(&validate_file_with(&path, &config.limits))?
        }
        Command::Extract { path } => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("Cannot read '{}'", path.display()))?;
            let extractor = Extractor::with_config(config.parser);
            serde_json::to_string_pretty(&extractor.build_result(&text))?
        }
    };

    println!("{output}");
    Ok(())
}
