//! bandcheck CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "bandcheck", version, about = "IELTS essay evaluation client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit an essay (or a directory of essays) for scoring
    Evaluate {
        /// Path to the essay text file
        #[arg(long, conflicts_with = "essay_dir")]
        essay: Option<PathBuf>,

        /// Directory of .txt essay files to score as a batch
        #[arg(long)]
        essay_dir: Option<PathBuf>,

        /// Topic text, or a path to a file containing it
        #[arg(long)]
        topic: String,

        /// Output directory for reports
        #[arg(long, default_value = "./bandcheck-results")]
        output: PathBuf,

        /// Output format: json, html, markdown (comma-separated), or all
        #[arg(long, default_value = "json")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Parse a saved scoring response offline
    Parse {
        /// Path to the raw response text file
        #[arg(long)]
        input: PathBuf,

        /// Output format: table, json, markdown
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Create a starter config and example essay
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("bandcheck=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Evaluate {
            essay,
            essay_dir,
            topic,
            output,
            format,
            config,
        } => commands::evaluate::execute(essay, essay_dir, topic, output, format, config).await,
        Commands::Parse { input, format } => commands::parse::execute(input, format),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
