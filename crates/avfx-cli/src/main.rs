//! avfx CLI - offline rendering, audio processing and scene browsing for
//! the avfx audiovisual effects engine.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "avfx")]
#[command(author, version, about = "Audiovisual effects engine CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a deterministic PNG sequence at render resolution
    Render(commands::render::RenderArgs),

    /// Process a WAV file through the audio graph
    Process(commands::process::ProcessArgs),

    /// Run the live scheduler headless and save the last preview frame
    Preview(commands::preview::PreviewArgs),

    /// List parameters with their ranges and defaults
    Params(commands::params::ParamsArgs),

    /// List factory and user scenes
    Scenes(commands::scenes::ScenesArgs),
}

fn main() -> anyhow::Result<()> {
    // logs go to stderr so `params --json` output stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();
    tracing_log::LogTracer::init().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render(args) => commands::render::run(args),
        Commands::Process(args) => commands::process::run(args),
        Commands::Preview(args) => commands::preview::run(args),
        Commands::Params(args) => commands::params::run(args),
        Commands::Scenes(args) => commands::scenes::run(args),
    }
}
