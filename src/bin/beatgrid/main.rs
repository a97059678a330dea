//! beatgrid - render beat grids to audio
//!
//! Run with: cargo run -- render --play

mod kernel;
mod playback;
mod render;

use clap::{Parser, Subcommand};

/// Beat-grid compiler and offline drum synthesizer
#[derive(Parser)]
#[command(name = "beatgrid")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render one window of a song (the built-in demo by default)
    Render(render::RenderArgs),

    /// Design a band-pass kernel and print its response
    Kernel(kernel::KernelArgs),
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Render(args) => render::execute(args),
        Commands::Kernel(args) => kernel::execute(args),
    }
}
