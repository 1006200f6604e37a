//! Frost CLI - Headless driver for frost games

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{cast, play};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "frost")]
#[command(about = "Run and inspect point-and-shoot levels without a window", long_about = None)]
#[command(version)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the game on simulated time and print what happened
    Play {
        /// Level files in play order (default: the built-in demo levels)
        #[arg(long = "level")]
        levels: Vec<String>,

        /// Number of frames to simulate
        #[arg(long, default_value = "300")]
        ticks: u64,

        /// Seconds per simulated frame
        #[arg(long, default_value = "0.016")]
        dt: f64,

        /// Pointer-down at X,Y in viewport pixels, optionally @FRAME
        /// (e.g. 640,360@30). Without a frame it fires before the first one.
        #[arg(long = "click", value_parser = play::parse_click)]
        clicks: Vec<play::ScriptedClick>,

        /// Config file to use instead of the layered lookup
        #[arg(long)]
        config: Option<String>,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// List everything under one viewport point, nearest first
    Cast {
        /// Path to level file
        #[arg(long)]
        level: String,

        /// Viewport X in pixels
        x: f32,

        /// Viewport Y in pixels
        y: f32,

        /// Config file to use instead of the layered lookup
        #[arg(long)]
        config: Option<String>,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Play {
            levels,
            ticks,
            dt,
            clicks,
            config,
            format,
        } => play::run(play::PlayArgs {
            levels,
            ticks,
            dt,
            clicks,
            config,
            format,
        }),
        Commands::Cast {
            level,
            x,
            y,
            config,
            format,
        } => cast::run(&level, x, y, config.as_deref(), &format),
    }
}
