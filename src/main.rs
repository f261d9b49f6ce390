//! Wayfinder CLI entry point

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

use config::AppConfig;

#[derive(Parser)]
#[command(name = "wayfinder")]
#[command(about = "Shortest paths over labeled graphs: campus routes and character connections", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Config file (defaults to ./wayfinder.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding the datasets
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the campus routing server
    Serve {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,
    },
    /// Run a graph script and print its transcript
    Script {
        /// Script file; reads stdin when omitted
        file: Option<PathBuf>,

        /// Command set and edge label type
        #[arg(short, long, value_enum, default_value_t = DialectArg::Labeled)]
        dialect: DialectArg,
    },
    /// Print the shortest walking route between two buildings
    Route { start: String, end: String },
    /// Print the shortest chain of shared books between two characters
    Connect { from: String, to: String },
    /// List every building
    Buildings,
    /// Show version
    Version,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DialectArg {
    Labeled,
    Social,
    Weighted,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!("wayfinder={}", log_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(dir) = cli.data_dir {
        config.data.dir = dir;
    }

    match cli.command {
        Commands::Serve { port, host } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(host) = host {
                config.server.host = host;
            }
            commands::serve(&config).await
        }
        Commands::Script { file, dialect } => commands::script(&config, file, dialect),
        Commands::Route { start, end } => commands::route(&config, &start, &end),
        Commands::Connect { from, to } => commands::connect(&config, &from, &to),
        Commands::Buildings => commands::buildings(&config),
        Commands::Version => {
            println!("Wayfinder v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
