//! Eventide CLI - Command-line interface for dual-sink event output.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;
mod path;
mod record;

use commands::{count, ingest, list};

#[derive(Parser)]
#[command(name = "eventide")]
#[command(about = "Eventide dual-sink event output CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ingest JSONL records into a store, optionally streaming events
    Ingest {
        /// Input JSONL file (or stdin if not provided)
        input: Option<String>,
        /// Path to the store file (a scratch file is used when omitted)
        #[arg(long)]
        store: Option<String>,
        /// Emit events as JSON lines to stdout
        #[arg(long)]
        stream: bool,
    },
    /// List containers in a store
    List {
        /// Path to the store file
        store: String,
        /// Container kind to list (default: event)
        #[arg(long)]
        kind: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
        /// Stop after listing N containers (default: unlimited)
        #[arg(long)]
        max_containers: Option<u64>,
    },
    /// Count containers in a store
    Count {
        /// Path to the store file
        store: String,
        /// Container kind to count (default: all kinds)
        #[arg(long)]
        kind: Option<String>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_env("EVENTIDE_LOG"))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Ingest {
            input,
            store,
            stream,
        } => ingest::run(input, store, stream),
        Commands::List {
            store,
            kind,
            json,
            max_containers,
        } => list::run(store, kind, json, max_containers),
        Commands::Count { store, kind } => count::run(store, kind),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
