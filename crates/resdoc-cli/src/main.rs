//! resdoc CLI - normalize REST payloads into canonical documents.

use clap::{Parser, Subcommand};

mod commands;
mod input;
mod output;

use commands::{canonicalize, detect, fingerprint, normalize};

#[derive(Parser)]
#[command(name = "resdoc")]
#[command(about = "Normalize REST payloads into canonical documents")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize a payload into a canonical document
    Normalize {
        /// Payload JSON file (or stdin if not provided)
        payload: Option<String>,
        /// Schema JSON file
        #[arg(long)]
        schema: String,
        /// Request URL used as the base of relationship links
        #[arg(long, default_value = "")]
        url: String,
        /// Normalizer configuration JSON file
        #[arg(long)]
        config: Option<String>,
        /// Relationship type correction, NAME=TYPE (repeatable)
        #[arg(long = "type-map", value_name = "NAME=TYPE")]
        type_map: Vec<String>,
        /// Print the normalization report alongside the document
        #[arg(long)]
        report: bool,
        /// Print compact JSON
        #[arg(long)]
        compact: bool,
    },
    /// Show the detected type and shape of a payload
    Detect {
        /// Payload JSON file (or stdin if not provided)
        payload: Option<String>,
        /// Schema JSON file
        #[arg(long)]
        schema: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show canonical bytes for input JSON
    Canonicalize {
        /// Input JSON file (or stdin if not provided)
        input: Option<String>,
    },
    /// Print the fingerprint of a normalized payload
    Fingerprint {
        /// Payload JSON file (or stdin if not provided)
        payload: Option<String>,
        /// Schema JSON file
        #[arg(long)]
        schema: String,
        /// Request URL used as the base of relationship links
        #[arg(long, default_value = "")]
        url: String,
        /// Normalizer configuration JSON file
        #[arg(long)]
        config: Option<String>,
    },
}

/// Logs go to stderr, filtered by `RUST_LOG` (default `warn`).
fn setup_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    setup_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Normalize {
            payload,
            schema,
            url,
            config,
            type_map,
            report,
            compact,
        } => normalize::run(normalize::Options {
            payload,
            schema,
            url,
            config,
            type_map,
            report,
            compact,
        }),
        Commands::Detect {
            payload,
            schema,
            json,
        } => detect::run(payload, schema, json),
        Commands::Canonicalize { input } => canonicalize::run(input),
        Commands::Fingerprint {
            payload,
            schema,
            url,
            config,
        } => fingerprint::run(payload, schema, url, config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
