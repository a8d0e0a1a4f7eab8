//! # bach-cli
//!
//! Command-line interface for the BachLedger ABI codec.
//!
//! ## Usage
//!
//! ```bash
//! # Selectors and topics
//! bach-abi selector 'transfer(address,uint256)'
//! bach-abi selector 'Transfer(address,address,uint256)' --topic
//!
//! # Call data
//! bach-abi encode --abi token.json --member transfer '["0x742d...", "1000"]'
//! bach-abi encode --abi token.json --kind constructor --bytecode 0x6080... '["1000000"]'
//!
//! # Return data
//! bach-abi decode --abi token.json --member balanceOf 0x00...03e8
//! bach-abi chunks 0x00...
//!
//! # Interface and RPC
//! bach-abi members --abi token.json
//! bach-abi call --abi token.json --member balanceOf --to 0xA0b8... '["0x742d..."]'
//! ```

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod error;
mod output;

pub use config::Config;
pub use error::CliError;
pub use output::Output;

/// BachLedger ABI codec CLI
#[derive(Parser, Debug)]
#[command(name = "bach-abi")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// RPC endpoint URL
    #[arg(long, global = true)]
    rpc_url: Option<String>,

    /// Tracing filter (overrides the config file; `RUST_LOG` wins over both)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// CLI commands
#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the 4-byte selector of a signature
    Selector(commands::encode::SelectorArgs),
    /// Encode call data for an interface member
    Encode(commands::encode::EncodeArgs),
    /// Decode a return or event payload
    Decode(commands::decode::DecodeArgs),
    /// Split a payload into 32-byte chunks
    Chunks(commands::decode::ChunksArgs),
    /// List the members of an interface document
    Members(commands::members::MembersArgs),
    /// Call a view function over RPC
    Call(commands::call::CallArgs),
    /// Show or edit configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,
        /// Set RPC URL
        #[arg(long)]
        set_rpc: Option<String>,
        /// Set log level
        #[arg(long)]
        set_log_level: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load config
    let mut config = Config::load();

    // Override RPC URL if provided
    if let Some(rpc_url) = cli.rpc_url {
        config.rpc_url = rpc_url;
    }

    // Initialize tracing on stderr so stdout stays machine-readable
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(cli.log_level.as_deref().unwrap_or(&config.log_level))
    });
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let result = match cli.command {
        Commands::Selector(cmd) => cmd.execute(cli.json),
        Commands::Encode(cmd) => cmd.execute(cli.json),
        Commands::Decode(cmd) => cmd.execute(cli.json),
        Commands::Chunks(cmd) => cmd.execute(cli.json),
        Commands::Members(cmd) => cmd.execute(cli.json),
        Commands::Call(cmd) => cmd.execute(&config, cli.json).await,
        Commands::Config {
            show,
            set_rpc,
            set_log_level,
        } => handle_config(&mut config, show, set_rpc, set_log_level, cli.json),
    };

    if let Err(e) = result {
        tracing::debug!(error = ?e, "command failed");
        if cli.json {
            println!(
                "{}",
                serde_json::json!({
                    "error": e.to_string(),
                    "success": false
                })
            );
        } else {
            eprintln!("Error: {}", e);
        }
        std::process::exit(1);
    }
}

fn handle_config(
    config: &mut Config,
    show: bool,
    set_rpc: Option<String>,
    set_log_level: Option<String>,
    json: bool,
) -> Result<(), CliError> {
    let mut modified = false;

    if let Some(rpc) = set_rpc {
        config.rpc_url = rpc;
        modified = true;
    }

    if let Some(level) = set_log_level {
        EnvFilter::try_new(&level).map_err(|e| CliError::Config(e.to_string()))?;
        config.log_level = level;
        modified = true;
    }

    if modified {
        config.save()?;
        Output::new(json)
            .field("status", "saved")
            .line("Configuration saved")
            .print();
    } else if show {
        Output::new(json)
            .field("rpc_url", &config.rpc_url)
            .field("default_block", &config.default_block)
            .field("log_level", &config.log_level)
            .line(&format!(
                "RPC URL: {}\nDefault block: {}\nLog level: {}",
                config.rpc_url, config.default_block, config.log_level
            ))
            .print();
    } else {
        Output::new(json)
            .line("Use --show to display config, or --set-rpc/--set-log-level to modify")
            .print();
    }

    Ok(())
}
