use std::fs;
use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use fieldmark::cli::{load_demos, load_signature, load_values};
use fieldmark::utils::LoggingConfig;
use fieldmark::{Adapter, AdapterConfig, MarkerChatAdapter};

#[derive(Parser)]
#[command(name = "fieldmark", version, about = "Marker-based prompt formatter", author)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a signature, demos and inputs as chat messages
    Format {
        #[arg(long)]
        signature: PathBuf,
        #[arg(long)]
        inputs: PathBuf,
        #[arg(long)]
        demos: Option<PathBuf>,
        #[arg(long, default_value_t = false)]
        compact: bool,
    },
    /// Recover output fields from a model completion
    Parse {
        #[arg(long)]
        signature: PathBuf,
        /// Completion file; stdin when omitted
        #[arg(long)]
        completion: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    LoggingConfig::init();

    let cli = Cli::parse();
    let adapter = MarkerChatAdapter::with_config(&AdapterConfig::from_env()?);

    match cli.command {
        Command::Format {
            signature,
            inputs,
            demos,
            compact,
        } => handle_format(&adapter, signature, inputs, demos, compact)?,
        Command::Parse {
            signature,
            completion,
        } => handle_parse(&adapter, signature, completion)?,
    }
    Ok(())
}

fn handle_format(
    adapter: &dyn Adapter,
    signature: PathBuf,
    inputs: PathBuf,
    demos: Option<PathBuf>,
    compact: bool,
) -> anyhow::Result<()> {
    let signature = load_signature(&signature)?;
    let inputs = load_values(&inputs)?;
    let demos = match demos {
        Some(path) => load_demos(&path)?,
        None => Vec::new(),
    };

    let messages = adapter.format(&signature, &demos, &inputs)?;
    let content = if compact {
        serde_json::to_string(&messages)?
    } else {
        serde_json::to_string_pretty(&messages)?
    };
    println!("{content}");
    Ok(())
}

fn handle_parse(
    adapter: &dyn Adapter,
    signature: PathBuf,
    completion: Option<PathBuf>,
) -> anyhow::Result<()> {
    let signature = load_signature(&signature)?;
    let completion = match completion {
        Some(path) => fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read completion from stdin")?;
            buffer
        }
    };

    let fields = adapter.parse(&signature, &completion)?;
    println!("{}", serde_json::to_string_pretty(&fields)?);
    Ok(())
}
