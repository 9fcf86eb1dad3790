//! camp: entry point for working with proposal transactions from the shell.
//!
//! Every subcommand reads JSON from a file (or stdin when no file, or `-`, is
//! given) and writes JSON to stdout. Logs go to stderr.

mod summary;

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use camp_registry::{NetworkRegistry, RegistryConfig};
use camp_transactions::{
    action_transactions, decode, encode, extract_amounts, Action, RawTransactions,
    TypedTransaction,
};
use camp_types::ChainId;
use camp_utils::LogFormat;
use clap::Parser;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "camp", version, about = "Governance proposal transaction codec")]
struct Cli {
    /// Chain the transactions belong to: "mainnet", "sepolia" or a numeric id.
    #[arg(long, default_value = "mainnet", env = "CAMP_CHAIN_ID", global = true)]
    chain_id: ChainId,

    /// TOML contract registry. Without it only the built-in mainnet contracts are known.
    #[arg(long, env = "CAMP_REGISTRY", global = true)]
    registry: Option<PathBuf>,

    /// Log filter: "trace", "debug", "info", "warn", "error" or an EnvFilter directive.
    #[arg(long, default_value = "warn", env = "CAMP_LOG_LEVEL", global = true)]
    log_level: String,

    /// Log format: "human" or "json".
    #[arg(long, default_value = "human", env = "CAMP_LOG_FORMAT", global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Decode a raw batch ({targets, values, signatures, calldatas}) into typed transactions.
    Decode {
        input: Option<PathBuf>,
        /// Print one line per transaction instead of JSON.
        #[arg(long)]
        summary: bool,
    },
    /// Encode a JSON array of typed transactions into a raw batch.
    Encode { input: Option<PathBuf> },
    /// Expand an action, or an array of actions, into typed transactions.
    Expand { input: Option<PathBuf> },
    /// Total the amounts a proposal spends.
    Amounts {
        input: Option<PathBuf>,
        /// The input is a raw batch rather than typed transactions.
        #[arg(long)]
        raw: bool,
        /// Print a one-line total instead of JSON.
        #[arg(long)]
        summary: bool,
    },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ActionInput {
    One(Action),
    Many(Vec<Action>),
}

impl ActionInput {
    fn into_vec(self) -> Vec<Action> {
        match self {
            Self::One(action) => vec![action],
            Self::Many(actions) => actions,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    camp_utils::init_logging(cli.log_format, &cli.log_level)?;
    run(cli)
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let registry = load_registry(cli.registry.as_deref())?;
    let chain = cli.chain_id;

    match cli.command {
        Command::Decode { input, summary } => {
            let batch: RawTransactions = read_json(input.as_deref())?;
            let transactions = decode(&batch, chain, &registry)?;
            if summary {
                for tx in &transactions {
                    println!("{}", summary::describe(tx));
                }
                Ok(())
            } else {
                print_json(&transactions)
            }
        }
        Command::Encode { input } => {
            let transactions: Vec<TypedTransaction> = read_json(input.as_deref())?;
            print_json(&encode(&transactions, chain, &registry)?)
        }
        Command::Expand { input } => {
            let actions = read_json::<ActionInput>(input.as_deref())?.into_vec();
            let mut transactions = Vec::new();
            for (index, action) in actions.iter().enumerate() {
                let expanded = action_transactions(action, chain, &registry)
                    .with_context(|| format!("action {index} ({})", action.kind()))?;
                transactions.extend(expanded);
            }
            print_json(&transactions)
        }
        Command::Amounts {
            input,
            raw,
            summary,
        } => {
            let transactions = if raw {
                let batch: RawTransactions = read_json(input.as_deref())?;
                decode(&batch, chain, &registry)?
            } else {
                read_json::<Vec<TypedTransaction>>(input.as_deref())?
            };
            let totals = extract_amounts(&transactions);
            if summary {
                println!("{}", camp_utils::format_amounts(&totals));
                Ok(())
            } else {
                print_json(&totals)
            }
        }
    }
}

fn load_registry(path: Option<&Path>) -> anyhow::Result<NetworkRegistry> {
    match path {
        Some(path) => {
            let config = RegistryConfig::from_toml_file(path)
                .with_context(|| format!("loading registry from {}", path.display()))?;
            tracing::info!(path = %path.display(), networks = config.networks.len(), "loaded registry");
            Ok(config.build())
        }
        None => Ok(NetworkRegistry::mainnet()),
    }
}

fn read_json<T: DeserializeOwned>(path: Option<&Path>) -> anyhow::Result<T> {
    let contents = match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?,
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading stdin")?;
            buf
        }
    };
    serde_json::from_str(&contents).context("parsing input JSON")
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
