//! fincalc CLI
//!
//! - `fincalc list` - names of every registered calculator
//! - `fincalc run <name> --params '<json>'` - run one calculator
//! - `fincalc batch <file>` - run a JSON array of `{ "calculator", "params" }`

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

use fincalc::{BatchCall, EngineConfig, Registry};

/// Deterministic personal finance calculators
#[derive(Parser)]
#[command(name = "fincalc")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Load tax and capital gains tables from CSV files in this directory
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List calculator names
    List,

    /// Run a single calculator
    Run {
        name: String,

        /// Parameters as a JSON object
        #[arg(short, long, conflicts_with = "params_file")]
        params: Option<String>,

        /// File holding the parameter JSON object
        #[arg(long)]
        params_file: Option<PathBuf>,
    },

    /// Run a JSON array of calls in parallel
    Batch { file: PathBuf },
}

fn load_config(dir: Option<&PathBuf>) -> Result<EngineConfig> {
    match dir {
        Some(dir) => {
            info!("Loading configuration from {}", dir.display());
            EngineConfig::from_csv_path(dir)
                .with_context(|| format!("Failed to load configuration from {}", dir.display()))
        }
        None => Ok(EngineConfig::default_india()),
    }
}

fn read_params(params: Option<String>, params_file: Option<PathBuf>) -> Result<Value> {
    let text = match (params, params_file) {
        (Some(text), _) => text,
        (None, Some(path)) => {
            fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))?
        }
        (None, None) => return Ok(Value::Null),
    };
    serde_json::from_str(&text).context("Parameters are not valid JSON")
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let registry = Registry::new(load_config(cli.config_dir.as_ref())?);

    match cli.command {
        Commands::List => {
            for name in registry.names() {
                println!("{}", name);
            }
        }
        Commands::Run { name, params, params_file } => {
            let params = read_params(params, params_file)?;
            let result = registry.call(&name, &params)?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::Batch { file } => {
            let text = fs::read_to_string(&file).with_context(|| format!("Failed to read {}", file.display()))?;
            let calls: Vec<BatchCall> = serde_json::from_str(&text).context("Batch file must be a JSON array of calls")?;

            let mut output = Vec::with_capacity(calls.len());
            let mut unknown = Vec::new();
            for (call, result) in calls.iter().zip(registry.evaluate_batch(&calls)) {
                match result {
                    Ok(result) => output.push(result.to_json()?),
                    Err(err) => {
                        unknown.push(call.calculator.clone());
                        output.push(serde_json::json!({ "error": err.to_string() }));
                    }
                }
            }
            println!("{}", serde_json::to_string_pretty(&output)?);

            if !unknown.is_empty() {
                bail!("Unknown calculators in batch: {}", unknown.join(", "));
            }
        }
    }

    Ok(())
}
