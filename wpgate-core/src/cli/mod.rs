pub mod conf;
pub mod env;
pub mod resolve;

use crate::logging::LogMode;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_PATH: &str = "wpgate.hcl";

#[derive(Parser, Debug)]
#[command(
    name = "wpgate",
    version,
    about = "wpgate: WordPress front-controller request router"
)]
pub struct Cli {
    /// Log output format (defaults to pretty on a terminal, JSON otherwise)
    #[arg(long, global = true, value_enum)]
    pub log: Option<LogMode>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Route a request through the pipeline and print the outcome
    Resolve {
        /// Request target, e.g. `/blog/hello-world?p=1`
        uri: String,

        #[arg(long, short = 'X', default_value = "GET")]
        method: String,

        /// Path to the config file
        #[arg(long, short, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,

        /// Compact JSON instead of pretty-printed
        #[arg(long)]
        raw: bool,
    },

    /// Configuration tooling
    Config {
        #[command(subcommand)]
        cmd: conf::ConfigCmd,
    },

    /// Print the detected platform
    Env {
        #[arg(long, short, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,
    },
}

/// Dispatch a parsed command line. Logging must already be initialized.
pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Resolve {
            uri,
            method,
            config,
            raw,
        } => resolve::run(&uri, &method, &config, raw),
        Command::Config { cmd } => conf::run(cmd),
        Command::Env { config } => env::run(&config),
    }
}

fn print_json<T: serde::Serialize>(value: &T, raw: bool) -> anyhow::Result<()> {
    let s = if raw {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    println!("{s}");
    Ok(())
}
