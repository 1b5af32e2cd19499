mod check;
mod dump;

pub use check::*;
use clap::Subcommand;
pub use dump::*;
use std::path::PathBuf;

use crate::cli::DEFAULT_CONFIG_PATH;

#[derive(Subcommand, Debug)]
pub enum ConfigCmd {
    /// Validate configuration and exit
    Check {
        /// Path to config file
        #[arg(default_value = DEFAULT_CONFIG_PATH)]
        path: PathBuf,

        /// Plain output without colors
        #[arg(short, long)]
        plain: bool,
    },

    /// Print the normalized configuration as JSON
    Dump {
        #[arg(default_value = DEFAULT_CONFIG_PATH)]
        path: PathBuf,
    },

    /// Print one value by dotted key, e.g. `security.check_symlinks`
    Get {
        key: String,

        #[arg(long, short, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,
    },
}

pub fn run(cmd: ConfigCmd) -> anyhow::Result<()> {
    match cmd {
        ConfigCmd::Check { path, plain } => check(path, plain),
        ConfigCmd::Dump { path } => dump(path),
        ConfigCmd::Get { key, config } => get(config, &key),
    }
}
