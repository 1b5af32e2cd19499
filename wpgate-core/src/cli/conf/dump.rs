use crate::conf::load_config;
use anyhow::{Context, bail};
use serde_json::Value;
use std::path::PathBuf;

pub fn dump(path: PathBuf) -> anyhow::Result<()> {
    let cfg = load_config(&path)?;
    crate::cli::print_json(cfg.all(), false)
}

pub fn get(path: PathBuf, key: &str) -> anyhow::Result<()> {
    let cfg = load_config(&path).with_context(|| format!("loading {}", path.display()))?;

    match cfg.get(key) {
        // Bare strings print without quotes so the output can be used in scripts.
        Some(Value::String(s)) => println!("{s}"),
        Some(value) => crate::cli::print_json(value, false)?,
        None => bail!("no configuration value at '{key}'"),
    }

    Ok(())
}
