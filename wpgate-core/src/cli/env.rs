use crate::conf::load_config;
use crate::environment::Environment;
use anyhow::Context;
use std::path::Path;

pub fn run(config: &Path) -> anyhow::Result<()> {
    let cfg = load_config(config).with_context(|| format!("loading {}", config.display()))?;
    let env = Environment::new(&cfg);
    crate::cli::print_json(&env.info(), false)
}
