use crate::conf::ConfigError;
use crate::conf::types::{ConfigSpec, Configuration};
use std::fs;
use std::path::Path;

/// Read and parse a config file without normalizing it.
pub fn load_spec(path: &Path) -> Result<ConfigSpec, ConfigError> {
    let s = fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
    let mut spec: ConfigSpec = hcl::from_str(&s).map_err(|e| ConfigError::parse(path, e))?;

    // A relative web root is anchored at the directory holding the config file.
    if let Some(web_root) = spec.web_root.as_ref().filter(|p| p.is_relative()) {
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        spec.web_root = Some(base.join(web_root));
    }

    Ok(spec)
}

pub fn load_config(path: &Path) -> Result<Configuration, ConfigError> {
    let spec = load_spec(path)?;
    Configuration::from_spec(spec)
}
