use crate::conf::ConfigError;
use crate::conf::normalize::normalize;
use crate::conf::types::ConfigSpec;
use crate::environment::{EnvSource, ProcessEnv};
use regex::Regex;
use serde_json::Value;
use std::path::PathBuf;

/// Fully normalized, read-only settings shared by every pipeline stage.
///
/// Built once from a [`ConfigSpec`] and never mutated afterwards, so a single
/// instance can be shared by reference across concurrent requests.
#[derive(Debug, Clone)]
pub struct Configuration {
    pub web_root: PathBuf,
    pub security: SecurityConfig,
    pub multisite: MultisiteConfig,
    pub lambda: LambdaConfig,
    /// URL path of the front controller every unmatched request falls back to.
    pub wordpress_index: String,
    pub wp_directory: String,
    /// Directory index candidates, earlier entries win.
    pub index_files: Vec<String>,
    pub(crate) tree: Value,
}

#[derive(Debug, Clone)]
pub struct SecurityConfig {
    pub allow_directory_listing: bool,
    pub check_symlinks: bool,
    pub blocked_patterns: Vec<Regex>,
}

#[derive(Debug, Clone)]
pub struct MultisiteConfig {
    pub enabled: bool,
    pub pattern: Option<String>,
    pub replacement: Option<String>,
    /// Compiled `pattern`; `None` when missing or malformed.
    pub(crate) regex: Option<Regex>,
}

#[derive(Debug, Clone)]
pub struct LambdaConfig {
    pub enabled: bool,
    pub directories: Vec<PathBuf>,
}

impl Configuration {
    pub fn from_spec(spec: ConfigSpec) -> Result<Self, ConfigError> {
        normalize(spec, &ProcessEnv)
    }

    /// Same as [`Configuration::from_spec`], reading platform hints from `env`.
    pub fn from_spec_with_env(spec: ConfigSpec, env: &dyn EnvSource) -> Result<Self, ConfigError> {
        normalize(spec, env)
    }

    /// Look up a value by dotted path, e.g. `security.check_symlinks`.
    ///
    /// Array elements are addressed by index (`index_files.0`).
    pub fn get(&self, key: &str) -> Option<&Value> {
        key.split('.')
            .try_fold(&self.tree, |value, segment| match value {
                Value::Object(map) => map.get(segment),
                Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
                _ => None,
            })
            .filter(|v| !v.is_null())
    }

    pub fn all(&self) -> &Value {
        &self.tree
    }
}

impl MultisiteConfig {
    pub(crate) fn rewrite_rule(&self) -> Option<(&Regex, &str)> {
        match (&self.regex, self.replacement.as_deref()) {
            (Some(regex), Some(replacement)) if !replacement.is_empty() => {
                Some((regex, replacement))
            }
            _ => None,
        }
    }
}
