use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The operator-facing configuration file format (`wpgate.hcl`).
///
/// Every field is optional. Missing values are filled in by
/// [`Configuration::from_spec`](crate::conf::Configuration::from_spec).
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ConfigSpec {
    pub web_root: Option<PathBuf>,
    pub wordpress_index: Option<String>,
    pub wp_directory: Option<String>,
    pub index_files: Option<Vec<String>>,
    pub security: Option<SecuritySpec>,
    pub multisite: Option<Toggle<MultisiteSpec>>,
    pub lambda: Option<Toggle<LambdaSpec>>,
}

/// A section that can be switched with a bare boolean or spelled out in full.
///
/// ```hcl
/// multisite = true
///
/// multisite {
///   enabled     = true
///   pattern     = "^/[a-z]+(/wp-.*)"
///   replacement = "/wp$1"
/// }
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Toggle<T> {
    Switch(bool),
    Detailed(T),
}

/// Keys given here override the defaults one by one.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct SecuritySpec {
    pub allow_directory_listing: Option<bool>,
    pub check_symlinks: Option<bool>,
    pub blocked_patterns: Option<Vec<String>>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct MultisiteSpec {
    #[serde(default)]
    pub enabled: bool,
    pub pattern: Option<String>,
    pub replacement: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct LambdaSpec {
    /// `None` leaves the decision to platform auto-detection.
    pub enabled: Option<bool>,
    pub directories: Option<Vec<PathBuf>>,
}
