use crate::conf::ConfigError;
use crate::conf::types::{
    ConfigSpec, Configuration, LambdaConfig, LambdaSpec, MultisiteConfig, MultisiteSpec,
    SecurityConfig, Toggle,
};
use crate::environment::{EnvSource, Platform};
use regex::Regex;
use serde_json::json;
use std::path::PathBuf;

pub const DEFAULT_MULTISITE_PATTERN: &str = r"^/[_0-9a-zA-Z-]+(/wp-.*)";
pub const DEFAULT_MULTISITE_REPLACEMENT: &str = "/wp$1";
pub const DEFAULT_WORDPRESS_INDEX: &str = "/index.php";
pub const DEFAULT_WP_DIRECTORY: &str = "/wp";
pub const DEFAULT_INDEX_FILES: [&str; 3] = ["index.php", "index.html", "index.htm"];
pub const DEFAULT_LAMBDA_DIRECTORIES: [&str; 3] = ["/tmp/uploads", "/tmp/cache", "/tmp/sessions"];
pub const DEFAULT_BLOCKED_PATTERNS: [&str; 6] = [
    r"\.git",
    r"\.env",
    r"\.htaccess",
    r"composer\.(json|lock)",
    r"wp-config\.php",
    r"(?i)readme\.(txt|html|md)",
];

pub(crate) fn normalize(spec: ConfigSpec, env: &dyn EnvSource) -> Result<Configuration, ConfigError> {
    let web_root = match spec.web_root {
        Some(root) => root,
        None => std::env::current_dir().map_err(|source| ConfigError::WebRoot { source })?,
    };

    let security = normalize_security(spec.security.unwrap_or_default())?;
    let multisite = normalize_multisite(spec.multisite);
    let lambda = normalize_lambda(spec.lambda, env);

    let wordpress_index = spec
        .wordpress_index
        .unwrap_or_else(|| DEFAULT_WORDPRESS_INDEX.to_string());
    if !wordpress_index.starts_with('/') {
        return Err(ConfigError::InvalidEntryPath {
            path: wordpress_index,
        });
    }

    let wp_directory = spec
        .wp_directory
        .unwrap_or_else(|| DEFAULT_WP_DIRECTORY.to_string());

    let index_files = spec
        .index_files
        .unwrap_or_else(|| DEFAULT_INDEX_FILES.iter().map(|s| s.to_string()).collect());
    if index_files.is_empty() {
        return Err(ConfigError::EmptyIndexFiles);
    }
    if let Some(bad) = index_files
        .iter()
        .find(|name| name.is_empty() || name.contains('/') || name.contains('\\') || *name == "..")
    {
        return Err(ConfigError::InvalidIndexFile { name: bad.clone() });
    }

    let tree = json!({
        "web_root": web_root.display().to_string(),
        "security": {
            "allow_directory_listing": security.allow_directory_listing,
            "check_symlinks": security.check_symlinks,
            "blocked_patterns": security
                .blocked_patterns
                .iter()
                .map(|r| r.as_str())
                .collect::<Vec<_>>(),
        },
        "multisite": {
            "enabled": multisite.enabled,
            "pattern": multisite.pattern,
            "replacement": multisite.replacement,
        },
        "lambda": {
            "enabled": lambda.enabled,
            "directories": lambda
                .directories
                .iter()
                .map(|d| d.display().to_string())
                .collect::<Vec<_>>(),
        },
        "wordpress_index": wordpress_index,
        "wp_directory": wp_directory,
        "index_files": index_files,
    });

    Ok(Configuration {
        web_root,
        security,
        multisite,
        lambda,
        wordpress_index,
        wp_directory,
        index_files,
        tree,
    })
}

fn normalize_security(spec: crate::conf::SecuritySpec) -> Result<SecurityConfig, ConfigError> {
    let patterns = spec.blocked_patterns.unwrap_or_else(|| {
        DEFAULT_BLOCKED_PATTERNS
            .iter()
            .map(|s| s.to_string())
            .collect()
    });

    // Invalid blocked patterns are rejected, never skipped.
    let blocked_patterns = patterns
        .into_iter()
        .map(|pattern| {
            Regex::new(&pattern).map_err(|source| ConfigError::InvalidPattern { pattern, source })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SecurityConfig {
        allow_directory_listing: spec.allow_directory_listing.unwrap_or(false),
        check_symlinks: spec.check_symlinks.unwrap_or(true),
        blocked_patterns,
    })
}

fn normalize_multisite(spec: Option<Toggle<MultisiteSpec>>) -> MultisiteConfig {
    let spec = match spec {
        Some(Toggle::Switch(true)) => MultisiteSpec {
            enabled: true,
            pattern: Some(DEFAULT_MULTISITE_PATTERN.to_string()),
            replacement: Some(DEFAULT_MULTISITE_REPLACEMENT.to_string()),
        },
        Some(Toggle::Switch(false)) | None => MultisiteSpec::default(),
        Some(Toggle::Detailed(spec)) => spec,
    };

    let regex = spec
        .pattern
        .as_deref()
        .filter(|p| !p.is_empty())
        .and_then(|pattern| match Regex::new(pattern) {
            Ok(regex) => Some(regex),
            Err(e) => {
                tracing::warn!(pattern, error = %e, "multisite pattern does not compile; rewriting disabled");
                None
            }
        });

    MultisiteConfig {
        enabled: spec.enabled,
        pattern: spec.pattern,
        replacement: spec.replacement,
        regex,
    }
}

fn normalize_lambda(spec: Option<Toggle<LambdaSpec>>, env: &dyn EnvSource) -> LambdaConfig {
    let (enabled, directories) = match spec {
        Some(Toggle::Switch(enabled)) => (Some(enabled), None),
        Some(Toggle::Detailed(spec)) => (spec.enabled, spec.directories),
        None => (None, None),
    };

    let enabled = enabled.unwrap_or_else(|| Platform::detect(env) == Platform::Lambda);

    let directories = if enabled {
        directories.unwrap_or_else(|| {
            DEFAULT_LAMBDA_DIRECTORIES
                .iter()
                .map(PathBuf::from)
                .collect()
        })
    } else {
        Vec::new()
    };

    LambdaConfig {
        enabled,
        directories,
    }
}
