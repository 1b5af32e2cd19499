use crate::conf::{ConfigError, Configuration, load_config};
use crate::ctx::join_web_path;
use crate::security::PathValidator;
use owo_colors::OwoColorize;
use std::path::PathBuf;

pub fn check(path: PathBuf, plain: bool) -> anyhow::Result<()> {
    let cfg = match load_config(&path) {
        Ok(cfg) => cfg,
        Err(err) => {
            print_config_error(&err, plain);
            std::process::exit(1);
        }
    };

    let problems = deployment_problems(&cfg);
    if !problems.is_empty() {
        for problem in &problems {
            if plain {
                eprintln!("error: {problem}");
            } else {
                eprintln!("{}: {problem}", "error".red().bold());
            }
        }
        std::process::exit(1);
    }

    println!("✔ Config loaded successfully");
    println!("✔ web root {}", cfg.web_root.display());
    println!("✔ front controller {}", cfg.wordpress_index);
    println!(
        "✔ {} blocked patterns",
        cfg.security.blocked_patterns.len()
    );
    println!(
        "✔ multisite {}",
        if cfg.multisite.enabled {
            "enabled"
        } else {
            "disabled"
        }
    );
    println!(
        "✔ platform {}",
        if cfg.lambda.enabled {
            "lambda"
        } else {
            "standard"
        }
    );

    Ok(())
}

/// Problems that parse fine but would fail every request.
fn deployment_problems(cfg: &Configuration) -> Vec<String> {
    let mut problems = Vec::new();

    if let Err(e) = PathValidator::new(&cfg.web_root, cfg.security.check_symlinks) {
        problems.push(e.to_string());
        return problems;
    }

    let index = join_web_path(&cfg.web_root, &cfg.wordpress_index);
    if !index.is_file() {
        problems.push(format!("front controller not found at {}", index.display()));
    }

    if cfg.multisite.enabled && cfg.multisite.rewrite_rule().is_none() {
        problems.push("multisite is enabled but has no usable pattern/replacement".to_string());
    }

    problems
}

fn print_config_error(err: &ConfigError, plain: bool) {
    if plain {
        eprintln!("{err}");
    } else {
        eprintln!();
        eprintln!("{}: {err}", "error".red().bold());
    }
    if let Some(hint) = config_error_hint(err) {
        eprintln!();
        eprintln!("{hint}");
    }
}

pub fn config_error_hint(err: &ConfigError) -> Option<&'static str> {
    match err {
        ConfigError::ReadFile { .. } => Some(
            "Pass the path to a wpgate.hcl file, or run from the directory that holds it.",
        ),

        ConfigError::InvalidPattern { .. } => Some(
            "Blocked patterns use Rust regex syntax. Escape literal dots.\n\
             \n\
             Example:\n\
             \n\
             security {\n\
             \x20 blocked_patterns = [\"\\\\.git\", \"wp-config\\\\.php\"]\n\
             }",
        ),

        ConfigError::EmptyIndexFiles | ConfigError::InvalidIndexFile { .. } => Some(
            "index_files lists plain file names looked up inside each directory.\n\
             \n\
             Example:\n\
             \n\
             index_files = [\"index.php\", \"index.html\"]",
        ),

        ConfigError::InvalidEntryPath { .. } => Some(
            "wordpress_index is a URL path relative to the web root and must start with '/'.\n\
             \n\
             Example:\n\
             \n\
             wordpress_index = \"/index.php\"",
        ),

        _ => None,
    }
}
