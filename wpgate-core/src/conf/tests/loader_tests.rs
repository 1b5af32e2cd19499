use crate::conf::{ConfigError, Toggle, load_config, load_spec};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::fs;
use tempfile::tempdir;

#[test]
fn loads_full_config_file() {
    // Arrange
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("public")).unwrap();
    let path = dir.path().join("wpgate.hcl");
    fs::write(
        &path,
        r#"
web_root        = "public"
wordpress_index = "/index.php"
index_files     = ["index.php", "index.html"]

security {
  allow_directory_listing = true
  check_symlinks          = false
  blocked_patterns        = ["\\.git", "wp-config\\.php"]
}

multisite {
  enabled     = true
  pattern     = "^/[a-z]+(/wp-.*)"
  replacement = "/core$1"
}

lambda = false
"#,
    )
    .unwrap();

    // Act
    let cfg = load_config(&path).unwrap();

    // Assert
    assert_eq!(cfg.web_root, dir.path().join("public"));
    assert_eq!(cfg.index_files, vec!["index.php", "index.html"]);
    assert!(cfg.security.allow_directory_listing);
    assert!(!cfg.security.check_symlinks);
    assert_eq!(cfg.security.blocked_patterns.len(), 2);
    assert!(cfg.multisite.enabled);
    assert_eq!(cfg.get("multisite.replacement"), Some(&json!("/core$1")));
    assert!(!cfg.lambda.enabled);
}

#[test]
fn multisite_accepts_a_bare_switch() {
    // Arrange
    let dir = tempdir().unwrap();
    let path = dir.path().join("wpgate.hcl");
    fs::write(&path, "multisite = true\n").unwrap();

    // Act
    let spec = load_spec(&path).unwrap();

    // Assert
    assert!(matches!(spec.multisite, Some(Toggle::Switch(true))));
    assert!(spec.web_root.is_none());
}

#[test]
fn absolute_web_root_is_kept() {
    // Arrange
    let dir = tempdir().unwrap();
    let path = dir.path().join("wpgate.hcl");
    fs::write(&path, "web_root = \"/srv/wordpress\"\n").unwrap();

    // Act
    let spec = load_spec(&path).unwrap();

    // Assert
    assert_eq!(spec.web_root, Some("/srv/wordpress".into()));
}

#[test]
fn missing_file_is_a_read_error() {
    // Arrange
    let dir = tempdir().unwrap();
    let path = dir.path().join("nope.hcl");

    // Act
    let err = load_spec(&path).unwrap_err();

    // Assert
    assert!(matches!(err, ConfigError::ReadFile { .. }), "{err}");
    assert!(err.to_string().contains("nope.hcl"));
}

#[test]
fn malformed_hcl_is_a_parse_error() {
    // Arrange
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.hcl");
    fs::write(&path, "security {\n  check_symlinks = \n").unwrap();

    // Act
    let err = load_spec(&path).unwrap_err();

    // Assert
    assert!(matches!(err, ConfigError::Parse { .. }), "{err}");
}
