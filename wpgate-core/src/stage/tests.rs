use crate::conf::{ConfigSpec, Configuration, SecuritySpec, Toggle};
use std::fs;
use std::path::Path;
use tempfile::TempDir;


/// A small WordPress-shaped tree:
///
/// ```text
/// index.php
/// style.css
/// shout.PHP
/// wp-config.php
/// .env
/// subdir/index.php
/// docs/a.txt
/// wp/wp-login.php
/// wp/wp-admin/index.php
/// ```
fn site() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(root, "index.php", "<?php // front controller");
    write(root, "style.css", "body { margin: 0; }");
    write(root, "shout.PHP", "<?php echo 'static';");
    write(root, "wp-config.php", "<?php define('DB_PASSWORD', 'x');");
    write(root, ".env", "SECRET=1");
    write(root, "subdir/index.php", "<?php // subdir");
    write(root, "docs/a.txt", "alpha");
    write(root, "wp/wp-login.php", "<?php // login");
    write(root, "wp/wp-admin/index.php", "<?php // admin");
    dir
}

fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

fn spec_for(root: &Path) -> ConfigSpec {
    ConfigSpec {
        web_root: Some(root.to_path_buf()),
        lambda: Some(Toggle::Switch(false)),
        ..Default::default()
    }
}

fn config_for(root: &Path) -> Configuration {
    Configuration::from_spec(spec_for(root)).unwrap()
}

fn multisite_config_for(root: &Path) -> Configuration {
    Configuration::from_spec(ConfigSpec {
        multisite: Some(Toggle::Switch(true)),
        ..spec_for(root)
    })
    .unwrap()
}

fn listing_config_for(root: &Path) -> Configuration {
    Configuration::from_spec(ConfigSpec {
        security: Some(SecuritySpec {
            allow_directory_listing: Some(true),
            ..Default::default()
        }),
        ..spec_for(root)
    })
    .unwrap()
}
