use crate::security::{PathValidator, PathValidatorError, SecurityViolation, is_hidden_path};
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::tempdir;

fn validator(check_symlinks: bool) -> (tempfile::TempDir, PathValidator) {
    let dir = tempdir().unwrap();
    let validator = PathValidator::new(dir.path(), check_symlinks).unwrap();
    (dir, validator)
}

//-----------------------------------------------------------------------------
// Construction
//-----------------------------------------------------------------------------
#[test]
fn new_rejects_missing_web_root() {
    // Arrange
    let dir = tempdir().unwrap();
    let missing = dir.path().join("nope");

    // Act
    let result = PathValidator::new(&missing, true);

    // Assert
    assert!(matches!(result, Err(PathValidatorError::InvalidWebRoot { .. })));
}

#[test]
fn new_rejects_file_as_web_root() {
    // Arrange
    let dir = tempdir().unwrap();
    let file = dir.path().join("file.txt");
    fs::write(&file, "x").unwrap();

    // Act
    let result = PathValidator::new(&file, true);

    // Assert
    assert!(matches!(result, Err(PathValidatorError::NotADirectory { .. })));
}

//-----------------------------------------------------------------------------
// Raw path validation
//-----------------------------------------------------------------------------
#[test]
fn validate_accepts_ordinary_paths() {
    let (_dir, v) = validator(true);

    for path in ["/", "/index.php", "/wp-admin/", "/a/b.c/d", "/%20space", "/..hidden-ish"] {
        assert_eq!(v.validate(path), Ok(path), "path {path:?}");
    }
}

#[test]
fn validate_rejects_traversal_tokens_anywhere() {
    let (_dir, v) = validator(true);
    let tokens = [
        "../",
        "..\\",
        "%2e%2e/",
        "%2E%2E/",
        "%2e%2e\\",
        "%252e%252e%252f",
        "%252E%252E%255C",
    ];

    for token in tokens {
        for path in [
            format!("/{token}etc/passwd"),
            format!("/a/b/{token}"),
            format!("{token}x"),
        ] {
            assert_eq!(
                v.validate(&path),
                Err(SecurityViolation::Traversal),
                "path {path:?}"
            );
        }
    }
}

#[test]
fn validate_reports_null_byte_before_control_characters() {
    let (_dir, v) = validator(true);

    assert_eq!(v.validate("/a\0b"), Err(SecurityViolation::NullByte));
    assert_eq!(v.validate("/a\0\x01b"), Err(SecurityViolation::NullByte));
}

#[test]
fn validate_reports_null_byte_before_traversal() {
    let (_dir, v) = validator(true);

    assert_eq!(v.validate("/../\0"), Err(SecurityViolation::NullByte));
}

#[test]
fn validate_rejects_control_characters() {
    let (_dir, v) = validator(true);

    for path in ["/a\x01", "/tab\there", "/new\nline", "/del\x7f"] {
        assert_eq!(
            v.validate(path),
            Err(SecurityViolation::InvalidCharacter),
            "path {path:?}"
        );
    }
}

//-----------------------------------------------------------------------------
// Filesystem path validation
//-----------------------------------------------------------------------------
#[test]
fn validate_file_path_returns_canonical_path_and_is_idempotent() {
    // Arrange
    let (dir, v) = validator(true);
    fs::create_dir(dir.path().join("sub")).unwrap();
    fs::write(dir.path().join("sub/page.html"), "x").unwrap();
    let target = dir.path().join("sub/./page.html");

    // Act
    let first = v.validate_file_path(&target).unwrap();
    let second = v.validate_file_path(&target).unwrap();

    // Assert
    assert_eq!(first, v.web_root().join("sub/page.html"));
    assert_eq!(first, second);
}

#[test]
fn validate_file_path_accepts_missing_file_in_existing_directory() {
    let (dir, v) = validator(true);
    let target = dir.path().join("not-yet.txt");

    assert_eq!(v.validate_file_path(&target), Ok(target));
}

#[test]
fn validate_file_path_rejects_missing_parent() {
    let (dir, v) = validator(true);
    let target = dir.path().join("ghost/file.txt");

    assert_eq!(
        v.validate_file_path(&target),
        Err(SecurityViolation::OutsideRoot)
    );
}

#[test]
fn validate_file_path_rejects_parent_escape() {
    let (dir, v) = validator(true);
    let target = dir.path().join("..");

    assert_eq!(
        v.validate_file_path(&target),
        Err(SecurityViolation::OutsideRoot)
    );
}

#[test]
fn validate_file_path_rejects_sibling_with_shared_prefix() {
    // Arrange
    let parent = tempdir().unwrap();
    let root = parent.path().join("www");
    let evil = parent.path().join("www-evil");
    fs::create_dir(&root).unwrap();
    fs::create_dir(&evil).unwrap();
    fs::write(evil.join("x.php"), "x").unwrap();
    let v = PathValidator::new(&root, true).unwrap();

    // Act
    let result = v.validate_file_path(&evil.join("x.php"));

    // Assert
    assert_eq!(result, Err(SecurityViolation::OutsideRoot));
}

#[test]
fn validate_file_path_without_symlink_check_uses_component_boundary() {
    // Arrange
    let parent = tempdir().unwrap();
    let root = parent.path().join("www");
    fs::create_dir(&root).unwrap();
    let v = PathValidator::new(&root, false).unwrap();
    let real_root = v.web_root().to_path_buf();
    let sibling = real_root.with_file_name("www-evil").join("x.php");

    // Act + Assert
    assert!(v.validate_file_path(&real_root.join("a/b.php")).is_ok());
    assert_eq!(
        v.validate_file_path(&sibling),
        Err(SecurityViolation::OutsideRoot)
    );
}

#[cfg(unix)]
#[test]
fn validate_file_path_rejects_symlink_escape() {
    // Arrange
    let outside = tempdir().unwrap();
    fs::write(outside.path().join("secret.txt"), "s3cr3t").unwrap();
    let (dir, v) = validator(true);
    let link = dir.path().join("link.txt");
    std::os::unix::fs::symlink(outside.path().join("secret.txt"), &link).unwrap();

    // Act
    let result = v.validate_file_path(&link);

    // Assert
    assert_eq!(result, Err(SecurityViolation::OutsideRoot));
}

#[cfg(unix)]
#[test]
fn validate_file_path_without_symlink_check_does_not_follow_links() {
    // Arrange
    let outside = tempdir().unwrap();
    fs::write(outside.path().join("secret.txt"), "s3cr3t").unwrap();
    let (_dir, v) = validator(false);
    let link = v.web_root().join("link.txt");
    std::os::unix::fs::symlink(outside.path().join("secret.txt"), &link).unwrap();

    // Act
    let result = v.validate_file_path(&link);

    // Assert
    assert_eq!(result, Ok(link));
}

//-----------------------------------------------------------------------------
// Hidden paths
//-----------------------------------------------------------------------------
#[test]
fn hidden_path_detection() {
    assert!(is_hidden_path("/.env"));
    assert!(is_hidden_path("/wp-content/.git/config"));
    assert!(is_hidden_path(".htaccess"));
    assert!(is_hidden_path("/a/.b/"));

    assert!(!is_hidden_path("/"));
    assert!(!is_hidden_path(""));
    assert!(!is_hidden_path("/./index.php"));
    assert!(!is_hidden_path("/a/../b"));
    assert!(!is_hidden_path("/a//b"));
    assert!(!is_hidden_path("/wp-content/file.env"));
}
