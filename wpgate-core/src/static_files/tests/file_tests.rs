use crate::ctx::ResponseBody;
use crate::static_files::{ServeError, content_type_for, render_file};
use http::StatusCode;
use http::header::{CONTENT_LENGTH, CONTENT_TYPE, LAST_MODIFIED};
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::tempdir;

#[test]
fn content_type_prefers_extension() {
    // Arrange
    let dir = tempdir().unwrap();
    let css = dir.path().join("style.css");
    fs::write(&css, "body { color: red; }").unwrap();

    // Act + Assert
    assert_eq!(content_type_for(&css), "text/css");
}

#[test]
fn content_type_sniffs_unknown_extensions() {
    // Arrange
    let dir = tempdir().unwrap();
    let png = dir.path().join("blob.unknownext");
    fs::write(&png, b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR").unwrap();
    let text = dir.path().join("LICENSE");
    fs::write(&text, "plain words\n").unwrap();
    let binary = dir.path().join("data.unknownext");
    fs::write(&binary, [0u8, 1, 2, 3, 0xfe]).unwrap();

    // Act + Assert
    assert_eq!(content_type_for(&png), "image/png");
    assert_eq!(content_type_for(&text), "text/plain");
    assert_eq!(content_type_for(&binary), "application/octet-stream");
}

#[test]
fn render_small_file_buffers_body_and_sets_headers() {
    // Arrange
    let dir = tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    fs::write(&path, "console.log(1);").unwrap();

    // Act
    let resp = render_file(&path).unwrap();

    // Assert
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.header(CONTENT_TYPE), Some("text/plain"));
    assert_eq!(resp.header(CONTENT_LENGTH), Some("15"));
    assert!(resp.headers.contains_key(LAST_MODIFIED));
    assert_eq!(resp.body_bytes(), Some(&b"console.log(1);"[..]));
}

#[test]
fn render_large_file_streams_from_disk() {
    // Arrange
    let dir = tempdir().unwrap();
    let path = dir.path().join("big.bin");
    fs::write(&path, vec![b'a'; 200 * 1024]).unwrap();

    // Act
    let resp = render_file(&path).unwrap();

    // Assert
    assert!(matches!(resp.body, ResponseBody::File(_)));
    assert_eq!(resp.header(CONTENT_LENGTH), Some("204800"));
}

#[test]
fn render_missing_file_is_not_found() {
    let dir = tempdir().unwrap();

    let result = render_file(&dir.path().join("missing.txt"));

    assert!(matches!(result, Err(ServeError::NotFound)));
}

#[test]
fn render_directory_is_not_found() {
    let dir = tempdir().unwrap();

    let result = render_file(dir.path());

    assert!(matches!(result, Err(ServeError::NotFound)));
}
