use crate::ctx::{
    PHP_SELF, QUERY_STRING, REQUEST_METHOD, REQUEST_URI, RequestCtx, SCRIPT_FILENAME, SCRIPT_NAME,
    join_web_path,
};
use http::Method;
use pretty_assertions::assert_eq;
use std::path::{Path, PathBuf};

#[test]
fn new_splits_path_and_query() {
    // Act
    let ctx = RequestCtx::new(Method::GET, "/blog/?p=1&x=2");

    // Assert
    assert_eq!(ctx.original_path(), "/blog/");
    assert_eq!(ctx.working_path(), "/blog/");
    assert_eq!(ctx.query_string(), "p=1&x=2");
    assert_eq!(ctx.request_uri(), "/blog/?p=1&x=2");
    assert_eq!(ctx.server.get(PHP_SELF).unwrap(), "/blog/");
    assert_eq!(ctx.server.get(QUERY_STRING).unwrap(), "p=1&x=2");
    assert_eq!(ctx.server.get(REQUEST_METHOD).unwrap(), "GET");
    assert!(ctx.resolved_script().is_none());
    assert!(ctx.annotations.is_empty());
}

#[test]
fn new_keeps_raw_encoded_path() {
    let ctx = RequestCtx::new(Method::GET, "/%2e%2e/etc/passwd");

    assert_eq!(ctx.working_path(), "/%2e%2e/etc/passwd");
}

#[test]
fn empty_path_works_on_root() {
    // Act
    let ctx = RequestCtx::new(Method::GET, "?a=1");

    // Assert
    assert_eq!(ctx.original_path(), "");
    assert_eq!(ctx.working_path(), "/");
    assert_eq!(ctx.query_string(), "a=1");
}

#[test]
fn from_http_reads_method_and_target() {
    // Arrange
    let req = http::Request::builder()
        .method(Method::POST)
        .uri("https://example.test/wp-login.php?action=login")
        .body(())
        .unwrap();

    // Act
    let ctx = RequestCtx::from_http(&req);

    // Assert
    assert_eq!(ctx.method(), &Method::POST);
    assert_eq!(ctx.original_path(), "/wp-login.php");
    assert_eq!(ctx.query_string(), "action=login");
    assert_eq!(ctx.request_uri(), "/wp-login.php?action=login");
}

#[test]
fn host_server_vars_cannot_override_script_vars() {
    // Act
    let ctx = RequestCtx::new(Method::GET, "/x").with_server_vars([
        ("SCRIPT_FILENAME", "/var/task/handler.php"),
        ("SCRIPT_NAME", "/handler.php"),
        ("HTTP_HOST", "example.test"),
    ]);

    // Assert
    assert!(!ctx.server.contains_key(SCRIPT_FILENAME));
    assert!(!ctx.server.contains_key(SCRIPT_NAME));
    assert_eq!(ctx.server.get("HTTP_HOST").unwrap(), "example.test");
}

#[test]
fn set_working_path_keeps_leading_slash_and_php_self() {
    // Arrange
    let mut ctx = RequestCtx::new(Method::GET, "/a");

    // Act
    ctx.set_working_path("b/index.php");

    // Assert
    assert_eq!(ctx.working_path(), "/b/index.php");
    assert_eq!(ctx.server.get(PHP_SELF).unwrap(), "/b/index.php");
    assert_eq!(ctx.original_path(), "/a");
    assert_eq!(ctx.server.get(REQUEST_URI).unwrap(), "/a");
}

#[test]
fn resolve_script_records_script_vars() {
    // Arrange
    let mut ctx = RequestCtx::new(Method::GET, "/");

    // Act
    ctx.resolve_script("/index.php", PathBuf::from("/srv/www/index.php"));

    // Assert
    let script = ctx.resolved_script().unwrap();
    assert_eq!(script.url_path, "/index.php");
    assert_eq!(script.filesystem_path, PathBuf::from("/srv/www/index.php"));
    assert_eq!(ctx.server.get(SCRIPT_NAME).unwrap(), "/index.php");
    assert_eq!(
        ctx.server.get(SCRIPT_FILENAME).unwrap(),
        "/srv/www/index.php"
    );
}

#[test]
fn join_web_path_never_escapes_through_absolute_join() {
    let root = Path::new("/srv/www");

    assert_eq!(join_web_path(root, "/"), PathBuf::from("/srv/www"));
    assert_eq!(join_web_path(root, "//etc/passwd"), PathBuf::from("/srv/www/etc/passwd"));
    assert_eq!(join_web_path(root, "/a/b.css"), PathBuf::from("/srv/www/a/b.css"));
}
