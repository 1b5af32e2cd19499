use crate::ctx::{ResponseBody, ResponseCtx};
use bytes::Bytes;
use http::{HeaderMap, HeaderValue, StatusCode};
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use std::path::Path;

/// Render a basic HTML directory listing.
/// Assumes:
/// - `dir` has already passed the security stage
/// - the caller has confirmed directory listing is enabled
/// - no index file exists in `dir`
pub fn render_directory_listing(dir: &Path, request_path: &str) -> ResponseCtx {
    let mut names = match std::fs::read_dir(dir) {
        Ok(rd) => rd
            .filter_map(|e| e.ok())
            .map(|e| {
                let is_dir = e.file_type().map(|t| t.is_dir()).unwrap_or(false);
                (e.file_name().to_string_lossy().into_owned(), is_dir)
            })
            .filter(|(name, _)| !name.starts_with('.'))
            .collect::<Vec<_>>(),
        Err(e) => {
            tracing::error!(dir = %dir.display(), error = %e, "directory listing failed");
            return ResponseCtx::text(StatusCode::INTERNAL_SERVER_ERROR, "Directory listing failed");
        }
    };

    names.sort();

    let mut html = String::with_capacity(4096);

    html.push_str("<!DOCTYPE html>\n");
    html.push_str("<html>\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");

    html.push_str("<title>Index of ");
    html.push_str(&escape_html(request_path));
    html.push_str("</title>\n");

    html.push_str("</head>\n<body>\n");

    html.push_str("<h1>Index of ");
    html.push_str(&escape_html(request_path));
    html.push_str("</h1>\n");

    html.push_str("<ul>\n");

    // Parent link points at an absolute path so it works without a trailing slash.
    html.push_str("<li><a href=\"");
    html.push_str(&escape_html(&parent_path(request_path)));
    html.push_str("\">..</a></li>\n");

    for (name, is_dir) in names {
        html.push_str("<li><a href=\"");
        html.push_str(&escape_html(&escape_href(&name)));
        if is_dir {
            html.push('/');
        }
        html.push_str("\">");
        html.push_str(&escape_html(&name));
        if is_dir {
            html.push('/');
        }
        html.push_str("</a></li>\n");
    }

    html.push_str("</ul>\n");
    html.push_str("</body>\n</html>\n");

    let body: Bytes = html.into();

    let mut headers = HeaderMap::new();
    headers.insert(
        http::header::CONTENT_TYPE,
        HeaderValue::from_static("text/html; charset=utf-8"),
    );
    headers.insert(
        http::header::CACHE_CONTROL,
        HeaderValue::from_static("no-store"),
    );
    headers.insert(http::header::CONTENT_LENGTH, HeaderValue::from(body.len()));

    ResponseCtx::new(StatusCode::OK, headers, ResponseBody::Bytes(body))
}

/// `/a/b/` -> `/a/`, `/a/` -> `/`, `/` -> `/`
pub(crate) fn parent_path(request_path: &str) -> String {
    let trimmed = request_path.trim_end_matches('/');
    match trimmed.rsplit_once('/') {
        Some((parent, _)) if !parent.is_empty() => format!("{parent}/"),
        _ => "/".to_string(),
    }
}

/// Minimal HTML escaping (sufficient for filenames)
fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Encode a path segment for use in an HTML href attribute.
/// This is URL encoding, NOT HTML escaping.
fn escape_href(input: &str) -> String {
    const FRAGMENT: &AsciiSet = &CONTROLS
        .add(b' ')
        .add(b'"')
        .add(b'<')
        .add(b'>')
        .add(b'`')
        .add(b'#')
        .add(b'?')
        .add(b'%');

    utf8_percent_encode(input, FRAGMENT).to_string()
}
