use crate::ctx::{ResponseBody, ResponseCtx};
use crate::static_files::content_type_for;
use bytes::Bytes;
use http::{HeaderMap, HeaderValue, StatusCode};
use httpdate::fmt_http_date;
use std::fs;
use std::io::Read;
use std::path::Path;

const SMALL_FILE_THRESHOLD: u64 = 64 * 1024; // 64 KiB

#[derive(Debug)]
pub enum ServeError {
    NotFound,
    Forbidden,
    Io(std::io::Error),
}

/// Build a `200` response for a regular file.
pub fn render_file(path: &Path) -> Result<ResponseCtx, ServeError> {
    let metadata = fs::metadata(path).map_err(|_| ServeError::NotFound)?;

    if !metadata.is_file() {
        return Err(ServeError::NotFound);
    }

    let mut file = fs::File::open(path).map_err(|err| match err.kind() {
        std::io::ErrorKind::NotFound => ServeError::NotFound,
        std::io::ErrorKind::PermissionDenied => ServeError::Forbidden,
        _ => ServeError::Io(err),
    })?;

    let mime = content_type_for(path);

    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_str(&mime) {
        headers.insert(http::header::CONTENT_TYPE, value);
    }
    headers.insert(http::header::CONTENT_LENGTH, HeaderValue::from(metadata.len()));
    if let Some(modified) = metadata.modified().ok().map(fmt_http_date) {
        if let Ok(value) = HeaderValue::from_str(&modified) {
            headers.insert(http::header::LAST_MODIFIED, value);
        }
    }

    if metadata.len() <= SMALL_FILE_THRESHOLD {
        let mut buf = Vec::with_capacity(metadata.len() as usize);
        file.read_to_end(&mut buf).map_err(ServeError::Io)?;

        return Ok(ResponseCtx::new(
            StatusCode::OK,
            headers,
            ResponseBody::Bytes(Bytes::from(buf)),
        ));
    }

    Ok(ResponseCtx::new(
        StatusCode::OK,
        headers,
        ResponseBody::File(file),
    ))
}
