use bytes::Bytes;
use http::{HeaderMap, HeaderValue, StatusCode};
use std::fs;

pub enum ResponseBody {
    Empty,
    /// Small files, listings and error messages.
    Bytes(Bytes),
    /// Large files, left for the host to stream.
    File(fs::File),
}

impl std::fmt::Debug for ResponseBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "Empty"),
            Self::Bytes(b) => write!(f, "Bytes({} bytes)", b.len()),
            Self::File(_) => write!(f, "File"),
        }
    }
}

/// A response produced directly by the pipeline.
#[derive(Debug)]
pub struct ResponseCtx {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: ResponseBody,
}

impl ResponseCtx {
    pub fn new(status: StatusCode, headers: HeaderMap, body: ResponseBody) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Plain-text response with a fixed body.
    pub fn text(status: StatusCode, body: impl Into<Bytes>) -> Self {
        let body = body.into();
        let mut headers = HeaderMap::new();
        headers.insert(
            http::header::CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        );
        headers.insert(http::header::CONTENT_LENGTH, HeaderValue::from(body.len()));

        Self::new(status, headers, ResponseBody::Bytes(body))
    }

    /// Redirect that keeps the method and body (`307`).
    ///
    /// A target that is not a valid header value yields a `500`; a redirect
    /// without `Location` would leave the client nowhere to go.
    pub fn temporary_redirect(location: &str) -> Self {
        let value = match HeaderValue::from_str(location) {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!(
                    location = %location.escape_debug(),
                    "redirect target is not a valid header value"
                );
                return Self::text(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error");
            }
        };

        let mut headers = HeaderMap::new();
        headers.insert(http::header::LOCATION, value);
        headers.insert(http::header::CONTENT_LENGTH, HeaderValue::from_static("0"));

        Self::new(StatusCode::TEMPORARY_REDIRECT, headers, ResponseBody::Empty)
    }

    pub fn not_found() -> Self {
        Self::text(StatusCode::NOT_FOUND, "Not Found")
    }

    pub fn header(&self, name: http::header::HeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Buffered body bytes, `None` for streamed files.
    pub fn body_bytes(&self) -> Option<&[u8]> {
        match &self.body {
            ResponseBody::Empty => Some(&[][..]),
            ResponseBody::Bytes(b) => Some(b.as_ref()),
            ResponseBody::File(_) => None,
        }
    }
}
