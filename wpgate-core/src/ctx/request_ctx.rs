use crate::ctx::Annotations;
use http::Method;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const PHP_SELF: &str = "PHP_SELF";
pub const SCRIPT_NAME: &str = "SCRIPT_NAME";
pub const SCRIPT_FILENAME: &str = "SCRIPT_FILENAME";
pub const REQUEST_URI: &str = "REQUEST_URI";
pub const REQUEST_METHOD: &str = "REQUEST_METHOD";
pub const QUERY_STRING: &str = "QUERY_STRING";
pub const PATH_INFO: &str = "PATH_INFO";

/// The script a request will be handed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedScript {
    /// URL path of the script as seen by the application (`SCRIPT_NAME`).
    pub url_path: String,
    /// Absolute path on disk (`SCRIPT_FILENAME`).
    pub filesystem_path: PathBuf,
}

/// Per-request state threaded through the pipeline.
///
/// Owned by exactly one pipeline run. `original_path`, `query_string` and
/// `method` never change after hydration; stages only move `working_path`
/// and settle `resolved_script`.
#[derive(Debug, Clone)]
pub struct RequestCtx {
    original_path: String,
    working_path: String,
    query_string: String,
    method: Method,
    resolved_script: Option<ResolvedScript>,

    /// Server variables exposed to the script on handoff.
    pub server: BTreeMap<String, String>,

    /// Observability facts, see [`Annotations`].
    pub annotations: Annotations,
}

/// Hydration API
impl RequestCtx {
    /// Build a context from a raw request target (`/path?query`).
    ///
    /// Nothing is decoded or validated here; the security stage has to see
    /// the path exactly as the client sent it.
    pub fn new(method: Method, request_uri: &str) -> Self {
        let (path, query) = match request_uri.split_once('?') {
            Some((path, query)) => (path, query),
            None => (request_uri, ""),
        };

        let working_path = if path.is_empty() {
            "/".to_string()
        } else if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };

        let mut server = BTreeMap::new();
        server.insert(REQUEST_URI.to_string(), request_uri.to_string());
        server.insert(REQUEST_METHOD.to_string(), method.as_str().to_string());
        server.insert(QUERY_STRING.to_string(), query.to_string());
        server.insert(PHP_SELF.to_string(), working_path.clone());

        Self {
            original_path: path.to_string(),
            working_path,
            query_string: query.to_string(),
            method,
            resolved_script: None,
            server,
            annotations: Annotations::default(),
        }
    }

    /// Build a context from an `http` request, keeping any extra server
    /// variables the host supplied in `server`.
    pub fn from_http<B>(req: &http::Request<B>) -> Self {
        let uri = req.uri();
        let target = uri
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or_else(|| uri.path());
        Self::new(req.method().clone(), target)
    }

    /// Merge host-provided server variables. Stale script variables left over
    /// from the entrypoint itself are dropped.
    pub fn with_server_vars<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (k, v) in vars {
            let k = k.into();
            if k == SCRIPT_NAME || k == SCRIPT_FILENAME || k == PHP_SELF || k == REQUEST_URI {
                continue;
            }
            self.server.insert(k, v.into());
        }
        self
    }
}

/// Accessors
impl RequestCtx {
    pub fn original_path(&self) -> &str {
        &self.original_path
    }

    pub fn working_path(&self) -> &str {
        &self.working_path
    }

    pub fn query_string(&self) -> &str {
        &self.query_string
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn request_uri(&self) -> &str {
        self.server
            .get(REQUEST_URI)
            .map(String::as_str)
            .unwrap_or(&self.original_path)
    }

    pub fn resolved_script(&self) -> Option<&ResolvedScript> {
        self.resolved_script.as_ref()
    }

    /// Move the working path. A missing leading slash is added.
    pub fn set_working_path(&mut self, path: impl Into<String>) {
        let path = path.into();
        self.working_path = if path.starts_with('/') {
            path
        } else {
            format!("/{path}")
        };
        self.server
            .insert(PHP_SELF.to_string(), self.working_path.clone());
    }

    /// Settle the script to execute.
    pub fn resolve_script(&mut self, url_path: impl Into<String>, filesystem_path: PathBuf) {
        let url_path = url_path.into();
        self.server.insert(SCRIPT_NAME.to_string(), url_path.clone());
        self.server.insert(
            SCRIPT_FILENAME.to_string(),
            filesystem_path.display().to_string(),
        );
        self.resolved_script = Some(ResolvedScript {
            url_path,
            filesystem_path,
        });
    }

    /// `web_root` joined with the working path, without touching the disk.
    pub fn filesystem_path(&self, web_root: &Path) -> PathBuf {
        join_web_path(web_root, &self.working_path)
    }
}

/// Map a URL path onto the web root. The URL path is never decoded.
pub fn join_web_path(web_root: &Path, url_path: &str) -> PathBuf {
    let relative = url_path.trim_start_matches('/');
    if relative.is_empty() {
        web_root.to_path_buf()
    } else {
        web_root.join(relative)
    }
}
