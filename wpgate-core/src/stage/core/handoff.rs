use crate::ctx::{
    Annotations, PATH_INFO, PHP_SELF, REQUEST_URI, RequestCtx, SCRIPT_FILENAME, SCRIPT_NAME,
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Everything the host needs to execute the resolved script.
///
/// The pipeline never runs the script itself. The host is expected to
/// change into `working_dir`, export `server` and run `script_filename`.
#[derive(Debug, Clone, Serialize)]
pub struct ScriptHandoff {
    pub script_filename: PathBuf,
    pub working_dir: PathBuf,
    pub server: BTreeMap<String, String>,
    pub annotations: Annotations,
}

impl ScriptHandoff {
    /// `None` when no script was resolved or it vanished since resolution.
    pub(crate) fn prepare(ctx: RequestCtx) -> Option<Self> {
        let script = ctx.resolved_script()?.clone();
        if !script.filesystem_path.is_file() {
            return None;
        }

        let script_filename =
            std::path::absolute(&script.filesystem_path).unwrap_or(script.filesystem_path);
        let working_dir = script_filename
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("/"));

        let php_self = ctx.working_path().to_string();
        let request_uri = ctx.request_uri().to_string();

        let mut server = ctx.server;
        server.remove(PATH_INFO);
        server.insert(PHP_SELF.to_string(), php_self);
        server.insert(SCRIPT_NAME.to_string(), script.url_path);
        server.insert(
            SCRIPT_FILENAME.to_string(),
            script_filename.display().to_string(),
        );
        server.insert(REQUEST_URI.to_string(), request_uri);

        Some(Self {
            script_filename,
            working_dir,
            server,
            annotations: ctx.annotations,
        })
    }

    pub fn var(&self, key: &str) -> Option<&str> {
        self.server.get(key).map(String::as_str)
    }
}
