use crate::conf::Configuration;
use crate::ctx::{RequestCtx, ResponseCtx};
use crate::stage::core::{Stage, StageResult};

/// Redirects directory requests that lack a trailing slash.
///
/// Uses `307` so clients re-send the method and body; a `301` would turn a
/// POST to `/wp-admin` into a GET.
#[derive(Debug, Default)]
pub struct TrailingSlashStage;

impl Stage for TrailingSlashStage {
    fn name(&self) -> &str {
        "trailing_slash"
    }

    fn on_request(&self, ctx: &mut RequestCtx, cfg: &Configuration) -> StageResult {
        let path = ctx.working_path();

        if path.ends_with('/') {
            return StageResult::Continue;
        }

        if path.is_empty() {
            return StageResult::Respond(ResponseCtx::temporary_redirect("/"));
        }

        if !ctx.filesystem_path(&cfg.web_root).is_dir() {
            return StageResult::Continue;
        }

        // The redirect goes to the address the client used, which differs
        // from the working path after a rewrite.
        let client_path = ctx.original_path();
        if client_path.ends_with('/') {
            return StageResult::Continue;
        }

        let mut location = String::with_capacity(client_path.len() + ctx.query_string().len() + 2);
        if !client_path.starts_with('/') {
            location.push('/');
        }
        location.push_str(client_path);
        location.push('/');
        if !ctx.query_string().is_empty() {
            location.push('?');
            location.push_str(ctx.query_string());
        }

        StageResult::Respond(ResponseCtx::temporary_redirect(&location))
    }
}
