use crate::conf::Configuration;
use crate::ctx::{ORIGINAL_PATH, RequestCtx};
use crate::stage::core::{Stage, StageResult};

/// Maps `/<site>/wp-*` style paths of a subdirectory multisite onto the
/// shared WordPress core. Only the working path moves; the client-visible
/// URI is kept for the application.
#[derive(Debug, Default)]
pub struct MultisiteRewriteStage;

impl Stage for MultisiteRewriteStage {
    fn name(&self) -> &str {
        "multisite"
    }

    fn on_request(&self, ctx: &mut RequestCtx, cfg: &Configuration) -> StageResult {
        if !cfg.multisite.enabled {
            return StageResult::Continue;
        }

        // Missing or malformed rule: not a multisite path.
        let Some((pattern, replacement)) = cfg.multisite.rewrite_rule() else {
            return StageResult::Continue;
        };

        let path = ctx.working_path();
        let rewritten = pattern.replace_all(path, replacement);
        if rewritten == path {
            return StageResult::Continue;
        }

        let rewritten = rewritten.into_owned();
        let original = path.to_string();
        tracing::debug!(from = %original, to = %rewritten, "multisite rewrite");

        ctx.annotations.insert(ORIGINAL_PATH, original);
        ctx.set_working_path(rewritten);

        StageResult::Continue
    }
}
