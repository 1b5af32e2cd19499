use crate::conf::Configuration;
use crate::ctx::{RequestCtx, join_web_path};
use crate::stage::core::{Stage, StageError, StageResult};

/// Last stage: anything still unresolved goes to the WordPress front
/// controller (`wordpress_index`).
#[derive(Debug, Default)]
pub struct FallbackScriptStage;

impl Stage for FallbackScriptStage {
    fn name(&self) -> &str {
        "fallback_script"
    }

    fn on_request(&self, ctx: &mut RequestCtx, cfg: &Configuration) -> StageResult {
        if ctx
            .resolved_script()
            .is_some_and(|script| script.filesystem_path.is_file())
        {
            return StageResult::Continue;
        }

        let index_path = join_web_path(&cfg.web_root, &cfg.wordpress_index);
        if !index_path.is_file() {
            return StageError::Configuration(format!(
                "WordPress index not found at: {}",
                index_path.display()
            ))
            .into();
        }

        ctx.set_working_path(cfg.wordpress_index.clone());
        ctx.resolve_script(cfg.wordpress_index.clone(), index_path);

        StageResult::Continue
    }
}
