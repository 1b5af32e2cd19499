use crate::conf::Configuration;
use crate::ctx::RequestCtx;
use crate::security::{PathValidator, PathValidatorError};
use crate::stage::core::{Stage, StageError, StageResult};

/// Settles requests for existing `.php` files on that file.
///
/// Like [`StaticFileStage`](super::StaticFileStage), the final file must
/// still sit inside the web root.
#[derive(Debug)]
pub struct ScriptFileStage {
    validator: PathValidator,
}

impl ScriptFileStage {
    pub fn new(validator: PathValidator) -> Self {
        Self { validator }
    }

    pub fn from_config(cfg: &Configuration) -> Result<Self, PathValidatorError> {
        let validator = PathValidator::new(&cfg.web_root, cfg.security.check_symlinks)?;
        Ok(Self::new(validator))
    }
}

impl Stage for ScriptFileStage {
    fn name(&self) -> &str {
        "script_file"
    }

    fn on_request(&self, ctx: &mut RequestCtx, _cfg: &Configuration) -> StageResult {
        if !ctx.working_path().ends_with(".php") {
            return StageResult::Continue;
        }

        let path = ctx.filesystem_path(self.validator.web_root());
        if !path.is_file() {
            // The runner still has to finish so it can build the handoff.
            return StageResult::Continue;
        }

        if let Err(violation) = self.validator.validate_file_path(&path) {
            return StageError::Security(violation).into();
        }

        let url_path = ctx.working_path().to_string();
        ctx.resolve_script(url_path, path);

        StageResult::Continue
    }
}
