use crate::conf::Configuration;
use crate::ctx::RequestCtx;
use crate::security::{PathValidator, PathValidatorError};
use crate::stage::core::{Stage, StageError, StageResult};
use crate::static_files::{ServeError, render_file};

/// Serves existing non-script files directly.
///
/// The `.php` check is case-sensitive: `/x.PHP` is sent as a file and never
/// executed.
///
/// The working path may have been moved by a rewrite or a directory index
/// after the security stage ran, so containment is checked again on the
/// final file before anything is read.
#[derive(Debug)]
pub struct StaticFileStage {
    validator: PathValidator,
}

impl StaticFileStage {
    pub fn new(validator: PathValidator) -> Self {
        Self { validator }
    }

    pub fn from_config(cfg: &Configuration) -> Result<Self, PathValidatorError> {
        let validator = PathValidator::new(&cfg.web_root, cfg.security.check_symlinks)?;
        Ok(Self::new(validator))
    }
}

impl Stage for StaticFileStage {
    fn name(&self) -> &str {
        "static_file"
    }

    fn on_request(&self, ctx: &mut RequestCtx, _cfg: &Configuration) -> StageResult {
        if ctx.working_path().ends_with(".php") {
            return StageResult::Continue;
        }

        let path = ctx.filesystem_path(self.validator.web_root());
        if !path.is_file() {
            return StageResult::Continue;
        }

        let path = match self.validator.validate_file_path(&path) {
            Ok(contained) => contained,
            Err(violation) => return StageError::Security(violation).into(),
        };

        match render_file(&path) {
            Ok(resp) => StageResult::Respond(resp),
            Err(ServeError::NotFound) => {
                StageResult::Error(StageError::NotFound(ctx.working_path().to_string()))
            }
            Err(ServeError::Forbidden) => StageResult::Error(StageError::Unclassified(
                anyhow::anyhow!("permission denied reading {}", path.display()),
            )),
            Err(ServeError::Io(e)) => StageResult::Error(StageError::Unclassified(
                anyhow::Error::new(e).context(format!("failed to read {}", path.display())),
            )),
        }
    }
}
