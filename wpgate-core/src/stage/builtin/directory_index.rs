use crate::conf::Configuration;
use crate::ctx::{DIRECTORY_INDEX, RequestCtx};
use crate::security::{PathValidator, PathValidatorError};
use crate::stage::core::{Stage, StageError, StageResult};
use crate::static_files::render_directory_listing;

/// Points directory requests at their index file.
///
/// The first entry of `index_files` that exists wins. The stage only moves
/// the working path; the static file and script stages decide how the index
/// is served. A listing is only rendered for a directory inside the web root.
#[derive(Debug)]
pub struct DirectoryIndexStage {
    validator: PathValidator,
}

impl DirectoryIndexStage {
    pub fn new(validator: PathValidator) -> Self {
        Self { validator }
    }

    pub fn from_config(cfg: &Configuration) -> Result<Self, PathValidatorError> {
        let validator = PathValidator::new(&cfg.web_root, cfg.security.check_symlinks)?;
        Ok(Self::new(validator))
    }
}

impl Stage for DirectoryIndexStage {
    fn name(&self) -> &str {
        "directory_index"
    }

    fn on_request(&self, ctx: &mut RequestCtx, cfg: &Configuration) -> StageResult {
        let dir = ctx.filesystem_path(self.validator.web_root());
        if !dir.is_dir() {
            return StageResult::Continue;
        }

        let index = cfg
            .index_files
            .iter()
            .find(|name| dir.join(name.as_str()).is_file());

        if let Some(index) = index {
            let index_path = format!("{}/{}", ctx.working_path().trim_end_matches('/'), index);
            tracing::debug!(path = %index_path, "directory index");
            ctx.annotations.insert(DIRECTORY_INDEX, true);
            ctx.set_working_path(index_path);
            return StageResult::Continue;
        }

        if !cfg.security.allow_directory_listing {
            return StageResult::Continue;
        }

        match self.validator.validate_file_path(&dir) {
            Ok(dir) => StageResult::Respond(render_directory_listing(&dir, ctx.working_path())),
            Err(violation) => StageError::Security(violation).into(),
        }
    }
}
