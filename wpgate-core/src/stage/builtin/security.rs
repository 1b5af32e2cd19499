use crate::conf::Configuration;
use crate::ctx::{RequestCtx, join_web_path};
use crate::security::{PathValidator, PathValidatorError, SecurityViolation, is_hidden_path};
use crate::stage::core::{Stage, StageResult};

/// First gate of the pipeline. Rejects anything that looks like an attempt
/// to reach outside the web root or at files that must never be served.
///
/// Matching order...
/// 1. Structural checks on the raw path (NUL, traversal, control chars)
/// 2. Hidden path segments
/// 3. Configured blocked patterns
/// 4. Canonical containment, only when something exists on disk
#[derive(Debug)]
pub struct SecurityStage {
    validator: PathValidator,
}

impl SecurityStage {
    pub fn new(validator: PathValidator) -> Self {
        Self { validator }
    }

    pub fn from_config(cfg: &Configuration) -> Result<Self, PathValidatorError> {
        let validator = PathValidator::new(&cfg.web_root, cfg.security.check_symlinks)?;
        Ok(Self::new(validator))
    }

    fn check(&self, path: &str, cfg: &Configuration) -> Result<StageResult, SecurityViolation> {
        self.validator.validate(path)?;

        if is_hidden_path(path) {
            return Err(SecurityViolation::HiddenPath);
        }

        // Report only that something matched, never which pattern.
        if cfg
            .security
            .blocked_patterns
            .iter()
            .any(|pattern| pattern.is_match(path))
        {
            return Err(SecurityViolation::BlockedPattern);
        }

        let full_path = join_web_path(self.validator.web_root(), path);
        if full_path.exists() {
            self.validator.validate_file_path(&full_path)?;
        }

        Ok(StageResult::Continue)
    }
}

impl Stage for SecurityStage {
    fn name(&self) -> &str {
        "security"
    }

    fn on_request(&self, ctx: &mut RequestCtx, cfg: &Configuration) -> StageResult {
        self.check(ctx.working_path(), cfg).into()
    }
}
