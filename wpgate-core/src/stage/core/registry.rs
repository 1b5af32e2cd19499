use crate::conf::Configuration;
use crate::security::PathValidatorError;
use crate::stage::builtin::{
    DirectoryIndexStage, FallbackScriptStage, MultisiteRewriteStage, ScriptFileStage,
    SecurityStage, StaticFileStage, TrailingSlashStage,
};
use crate::stage::core::{Stage, StagePipeline};
use std::sync::Arc;

/// The built-in stages in execution order.
pub fn default_stages(cfg: &Configuration) -> Result<Vec<Arc<dyn Stage>>, PathValidatorError> {
    Ok(vec![
        Arc::new(SecurityStage::from_config(cfg)?),
        Arc::new(MultisiteRewriteStage),
        Arc::new(TrailingSlashStage),
        Arc::new(DirectoryIndexStage::from_config(cfg)?),
        Arc::new(StaticFileStage::from_config(cfg)?),
        Arc::new(ScriptFileStage::from_config(cfg)?),
        Arc::new(FallbackScriptStage),
    ])
}

/// Assembles the ordered stage list before any request is processed.
///
/// ```no_run
/// # use std::sync::Arc;
/// # use wpgate_core::conf::{ConfigSpec, Configuration};
/// # use wpgate_core::stage::{StagePipeline, builtin::TrailingSlashStage};
/// # fn demo() -> anyhow::Result<()> {
/// let cfg = Arc::new(Configuration::from_spec(ConfigSpec::default())?);
/// let pipeline = StagePipeline::builder(cfg)
///     .with_default_stages()?
///     .insert_stage(1, Arc::new(TrailingSlashStage))
///     .build();
/// # Ok(())
/// # }
/// ```
pub struct PipelineBuilder {
    cfg: Arc<Configuration>,
    stages: Vec<Arc<dyn Stage>>,
}

impl PipelineBuilder {
    pub fn new(cfg: Arc<Configuration>) -> Self {
        Self {
            cfg,
            stages: Vec::new(),
        }
    }

    /// Append the built-in stages. Fails if the web root is unusable.
    pub fn with_default_stages(mut self) -> Result<Self, PathValidatorError> {
        let defaults = default_stages(&self.cfg)?;
        self.stages.extend(defaults);
        Ok(self)
    }

    pub fn push_stage(mut self, stage: Arc<dyn Stage>) -> Self {
        self.stages.push(stage);
        self
    }

    /// Insert `stage` at `priority` (lower runs earlier). Priorities past
    /// the end append.
    pub fn insert_stage(mut self, priority: usize, stage: Arc<dyn Stage>) -> Self {
        let at = priority.min(self.stages.len());
        self.stages.insert(at, stage);
        self
    }

    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    pub fn build(self) -> StagePipeline {
        tracing::debug!(stages = ?self.stage_names(), "pipeline assembled");
        StagePipeline::new(self.cfg, self.stages)
    }
}
