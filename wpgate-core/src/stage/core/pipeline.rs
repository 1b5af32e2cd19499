use super::{ScriptHandoff, Stage, StageError, StageResult};
use crate::conf::Configuration;
use crate::ctx::{RequestCtx, ResponseCtx};
use crate::environment::Environment;
use crate::stage::core::registry::PipelineBuilder;
use std::sync::Arc;

/// Terminal outcome of one pipeline run.
#[derive(Debug)]
pub enum PipelineOutcome {
    /// A stage answered the request itself (file, redirect, listing, error).
    Respond(ResponseCtx),

    /// A script was resolved and should be executed by the host.
    Handoff(ScriptHandoff),

    /// Nothing answered and nothing was resolved.
    NotFound,
}

impl PipelineOutcome {
    /// The response to send, or `None` for a script handoff.
    pub fn into_response(self) -> Option<ResponseCtx> {
        match self {
            PipelineOutcome::Respond(resp) => Some(resp),
            PipelineOutcome::NotFound => Some(ResponseCtx::not_found()),
            PipelineOutcome::Handoff(_) => None,
        }
    }

    pub fn handoff(&self) -> Option<&ScriptHandoff> {
        match self {
            PipelineOutcome::Handoff(h) => Some(h),
            _ => None,
        }
    }
}

/// Ordered, immutable list of stages plus the configuration they share.
pub struct StagePipeline {
    cfg: Arc<Configuration>,
    stages: Vec<Arc<dyn Stage>>,
    environment: Environment,
}

impl StagePipeline {
    pub fn builder(cfg: Arc<Configuration>) -> PipelineBuilder {
        PipelineBuilder::new(cfg)
    }

    pub(crate) fn new(cfg: Arc<Configuration>, stages: Vec<Arc<dyn Stage>>) -> Self {
        let environment = Environment::new(&cfg);
        Self {
            cfg,
            stages,
            environment,
        }
    }

    pub fn config(&self) -> &Configuration {
        &self.cfg
    }

    pub fn stages(&self) -> &[Arc<dyn Stage>] {
        &self.stages
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Route one request to its terminal outcome.
    pub fn run(&self, mut ctx: RequestCtx) -> PipelineOutcome {
        self.environment.setup();

        match Self::run_on_request(&self.stages, &mut ctx, &self.cfg) {
            StageResult::Continue => {}
            StageResult::Respond(resp) => return PipelineOutcome::Respond(resp),
            StageResult::Error(err) => {
                log_stage_error(&err, &ctx);
                return PipelineOutcome::Respond(err.to_response());
            }
        }

        let path = ctx.working_path().to_string();
        match ScriptHandoff::prepare(ctx) {
            Some(handoff) => {
                tracing::debug!(
                    path = %path,
                    script = %handoff.script_filename.display(),
                    "script handoff"
                );
                PipelineOutcome::Handoff(handoff)
            }
            None => {
                tracing::info!(path = %path, "no stage handled the request");
                PipelineOutcome::NotFound
            }
        }
    }

    pub fn run_on_request(
        stages: &[impl AsRef<dyn Stage>],
        ctx: &mut RequestCtx,
        cfg: &Configuration,
    ) -> StageResult {
        for stage in stages {
            let stage = stage.as_ref();
            match stage.on_request(ctx, cfg) {
                StageResult::Continue => continue,
                r @ StageResult::Respond(_) => {
                    tracing::debug!(
                        stage = stage.name(),
                        path = %ctx.working_path(),
                        "stage responded"
                    );
                    return r;
                }
                StageResult::Error(err) => {
                    stage.on_error(&err);
                    tracing::debug!(stage = stage.name(), "stage failed the request");
                    return StageResult::Error(err);
                }
            }
        }
        StageResult::Continue
    }
}

fn log_stage_error(err: &StageError, ctx: &RequestCtx) {
    match err {
        StageError::Security(violation) => tracing::warn!(
            path = %ctx.original_path().escape_debug(),
            violation = ?violation,
            "request rejected"
        ),
        StageError::NotFound(_) => tracing::info!(path = %ctx.working_path(), "{err}"),
        StageError::Configuration(_) => tracing::error!(path = %ctx.working_path(), "{err}"),
        StageError::Unclassified(e) => {
            tracing::error!(path = %ctx.working_path(), error = format!("{e:#}"), "stage error")
        }
    }
}
