pub mod errors;
pub mod handoff;
pub mod pipeline;
pub mod registry;
pub mod result;

pub use self::errors::StageError;
pub use self::handoff::ScriptHandoff;
pub use self::pipeline::{PipelineOutcome, StagePipeline};
pub use self::registry::{PipelineBuilder, default_stages};
pub use self::result::StageResult;
use crate::conf::Configuration;
use crate::ctx::RequestCtx;

/// A single step of the request routing pipeline.
///
/// Stages run strictly in order, one request at a time per pipeline run, and
/// must be both Send and Sync so one pipeline can serve concurrent requests.
/// A stage inspects the request, optionally moves its working path or settles
/// the script to run, and tells the runner how to proceed.
pub trait Stage: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Process the request.
    fn on_request(&self, ctx: &mut RequestCtx, cfg: &Configuration) -> StageResult;

    /// Called when this stage failed the request.
    fn on_error(&self, _err: &StageError) {}
}
