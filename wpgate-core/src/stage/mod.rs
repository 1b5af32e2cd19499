pub mod builtin;
pub mod core;
#[cfg(test)]
mod tests;

pub use self::core::{
    PipelineBuilder, PipelineOutcome, ScriptHandoff, Stage, StageError, StagePipeline,
    StageResult, default_stages,
};
