use crate::ctx::ResponseCtx;
use crate::stage::core::errors::StageError;

#[derive(Debug)]
pub enum StageResult {
    /// Continue to the next stage with the (possibly updated) request
    Continue,

    /// Stop the pipeline and immediately return this response to the client
    Respond(ResponseCtx),

    /// Stop the pipeline and map the error to a response
    Error(StageError),
}

impl From<StageError> for StageResult {
    fn from(err: StageError) -> Self {
        StageResult::Error(err)
    }
}

impl<E: Into<StageError>> From<Result<StageResult, E>> for StageResult {
    fn from(result: Result<StageResult, E>) -> Self {
        match result {
            Ok(r) => r,
            Err(e) => StageResult::Error(e.into()),
        }
    }
}
