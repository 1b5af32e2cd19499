#![allow(dead_code)]

use wpgate_core::ctx::ResponseCtx;
use wpgate_core::stage::{PipelineOutcome, ScriptHandoff};

pub fn handoff(outcome: PipelineOutcome) -> ScriptHandoff {
    match outcome {
        PipelineOutcome::Handoff(h) => h,
        other => panic!("expected a script handoff, got {other:?}"),
    }
}

pub fn response(outcome: PipelineOutcome) -> ResponseCtx {
    match outcome {
        PipelineOutcome::Respond(resp) => resp,
        other => panic!("expected an immediate response, got {other:?}"),
    }
}

pub fn body_text(resp: &ResponseCtx) -> String {
    String::from_utf8_lossy(resp.body_bytes().unwrap_or_default()).into_owned()
}
