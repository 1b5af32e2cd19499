use crate::conf::load_config;
use crate::ctx::{RequestCtx, ResponseBody, ResponseCtx};
use crate::stage::{PipelineOutcome, StagePipeline};
use anyhow::Context;
use http::Method;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

/// Longest body echoed back verbatim; anything larger is summarized.
const BODY_PREVIEW_LIMIT: usize = 4096;

#[derive(Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
enum Report {
    Respond {
        status: u16,
        headers: BTreeMap<String, String>,
        body: Value,
    },
    Handoff(crate::stage::ScriptHandoff),
    NotFound,
}

pub fn run(uri: &str, method: &str, config: &Path, raw: bool) -> anyhow::Result<()> {
    let method = Method::from_bytes(method.to_ascii_uppercase().as_bytes())
        .with_context(|| format!("invalid HTTP method '{method}'"))?;
    let cfg = load_config(config).with_context(|| format!("loading {}", config.display()))?;

    let pipeline = StagePipeline::builder(Arc::new(cfg))
        .with_default_stages()
        .context("building pipeline")?
        .build();

    let outcome = pipeline.run(RequestCtx::new(method, uri));
    crate::cli::print_json(&report(outcome), raw)
}

fn report(outcome: PipelineOutcome) -> Report {
    match outcome {
        PipelineOutcome::Respond(resp) => respond_report(resp),
        PipelineOutcome::Handoff(handoff) => Report::Handoff(handoff),
        PipelineOutcome::NotFound => Report::NotFound,
    }
}

fn respond_report(resp: ResponseCtx) -> Report {
    let headers = resp
        .headers
        .iter()
        .map(|(name, value)| {
            (
                name.to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect();

    let body = match &resp.body {
        ResponseBody::Empty => Value::Null,
        ResponseBody::Bytes(b) if b.len() <= BODY_PREVIEW_LIMIT => match std::str::from_utf8(b) {
            Ok(text) => Value::from(text),
            Err(_) => Value::from(format!("<{} bytes binary>", b.len())),
        },
        ResponseBody::Bytes(b) => Value::from(format!("<{} bytes>", b.len())),
        ResponseBody::File(f) => match f.metadata() {
            Ok(meta) => Value::from(format!("<file, {} bytes>", meta.len())),
            Err(_) => Value::from("<file>"),
        },
    };

    Report::Respond {
        status: resp.status.as_u16(),
        headers,
        body,
    }
}
