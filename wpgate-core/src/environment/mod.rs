//! Platform detection and per-platform bootstrap.
//!
//! The only platform that needs preparation today is AWS Lambda, where the
//! writable scratch directories WordPress expects must be created under `/tmp`
//! before the first request is served.


use crate::conf::Configuration;
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// Variables whose presence marks a Lambda execution environment.
const LAMBDA_MARKERS: [&str; 3] = ["AWS_LAMBDA_FUNCTION_NAME", "LAMBDA_TASK_ROOT", "_HANDLER"];

/// Read access to environment variables.
pub trait EnvSource {
    fn var(&self, key: &str) -> Option<String>;
}

/// The environment of the current process.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl<const N: usize> EnvSource for [(&str, &str); N] {
    fn var(&self, key: &str) -> Option<String> {
        self.iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Standard,
    Lambda,
}

impl Platform {
    pub fn detect(env: &dyn EnvSource) -> Self {
        if LAMBDA_MARKERS.iter().any(|key| env.var(key).is_some()) {
            Platform::Lambda
        } else {
            Platform::Standard
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct LambdaInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_root: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory_limit: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_stream: Option<String>,
}

impl LambdaInfo {
    fn collect(env: &dyn EnvSource) -> Self {
        Self {
            function_name: env.var("AWS_LAMBDA_FUNCTION_NAME"),
            task_root: env.var("LAMBDA_TASK_ROOT"),
            region: env
                .var("AWS_REGION")
                .or_else(|| env.var("AWS_DEFAULT_REGION")),
            memory_limit: env
                .var("AWS_LAMBDA_FUNCTION_MEMORY_SIZE")
                .and_then(|v| v.parse().ok()),
            function_version: env.var("AWS_LAMBDA_FUNCTION_VERSION"),
            log_group: env.var("AWS_LAMBDA_LOG_GROUP_NAME"),
            log_stream: env.var("AWS_LAMBDA_LOG_STREAM_NAME"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EnvironmentInfo {
    pub platform: Platform,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lambda: Option<LambdaInfo>,
}

#[derive(Debug, Clone)]
pub struct Environment {
    platform: Platform,
    lambda_info: Option<LambdaInfo>,
    directories: Vec<PathBuf>,
}

impl Environment {
    pub fn new(cfg: &Configuration) -> Self {
        Self::with_env(cfg, &ProcessEnv)
    }

    /// The platform decision itself comes from the normalized `lambda.enabled`
    /// flag; `env` only feeds the informational fields.
    pub fn with_env(cfg: &Configuration, env: &dyn EnvSource) -> Self {
        let platform = if cfg.lambda.enabled {
            Platform::Lambda
        } else {
            Platform::Standard
        };

        let lambda_info = match platform {
            Platform::Lambda => Some(LambdaInfo::collect(env)),
            Platform::Standard => None,
        };

        Self {
            platform,
            lambda_info,
            directories: cfg.lambda.directories.clone(),
        }
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn is_lambda(&self) -> bool {
        self.platform == Platform::Lambda
    }

    pub fn info(&self) -> EnvironmentInfo {
        EnvironmentInfo {
            platform: self.platform,
            lambda: self.lambda_info.clone(),
        }
    }

    /// Prepare the platform. Best effort: failures are logged and skipped.
    pub fn setup(&self) {
        if !self.is_lambda() {
            return;
        }

        for dir in &self.directories {
            if dir.is_dir() {
                continue;
            }
            match fs::create_dir_all(dir) {
                Ok(()) => tracing::debug!(dir = %dir.display(), "created scratch directory"),
                Err(e) => {
                    tracing::warn!(dir = %dir.display(), error = %e, "failed to create scratch directory")
                }
            }
        }
    }
}
