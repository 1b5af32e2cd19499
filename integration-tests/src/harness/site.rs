use crate::harness::init_test_tracing;
use http::Method;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use wpgate_core::conf::{Configuration, load_config};
use wpgate_core::ctx::RequestCtx;
use wpgate_core::stage::{PipelineBuilder, PipelineOutcome, StagePipeline};

const CONFIG_FILE: &str = "wpgate.hcl";

/// Throw-away WordPress install on disk.
///
/// The web root lives in `<tmp>/public`; the config file sits next to it so
/// relative `web_root` values resolve the way they do in a real deployment.
pub struct TestSite {
    dir: TempDir,
    config: String,
}

impl TestSite {
    /// Empty web root with no config.
    pub fn empty() -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        fs::create_dir(dir.path().join("public")).expect("failed to create web root");
        Self {
            dir,
            config: String::new(),
        }
    }

    /// Typical single-site layout with WordPress core under `/wp`.
    pub fn wordpress() -> Self {
        Self::empty()
            .file("index.php", "<?php require __DIR__ . '/wp/wp-blog-header.php';")
            .file("wp/wp-blog-header.php", "<?php")
            .file("wp/wp-login.php", "<?php")
            .file("wp/wp-admin/index.php", "<?php")
            .file("wp/wp-includes/js/jquery.js", "/* jquery */")
            .file("wp-content/themes/base/style.css", "body { margin: 0; }")
            .file("wp-content/uploads/2024/01/", "")
            .file("subdir/index.php", "<?php")
            .file("wp-config.php", "<?php define('DB_PASSWORD', 'hunter2');")
            .file(".git/HEAD", "ref: refs/heads/main")
            .file("readme.html", "<h1>WordPress</h1>")
    }

    /// Add a file (or a directory, when `rel` ends in `/`) under the web root.
    pub fn file(self, rel: &str, contents: &str) -> Self {
        let path = self.root().join(rel);
        if rel.ends_with('/') {
            fs::create_dir_all(&path).expect("failed to create fixture dir");
            return self;
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create fixture dir");
        }
        fs::write(&path, contents).expect("failed to write fixture file");
        self
    }

    pub fn remove(self, rel: &str) -> Self {
        fs::remove_file(self.root().join(rel)).expect("failed to remove fixture file");
        self
    }

    /// Extra HCL appended after `web_root = "public"`.
    pub fn config(mut self, hcl: &str) -> Self {
        self.config.push_str(hcl);
        self.config.push('\n');
        self
    }

    pub fn root(&self) -> PathBuf {
        self.dir.path().join("public")
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.path().join(CONFIG_FILE)
    }

    /// Write the config file and load it the way the binary does.
    pub fn load(&self) -> Configuration {
        // Never let the host running the tests flip the platform.
        let mut hcl = String::from("web_root = \"public\"\n");
        if !self.config.contains("lambda") {
            hcl.push_str("lambda = false\n");
        }
        hcl.push_str(&self.config);

        fs::write(self.config_path(), hcl).expect("failed to write config");
        load_config(&self.config_path()).expect("failed to load fixture config")
    }

    pub fn builder(&self) -> PipelineBuilder {
        init_test_tracing();
        StagePipeline::builder(Arc::new(self.load()))
    }

    /// Router over the default stages.
    pub fn router(&self) -> TestRouter {
        let pipeline = self
            .builder()
            .with_default_stages()
            .expect("failed to build default stages")
            .build();
        TestRouter { pipeline }
    }

    /// Absolute path of `rel` inside the web root.
    pub fn path(&self, rel: &str) -> PathBuf {
        self.root().join(rel)
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }
}

/// Thin request driver over a built pipeline.
pub struct TestRouter {
    pipeline: StagePipeline,
}

impl TestRouter {
    pub fn new(pipeline: StagePipeline) -> Self {
        init_test_tracing();
        Self { pipeline }
    }

    pub fn get(&self, uri: &str) -> PipelineOutcome {
        self.request(Method::GET, uri)
    }

    pub fn request(&self, method: Method, uri: &str) -> PipelineOutcome {
        self.pipeline.run(RequestCtx::new(method, uri))
    }

    pub fn pipeline(&self) -> &StagePipeline {
        &self.pipeline
    }
}
