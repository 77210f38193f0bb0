//! TestWorld pattern for CLI integration tests.
//!
//! Provides an isolated data directory, a config file pointing at a
//! fixture backend, and a place for downloaded reports.

use anyhow::Result;
use assert_cmd::Command;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::fake::FakeBackend;
use crate::server::FixtureServer;

/// Declarative test environment builder.
///
/// # Example
/// ```no_run
/// use provdash_testing::TestWorld;
///
/// let world = TestWorld::new().with_backend();
/// let mut cmd = world.command_from_path("target/debug/provdash");
/// cmd.arg("stats").assert().success();
/// ```
pub struct TestWorld {
    temp_dir: TempDir,
    data_dir: PathBuf,
    report_dir: PathBuf,
    base_url: String,
    server: Option<FixtureServer>,
    env_vars: HashMap<String, String>,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorld {
    /// Create an isolated environment with no backend running.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let data_dir = temp_dir.path().join(".provdash");
        let report_dir = temp_dir.path().join("reports");
        std::fs::create_dir_all(&data_dir).expect("Failed to create data dir");

        Self {
            temp_dir,
            data_dir,
            report_dir,
            // Nothing listens here; commands fail with a network error.
            base_url: "http://127.0.0.1:9".to_string(),
            server: None,
            env_vars: HashMap::new(),
        }
    }

    /// Start a fixture backend with the sample data.
    pub fn with_backend(self) -> Self {
        self.with_fake(FakeBackend::new())
    }

    /// Start a fixture backend around a customised fake.
    pub fn with_fake(mut self, backend: FakeBackend) -> Self {
        let server = FixtureServer::start(backend);
        self.base_url = server.base_url();
        self.server = Some(server);
        self
    }

    /// Set an environment variable for CLI execution.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_vars.insert(key.into(), value.into());
        self
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn report_dir(&self) -> &Path {
        &self.report_dir
    }

    pub fn temp_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn config_path(&self) -> PathBuf {
        self.data_dir.join("config.toml")
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The fake behind the running fixture server.
    pub fn backend(&self) -> Option<&FakeBackend> {
        self.server.as_ref().map(FixtureServer::backend)
    }

    /// Write a config file pointing at this world's backend and report dir.
    pub fn write_config(&self) -> Result<PathBuf> {
        let path = self.config_path();
        let content = format!(
            "[backend]\nbase_url = \"{}\"\ntimeout_secs = 5\nlong_timeout_secs = 10\n\n[report]\noutput_dir = \"{}\"\n",
            self.base_url,
            self.report_dir.display()
        );
        std::fs::write(&path, content)?;
        Ok(path)
    }

    /// Configure a CLI command with this test environment's settings.
    pub fn configure_command<'a>(&self, cmd: &'a mut Command) -> &'a mut Command {
        let config = self.write_config().expect("Failed to write config");
        cmd.arg("--config")
            .arg(config)
            .arg("--format")
            .arg("plain")
            .env("PROVDASH_PATH", &self.data_dir)
            .env("NO_COLOR", "1")
            .current_dir(self.temp_dir.path());

        for (key, value) in &self.env_vars {
            cmd.env(key, value);
        }

        cmd
    }

    /// Create a CLI command configured for this test environment.
    pub fn command_from_path(&self, bin_path: impl AsRef<std::ffi::OsStr>) -> Command {
        let mut cmd = Command::new(bin_path);
        self.configure_command(&mut cmd);
        cmd
    }
}
