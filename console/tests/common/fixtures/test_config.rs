//! Test configuration builder writing main.toml into a temp directory

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub struct TestConfigBuilder {
    temp_dir: TempDir,
    base_url: String,
    request_timeout_seconds: Option<u64>,
    display_seconds: Option<u64>,
    max_visible: Option<usize>,
    managed: Option<Vec<String>>,
}

impl TestConfigBuilder {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self {
            temp_dir,
            base_url: "http://127.0.0.1:8080".to_string(),
            request_timeout_seconds: None,
            display_seconds: None,
            max_visible: None,
            managed: None,
        }
    }

    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    pub fn request_timeout(mut self, seconds: u64) -> Self {
        self.request_timeout_seconds = Some(seconds);
        self
    }

    pub fn display_seconds(mut self, seconds: u64) -> Self {
        self.display_seconds = Some(seconds);
        self
    }

    pub fn max_visible(mut self, cap: usize) -> Self {
        self.max_visible = Some(cap);
        self
    }

    pub fn managed(mut self, services: &[&str]) -> Self {
        self.managed = Some(services.iter().map(|s| s.to_string()).collect());
        self
    }

    fn to_toml(&self) -> String {
        let mut toml = format!("base_url = \"{}\"\n", self.base_url);
        if let Some(timeout) = self.request_timeout_seconds {
            toml.push_str(&format!("request_timeout_seconds = {}\n", timeout));
        }

        toml.push_str("\n[notifications]\n");
        if let Some(seconds) = self.display_seconds {
            toml.push_str(&format!("display_seconds = {}\n", seconds));
        }
        if let Some(cap) = self.max_visible {
            toml.push_str(&format!("max_visible = {}\n", cap));
        }

        if let Some(managed) = &self.managed {
            let quoted: Vec<String> = managed.iter().map(|s| format!("\"{}\"", s)).collect();
            toml.push_str(&format!("\n[services]\nmanaged = [{}]\n", quoted.join(", ")));
        }
        toml
    }

    pub fn build(self) -> TestConfig {
        let config_dir = self.temp_dir.path().join("config");
        fs::create_dir_all(&config_dir).expect("Failed to create config dir");
        fs::write(config_dir.join("main.toml"), self.to_toml()).expect("Failed to write main.toml");

        TestConfig {
            _temp_dir: self.temp_dir,
            config_dir,
        }
    }
}

impl Default for TestConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Keeps the temp directory alive for the duration of a test
pub struct TestConfig {
    _temp_dir: TempDir,
    config_dir: PathBuf,
}

impl TestConfig {
    pub fn config_dir(&self) -> &PathBuf {
        &self.config_dir
    }

    pub fn config_dir_string(&self) -> String {
        self.config_dir.to_string_lossy().to_string()
    }
}
