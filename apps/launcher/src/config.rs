use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context;
use ladder_client::{LadderClientConfig, LadderClientError};
use serde::Deserialize;

const DEFAULT_CONFIG_FILE: &str = "launcher.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub ladder_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: Option<String>,
    pub default_mode: String,
    pub event_queue_capacity: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ladder_url: "http://127.0.0.1:8080".into(),
            request_timeout_secs: 10,
            user_agent: None,
            default_mode: "1v1".into(),
            event_queue_capacity: 256,
        }
    }
}

/// Keys accepted in `launcher.toml`. Everything is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    ladder_url: Option<String>,
    request_timeout_secs: Option<u64>,
    user_agent: Option<String>,
    default_mode: Option<String>,
    event_queue_capacity: Option<usize>,
}

impl Settings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn client_config(&self) -> Result<LadderClientConfig, LadderClientError> {
        let config =
            LadderClientConfig::new(&self.ladder_url)?.with_timeout(self.request_timeout());
        Ok(match &self.user_agent {
            Some(user_agent) => config.with_user_agent(user_agent.clone()),
            None => config,
        })
    }

    fn apply_file(&mut self, file_cfg: FileSettings) {
        if let Some(v) = file_cfg.ladder_url {
            self.ladder_url = v;
        }
        if let Some(v) = file_cfg.request_timeout_secs {
            self.request_timeout_secs = v;
        }
        if let Some(v) = file_cfg.user_agent {
            self.user_agent = Some(v);
        }
        if let Some(v) = file_cfg.default_mode {
            self.default_mode = v;
        }
        if let Some(v) = file_cfg.event_queue_capacity {
            self.event_queue_capacity = v.max(1);
        }
    }

    /// Applies `LADDER_URL` and `APP__*` overrides. `APP__` keys win over the
    /// bare ones.
    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(v) = var("LADDER_URL") {
            self.ladder_url = v;
        }
        if let Some(v) = var("APP__LADDER_URL") {
            self.ladder_url = v;
        }

        if let Some(v) = var("APP__REQUEST_TIMEOUT_SECS") {
            match v.parse::<u64>() {
                Ok(parsed) => self.request_timeout_secs = parsed,
                Err(err) => tracing::warn!(value = %v, "ignoring APP__REQUEST_TIMEOUT_SECS: {err}"),
            }
        }

        if let Some(v) = var("APP__USER_AGENT") {
            self.user_agent = Some(v);
        }
        if let Some(v) = var("APP__DEFAULT_MODE") {
            self.default_mode = v;
        }
    }
}

/// Defaults, then the config file, then environment overrides.
///
/// An explicitly requested file must exist; the implicit `launcher.toml` in
/// the working directory is optional.
pub fn load_settings(explicit_path: Option<&Path>) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    if let Some(file_cfg) = read_config_file(explicit_path)? {
        settings.apply_file(file_cfg);
    }
    settings.apply_env(|key| std::env::var(key).ok());

    Ok(settings)
}

fn read_config_file(explicit_path: Option<&Path>) -> anyhow::Result<Option<FileSettings>> {
    let path = match explicit_path {
        Some(path) => path.to_path_buf(),
        None => {
            let path = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !path.exists() {
                return Ok(None);
            }
            path
        }
    };

    let raw = fs::read_to_string(&path)
        .with_context(|| format!("failed to read config file '{}'", path.display()))?;
    let file_cfg = toml::from_str::<FileSettings>(&raw)
        .with_context(|| format!("invalid config file '{}'", path.display()))?;
    Ok(Some(file_cfg))
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
