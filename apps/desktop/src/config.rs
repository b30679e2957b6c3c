use std::{collections::HashMap, fs, path::Path, time::Duration};

use anyhow::Context;
use client_core::ViewOptions;
use toml::Value;

pub const SETTINGS_FILE: &str = "profile_view.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_base_url: String,
    pub request_timeout_secs: Option<u64>,
    pub default_avatar_url: String,
    pub location_label: String,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        let view = ViewOptions::default();
        Self {
            api_base_url: "http://127.0.0.1:8000/api".into(),
            request_timeout_secs: None,
            default_avatar_url: view.default_avatar_url,
            location_label: view.location_label,
            log_filter: "info".into(),
        }
    }
}

impl Settings {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    pub fn view_options(&self) -> ViewOptions {
        ViewOptions {
            default_avatar_url: self.default_avatar_url.clone(),
            location_label: self.location_label.clone(),
        }
    }
}

/// Defaults, then `profile_view.toml` in the working directory if present,
/// then environment overrides.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(SETTINGS_FILE) {
        if let Err(err) = apply_file(&mut settings, &raw) {
            tracing::warn!(file = SETTINGS_FILE, error = %err, "ignoring unreadable settings file");
        }
    }

    apply_env(&mut settings, |key| std::env::var(key).ok());
    settings
}

/// Like [`load_settings`] but the file at `path` must exist and parse.
pub fn load_settings_from(path: &Path) -> anyhow::Result<Settings> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read settings file '{}'", path.display()))?;

    let mut settings = Settings::default();
    apply_file(&mut settings, &raw)
        .with_context(|| format!("failed to parse settings file '{}'", path.display()))?;
    apply_env(&mut settings, |key| std::env::var(key).ok());
    Ok(settings)
}

pub(crate) fn apply_file(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let file_cfg = toml::from_str::<HashMap<String, Value>>(raw)?;

    if let Some(v) = file_cfg.get("api_base_url").and_then(Value::as_str) {
        settings.api_base_url = v.to_string();
    }
    if let Some(v) = file_cfg.get("request_timeout_secs") {
        settings.request_timeout_secs = match v {
            Value::Integer(secs) => Some(u64::try_from(*secs).context("negative request timeout")?),
            Value::String(secs) => Some(secs.parse().context("invalid request timeout")?),
            other => anyhow::bail!("request_timeout_secs must be a number, got {other}"),
        };
    }
    if let Some(v) = file_cfg.get("default_avatar_url").and_then(Value::as_str) {
        settings.default_avatar_url = v.to_string();
    }
    if let Some(v) = file_cfg.get("location_label").and_then(Value::as_str) {
        settings.location_label = v.to_string();
    }
    if let Some(v) = file_cfg.get("log_filter").and_then(Value::as_str) {
        settings.log_filter = v.to_string();
    }

    Ok(())
}

pub(crate) fn apply_env(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("PROFILE_API_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = var("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }

    if let Some(v) = var("APP__REQUEST_TIMEOUT_SECS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.request_timeout_secs = Some(parsed);
        }
    }

    if let Some(v) = var("APP__DEFAULT_AVATAR_URL") {
        settings.default_avatar_url = v;
    }
    if let Some(v) = var("APP__LOCATION_LABEL") {
        settings.location_label = v;
    }

    if let Some(v) = var("RUST_LOG") {
        settings.log_filter = v;
    }
    if let Some(v) = var("APP__LOG_FILTER") {
        settings.log_filter = v;
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
