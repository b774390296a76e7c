use std::{collections::HashMap, fs};

use thiserror::Error;
use url::Url;

/// Base used when the widget runs against a local development backend.
pub const LOCAL_API_BASE: &str = "http://localhost:5000/api";

/// Base used everywhere else; relative to the serving origin.
pub const RELATIVE_API_PATH: &str = "/api";

const SETTINGS_FILE: &str = "poll_widget.toml";

/// Map a host name to the API base. `localhost` and `127.0.0.1` pin the
/// fixed local development endpoint; every other host gets the relative
/// path. Pure and infallible; evaluated once per process start.
pub fn api_base_for_host(host: &str) -> String {
    if host == "localhost" || host == "127.0.0.1" {
        LOCAL_API_BASE.to_string()
    } else {
        RELATIVE_API_PATH.to_string()
    }
}

#[derive(Debug, Error)]
pub enum ApiBaseError {
    #[error("invalid origin '{origin}': {source}")]
    InvalidOrigin {
        origin: String,
        #[source]
        source: url::ParseError,
    },
}

/// Absolute form of the resolved base. A native transport cannot issue a
/// request against a bare relative path, so the `/api` case is joined onto
/// the configured origin.
pub fn resolve_api_base(host: &str, origin: &str) -> Result<String, ApiBaseError> {
    let base = api_base_for_host(host);
    if !base.starts_with('/') {
        return Ok(base);
    }

    let origin_url = Url::parse(origin).map_err(|source| ApiBaseError::InvalidOrigin {
        origin: origin.to_string(),
        source,
    })?;
    let joined = origin_url
        .join(&base)
        .map_err(|source| ApiBaseError::InvalidOrigin {
            origin: origin.to_string(),
            source,
        })?;
    Ok(joined.to_string())
}

#[derive(Debug, Clone)]
pub struct Settings {
    /// Host name the widget considers itself to be running on.
    pub api_host: String,
    /// Origin the relative `/api` path resolves against for non-local hosts.
    pub origin: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_host: "localhost".into(),
            origin: "http://localhost:5000".into(),
        }
    }
}

impl Settings {
    pub fn api_base(&self) -> Result<String, ApiBaseError> {
        resolve_api_base(&self.api_host, &self.origin)
    }
}

/// Resolve settings from defaults, then `poll_widget.toml` in the working
/// directory, then environment overrides. Called once at startup; the result
/// is passed explicitly to everything downstream.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(SETTINGS_FILE) {
        apply_file_overrides(&mut settings, &raw);
    }

    if let Ok(v) = std::env::var("POLL_WIDGET_API_HOST") {
        settings.api_host = v;
    }
    if let Ok(v) = std::env::var("POLL_WIDGET_ORIGIN") {
        settings.origin = v;
    }

    settings
}

fn apply_file_overrides(settings: &mut Settings, raw: &str) {
    if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(raw) {
        if let Some(v) = file_cfg.get("api_host") {
            settings.api_host = v.clone();
        }
        if let Some(v) = file_cfg.get("origin") {
            settings.origin = v.clone();
        }
    }
}
