use crate::domain::model::UploadSettings;
use crate::utils::error::{Result, UploaderError};
use crate::utils::validation::{
    validate_non_empty_string, validate_range, validate_route, validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

const MAX_DELAY_MS: u64 = 600_000;

/// Uploader settings, usually read from `cv-uploader.toml`. Every key is
/// optional and falls back to the defaults below.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploaderConfig {
    pub server: ServerConfig,
    pub ui: UiConfig,
    pub messages: MessagesConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub base_url: String,
    pub upload_path: String,
    pub health_path: String,
    pub file_field: String,
    pub position_field: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            upload_path: "/upload".to_string(),
            health_path: "/health".to_string(),
            file_field: "cv_file".to_string(),
            position_field: "job_position".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub idle_label: String,
    pub busy_label: String,
    pub banner_ttl_ms: u64,
    pub reload_delay_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        let settings = UploadSettings::default();
        Self {
            idle_label: settings.idle_label,
            busy_label: settings.busy_label,
            banner_ttl_ms: settings.banner_ttl.as_millis() as u64,
            reload_delay_ms: settings.reload_delay.as_millis() as u64,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessagesConfig {
    pub upload_failed: String,
    pub network_error: String,
    pub upload_succeeded: String,
}

impl Default for MessagesConfig {
    fn default() -> Self {
        let settings = UploadSettings::default();
        Self {
            upload_failed: settings.upload_failed,
            network_error: settings.network_error,
            upload_succeeded: settings.upload_succeeded,
        }
    }
}

impl UploaderConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| UploaderError::ConfigError {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let expanded = Self::substitute_env_vars(content);
        let config: UploaderConfig = toml::from_str(&expanded)?;
        config.validate()?;
        Ok(config)
    }

    /// Expands `${VAR}` from the environment. Unset variables stay as written.
    fn substitute_env_vars(content: &str) -> String {
        let re = Regex::new(r"\$\{([^}]+)\}").expect("env pattern is valid");
        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    pub fn settings(&self) -> UploadSettings {
        UploadSettings {
            idle_label: self.ui.idle_label.clone(),
            busy_label: self.ui.busy_label.clone(),
            upload_failed: self.messages.upload_failed.clone(),
            network_error: self.messages.network_error.clone(),
            upload_succeeded: self.messages.upload_succeeded.clone(),
            banner_ttl: Duration::from_millis(self.ui.banner_ttl_ms),
            reload_delay: Duration::from_millis(self.ui.reload_delay_ms),
        }
    }
}

impl Validate for UploaderConfig {
    fn validate(&self) -> Result<()> {
        validate_url("server.base_url", &self.server.base_url)?;
        validate_route("server.upload_path", &self.server.upload_path)?;
        validate_route("server.health_path", &self.server.health_path)?;
        validate_non_empty_string("server.file_field", &self.server.file_field)?;
        validate_non_empty_string("server.position_field", &self.server.position_field)?;

        validate_non_empty_string("ui.idle_label", &self.ui.idle_label)?;
        validate_non_empty_string("ui.busy_label", &self.ui.busy_label)?;
        validate_range("ui.banner_ttl_ms", self.ui.banner_ttl_ms, 1, MAX_DELAY_MS)?;
        validate_range("ui.reload_delay_ms", self.ui.reload_delay_ms, 0, MAX_DELAY_MS)?;

        validate_non_empty_string("messages.upload_failed", &self.messages.upload_failed)?;
        validate_non_empty_string("messages.network_error", &self.messages.network_error)?;
        validate_non_empty_string("messages.upload_succeeded", &self.messages.upload_succeeded)?;
        Ok(())
    }
}
