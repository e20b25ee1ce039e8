use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const MIN_TIMEOUT_SECONDS: u64 = 1;
const MAX_TIMEOUT_SECONDS: u64 = 300;
const MIN_TOAST_TTL_SECONDS: u64 = 1;
const MAX_TOAST_TTL_SECONDS: u64 = 3_600;
const DEFAULT_TOAST_TTL_SECONDS: i64 = 5;
const MAX_LOG_FILES: usize = 365;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub api_base_url: String,
    pub api_token: Option<String>,
    pub request_timeout_secs: u64,
    pub toast_ttl_secs: u64,
    pub log_dir: PathBuf,
    /// `EnvFilter` directives used when `RUST_LOG` is unset.
    pub log_filter: String,
    pub max_log_files: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8080".to_string(),
            api_token: None,
            request_timeout_secs: 30,
            toast_ttl_secs: 5,
            log_dir: PathBuf::from("logs"),
            log_filter: "info".to_string(),
            max_log_files: 7,
        }
    }
}

impl Settings {
    /// Reads settings from a JSON file. Keys missing from the file keep their defaults.
    pub fn load(path: &Path) -> AppResult<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|error| AppError::Config(format!("cannot read {}: {}", path.display(), error)))?;
        let settings: Self = serde_json::from_str(&raw)
            .map_err(|error| AppError::Config(format!("invalid settings in {}: {}", path.display(), error)))?;
        settings.validated()
    }

    pub fn load_or_default(path: Option<&Path>) -> AppResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Self::default().validated(),
        }
    }

    pub fn with_api_url(mut self, api_url: Option<String>) -> AppResult<Self> {
        if let Some(url) = api_url {
            self.api_base_url = url;
        }
        self.validated()
    }

    pub fn validated(mut self) -> AppResult<Self> {
        let url = self.api_base_url.trim().trim_end_matches('/').to_string();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(AppError::Config(format!(
                "apiBaseUrl must start with http:// or https:// (got {:?})",
                self.api_base_url
            )));
        }
        self.api_base_url = url;
        self.request_timeout_secs = self
            .request_timeout_secs
            .clamp(MIN_TIMEOUT_SECONDS, MAX_TIMEOUT_SECONDS);
        self.toast_ttl_secs = self
            .toast_ttl_secs
            .clamp(MIN_TOAST_TTL_SECONDS, MAX_TOAST_TTL_SECONDS);
        self.max_log_files = self.max_log_files.clamp(1, MAX_LOG_FILES);
        if self.log_filter.trim().is_empty() {
            self.log_filter = "info".to_string();
        }
        if self.api_token.as_deref().is_some_and(|token| token.trim().is_empty()) {
            self.api_token = None;
        }
        Ok(self)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn toast_ttl(&self) -> chrono::Duration {
        let secs = self
            .toast_ttl_secs
            .clamp(MIN_TOAST_TTL_SECONDS, MAX_TOAST_TTL_SECONDS);
        i64::try_from(secs)
            .ok()
            .and_then(chrono::Duration::try_seconds)
            .unwrap_or_else(|| chrono::Duration::seconds(DEFAULT_TOAST_TTL_SECONDS))
    }
}

#[cfg(test)]
mod tests {
    use super::Settings;
    use std::io::Write;

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        write!(file, r#"{{"apiBaseUrl": "https://rules.example.com/"}}"#).expect("write");

        let settings = Settings::load(file.path()).expect("load");
        assert_eq!(settings.api_base_url, "https://rules.example.com");
        assert_eq!(settings.request_timeout_secs, 30);
        assert_eq!(settings.toast_ttl_secs, 5);
    }

    #[test]
    fn rejects_non_http_base_url() {
        let err = Settings::default()
            .with_api_url(Some("ftp://rules".to_string()))
            .expect_err("should reject");
        assert!(err.to_string().starts_with("CONFIG_INVALID"));
    }

    #[test]
    fn clamps_timeout_and_drops_blank_token() {
        let settings = Settings {
            request_timeout_secs: 0,
            api_token: Some("  ".to_string()),
            ..Settings::default()
        }
        .validated()
        .expect("valid");
        assert_eq!(settings.request_timeout_secs, 1);
        assert!(settings.api_token.is_none());
    }

    #[test]
    fn oversized_toast_ttl_is_clamped() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        write!(file, r#"{{"toastTtlSecs": 10000000000000000, "maxLogFiles": 0}}"#).expect("write");

        let settings = Settings::load(file.path()).expect("load");
        assert_eq!(settings.toast_ttl_secs, 3_600);
        assert_eq!(settings.max_log_files, 1);
        assert_eq!(settings.toast_ttl(), chrono::Duration::seconds(3_600));
    }

    #[test]
    fn toast_ttl_stays_positive_without_validation() {
        let settings = Settings {
            toast_ttl_secs: u64::MAX,
            ..Settings::default()
        };
        assert_eq!(settings.toast_ttl(), chrono::Duration::seconds(3_600));

        let settings = Settings {
            toast_ttl_secs: 0,
            ..Settings::default()
        };
        assert_eq!(settings.toast_ttl(), chrono::Duration::seconds(1));
    }

    #[test]
    fn malformed_file_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        write!(file, "not json").expect("write");
        let err = Settings::load(file.path()).expect_err("should fail");
        assert!(err.to_string().starts_with("CONFIG_INVALID"));
    }
}
