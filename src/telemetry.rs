use crate::config::Settings;
use crate::errors::{AppError, AppResult};
use std::sync::OnceLock;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// `RUST_LOG` wins over the configured directives.
pub fn log_filter(configured: &str) -> AppResult<EnvFilter> {
    match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(directives) if !directives.trim().is_empty() => parse_filter(&directives),
        _ => parse_filter(configured),
    }
}

fn parse_filter(directives: &str) -> AppResult<EnvFilter> {
    EnvFilter::try_new(directives)
        .map_err(|error| AppError::Config(format!("invalid log filter {:?}: {}", directives, error)))
}

/// JSON logs go to `<log_dir>/console.<date>.log`; stdout belongs to the terminal UI.
pub fn init_tracing(settings: &Settings) -> AppResult<()> {
    std::fs::create_dir_all(&settings.log_dir)?;
    let filter = log_filter(&settings.log_filter)?;
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("console")
        .filename_suffix("log")
        .max_log_files(settings.max_log_files)
        .build(&settings.log_dir)
        .map_err(|error| AppError::Io(format!("cannot open log file: {}", error)))?;
    let (writer, guard) = tracing_appender::non_blocking(appender);
    if LOG_GUARD.set(guard).is_err() {
        return Err(AppError::Internal("tracing already initialized".to_string()));
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_ansi(false)
        .with_writer(writer)
        .try_init()
        .map_err(|error| AppError::Internal(error.to_string()))
}

#[cfg(test)]
mod tests {
    use super::parse_filter;

    #[test]
    fn accepts_target_directives() {
        assert!(parse_filter("info,dish_console::api=debug").is_ok());
    }

    #[test]
    fn rejects_unknown_level() {
        let err = parse_filter("dish_console=loud").expect_err("should reject");
        assert!(err.to_string().starts_with("CONFIG_INVALID"));
    }
}
