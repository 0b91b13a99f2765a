use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use thiserror::Error;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

use crate::config::{AppConfig, Mode};

const LOG_FILE: &str = "base.log";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Invalid LOG_LEVEL directive: {0}")]
    InvalidLevel(#[from] ParseError),

    #[error("Log file unavailable: {0}")]
    Io(#[from] std::io::Error),

    #[error("Subscriber already installed: {0}")]
    Init(String),
}

/// Install the global tracing subscriber.
///
/// `dev` writes readable lines with source locations to stdout, `prod` appends
/// JSON records to `<log.dir>/base.log`.
pub fn init(config: &AppConfig) -> Result<(), LoggingError> {
    let filter = EnvFilter::try_new(&config.log.level)?;

    let installed = match config.mode {
        Mode::Dev => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .try_init(),
        Mode::Prod => {
            fs::create_dir_all(&config.log.dir)?;
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(config.log.dir.join(LOG_FILE))?;

            tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .with_file(true)
                .with_line_number(true)
                .with_writer(Mutex::new(file))
                .try_init()
        }
    };

    installed.map_err(|e| LoggingError::Init(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unparseable_level() {
        let mut config = AppConfig::development();
        config.log.level = "app=notalevel".to_string();
        assert!(matches!(init(&config), Err(LoggingError::InvalidLevel(_))));
    }
}
