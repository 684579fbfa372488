//! log4rs set-up.
//!
//! Standard output carries the rendered document, so every appender writes to
//! standard error.

use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::error::Error;

/// Names a log4rs YAML file to use instead of the built-in configuration.
pub const LOG_CONFIG_VAR: &str = "RENDER_LOG_CONFIG";
/// Level of the built-in configuration (default `warn`).
pub const LOG_LEVEL_VAR: &str = "RENDER_LOG_LEVEL";

const PATTERN: &str = "{d(%Y-%m-%dT%H:%M:%S)} {h({l})} {t} - {m}{n}";

fn level_from_env() -> LevelFilter {
    std::env::var(LOG_LEVEL_VAR)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(LevelFilter::Warn)
}

fn stderr_config(level: LevelFilter) -> Result<Config, Box<dyn Error>> {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(PATTERN)))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(level))?;
    Ok(config)
}

/// Install the global logger. Only the first call in a process has effect.
pub fn init() -> Result<(), Box<dyn Error>> {
    match std::env::var(LOG_CONFIG_VAR) {
        Ok(path) if !path.is_empty() => {
            log4rs::init_file(&path, Default::default())
                .map_err(|e| format!("Error initializing log4rs from {path}: {e}"))?;
        }
        _ => {
            log4rs::init_config(stderr_config(level_from_env())?)?;
        }
    }
    Ok(())
}
