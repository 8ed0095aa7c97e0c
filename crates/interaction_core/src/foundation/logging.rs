//! Logging utilities and structured logging support

pub use log::{debug, error, info, trace, warn};

use crate::error::InteractionError;

/// Initialize the logging system from `RUST_LOG`
pub fn init() {
    env_logger::init();
}

/// Initialize the logging system with a default level such as `"info"`
///
/// `RUST_LOG` still overrides the level when set.
pub fn init_with_level(level: &str) -> Result<(), InteractionError> {
    let filter = parse_level(level)?;
    env_logger::Builder::new()
        .filter_level(filter)
        .parse_env("RUST_LOG")
        .try_init()
        .map_err(|e| InteractionError::Logging(e.to_string()))
}

/// Parse a level name into a filter
pub fn parse_level(level: &str) -> Result<log::LevelFilter, InteractionError> {
    level
        .parse::<log::LevelFilter>()
        .map_err(|_| InteractionError::UnknownLogLevel(level.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug").unwrap(), log::LevelFilter::Debug);
        assert_eq!(parse_level("OFF").unwrap(), log::LevelFilter::Off);
        assert!(parse_level("loud").is_err());
    }
}
