use crate::errors::IsotopeError;
use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, SharedLogger, TermLogger, TerminalMode, WriteLogger,
};
use std::fs::File;
use std::path::Path;

/// Terminal logger plus an optional log file (truncated on start).
/// Returns an error if the file can't be created or a logger is already installed.
pub fn init_logging(level: LevelFilter, log_file: Option<&Path>) -> Result<(), IsotopeError> {
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];
    if let Some(path) = log_file {
        let file = File::create(path)
            .map_err(|e| IsotopeError::Logger(format!("can't create '{}': {}", path.display(), e)))?;
        loggers.push(WriteLogger::new(level, Config::default(), file));
    }
    CombinedLogger::init(loggers).map_err(|e| IsotopeError::Logger(e.to_string()))
}
