//! log4rs setup for the `acrs` binary.

use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::error::Error;
use std::path::Path;

const PATTERN: &str = "{h({l})} {m}{n}";

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

/// Start logging.
///
/// `verbose` logs every summarization step to stderr. Otherwise the log4rs
/// file at `path` is used, or warnings to stderr if it can't be loaded.
pub fn init(path: &str, verbose: bool) -> Result<(), Box<dyn Error>> {
    if verbose {
        log4rs::init_config(stderr_config(LevelFilter::Info)?)?;
        return Ok(());
    }

    if Path::new(path).exists() {
        match log4rs::init_file(path, Default::default()) {
            Ok(()) => return Ok(()),
            Err(e) => eprintln!("Error loading {path}: {e}, logging warnings to stderr"),
        }
    }
    log4rs::init_config(stderr_config(LevelFilter::Warn)?)?;
    Ok(())
}
