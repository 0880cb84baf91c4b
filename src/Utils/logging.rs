//! Logger setup for the binary: terminal output, optionally mirrored to a file.
use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};
use std::fs::File;

/// Level from the argument, then from `RUST_LOG`, then `Info`
pub fn resolve_level(level: Option<&str>) -> LevelFilter {
    level
        .and_then(|l| l.parse::<LevelFilter>().ok())
        .or_else(|| {
            std::env::var("RUST_LOG")
                .ok()
                .and_then(|v| v.parse::<LevelFilter>().ok())
        })
        .unwrap_or(LevelFilter::Info)
}

/// Install the global logger. A second call, or a file that can not be created, is
/// reported on stderr and otherwise ignored.
pub fn init_logger(level: Option<&str>, file: Option<&str>) {
    let level = resolve_level(level);
    let config = ConfigBuilder::new()
        .set_time_level(LevelFilter::Debug)
        .build();
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        config.clone(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];
    if let Some(path) = file {
        match File::create(path) {
            Ok(f) => loggers.push(WriteLogger::new(level, config, f)),
            Err(e) => eprintln!("log file {} can not be created: {}", path, e),
        }
    }
    if let Err(e) = CombinedLogger::init(loggers) {
        eprintln!("logger is already initialized: {}", e);
    }
}
