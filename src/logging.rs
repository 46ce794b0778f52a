//! File logging. The terminal belongs to the picker, so log lines only ever
//! go to a file.

use crate::error::LoggingError;
use log::LevelFilter;
use std::path::Path;

/// Map a `-v` count onto a level, falling back to the configured name.
#[must_use]
pub fn level_from(verbosity: u8, configured: Option<&str>) -> LevelFilter {
    match verbosity {
        0 => configured
            .and_then(|name| name.parse().ok())
            .unwrap_or(LevelFilter::Info),
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Install a global logger appending to `path`.
pub fn init(path: &Path, level: LevelFilter) -> Result<(), LoggingError> {
    let file = fern::log_file(path).map_err(|source| LoggingError::FileOpen {
        path: path.to_path_buf(),
        source,
    })?;

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{} {:<5} [{}] {}",
                chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ));
        })
        .level(level)
        .chain(file)
        .apply()?;

    Ok(())
}
