//! Logger setup.

use std::fmt::Display;

use log::{Level, LevelFilter};

/// Initialize logging to stderr.
/// Should be called once at the start of main()
pub(crate) fn init_logger(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let result = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}",
                format_line(chrono::Local::now(), record.level(), message)
            ))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply();

    if let Err(e) = result {
        eprintln!("Failed to initialize logger: {e}");
    }
}

/// `<rfc3339 millis> <LEVEL> <message>`
fn format_line<Tz>(at: chrono::DateTime<Tz>, level: Level, message: impl Display) -> String
where
    Tz: chrono::TimeZone,
    Tz::Offset: Display,
{
    format!(
        "{} {} {}",
        at.to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
        level,
        message
    )
}
