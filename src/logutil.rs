//! Logger bootstrap and helpers for keeping user-entered strings log-safe.

use std::io::Write;

use crate::config::LoggingConfig;

/// Initialize env_logger with UTC timestamps.
///
/// CLI verbosity overrides the configured level (`-v` debug, `-vv` trace).
/// When a log file is configured, lines are appended there and echoed to the
/// console only if stdout is a TTY.
pub fn init(config: Option<&LoggingConfig>, verbosity: u8) {
    let mut builder = env_logger::Builder::new();

    let base_level = match verbosity {
        0 => config
            .map(|c| c.level.parse().unwrap_or(log::LevelFilter::Info))
            .unwrap_or(log::LevelFilter::Info),
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(base_level);

    let log_file = config.and_then(|c| c.file.as_ref()).and_then(|path| {
        std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .ok()
    });

    match log_file {
        Some(file) => {
            let sink = std::sync::Mutex::new(file);
            let is_tty = atty::is(atty::Stream::Stdout);
            builder.format(move |fmt, record| {
                let line = format!(
                    "{} [{}] {}",
                    chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ"),
                    record.level(),
                    record.args()
                );
                if let Ok(mut guard) = sink.lock() {
                    let _ = writeln!(guard, "{}", line);
                }
                if is_tty {
                    writeln!(fmt, "{}", line)
                } else {
                    Ok(())
                }
            });
        }
        None => {
            builder.format(|fmt, record| {
                writeln!(
                    fmt,
                    "{} [{}] {}",
                    chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ"),
                    record.level(),
                    record.args()
                )
            });
        }
    }

    let _ = builder.try_init();
}

/// Escape a user-entered string for single-line logging. Control characters
/// become escapes and overly long values are cut with an ellipsis.
pub fn escape_log(s: &str) -> String {
    const MAX_PREVIEW: usize = 120;
    let mut out = String::with_capacity(s.len().min(MAX_PREVIEW) + 8);
    for (count, ch) in s.chars().enumerate() {
        if count >= MAX_PREVIEW {
            out.push('…');
            break;
        }
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                use std::fmt::Write;
                let _ = write!(&mut out, "\\x{:02X}", c as u32);
            }
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::escape_log;

    #[test]
    fn escapes_control_characters() {
        assert_eq!(escape_log("a\nb\tc"), "a\\nb\\tc");
    }

    #[test]
    fn truncates_long_values() {
        let long = "x".repeat(500);
        let escaped = escape_log(&long);
        assert!(escaped.ends_with('…'));
        assert!(escaped.chars().count() <= 121);
    }
}
