use anyhow::Result;
use std::io;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::{self, time::ChronoUtc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};
use tracing_appender::rolling::{RollingFileAppender, Rotation};

/// Filter directives for a `-v` count. `RUST_LOG` wins when set.
fn filter_directives(verbose_level: u8) -> &'static str {
    match verbose_level {
        0 => "info",
        // -v: debug for our crates, keep the HTTP stack quiet
        1 => "debug,hyper=warn,reqwest=warn,rustls=warn",
        _ => "trace",
    }
}

fn build_filter(verbose_level: u8, quiet: bool) -> EnvFilter {
    if quiet {
        return EnvFilter::new("error");
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_directives(verbose_level)))
}

/// Split `logs/marquee.log` into the directory and the rotation prefix `marquee`
fn rotation_target(log_path: &Path) -> Result<(PathBuf, String)> {
    let log_dir = log_path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .ok_or_else(|| anyhow::anyhow!("Log file path has no parent directory"))?;
    let log_filename = log_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow::anyhow!("Invalid log filename"))?;

    let prefix = log_filename
        .rsplit_once('.')
        .map(|(stem, _)| stem)
        .unwrap_or(log_filename);
    Ok((log_dir.to_path_buf(), prefix.to_string()))
}

/// Logs go to stderr so stdout stays clean for `--output json`, or to a
/// daily-rotated file when one is configured (`logging.file`).
pub fn init_logging(verbose_level: u8, quiet: bool, log_file: Option<PathBuf>) -> Result<()> {
    let filter = build_filter(verbose_level, quiet);

    let json = std::env::var("RUST_LOG_JSON")
        .map(|v| v == "true")
        .unwrap_or_else(|_| !io::stdout().is_terminal());

    let registry = Registry::default().with(filter);

    match log_file {
        Some(log_path) => {
            let (log_dir, prefix) = rotation_target(&log_path)?;
            std::fs::create_dir_all(&log_dir)?;
            let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, prefix);

            if json {
                let json_layer = fmt::layer()
                    .json()
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(file_appender);
                registry.with(json_layer).init();
            } else {
                let fmt_layer = fmt::layer()
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(false)
                    .with_writer(file_appender);
                registry.with(fmt_layer).init();
            }
        }
        None => {
            if json {
                let json_layer = fmt::layer()
                    .json()
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(io::stderr);
                registry.with(json_layer).init();
            } else {
                let fmt_layer = fmt::layer()
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(io::stderr);
                registry.with(fmt_layer).init();
            }
        }
    }

    Ok(())
}
