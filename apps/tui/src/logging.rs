//! Tracing setup.
//!
//! The interactive UI owns the terminal, so logs only go to a file, and only
//! when `--debug` or `ORBIT_LOG=1` asks for them. Headless runs also log
//! warnings to stderr.

use std::path::PathBuf;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

pub struct LogGuard {
    _file_guard: Option<tracing_appender::non_blocking::WorkerGuard>,
}

pub fn init(headless: bool) -> LogGuard {
    let file_logging = std::env::var("ORBIT_LOG").as_deref() == Ok("1");

    let (file_layer, file_guard) = if file_logging {
        let dir = log_dir();
        let _ = std::fs::create_dir_all(&dir);
        let appender = tracing_appender::rolling::never(dir, "orbit.log");
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let layer = fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .with_filter(env_filter("debug"));
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    let stderr_layer = headless.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_filter(env_filter("warn"))
    });

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .init();

    LogGuard {
        _file_guard: file_guard,
    }
}

fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

fn log_dir() -> PathBuf {
    let base = std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .or_else(|_| {
            std::env::var("HOME").map(|home| PathBuf::from(home).join(".local").join("state"))
        })
        .unwrap_or_else(|_| std::env::temp_dir());
    base.join("orbit")
}
