//! Stderr diagnostics for the CLI.
//!
//! `--log-level` applies to the antwire crates only; everything else stays at
//! `warn`. Setting `ANTWIRE_LOG` replaces the whole filter with its own
//! directives, e.g. `ANTWIRE_LOG=antwire_frame=trace`.

use clap::ValueEnum;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable holding filter directives.
pub const LOG_ENV: &str = "ANTWIRE_LOG";

const CRATES: [&str; 3] = ["antwire", "antwire_frame", "antwire_message"];

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_filter(self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }

    /// Filter directives scoping this level to the antwire crates.
    pub fn directives(self) -> String {
        let level = self.as_filter().to_string().to_ascii_lowercase();
        let mut out = String::from("warn");
        for name in CRATES {
            out.push_str(&format!(",{name}={level}"));
        }
        out
    }

    /// Targets are shown once the codec layers get chatty enough to need
    /// telling apart.
    fn show_target(self) -> bool {
        matches!(self, LogLevel::Debug | LogLevel::Trace)
    }
}

/// Install the stderr subscriber. Stdout is reserved for command output.
pub fn init_logging(format: LogFormat, level: LogLevel) {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level.directives()));
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(level.show_target());

    let registry = tracing_subscriber::registry().with(filter);
    let _ = match format {
        LogFormat::Text => registry.with(layer).try_init(),
        LogFormat::Json => registry.with(layer.json()).try_init(),
    };
}
