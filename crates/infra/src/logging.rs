//! Tracing subscriber setup
//!
//! Call [`init_tracing`] once from the host binary. `RUST_LOG` takes
//! precedence over the default filter. HTTP transport crates are capped at
//! `warn` unless `RUST_LOG` names them explicitly.

use std::str::FromStr;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Default filter when neither the caller nor `RUST_LOG` provides one
pub const DEFAULT_FILTER: &str = "info";

const NOISY_TARGETS: [&str; 3] = ["hyper=warn", "reqwest=warn", "rustls=warn"];

/// Output format for log lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Multi-line human-readable output
    Pretty,
    /// One JSON object per event
    Json,
    #[default]
    Compact,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            "compact" => Ok(Self::Compact),
            other => Err(format!("unknown log format: {other}")),
        }
    }
}

/// Build the filter: `RUST_LOG` when set, else `default_filter`
fn build_filter(default_filter: &str) -> EnvFilter {
    let mut filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let explicit = std::env::var("RUST_LOG").unwrap_or_default();
    for directive in NOISY_TARGETS {
        let target = directive.split('=').next().unwrap_or(directive);
        if explicit.contains(target) {
            continue;
        }
        if let Ok(parsed) = directive.parse() {
            filter = filter.add_directive(parsed);
        }
    }

    filter
}

/// Install the global subscriber
///
/// Returns `false` if a subscriber was already installed; the existing one
/// stays in place, so repeated calls are harmless.
pub fn init_tracing(default_filter: &str, format: LogFormat) -> bool {
    let registry = tracing_subscriber::registry().with(build_filter(default_filter));

    let result = match format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_target(true).with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Pretty => registry
            .with(fmt::layer().pretty().with_target(true).with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Compact => registry
            .with(fmt::layer().compact().with_target(false).with_writer(std::io::stderr))
            .try_init(),
    };

    result.is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parsing() {
        assert_eq!("JSON".parse::<LogFormat>(), Ok(LogFormat::Json));
        assert_eq!(" pretty ".parse::<LogFormat>(), Ok(LogFormat::Pretty));
        assert_eq!(LogFormat::default(), LogFormat::Compact);
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_init_is_idempotent() {
        init_tracing("debug", LogFormat::Compact);
        assert!(!init_tracing("debug", LogFormat::Json));
    }

    #[test]
    fn test_invalid_default_filter_falls_back() {
        let filter = build_filter("=not=a=filter=");
        assert!(!filter.to_string().is_empty());
    }
}
