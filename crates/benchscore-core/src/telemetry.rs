//! Log subscriber setup for the `benchscore` command line.
//!
//! Scoring events come from the `benchscore_core` and `benchscore` targets;
//! everything else stays at `warn` unless `RUST_LOG` says otherwise.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Targets that receive the requested verbosity.
const SCORING_TARGETS: &[&str] = &["benchscore_core", "benchscore"];

/// `DEBUG` for `--verbose`, otherwise `INFO`.
pub fn default_level(verbose: bool) -> Level {
    if verbose {
        Level::DEBUG
    } else {
        Level::INFO
    }
}

/// Filter directive used when `RUST_LOG` is unset, e.g.
/// `warn,benchscore_core=info,benchscore=info`.
pub fn default_directive(level: Level) -> String {
    let mut directive = String::from("warn");
    for target in SCORING_TARGETS {
        directive.push_str(&format!(",{target}={}", level.as_str().to_lowercase()));
    }
    directive
}

/// Install the global subscriber writing to stderr, so stdout carries only
/// results: JSON lines when `json`, otherwise human-readable lines.
///
/// A subscriber installed earlier (by a test harness or a previous call)
/// stays in place.
pub fn init_tracing(json: bool, level: Level) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(level)));

    let json_layer = json.then(|| {
        fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
            .json()
    });
    let text_layer = (!json).then(|| {
        fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
    });

    if tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .try_init()
        .is_err()
    {
        tracing::debug!("tracing subscriber already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_level_follows_verbose_flag() {
        assert_eq!(default_level(true), Level::DEBUG);
        assert_eq!(default_level(false), Level::INFO);
    }

    #[test]
    fn test_default_directive_scopes_scoring_targets() {
        assert_eq!(
            default_directive(Level::DEBUG),
            "warn,benchscore_core=debug,benchscore=debug"
        );
    }

    #[test]
    fn test_repeated_init_keeps_first_subscriber() {
        init_tracing(false, Level::WARN);
        init_tracing(true, Level::DEBUG);
    }
}
