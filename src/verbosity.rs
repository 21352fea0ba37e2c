use tracing_subscriber::{filter::LevelFilter, EnvFilter};

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Silent,
    Normal,
    Verbose,
    Debug,
}

impl From<Verbosity> for tracing::Level {
    fn from(value: Verbosity) -> Self {
        match value {
            Verbosity::Silent => tracing::Level::ERROR,
            Verbosity::Normal => tracing::Level::INFO,
            Verbosity::Verbose => tracing::Level::DEBUG,
            Verbosity::Debug => tracing::Level::TRACE,
        }
    }
}

/// Filter at the level of `verbosity`, refined by `directives` in the
/// `RUST_LOG` syntax. Malformed directives are skipped.
pub fn env_filter(verbosity: Verbosity, directives: &str) -> EnvFilter {
    let level: tracing::Level = verbosity.into();
    EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .parse_lossy(directives)
}

/// Install the global subscriber used by the binaries. `RUST_LOG` is honoured
/// on top of `verbosity`.
pub fn init_tracing(verbosity: Verbosity, colour: bool) {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default();
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbosity, &directives))
        .with_ansi(colour)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_sets_the_default_level() {
        assert_eq!(
            env_filter(Verbosity::Silent, "").max_level_hint(),
            Some(LevelFilter::ERROR)
        );
        assert_eq!(
            env_filter(Verbosity::Verbose, "").max_level_hint(),
            Some(LevelFilter::DEBUG)
        );
    }

    #[test]
    fn directives_refine_the_filter() {
        assert_eq!(
            env_filter(Verbosity::Normal, "gridagents=trace").max_level_hint(),
            Some(LevelFilter::TRACE)
        );
    }
}
