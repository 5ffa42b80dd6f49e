use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, filter::Targets, fmt, prelude::__tracing_subscriber_SubscriberExt,
    util::SubscriberInitExt,
};

/// Levels let through for the `fxc` target. `verbose` enables debug output;
/// otherwise a `RUST_LOG` setting decides, and without one logging is off.
fn app_targets(verbose: bool, env_configured: bool) -> Targets {
    let level = match (verbose, env_configured) {
        (true, _) => LevelFilter::DEBUG,
        (false, true) => LevelFilter::TRACE,
        (false, false) => LevelFilter::OFF,
    };
    Targets::new().with_target("fxc", level)
}

/// Installs the global subscriber. Logging stays off unless `verbose` is set
/// or `RUST_LOG` enables it.
pub fn init_logging(verbose: bool) {
    let env_filter = EnvFilter::try_from_default_env().ok();
    let app_filter = app_targets(verbose, env_filter.is_some());
    let default_level = if verbose { "debug" } else { "off" };
    let env_filter = env_filter.unwrap_or_else(|| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .pretty()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(app_filter)
        .with(env_filter)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Level;

    #[test]
    fn test_quiet_by_default() {
        let targets = app_targets(false, false);
        assert!(!targets.would_enable("fxc::core::resolver", &Level::ERROR));
    }

    #[test]
    fn test_verbose_enables_debug() {
        let targets = app_targets(true, false);
        assert!(targets.would_enable("fxc::core::resolver", &Level::DEBUG));
        assert!(!targets.would_enable("fxc::core::resolver", &Level::TRACE));
    }

    #[test]
    fn test_rust_log_is_not_masked() {
        let targets = app_targets(false, true);
        assert!(targets.would_enable("fxc::providers", &Level::TRACE));
        assert!(!targets.would_enable("hyper", &Level::ERROR));
    }
}
