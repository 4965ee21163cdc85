//! Tracing subscriber setup.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` wins when it is set. Otherwise the crate named by `bin_name`
/// logs at `default_level` and everything else at `info`.
pub fn setup_logger(bin_name: &str, default_level: &str) {
    let crate_name = bin_name.replace('-', "_");
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{crate_name}={default_level},info")));
    let directives = filter.to_string();

    // try_init so repeated calls (e.g. from several tests) are harmless
    match tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .try_init()
    {
        Ok(()) => tracing::debug!("Logger initialized with filter '{}'", directives),
        Err(e) => tracing::debug!("Logger already initialized: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_logger_can_be_called_twice() {
        // テスト項目: 2 回呼んでもパニックしない（2 回目は既存の subscriber を使う）
        setup_logger("kyoyu-shared", "debug");
        setup_logger("kyoyu-shared", "info");
        tracing::info!("still logging");
    }
}
