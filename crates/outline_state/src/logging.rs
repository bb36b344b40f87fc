use anyhow::Result;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

use crate::{LogFormat, OutlineConfig};

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` wins over `config.log_level`. Fails (instead of panicking) if a
/// subscriber is already installed.
pub fn init(config: &OutlineConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let fmt_layer = match config.log_format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_current_span(true)
            .with_target(true)
            .boxed(),
        LogFormat::Pretty => fmt::layer().with_target(true).boxed(),
    };

    Registry::default()
        .with(fmt_layer)
        .with(env_filter)
        .try_init()?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        log_format = ?config.log_format,
        "Outline logging initialized"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_fails_cleanly() {
        let config = OutlineConfig::default();
        // Another test in this process may have installed a subscriber first;
        // either way the second call must return an error.
        let _ = init(&config);
        assert!(init(&config).is_err());
    }
}
