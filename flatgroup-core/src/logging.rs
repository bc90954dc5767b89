use flatgroup_config::{Config, CONFIG};
use tracing_subscriber::{
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
};

/// Installs the global tracing subscriber using the level from [`CONFIG`].
///
/// `RUST_LOG` takes precedence when set. Fails if a global subscriber is
/// already installed.
pub fn init_tracing() -> Result<(), TryInitError> {
    init_tracing_with(&CONFIG)
}

pub fn init_tracing_with(config: &Config) -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_directive(config).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init()
}

fn default_directive(config: &Config) -> String {
    format!(
        "{}={}",
        env!("CARGO_CRATE_NAME"),
        config.log_level.to_lowercase()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directive_targets_this_crate() {
        let config = Config {
            log_level: "DEBUG".to_string(),
            ..Config::default()
        };
        assert_eq!(default_directive(&config), "flatgroup_core=debug");
    }

    #[test]
    fn second_init_reports_error() {
        let config = Config::default();
        let _ = init_tracing_with(&config);
        assert!(init_tracing_with(&config).is_err());
    }
}
