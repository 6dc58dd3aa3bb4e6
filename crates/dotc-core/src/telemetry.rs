//! Logging setup.
//!
//! The engine logs through `tracing`; embedders call [`init_tracing`] once
//! to install a subscriber filtered by `RUST_LOG` (default `info`).

use dotc_types::{DotcError, Result};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install a global `fmt` subscriber, as JSON lines when `json` is set.
///
/// # Errors
/// `InvalidConfig` if a global subscriber is already installed.
pub fn init_tracing(json: bool) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::registry().with(env_filter);

    let installed = if json {
        subscriber
            .with(fmt::layer().json().with_target(true))
            .try_init()
    } else {
        subscriber.with(fmt::layer().with_target(true)).try_init()
    };
    installed.map_err(|e| DotcError::InvalidConfig {
        reason: format!("tracing subscriber: {e}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_install_is_rejected() {
        // The first call may race other tests; only the second must fail.
        let _ = init_tracing(false);
        assert!(matches!(
            init_tracing(true),
            Err(DotcError::InvalidConfig { .. })
        ));
    }
}
