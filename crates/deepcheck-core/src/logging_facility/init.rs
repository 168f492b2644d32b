//! Subscriber installation.

use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

pub const DEVELOPMENT_FILTER: &str = "deepcheck=debug,deepcheck_core=debug,deepcheck_cli=debug";
pub const PRODUCTION_FILTER: &str = "deepcheck=info,deepcheck_core=info,deepcheck_cli=info";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable output on stderr
    Development,
    /// JSON lines on stderr
    Production,
    /// Bare registry; pair with `init_test_capture()`
    Test,
}

impl Profile {
    /// Filter used when `RUST_LOG` is unset
    pub fn default_filter(&self) -> &'static str {
        match self {
            Profile::Development => DEVELOPMENT_FILTER,
            Profile::Production | Profile::Test => PRODUCTION_FILTER,
        }
    }
}

static INIT_ONCE: Once = Once::new();

/// Install the global subscriber for `profile`. Later calls do nothing.
///
/// `RUST_LOG` overrides the profile's default filter. Output goes to stderr
/// so it never mixes with rendered diagnostics on stdout.
///
/// ```
/// use deepcheck_core::logging_facility::{init, Profile};
///
/// init(Profile::Production);
/// ```
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(profile.default_filter()));
        // another subscriber may already be installed (test harnesses)
        let installed = match profile {
            Profile::Development => tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .finish()
                .try_init(),
            Profile::Production => tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .finish()
                .try_init(),
            Profile::Test => tracing_subscriber::registry().try_init(),
        };
        if installed.is_err() {
            tracing::debug!(?profile, "global subscriber already set");
        }
    });
}
