//! Subscriber installation.

use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Which subscriber [`init`] installs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable lines
    Development,
    /// One JSON object per event
    Production,
    /// In-memory capture, see [`init_test_capture`](super::init_test_capture)
    Test,
}

impl Profile {
    /// Filter used when `RUST_LOG` is unset
    pub fn default_filter(&self) -> &'static str {
        match self {
            Profile::Development => "valuediff_core=debug",
            Profile::Production => "valuediff_core=info",
            Profile::Test => "valuediff_core=trace",
        }
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.default_filter()))
    }
}

static INIT_ONCE: Once = Once::new();

/// Install the global subscriber for `profile`.
///
/// Only the first call in a process does anything. If the host application
/// already installed a subscriber, that one is left in place.
///
/// ```
/// use valuediff_core::logging_facility::{init, Profile};
///
/// init(Profile::Development);
/// init(Profile::Production); // no-op
/// ```
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| {
        let installed = match profile {
            Profile::Development => tracing_subscriber::fmt()
                .with_env_filter(profile.filter())
                .finish()
                .try_init()
                .is_ok(),
            Profile::Production => tracing_subscriber::fmt()
                .json()
                .with_env_filter(profile.filter())
                .finish()
                .try_init()
                .is_ok(),
            Profile::Test => {
                super::init_test_capture();
                true
            }
        };
        if installed {
            tracing::debug!(?profile, "logging initialised");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_default_filters() {
        assert_eq!(Profile::Development.default_filter(), "valuediff_core=debug");
        assert_eq!(Profile::Production.default_filter(), "valuediff_core=info");
        assert_eq!(Profile::Test.default_filter(), "valuediff_core=trace");
    }

    #[test]
    fn test_init_is_idempotent() {
        init(Profile::Test);
        init(Profile::Development);
        let capture = super::super::init_test_capture();
        crate::log_op_start!("init_idempotence_check");
        capture.assert_event_exists("init_idempotence_check", crate::schema::EVENT_START);
    }
}
