//! Unified error types for the session controller.
//!
//! A single `Error` enum that every subsystem converts into, keeping the
//! host's error handling uniform.  None of these ever reach the state
//! machine: malformed samples are dropped at the sensor hub, actuator
//! failures are logged by the adapter that hit them, and configuration
//! errors are raised before a [`SessionService`](crate::app::service::SessionService)
//! exists.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible operation in the crate funnels into this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Configuration is invalid or could not be loaded.
    Config(ConfigError),
    /// An actuator command failed on the host side.
    Actuator(ActuatorError),
    /// A sensor record could not be accepted.
    Feed(FeedError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Actuator(e) => write!(f, "actuator: {e}"),
            Self::Feed(e) => write!(f, "feed: {e}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

/// Errors raised while loading or validating a [`SessionConfig`](crate::config::SessionConfig).
///
/// Invalid values are rejected, never clamped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No config source exists.
    NotFound,
    /// The config source could not be parsed.  Carries the parser message.
    Malformed(String),
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
    /// Generic I/O error from the config backend.
    IoError,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "config not found"),
            Self::Malformed(msg) => write!(f, "config malformed: {msg}"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {msg}"),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Actuator errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorError {
    /// GPIO set failed (vibration motor).
    PinWriteFailed,
    /// PWM duty-cycle write failed (buzzer).
    PwmWriteFailed,
}

impl fmt::Display for ActuatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PinWriteFailed => write!(f, "pin write failed"),
            Self::PwmWriteFailed => write!(f, "PWM write failed"),
        }
    }
}

impl From<ActuatorError> for Error {
    fn from(e: ActuatorError) -> Self {
        Self::Actuator(e)
    }
}

// ---------------------------------------------------------------------------
// Sensor feed errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedError {
    /// A sample value was NaN or infinite.
    NonFinite,
    /// A feed line could not be decoded into records.
    Malformed,
    /// A batch carried more records than [`MAX_BATCH`](crate::sensors::MAX_BATCH).
    BatchOverflow,
}

impl fmt::Display for FeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFinite => write!(f, "non-finite sample"),
            Self::Malformed => write!(f, "malformed record"),
            Self::BatchOverflow => write!(f, "batch overflow"),
        }
    }
}

impl From<FeedError> for Error {
    fn from(e: FeedError) -> Self {
        Self::Feed(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_subsystem() {
        let e: Error = ConfigError::ValidationFailed("work_duration_secs must be > 0").into();
        assert_eq!(
            e.to_string(),
            "config: validation failed: work_duration_secs must be > 0"
        );
        let e: Error = ActuatorError::PinWriteFailed.into();
        assert_eq!(e.to_string(), "actuator: pin write failed");
        let e: Error = FeedError::NonFinite.into();
        assert_eq!(e.to_string(), "feed: non-finite sample");
    }
}
