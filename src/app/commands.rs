//! Inbound commands to the application service.
//!
//! Actions requested by the host (settings screen, reset button, config
//! reload) that the [`SessionService`](super::service::SessionService)
//! interprets and acts upon.

use crate::config::SessionConfig;

/// Commands that external adapters can send into the application core.
#[derive(Debug, Clone)]
pub enum AppCommand {
    /// Hot-reload configuration.  Validated before it replaces the live
    /// config; takes effect at the next timer start.
    UpdateConfig(SessionConfig),

    /// Drop whatever is in progress and return to a fresh Idle.
    ResetSession,
}
