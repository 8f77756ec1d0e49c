//! CLI error type

use pmbridge_dummy::SnapshotError;
use thiserror::Error;

/// Error type for CLI commands
#[derive(Debug, Error)]
pub enum CliError {
    /// Snapshot could not be loaded
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    /// Binding the device failed
    #[error("Failed to bind {device}: {source}")]
    Bind {
        /// Configured device name
        device: String,
        /// Driver error
        #[source]
        source: pmbridge_core::Error,
    },

    /// Register access failed
    #[error("{register} on page {page}: {source}")]
    Access {
        /// Register name or code
        register: String,
        /// Page
        page: u8,
        /// Driver or transport error
        #[source]
        source: pmbridge_core::Error,
    },
}
