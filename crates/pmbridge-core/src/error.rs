//! Error types for pmbridge-core
//!
//! This module provides a no_std compatible error type that is shared by the
//! transport, the framework and the chip drivers. Transport failures are
//! passed through unchanged, so a single type covers the whole call chain.

use core::fmt;

/// Core error type - no_std compatible, Copy for efficiency
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    // Addressing errors
    /// Page does not exist on this device (only page 0 is implemented)
    NoSuchDevice,
    /// Register exists in PMBus but is not meaningful for this chip variant
    NoSuchRegister,
    /// Register is not translated by the driver
    ///
    /// Not a failure for the caller: the framework falls back to the raw
    /// register access.
    NoData,
    /// Write rejected because the register is read-only on this chip
    AccessDenied,

    // Bind errors
    /// Manufacturer model does not match any known device
    UnsupportedDevice,
    /// A bind-time prerequisite is missing (adapter functionality,
    /// identification, coefficients)
    DeviceNotReady,

    // Transport errors
    /// Device did not acknowledge the transfer
    Nack,
    /// Bus transfer timed out
    Timeout,
    /// Generic bus error (arbitration lost, protocol error, ...)
    BusError,
    /// Block transfer did not fit into the provided buffer
    BufferTooSmall,
}

impl Error {
    /// Map to the negative Linux errno value expected by the hwmon core
    pub const fn errno(self) -> i32 {
        match self {
            Self::NoSuchDevice | Self::NoSuchRegister => -6, // ENXIO
            Self::NoData => -61,                             // ENODATA
            Self::AccessDenied => -13,                       // EACCES
            Self::UnsupportedDevice | Self::DeviceNotReady => -19, // ENODEV
            Self::Nack => -121,                              // EREMOTEIO
            Self::Timeout => -110,                           // ETIMEDOUT
            Self::BusError => -5,                            // EIO
            Self::BufferTooSmall => -75,                     // EOVERFLOW
        }
    }

    /// True for errors raised by the transport rather than by translation
    pub const fn is_transport(self) -> bool {
        matches!(
            self,
            Self::Nack | Self::Timeout | Self::BusError | Self::BufferTooSmall
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSuchDevice => write!(f, "no such page on device"),
            Self::NoSuchRegister => write!(f, "register not supported by this chip"),
            Self::NoData => write!(f, "register not translated"),
            Self::AccessDenied => write!(f, "register is read-only"),
            Self::UnsupportedDevice => write!(f, "unsupported device"),
            Self::DeviceNotReady => write!(f, "device not ready"),
            Self::Nack => write!(f, "device did not acknowledge"),
            Self::Timeout => write!(f, "bus transfer timed out"),
            Self::BusError => write!(f, "bus error"),
            Self::BufferTooSmall => write!(f, "buffer too small"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Result type alias using the core Error type
pub type Result<T> = core::result::Result<T, Error>;
