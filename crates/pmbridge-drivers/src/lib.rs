//! Driver registry
//!
//! This crate binds devices to the right chip driver by their configured
//! name. The CLI (and anything else driving devices by name) should only deal
//! with [`BoundDevice`], never with the individual driver crates.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────┐
//! │                 CLI (bin/pmbridge)                │
//! │  - Only imports pmbridge-drivers and the core     │
//! └───────────────────────────────────────────────────┘
//!                          │
//!                          ▼
//! ┌───────────────────────────────────────────────────┐
//! │            pmbridge-drivers (this crate)          │
//! │  - supported_devices(): names of enabled drivers  │
//! │  - bind(): probe by configured name               │
//! │  - BoundDevice: one enum over all families        │
//! └───────────────────────────────────────────────────┘
//!                          │
//!           ┌──────────────┴──────────────┐
//!           ▼                             ▼
//! ┌──────────────────────┐    ┌──────────────────────┐
//! │  pmbridge-pim4328    │    │  pmbridge-stpddc60   │
//! │  PIM4328/4820/4006   │    │  STPDDC60, BMR481    │
//! └──────────────────────┘    └──────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use pmbridge_drivers::bind;
//! use pmbridge_core::driver::read_word;
//! use pmbridge_core::commands::READ_VOUT;
//!
//! let device = bind("bmr481", &mut client, &mut framework)?;
//! let vout = read_word(&device, &mut client, 0, 0xFF, READ_VOUT)?;
//! device.unbind(&mut framework);
//! ```

#[cfg(not(any(feature = "pim4328", feature = "stpddc60")))]
compile_error!("at least one driver family feature must be enabled");

mod registry;

pub use registry::{bind, family_of, supported_devices, BoundDevice, Family, SupportedDevice};
