//! pmbridge-core - Core library for PMBus register translation drivers
//!
//! Some PMBus devices report status and telemetry through manufacturer
//! specific registers instead of the standard ones. The drivers built on
//! this crate hide that: they probe the chip, pick the register map of the
//! detected variant and translate every standard register access into the
//! proprietary reads it needs.
//!
//! This crate holds everything the drivers share. It is `no_std`
//! compatible, so the same drivers can run on a BMC or inside a host tool.
//!
//! # Features
//!
//! - `std` - Enable standard library support (includes `alloc` and serde
//!   derives on the descriptor types)
//! - `alloc` - Enable heap allocation
//!
//! # Example
//!
//! ```ignore
//! use pmbridge_core::driver::{read_word, PmbusClient, PmbusDriver};
//! use pmbridge_core::commands::{PHASE_ALL, STATUS_WORD};
//!
//! fn status<D: PmbusDriver, C: PmbusClient>(driver: &D, client: &mut C) {
//!     match read_word(driver, client, 0, PHASE_ALL, STATUS_WORD) {
//!         Ok(word) => println!("STATUS_WORD: 0x{:04X}", word),
//!         Err(e) => println!("read failed: {}", e),
//!     }
//! }
//! ```

#![no_std]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod commands;
pub mod convert;
pub mod driver;
pub mod error;
pub mod identify;
pub mod policy;
pub mod status;

pub use error::{Error, Result};
