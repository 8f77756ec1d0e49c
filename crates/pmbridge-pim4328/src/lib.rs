//! pmbridge-pim4328 - PIM4328 family power interface module driver
//!
//! Supports the Flex PIM4328, PIM4820 and PIM4006 modules (plus the
//! PIM4106/4206/4306/4406 and BMR455 derivatives). These modules report part
//! of their state in manufacturer registers; the driver folds those into the
//! standard PMBus status registers and maps the per-feed input readings onto
//! the phases of READ_VIN and READ_IIN.
//!
//! # Example
//!
//! ```ignore
//! use pmbridge_pim4328::Pim4328;
//! use pmbridge_core::driver::read_word;
//! use pmbridge_core::commands::STATUS_WORD;
//!
//! let pim = Pim4328::probe(&mut client, &mut framework, "pim4328")?;
//! let status = read_word(&pim, &mut client, 0, 0xFF, STATUS_WORD)?;
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

mod device;
mod variant;

pub use device::{
    Pim4328, MFR_FET_CHECKSTATUS, MFR_READ_IINA, MFR_READ_IINB, MFR_READ_STATUS, MFR_READ_VINA,
    MFR_READ_VINB, MFR_STATUS_BITS,
};
pub use variant::{info_for, Variant, DEVICE_IDS};
