//! pmbridge-dummy - Emulated PMBus device and framework for testing
//!
//! This crate provides an in-memory PMBus device that answers register
//! reads from a table, and a framework stand-in that records what drivers
//! register with it. It's useful for testing drivers and for exercising the
//! CLI without real hardware.
//!
//! Every access to the emulated device is logged, so tests can check which
//! registers a driver touched and that rejected writes never reach it.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(feature = "std")]
mod snapshot;

#[cfg(feature = "std")]
pub use snapshot::{Capability, Snapshot, SnapshotError};

#[cfg(feature = "alloc")]
use alloc::collections::BTreeMap;
#[cfg(feature = "alloc")]
use alloc::vec::Vec;

use pmbridge_core::commands::{COEFFICIENTS, MFR_MODEL};
use pmbridge_core::driver::{
    Coefficients, DriverInfo, I2cFunctionality, PmbusClient, PmbusFramework, SensorClass,
};
use pmbridge_core::error::{Error, Result};

/// One access to the emulated device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Byte read
    ReadByte {
        /// Page
        page: u8,
        /// Register
        reg: u8,
    },
    /// Word read
    ReadWord {
        /// Page
        page: u8,
        /// Phase
        phase: u8,
        /// Register
        reg: u8,
    },
    /// Word write
    WriteWord {
        /// Page
        page: u8,
        /// Register
        reg: u8,
        /// Written value
        word: u16,
    },
    /// Block read
    ReadBlock {
        /// Register
        reg: u8,
    },
    /// Block process call
    ProcessCall {
        /// Register
        reg: u8,
        /// First byte written (the queried register for COEFFICIENTS)
        arg: u8,
    },
}

/// Emulated single-page PMBus device
///
/// Registers that were never set answer with a NACK, like a real device
/// does for unsupported commands.
#[cfg(feature = "alloc")]
#[derive(Debug, Clone)]
pub struct DummyDevice {
    model: Vec<u8>,
    functionality: I2cFunctionality,
    bytes: BTreeMap<u8, u8>,
    words: BTreeMap<u8, u16>,
    coefficients: BTreeMap<u8, Coefficients>,
    failing: BTreeMap<u8, Error>,
    log: Vec<Access>,
}

#[cfg(feature = "alloc")]
impl DummyDevice {
    /// Create a device reporting `model` in MFR_MODEL, on an adapter with
    /// full SMBus functionality
    pub fn new(model: &[u8]) -> Self {
        Self {
            model: model.to_vec(),
            functionality: Self::full_functionality(),
            bytes: BTreeMap::new(),
            words: BTreeMap::new(),
            coefficients: BTreeMap::new(),
            failing: BTreeMap::new(),
            log: Vec::new(),
        }
    }

    /// Adapter functionality of a fully capable SMBus controller
    pub fn full_functionality() -> I2cFunctionality {
        I2cFunctionality::I2C
            | I2cFunctionality::SMBUS_BYTE_DATA
            | I2cFunctionality::SMBUS_WORD_DATA
            | I2cFunctionality::SMBUS_BLOCK_DATA
            | I2cFunctionality::SMBUS_BLOCK_PROC_CALL
    }

    /// Replace the adapter functionality
    pub fn with_functionality(mut self, functionality: I2cFunctionality) -> Self {
        self.functionality = functionality;
        self
    }

    /// Set a byte register
    pub fn with_byte(mut self, reg: u8, value: u8) -> Self {
        self.set_byte(reg, value);
        self
    }

    /// Set a word register
    pub fn with_word(mut self, reg: u8, value: u16) -> Self {
        self.set_word(reg, value);
        self
    }

    /// Set the COEFFICIENTS answer for a register
    pub fn with_coefficients(mut self, reg: u8, coefficients: Coefficients) -> Self {
        self.coefficients.insert(reg, coefficients);
        self
    }

    /// Make every access to `reg` fail with `error`
    pub fn with_failure(mut self, reg: u8, error: Error) -> Self {
        self.fail(reg, error);
        self
    }

    /// Set a byte register
    pub fn set_byte(&mut self, reg: u8, value: u8) {
        self.bytes.insert(reg, value);
    }

    /// Set a word register
    pub fn set_word(&mut self, reg: u8, value: u16) {
        self.words.insert(reg, value);
    }

    /// Make every access to `reg` fail with `error`
    pub fn fail(&mut self, reg: u8, error: Error) {
        self.failing.insert(reg, error);
    }

    /// Stop failing accesses to `reg`
    pub fn clear_failure(&mut self, reg: u8) {
        self.failing.remove(&reg);
    }

    /// Current value of a word register
    pub fn word(&self, reg: u8) -> Option<u16> {
        self.words.get(&reg).copied()
    }

    /// Current value of a byte register
    pub fn byte(&self, reg: u8) -> Option<u8> {
        self.bytes.get(&reg).copied()
    }

    /// Model string reported in MFR_MODEL
    pub fn model(&self) -> &[u8] {
        &self.model
    }

    /// All accesses since creation or the last [`clear_log`](Self::clear_log)
    pub fn accesses(&self) -> &[Access] {
        &self.log
    }

    /// Forget the access log
    pub fn clear_log(&mut self) {
        self.log.clear();
    }

    /// Number of word writes that reached the device
    pub fn write_count(&self) -> usize {
        self.log
            .iter()
            .filter(|a| matches!(a, Access::WriteWord { .. }))
            .count()
    }

    fn record(&mut self, access: Access) {
        log::trace!("dummy: {:?}", access);
        self.log.push(access);
    }

    fn check(&self, page: u8, reg: u8) -> Result<()> {
        if let Some(&error) = self.failing.get(&reg) {
            return Err(error);
        }
        if page > 0 {
            return Err(Error::Nack);
        }
        Ok(())
    }
}

#[cfg(feature = "alloc")]
impl PmbusClient for DummyDevice {
    fn functionality(&self) -> I2cFunctionality {
        self.functionality
    }

    fn read_byte_data(&mut self, page: u8, reg: u8) -> Result<u8> {
        self.record(Access::ReadByte { page, reg });
        self.check(page, reg)?;
        self.bytes.get(&reg).copied().ok_or(Error::Nack)
    }

    fn read_word_data(&mut self, page: u8, phase: u8, reg: u8) -> Result<u16> {
        self.record(Access::ReadWord { page, phase, reg });
        self.check(page, reg)?;
        self.words.get(&reg).copied().ok_or(Error::Nack)
    }

    fn write_word_data(&mut self, page: u8, reg: u8, word: u16) -> Result<()> {
        self.record(Access::WriteWord { page, reg, word });
        self.check(page, reg)?;
        self.words.insert(reg, word);
        Ok(())
    }

    fn read_block_data(&mut self, reg: u8, buf: &mut [u8]) -> Result<usize> {
        self.record(Access::ReadBlock { reg });
        self.check(0, reg)?;
        if reg != MFR_MODEL {
            return Err(Error::Nack);
        }
        let dest = buf
            .get_mut(..self.model.len())
            .ok_or(Error::BufferTooSmall)?;
        dest.copy_from_slice(&self.model);
        Ok(self.model.len())
    }

    fn block_process_call(&mut self, reg: u8, write: &[u8], read: &mut [u8]) -> Result<usize> {
        let arg = write.first().copied().ok_or(Error::BusError)?;
        self.record(Access::ProcessCall { reg, arg });
        self.check(0, reg)?;
        if reg != COEFFICIENTS {
            return Err(Error::Nack);
        }
        let c = self.coefficients.get(&arg).copied().ok_or(Error::Nack)?;
        let m = (c.m as i16).to_le_bytes();
        let b = (c.b as i16).to_le_bytes();
        let block = [m[0], m[1], b[0], b[1], c.r as i8 as u8];
        let dest = read.get_mut(..block.len()).ok_or(Error::BufferTooSmall)?;
        dest.copy_from_slice(&block);
        Ok(block.len())
    }
}

/// Framework stand-in recording registrations and coefficient requests
#[cfg(feature = "alloc")]
#[derive(Debug, Clone, Default)]
pub struct DummyCore {
    registered: Vec<DriverInfo>,
    requests: Vec<(SensorClass, u8)>,
    register_error: Option<Error>,
}

#[cfg(feature = "alloc")]
impl DummyCore {
    /// Create an empty framework
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next registrations fail with `error`
    pub fn failing_register(error: Error) -> Self {
        Self {
            register_error: Some(error),
            ..Self::default()
        }
    }

    /// Descriptors currently registered
    pub fn registered(&self) -> &[DriverInfo] {
        &self.registered
    }

    /// Coefficient requests in the order they were made
    pub fn coefficient_requests(&self) -> &[(SensorClass, u8)] {
        &self.requests
    }
}

#[cfg(feature = "alloc")]
impl PmbusFramework for DummyCore {
    fn read_coefficients<C: PmbusClient + ?Sized>(
        &mut self,
        client: &mut C,
        class: SensorClass,
        reg: u8,
    ) -> Result<Coefficients> {
        self.requests.push((class, reg));
        pmbridge_core::driver::query_coefficients(client, class, reg)
    }

    fn register(&mut self, info: &DriverInfo) -> Result<()> {
        if let Some(error) = self.register_error {
            return Err(error);
        }
        self.registered.push(info.clone());
        Ok(())
    }

    fn unregister(&mut self, info: &DriverInfo) {
        if let Some(pos) = self.registered.iter().position(|i| i == info) {
            self.registered.remove(pos);
        }
    }
}
