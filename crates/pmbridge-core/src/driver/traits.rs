//! Transport, framework and driver hook traits
//!
//! A chip driver sits between two collaborators:
//! - the [`PmbusClient`] gives raw register access to the device,
//! - the [`PmbusFramework`] exposes the translated readings and supplies
//!   DIRECT coefficients.
//!
//! The driver itself implements [`PmbusDriver`]: the framework calls its
//! hooks for every register access and falls back to the raw register when a
//! hook answers [`Error::NoData`].

use crate::commands::COEFFICIENTS;
use crate::error::{Error, Result};
use bitflags::bitflags;

use super::info::{Coefficients, DriverInfo, SensorClass};

bitflags! {
    /// Adapter functionality flags
    ///
    /// Values follow the Linux `I2C_FUNC_*` constants.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct I2cFunctionality: u32 {
        /// Plain I2C transfers
        const I2C                    = 0x0000_0001;
        /// SMBus block process call
        const SMBUS_BLOCK_PROC_CALL  = 0x0000_8000;
        /// SMBus read byte data
        const SMBUS_READ_BYTE_DATA   = 0x0008_0000;
        /// SMBus write byte data
        const SMBUS_WRITE_BYTE_DATA  = 0x0010_0000;
        /// SMBus read word data
        const SMBUS_READ_WORD_DATA   = 0x0020_0000;
        /// SMBus write word data
        const SMBUS_WRITE_WORD_DATA  = 0x0040_0000;
        /// SMBus read block data
        const SMBUS_READ_BLOCK_DATA  = 0x0100_0000;
        /// SMBus write block data
        const SMBUS_WRITE_BLOCK_DATA = 0x0200_0000;

        /// Shorthand for byte data (read and write)
        const SMBUS_BYTE_DATA = Self::SMBUS_READ_BYTE_DATA.bits() | Self::SMBUS_WRITE_BYTE_DATA.bits();
        /// Shorthand for word data (read and write)
        const SMBUS_WORD_DATA = Self::SMBUS_READ_WORD_DATA.bits() | Self::SMBUS_WRITE_WORD_DATA.bits();
        /// Shorthand for block data (read and write)
        const SMBUS_BLOCK_DATA = Self::SMBUS_READ_BLOCK_DATA.bits() | Self::SMBUS_WRITE_BLOCK_DATA.bits();
    }
}

impl Default for I2cFunctionality {
    fn default() -> Self {
        I2cFunctionality::empty()
    }
}

/// Raw register access to one PMBus device
///
/// Page and phase selection is the client's business: a client is expected
/// to issue PAGE/PHASE writes as needed before the actual transfer. Phase
/// [`PHASE_ALL`](crate::commands::PHASE_ALL) addresses all phases.
pub trait PmbusClient {
    /// Functionality supported by the adapter the device sits on
    fn functionality(&self) -> I2cFunctionality;

    /// Read a byte register on a page
    fn read_byte_data(&mut self, page: u8, reg: u8) -> Result<u8>;

    /// Read a word register on a page and phase
    fn read_word_data(&mut self, page: u8, phase: u8, reg: u8) -> Result<u16>;

    /// Write a word register on a page
    fn write_word_data(&mut self, page: u8, reg: u8, word: u16) -> Result<()>;

    /// Read a block register into `buf`, returning the block length
    fn read_block_data(&mut self, reg: u8, buf: &mut [u8]) -> Result<usize>;

    /// Block write / block read process call, returning the read length
    fn block_process_call(&mut self, reg: u8, write: &[u8], read: &mut [u8]) -> Result<usize>;

    /// Check that the adapter supports all of `required`
    fn check_functionality(&self, required: I2cFunctionality) -> bool {
        self.functionality().contains(required)
    }
}

/// The monitoring framework a driver binds into
pub trait PmbusFramework {
    /// Fetch the DIRECT coefficients of `class` as used by register `reg`
    ///
    /// The default implementation issues the standard COEFFICIENTS block
    /// process call against the device.
    fn read_coefficients<C: PmbusClient + ?Sized>(
        &mut self,
        client: &mut C,
        class: SensorClass,
        reg: u8,
    ) -> Result<Coefficients> {
        query_coefficients(client, class, reg)
    }

    /// Register a bound device with its completed descriptor
    fn register(&mut self, info: &DriverInfo) -> Result<()>;

    /// Remove a previously registered device
    fn unregister(&mut self, info: &DriverInfo);
}

/// Query DIRECT coefficients with the COEFFICIENTS block process call
///
/// Writes `[reg, 0x01]` (read coefficients) and expects the 5-byte
/// `m`, `b`, `R` response.
pub fn query_coefficients<C: PmbusClient + ?Sized>(
    client: &mut C,
    class: SensorClass,
    reg: u8,
) -> Result<Coefficients> {
    let mut block = [0u8; 5];
    let len = client.block_process_call(COEFFICIENTS, &[reg, 0x01], &mut block)?;
    let coefficients = block
        .get(..len)
        .and_then(Coefficients::from_block)
        .ok_or(Error::BusError)?;
    log::debug!(
        "{} coefficients for 0x{:02X}: m={} b={} R={}",
        class.name(),
        reg,
        coefficients.m,
        coefficients.b,
        coefficients.r
    );
    Ok(coefficients)
}

/// Register translation hooks of a bound chip driver
///
/// Every hook defaults to [`Error::NoData`], meaning "not translated".
pub trait PmbusDriver {
    /// Descriptor the driver was bound with
    fn info(&self) -> &DriverInfo;

    /// Translate a byte register read
    fn read_byte_data<C: PmbusClient + ?Sized>(
        &self,
        _client: &mut C,
        _page: u8,
        _reg: u8,
    ) -> Result<u8> {
        Err(Error::NoData)
    }

    /// Translate a word register read
    fn read_word_data<C: PmbusClient + ?Sized>(
        &self,
        _client: &mut C,
        _page: u8,
        _phase: u8,
        _reg: u8,
    ) -> Result<u16> {
        Err(Error::NoData)
    }

    /// Translate (or reject) a word register write
    fn write_word_data<C: PmbusClient + ?Sized>(
        &self,
        _client: &mut C,
        _page: u8,
        _reg: u8,
        _word: u16,
    ) -> Result<()> {
        Err(Error::NoData)
    }
}

/// Read a byte register the way the framework does: driver hook first, raw
/// register when the hook does not translate it
pub fn read_byte<D, C>(driver: &D, client: &mut C, page: u8, reg: u8) -> Result<u8>
where
    D: PmbusDriver + ?Sized,
    C: PmbusClient + ?Sized,
{
    match driver.read_byte_data(client, page, reg) {
        Err(Error::NoData) => client.read_byte_data(page, reg),
        other => other,
    }
}

/// Read a word register through the driver hook with raw fallback
pub fn read_word<D, C>(driver: &D, client: &mut C, page: u8, phase: u8, reg: u8) -> Result<u16>
where
    D: PmbusDriver + ?Sized,
    C: PmbusClient + ?Sized,
{
    match driver.read_word_data(client, page, phase, reg) {
        Err(Error::NoData) => client.read_word_data(page, phase, reg),
        other => other,
    }
}

/// Write a word register through the driver hook with raw fallback
pub fn write_word<D, C>(driver: &D, client: &mut C, page: u8, reg: u8, word: u16) -> Result<()>
where
    D: PmbusDriver + ?Sized,
    C: PmbusClient + ?Sized,
{
    match driver.write_word_data(client, page, reg, word) {
        Err(Error::NoData) => client.write_word_data(page, reg, word),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Client answering every read with a fixed value
    struct FixedClient {
        value: u16,
        coefficients: [u8; 5],
        writes: usize,
    }

    impl PmbusClient for FixedClient {
        fn functionality(&self) -> I2cFunctionality {
            I2cFunctionality::SMBUS_BYTE_DATA | I2cFunctionality::SMBUS_WORD_DATA
        }

        fn read_byte_data(&mut self, _page: u8, _reg: u8) -> Result<u8> {
            Ok(self.value as u8)
        }

        fn read_word_data(&mut self, _page: u8, _phase: u8, _reg: u8) -> Result<u16> {
            Ok(self.value)
        }

        fn write_word_data(&mut self, _page: u8, _reg: u8, _word: u16) -> Result<()> {
            self.writes += 1;
            Ok(())
        }

        fn read_block_data(&mut self, _reg: u8, _buf: &mut [u8]) -> Result<usize> {
            Err(Error::Nack)
        }

        fn block_process_call(&mut self, _reg: u8, _write: &[u8], read: &mut [u8]) -> Result<usize> {
            read[..5].copy_from_slice(&self.coefficients);
            Ok(5)
        }
    }

    /// Driver translating only STATUS_WORD
    struct StatusOnly(DriverInfo);

    impl PmbusDriver for StatusOnly {
        fn info(&self) -> &DriverInfo {
            &self.0
        }

        fn read_word_data<C: PmbusClient + ?Sized>(
            &self,
            _client: &mut C,
            _page: u8,
            _phase: u8,
            reg: u8,
        ) -> Result<u16> {
            match reg {
                crate::commands::STATUS_WORD => Ok(0x2001),
                _ => Err(Error::NoData),
            }
        }
    }

    struct NullFramework;

    impl PmbusFramework for NullFramework {
        fn register(&mut self, _info: &DriverInfo) -> Result<()> {
            Ok(())
        }

        fn unregister(&mut self, _info: &DriverInfo) {}
    }

    fn client() -> FixedClient {
        FixedClient {
            value: 0x1234,
            coefficients: [0xB8, 0x24, 0x00, 0x00, 0xFE],
            writes: 0,
        }
    }

    #[test]
    fn test_hook_then_fallback() {
        let driver = StatusOnly(DriverInfo::new(1));
        let mut client = client();

        assert_eq!(read_word(&driver, &mut client, 0, 0xFF, 0x79), Ok(0x2001));
        assert_eq!(read_word(&driver, &mut client, 0, 0xFF, 0x8B), Ok(0x1234));
        assert_eq!(read_byte(&driver, &mut client, 0, 0x78), Ok(0x34));

        write_word(&driver, &mut client, 0, 0x40, 0).unwrap();
        assert_eq!(client.writes, 1);
    }

    #[test]
    fn test_default_coefficient_query() {
        let mut client = client();
        let c = NullFramework
            .read_coefficients(&mut client, SensorClass::VoltageIn, 0x88)
            .unwrap();
        assert_eq!(c, Coefficients::new(9400, 0, -2));
    }

    #[test]
    fn test_check_functionality() {
        let client = client();
        assert!(client.check_functionality(I2cFunctionality::SMBUS_READ_BYTE_DATA));
        assert!(!client.check_functionality(
            I2cFunctionality::SMBUS_READ_BYTE_DATA | I2cFunctionality::SMBUS_BLOCK_DATA
        ));
    }
}
