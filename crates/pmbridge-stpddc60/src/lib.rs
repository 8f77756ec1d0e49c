//! pmbridge-stpddc60 - ST STPDDC60 digital controller driver
//!
//! The STPDDC60 (and the BMR481 built on it) reports its output voltage as a
//! VID code and keeps garbage in the upper bits of the output voltage fault
//! limits. The driver presents READ_VOUT in LINEAR16 with a fixed exponent,
//! masks the limits and refuses writes to them.

#![cfg_attr(not(feature = "std"), no_std)]

use pmbridge_core::commands::{READ_VOUT, VOUT_MODE, VOUT_OV_FAULT_LIMIT, VOUT_UV_FAULT_LIMIT};
use pmbridge_core::convert::vid_to_linear;
use pmbridge_core::driver::{
    DriverInfo, Functionality, I2cFunctionality, PmbusClient, PmbusDriver, PmbusFramework,
};
use pmbridge_core::error::{Error, Result};
use pmbridge_core::identify::{self, DeviceId, Model, ModelDisplay};
use pmbridge_core::policy::require;

/// VOUT_MODE reported for the converted READ_VOUT: LINEAR16, exponent -8
pub const VOUT_MODE_LINEAR: u8 = 0x18;

/// Valid bits of the output voltage fault limits
const LIMIT_MASK: u16 = 0x07FF;

/// Supported model names
pub const DEVICE_IDS: &[DeviceId<()>] = &[
    DeviceId::new("stpddc60", ()),
    DeviceId::new("bmr481", ()),
];

/// Descriptor shared by all supported models
pub const INFO: DriverInfo = DriverInfo::new(1).with_func(
    0,
    Functionality::VOUT
        .union(Functionality::STATUS_VOUT)
        .union(Functionality::VIN)
        .union(Functionality::STATUS_INPUT)
        .union(Functionality::TEMP)
        .union(Functionality::STATUS_TEMP)
        .union(Functionality::IOUT)
        .union(Functionality::STATUS_IOUT)
        .union(Functionality::POUT),
);

/// A STPDDC60 bound to the framework
#[derive(Debug, Clone)]
pub struct Stpddc60 {
    name: &'static str,
    model: Model,
    info: DriverInfo,
}

impl Stpddc60 {
    /// Identify the device behind `client` and register it with `framework`
    pub fn probe<C, F>(client: &mut C, framework: &mut F) -> Result<Self>
    where
        C: PmbusClient + ?Sized,
        F: PmbusFramework + ?Sized,
    {
        if !client.check_functionality(
            I2cFunctionality::SMBUS_READ_BYTE_DATA | I2cFunctionality::SMBUS_BLOCK_DATA,
        ) {
            log::error!("Adapter lacks byte or block data support");
            return Err(Error::DeviceNotReady);
        }

        let model = identify::read_model(client).inspect_err(|e| {
            log::error!("Failed to read Manufacturer Model: {}", e);
        })?;

        let detected = identify::match_model(DEVICE_IDS, &model).inspect_err(|_| {
            log::error!("Unsupported device: {}", ModelDisplay(&model));
        })?;

        let info = INFO;
        framework.register(&info)?;

        log::info!("Bound {} ({})", detected.name, ModelDisplay(&model));
        Ok(Self {
            name: detected.name,
            model,
            info,
        })
    }

    /// Unregister the device from the framework
    pub fn remove<F: PmbusFramework + ?Sized>(self, framework: &mut F) {
        framework.unregister(&self.info);
    }

    /// Device-table name the device was detected as
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// MFR_MODEL string read at probe time
    pub fn model(&self) -> &[u8] {
        &self.model
    }
}

impl PmbusDriver for Stpddc60 {
    fn info(&self) -> &DriverInfo {
        &self.info
    }

    fn read_byte_data<C: PmbusClient + ?Sized>(
        &self,
        _client: &mut C,
        page: u8,
        reg: u8,
    ) -> Result<u8> {
        if page > 0 {
            return Err(Error::NoSuchDevice);
        }

        match reg {
            VOUT_MODE => Ok(VOUT_MODE_LINEAR),
            _ => Err(Error::NoData),
        }
    }

    fn read_word_data<C: PmbusClient + ?Sized>(
        &self,
        client: &mut C,
        page: u8,
        phase: u8,
        reg: u8,
    ) -> Result<u16> {
        if page > 0 {
            return Err(Error::NoSuchDevice);
        }

        match reg {
            READ_VOUT => require(client.read_word_data(page, phase, reg)).map(vid_to_linear),
            VOUT_OV_FAULT_LIMIT | VOUT_UV_FAULT_LIMIT => {
                require(client.read_word_data(page, phase, reg)).map(|w| w & LIMIT_MASK)
            }
            _ => Err(Error::NoData),
        }
    }

    fn write_word_data<C: PmbusClient + ?Sized>(
        &self,
        _client: &mut C,
        page: u8,
        reg: u8,
        _word: u16,
    ) -> Result<()> {
        if page > 0 {
            return Err(Error::NoSuchDevice);
        }

        match reg {
            VOUT_OV_FAULT_LIMIT => {
                log::info!("Vout overvoltage limit is readonly");
                Err(Error::AccessDenied)
            }
            VOUT_UV_FAULT_LIMIT => {
                log::info!("Vout undervoltage limit is readonly");
                Err(Error::AccessDenied)
            }
            _ => Err(Error::NoData),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pmbridge_core::commands::{MFR_MODEL, READ_VIN, STATUS_WORD};
    use pmbridge_core::driver::{read_byte, read_word, write_word, NumericFormat, SensorClass};
    use pmbridge_dummy::{DummyCore, DummyDevice};

    fn bind(dev: &mut DummyDevice) -> Stpddc60 {
        let mut core = DummyCore::new();
        let stp = Stpddc60::probe(dev, &mut core).unwrap();
        dev.clear_log();
        stp
    }

    #[test]
    fn test_probe() {
        let mut dev = DummyDevice::new(b"BMR481-0001");
        let mut core = DummyCore::new();
        let stp = Stpddc60::probe(&mut dev, &mut core).unwrap();

        assert_eq!(stp.name(), "bmr481");
        assert_eq!(core.registered(), &[INFO]);
        assert!(core.coefficient_requests().is_empty());
        assert!(stp.info().func(0).contains(Functionality::POUT));
        assert_eq!(stp.info().format(SensorClass::VoltageOut), NumericFormat::Linear);

        stp.remove(&mut core);
        assert!(core.registered().is_empty());
    }

    #[test]
    fn test_probe_failures() {
        let mut core = DummyCore::new();

        let mut dev = DummyDevice::new(b"STPDDC60").with_functionality(I2cFunctionality::SMBUS_BYTE_DATA);
        assert_eq!(Stpddc60::probe(&mut dev, &mut core).unwrap_err(), Error::DeviceNotReady);

        let mut dev = DummyDevice::new(b"STPDDC60").with_failure(MFR_MODEL, Error::Timeout);
        assert_eq!(Stpddc60::probe(&mut dev, &mut core).unwrap_err(), Error::Timeout);

        let mut dev = DummyDevice::new(b"PIM4328");
        assert_eq!(
            Stpddc60::probe(&mut dev, &mut core).unwrap_err(),
            Error::UnsupportedDevice
        );

        let mut failing = DummyCore::failing_register(Error::BusError);
        let mut dev = DummyDevice::new(b"stpddc60");
        assert_eq!(Stpddc60::probe(&mut dev, &mut failing).unwrap_err(), Error::BusError);
        assert!(core.registered().is_empty());
    }

    #[test]
    fn test_vout_mode() {
        let mut dev = DummyDevice::new(b"STPDDC60");
        let stp = bind(&mut dev);

        assert_eq!(stp.read_byte_data(&mut dev, 0, VOUT_MODE), Ok(0x18));
        assert_eq!(read_byte(&stp, &mut dev, 0, VOUT_MODE), Ok(0x18));
        assert!(dev.accesses().is_empty());
    }

    #[test]
    fn test_read_vout() {
        let mut dev = DummyDevice::new(b"STPDDC60").with_word(READ_VOUT, 0x97);
        let stp = bind(&mut dev);

        // VID 0x97 is 1000 mV, 1.0 in LINEAR16 with exponent -8
        assert_eq!(stp.read_word_data(&mut dev, 0, 0, READ_VOUT), Ok(256));

        dev.set_word(READ_VOUT, 0);
        assert_eq!(stp.read_word_data(&mut dev, 0, 0, READ_VOUT), Ok(0));

        dev.fail(READ_VOUT, Error::Nack);
        assert_eq!(stp.read_word_data(&mut dev, 0, 0, READ_VOUT), Err(Error::Nack));
    }

    #[test]
    fn test_fault_limits_masked() {
        let mut dev = DummyDevice::new(b"STPDDC60")
            .with_word(VOUT_OV_FAULT_LIMIT, 0xF9C0)
            .with_word(VOUT_UV_FAULT_LIMIT, 0x0123);
        let stp = bind(&mut dev);

        assert_eq!(read_word(&stp, &mut dev, 0, 0, VOUT_OV_FAULT_LIMIT), Ok(0x01C0));
        assert_eq!(read_word(&stp, &mut dev, 0, 0, VOUT_UV_FAULT_LIMIT), Ok(0x0123));

        dev.fail(VOUT_UV_FAULT_LIMIT, Error::Timeout);
        assert_eq!(
            read_word(&stp, &mut dev, 0, 0, VOUT_UV_FAULT_LIMIT),
            Err(Error::Timeout)
        );
    }

    #[test]
    fn test_fault_limits_readonly() {
        let mut dev = DummyDevice::new(b"STPDDC60").with_word(VOUT_OV_FAULT_LIMIT, 0x0100);
        let stp = bind(&mut dev);

        assert_eq!(
            write_word(&stp, &mut dev, 0, VOUT_OV_FAULT_LIMIT, 0x0200),
            Err(Error::AccessDenied)
        );
        assert_eq!(
            write_word(&stp, &mut dev, 0, VOUT_UV_FAULT_LIMIT, 0x0050),
            Err(Error::AccessDenied)
        );
        assert_eq!(dev.write_count(), 0);
        assert!(dev.accesses().is_empty());
        assert_eq!(dev.word(VOUT_OV_FAULT_LIMIT), Some(0x0100));
    }

    #[test]
    fn test_other_registers_fall_back() {
        let mut dev = DummyDevice::new(b"STPDDC60").with_word(READ_VIN, 0xD0C0);
        let stp = bind(&mut dev);

        assert_eq!(stp.read_word_data(&mut dev, 0, 0, READ_VIN), Err(Error::NoData));
        assert_eq!(stp.read_word_data(&mut dev, 0, 0, STATUS_WORD), Err(Error::NoData));
        assert_eq!(read_word(&stp, &mut dev, 0, 0, READ_VIN), Ok(0xD0C0));
        assert_eq!(stp.write_word_data(&mut dev, 0, READ_VIN, 1), Err(Error::NoData));
    }

    #[test]
    fn test_page_out_of_range() {
        let mut dev = DummyDevice::new(b"STPDDC60");
        let stp = bind(&mut dev);

        for reg in [VOUT_MODE, READ_VOUT, VOUT_OV_FAULT_LIMIT, VOUT_UV_FAULT_LIMIT, READ_VIN] {
            assert_eq!(stp.read_byte_data(&mut dev, 1, reg), Err(Error::NoSuchDevice));
            assert_eq!(stp.read_word_data(&mut dev, 1, 0, reg), Err(Error::NoSuchDevice));
            assert_eq!(stp.write_word_data(&mut dev, 2, reg, 0), Err(Error::NoSuchDevice));
        }
        assert!(dev.accesses().is_empty());
    }
}
