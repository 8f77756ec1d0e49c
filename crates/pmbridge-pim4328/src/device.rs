//! Bound PIM4328 family device: probe and register translation

use pmbridge_core::commands::{
    PHASE_ALL, READ_IIN, READ_VIN, STATUS_BYTE, STATUS_INPUT, STATUS_WORD,
};
use pmbridge_core::driver::{
    DriverInfo, I2cFunctionality, NumericFormat, PmbusClient, PmbusDriver, PmbusFramework,
    SensorClass,
};
use pmbridge_core::error::{Error, Result};
use pmbridge_core::identify::{self, Model, ModelDisplay};
use pmbridge_core::policy::{enrich, require};
use pmbridge_core::status::{StatusInput, StatusWord};

use crate::variant::{info_for, Variant, COEFFICIENT_SOURCES, DEVICE_IDS};

/// Input A voltage
pub const MFR_READ_VINA: u8 = 0xD3;
/// Input B voltage
pub const MFR_READ_VINB: u8 = 0xD4;
/// PIM4328 status bits
pub const MFR_STATUS_BITS: u8 = 0xD5;
/// Input A current (PIM4006)
pub const MFR_READ_IINA: u8 = 0xD6;
/// Input B current (PIM4006)
pub const MFR_READ_IINB: u8 = 0xD7;
/// FET check status (PIM4006)
pub const MFR_FET_CHECKSTATUS: u8 = 0xD9;
/// Input status (PIM4820)
pub const MFR_READ_STATUS: u8 = 0xD0;

/// A PIM4328 family device bound to the framework
#[derive(Debug, Clone)]
pub struct Pim4328 {
    name: &'static str,
    variant: Variant,
    model: Model,
    info: DriverInfo,
}

impl Pim4328 {
    /// Identify the device behind `client` and register it with `framework`
    ///
    /// `configured` is the device name the device was declared with. The
    /// variant reported by the device itself takes precedence over it.
    pub fn probe<C, F>(client: &mut C, framework: &mut F, configured: &str) -> Result<Self>
    where
        C: PmbusClient + ?Sized,
        F: PmbusFramework + ?Sized,
    {
        let configured = identify::find_by_name(DEVICE_IDS, configured).ok_or_else(|| {
            log::error!("Unknown device name '{}'", configured);
            Error::UnsupportedDevice
        })?;

        if !client.check_functionality(
            I2cFunctionality::SMBUS_READ_BYTE_DATA | I2cFunctionality::SMBUS_BLOCK_DATA,
        ) {
            log::error!("Adapter lacks byte or block data support");
            return Err(Error::DeviceNotReady);
        }

        let model = identify::read_model(client).map_err(|e| {
            log::error!("Failed to read Manufacturer Model: {}", e);
            Error::DeviceNotReady
        })?;

        let detected = identify::resolve(DEVICE_IDS, configured, &model).map_err(|_| {
            log::error!("Unsupported device: {}", ModelDisplay(&model));
            Error::DeviceNotReady
        })?;

        let mut info = info_for(detected.variant);

        if info.format(SensorClass::VoltageIn) == NumericFormat::Direct {
            if !client.check_functionality(I2cFunctionality::SMBUS_BLOCK_PROC_CALL) {
                log::error!("Adapter lacks block process call support");
                return Err(Error::DeviceNotReady);
            }

            let func = info.func(0);
            for source in COEFFICIENT_SOURCES.iter().filter(|s| func.contains(s.func)) {
                let c = framework
                    .read_coefficients(client, source.class, source.reg)
                    .map_err(|e| {
                        log::error!("Failed to read coefficients for {}: {}", source.label, e);
                        Error::DeviceNotReady
                    })?;
                info = info.with_coefficients(source.class, c);
            }
        }

        framework.register(&info)?;

        log::info!("Bound {} ({})", detected.name, ModelDisplay(&model));
        Ok(Self {
            name: detected.name,
            variant: detected.variant,
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

    /// Detected variant
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// MFR_MODEL string read at probe time
    pub fn model(&self) -> &[u8] {
        &self.model
    }

    /// Compose STATUS_WORD from STATUS_BYTE and the variant's own status
    /// register
    fn status_word<C: PmbusClient + ?Sized>(
        &self,
        client: &mut C,
        page: u8,
    ) -> Result<StatusWord> {
        let base = require(client.read_byte_data(page, STATUS_BYTE))?;
        let extra = match self.variant {
            Variant::Pim4006 => enrich(client.read_word_data(page, PHASE_ALL, MFR_FET_CHECKSTATUS))
                .map(fet_check_status),
            Variant::Pim4328 => enrich(client.read_byte_data(page, MFR_STATUS_BITS))
                .map(status_bits),
            Variant::Pim4820 => enrich(client.read_byte_data(page, MFR_READ_STATUS))
                .map(read_status),
        };
        Ok(StatusWord::from_status_byte(base) | extra.unwrap_or_default())
    }

    /// Synthesize STATUS_INPUT (PIM4820 only)
    fn status_input<C: PmbusClient + ?Sized>(&self, client: &mut C, page: u8) -> Result<u8> {
        match self.variant {
            Variant::Pim4820 => {
                let status = enrich(client.read_byte_data(page, MFR_READ_STATUS))
                    .map(input_status)
                    .unwrap_or_default();
                Ok(status.bits())
            }
            Variant::Pim4328 | Variant::Pim4006 => Err(Error::NoSuchRegister),
        }
    }
}

/// PIM4006: FET check failures show up as input undervoltage
fn fet_check_status(fet: u16) -> StatusWord {
    if fet & 0x0030 != 0 {
        StatusWord::VIN_UV
    } else {
        StatusWord::empty()
    }
}

/// PIM4328 status bits
fn status_bits(bits: u8) -> StatusWord {
    let mut status = StatusWord::empty();
    status.set(StatusWord::VIN_UV, bits & 0x04 != 0);
    status.set(StatusWord::BUSY, bits & 0x40 != 0);
    status
}

/// PIM4820 input status, folded into STATUS_WORD
fn read_status(bits: u8) -> StatusWord {
    let mut status = StatusWord::empty();
    status.set(StatusWord::INPUT | StatusWord::NONE_OF_THE_ABOVE, bits & 0x05 != 0);
    status.set(StatusWord::VIN_UV, bits & 0x02 != 0);
    status.set(StatusWord::TEMPERATURE, bits & 0x40 != 0);
    status
}

/// PIM4820 input status, as STATUS_INPUT
fn input_status(bits: u8) -> StatusInput {
    let mut status = StatusInput::empty();
    status.set(StatusInput::VIN_OV_FAULT, bits & 0x01 != 0);
    status.set(StatusInput::VIN_UV_FAULT, bits & 0x02 != 0);
    status.set(StatusInput::IIN_OC_FAULT, bits & 0x04 != 0);
    status
}

impl PmbusDriver for Pim4328 {
    fn info(&self) -> &DriverInfo {
        &self.info
    }

    fn read_byte_data<C: PmbusClient + ?Sized>(
        &self,
        client: &mut C,
        page: u8,
        reg: u8,
    ) -> Result<u8> {
        if page > 0 {
            return Err(Error::NoSuchDevice);
        }

        match reg {
            STATUS_BYTE => self.status_word(client, page).map(StatusWord::status_byte),
            STATUS_INPUT => self.status_input(client, page),
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

        match (reg, phase) {
            (STATUS_WORD, _) => self.status_word(client, page).map(|s| s.bits()),
            (READ_VIN | READ_IIN, PHASE_ALL) => Err(Error::NoData),
            (READ_VIN, 0) => require(client.read_word_data(page, phase, MFR_READ_VINA)),
            (READ_VIN, _) => require(client.read_word_data(page, phase, MFR_READ_VINB)),
            (READ_IIN, 0) => require(client.read_word_data(page, phase, MFR_READ_IINA)),
            (READ_IIN, _) => require(client.read_word_data(page, phase, MFR_READ_IINB)),
            _ => Err(Error::NoData),
        }
    }
}
