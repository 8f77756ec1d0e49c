//! Device registry and binding
//!
//! Maps configured device names onto driver families and runs the family's
//! probe. Only families enabled at compile time are known.

use std::fmt;

use pmbridge_core::driver::{DriverInfo, PmbusClient, PmbusDriver, PmbusFramework};
use pmbridge_core::error::{Error, Result};

#[cfg(feature = "pim4328")]
use pmbridge_pim4328::Pim4328;
#[cfg(feature = "stpddc60")]
use pmbridge_stpddc60::Stpddc60;

/// Driver family a device name belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    /// PIM4328 power interface modules and derivatives
    #[cfg(feature = "pim4328")]
    Pim4328,
    /// STPDDC60 digital controller and derivatives
    #[cfg(feature = "stpddc60")]
    Stpddc60,
}

impl Family {
    /// Family name (the driver name)
    pub fn name(self) -> &'static str {
        match self {
            #[cfg(feature = "pim4328")]
            Family::Pim4328 => "pim4328",
            #[cfg(feature = "stpddc60")]
            Family::Stpddc60 => "stpddc60",
        }
    }

    /// Short description for listings
    pub fn description(self) -> &'static str {
        match self {
            #[cfg(feature = "pim4328")]
            Family::Pim4328 => "Flex PIM4328/PIM4820/PIM4006 power interface modules",
            #[cfg(feature = "stpddc60")]
            Family::Stpddc60 => "ST STPDDC60 digital controller",
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A device name a driver accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupportedDevice {
    /// Device name (used for matching)
    pub name: &'static str,
    /// Family handling the device
    pub family: Family,
}

/// All device names of the driver families enabled at compile time
#[allow(unused_mut)]
pub fn supported_devices() -> Vec<SupportedDevice> {
    let mut devices = Vec::new();

    #[cfg(feature = "pim4328")]
    devices.extend(pmbridge_pim4328::DEVICE_IDS.iter().map(|id| SupportedDevice {
        name: id.name,
        family: Family::Pim4328,
    }));

    #[cfg(feature = "stpddc60")]
    devices.extend(pmbridge_stpddc60::DEVICE_IDS.iter().map(|id| SupportedDevice {
        name: id.name,
        family: Family::Stpddc60,
    }));

    devices
}

/// Family handling a configured device name
pub fn family_of(name: &str) -> Option<Family> {
    supported_devices()
        .into_iter()
        .find(|d| d.name.eq_ignore_ascii_case(name))
        .map(|d| d.family)
}

/// A device bound to its family driver
#[derive(Debug, Clone)]
pub enum BoundDevice {
    /// PIM4328 family device
    #[cfg(feature = "pim4328")]
    Pim4328(Pim4328),
    /// STPDDC60 family device
    #[cfg(feature = "stpddc60")]
    Stpddc60(Stpddc60),
}

/// Probe the device behind `client` with the driver for `name` and register
/// it with `framework`
pub fn bind<C, F>(name: &str, client: &mut C, framework: &mut F) -> Result<BoundDevice>
where
    C: PmbusClient + ?Sized,
    F: PmbusFramework + ?Sized,
{
    let Some(family) = family_of(name) else {
        log::error!("Unknown device: {}", name);
        return Err(Error::UnsupportedDevice);
    };
    log::debug!("Binding {} with the {} driver", name, family);

    match family {
        #[cfg(feature = "pim4328")]
        Family::Pim4328 => Pim4328::probe(client, framework, name).map(BoundDevice::Pim4328),
        #[cfg(feature = "stpddc60")]
        Family::Stpddc60 => Stpddc60::probe(client, framework).map(BoundDevice::Stpddc60),
    }
}

impl BoundDevice {
    /// Family of the bound driver
    pub fn family(&self) -> Family {
        match self {
            #[cfg(feature = "pim4328")]
            BoundDevice::Pim4328(_) => Family::Pim4328,
            #[cfg(feature = "stpddc60")]
            BoundDevice::Stpddc60(_) => Family::Stpddc60,
        }
    }

    /// Device-table name the device was detected as
    pub fn name(&self) -> &'static str {
        match self {
            #[cfg(feature = "pim4328")]
            BoundDevice::Pim4328(d) => d.name(),
            #[cfg(feature = "stpddc60")]
            BoundDevice::Stpddc60(d) => d.name(),
        }
    }

    /// Chip variant the device is driven as
    pub fn variant(&self) -> &'static str {
        match self {
            #[cfg(feature = "pim4328")]
            BoundDevice::Pim4328(d) => d.variant().name(),
            #[cfg(feature = "stpddc60")]
            BoundDevice::Stpddc60(_) => "STPDDC60",
        }
    }

    /// MFR_MODEL string read at probe time
    pub fn model(&self) -> &[u8] {
        match self {
            #[cfg(feature = "pim4328")]
            BoundDevice::Pim4328(d) => d.model(),
            #[cfg(feature = "stpddc60")]
            BoundDevice::Stpddc60(d) => d.model(),
        }
    }

    /// Unregister the device from the framework
    pub fn unbind<F: PmbusFramework + ?Sized>(self, framework: &mut F) {
        match self {
            #[cfg(feature = "pim4328")]
            BoundDevice::Pim4328(d) => d.remove(framework),
            #[cfg(feature = "stpddc60")]
            BoundDevice::Stpddc60(d) => d.remove(framework),
        }
    }
}

impl PmbusDriver for BoundDevice {
    fn info(&self) -> &DriverInfo {
        match self {
            #[cfg(feature = "pim4328")]
            BoundDevice::Pim4328(d) => d.info(),
            #[cfg(feature = "stpddc60")]
            BoundDevice::Stpddc60(d) => d.info(),
        }
    }

    fn read_byte_data<C: PmbusClient + ?Sized>(
        &self,
        client: &mut C,
        page: u8,
        reg: u8,
    ) -> Result<u8> {
        match self {
            #[cfg(feature = "pim4328")]
            BoundDevice::Pim4328(d) => d.read_byte_data(client, page, reg),
            #[cfg(feature = "stpddc60")]
            BoundDevice::Stpddc60(d) => d.read_byte_data(client, page, reg),
        }
    }

    fn read_word_data<C: PmbusClient + ?Sized>(
        &self,
        client: &mut C,
        page: u8,
        phase: u8,
        reg: u8,
    ) -> Result<u16> {
        match self {
            #[cfg(feature = "pim4328")]
            BoundDevice::Pim4328(d) => d.read_word_data(client, page, phase, reg),
            #[cfg(feature = "stpddc60")]
            BoundDevice::Stpddc60(d) => d.read_word_data(client, page, phase, reg),
        }
    }

    fn write_word_data<C: PmbusClient + ?Sized>(
        &self,
        client: &mut C,
        page: u8,
        reg: u8,
        word: u16,
    ) -> Result<()> {
        match self {
            #[cfg(feature = "pim4328")]
            BoundDevice::Pim4328(d) => d.write_word_data(client, page, reg, word),
            #[cfg(feature = "stpddc60")]
            BoundDevice::Stpddc60(d) => d.write_word_data(client, page, reg, word),
        }
    }
}

#[cfg(all(test, feature = "pim4328", feature = "stpddc60"))]
mod tests {
    use super::*;
    use pmbridge_core::commands::{STATUS_WORD, VOUT_MODE, VOUT_OV_FAULT_LIMIT};
    use pmbridge_core::driver::{read_byte, read_word, write_word};
    use pmbridge_dummy::{DummyCore, DummyDevice};

    #[test]
    fn test_supported_devices() {
        let devices = supported_devices();
        assert_eq!(devices.len(), 10);
        assert_eq!(devices[0].name, "pim4328");
        assert_eq!(devices[7].name, "bmr455");
        assert_eq!(devices[9].family, Family::Stpddc60);
    }

    #[test]
    fn test_family_of() {
        assert_eq!(family_of("pim4306"), Some(Family::Pim4328));
        assert_eq!(family_of("BMR481"), Some(Family::Stpddc60));
        assert_eq!(family_of("tps546"), None);
    }

    #[test]
    fn test_bind_unknown_name() {
        let mut dev = DummyDevice::new(b"PIM4328");
        let mut core = DummyCore::new();
        assert_eq!(
            bind("tps546", &mut dev, &mut core).unwrap_err(),
            Error::UnsupportedDevice
        );
        assert!(dev.accesses().is_empty());
    }

    #[test]
    fn test_bind_stpddc60() {
        let mut dev = DummyDevice::new(b"STPDDC60").with_word(VOUT_OV_FAULT_LIMIT, 0xF800);
        let mut core = DummyCore::new();
        let device = bind("stpddc60", &mut dev, &mut core).unwrap();

        assert_eq!(device.family(), Family::Stpddc60);
        assert_eq!(device.variant(), "STPDDC60");
        assert_eq!(read_byte(&device, &mut dev, 0, VOUT_MODE), Ok(0x18));
        assert_eq!(read_word(&device, &mut dev, 0, 0, VOUT_OV_FAULT_LIMIT), Ok(0));
        assert_eq!(
            write_word(&device, &mut dev, 0, VOUT_OV_FAULT_LIMIT, 1),
            Err(Error::AccessDenied)
        );

        device.unbind(&mut core);
        assert!(core.registered().is_empty());
    }

    #[test]
    fn test_bind_pim_family() {
        let mut dev = DummyDevice::new(b"PIM4106-R1")
            .with_byte(pmbridge_core::commands::STATUS_BYTE, 0)
            .with_word(pmbridge_pim4328::MFR_FET_CHECKSTATUS, 0x0030);
        let mut core = DummyCore::new();
        let device = bind("pim4106", &mut dev, &mut core).unwrap();

        assert_eq!(device.family(), Family::Pim4328);
        assert_eq!(device.name(), "pim4106");
        assert_eq!(device.variant(), "PIM4006");
        assert_eq!(device.model(), b"PIM4106-R1");
        assert_eq!(read_word(&device, &mut dev, 0, 0xFF, STATUS_WORD), Ok(0x0008));
        assert_eq!(core.registered().len(), 1);
    }
}
