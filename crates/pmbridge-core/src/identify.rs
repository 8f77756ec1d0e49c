//! Chip identification from the manufacturer model string
//!
//! Each driver carries a static device-id table mapping model names to a
//! chip variant. The configured name selects the driver; the MFR_MODEL
//! string read from the device decides which variant is actually bound.

use core::fmt;

use crate::commands::{BLOCK_MAX, MFR_MODEL};
use crate::driver::PmbusClient;
use crate::error::{Error, Result};

/// One entry of a driver's device-id table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceId<V> {
    /// Model name (also the configuration key)
    pub name: &'static str,
    /// Chip variant the name maps to
    pub variant: V,
}

impl<V> DeviceId<V> {
    /// Create a table entry
    pub const fn new(name: &'static str, variant: V) -> Self {
        Self { name, variant }
    }
}

/// MFR_MODEL contents as read from the device
pub type Model = heapless::Vec<u8, BLOCK_MAX>;

/// Read the MFR_MODEL block from the device
pub fn read_model<C: PmbusClient + ?Sized>(client: &mut C) -> Result<Model> {
    let mut buf = [0u8; BLOCK_MAX];
    let len = client.read_block_data(MFR_MODEL, &mut buf)?;
    let block = buf.get(..len).ok_or(Error::BufferTooSmall)?;
    Model::from_slice(block).map_err(|_| Error::BufferTooSmall)
}

/// Printable form of a model string
pub struct ModelDisplay<'a>(pub &'a [u8]);

impl fmt::Display for ModelDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in self.0 {
            if b.is_ascii_graphic() || b == b' ' {
                write!(f, "{}", b as char)?;
            } else {
                write!(f, "\\x{:02x}", b)?;
            }
        }
        Ok(())
    }
}

/// Find the first table entry whose name is a case-insensitive prefix of
/// `model`
pub fn match_model<'t, V>(table: &'t [DeviceId<V>], model: &[u8]) -> Result<&'t DeviceId<V>> {
    table
        .iter()
        .find(|id| {
            let name = id.name.as_bytes();
            model.len() >= name.len() && model[..name.len()].eq_ignore_ascii_case(name)
        })
        .ok_or(Error::UnsupportedDevice)
}

/// Look up a configured device name in the table
pub fn find_by_name<'t, V>(table: &'t [DeviceId<V>], name: &str) -> Option<&'t DeviceId<V>> {
    table.iter().find(|id| id.name.eq_ignore_ascii_case(name))
}

/// Resolve the variant of a device
///
/// The detected entry is returned even when its variant differs from the
/// configured one; the mismatch is only reported.
pub fn resolve<'t, V>(
    table: &'t [DeviceId<V>],
    configured: &DeviceId<V>,
    model: &[u8],
) -> Result<&'t DeviceId<V>>
where
    V: PartialEq,
{
    let detected = match_model(table, model)?;
    if detected.variant != configured.variant {
        log::info!(
            "Device mismatch: Configured {}, detected {}",
            configured.name,
            detected.name
        );
    }
    Ok(detected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Variant {
        A,
        B,
    }

    const TABLE: &[DeviceId<Variant>] = &[
        DeviceId::new("pim4328", Variant::A),
        DeviceId::new("pim4006", Variant::B),
        DeviceId::new("pim4206", Variant::B),
    ];

    #[test]
    fn test_prefix_match() {
        let id = match_model(TABLE, b"pim4206XYZ").unwrap();
        assert_eq!(id.name, "pim4206");
        assert_eq!(id.variant, Variant::B);
    }

    #[test]
    fn test_case_insensitive() {
        let upper = match_model(TABLE, b"PIM4328").unwrap();
        let lower = match_model(TABLE, b"pim4328").unwrap();
        assert_eq!(upper, lower);
        assert_eq!(upper.variant, Variant::A);
    }

    #[test]
    fn test_unsupported() {
        assert_eq!(match_model(TABLE, b"unknown-chip"), Err(Error::UnsupportedDevice));
        assert_eq!(match_model(TABLE, b"pim43"), Err(Error::UnsupportedDevice));
        assert_eq!(match_model(TABLE, b""), Err(Error::UnsupportedDevice));
    }

    #[test]
    fn test_resolve_mismatch_uses_detected() {
        let configured = find_by_name(TABLE, "pim4328").unwrap();
        let detected = resolve(TABLE, configured, b"PIM4006-01").unwrap();
        assert_eq!(detected.variant, Variant::B);
    }

    #[test]
    fn test_find_by_name() {
        assert_eq!(find_by_name(TABLE, "PIM4006").unwrap().variant, Variant::B);
        assert!(find_by_name(TABLE, "pim4006x").is_none());
    }

    #[test]
    fn test_model_display() {
        extern crate std;
        use std::string::ToString;
        assert_eq!(ModelDisplay(b"PIM4328\0").to_string(), "PIM4328\\x00");
    }
}
