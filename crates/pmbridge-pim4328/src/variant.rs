//! Chip variants and their register maps

use pmbridge_core::commands::{READ_IIN, READ_IOUT, READ_TEMPERATURE_1, READ_VCAP, READ_VIN};
use pmbridge_core::driver::{DriverInfo, Functionality, NumericFormat, SensorClass};
use pmbridge_core::identify::DeviceId;

/// PIM4328 family members with distinct register behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    /// PIM4328 and BMR455: two input feeds, DIRECT input voltage
    Pim4328,
    /// PIM4820: single feed with input status register
    Pim4820,
    /// PIM4006 and its 4106/4206/4306/4406 siblings: FET check status
    Pim4006,
}

impl Variant {
    /// Short name for display
    pub const fn name(self) -> &'static str {
        match self {
            Self::Pim4328 => "PIM4328",
            Self::Pim4820 => "PIM4820",
            Self::Pim4006 => "PIM4006",
        }
    }
}

impl core::fmt::Display for Variant {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// Supported model names
///
/// Order matters: the first name that prefixes the MFR_MODEL string wins.
pub const DEVICE_IDS: &[DeviceId<Variant>] = &[
    DeviceId::new("pim4328", Variant::Pim4328),
    DeviceId::new("pim4820", Variant::Pim4820),
    DeviceId::new("pim4006", Variant::Pim4006),
    DeviceId::new("pim4106", Variant::Pim4006),
    DeviceId::new("pim4206", Variant::Pim4006),
    DeviceId::new("pim4306", Variant::Pim4006),
    DeviceId::new("pim4406", Variant::Pim4006),
    DeviceId::new("bmr455", Variant::Pim4328),
];

/// Build the descriptor of a variant
///
/// Coefficients are left empty; they are fetched from the device at probe
/// time when the variant uses the DIRECT format.
pub const fn info_for(variant: Variant) -> DriverInfo {
    let info = DriverInfo::new(1);
    match variant {
        Variant::Pim4328 => info
            .with_phases(0, 2)
            .with_format(SensorClass::VoltageIn, NumericFormat::Direct)
            .with_func(
                0,
                Functionality::VCAP
                    .union(Functionality::VIN)
                    .union(Functionality::TEMP)
                    .union(Functionality::IOUT),
            )
            .with_pfunc(0, Functionality::VIN)
            .with_pfunc(1, Functionality::VIN),
        Variant::Pim4006 => info
            .with_phases(0, 2)
            .with_format(SensorClass::VoltageIn, NumericFormat::Linear)
            .with_func(
                0,
                Functionality::PHASE_VIRTUAL
                    .union(Functionality::VIN)
                    .union(Functionality::TEMP)
                    .union(Functionality::IOUT),
            )
            .with_pfunc(0, Functionality::VIN.union(Functionality::IIN))
            .with_pfunc(1, Functionality::VIN.union(Functionality::IIN)),
        Variant::Pim4820 => info
            .with_format(SensorClass::VoltageIn, NumericFormat::Direct)
            .with_func(
                0,
                Functionality::VIN
                    .union(Functionality::TEMP)
                    .union(Functionality::IIN)
                    .union(Functionality::STATUS_INPUT),
            ),
    }
}

/// A DIRECT coefficient set fetched at probe time
pub(crate) struct CoefficientSource {
    pub func: Functionality,
    pub class: SensorClass,
    pub reg: u8,
    pub label: &'static str,
}

/// Coefficient sets in the order they are fetched
pub(crate) const COEFFICIENT_SOURCES: [CoefficientSource; 5] = [
    CoefficientSource {
        func: Functionality::VCAP,
        class: SensorClass::VoltageOut,
        reg: READ_VCAP,
        label: "PMBUS_READ_VCAP",
    },
    CoefficientSource {
        func: Functionality::VIN,
        class: SensorClass::VoltageIn,
        reg: READ_VIN,
        label: "PMBUS_READ_VIN",
    },
    CoefficientSource {
        func: Functionality::IIN,
        class: SensorClass::CurrentIn,
        reg: READ_IIN,
        label: "PMBUS_READ_IIN",
    },
    CoefficientSource {
        func: Functionality::IOUT,
        class: SensorClass::CurrentOut,
        reg: READ_IOUT,
        label: "PMBUS_READ_IOUT",
    },
    CoefficientSource {
        func: Functionality::TEMP,
        class: SensorClass::Temperature,
        reg: READ_TEMPERATURE_1,
        label: "PMBUS_READ_TEMPERATURE_1",
    },
];
