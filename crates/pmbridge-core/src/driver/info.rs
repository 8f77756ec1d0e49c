//! Driver descriptor types
//!
//! A [`DriverInfo`] tells the framework which sensors a bound device has,
//! how many phases each page carries and how to interpret the raw values.

use bitflags::bitflags;

/// Number of pages the descriptor can describe
pub const MAX_PAGES: usize = 32;
/// Number of phases the descriptor can describe
pub const MAX_PHASES: usize = 10;

bitflags! {
    /// Sensor and status registers present on a page or phase
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Functionality: u32 {
        /// READ_VIN
        const VIN           = 1 << 0;
        /// READ_VCAP
        const VCAP          = 1 << 1;
        /// READ_VOUT
        const VOUT          = 1 << 2;
        /// READ_IIN
        const IIN           = 1 << 3;
        /// READ_IOUT
        const IOUT          = 1 << 4;
        /// READ_PIN
        const PIN           = 1 << 5;
        /// READ_POUT
        const POUT          = 1 << 6;
        /// READ_TEMPERATURE_1
        const TEMP          = 1 << 9;
        /// READ_TEMPERATURE_2
        const TEMP2         = 1 << 10;
        /// READ_TEMPERATURE_3
        const TEMP3         = 1 << 11;
        /// STATUS_VOUT
        const STATUS_VOUT   = 1 << 12;
        /// STATUS_IOUT
        const STATUS_IOUT   = 1 << 13;
        /// STATUS_INPUT
        const STATUS_INPUT  = 1 << 14;
        /// STATUS_TEMPERATURE
        const STATUS_TEMP   = 1 << 15;
        /// Phases are not selectable through the PHASE command
        const PHASE_VIRTUAL = 1 << 30;
        /// Page is not selectable through the PAGE command
        const PAGE_VIRTUAL  = 1 << 31;
    }
}

impl Default for Functionality {
    fn default() -> Self {
        Functionality::empty()
    }
}

/// Physical quantity a sensor reports
///
/// Used as the index into the format and coefficient tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "snake_case"))]
pub enum SensorClass {
    /// Input voltage
    VoltageIn,
    /// Output voltage (also the hold-up capacitor voltage)
    VoltageOut,
    /// Input current
    CurrentIn,
    /// Output current
    CurrentOut,
    /// Power
    Power,
    /// Temperature
    Temperature,
}

impl SensorClass {
    /// Number of sensor classes
    pub const COUNT: usize = 6;

    /// All classes in index order
    pub const ALL: [SensorClass; Self::COUNT] = [
        SensorClass::VoltageIn,
        SensorClass::VoltageOut,
        SensorClass::CurrentIn,
        SensorClass::CurrentOut,
        SensorClass::Power,
        SensorClass::Temperature,
    ];

    /// Table index of this class
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Short name used in logs and front ends
    pub const fn name(self) -> &'static str {
        match self {
            Self::VoltageIn => "voltage_in",
            Self::VoltageOut => "voltage_out",
            Self::CurrentIn => "current_in",
            Self::CurrentOut => "current_out",
            Self::Power => "power",
            Self::Temperature => "temperature",
        }
    }
}

/// Numeric data format of a sensor class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "snake_case"))]
pub enum NumericFormat {
    /// PMBus LINEAR11 (or LINEAR16 with VOUT_MODE for output voltage)
    #[default]
    Linear,
    /// PMBus DIRECT, interpreted with `m`, `b` and `R` coefficients
    Direct,
}

/// DIRECT format coefficients: `X = (Y * 10^-R - b) / m`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Coefficients {
    /// Slope
    pub m: i32,
    /// Offset
    pub b: i32,
    /// Exponent
    pub r: i32,
}

impl Coefficients {
    /// Create a coefficient set
    pub const fn new(m: i32, b: i32, r: i32) -> Self {
        Self { m, b, r }
    }

    /// Decode the 5-byte COEFFICIENTS block response (m, b little-endian
    /// 16-bit signed, R 8-bit signed)
    pub fn from_block(block: &[u8]) -> Option<Self> {
        match block {
            [m_lo, m_hi, b_lo, b_hi, r] => Some(Self {
                m: i16::from_le_bytes([*m_lo, *m_hi]) as i32,
                b: i16::from_le_bytes([*b_lo, *b_hi]) as i32,
                r: *r as i8 as i32,
            }),
            _ => None,
        }
    }
}

/// Descriptor of a bound PMBus device
///
/// Built once at probe time from the resolved chip variant and handed to
/// the framework. Drivers keep it by value and never change it after the
/// bind completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverInfo {
    /// Number of pages
    pub pages: u8,
    /// Number of phases per page
    pub phases: [u8; MAX_PAGES],
    /// Functionality per page
    pub func: [Functionality; MAX_PAGES],
    /// Functionality per phase
    pub pfunc: [Functionality; MAX_PHASES],
    /// Data format per sensor class
    pub format: [NumericFormat; SensorClass::COUNT],
    /// DIRECT coefficients per sensor class, once fetched
    pub coefficients: [Option<Coefficients>; SensorClass::COUNT],
}

impl DriverInfo {
    /// Create an empty descriptor with the given page count
    pub const fn new(pages: u8) -> Self {
        Self {
            pages,
            phases: [0; MAX_PAGES],
            func: [Functionality::empty(); MAX_PAGES],
            pfunc: [Functionality::empty(); MAX_PHASES],
            format: [NumericFormat::Linear; SensorClass::COUNT],
            coefficients: [None; SensorClass::COUNT],
        }
    }

    /// Set the functionality of a page
    pub const fn with_func(mut self, page: usize, func: Functionality) -> Self {
        self.func[page] = func;
        self
    }

    /// Set the phase count of a page
    pub const fn with_phases(mut self, page: usize, phases: u8) -> Self {
        self.phases[page] = phases;
        self
    }

    /// Set the functionality of a phase
    pub const fn with_pfunc(mut self, phase: usize, func: Functionality) -> Self {
        self.pfunc[phase] = func;
        self
    }

    /// Set the data format of a sensor class
    pub const fn with_format(mut self, class: SensorClass, format: NumericFormat) -> Self {
        self.format[class.index()] = format;
        self
    }

    /// Record the coefficients of a sensor class
    pub const fn with_coefficients(mut self, class: SensorClass, c: Coefficients) -> Self {
        self.coefficients[class.index()] = Some(c);
        self
    }

    /// Functionality of a page (empty for pages beyond the table)
    pub fn func(&self, page: u8) -> Functionality {
        self.func.get(page as usize).copied().unwrap_or_default()
    }

    /// Phase count of a page
    pub fn phases(&self, page: u8) -> u8 {
        self.phases.get(page as usize).copied().unwrap_or(0)
    }

    /// Functionality of a phase
    pub fn pfunc(&self, phase: u8) -> Functionality {
        self.pfunc.get(phase as usize).copied().unwrap_or_default()
    }

    /// Data format of a sensor class
    pub fn format(&self, class: SensorClass) -> NumericFormat {
        self.format[class.index()]
    }

    /// Coefficients of a sensor class, if fetched
    pub fn coefficients(&self, class: SensorClass) -> Option<Coefficients> {
        self.coefficients[class.index()]
    }

    /// True if any sensor class uses the DIRECT format
    pub fn uses_direct(&self) -> bool {
        self.format.iter().any(|f| *f == NumericFormat::Direct)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let info = DriverInfo::new(1)
            .with_phases(0, 2)
            .with_func(0, Functionality::VIN | Functionality::TEMP)
            .with_pfunc(1, Functionality::IIN)
            .with_format(SensorClass::VoltageIn, NumericFormat::Direct);

        assert_eq!(info.pages, 1);
        assert_eq!(info.phases(0), 2);
        assert!(info.func(0).contains(Functionality::TEMP));
        assert_eq!(info.pfunc(1), Functionality::IIN);
        assert_eq!(info.pfunc(0), Functionality::empty());
        assert_eq!(info.format(SensorClass::VoltageIn), NumericFormat::Direct);
        assert_eq!(info.format(SensorClass::CurrentIn), NumericFormat::Linear);
        assert!(info.uses_direct());
    }

    #[test]
    fn test_out_of_range_lookups() {
        let info = DriverInfo::new(1);
        assert_eq!(info.func(200), Functionality::empty());
        assert_eq!(info.phases(200), 0);
        assert_eq!(info.pfunc(0xFF), Functionality::empty());
    }

    #[test]
    fn test_coefficients_from_block() {
        // m = 9400, b = 0, R = -2
        let c = Coefficients::from_block(&[0xB8, 0x24, 0x00, 0x00, 0xFE]).unwrap();
        assert_eq!(c, Coefficients::new(9400, 0, -2));

        assert_eq!(Coefficients::from_block(&[0x00, 0x01]), None);
    }
}
