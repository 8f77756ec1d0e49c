//! Standard PMBus status bitsets
//!
//! The chip drivers assemble these from proprietary status registers. Bit
//! positions follow PMBus 1.3 Part II, section 17.

use bitflags::bitflags;

bitflags! {
    /// STATUS_WORD bits
    ///
    /// The low byte is STATUS_BYTE.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct StatusWord: u16 {
        /// A fault or warning not listed in bits [7:1]
        const NONE_OF_THE_ABOVE = 1 << 0;
        /// Communication, memory or logic fault
        const CML               = 1 << 1;
        /// Temperature fault or warning
        const TEMPERATURE       = 1 << 2;
        /// Input undervoltage fault
        const VIN_UV            = 1 << 3;
        /// Output overcurrent fault
        const IOUT_OC           = 1 << 4;
        /// Output overvoltage fault
        const VOUT_OV           = 1 << 5;
        /// Unit is not providing power to the output
        const OFF               = 1 << 6;
        /// Device was busy and unable to respond
        const BUSY              = 1 << 7;
        /// Unknown fault or warning
        const UNKNOWN           = 1 << 8;
        /// Bit set in STATUS_OTHER
        const OTHER             = 1 << 9;
        /// Fan fault or warning
        const FANS              = 1 << 10;
        /// POWER_GOOD signal is negated
        const POWER_GOOD_N      = 1 << 11;
        /// Bit set in STATUS_MFR_SPECIFIC
        const MFR               = 1 << 12;
        /// Input voltage, current or power fault or warning
        const INPUT             = 1 << 13;
        /// Output current or power fault or warning
        const IOUT_POUT         = 1 << 14;
        /// Output voltage fault or warning
        const VOUT              = 1 << 15;
    }
}

bitflags! {
    /// STATUS_INPUT bits
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct StatusInput: u8 {
        /// Input overpower warning
        const PIN_OP_WARN      = 1 << 0;
        /// Input overcurrent warning
        const IIN_OC_WARN      = 1 << 1;
        /// Input overcurrent fault
        const IIN_OC_FAULT     = 1 << 2;
        /// Unit off for insufficient input voltage
        const UNIT_OFF_VIN_LOW = 1 << 3;
        /// Input undervoltage fault
        const VIN_UV_FAULT     = 1 << 4;
        /// Input undervoltage warning
        const VIN_UV_WARN      = 1 << 5;
        /// Input overvoltage warning
        const VIN_OV_WARN      = 1 << 6;
        /// Input overvoltage fault
        const VIN_OV_FAULT     = 1 << 7;
    }
}

impl Default for StatusWord {
    fn default() -> Self {
        StatusWord::empty()
    }
}

impl Default for StatusInput {
    fn default() -> Self {
        StatusInput::empty()
    }
}

impl StatusWord {
    /// STATUS_BYTE view of this word
    pub const fn status_byte(self) -> u8 {
        (self.bits() & 0xFF) as u8
    }

    /// Build a word from a raw STATUS_BYTE value
    pub const fn from_status_byte(byte: u8) -> Self {
        Self::from_bits_retain(byte as u16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_word_bit_positions() {
        assert_eq!(StatusWord::VIN_UV.bits(), 0x0008);
        assert_eq!(StatusWord::BUSY.bits(), 0x0080);
        assert_eq!(StatusWord::INPUT.bits(), 0x2000);
        assert_eq!(
            (StatusWord::INPUT | StatusWord::NONE_OF_THE_ABOVE).bits(),
            0x2001
        );
    }

    #[test]
    fn test_status_byte_view() {
        let word = StatusWord::INPUT | StatusWord::NONE_OF_THE_ABOVE | StatusWord::VIN_UV;
        assert_eq!(word.status_byte(), 0x09);
        assert_eq!(StatusWord::from_status_byte(0x42).bits(), 0x0042);
    }

    #[test]
    fn test_status_input_bit_positions() {
        assert_eq!(StatusInput::VIN_OV_FAULT.bits(), 0x80);
        assert_eq!(StatusInput::VIN_UV_FAULT.bits(), 0x10);
        assert_eq!(StatusInput::IIN_OC_FAULT.bits(), 0x04);
    }
}
