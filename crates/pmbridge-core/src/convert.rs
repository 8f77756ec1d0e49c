//! Numeric format conversion
//!
//! Helpers for chips whose voltage telemetry is reported as a voltage
//! identifier (VID) code instead of a self-describing PMBus format.

/// VID code to millivolts on a 5 mV grid starting at 250 mV
///
/// Code 0 means the output is off and converts to 0 mV.
pub const fn vid_to_millivolts(code: u16) -> u32 {
    if code == 0 {
        0
    } else {
        250 + (code as u32 - 1) * 5
    }
}

/// Millivolts to a linear value with 8 fractional bits (exponent -8)
///
/// Truncates toward zero.
pub const fn millivolts_to_linear(mv: u32) -> u32 {
    (((mv as u64) << 8) / 1000) as u32
}

/// VID code straight to a linear PMBus word
///
/// Saturates at `u16::MAX` for codes whose voltage does not fit the word.
pub const fn vid_to_linear(code: u16) -> u16 {
    let linear = millivolts_to_linear(vid_to_millivolts(code));
    if linear > u16::MAX as u32 {
        u16::MAX
    } else {
        linear as u16
    }
}
