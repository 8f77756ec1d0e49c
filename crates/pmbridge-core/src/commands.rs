//! Standard PMBus command codes
//!
//! This module defines the PMBus command codes (register addresses) that
//! the drivers answer for, as defined in PMBus 1.3
//! Part II. Only the commands used by the translation hooks and by the
//! probe sequence are listed here.

// ============================================================================
// Paging and mode
// ============================================================================

/// Select the active page
pub const PAGE: u8 = 0x00;
/// Select the active phase
pub const PHASE: u8 = 0x04;
/// Output voltage data format
pub const VOUT_MODE: u8 = 0x20;
/// Read direct-format coefficients (block process call)
pub const COEFFICIENTS: u8 = 0x30;

// ============================================================================
// Fault limits
// ============================================================================

/// Output overvoltage fault limit
pub const VOUT_OV_FAULT_LIMIT: u8 = 0x40;
/// Output overvoltage warning limit
pub const VOUT_OV_WARN_LIMIT: u8 = 0x42;
/// Output undervoltage warning limit
pub const VOUT_UV_WARN_LIMIT: u8 = 0x43;
/// Output undervoltage fault limit
pub const VOUT_UV_FAULT_LIMIT: u8 = 0x44;

// ============================================================================
// Status
// ============================================================================

/// Status byte (low byte of STATUS_WORD)
pub const STATUS_BYTE: u8 = 0x78;
/// Status word
pub const STATUS_WORD: u8 = 0x79;
/// Output voltage status
pub const STATUS_VOUT: u8 = 0x7A;
/// Output current status
pub const STATUS_IOUT: u8 = 0x7B;
/// Input status
pub const STATUS_INPUT: u8 = 0x7C;
/// Temperature status
pub const STATUS_TEMPERATURE: u8 = 0x7D;
/// Communication, logic and memory status
pub const STATUS_CML: u8 = 0x7E;

// ============================================================================
// Telemetry
// ============================================================================

/// Input voltage
pub const READ_VIN: u8 = 0x88;
/// Input current
pub const READ_IIN: u8 = 0x89;
/// Hold-up capacitor voltage
pub const READ_VCAP: u8 = 0x8A;
/// Output voltage
pub const READ_VOUT: u8 = 0x8B;
/// Output current
pub const READ_IOUT: u8 = 0x8C;
/// Temperature sensor 1
pub const READ_TEMPERATURE_1: u8 = 0x8D;
/// Output power
pub const READ_POUT: u8 = 0x96;

// ============================================================================
// Identification
// ============================================================================

/// Manufacturer ID (block)
pub const MFR_ID: u8 = 0x99;
/// Manufacturer model (block)
pub const MFR_MODEL: u8 = 0x9A;

// ============================================================================
// Addressing wildcards
// ============================================================================

/// Phase value meaning "all phases"
pub const PHASE_ALL: u8 = 0xFF;

/// Maximum SMBus block transfer length
pub const BLOCK_MAX: usize = 32;

/// Look up a command code by its lower-case PMBus name
///
/// Used by front ends that accept register names instead of raw codes.
pub fn by_name(name: &str) -> Option<u8> {
    NAMES
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|&(_, code)| code)
}

/// Name of a command code, if it is one of the listed commands
pub fn name_of(code: u8) -> Option<&'static str> {
    NAMES.iter().find(|(_, c)| *c == code).map(|&(n, _)| n)
}

const NAMES: &[(&str, u8)] = &[
    ("page", PAGE),
    ("phase", PHASE),
    ("vout_mode", VOUT_MODE),
    ("coefficients", COEFFICIENTS),
    ("vout_ov_fault_limit", VOUT_OV_FAULT_LIMIT),
    ("vout_ov_warn_limit", VOUT_OV_WARN_LIMIT),
    ("vout_uv_warn_limit", VOUT_UV_WARN_LIMIT),
    ("vout_uv_fault_limit", VOUT_UV_FAULT_LIMIT),
    ("status_byte", STATUS_BYTE),
    ("status_word", STATUS_WORD),
    ("status_vout", STATUS_VOUT),
    ("status_iout", STATUS_IOUT),
    ("status_input", STATUS_INPUT),
    ("status_temperature", STATUS_TEMPERATURE),
    ("status_cml", STATUS_CML),
    ("read_vin", READ_VIN),
    ("read_iin", READ_IIN),
    ("read_vcap", READ_VCAP),
    ("read_vout", READ_VOUT),
    ("read_iout", READ_IOUT),
    ("read_temperature_1", READ_TEMPERATURE_1),
    ("read_pout", READ_POUT),
    ("mfr_id", MFR_ID),
    ("mfr_model", MFR_MODEL),
];
