//! Register snapshots
//!
//! A snapshot describes the register contents of an emulated device in a
//! RON file, so a device can be replayed without the hardware:
//!
//! ```ron
//! (
//!     model: "PIM4328-01",
//!     bytes: { 0x78: 0x00, 0xD5: 0x44 },
//!     words: { 0xD3: 0x1F40, 0xD4: 0x1F38 },
//!     coefficients: { 0x88: (m: 9400, b: 0, r: -2) },
//!     failing: [0xD9],
//!     missing: [block_proc_call],
//! )
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use pmbridge_core::commands::BLOCK_MAX;
use pmbridge_core::driver::{Coefficients, I2cFunctionality};
use pmbridge_core::error::Error as CoreError;
use thiserror::Error;

use crate::DummyDevice;

/// Error type for snapshot loading
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// I/O error reading the snapshot file
    #[error("Failed to read {path}: {source}")]
    Io {
        /// Snapshot path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// RON parsing error
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// Snapshot content is not usable
    #[error("Invalid snapshot: {0}")]
    Invalid(String),
}

/// Adapter capability that a snapshot can take away
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// SMBus byte data
    ByteData,
    /// SMBus word data
    WordData,
    /// SMBus block data
    BlockData,
    /// SMBus block process call
    BlockProcCall,
}

impl Capability {
    fn flags(self) -> I2cFunctionality {
        match self {
            Self::ByteData => I2cFunctionality::SMBUS_BYTE_DATA,
            Self::WordData => I2cFunctionality::SMBUS_WORD_DATA,
            Self::BlockData => I2cFunctionality::SMBUS_BLOCK_DATA,
            Self::BlockProcCall => I2cFunctionality::SMBUS_BLOCK_PROC_CALL,
        }
    }
}

/// Register contents of an emulated device
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Snapshot {
    /// MFR_MODEL string
    pub model: String,
    /// Byte registers
    pub bytes: BTreeMap<u8, u8>,
    /// Word registers
    pub words: BTreeMap<u8, u16>,
    /// COEFFICIENTS answers, keyed by the queried register
    pub coefficients: BTreeMap<u8, Coefficients>,
    /// Registers whose accesses fail with a bus error
    pub failing: Vec<u8>,
    /// Adapter capabilities the device's bus lacks
    pub missing: Vec<Capability>,
}

impl Snapshot {
    /// Load a snapshot from a RON file
    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let content = fs::read_to_string(path).map_err(|source| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron(&content)
    }

    /// Parse a snapshot from a RON string
    pub fn from_ron(content: &str) -> Result<Self, SnapshotError> {
        let snapshot: Snapshot = ron::from_str(content)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    fn validate(&self) -> Result<(), SnapshotError> {
        if self.model.is_empty() {
            return Err(SnapshotError::Invalid("model must not be empty".into()));
        }
        if self.model.len() > BLOCK_MAX {
            return Err(SnapshotError::Invalid(format!(
                "model '{}' exceeds the {} byte block limit",
                self.model, BLOCK_MAX
            )));
        }
        Ok(())
    }

    /// Build the emulated device
    pub fn to_device(&self) -> DummyDevice {
        let functionality = self
            .missing
            .iter()
            .fold(DummyDevice::full_functionality(), |f, cap| f - cap.flags());

        let mut device = DummyDevice::new(self.model.as_bytes()).with_functionality(functionality);
        for (&reg, &value) in &self.bytes {
            device.set_byte(reg, value);
        }
        for (&reg, &value) in &self.words {
            device.set_word(reg, value);
        }
        for (&reg, &c) in &self.coefficients {
            device = device.with_coefficients(reg, c);
        }
        for &reg in &self.failing {
            device.fail(reg, CoreError::BusError);
        }
        device
    }
}
