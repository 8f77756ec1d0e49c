//! CLI command implementations
//!
//! Every command except `list` works on a [`Session`]: the emulated device
//! loaded from a snapshot, the framework stand-in it registers with, and the
//! driver bound to it.

mod list;
pub mod probe;
pub mod read;
pub mod write;

pub use list::list_devices;

use std::path::Path;

use pmbridge_core::commands::name_of;
use pmbridge_drivers::{bind, BoundDevice};
use pmbridge_dummy::{DummyCore, DummyDevice, Snapshot};

use crate::error::CliError;

/// A device bound to its driver
pub struct Session {
    /// Emulated device
    pub client: DummyDevice,
    /// Framework the device is registered with
    pub framework: DummyCore,
    /// Bound driver
    pub device: BoundDevice,
}

impl Session {
    /// Load `snapshot` and bind it as `device`
    pub fn open(device: &str, snapshot: &Path) -> Result<Self, CliError> {
        let snapshot = Snapshot::load(snapshot)?;
        log::debug!("Loaded snapshot for model '{}'", snapshot.model);

        let mut client = snapshot.to_device();
        let mut framework = DummyCore::new();
        let bound = bind(device, &mut client, &mut framework).map_err(|source| CliError::Bind {
            device: device.to_string(),
            source,
        })?;

        Ok(Self {
            client,
            framework,
            device: bound,
        })
    }

    /// Unbind the device
    pub fn close(mut self) {
        self.device.unbind(&mut self.framework);
    }
}

/// Display form of a register: its name when known, the code otherwise
pub fn register_label(reg: u8) -> String {
    match name_of(reg) {
        Some(name) => format!("{} (0x{:02X})", name.to_uppercase(), reg),
        None => format!("0x{:02X}", reg),
    }
}
