//! Read command implementation

use std::path::Path;

use pmbridge_core::driver::{read_byte, read_word};

use super::{register_label, Session};
use crate::error::CliError;

/// Read a register through the bound driver
pub fn run(
    device: &str,
    snapshot: &Path,
    register: u8,
    page: u8,
    phase: u8,
    byte: bool,
) -> Result<(), CliError> {
    let mut session = Session::open(device, snapshot)?;
    let label = register_label(register);
    let access_error = |source| CliError::Access {
        register: label.clone(),
        page,
        source,
    };

    if byte {
        let value = read_byte(&session.device, &mut session.client, page, register)
            .map_err(access_error)?;
        println!("{}: 0x{:02X}", label, value);
    } else {
        let value = read_word(&session.device, &mut session.client, page, phase, register)
            .map_err(access_error)?;
        println!("{}: 0x{:04X}", label, value);
    }

    session.close();
    Ok(())
}
