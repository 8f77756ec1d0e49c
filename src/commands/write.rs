//! Write command implementation

use std::path::Path;

use pmbridge_core::driver::write_word;

use super::{register_label, Session};
use crate::error::CliError;

/// Write a word register through the bound driver
pub fn run(
    device: &str,
    snapshot: &Path,
    register: u8,
    page: u8,
    value: u16,
) -> Result<(), CliError> {
    let mut session = Session::open(device, snapshot)?;
    let label = register_label(register);

    write_word(&session.device, &mut session.client, page, register, value).map_err(|source| {
        CliError::Access {
            register: label.clone(),
            page,
            source,
        }
    })?;
    println!("{}: wrote 0x{:04X}", label, value);

    session.close();
    Ok(())
}
