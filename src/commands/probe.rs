//! Probe command implementation

use std::path::Path;

use pmbridge_core::driver::{DriverInfo, PmbusDriver, SensorClass};
use pmbridge_core::identify::ModelDisplay;

use super::Session;
use crate::error::CliError;

/// Bind the device and print its descriptor
pub fn run(device: &str, snapshot: &Path) -> Result<(), CliError> {
    let session = Session::open(device, snapshot)?;
    let bound = &session.device;

    println!("Device:  {} ({} driver)", bound.name(), bound.family());
    println!("Model:   {}", ModelDisplay(bound.model()));
    println!("Variant: {}", bound.variant());
    print_info(bound.info());

    session.close();
    Ok(())
}

fn print_info(info: &DriverInfo) {
    println!("Pages:   {}", info.pages);
    for page in 0..info.pages {
        println!("Page {}:", page);
        println!("  Functionality: {:?}", info.func(page));
        let phases = info.phases(page);
        if phases > 0 {
            println!("  Phases: {}", phases);
            for phase in 0..phases {
                println!("    Phase {}: {:?}", phase, info.pfunc(phase));
            }
        }
    }

    println!("Formats:");
    for class in SensorClass::ALL {
        match info.coefficients(class) {
            Some(c) => println!(
                "  {:<12} {:?} (m={}, b={}, R={})",
                class.name(),
                info.format(class),
                c.m,
                c.b,
                c.r
            ),
            None => println!("  {:<12} {:?}", class.name(), info.format(class)),
        }
    }
}
