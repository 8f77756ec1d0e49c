//! List command implementation

use pmbridge_drivers::supported_devices;

/// List all supported devices
pub fn list_devices() {
    println!("Supported devices:");
    println!();
    println!("{:<12} {:<10} Description", "Device", "Driver");
    println!("{}", "-".repeat(72));

    for device in supported_devices() {
        println!(
            "{:<12} {:<10} {}",
            device.name,
            device.family.name(),
            device.family.description()
        );
    }
}
