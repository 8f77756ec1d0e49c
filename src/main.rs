//! pmbridge - PMBus register translation front end
//!
//! Binds a PIM4328 family or STPDDC60 driver against an emulated device
//! described by a register snapshot, and performs register accesses through
//! the driver's translation hooks.
//!
//! This is the same path the monitoring framework takes: the driver hook is
//! asked first, and only registers it does not translate reach the device
//! unchanged.

mod cli;
mod commands;
mod error;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    // RUST_LOG wins over -v
    let default_filter = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let result = match cli.command {
        Commands::List => {
            commands::list_devices();
            Ok(())
        }
        Commands::Probe { device } => commands::probe::run(&device.device, &device.snapshot),
        Commands::Read {
            device,
            register,
            page,
            phase,
            byte,
        } => commands::read::run(&device.device, &device.snapshot, register, page, phase, byte),
        Commands::Write {
            device,
            register,
            value,
            page,
        } => commands::write::run(&device.device, &device.snapshot, register, page, value),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
