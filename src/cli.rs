//! CLI argument parsing

use clap::{Parser, Subcommand};
use pmbridge_core::commands::{self, PHASE_ALL};
use std::path::PathBuf;

/// Parse a string as a hex or decimal u32
fn parse_hex_u32(s: &str) -> Result<u32, String> {
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16).map_err(|e| format!("Invalid hex value: {}", e))
    } else {
        s.parse::<u32>().map_err(|e| format!("Invalid number: {}", e))
    }
}

/// Parse a hex or decimal number that must fit into `T`
fn parse_bounded<T: TryFrom<u32>>(s: &str) -> Result<T, String> {
    let value = parse_hex_u32(s)?;
    T::try_from(value).map_err(|_| format!("Value out of range: {}", s))
}

/// Parse a page or phase number
pub fn parse_u8(s: &str) -> Result<u8, String> {
    parse_bounded(s)
}

/// Parse a register word
pub fn parse_u16(s: &str) -> Result<u16, String> {
    parse_bounded(s)
}

/// Parse a register given as a command code or a PMBus command name
pub fn parse_register(s: &str) -> Result<u8, String> {
    if let Some(code) = commands::by_name(s) {
        return Ok(code);
    }
    parse_u8(s).map_err(|_| format!("Unknown register: {} (use a code or a name like status_word)", s))
}

/// Generate dynamic help text for the device argument
fn device_help() -> String {
    let names: Vec<&str> = pmbridge_drivers::supported_devices()
        .iter()
        .map(|d| d.name)
        .collect();
    format!("Configured device name [supported: {}]", names.join(", "))
}

#[derive(Parser)]
#[command(name = "pmbridge")]
#[command(author, version, about = "PMBus register translation for PIM4328 and STPDDC60 devices", long_about = None)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Device selection shared across commands
#[derive(clap::Args, Debug, Clone)]
pub struct DeviceArgs {
    /// Configured device name
    #[arg(short, long, help = device_help())]
    pub device: String,

    /// Register snapshot (RON) describing the emulated device
    #[arg(short, long)]
    pub snapshot: PathBuf,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List supported devices
    List,

    /// Bind a device and show its descriptor
    Probe {
        #[command(flatten)]
        device: DeviceArgs,
    },

    /// Read a register through the driver
    Read {
        #[command(flatten)]
        device: DeviceArgs,

        /// Register code (hex or decimal) or name
        #[arg(short, long, value_parser = parse_register)]
        register: u8,

        /// Page
        #[arg(long, default_value = "0", value_parser = parse_u8)]
        page: u8,

        /// Phase (0xff for all phases)
        #[arg(long, default_value_t = PHASE_ALL, value_parser = parse_u8)]
        phase: u8,

        /// Read a byte register instead of a word register
        #[arg(long)]
        byte: bool,
    },

    /// Write a word register through the driver
    Write {
        #[command(flatten)]
        device: DeviceArgs,

        /// Register code (hex or decimal) or name
        #[arg(short, long, value_parser = parse_register)]
        register: u8,

        /// Word to write (hex or decimal)
        #[arg(long, value_parser = parse_u16)]
        value: u16,

        /// Page
        #[arg(long, default_value = "0", value_parser = parse_u8)]
        page: u8,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_parse_register() {
        assert_eq!(parse_register("0x79"), Ok(0x79));
        assert_eq!(parse_register("136"), Ok(0x88));
        assert_eq!(parse_register("status_word"), Ok(0x79));
        assert_eq!(parse_register("READ_VIN"), Ok(0x88));
        assert!(parse_register("0x100").is_err());
        assert!(parse_register("bogus").is_err());
    }

    #[test]
    fn test_parse_u16() {
        assert_eq!(parse_u16("0xF800"), Ok(0xF800));
        assert_eq!(parse_u16("65535"), Ok(0xFFFF));
        assert!(parse_u16("65536").is_err());
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_read_defaults() {
        let cli = Cli::try_parse_from([
            "pmbridge", "read", "-d", "pim4328", "-s", "dev.ron", "-r", "read_vin",
        ])
        .unwrap();
        match cli.command {
            Commands::Read {
                register,
                page,
                phase,
                byte,
                ..
            } => {
                assert_eq!(register, 0x88);
                assert_eq!(page, 0);
                assert_eq!(phase, PHASE_ALL);
                assert!(!byte);
            }
            _ => panic!("expected read"),
        }
    }
}
