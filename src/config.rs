//! Configuration for bootstat
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

use crate::log::HEADER_OFFSET;

/// Main configuration for a bootstat run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Input Configuration
    // -------------------------------------------------------------------------
    /// Path of the boot status log to decode
    pub log_path: PathBuf,

    /// Absolute offset of the control header. Record offsets are relative to it.
    pub header_offset: u64,

    // -------------------------------------------------------------------------
    // Output Configuration
    // -------------------------------------------------------------------------
    /// Print a dump of every record before the boot entry summary
    pub show_records: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_path: PathBuf::from(r"C:\Windows\bootstat.dat"),
            header_offset: HEADER_OFFSET,
            show_records: true,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the path of the log file
    pub fn log_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.log_path = path.into();
        self
    }

    /// Set the absolute offset of the control header
    pub fn header_offset(mut self, offset: u64) -> Self {
        self.config.header_offset = offset;
        self
    }

    /// Enable or disable the per-record dump
    pub fn show_records(mut self, show: bool) -> Self {
        self.config.show_records = show;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

/// Parse an offset given either in decimal or with a `0x` prefix
pub fn parse_offset(value: &str) -> crate::Result<u64> {
    let value = value.trim();
    let parsed = match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => value.parse::<u64>(),
    };
    parsed.map_err(|e| crate::BootstatError::Config(format!("Invalid offset '{}': {}", value, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.header_offset, 0x800);
        assert!(config.show_records);
        assert_eq!(config.log_path, PathBuf::from(r"C:\Windows\bootstat.dat"));
    }

    #[test]
    fn test_builder_overrides() {
        let config = Config::builder()
            .log_path("/tmp/bootstat.dat")
            .header_offset(0x1000)
            .show_records(false)
            .build();

        assert_eq!(config.log_path, PathBuf::from("/tmp/bootstat.dat"));
        assert_eq!(config.header_offset, 0x1000);
        assert!(!config.show_records);
    }

    #[test]
    fn test_parse_offset() {
        assert_eq!(parse_offset("0x800").unwrap(), 0x800);
        assert_eq!(parse_offset("0X10").unwrap(), 0x10);
        assert_eq!(parse_offset("2048").unwrap(), 2048);
        assert!(matches!(
            parse_offset("0xZZ"),
            Err(crate::BootstatError::Config(_))
        ));
    }
}
