//! # bootstat
//!
//! Decoder for the boot status log (`bootstat.dat`) kept by the boot manager:
//! - Control header parsing
//! - Circular-region traversal with wrap and overwrite detection
//! - Closed-set decoding of record levels, applications and event codes
//! - Recovery of boot entries (boot date-time and last boot id)
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     bootstat.dat                             │
//! │                 (Read + Seek source)                         │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                  Header Reader                               │
//! │                (0x800, 20 bytes)                             │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │               Circular Log Walker                            │
//! │       (lazy, oldest → newest, one wrap at most)              │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │   Records   │          │ Boot Entries│
//!   └──────┬──────┘          └──────┬──────┘
//!          └────────────┬───────────┘
//!                       ▼
//!               ┌─────────────┐
//!               │   Report    │
//!               └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod log;
pub mod report;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{BootstatError, Result};
pub use config::Config;
pub use log::{BootEntry, LogHeader, LogRecord, LogWalker, RecordHeader};

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of bootstat
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Parse API
// =============================================================================

/// Everything recovered from one pass over a boot status log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLog {
    pub header: LogHeader,
    /// Every record, oldest first
    pub records: Vec<RecordHeader>,
    /// Boot entries, in the same order as their records
    pub boot_entries: Vec<BootEntry>,
    /// Jumps back to the physical start of the region (0 or 1)
    pub wrap_count: u32,
}

/// Parse a boot status log with the default header offset
pub fn parse<R: Read + Seek>(source: R) -> Result<ParsedLog> {
    parse_with_config(source, &Config::default())
}

/// Parse a boot status log using the offsets from `config`
pub fn parse_with_config<R: Read + Seek>(source: R, config: &Config) -> Result<ParsedLog> {
    let mut walker = walk(source, config)?;

    let mut records = Vec::new();
    let mut boot_entries = Vec::new();
    for record in walker.by_ref() {
        let record = record?;
        records.push(record.header);
        if let Some(entry) = record.boot_entry {
            boot_entries.push(entry);
        }
    }

    tracing::debug!(
        "Parsed {} records, {} boot entries, {} wraps",
        records.len(),
        boot_entries.len(),
        walker.wrap_count()
    );

    Ok(ParsedLog {
        header: *walker.header(),
        records,
        boot_entries,
        wrap_count: walker.wrap_count(),
    })
}

/// Read the header and return a lazy walker over the records
pub fn walk<R: Read + Seek>(mut source: R, config: &Config) -> Result<LogWalker<R>> {
    let header = log::read_header(&mut source, config.header_offset)?;
    LogWalker::new(source, header, config.header_offset)
}

/// Open and parse a boot status log file (convenience method)
pub fn open(path: &Path) -> Result<ParsedLog> {
    let file = File::open(path)?;
    parse(BufReader::new(file))
}
