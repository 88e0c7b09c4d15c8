//! Boot Status Log Module
//!
//! Decodes the circular boot status log written by the boot manager.
//!
//! ## Responsibilities
//! - Parse the control header
//! - Decode fixed-size record headers and boot-loader payloads
//! - Walk the circular region in logical (oldest to newest) order
//! - Detect wraps, overwritten regions and corrupt traversal
//!
//! ## File Format
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ 0x000 - 0x7FF  Reserved (unused)                        │
//! ├─────────────────────────────────────────────────────────┤
//! │ 0x800  Control Header (20 bytes, little-endian u32)     │
//! │   Version | BootLogStart | BootLogSize | Next | First   │
//! ├─────────────────────────────────────────────────────────┤
//! │ 0x800 + BootLogStart  Circular Region                   │
//! │ ┌───────────┬──────────┬──────┬───────┬─────┬───────┐   │
//! │ │ Stamp (8) │ GUID(16) │Sz (4)│Lvl (4)│App 4│Code 4 │   │
//! │ └───────────┴──────────┴──────┴───────┴─────┴───────┘   │
//! │   followed by (EntrySize - 40) bytes of payload         │
//! │   ... repeated, wrapping at 0x800 + BootLogSize ...     │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! All record offsets in the header are relative to the control header.

mod header;
mod record;
mod walker;

pub use header::{read_header, LogHeader, WrapState, LOG_HEADER_SIZE};
pub use record::{
    ApplicationType, BootDateTime, BootEntry, EventCode, EventLevel, LogRecord,
    RecordHeader, BOOT_PAYLOAD_SIZE, RECORD_HEADER_SIZE,
};
pub use walker::LogWalker;

// =============================================================================
// Shared Constants (used by header, record, walker)
// =============================================================================

/// Absolute offset of the control header in the file
pub const HEADER_OFFSET: u64 = 0x800;

/// Bytes of a record needed to reach the end of its size field:
/// Timestamp (8) + GUID (16) + EntrySize (4) = 28 bytes.
/// A record slot with less room than this cannot be the next record.
pub const MIN_RECORD_FIT: u64 = 28;

/// Offset of the size field inside a record header
pub(crate) const ENTRY_SIZE_FIELD_OFFSET: u64 = 24;
