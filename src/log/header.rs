//! Control Header
//!
//! The 20-byte header at 0x800 describing where the circular region lives
//! and which part of it holds valid records.

use std::io::{Read, Seek, SeekFrom};

use bytes::Buf;

use crate::error::{BootstatError, Result};

/// Header size: Version (4) + BootLogStart (4) + BootLogSize (4) + Next (4) + First (4)
pub const LOG_HEADER_SIZE: usize = 20;

/// Whether the valid data wraps around the physical end of the region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapState {
    /// `first <= next`: one contiguous run of records
    NonOverlapping,

    /// `first > next`: records run to the physical end, then continue at `boot_log_start`
    Overlapping,
}

/// Decoded control header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogHeader {
    pub version: u32,
    /// Physical start of the circular region
    pub boot_log_start: u32,
    /// Physical end of the circular region
    pub boot_log_size: u32,
    /// Where the next write will land (logical end)
    pub next_boot_log_entry: u32,
    /// Oldest valid record (logical start)
    pub first_boot_log_entry: u32,
}

impl LogHeader {
    /// Decode a header from exactly `LOG_HEADER_SIZE` bytes
    pub fn decode(bytes: &[u8; LOG_HEADER_SIZE]) -> Self {
        let mut buf = &bytes[..];
        Self {
            version: buf.get_u32_le(),
            boot_log_start: buf.get_u32_le(),
            boot_log_size: buf.get_u32_le(),
            next_boot_log_entry: buf.get_u32_le(),
            first_boot_log_entry: buf.get_u32_le(),
        }
    }

    /// Read a header from a source already positioned at the header
    pub fn read<R: Read>(reader: &mut R, offset: u64) -> Result<Self> {
        let mut raw = [0u8; LOG_HEADER_SIZE];
        reader
            .read_exact(&mut raw)
            .map_err(|e| BootstatError::from_read(e, offset, LOG_HEADER_SIZE))?;
        Ok(Self::decode(&raw))
    }

    pub fn wrap_state(&self) -> WrapState {
        if self.first_boot_log_entry > self.next_boot_log_entry {
            WrapState::Overlapping
        } else {
            WrapState::NonOverlapping
        }
    }

    /// True when older records have been overwritten by the circular writer
    pub fn is_partially_overwritten(&self) -> bool {
        self.wrap_state() == WrapState::Overlapping
    }

    /// Check that every offset lies within `[0, boot_log_size]`
    pub fn validate(&self) -> Result<()> {
        let size = self.boot_log_size;
        let fields = [
            ("bootLogStart", self.boot_log_start),
            ("nextBootLogEntry", self.next_boot_log_entry),
            ("firstBootLogEntry", self.first_boot_log_entry),
        ];

        for (name, value) in fields {
            if value > size {
                return Err(BootstatError::CorruptLog(format!(
                    "{} 0x{:04x} lies outside the log region of size 0x{:04x}",
                    name, value, size
                )));
            }
        }

        Ok(())
    }
}

/// Seek to `offset` and read the control header
pub fn read_header<R: Read + Seek>(source: &mut R, offset: u64) -> Result<LogHeader> {
    source.seek(SeekFrom::Start(offset))?;
    LogHeader::read(source, offset)
}
