//! Record definitions
//!
//! Fixed 40-byte record header, the closed protocol enumerations, and the
//! boot-loader payload that yields a `BootEntry`.

use std::fmt;

use bytes::Buf;
use uuid::Uuid;

use crate::error::{BootstatError, Result};

/// Record header size: Timestamp (8) + GUID (16) + EntrySize (4) + Level (4)
/// + ApplicationType (4) + EventCode (4) = 40 bytes
pub const RECORD_HEADER_SIZE: usize = 40;

/// Boot-loader payload: DateTime (16) + Reserved (8) + LastBootId (4) = 28 bytes
pub const BOOT_PAYLOAD_SIZE: usize = 28;

// =============================================================================
// Protocol Enumerations
// =============================================================================

/// Severity of a logged event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum EventLevel {
    Success = 0,
    Information = 1,
    Warning = 2,
    Error = 3,
}

impl EventLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventLevel::Success => "BSD_EVENT_LEVEL_SUCCESS",
            EventLevel::Information => "BSD_EVENT_LEVEL_INFORMATION",
            EventLevel::Warning => "BSD_EVENT_LEVEL_WARNING",
            EventLevel::Error => "BSD_EVENT_LEVEL_ERROR",
        }
    }

    /// Decode a raw wire value; the set of values is closed
    pub fn from_raw(value: u32) -> Result<Self> {
        match value {
            0 => Ok(EventLevel::Success),
            1 => Ok(EventLevel::Information),
            2 => Ok(EventLevel::Warning),
            3 => Ok(EventLevel::Error),
            _ => Err(BootstatError::UnknownFieldValue { field: "level", value }),
        }
    }
}

/// Boot application that wrote the record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ApplicationType {
    FirmwareBootManager = 1,
    WindowsBootManager = 2,
    WindowsBootLoader = 3,
    WindowsResumeApplication = 4,
    WindowsMemoryTester = 5,
}

impl ApplicationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationType::FirmwareBootManager => "BCD_APPLICATION_TYPE_FIRMWARE_BOOT_MANAGER",
            ApplicationType::WindowsBootManager => "BCD_APPLICATION_TYPE_WINDOWS_BOOT_MANAGER",
            ApplicationType::WindowsBootLoader => "BCD_APPLICATION_TYPE_WINDOWS_BOOT_LOADER",
            ApplicationType::WindowsResumeApplication => {
                "BCD_APPLICATION_TYPE_WINDOWS_RESUME_APPLICATION"
            }
            ApplicationType::WindowsMemoryTester => "BCD_APPLICATION_TYPE_WINDOWS_MEMORY_TESTER",
        }
    }

    /// Decode a raw wire value; the set of values is closed
    pub fn from_raw(value: u32) -> Result<Self> {
        match value {
            1 => Ok(ApplicationType::FirmwareBootManager),
            2 => Ok(ApplicationType::WindowsBootManager),
            3 => Ok(ApplicationType::WindowsBootLoader),
            4 => Ok(ApplicationType::WindowsResumeApplication),
            5 => Ok(ApplicationType::WindowsMemoryTester),
            _ => Err(BootstatError::UnknownFieldValue { field: "applicationType", value }),
        }
    }
}

/// What happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum EventCode {
    EndOfLog = 0,
    Initialized = 1,
    OsLoaderEventLaunchOs = 49,
    BootLoaderLogEntry = 80,
}

impl EventCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventCode::EndOfLog => "BSD_EVENT_END_OF_LOG",
            EventCode::Initialized => "BSD_EVENT_INITIALIZED",
            EventCode::OsLoaderEventLaunchOs => "BSD_OSLOADER_EVENT_LAUNCH_OS",
            EventCode::BootLoaderLogEntry => "BSD_BOOT_LOADER_LOG_ENTRY",
        }
    }

    /// Decode a raw wire value; the set of values is closed
    pub fn from_raw(value: u32) -> Result<Self> {
        match value {
            0 => Ok(EventCode::EndOfLog),
            1 => Ok(EventCode::Initialized),
            49 => Ok(EventCode::OsLoaderEventLaunchOs),
            80 => Ok(EventCode::BootLoaderLogEntry),
            _ => Err(BootstatError::UnknownFieldValue { field: "eventCode", value }),
        }
    }
}

// =============================================================================
// Record Header
// =============================================================================

/// Decoded fixed-size header of one record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordHeader {
    /// Absolute file offset where the record starts
    pub offset: u64,
    pub timestamp: u64,
    /// Decoded from the mixed-endian wire form (LE u32, LE u16, LE u16, 8 raw bytes)
    pub guid: Uuid,
    /// Total bytes occupied by the record, header included
    pub entry_size: u32,
    pub level: EventLevel,
    pub application_type: ApplicationType,
    pub event_code: EventCode,
}

impl RecordHeader {
    /// Decode the 40-byte header of the record at `offset`
    pub fn decode(offset: u64, bytes: &[u8; RECORD_HEADER_SIZE]) -> Result<Self> {
        let mut buf = &bytes[..];
        let timestamp = buf.get_u64_le();
        let mut guid = [0u8; 16];
        buf.copy_to_slice(&mut guid);
        let entry_size = buf.get_u32_le();
        let level = EventLevel::from_raw(buf.get_u32_le())?;
        let application_type = ApplicationType::from_raw(buf.get_u32_le())?;
        let event_code = EventCode::from_raw(buf.get_u32_le())?;

        Ok(Self {
            offset,
            timestamp,
            guid: Uuid::from_bytes_le(guid),
            entry_size,
            level,
            application_type,
            event_code,
        })
    }

    /// Absolute offset just past the end of this record
    pub fn end(&self) -> u64 {
        self.offset + self.entry_size as u64
    }

    /// Boot loader initialization records carry a `BootEntry` payload
    pub fn has_boot_entry(&self) -> bool {
        self.application_type == ApplicationType::WindowsBootLoader
            && self.event_code == EventCode::Initialized
    }
}

// =============================================================================
// Boot Entry
// =============================================================================

/// Packed date-time from the boot loader payload
///
/// Sixteen bytes, little-endian: year (u16) at 0, then month, day, hour,
/// minute and second each in the low byte of a 16-bit slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootDateTime {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl BootDateTime {
    pub fn from_bytes(bytes: &[u8; 16]) -> Self {
        Self {
            year: u16::from_le_bytes([bytes[0], bytes[1]]),
            month: bytes[2],
            day: bytes[4],
            hour: bytes[6],
            minute: bytes[8],
            second: bytes[10],
        }
    }
}

impl fmt::Display for BootDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

/// A completed OS boot attempt recovered from a boot loader record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootEntry {
    pub record_offset: u64,
    pub boot_date_time: BootDateTime,
    pub last_boot_id: u32,
    /// Copied from the owning record
    pub timestamp: u64,
}

impl BootEntry {
    /// Decode the payload that follows the header of `record`
    pub fn decode(record: &RecordHeader, payload: &[u8; BOOT_PAYLOAD_SIZE]) -> Self {
        let mut date_time = [0u8; 16];
        date_time.copy_from_slice(&payload[..16]);

        let mut buf = &payload[16..];
        buf.advance(8); // reserved
        let last_boot_id = buf.get_u32_le();

        Self {
            record_offset: record.offset,
            boot_date_time: BootDateTime::from_bytes(&date_time),
            last_boot_id,
            timestamp: record.timestamp,
        }
    }
}

/// One walked record, with its boot entry when it carries one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogRecord {
    pub header: RecordHeader,
    pub boot_entry: Option<BootEntry>,
}
