//! Synthetic boot status log images for tests
//!
//! Builds an in-memory file with the 0x800 padding, the control header and
//! records placed at explicit region offsets.

#![allow(dead_code)]

use std::io::Cursor;

pub const HEADER_OFFSET: usize = 0x800;

pub const APP_BOOT_MANAGER: u32 = 2;
pub const APP_BOOT_LOADER: u32 = 3;
pub const EVENT_INITIALIZED: u32 = 1;
pub const EVENT_LAUNCH_OS: u32 = 49;
pub const EVENT_LOG_ENTRY: u32 = 80;

/// GUID bytes whose decoded form is `00112233-4455-6677-8899-aabbccddeeff`
pub const SAMPLE_GUID: [u8; 16] = [
    0x33, 0x22, 0x11, 0x00, 0x55, 0x44, 0x77, 0x66, 0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff,
];

/// One synthetic record
#[derive(Debug, Clone)]
pub struct TestRecord {
    pub timestamp: u64,
    pub guid: [u8; 16],
    pub entry_size: u32,
    pub level: u32,
    pub app_type: u32,
    pub event_code: u32,
    pub payload: Vec<u8>,
}

impl TestRecord {
    /// A plain boot manager record of `entry_size` bytes
    pub fn plain(timestamp: u64, entry_size: u32) -> Self {
        Self {
            timestamp,
            guid: SAMPLE_GUID,
            entry_size,
            level: 1,
            app_type: APP_BOOT_MANAGER,
            event_code: EVENT_LOG_ENTRY,
            payload: Vec::new(),
        }
    }

    /// A boot loader initialization record carrying a boot entry
    pub fn boot(timestamp: u64, date: (u16, u8, u8, u8, u8, u8), last_boot_id: u32) -> Self {
        let (year, month, day, hour, minute, second) = date;
        let mut payload = vec![0u8; 28];
        payload[0..2].copy_from_slice(&year.to_le_bytes());
        payload[2] = month;
        payload[4] = day;
        payload[6] = hour;
        payload[8] = minute;
        payload[10] = second;
        payload[16..24].copy_from_slice(&[0xee; 8]);
        payload[24..28].copy_from_slice(&last_boot_id.to_le_bytes());

        Self {
            timestamp,
            guid: SAMPLE_GUID,
            entry_size: 0x48,
            level: 0,
            app_type: APP_BOOT_LOADER,
            event_code: EVENT_INITIALIZED,
            payload,
        }
    }

    pub fn with_app_type(mut self, app_type: u32) -> Self {
        self.app_type = app_type;
        self
    }

    pub fn with_entry_size(mut self, entry_size: u32) -> Self {
        self.entry_size = entry_size;
        self
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(40 + self.payload.len());
        bytes.extend_from_slice(&self.timestamp.to_le_bytes());
        bytes.extend_from_slice(&self.guid);
        bytes.extend_from_slice(&self.entry_size.to_le_bytes());
        bytes.extend_from_slice(&self.level.to_le_bytes());
        bytes.extend_from_slice(&self.app_type.to_le_bytes());
        bytes.extend_from_slice(&self.event_code.to_le_bytes());
        bytes.extend_from_slice(&self.payload);
        bytes
    }
}

/// In-memory boot status log
pub struct LogImage {
    pub bytes: Vec<u8>,
}

impl LogImage {
    /// Header plus a zero-filled region of `size` bytes
    pub fn new(start: u32, size: u32, next: u32, first: u32) -> Self {
        let mut bytes = vec![0u8; HEADER_OFFSET + size as usize];
        let fields = [1u32, start, size, next, first];
        for (i, field) in fields.iter().enumerate() {
            let at = HEADER_OFFSET + i * 4;
            bytes[at..at + 4].copy_from_slice(&field.to_le_bytes());
        }
        Self { bytes }
    }

    /// Place a record at a region-relative offset
    pub fn put(mut self, offset: u32, record: &TestRecord) -> Self {
        let encoded = record.encode();
        let at = HEADER_OFFSET + offset as usize;
        self.bytes[at..at + encoded.len()].copy_from_slice(&encoded);
        self
    }

    /// Place records back to back starting at `offset`; returns the end offset
    pub fn put_run(mut self, offset: u32, records: &[TestRecord]) -> (Self, u32) {
        let mut at = offset;
        for record in records {
            self = self.put(at, record);
            at += record.entry_size;
        }
        (self, at)
    }

    /// Fill a region-relative range with a byte, to mimic stale data
    pub fn fill(mut self, from: u32, to: u32, byte: u8) -> Self {
        let from = HEADER_OFFSET + from as usize;
        let to = HEADER_OFFSET + to as usize;
        self.bytes[from..to].fill(byte);
        self
    }

    pub fn cursor(&self) -> Cursor<Vec<u8>> {
        Cursor::new(self.bytes.clone())
    }
}

/// Absolute file offset of a region-relative offset
pub fn abs(offset: u32) -> u64 {
    (HEADER_OFFSET + offset as usize) as u64
}
