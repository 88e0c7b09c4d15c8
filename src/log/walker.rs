//! Circular Log Walker
//!
//! Lazy iteration over the records of the circular region, oldest first.
//!
//! The walk starts at `first_boot_log_entry`. While the stop rule is armed,
//! reaching `next_boot_log_entry` ends the walk. When the log is
//! overlapping the rule starts disarmed: records run to the physical end of
//! the region, then the walker jumps back to `boot_log_start`, arms the rule
//! and continues up to `next_boot_log_entry`.
//!
//! A jump happens when the next slot is too small to hold a record's size
//! field (`MIN_RECORD_FIT`), or when that size field reads zero. Exactly one
//! jump is allowed per walk; anything that would need a second one is
//! reported as `CorruptLog`.

use std::io::{Read, Seek, SeekFrom};

use bytes::Buf;

use crate::error::{BootstatError, Result};

use super::{
    BootEntry, LogHeader, LogRecord, RecordHeader, WrapState, BOOT_PAYLOAD_SIZE,
    ENTRY_SIZE_FIELD_OFFSET, MIN_RECORD_FIT, RECORD_HEADER_SIZE,
};

/// Iterator over the records of a boot status log in logical order
///
/// Yields `Err` at most once; the walker is fused after the first error.
/// Records decoded before a corruption is detected are still yielded.
pub struct LogWalker<R> {
    source: R,
    header: LogHeader,
    /// Absolute offset of the physical start of the region (wrap target)
    region_start: u64,
    /// Absolute offset of the physical end of the region
    region_end: u64,
    /// Absolute offset of the logical end (`next_boot_log_entry`)
    stop_at: u64,
    /// Absolute offset of the next record to read
    position: u64,
    /// Whether reaching `stop_at` ends the walk
    stop_armed: bool,
    wrap_count: u32,
    /// Error found while advancing past the last yielded record
    pending_error: Option<BootstatError>,
    finished: bool,
}

impl<R: Read + Seek> LogWalker<R> {
    /// Create a walker over `source` for an already decoded header
    ///
    /// `header_offset` is the absolute offset the header was read from;
    /// every offset in the header is relative to it.
    pub fn new(source: R, header: LogHeader, header_offset: u64) -> Result<Self> {
        header.validate()?;

        let region_start = header_offset + header.boot_log_start as u64;
        let region_end = header_offset + header.boot_log_size as u64;
        let stop_at = header_offset + header.next_boot_log_entry as u64;
        let position = header_offset + header.first_boot_log_entry as u64;

        let stop_armed = header.wrap_state() == WrapState::NonOverlapping;

        // first == next: nothing has been written since the log was reset
        let finished = header.first_boot_log_entry == header.next_boot_log_entry;

        tracing::debug!(
            "Walking boot log: region 0x{:04x}..0x{:04x}, first 0x{:04x}, next 0x{:04x}, {:?}",
            region_start,
            region_end,
            position,
            stop_at,
            header.wrap_state()
        );

        let mut walker = Self {
            source,
            header,
            region_start,
            region_end,
            stop_at,
            position,
            stop_armed,
            wrap_count: 0,
            pending_error: None,
            finished,
        };

        // The oldest record may start in the unusable tail of the region
        if !walker.finished && !walker.stop_armed && position + MIN_RECORD_FIT > region_end {
            walker.wrap("no room for another record")?;
        }

        Ok(walker)
    }

    pub fn header(&self) -> &LogHeader {
        &self.header
    }

    /// Number of jumps back to `boot_log_start` performed so far
    pub fn wrap_count(&self) -> u32 {
        self.wrap_count
    }

    /// Release the underlying source
    pub fn into_inner(self) -> R {
        self.source
    }

    /// Read and decode the record at the current position, then advance
    fn step(&mut self) -> Result<LogRecord> {
        let record_start = self.position;

        let mut raw = [0u8; RECORD_HEADER_SIZE];
        self.read_at(record_start, &mut raw)?;

        // The size is checked before the enums so an unwritten slot reads
        // as corruption rather than as an unknown application type.
        let entry_size = (&raw[ENTRY_SIZE_FIELD_OFFSET as usize..]).get_u32_le();
        self.check_extent(record_start, entry_size)?;

        let header = RecordHeader::decode(record_start, &raw)?;

        let boot_entry = if header.has_boot_entry() {
            if (entry_size as usize) < RECORD_HEADER_SIZE + BOOT_PAYLOAD_SIZE {
                return Err(self.corrupt(format!(
                    "boot loader record at 0x{:04x} is {} bytes, too small for its payload",
                    record_start, entry_size
                )));
            }
            let mut payload = [0u8; BOOT_PAYLOAD_SIZE];
            self.read_at(record_start + RECORD_HEADER_SIZE as u64, &mut payload)?;
            Some(BootEntry::decode(&header, &payload))
        } else {
            None
        };

        tracing::debug!(
            "Record at 0x{:04x}: size={} {} {} {}",
            record_start,
            entry_size,
            header.level.as_str(),
            header.application_type.as_str(),
            header.event_code.as_str()
        );

        // A bad successor is reported on the next call, after this record
        self.position = header.end();
        if let Err(e) = self.advance() {
            self.pending_error = Some(e);
        }

        Ok(LogRecord { header, boot_entry })
    }

    /// Evaluate the stop and wrap conditions at the current position
    fn advance(&mut self) -> Result<()> {
        if self.stop_armed && self.position >= self.stop_at {
            self.finished = true;
            return Ok(());
        }

        if self.position + MIN_RECORD_FIT > self.region_end {
            return self.wrap("no room for another record");
        }

        let mut size_field = [0u8; 4];
        self.read_at(self.position + ENTRY_SIZE_FIELD_OFFSET, &mut size_field)?;
        if u32::from_le_bytes(size_field) == 0 {
            return self.wrap("next record is empty");
        }

        Ok(())
    }

    /// Jump back to the physical start of the region
    fn wrap(&mut self, reason: &str) -> Result<()> {
        if self.stop_armed {
            return Err(self.corrupt(format!(
                "{} at 0x{:04x} before reaching the end of the log at 0x{:04x}",
                reason, self.position, self.stop_at
            )));
        }

        tracing::info!(
            "Boot log wraps at 0x{:04x} ({}), continuing at 0x{:04x}",
            self.position,
            reason,
            self.region_start
        );

        self.position = self.region_start;
        self.stop_armed = true;
        self.wrap_count += 1;

        // Nothing was written after the writer itself wrapped
        if self.position >= self.stop_at {
            self.finished = true;
        }

        Ok(())
    }

    /// A record must make forward progress and stay inside the region
    fn check_extent(&self, record_start: u64, entry_size: u32) -> Result<()> {
        if entry_size == 0 {
            return Err(self.corrupt(format!(
                "record at 0x{:04x} has zero size",
                record_start
            )));
        }

        if (entry_size as usize) < RECORD_HEADER_SIZE {
            return Err(self.corrupt(format!(
                "record at 0x{:04x} declares {} bytes, smaller than its {}-byte header",
                record_start, entry_size, RECORD_HEADER_SIZE
            )));
        }

        let record_end = record_start + entry_size as u64;
        if record_end > self.region_end {
            return Err(self.corrupt(format!(
                "record at 0x{:04x} ends at 0x{:04x}, past the region end 0x{:04x}",
                record_start, record_end, self.region_end
            )));
        }

        Ok(())
    }

    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<()> {
        let needed = buf.len();
        self.source.seek(SeekFrom::Start(offset))?;
        self.source
            .read_exact(buf)
            .map_err(|e| BootstatError::from_read(e, offset, needed))
    }

    fn corrupt(&self, message: String) -> BootstatError {
        tracing::warn!("Corrupt boot log: {}", message);
        BootstatError::CorruptLog(message)
    }
}

impl<R: Read + Seek> Iterator for LogWalker<R> {
    type Item = Result<LogRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(e) = self.pending_error.take() {
            self.finished = true;
            return Some(Err(e));
        }

        if self.finished {
            return None;
        }

        match self.step() {
            Ok(record) => Some(Ok(record)),
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

impl<R: Read + Seek> std::iter::FusedIterator for LogWalker<R> {}
