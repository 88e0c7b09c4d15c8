//! Report formatting
//!
//! Human-readable output for a decoded log. Decoding never prints; callers
//! pick a writer (stdout in the binary, a `Vec<u8>` in tests).

use std::io::Write;

use crate::error::Result;
use crate::log::{BootEntry, LogHeader, LogRecord};

const RECORD_SEPARATOR: &str = "#########################################################";

/// Write the control header fields
pub fn write_header<W: Write>(w: &mut W, header: &LogHeader) -> Result<()> {
    writeln!(w, "Version: {}", header.version)?;
    writeln!(w, "BootLogStart: 0x{:04x}", header.boot_log_start)?;
    writeln!(w, "BootLogSize: 0x{:04x}", header.boot_log_size)?;
    writeln!(w, "NextBootLogEntry: 0x{:04x}", header.next_boot_log_entry)?;
    writeln!(w, "FirstBootLogEntry: 0x{:04x}", header.first_boot_log_entry)?;

    if header.is_partially_overwritten() {
        writeln!(w, "Log partially overwritten due to its circular nature.")?;
    }

    Ok(())
}

/// Write a dump of one record and its boot entry, if any
pub fn write_record<W: Write>(w: &mut W, record: &LogRecord) -> Result<()> {
    let header = &record.header;

    writeln!(w)?;
    writeln!(w, "{}", RECORD_SEPARATOR)?;
    writeln!(w, "RecordStart: 0x{:04x}", header.offset)?;
    writeln!(w, "Timestamp: {}", header.timestamp)?;
    writeln!(w, "GUID: {}", header.guid)?;
    writeln!(w, "EntrySize: {}", header.entry_size)?;
    writeln!(w, "Level: {}", header.level.as_str())?;
    writeln!(w, "ApplicationType: {}", header.application_type.as_str())?;
    writeln!(w, "EventCode: {}", header.event_code.as_str())?;

    if let Some(entry) = &record.boot_entry {
        writeln!(w, "Boot entry found:")?;
        writeln!(w, "\tDateTime: {}", entry.boot_date_time)?;
        writeln!(w, "\tLastBootID: {}", entry.last_boot_id)?;
    }

    Ok(())
}

/// Write the table of recovered boot entries
pub fn write_boot_summary<W: Write>(w: &mut W, entries: &[BootEntry]) -> Result<()> {
    writeln!(w)?;
    writeln!(w, "{:<8} {:<19} {:>10} {}", "Offset", "DateTime", "LastBootId", "TimeStamp")?;
    writeln!(w, "{:<8} {:<19} {:>10} {}", "------", "--------", "----------", "---------")?;

    for entry in entries {
        writeln!(
            w,
            "{:<8} {:<19} {:>10} {}",
            format!("0x{:04x}", entry.record_offset),
            entry.boot_date_time.to_string(),
            entry.last_boot_id,
            entry.timestamp
        )?;
    }

    Ok(())
}
