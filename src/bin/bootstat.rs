//! bootstat CLI
//!
//! Decodes a boot status log and prints its records and boot entries.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;

use bootstat::config::parse_offset;
use bootstat::{report, Config};
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

/// bootstat
#[derive(Parser, Debug)]
#[command(name = "bootstat")]
#[command(about = "Decode the circular boot status log (bootstat.dat)")]
#[command(version)]
struct Args {
    /// Path to the boot status log
    #[arg(default_value = r"C:\Windows\bootstat.dat")]
    path: PathBuf,

    /// Absolute offset of the control header (decimal or 0x-prefixed hex)
    #[arg(long, default_value = "0x800", value_parser = parse_offset)]
    header_offset: u64,

    /// Only print the boot entry summary table
    #[arg(short, long)]
    summary_only: bool,
}

fn main() {
    // Logs go to stderr so stdout carries only the report
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,bootstat=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let config = Config::builder()
        .log_path(args.path)
        .header_offset(args.header_offset)
        .show_records(!args.summary_only)
        .build();

    tracing::debug!("bootstat v{}", bootstat::VERSION);

    if let Err(e) = run(&config) {
        tracing::error!("Failed to decode {}: {}", config.log_path.display(), e);
        std::process::exit(1);
    }
}

/// Stream records to stdout as they are walked, then print the summary
fn run(config: &Config) -> bootstat::Result<()> {
    let file = File::open(&config.log_path)?;
    let mut walker = bootstat::walk(BufReader::new(file), config)?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    report::write_header(&mut out, walker.header())?;

    let mut boot_entries = Vec::new();
    for record in walker.by_ref() {
        let record = record?;
        if config.show_records {
            report::write_record(&mut out, &record)?;
        }
        if let Some(entry) = record.boot_entry {
            boot_entries.push(entry);
        }
    }

    report::write_boot_summary(&mut out, &boot_entries)?;
    out.flush()?;

    tracing::info!(
        "Recovered {} boot entries ({} wraps)",
        boot_entries.len(),
        walker.wrap_count()
    );

    Ok(())
}
