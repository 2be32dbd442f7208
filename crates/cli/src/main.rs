use std::path::{Path, PathBuf};

use align_audit::{resolve_input_path, validate_package, validate_readelf};
use align_core::compliance::{self, StatusTone};
use align_core::model::{ReportRow, SummaryEntry};
use align_core::package;
use align_core::report::ReportAggregator;
use align_core::services::audit::Auditor;
use align_core::services::readelf::ReadelfDumper;
use anyhow::{Context, Result};
use clap::Parser;
use colored::{Color, Colorize};
use serde::Serialize;
use tempfile::TempDir;

/// Validate 16 KiB alignment compliance inside an apk/aab or a single .so.
///
/// This CLI is a thin wrapper around `align-core` (exposed in code as
/// `align_core`). All substantive logic lives in the library so it can be
/// tested thoroughly and reused from other frontends.
#[derive(Parser, Debug)]
#[command(
    name = "align-audit",
    version,
    about = "Validate 16 KiB LOAD-segment alignment inside apk/aab packages or single .so files",
    long_about = None
)]
struct Cli {
    /// Path to the .apk, .aab, or .so to audit.
    #[arg(long)]
    package: String,

    /// Path to a readelf or llvm-readelf executable.
    #[arg(long)]
    readelf: String,

    /// CSV output path for the row-level report.
    #[arg(long, default_value = "align-readelf.csv")]
    out: String,

    /// Emit the report as JSON instead of the human-readable summary.
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    rows: &'a [ReportRow],
    summary: Vec<SummaryEntry>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let package = resolve_input_path(&cli.package)?;
    let readelf = resolve_input_path(&cli.readelf)?;
    validate_package(&package)?;
    validate_readelf(&readelf)?;
    let out_csv = PathBuf::from(&cli.out);

    // The temp dir (if any) must outlive the audit loop; dropping it at the
    // end of main removes the unpacked tree even on early error returns.
    let (so_paths, _unpack_dir) = prepare_inputs(&package)?;

    let dumper = ReadelfDumper::new(&readelf);
    let auditor = Auditor { dumper: &dumper };
    let mut agg = ReportAggregator::new();
    for so in &so_paths {
        auditor
            .audit_binary(so, &mut agg)
            .with_context(|| format!("Failed to audit {}", so.display()))?;
    }

    agg.write_csv_file(&out_csv)
        .with_context(|| format!("Failed to write CSV report to {}", out_csv.display()))?;

    if cli.json {
        let report = JsonReport { rows: agg.rows(), summary: agg.summary() };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&agg);
    }
    println!("csv: {}", out_csv.display());

    Ok(())
}

/// Resolve the list of .so files to audit, unpacking archive inputs into a
/// temporary directory that lives until the caller drops it.
fn prepare_inputs(package: &Path) -> Result<(Vec<PathBuf>, Option<TempDir>)> {
    if package::is_archive_input(package) {
        let dir = tempfile::Builder::new()
            .prefix("apk_aab_align_")
            .tempdir()
            .context("Failed to create extraction directory")?;
        package::extract_package(package, dir.path())
            .with_context(|| format!("Failed to unpack {}", package.display()))?;
        let paths = package::collect_so_files(dir.path())
            .context("Failed to enumerate .so files in the unpacked package")?;
        log::info!("unpacked {}: {} .so file(s)", package.display(), paths.len());
        Ok((paths, Some(dir)))
    } else {
        Ok((vec![package.to_path_buf()], None))
    }
}

/// Print the human-facing summary: one line per confirmed-64-bit binary,
/// sorted by path, or the fixed notice when there are none.
fn print_summary(agg: &ReportAggregator) {
    println!("Summary (last LOAD per .so - 64-bit only):");
    let entries = agg.summary();
    if entries.is_empty() {
        println!("no 64-bit .so files found");
        return;
    }
    for entry in &entries {
        let align_display = entry.align.map_or_else(|| "?".to_string(), |n| n.to_string());
        let (status, tone) = compliance::summary_status(entry.align);
        let colored_status = status.as_str().color(tone_color(tone));
        println!("- {} -> {} -> {}", entry.path, align_display, colored_status);
    }
}

/// Terminal color for each status tone.
fn tone_color(tone: StatusTone) -> Color {
    match tone {
        StatusTone::Good => Color::Green,
        StatusTone::Bad => Color::Red,
        StatusTone::Caution => Color::Yellow,
    }
}
