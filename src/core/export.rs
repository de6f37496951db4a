//! # Summary Export
//!
//! Writes the active summary to a plain-text file ("Download Summary").
//! Writes go through `.tmp` + `rename()` so a crash never leaves a
//! half-written export behind.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::info;

use crate::core::summary::SummaryRecord;

/// File name used for a record's export.
pub fn export_file_name(record: &SummaryRecord) -> String {
    format!("medimod-summary-{}.txt", record.id)
}

/// Render the export body.
pub fn format_export(record: &SummaryRecord, gateway: &str) -> String {
    let mut out = String::new();
    out.push_str("MediMod Summary\n");
    out.push_str(&format!(
        "Generated: {}\n",
        record.created_at.format("%Y-%m-%d %H:%M:%S")
    ));
    if let Some(cid) = record.cid() {
        out.push_str(&format!("CID: {cid}\n"));
    }
    if let Some(url) = record.gateway_url(gateway) {
        out.push_str(&format!("URL: {url}\n"));
    }
    out.push('\n');
    out.push_str(&record.summary);
    if !record.summary.ends_with('\n') {
        out.push('\n');
    }
    out
}

/// Write `record` into `dir`. Returns the written path.
pub fn export_summary(record: &SummaryRecord, gateway: &str, dir: &Path) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(export_file_name(record));
    let tmp_path = path.with_extension("tmp");
    fs::write(&tmp_path, format_export(record, gateway))?;
    fs::rename(&tmp_path, &path)?;
    info!("Exported summary {} to {}", record.id, path.display());
    Ok(path)
}
