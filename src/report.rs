//! Plain-text chain-of-custody report

use crate::error::ReportError;
use crate::registration::clean_identifier;
use crate::store::CustodyRecord;
use crate::tree::inventory::extension_stats;
use crate::tree::mime::is_video_extension;
use chrono::{DateTime, Utc};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{CellAlignment, Table};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tracing::info;

const SIZE_UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];
const RULE: &str = "================================================================";

/// Human-readable size: `0 B`, otherwise two decimals in base 1024
pub fn format_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.2} {}", value, SIZE_UNITS[unit])
}

/// Report file name for a record generated at `at`
///
/// The document number is reduced to the characters a generated one uses.
pub fn report_file_name(document_number: &str, at: DateTime<Utc>) -> String {
    let mut stem = clean_identifier(document_number);
    if stem.is_empty() {
        stem.push_str("document");
    }
    format!("custody_{}_{}.txt", stem, at.format("%Y%m%d_%H%M%S"))
}

/// Writes custody reports into one output directory
#[derive(Debug, Clone)]
pub struct ReportRenderer {
    output_dir: PathBuf,
}

impl ReportRenderer {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Render the report for `record` and return the written path
    pub fn render(&self, record: &CustodyRecord) -> Result<PathBuf, ReportError> {
        self.render_at(record, Utc::now())
    }

    pub fn render_at(
        &self,
        record: &CustodyRecord,
        generated_at: DateTime<Utc>,
    ) -> Result<PathBuf, ReportError> {
        std::fs::create_dir_all(&self.output_dir).map_err(|source| ReportError::Io {
            path: self.output_dir.clone(),
            source,
        })?;

        let path = self
            .output_dir
            .join(report_file_name(&record.document_number, generated_at));
        let text = render_text(record, generated_at);
        std::fs::write(&path, text).map_err(|source| ReportError::Io {
            path: path.clone(),
            source,
        })?;

        info!(document = %record.document_number, path = %path.display(), "Report written");
        Ok(path)
    }
}

fn section(out: &mut String, title: &str) {
    let _ = write!(out, "\n{}\n{}\n", title, "-".repeat(title.len()));
}

fn field(out: &mut String, label: &str, value: &str) {
    let _ = writeln!(out, "{:<22}{}", format!("{}:", label), value);
}

fn timestamp(at: &DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Full report text
pub fn render_text(record: &CustodyRecord, generated_at: DateTime<Utc>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(out, "CHAIN OF CUSTODY - DIGITAL EVIDENCE");
    let _ = writeln!(out, "{}", RULE);
    field(&mut out, "Document number", &record.document_number);
    field(&mut out, "Generated", &timestamp(&generated_at));

    section(&mut out, "Responsible officer");
    field(&mut out, "Name", &record.officer.full_name);
    field(&mut out, "Badge number", &record.officer.badge_number);
    if let Some(rank) = &record.officer.rank {
        field(&mut out, "Rank", rank);
    }
    if let Some(unit) = &record.officer.unit {
        field(&mut out, "Unit", unit);
    }

    section(&mut out, "Case");
    field(&mut out, "Procedure number", &record.case.procedure_number);
    field(&mut out, "Crime scene", &record.case.crime_scene);
    field(&mut out, "Collected at", &timestamp(&record.case.collected_at));

    section(&mut out, "Technical information");
    field(&mut out, "SHA-256 tree digest", record.digest.as_str());
    field(&mut out, "Registered at", &timestamp(&record.created_at));
    field(&mut out, "Folder", &record.folder_path.display().to_string());
    field(&mut out, "Total size", &format_size(record.total_size_bytes));
    field(&mut out, "Files", &record.file_count.to_string());
    field(&mut out, "Unreadable files", &record.failed_count.to_string());

    section(&mut out, "File inventory");
    let mut inventory = Table::new();
    inventory.load_preset(UTF8_FULL);
    inventory.set_header(vec!["#", "Path", "Name", "Size", "Modified", "SHA-256"]);
    for (i, entry) in record.files.iter().enumerate() {
        let digest = if entry.content_digest.is_empty() {
            "N/A".to_string()
        } else {
            entry.content_digest.clone()
        };
        inventory.add_row(vec![
            (i + 1).to_string(),
            entry.relative_path.clone(),
            entry.file_name.clone(),
            entry
                .size_bytes
                .map(format_size)
                .unwrap_or_else(|| "N/A".to_string()),
            entry
                .modified_at
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "N/A".to_string()),
            digest,
        ]);
    }
    let _ = writeln!(out, "{}", inventory);

    section(&mut out, "Statistics");
    field(&mut out, "Total files", &record.file_count.to_string());
    field(&mut out, "Total size", &format_size(record.total_size_bytes));
    let videos = record
        .files
        .iter()
        .filter(|e| is_video_extension(&e.extension))
        .count();
    field(&mut out, "Video files", &videos.to_string());
    let mut stats = Table::new();
    stats.load_preset(UTF8_FULL);
    stats.set_header(vec!["Extension", "Files", "Size"]);
    for (extension, counts) in extension_stats(&record.files) {
        stats.add_row(vec![
            extension,
            counts.files.to_string(),
            format_size(counts.total_size_bytes),
        ]);
    }
    if let Some(column) = stats.column_mut(1) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    let _ = writeln!(out, "{}", stats);

    if record.case.notes.is_some() || record.notes.is_some() {
        section(&mut out, "Notes");
        for note in [&record.case.notes, &record.notes].into_iter().flatten() {
            let _ = writeln!(out, "{}", note);
        }
    }

    let _ = writeln!(out, "\n{}", RULE);
    let _ = writeln!(
        out,
        "Integrity: recompute the SHA-256 tree digest of the folder and compare it"
    );
    let _ = writeln!(out, "with {}.", record.digest);
    let _ = writeln!(out, "{}", RULE);
    out
}
