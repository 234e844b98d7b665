//! Custody record formatters (register, list, show, verify).

use super::format_section_heading;
use crate::error::ApiError;
use crate::registration::Verification;
use crate::report::format_size;
use crate::store::CustodyRecord;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;

pub fn format_registration_text(record: &CustodyRecord) -> String {
    let mut s = format!(
        "{}\n  Document: {}\n  Digest:   {}\n  Files:    {} ({})",
        "Registered".green().bold(),
        record.document_number,
        record.digest,
        record.file_count,
        format_size(record.total_size_bytes)
    );
    if record.failed_count > 0 {
        s.push_str(&format!(
            "\n  {}",
            format!("Unreadable files: {}", record.failed_count).yellow()
        ));
    }
    if let Some(path) = &record.report_path {
        s.push_str(&format!("\n  Report:   {}", path.display()));
    }
    s
}

pub fn format_record_text(record: &CustodyRecord, include_files: bool) -> String {
    let mut lines = vec![
        format_section_heading(&record.document_number),
        format!("  Digest:       {}", record.digest),
        format!(
            "  Registered:   {}",
            record.created_at.format("%Y-%m-%d %H:%M:%S UTC")
        ),
        format!("  Folder:       {}", record.folder_path.display()),
        format!(
            "  Files:        {} ({}), unreadable: {}",
            record.file_count,
            format_size(record.total_size_bytes),
            record.failed_count
        ),
        format!(
            "  Officer:      {} (badge {})",
            record.officer.full_name, record.officer.badge_number
        ),
        format!("  Case:         {}", record.case.procedure_number),
        format!("  Scene:        {}", record.case.crime_scene),
        format!(
            "  Collected at: {}",
            record.case.collected_at.format("%Y-%m-%d %H:%M UTC")
        ),
    ];
    if let Some(path) = &record.report_path {
        lines.push(format!("  Report:       {}", path.display()));
    }

    if include_files {
        let mut table = Table::new();
        table.load_preset(UTF8_BORDERS_ONLY);
        table.set_header(vec!["Path", "Size", "SHA-256"]);
        for entry in &record.files {
            table.add_row(vec![
                entry.relative_path.clone(),
                entry
                    .size_bytes
                    .map(format_size)
                    .unwrap_or_else(|| "-".to_string()),
                if entry.content_digest.is_empty() {
                    "N/A".to_string()
                } else {
                    entry.content_digest.clone()
                },
            ]);
        }
        lines.push(table.to_string());
    }
    lines.join("\n")
}

pub fn format_record_json(record: &CustodyRecord) -> Result<String, ApiError> {
    Ok(serde_json::to_string_pretty(record)?)
}

pub fn format_record_list_text(records: &[CustodyRecord]) -> String {
    if records.is_empty() {
        return "No registrations.".to_string();
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Document", "Registered", "Case", "Officer", "Files", "Digest"]);
    for record in records {
        table.add_row(vec![
            record.document_number.clone(),
            record.created_at.format("%Y-%m-%d %H:%M").to_string(),
            record.case.procedure_number.clone(),
            record.officer.full_name.clone(),
            record.file_count.to_string(),
            record.digest.short(),
        ]);
    }
    table.to_string()
}

pub fn format_record_list_json(records: &[CustodyRecord]) -> Result<String, ApiError> {
    let rows: Vec<serde_json::Value> = records
        .iter()
        .map(|r| {
            serde_json::json!({
                "document_number": r.document_number,
                "digest": r.digest,
                "created_at": r.created_at,
                "procedure_number": r.case.procedure_number,
                "officer": r.officer.full_name,
                "file_count": r.file_count,
                "total_size_bytes": r.total_size_bytes,
            })
        })
        .collect();
    Ok(serde_json::to_string_pretty(&rows)?)
}

pub fn format_verification_text(v: &Verification) -> String {
    let status = if v.matches {
        format!("{}", "MATCH".green().bold())
    } else {
        format!("{}", "MISMATCH".red().bold())
    };
    format!(
        "{}  {}\n  Expected: {}\n  Actual:   {}\n  Files:    {}",
        status, v.document_number, v.expected, v.actual, v.fingerprint.entry_count
    )
}

pub fn format_verification_json(v: &Verification) -> Result<String, ApiError> {
    let out = serde_json::json!({
        "document_number": v.document_number,
        "matches": v.matches,
        "expected": v.expected,
        "actual": v.actual,
        "file_count": v.fingerprint.entry_count,
        "failed_count": v.fingerprint.failed_count,
    });
    Ok(serde_json::to_string_pretty(&out)?)
}
