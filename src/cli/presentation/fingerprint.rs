//! Fingerprint and check formatters.

use super::format_section_heading;
use crate::error::ApiError;
use crate::report::format_size;
use crate::store::CustodyRecord;
use crate::tree::TreeFingerprint;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;

pub fn format_fingerprint_text(fp: &TreeFingerprint, include_entries: bool) -> String {
    let mut lines = vec![
        format_section_heading("Fingerprint"),
        format!("  Root:    {}", fp.root.display()),
        format!("  Digest:  {}", fp.digest.as_str().green()),
        format!("  Files:   {}", fp.entry_count),
        format!("  Size:    {}", format_size(fp.total_size_bytes)),
    ];
    if fp.failed_count > 0 {
        lines.push(format!(
            "  {}",
            format!("Unreadable files: {}", fp.failed_count).yellow()
        ));
    }
    for skipped in &fp.skipped_directories {
        lines.push(format!(
            "  {}",
            format!(
                "Skipped directory: {} ({})",
                skipped.path.display(),
                skipped.reason
            )
            .yellow()
        ));
    }

    if !include_entries {
        for entry in fp.failed_entries() {
            lines.push(format!(
                "    {} {}",
                entry.relative_path,
                entry.error.as_deref().unwrap_or("unreadable")
            ));
        }
    }

    if include_entries && !fp.entries.is_empty() {
        let mut table = Table::new();
        table.load_preset(UTF8_BORDERS_ONLY);
        table.set_header(vec!["Path", "Size", "Type", "SHA-256"]);
        for entry in &fp.entries {
            let digest = match &entry.error {
                Some(err) => format!("unreadable: {}", err),
                None => entry.content_digest.clone(),
            };
            table.add_row(vec![
                entry.relative_path.clone(),
                entry
                    .size_bytes
                    .map(format_size)
                    .unwrap_or_else(|| "-".to_string()),
                entry.content_type.clone(),
                digest,
            ]);
        }
        lines.push(String::new());
        lines.push(format_section_heading("Inventory"));
        lines.push(table.to_string());
    }

    lines.join("\n")
}

pub fn format_fingerprint_json(fp: &TreeFingerprint) -> Result<String, ApiError> {
    Ok(serde_json::to_string_pretty(fp)?)
}

pub fn format_check_text(fp: &TreeFingerprint, existing: Option<&CustodyRecord>) -> String {
    match existing {
        Some(record) => format!(
            "{}\n  Digest:   {}\n  Document: {}\n  Registered: {}",
            "Already registered".yellow().bold(),
            fp.digest,
            record.document_number,
            record.created_at.format("%Y-%m-%d %H:%M:%S UTC")
        ),
        None => format!(
            "{}\n  Digest: {}\n  Files:  {}",
            "Not registered".green().bold(),
            fp.digest,
            fp.entry_count
        ),
    }
}

pub fn format_check_json(
    fp: &TreeFingerprint,
    existing: Option<&CustodyRecord>,
) -> Result<String, ApiError> {
    let out = serde_json::json!({
        "digest": fp.digest,
        "registered": existing.is_some(),
        "document_number": existing.map(|r| r.document_number.as_str()),
        "file_count": fp.entry_count,
        "failed_count": fp.failed_count,
    });
    Ok(serde_json::to_string_pretty(&out)?)
}
