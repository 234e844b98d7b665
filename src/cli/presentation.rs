//! CLI presentation: text and json formatters per command family.

mod fingerprint;
mod record;

pub use fingerprint::{
    format_check_json, format_check_text, format_fingerprint_json, format_fingerprint_text,
};
pub use record::{
    format_record_json, format_record_list_json, format_record_list_text, format_record_text,
    format_registration_text, format_verification_json, format_verification_text,
};

use owo_colors::OwoColorize;

pub(crate) fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}
