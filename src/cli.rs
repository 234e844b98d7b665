//! CLI domain: parse, route, output, and presentation only.
//! No domain orchestration; single route table dispatches to domain services.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::{exit_code, map_error};
pub use parse::{Cli, Commands, ConfigCommands};
pub use presentation::{
    format_check_json, format_check_text, format_fingerprint_json, format_fingerprint_text,
    format_record_json, format_record_list_json, format_record_list_text, format_record_text,
    format_registration_text, format_verification_json, format_verification_text,
};
pub use route::RunContext;
