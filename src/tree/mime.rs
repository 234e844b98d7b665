//! Extension-based content type lookup
//!
//! A pure table: the same extension always maps to the same type, and anything
//! unknown falls back to [`OCTET_STREAM`]. Content is never sniffed.

/// Fallback content type
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Video container extensions recognised for inventory statistics
pub const VIDEO_EXTENSIONS: &[&str] = &[
    ".mp4", ".avi", ".mov", ".mkv", ".wmv", ".flv", ".webm", ".m4v", ".3gp", ".mpg", ".mpeg",
    ".ts", ".m2ts",
];

/// Guess a content type from a lowercased extension (with leading dot).
pub fn content_type_for_extension(extension: &str) -> &'static str {
    match extension {
        // text
        ".txt" | ".log" => "text/plain",
        ".csv" => "text/csv",
        ".htm" | ".html" => "text/html",
        ".css" => "text/css",
        ".md" => "text/markdown",
        ".xml" => "application/xml",
        ".json" => "application/json",
        ".js" => "text/javascript",
        // documents
        ".pdf" => "application/pdf",
        ".rtf" => "application/rtf",
        ".doc" => "application/msword",
        ".docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        ".xls" => "application/vnd.ms-excel",
        ".xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        ".ppt" => "application/vnd.ms-powerpoint",
        ".pptx" => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        ".odt" => "application/vnd.oasis.opendocument.text",
        // images
        ".jpg" | ".jpeg" => "image/jpeg",
        ".png" => "image/png",
        ".gif" => "image/gif",
        ".bmp" => "image/bmp",
        ".tif" | ".tiff" => "image/tiff",
        ".webp" => "image/webp",
        ".svg" => "image/svg+xml",
        ".heic" => "image/heic",
        // audio
        ".mp3" => "audio/mpeg",
        ".wav" => "audio/x-wav",
        ".ogg" => "audio/ogg",
        ".flac" => "audio/flac",
        ".m4a" => "audio/mp4",
        // video
        ".mp4" | ".m4v" => "video/mp4",
        ".avi" => "video/x-msvideo",
        ".mov" => "video/quicktime",
        ".mkv" => "video/x-matroska",
        ".wmv" => "video/x-ms-wmv",
        ".flv" => "video/x-flv",
        ".webm" => "video/webm",
        ".3gp" => "video/3gpp",
        ".mpg" | ".mpeg" => "video/mpeg",
        ".ts" | ".m2ts" => "video/mp2t",
        // archives
        ".zip" => "application/zip",
        ".gz" => "application/gzip",
        ".tar" => "application/x-tar",
        ".7z" => "application/x-7z-compressed",
        ".rar" => "application/vnd.rar",
        _ => OCTET_STREAM,
    }
}

/// Whether the extension belongs to a video container
pub fn is_video_extension(extension: &str) -> bool {
    VIDEO_EXTENSIONS.contains(&extension)
}
