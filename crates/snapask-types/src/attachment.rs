// crates/snapask-types/src/attachment.rs
// Pending attachment model and preview formatting

use serde::{Deserialize, Serialize};

/// Names longer than this are shortened in the preview
pub const MAX_DISPLAY_NAME_CHARS: usize = 25;
/// Characters kept before the ellipsis when a name is shortened
pub const TRUNCATED_NAME_CHARS: usize = 22;

const SIZE_UNITS: [&str; 3] = ["KB", "MB", "GB"];

/// Icon bucket for a preview entry
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum IconCategory {
    Image,
    Text,
    Pdf,
    Other,
}

impl IconCategory {
    pub fn from_mime(mime: &str) -> Self {
        let mime = mime.trim().to_ascii_lowercase();
        if mime.starts_with("image/") {
            IconCategory::Image
        } else if mime.starts_with("text/") {
            IconCategory::Text
        } else if mime == "application/pdf" {
            IconCategory::Pdf
        } else {
            IconCategory::Other
        }
    }

    /// Browsers report an empty type for files they don't recognise,
    /// so fall back to the extension in that case.
    pub fn for_file(name: &str, mime: &str) -> Self {
        if !mime.trim().is_empty() {
            return Self::from_mime(mime);
        }
        mime_guess::from_path(name)
            .first_raw()
            .map(Self::from_mime)
            .unwrap_or(IconCategory::Other)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IconCategory::Image => "image",
            IconCategory::Text => "text",
            IconCategory::Pdf => "pdf",
            IconCategory::Other => "other",
        }
    }
}

/// What the rendering surface needs to draw one preview entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayInfo {
    pub icon: IconCategory,
    pub truncated_name: String,
    pub full_name: String,
    pub size_text: String,
}

/// One file the user intends to send.
///
/// `payload` is whatever handle the native file picker produced (a
/// `web_sys::File` in the browser). Nothing here ever reads its bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct Attachment<P> {
    pub name: String,
    pub size: u64,
    pub mime_type: String,
    pub payload: P,
}

impl<P> Attachment<P> {
    pub fn new(name: impl Into<String>, size: u64, mime_type: impl Into<String>, payload: P) -> Self {
        Self {
            name: name.into(),
            size,
            mime_type: mime_type.into(),
            payload,
        }
    }

    /// Uniqueness key within a pending list
    pub fn same_file<Q>(&self, other: &Attachment<Q>) -> bool {
        self.name == other.name && self.size == other.size
    }

    pub fn icon(&self) -> IconCategory {
        IconCategory::for_file(&self.name, &self.mime_type)
    }

    pub fn display_info(&self) -> DisplayInfo {
        DisplayInfo {
            icon: self.icon(),
            truncated_name: truncate_name(&self.name),
            full_name: self.name.clone(),
            size_text: format_size(self.size),
        }
    }
}

/// Human-readable size using 1024 as the scale factor
pub fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{} B", bytes);
    }

    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.2} {}", value, SIZE_UNITS[unit])
}

/// Shorten long names for display; counts chars, not bytes
pub fn truncate_name(name: &str) -> String {
    if name.chars().count() <= MAX_DISPLAY_NAME_CHARS {
        return name.to_string();
    }
    let head: String = name.chars().take(TRUNCATED_NAME_CHARS).collect();
    format!("{}...", head)
}
