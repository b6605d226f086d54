// src/entity/note.rs
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Marker stored in place of newline sequences in note content
pub const LINE_BREAK: &str = "<br>";

/// A single note record, as persisted under the storage key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: u64,
    pub title: String,
    pub content: String,
    /// Rank among notes sharing the same `pinned` value (0 is first)
    pub order: u32,
    #[serde(default)]
    pub pinned: bool,
    /// Opaque payload, passed through unmodified
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder: Option<Value>,
}

impl Note {
    pub fn new(id: u64, title: impl Into<String>, content: &str, order: u32) -> Self {
        Self {
            id,
            title: title.into(),
            content: normalize_content(content),
            order,
            pinned: false,
            reminder: None,
        }
    }

    /// Content with line-break markers turned back into newlines
    pub fn content_lines(&self) -> String {
        self.content.replace(LINE_BREAK, "\n")
    }
}

/// User-supplied fields for a note that has no id or rank yet
#[derive(Debug, Clone, Default)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
    pub reminder: Option<Value>,
}

impl NoteDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            reminder: None,
        }
    }
}

/// Replace `\r\n`, `\r` and `\n` with [`LINE_BREAK`]
pub fn normalize_content(content: &str) -> String {
    content
        .replace("\r\n", "\n")
        .replace('\r', "\n")
        .replace('\n', LINE_BREAK)
}

/// Reminder payload for a calendar date
pub fn reminder_on(date: NaiveDate) -> Value {
    serde_json::json!({ "date": date.format("%Y-%m-%d").to_string() })
}
