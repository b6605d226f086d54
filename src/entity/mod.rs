mod note;

pub use note::{normalize_content, reminder_on, Note, NoteDraft, LINE_BREAK};
