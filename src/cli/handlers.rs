use std::env;
use std::fs;
use std::io::{self, Read};

use chrono::NaiveDate;
use serde_json::Value;

use crate::config::{BackendKind, Config};
use crate::entity::{normalize_content, reminder_on, Note, NoteDraft};
use crate::error::{PinnotesError, Result};
use crate::notification::Level;

use super::context::{AppContext, PINNOTES_DIR};

pub fn handle_init(sqlite: bool) -> Result<()> {
    let root = env::current_dir()?;
    let dir = root.join(PINNOTES_DIR);

    if dir.exists() {
        return Err(PinnotesError::AlreadyInitialized);
    }

    fs::create_dir_all(&dir)?;

    let config = Config {
        backend: if sqlite {
            BackendKind::Sqlite
        } else {
            BackendKind::File
        },
        ..Config::default()
    };
    config.save(&dir)?;

    println!(
        "Initialized pinnotes project in {} ({} backend)",
        root.display(),
        config.backend
    );

    Ok(())
}

pub fn handle_add(
    ctx: &mut AppContext,
    title: String,
    content: Option<String>,
    stdin: bool,
    remind: Option<String>,
    json: bool,
) -> Result<()> {
    let mut store = ctx.open_store()?;

    let content = if stdin {
        read_stdin()?
    } else {
        content.unwrap_or_default()
    };

    let mut draft = NoteDraft::new(title, content);
    draft.reminder = remind.as_deref().map(parse_reminder).transpose()?;

    let note = store.create(draft, ctx.config.placement)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&note)?);
    } else {
        ctx.report(
            Level::Success,
            format!("Created note {} - {}", note.id, note.title),
        );
    }

    Ok(())
}

pub fn handle_list(ctx: &mut AppContext, json: bool) -> Result<()> {
    let store = ctx.open_store()?;
    let notes = store.get_all();

    if json {
        println!("{}", serde_json::to_string_pretty(notes)?);
        return Ok(());
    }

    if notes.is_empty() {
        println!("No notes found.");
        return Ok(());
    }

    let (pinned, unpinned): (Vec<&Note>, Vec<&Note>) = notes.iter().partition(|n| n.pinned);

    if !pinned.is_empty() {
        println!("Pinned:\n");
        for n in &pinned {
            println!("{}", format_note_line(n));
        }
        if !unpinned.is_empty() {
            println!();
        }
    }

    if !unpinned.is_empty() {
        println!("Notes:\n");
        for n in &unpinned {
            println!("{}", format_note_line(n));
        }
    }

    Ok(())
}

pub fn handle_get(ctx: &mut AppContext, id: u64, json: bool) -> Result<()> {
    let store = ctx.open_store()?;
    let note = store.get(id).ok_or(PinnotesError::NotFound(id))?;

    if json {
        println!("{}", serde_json::to_string_pretty(note)?);
        return Ok(());
    }

    println!("Note {} - {}", note.id, note.title);
    println!(
        "  position: {} ({})",
        note.order,
        if note.pinned { "pinned" } else { "unpinned" }
    );
    if let Some(date) = reminder_date(note) {
        println!("  reminder: {}", date);
    }
    let body = note.content_lines();
    if !body.is_empty() {
        println!();
        println!("{}", body);
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub fn handle_edit(
    ctx: &mut AppContext,
    id: u64,
    title: Option<String>,
    content: Option<String>,
    stdin: bool,
    remind: Option<String>,
    clear_reminder: bool,
    json: bool,
) -> Result<()> {
    let mut store = ctx.open_store()?;
    let mut note = store.get(id).cloned().ok_or(PinnotesError::NotFound(id))?;

    let content = if stdin { Some(read_stdin()?) } else { content };

    if title.is_none() && content.is_none() && remind.is_none() && !clear_reminder {
        return Err(PinnotesError::InvalidArgument(
            "nothing to update; pass --title, --content, --stdin, --remind or --clear-reminder"
                .to_string(),
        ));
    }

    if let Some(title) = title {
        note.title = title;
    }
    if let Some(content) = content {
        note.content = normalize_content(&content);
    }
    if let Some(date) = remind {
        note.reminder = Some(parse_reminder(&date)?);
    } else if clear_reminder {
        note.reminder = None;
    }

    store.update(note.clone())?;

    if json {
        println!("{}", serde_json::to_string_pretty(&note)?);
    } else {
        ctx.report(
            Level::Success,
            format!("Updated note {} - {}", note.id, note.title),
        );
    }

    Ok(())
}

pub fn handle_remove(ctx: &mut AppContext, id: u64, force: bool) -> Result<()> {
    let mut store = ctx.open_store()?;
    let note = store.get(id).cloned().ok_or(PinnotesError::NotFound(id))?;

    // Confirm deletion unless --force is used
    if !force {
        eprintln!("Remove note {} - {}? [y/N] ", note.id, note.title);

        if atty::is(atty::Stream::Stdin) {
            let mut input = String::new();
            io::stdin().read_line(&mut input)?;
            if !input.trim().eq_ignore_ascii_case("y") {
                println!("Cancelled.");
                return Ok(());
            }
        } else {
            return Err(PinnotesError::InvalidArgument(
                "use --force to remove in non-interactive mode".to_string(),
            ));
        }
    }

    store.delete(id)?;

    ctx.report(
        Level::Success,
        format!("Removed note {} - {}", note.id, note.title),
    );

    Ok(())
}

pub fn handle_move(ctx: &mut AppContext, id: u64, position: u32) -> Result<()> {
    let mut store = ctx.open_store()?;
    store.reorder_after_drag(id, position)?;

    let note = store.get(id).ok_or(PinnotesError::NotFound(id))?;
    let message = format!(
        "Moved note {} - {} to position {}",
        note.id, note.title, note.order
    );
    ctx.report(Level::Success, message);

    Ok(())
}

pub fn handle_pin(ctx: &mut AppContext, id: u64) -> Result<()> {
    let mut store = ctx.open_store()?;
    let note = store.toggle_pin(id, ctx.config.pin_policy)?;

    let verb = if note.pinned { "Pinned" } else { "Unpinned" };
    ctx.report(
        Level::Success,
        format!("{} note {} - {}", verb, note.id, note.title),
    );

    Ok(())
}

pub fn handle_compact(ctx: &mut AppContext) -> Result<()> {
    let mut store = ctx.open_store()?;
    let changed = store.compact()?;

    if changed == 0 {
        ctx.report(Level::Info, "Nothing to compact.");
    } else {
        ctx.report(
            Level::Success,
            format!("Compacted: {} note(s) renumbered", changed),
        );
    }

    Ok(())
}

fn read_stdin() -> Result<String> {
    let mut content = String::new();
    io::stdin().read_to_string(&mut content)?;
    Ok(content.trim_end_matches(['\r', '\n']).to_string())
}

fn parse_reminder(date: &str) -> Result<Value> {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| {
        PinnotesError::InvalidArgument(format!("invalid reminder date '{}', expected YYYY-MM-DD", date))
    })?;
    Ok(reminder_on(date))
}

fn reminder_date(note: &Note) -> Option<&str> {
    note.reminder.as_ref()?.get("date")?.as_str()
}

fn format_note_line(note: &Note) -> String {
    let remind = reminder_date(note)
        .map(|d| format!(" (remind: {})", d))
        .unwrap_or_default();
    format!("  {:>3}. #{} {}{}", note.order, note.id, note.title, remind)
}
