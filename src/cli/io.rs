//! Text rendering of the client page for the terminal
//!
//! The page has four regions: the statement list (or its empty-state
//! placeholder), the message line, the inference panel and the truth-table
//! panel. Blank regions render as nothing.

use std::io::Write;

use crate::kb::{MessageSeverity, Snapshot, StatusMessage};
use crate::render::PanelContent;

use super::errors::CliResult;

/// Shown in place of the list while the knowledge base is empty
pub const EMPTY_PLACEHOLDER: &str = "No statements yet. Add one to get started.";

/// Numbered statement list with ids, or the placeholder
pub fn render_statements(snapshot: &Snapshot) -> String {
    if snapshot.placeholder_visible {
        return format!("{}\n", EMPTY_PLACEHOLDER);
    }
    let mut out = String::new();
    for (i, statement) in snapshot.statements.iter().enumerate() {
        out.push_str(&format!("{:>3}. {}  [{}]\n", i + 1, statement.text, statement.id));
    }
    out
}

pub fn render_message(message: &StatusMessage) -> String {
    if message.is_blank() {
        return String::new();
    }
    match message.severity {
        MessageSeverity::Muted => format!("{}\n", message.text),
        MessageSeverity::Success => format!("ok: {}\n", message.text),
        MessageSeverity::Error => format!("error: {}\n", message.text),
    }
}

fn render_panel(title: &str, content: &PanelContent) -> String {
    if *content == PanelContent::Blank {
        return String::new();
    }
    format!("== {} ==\n{}", title, content.to_text())
}

/// The whole page
pub fn render_page(snapshot: &Snapshot) -> String {
    let mut out = format!("== Knowledge Base ({}) ==\n", snapshot.view_state);
    out.push_str(&render_statements(snapshot));
    out.push_str(&render_message(&snapshot.message));
    out.push_str(&render_panel("Inference", &snapshot.inference));
    out.push_str(&render_panel("Truth Table", &snapshot.truth_table));
    out
}

/// Write `text` and flush
pub fn write_text<W: Write>(out: &mut W, text: &str) -> CliResult<()> {
    out.write_all(text.as_bytes())?;
    out.flush()?;
    Ok(())
}
