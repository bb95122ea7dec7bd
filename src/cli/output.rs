use serde::Serialize;

use crate::model::{Collection, ListItem};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct HeadJson<'a, T> {
    /// Empty for the standalone task head
    pub name: &'a str,
    pub items: &'a [T],
}

#[derive(Serialize)]
pub struct RolloverJson {
    pub date: String,
    pub habits: usize,
    pub tasks: usize,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

/// Heads in display order; the standalone head only when it has items
pub fn list_to_json<T: ListItem>(collection: &Collection<T>) -> Vec<HeadJson<'_, T>> {
    collection
        .heads()
        .iter()
        .enumerate()
        .filter(|(i, head)| !(collection.is_reserved(*i) && head.is_empty()))
        .map(|(_, head)| HeadJson {
            name: &head.name,
            items: head.items(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Text formatting
// ---------------------------------------------------------------------------

/// Plain-text listing, one line per head and item, same shape as the TUI
pub fn format_list<T: ListItem>(collection: &Collection<T>) -> Vec<String> {
    let mut lines = Vec::new();
    for (h, head) in collection.heads().iter().enumerate() {
        let reserved = collection.is_reserved(h);
        if reserved && head.is_empty() {
            continue;
        }
        if !lines.is_empty() {
            lines.push(String::new());
        }
        let indent = if reserved {
            ""
        } else {
            lines.push(format!("{}:", head.name));
            "  "
        };
        for (i, item) in head.items().iter().enumerate() {
            lines.push(format!("{}{}. {}", indent, i + 1, item.line()));
        }
    }
    lines
}
