use serde::Serialize;

use crate::model::filter::Filter;
use crate::model::item::Item;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct AddedJson {
    pub id: String,
}

#[derive(Serialize)]
pub struct ThemeJson {
    pub color: Option<String>,
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

/// Length of the id prefix shown in listings
pub const SHORT_ID_LEN: usize = 8;

/// First few characters of an id, enough to address it from the CLI
pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(SHORT_ID_LEN) {
        Some((end, _)) => &id[..end],
        None => id,
    }
}

fn checkbox(completed: bool) -> &'static str {
    if completed { "[x]" } else { "[ ]" }
}

/// Format one item as `[x] shortid  text`
pub fn format_item_line(item: &Item) -> String {
    format!(
        "{} {:<width$}  {}",
        checkbox(item.completed),
        short_id(&item.id),
        item.text,
        width = SHORT_ID_LEN
    )
}

/// Format the visible list, with a footer counting what's left to do
pub fn format_listing(items: &[&Item], filter: Filter, active_total: usize) -> Vec<String> {
    let mut lines: Vec<String> = items.iter().map(|&item| format_item_line(item)).collect();
    if items.is_empty() {
        lines.push(match filter {
            Filter::All => "(empty)".to_string(),
            other => format!("(no {} items)", other),
        });
    }
    let noun = if active_total == 1 { "item" } else { "items" };
    lines.push(format!("{} {} left", active_total, noun));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, text: &str, completed: bool) -> Item {
        Item {
            id: id.into(),
            text: text.into(),
            completed,
            order: 0.0,
        }
    }

    #[test]
    fn short_id_truncates_long_ids() {
        assert_eq!(short_id("0123456789abcdef"), "01234567");
        assert_eq!(short_id("abc"), "abc");
    }

    #[test]
    fn item_lines() {
        let open = item("5f1c2a9e-0000-4000-8000-000000000000", "Buy milk", false);
        let done = item("b1", "Walk dog", true);
        insta::assert_snapshot!(format_item_line(&open), @"[ ] 5f1c2a9e  Buy milk");
        insta::assert_snapshot!(format_item_line(&done), @"[x] b1        Walk dog");
    }

    #[test]
    fn listing_footer_and_empty_state() {
        let a = item("aaaaaaaa-1", "One", false);
        let lines = format_listing(&[&a], Filter::All, 1);
        assert_eq!(lines, vec!["[ ] aaaaaaaa  One", "1 item left"]);

        let lines = format_listing(&[], Filter::Completed, 3);
        assert_eq!(lines, vec!["(no completed items)", "3 items left"]);

        let lines = format_listing(&[], Filter::All, 0);
        assert_eq!(lines, vec!["(empty)", "0 items left"]);
    }
}
