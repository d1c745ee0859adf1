//! Drag-and-drop placement: which row does a dragged row land before?
//!
//! Rows are described by their vertical extent only, so the same logic
//! serves any renderer that can report row boxes.

use std::collections::HashSet;

/// Vertical extent of one rendered row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowBox<'a> {
    pub id: &'a str,
    pub top: f64,
    pub height: f64,
}

impl RowBox<'_> {
    pub fn center(&self) -> f64 {
        self.top + self.height / 2.0
    }
}

/// Find the row the dragged row should be inserted before.
///
/// `rows` must not include the dragged row. The anchor is the row whose
/// center is the closest one still below `pointer_y`; on equal offsets the
/// first row in document order wins. `None` means the pointer is below
/// every center and the dragged row goes last.
pub fn insertion_anchor<'r, 'a>(pointer_y: f64, rows: &'r [RowBox<'a>]) -> Option<&'r RowBox<'a>> {
    let mut best = None;
    let mut best_offset = f64::NEG_INFINITY;
    for row in rows {
        let offset = pointer_y - row.center();
        if offset < 0.0 && offset > best_offset {
            best_offset = offset;
            best = Some(row);
        }
    }
    best
}

/// Move `dragged` within `visual` so it sits immediately before `anchor`,
/// or last when there is no anchor (or the anchor is not in the list).
pub fn drop_sequence<S: AsRef<str>>(visual: &[S], dragged: &str, anchor: Option<&str>) -> Vec<String> {
    let mut ids: Vec<String> = visual
        .iter()
        .map(|s| s.as_ref())
        .filter(|id| *id != dragged)
        .map(str::to_string)
        .collect();
    let at = anchor
        .and_then(|a| ids.iter().position(|id| id == a))
        .unwrap_or(ids.len());
    ids.insert(at, dragged.to_string());
    ids
}

/// Lay out equal-height rows top to bottom starting at y = 0.
pub fn uniform_rows<'a, S: AsRef<str>>(ids: &'a [S], row_height: f64) -> Vec<RowBox<'a>> {
    ids.iter()
        .enumerate()
        .map(|(i, id)| RowBox {
            id: id.as_ref(),
            top: i as f64 * row_height,
            height: row_height,
        })
        .collect()
}

/// Compute the id order after dropping `dragged` at `pointer_y` over a list
/// of equal-height rows. The other rows are laid out without the dragged
/// one, so with `row_height = 1.0` a pointer at `n` lands the row at index
/// `n`.
pub fn drag_to<S: AsRef<str>>(
    visual: &[S],
    dragged: &str,
    pointer_y: f64,
    row_height: f64,
) -> Vec<String> {
    let others: Vec<&str> = visual
        .iter()
        .map(|s| s.as_ref())
        .filter(|id| *id != dragged)
        .collect();
    let rows = uniform_rows(others.as_slice(), row_height);
    let anchor = insertion_anchor(pointer_y, &rows).map(|row| row.id);
    drop_sequence(visual, dragged, anchor)
}

/// Put a reordered subset back into the full order.
///
/// Each slot of `full` held by an id from `reordered` is refilled, in
/// sequence, from `reordered`; every other id stays where it was. Ids in
/// `reordered` that are not in `full` are dropped.
pub fn merge_visible<S: AsRef<str>, T: AsRef<str>>(full: &[S], reordered: &[T]) -> Vec<String> {
    let moved: HashSet<&str> = reordered
        .iter()
        .map(|s| s.as_ref())
        .filter(|id| full.iter().any(|f| f.as_ref() == *id))
        .collect();
    let mut next = reordered
        .iter()
        .map(|s| s.as_ref())
        .filter(|id| moved.contains(id));
    full.iter()
        .map(|s| s.as_ref())
        .map(|id| {
            let id = if moved.contains(id) {
                next.next().unwrap_or(id)
            } else {
                id
            };
            id.to_string()
        })
        .collect()
}
