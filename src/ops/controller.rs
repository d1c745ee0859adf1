use indexmap::IndexMap;

use crate::io::persistence;
use crate::io::store::{KeyValueStore, StoreError};
use crate::model::config::ListConfig;
use crate::model::filter::Filter;
use crate::model::item::{Item, new_id, now_millis};
use crate::ops::placement;

/// Callback invoked after every state change with the visible items
pub type Renderer = Box<dyn FnMut(&[&Item], Filter)>;

/// Error type for resolving a user-supplied id or id prefix
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("item not found: {0}")]
    NotFound(String),
    #[error("id prefix '{prefix}' matches {count} items")]
    Ambiguous { prefix: String, count: usize },
}

/// Owns the item collection and the current filter.
///
/// Every mutating operation persists the whole collection through the
/// store and then re-renders. Lookup misses and blank text are no-ops,
/// reported through the return value; only store failures are errors.
pub struct ListController<S: KeyValueStore> {
    items: IndexMap<String, Item>,
    filter: Filter,
    store: S,
    config: ListConfig,
    renderer: Option<Renderer>,
    clock: fn() -> f64,
}

impl<S: KeyValueStore> ListController<S> {
    /// Load the stored items. The filter always starts at `all`.
    pub fn open(store: S, config: ListConfig) -> Self {
        let loaded = persistence::load(
            &store,
            &config.storage.items_key,
            config.items.validation,
        );
        let items = loaded
            .into_iter()
            .map(|item| (item.id.clone(), item))
            .collect();
        ListController {
            items,
            filter: Filter::All,
            store,
            config,
            renderer: None,
            clock: now_millis,
        }
    }

    /// Replace the time source used for new order keys.
    pub fn with_clock(mut self, clock: fn() -> f64) -> Self {
        self.clock = clock;
        self
    }

    /// Install the render callback and render once.
    pub fn set_renderer(&mut self, renderer: impl FnMut(&[&Item], Filter) + 'static) {
        self.renderer = Some(Box::new(renderer));
        self.render();
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Item> {
        self.items.get(id)
    }

    /// All items in storage order, ignoring the filter
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    /// Add an item with trimmed `text`. Returns the new id, or `None` when
    /// the text is blank.
    pub fn add(&mut self, text: &str) -> Result<Option<String>, StoreError> {
        let text = text.trim();
        if text.is_empty() {
            log::debug!("ignoring blank add");
            return Ok(None);
        }
        let mut id = new_id();
        while self.items.contains_key(&id) {
            id = new_id();
        }
        let item = Item::create(id.clone(), text.to_string(), (self.clock)());
        self.items.insert(id.clone(), item);
        self.commit()?;
        log::info!("added item {}", id);
        Ok(Some(id))
    }

    /// Replace the text of item `id`. Returns whether an item changed.
    pub fn edit(&mut self, id: &str, new_text: &str) -> Result<bool, StoreError> {
        let text = if self.config.items.allow_empty_edit {
            new_text
        } else {
            let trimmed = new_text.trim();
            if trimmed.is_empty() {
                log::debug!("ignoring blank edit of {}", id);
                return Ok(false);
            }
            trimmed
        };
        let Some(item) = self.items.get_mut(id) else {
            return Ok(false);
        };
        item.text = text.to_string();
        self.commit()?;
        Ok(true)
    }

    /// Remove item `id`. The collection is saved even when nothing matched.
    pub fn delete(&mut self, id: &str) -> Result<bool, StoreError> {
        let removed = self.items.shift_remove(id).is_some();
        self.commit()?;
        if removed {
            log::info!("deleted item {}", id);
        }
        Ok(removed)
    }

    /// Flip the completed flag of item `id`. Returns whether an item changed.
    pub fn toggle_complete(&mut self, id: &str) -> Result<bool, StoreError> {
        let Some(item) = self.items.get_mut(id) else {
            return Ok(false);
        };
        item.completed = !item.completed;
        self.commit()?;
        Ok(true)
    }

    /// Remove every completed item. Returns how many were removed.
    pub fn clear_completed(&mut self) -> Result<usize, StoreError> {
        let before = self.items.len();
        self.items.retain(|_, item| !item.completed);
        let removed = before - self.items.len();
        if removed > 0 {
            self.commit()?;
        }
        Ok(removed)
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
        self.render();
    }

    /// Items passing the current filter, ascending by order key. Items with
    /// equal keys keep their storage order.
    pub fn visible_items(&self) -> Vec<&Item> {
        visible(&self.items, self.filter)
    }

    /// Reassign order keys so that ascending order follows `id_sequence`.
    ///
    /// Position `i` gets `now + i`. Unknown ids are skipped but still take
    /// up their position; items missing from the sequence keep their keys.
    pub fn reorder<T: AsRef<str>>(&mut self, id_sequence: &[T]) -> Result<(), StoreError> {
        let now = (self.clock)();
        for (index, id) in id_sequence.iter().enumerate() {
            match self.items.get_mut(id.as_ref()) {
                Some(item) => item.order = now + index as f64,
                None => log::debug!("reorder: unknown id {}", id.as_ref()),
            }
        }
        self.items.sort_by(|_, a, _, b| a.order.total_cmp(&b.order));
        self.commit()
    }

    /// Reorder from a drag over the filtered view. `visible_sequence` is the
    /// new order of the visible items only; hidden items keep their slots
    /// in the unfiltered order and the full permutation goes to
    /// [`reorder`](Self::reorder).
    pub fn reorder_visible<T: AsRef<str>>(
        &mut self,
        visible_sequence: &[T],
    ) -> Result<(), StoreError> {
        let full: Vec<&str> = visible(&self.items, Filter::All)
            .into_iter()
            .map(|item| item.id.as_str())
            .collect();
        let merged = placement::merge_visible(full.as_slice(), visible_sequence);
        self.reorder(merged.as_slice())
    }

    /// Resolve an exact id or a unique id prefix.
    pub fn resolve(&self, prefix: &str) -> Result<String, LookupError> {
        if self.items.contains_key(prefix) {
            return Ok(prefix.to_string());
        }
        let matches: Vec<&String> = if prefix.is_empty() {
            Vec::new()
        } else {
            self.items
                .keys()
                .filter(|id| id.starts_with(prefix))
                .collect()
        };
        match matches.as_slice() {
            [] => Err(LookupError::NotFound(prefix.to_string())),
            [id] => Ok((*id).clone()),
            _ => Err(LookupError::Ambiguous {
                prefix: prefix.to_string(),
                count: matches.len(),
            }),
        }
    }

    fn commit(&mut self) -> Result<(), StoreError> {
        persistence::save(
            &mut self.store,
            &self.config.storage.items_key,
            self.items.values(),
        )?;
        self.render();
        Ok(())
    }

    fn render(&mut self) {
        if let Some(renderer) = self.renderer.as_mut() {
            let items = visible(&self.items, self.filter);
            renderer(&items, self.filter);
        }
    }
}

fn visible(items: &IndexMap<String, Item>, filter: Filter) -> Vec<&Item> {
    let mut out: Vec<&Item> = items.values().filter(|item| filter.matches(item)).collect();
    out.sort_by(|a, b| a.order.total_cmp(&b.order));
    out
}
