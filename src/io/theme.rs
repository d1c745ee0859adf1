use crate::io::store::{KeyValueStore, StoreError};

/// Error type for theme color operations
#[derive(Debug, thiserror::Error)]
pub enum ThemeError {
    #[error("invalid color '{0}': use #rgb, #rrggbb or a color name")]
    InvalidColor(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Read the saved theme color, if any.
///
/// The value is stored as a JSON string; a bare string is accepted too.
/// Unreadable values are logged and ignored.
pub fn load_theme(store: &dyn KeyValueStore, key: &str) -> Option<String> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            log::error!("failed to read theme color under '{}': {}", key, e);
            return None;
        }
    };
    let color = serde_json::from_str::<String>(&raw).unwrap_or_else(|_| raw.trim().to_string());
    if is_valid_color(&color) {
        Some(color)
    } else {
        log::warn!("ignoring stored theme color {:?}", color);
        None
    }
}

/// Validate and store a theme color.
pub fn save_theme(store: &mut dyn KeyValueStore, key: &str, color: &str) -> Result<(), ThemeError> {
    let color = color.trim();
    if !is_valid_color(color) {
        return Err(ThemeError::InvalidColor(color.to_string()));
    }
    let blob = serde_json::to_string(color).map_err(StoreError::from)?;
    store.set(key, &blob)?;
    Ok(())
}

/// Forget the saved theme color.
pub fn clear_theme(store: &mut dyn KeyValueStore, key: &str) -> Result<(), ThemeError> {
    store.remove(key)?;
    Ok(())
}

/// `#rgb`, `#rrggbb`, or an alphabetic CSS color name
pub fn is_valid_color(color: &str) -> bool {
    match color.strip_prefix('#') {
        Some(hex) => matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => !color.is_empty() && color.chars().all(|c| c.is_ascii_alphabetic()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::store::MemoryStore;

    #[test]
    fn save_and_load() {
        let mut store = MemoryStore::new();
        assert_eq!(load_theme(&store, "themeColor"), None);
        save_theme(&mut store, "themeColor", " #4a90e2 ").unwrap();
        assert_eq!(store.get("themeColor").unwrap().as_deref(), Some("\"#4a90e2\""));
        assert_eq!(load_theme(&store, "themeColor").as_deref(), Some("#4a90e2"));
    }

    #[test]
    fn clear_forgets_color() {
        let mut store = MemoryStore::new();
        save_theme(&mut store, "themeColor", "navy").unwrap();
        clear_theme(&mut store, "themeColor").unwrap();
        assert_eq!(load_theme(&store, "themeColor"), None);
        clear_theme(&mut store, "themeColor").unwrap();
    }

    #[test]
    fn bare_string_value_is_accepted() {
        let mut store = MemoryStore::new();
        store.set("themeColor", "teal").unwrap();
        assert_eq!(load_theme(&store, "themeColor").as_deref(), Some("teal"));
    }

    #[test]
    fn invalid_colors() {
        let mut store = MemoryStore::new();
        for color in ["", "#12", "#ggg", "red;", "#1234567"] {
            assert!(
                matches!(
                    save_theme(&mut store, "themeColor", color),
                    Err(ThemeError::InvalidColor(_))
                ),
                "{:?} should be rejected",
                color
            );
        }
        store.set("themeColor", "\"url(x)\"").unwrap();
        assert_eq!(load_theme(&store, "themeColor"), None);
    }
}
