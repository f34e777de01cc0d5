//! Theme Store
//!
//! Holds the active theme, persists it under the `theme` key and notifies
//! observers through a watch channel.

use tokio::sync::watch;

use crate::model::Theme;
use crate::store::KeyValueStore;

/// Key the theme preference is stored under
pub const THEME_KEY: &str = "theme";

/// Current theme plus its persistence
pub struct ThemeStore {
    store: Box<dyn KeyValueStore>,
    tx: watch::Sender<Theme>,
}

impl ThemeStore {
    /// Create a store, restoring the persisted theme.
    ///
    /// Missing, unknown or unreadable values fall back to `light`.
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        let theme = match store.get(THEME_KEY) {
            Ok(Some(value)) => Theme::from_key(&value),
            Ok(None) => Theme::default(),
            Err(e) => {
                tracing::warn!("Failed to read theme preference: {}", e);
                Theme::default()
            }
        };

        tracing::debug!(theme = %theme, "Restored theme");
        let (tx, _) = watch::channel(theme);
        Self { store, tx }
    }

    pub fn get(&self) -> Theme {
        *self.tx.borrow()
    }

    /// Set, persist and broadcast the theme.
    ///
    /// A failed write is logged; the in-memory theme still changes.
    pub fn set(&mut self, theme: Theme) {
        if let Err(e) = self.store.set(THEME_KEY, theme.as_key()) {
            tracing::warn!("Failed to persist theme {}: {}", theme, e);
        }

        self.tx.send_replace(theme);
        tracing::info!(theme = %theme, "Theme changed");
    }

    /// Switch to the other theme and return it
    pub fn toggle(&mut self) -> Theme {
        let next = self.get().toggle();
        self.set(next);
        next
    }

    /// Receive every subsequent theme change
    pub fn subscribe(&self) -> watch::Receiver<Theme> {
        self.tx.subscribe()
    }

    pub fn observer_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, StoreError, StoreResult};
    use std::sync::{Arc, Mutex};

    /// Store whose contents can be inspected after it is moved into ThemeStore
    #[derive(Clone, Default)]
    struct SharedStore(Arc<Mutex<MemoryStore>>);

    impl KeyValueStore for SharedStore {
        fn get(&self, key: &str) -> StoreResult<Option<String>> {
            self.0.lock().unwrap().get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
            self.0.lock().unwrap().set(key, value)
        }
    }

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> StoreResult<Option<String>> {
            Err(StoreError::Serialization("broken".to_string()))
        }

        fn set(&mut self, _key: &str, _value: &str) -> StoreResult<()> {
            Err(StoreError::Io(std::io::Error::other("read-only")))
        }
    }

    #[test]
    fn test_defaults_to_light() {
        let themes = ThemeStore::new(Box::new(MemoryStore::new()));
        assert_eq!(themes.get(), Theme::Light);
    }

    #[test]
    fn test_restores_persisted_theme() {
        let themes = ThemeStore::new(Box::new(MemoryStore::new().with(THEME_KEY, "dark")));
        assert_eq!(themes.get(), Theme::Dark);

        let themes = ThemeStore::new(Box::new(MemoryStore::new().with(THEME_KEY, "sepia")));
        assert_eq!(themes.get(), Theme::Light);
    }

    #[test]
    fn test_set_persists() {
        let shared = SharedStore::default();
        let mut themes = ThemeStore::new(Box::new(shared.clone()));

        themes.set(Theme::Dark);
        assert_eq!(themes.get(), Theme::Dark);
        assert_eq!(shared.get(THEME_KEY).unwrap().as_deref(), Some("dark"));

        assert_eq!(themes.toggle(), Theme::Light);
        assert_eq!(shared.get(THEME_KEY).unwrap().as_deref(), Some("light"));
    }

    #[test]
    fn test_observers_are_notified() {
        let mut themes = ThemeStore::new(Box::new(MemoryStore::new()));
        let mut rx = themes.subscribe();
        assert_eq!(themes.observer_count(), 1);
        assert!(!rx.has_changed().unwrap());

        themes.set(Theme::Dark);
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), Theme::Dark);
    }

    #[test]
    fn test_broken_store_does_not_block_change() {
        let mut themes = ThemeStore::new(Box::new(BrokenStore));
        assert_eq!(themes.get(), Theme::Light);

        themes.set(Theme::Dark);
        assert_eq!(themes.get(), Theme::Dark);
    }
}
