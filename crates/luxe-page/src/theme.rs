#![forbid(unsafe_code)]

//! Theme preference with persistence.
//!
//! The preference is read once at startup (defaulting to light when the
//! store is empty or unreadable) and written on every toggle. Stores are
//! pluggable behind [`ThemeStore`]: tests use [`MemoryStore`], hosts with
//! a filesystem can use the JSON-backed [`FileStore`].

use std::collections::HashMap;
use std::fmt;
use std::sync::RwLock;

use luxe_core::dom::Document;
use luxe_core::effect::Effect;

/// Storage key for the saved preference.
pub const THEME_KEY: &str = "theme";

/// Delay before page transitions are restored after the startup
/// attribute swap, in milliseconds.
pub const TRANSITION_RESTORE_MS: u64 = 100;

/// The two supported color schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemePreference {
    #[default]
    Light,
    Dark,
}

impl ThemePreference {
    /// The wire form stored under [`THEME_KEY`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Parse a stored value. Unknown strings are `None`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    /// The other scheme.
    #[must_use]
    pub const fn flip(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure while reading or writing a preference store.
#[derive(Debug)]
pub enum StoreError {
    /// Underlying I/O failed.
    Io(std::io::Error),
    /// Stored bytes were not valid for the expected format.
    Corrupt(String),
    /// Encoding or decoding the store document failed.
    #[cfg(feature = "persist-file")]
    Serialization(serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "store i/o error: {e}"),
            Self::Corrupt(msg) => write!(f, "store corrupt: {msg}"),
            #[cfg(feature = "persist-file")]
            Self::Serialization(e) => write!(f, "store serialization error: {e}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Corrupt(_) => None,
            #[cfg(feature = "persist-file")]
            Self::Serialization(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(feature = "persist-file")]
impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e)
    }
}

/// Key-value store for small page preferences.
pub trait ThemeStore {
    /// Read a value, `Ok(None)` when the key is absent.
    fn load(&self, key: &str) -> Result<Option<String>, StoreError>;
    /// Write a value.
    fn save(&self, key: &str, value: &str) -> Result<(), StoreError>;
    /// Short backend name for logging.
    fn name(&self) -> &'static str;
}

/// In-memory store. The default for tests and headless runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ThemeStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        let values = self
            .values
            .read()
            .map_err(|_| StoreError::Corrupt("store lock poisoned".into()))?;
        Ok(values.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut values = self
            .values
            .write()
            .map_err(|_| StoreError::Corrupt("store lock poisoned".into()))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

/// JSON file store with atomic writes (write-to-temp, then rename).
#[cfg(feature = "persist-file")]
#[derive(Debug)]
pub struct FileStore {
    path: std::path::PathBuf,
}

#[cfg(feature = "persist-file")]
impl FileStore {
    #[must_use]
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_map(&self) -> Result<HashMap<String, String>, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(feature = "persist-file")]
impl ThemeStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read_map()?.remove(key))
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut map = self.read_map()?;
        map.insert(key.to_string(), value.to_string());
        let encoded = serde_json::to_string_pretty(&map)?;
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, encoded)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "json-file"
    }
}

/// Controller for the dark mode toggle.
pub struct ThemeController {
    store: Box<dyn ThemeStore>,
    current: ThemePreference,
}

impl fmt::Debug for ThemeController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeController")
            .field("store", &self.store.name())
            .field("current", &self.current)
            .finish()
    }
}

impl ThemeController {
    /// Load the saved preference, defaulting to light. Store read
    /// failures are logged and treated as absent.
    #[must_use]
    pub fn new(store: Box<dyn ThemeStore>) -> Self {
        let current = match store.load(THEME_KEY) {
            Ok(Some(value)) => ThemePreference::parse(&value).unwrap_or_default(),
            Ok(None) => ThemePreference::default(),
            Err(e) => {
                luxe_core::warn!(store = store.name(), error = %e, "theme load failed");
                ThemePreference::default()
            }
        };
        Self { store, current }
    }

    #[must_use]
    pub fn current(&self) -> ThemePreference {
        self.current
    }

    /// Apply the loaded preference to the page at startup.
    ///
    /// Transitions are suppressed on the root element so the attribute
    /// swap does not animate; the caller restores them after
    /// [`TRANSITION_RESTORE_MS`].
    pub fn startup(&self, doc: &Document) -> Vec<Effect> {
        let mut effects = Vec::new();
        if let Some(html) = doc.by_tag("html").first().copied() {
            effects.push(Effect::set_style(html, "transition", "none"));
            effects.push(Effect::SetAttr {
                node: html,
                name: "data-theme".into(),
                value: self.current.as_str().into(),
            });
        }
        effects.extend(self.toggle_button_effects(doc));
        effects
    }

    /// Clear the startup transition suppression.
    pub fn restore_transitions(&self, doc: &Document) -> Vec<Effect> {
        match doc.by_tag("html").first().copied() {
            Some(html) => vec![Effect::clear_style(html, "transition")],
            None => Vec::new(),
        }
    }

    /// Flip the preference, persist it, and restyle the page.
    pub fn toggle(&mut self, doc: &Document) -> Vec<Effect> {
        self.current = self.current.flip();
        if let Err(e) = self.store.save(THEME_KEY, self.current.as_str()) {
            luxe_core::warn!(store = self.store.name(), error = %e, "theme save failed");
        }

        let mut effects = Vec::new();
        if let Some(html) = doc.by_tag("html").first().copied() {
            effects.push(Effect::SetAttr {
                node: html,
                name: "data-theme".into(),
                value: self.current.as_str().into(),
            });
        }
        effects.push(Effect::Persist {
            key: THEME_KEY.into(),
            value: self.current.as_str().into(),
        });
        effects.extend(self.toggle_button_effects(doc));
        effects
    }

    fn toggle_button_effects(&self, doc: &Document) -> Vec<Effect> {
        let Some(button) = doc.by_id("darkModeToggle") else {
            return Vec::new();
        };
        match self.current {
            ThemePreference::Dark => vec![Effect::add_class(button, "dark-active")],
            ThemePreference::Light => vec![Effect::remove_class(button, "dark-active")],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use luxe_core::dom::ElementSpec;
    use luxe_core::effect::apply_all;

    fn page() -> Document {
        let mut doc = Document::new();
        let html = doc.append(None, ElementSpec::new("html"));
        doc.append(Some(html), ElementSpec::new("button").dom_id("darkModeToggle"));
        doc
    }

    fn store_with(value: &str) -> Box<MemoryStore> {
        let store = MemoryStore::new();
        store.save(THEME_KEY, value).unwrap();
        Box::new(store)
    }

    #[test]
    fn defaults_to_light_on_empty_store() {
        let theme = ThemeController::new(Box::new(MemoryStore::new()));
        assert_eq!(theme.current(), ThemePreference::Light);
    }

    #[test]
    fn loads_saved_dark_preference() {
        let theme = ThemeController::new(store_with("dark"));
        assert_eq!(theme.current(), ThemePreference::Dark);
    }

    #[test]
    fn garbage_in_store_falls_back_to_light() {
        let theme = ThemeController::new(store_with("sepia"));
        assert_eq!(theme.current(), ThemePreference::Light);
    }

    #[test]
    fn startup_suppresses_transitions_and_sets_attr() {
        let mut doc = page();
        let theme = ThemeController::new(store_with("dark"));
        apply_all(&theme.startup(&doc), &mut doc);

        let html = doc.by_tag("html")[0];
        assert_eq!(doc.style(html, "transition"), Some("none"));
        assert_eq!(doc.attr(html, "data-theme"), Some("dark"));
        let button = doc.by_id("darkModeToggle").unwrap();
        assert!(doc.has_class(button, "dark-active"));

        apply_all(&theme.restore_transitions(&doc), &mut doc);
        assert_eq!(doc.style(html, "transition"), None);
    }

    #[test]
    fn toggle_flips_and_persists() {
        let mut doc = page();
        let mut theme = ThemeController::new(Box::new(MemoryStore::new()));

        let effects = theme.toggle(&doc);
        apply_all(&effects, &mut doc);
        assert_eq!(theme.current(), ThemePreference::Dark);
        assert!(effects.contains(&Effect::Persist {
            key: "theme".into(),
            value: "dark".into(),
        }));
        let html = doc.by_tag("html")[0];
        assert_eq!(doc.attr(html, "data-theme"), Some("dark"));
    }

    #[test]
    fn double_toggle_round_trips_to_light() {
        let mut doc = page();
        let mut theme = ThemeController::new(Box::new(MemoryStore::new()));

        apply_all(&theme.toggle(&doc), &mut doc);
        let effects = theme.toggle(&doc);
        apply_all(&effects, &mut doc);

        assert_eq!(theme.current(), ThemePreference::Light);
        assert!(effects.contains(&Effect::Persist {
            key: "theme".into(),
            value: "light".into(),
        }));
        let button = doc.by_id("darkModeToggle").unwrap();
        assert!(!doc.has_class(button, "dark-active"));
    }

    #[test]
    fn preference_string_round_trip() {
        for pref in [ThemePreference::Light, ThemePreference::Dark] {
            assert_eq!(ThemePreference::parse(pref.as_str()), Some(pref));
        }
        assert_eq!(ThemePreference::parse(""), None);
    }

    #[cfg(feature = "persist-file")]
    #[test]
    fn file_store_round_trips_atomically() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        let store = FileStore::new(&path);

        assert_eq!(store.load(THEME_KEY).unwrap(), None);
        store.save(THEME_KEY, "dark").unwrap();
        assert_eq!(store.load(THEME_KEY).unwrap().as_deref(), Some("dark"));

        // A fresh handle sees the persisted value.
        let reopened = FileStore::new(&path);
        assert_eq!(reopened.load(THEME_KEY).unwrap().as_deref(), Some("dark"));
        assert!(!path.with_extension("tmp").exists());
    }
}
