//! Backing settings domains
//!
//! The store reaches the host's settings mechanism through
//! [`SettingsBackend`], a narrow capability trait over a flat string-keyed
//! dictionary. One adapter exists per storage mechanism: [`JsonFileBackend`]
//! persists the domain as a single JSON document in the per-application
//! configuration directory, [`MemoryBackend`] keeps it in process memory.
//!
//! A domain is identified by application, never opened or closed: every
//! call acquires it fresh and commits before returning.

use crate::error::BackendError;
use crate::value::PrefValue;
use log::{debug, warn};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Application identity naming a backing domain
///
/// Follows the [XDG Base Directory Specification](https://specifications.freedesktop.org/basedir-spec/basedir-spec-latest.html)
/// on Linux and similar conventions on other platforms.
#[derive(Clone, Debug)]
pub struct AppName {
    pub qualifier: String,
    pub organization: String,
    pub application: String,
}

impl AppName {
    /// Create a new application name
    ///
    /// # Example
    ///
    /// ```
    /// use channel_preferences_plugin::AppName;
    ///
    /// let app_name = AppName::new("com", "acme", "roadrunner");
    /// ```
    pub fn new(
        qualifier: impl Into<String>,
        organization: impl Into<String>,
        application: impl Into<String>,
    ) -> Self {
        Self {
            qualifier: qualifier.into(),
            organization: organization.into(),
            application: application.into(),
        }
    }
}

/// Durable string-keyed dictionary owned by the host environment.
///
/// Implementations must make writes visible to every subsequent read once
/// the call returns. The store layered on top performs no coordination of
/// its own; snapshot consistency of `entries` and atomicity of a single
/// key's write are whatever the adapter provides.
pub trait SettingsBackend: Send + Sync {
    /// Read one entry
    fn get(&self, key: &str) -> Result<Option<PrefValue>, BackendError>;

    /// Create or overwrite one entry
    fn set(&self, key: &str, value: PrefValue) -> Result<(), BackendError>;

    /// Delete one entry if present
    fn remove(&self, key: &str) -> Result<(), BackendError>;

    /// Enumerate every entry in the domain
    fn entries(&self) -> Result<Vec<(String, PrefValue)>, BackendError>;
}

/// File-backed settings domain.
///
/// The whole domain lives in one JSON object; every operation loads it,
/// mutates, and writes it back synchronously.
#[derive(Clone, Debug)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    /// Open the domain for an application identity.
    ///
    /// The file lives in the platform configuration directory:
    /// - Linux: `$XDG_CONFIG_HOME/<app>/preferences.json` or `~/.config/<app>/preferences.json`
    /// - macOS: `~/Library/Application Support/<app>/preferences.json`
    /// - Windows: `%APPDATA%\<app>\preferences.json`
    pub fn new(app_name: &AppName) -> Self {
        let path = directories::ProjectDirs::from(
            app_name.qualifier.as_str(),
            app_name.organization.as_str(),
            app_name.application.as_str(),
        )
        .map(|dirs| dirs.config_local_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
        .join("preferences.json");

        Self { path }
    }

    /// Open the domain at an explicit file path
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load(&self) -> Result<HashMap<String, PrefValue>, BackendError> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }

        let contents = fs::read_to_string(&self.path)?;
        if contents.is_empty() {
            return Ok(HashMap::new());
        }

        serde_json::from_str(&contents).map_err(|e| {
            warn!("settings domain at {} is malformed: {}", self.path.display(), e);
            BackendError::from(e)
        })
    }

    fn commit(&self, data: &HashMap<String, PrefValue>) -> Result<(), BackendError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, contents)?;
        debug!("committed {} entries to {}", data.len(), self.path.display());
        Ok(())
    }

    /// Load the domain, apply a modification, and commit only if the
    /// modifier reports a change.
    fn modify<F>(&self, modifier: F) -> Result<(), BackendError>
    where
        F: FnOnce(&mut HashMap<String, PrefValue>) -> bool,
    {
        let mut data = self.load()?;
        if modifier(&mut data) {
            self.commit(&data)?;
        }
        Ok(())
    }
}

impl SettingsBackend for JsonFileBackend {
    fn get(&self, key: &str) -> Result<Option<PrefValue>, BackendError> {
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: PrefValue) -> Result<(), BackendError> {
        self.modify(|data| {
            data.insert(key.to_string(), value);
            true
        })
    }

    fn remove(&self, key: &str) -> Result<(), BackendError> {
        self.modify(|data| data.remove(key).is_some())
    }

    fn entries(&self) -> Result<Vec<(String, PrefValue)>, BackendError> {
        Ok(self.load()?.into_iter().collect())
    }
}

/// In-process settings domain.
///
/// Clones share the same underlying map, so a handle kept by a test or a
/// co-tenant observes writes made through the store.
#[derive(Clone, Debug, Default)]
pub struct MemoryBackend {
    entries: Arc<Mutex<HashMap<String, PrefValue>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, PrefValue>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SettingsBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<PrefValue>, BackendError> {
        Ok(self.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: PrefValue) -> Result<(), BackendError> {
        self.lock().insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), BackendError> {
        self.lock().remove(key);
        Ok(())
    }

    fn entries(&self) -> Result<Vec<(String, PrefValue)>, BackendError> {
        Ok(self.lock().iter().map(|(k, v)| (k.clone(), v.clone())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn temp_backend() -> (tempfile::TempDir, JsonFileBackend) {
        let dir = tempfile::tempdir().unwrap();
        let backend = JsonFileBackend::with_path(dir.path().join("preferences.json"));
        (dir, backend)
    }

    #[test]
    fn missing_file_reads_as_empty_domain() {
        let (_dir, backend) = temp_backend();
        assert_eq!(backend.get("any").unwrap(), None);
        assert!(backend.entries().unwrap().is_empty());
    }

    #[test]
    fn set_then_get_round_trips_every_kind() {
        let (_dir, backend) = temp_backend();
        let values = [
            PrefValue::Bool(true),
            PrefValue::Double(2.25),
            PrefValue::Int(-40),
            PrefValue::from("hello"),
            PrefValue::StringList(vec!["a".into(), "b".into()]),
            PrefValue::Bytes(vec![1, 2, 3]),
        ];

        for (i, value) in values.iter().enumerate() {
            let key = format!("key{}", i);
            backend.set(&key, value.clone()).unwrap();
            assert_eq!(backend.get(&key).unwrap().as_ref(), Some(value));
        }
    }

    #[test]
    fn writes_survive_reopening_the_domain() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");

        JsonFileBackend::with_path(&path)
            .set("app.theme", PrefValue::from("dark"))
            .unwrap();

        let reopened = JsonFileBackend::with_path(&path);
        assert_eq!(
            reopened.get("app.theme").unwrap(),
            Some(PrefValue::from("dark"))
        );
    }

    #[test]
    fn remove_absent_key_does_not_touch_the_file() {
        let (_dir, backend) = temp_backend();
        backend.remove("nothing").unwrap();
        assert!(!backend.path.exists());
    }

    #[test]
    fn memory_clones_share_state() {
        let backend = MemoryBackend::new();
        let view = backend.clone();

        backend.set("k", PrefValue::Int(9)).unwrap();
        assert_eq!(view.get("k").unwrap(), Some(PrefValue::Int(9)));

        view.remove("k").unwrap();
        assert_eq!(backend.get("k").unwrap(), None);
    }
}
