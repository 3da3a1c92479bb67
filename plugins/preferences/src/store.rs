//! Prefix-scoped preference store
//!
//! [`PreferenceStore`] owns a namespace inside a shared settings domain:
//! every key it writes carries the namespace prefix, and every read, list,
//! or delete is filtered to that prefix. Entries outside the namespace
//! belong to other tenants of the same domain and are never observed or
//! touched.

use crate::backend::SettingsBackend;
use crate::error::{PreferencesError, Result};
use crate::value::{PrefValue, ValueKind};
use std::collections::HashMap;
use std::sync::Arc;

/// Typed get/set/remove/clear over the namespaced slice of a settings
/// domain.
///
/// The store is stateless between calls: each operation acquires the
/// backing domain, completes synchronously, and returns. Consistency
/// guarantees are the backend's own.
pub struct PreferenceStore {
    backend: Arc<dyn SettingsBackend>,
    prefix: String,
}

impl PreferenceStore {
    /// Create a store over `backend`, owning the keys that start with
    /// `prefix`.
    pub fn new(prefix: impl Into<String>, backend: Arc<dyn SettingsBackend>) -> Self {
        Self {
            backend,
            prefix: prefix.into(),
        }
    }

    /// The namespace prefix this store owns
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Qualify a key with the namespace prefix.
    ///
    /// Callers may pass keys either bare (`"enabled"`) or already
    /// qualified (`"flutter.enabled"`); both land on the same entry.
    fn qualify(&self, key: &str) -> String {
        if key.starts_with(&self.prefix) {
            key.to_string()
        } else {
            format!("{}{}", self.prefix, key)
        }
    }

    /// Every entry in the namespace, keyed by qualified key.
    ///
    /// Enumerates the full domain and retains only keys with an exact,
    /// case-sensitive prefix match. Empty namespace yields an empty map.
    pub fn get_all(&self) -> Result<HashMap<String, PrefValue>> {
        let entries = self.backend.entries()?;
        Ok(entries
            .into_iter()
            .filter(|(key, _)| key.starts_with(&self.prefix))
            .collect())
    }

    /// Durably store a boolean under `key`
    pub fn set_bool(&self, key: &str, value: bool) -> Result<()> {
        self.backend.set(&self.qualify(key), PrefValue::Bool(value))?;
        Ok(())
    }

    /// Durably store a double under `key`
    pub fn set_double(&self, key: &str, value: f64) -> Result<()> {
        self.backend
            .set(&self.qualify(key), PrefValue::Double(value))?;
        Ok(())
    }

    /// Durably store a string, integer, string list, or byte value under
    /// `key`.
    ///
    /// Booleans and doubles have dedicated operations and are rejected
    /// here with [`PreferencesError::UnsupportedValueKind`] before the
    /// backend is touched, so a failed call leaves any previous value
    /// intact.
    pub fn set_value(&self, key: &str, value: PrefValue) -> Result<()> {
        match value.kind() {
            ValueKind::String | ValueKind::Int | ValueKind::StringList | ValueKind::Bytes => {
                self.backend.set(&self.qualify(key), value)?;
                Ok(())
            }
            kind @ (ValueKind::Bool | ValueKind::Double) => {
                Err(PreferencesError::UnsupportedValueKind { kind })
            }
        }
    }

    /// Delete the entry under `key` if present; absent keys are a
    /// successful no-op.
    pub fn remove(&self, key: &str) -> Result<()> {
        self.backend.remove(&self.qualify(key))?;
        Ok(())
    }

    /// Delete every entry in the namespace, one delete per entry.
    ///
    /// Entries outside the namespace share the domain and must survive, so
    /// the domain itself is never dropped wholesale. If the backend fails
    /// mid-iteration the namespace may be left partially cleared.
    pub fn clear(&self) -> Result<()> {
        for (key, _) in self.get_all()? {
            self.backend.remove(&key)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for PreferenceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PreferenceStore {{ prefix: {:?} }}", self.prefix)
    }
}
