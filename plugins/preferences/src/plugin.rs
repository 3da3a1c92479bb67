//! Plugin binding for the message-channel host

use crate::backend::{AppName, JsonFileBackend, SettingsBackend};
use crate::messages::{PrefInput, PrefOutput};
use crate::store::PreferenceStore;
use channel_plugins::Plugin;
use std::sync::Arc;

/// Preferences plugin exposing a namespaced settings store over the
/// message channel.
///
/// Installing the plugin binds it as the sole handler for [`PrefInput`];
/// no configuration options beyond the namespace prefix and the backing
/// domain are recognized.
///
/// # Example
///
/// ```ignore
/// use channel_plugins::PluginManager;
/// use channel_preferences_plugin::{AppName, PreferencesPlugin, PrefInput};
///
/// let mut manager = PluginManager::new();
/// let app_name = AppName::new("com", "example", "myapp");
/// let handle = manager.install(PreferencesPlugin::for_app("flutter.", &app_name));
///
/// let reply = manager.update(handle.message(PrefInput::set_bool("enabled", true)));
/// ```
pub struct PreferencesPlugin {
    prefix: String,
    backend: Arc<dyn SettingsBackend>,
}

impl PreferencesPlugin {
    /// Create a plugin over an injected backing domain
    pub fn new(prefix: impl Into<String>, backend: Arc<dyn SettingsBackend>) -> Self {
        Self {
            prefix: prefix.into(),
            backend,
        }
    }

    /// Create a plugin over the application's file-backed settings domain
    pub fn for_app(prefix: impl Into<String>, app_name: &AppName) -> Self {
        Self::new(prefix, Arc::new(JsonFileBackend::new(app_name)))
    }
}

impl Plugin for PreferencesPlugin {
    type Message = PrefInput;
    type State = PreferenceStore;
    type Output = PrefOutput;

    fn name(&self) -> &'static str {
        "preferences"
    }

    fn init(&self) -> Self::State {
        PreferenceStore::new(self.prefix.clone(), Arc::clone(&self.backend))
    }

    fn update(&self, state: &mut Self::State, message: Self::Message) -> Option<Self::Output> {
        let reply = match message {
            PrefInput::GetAll => state.get_all().map(|entries| PrefOutput::All { entries }),
            PrefInput::SetBool { key, value } => {
                state.set_bool(&key, value).map(|()| PrefOutput::Set { key })
            }
            PrefInput::SetDouble { key, value } => state
                .set_double(&key, value)
                .map(|()| PrefOutput::Set { key }),
            PrefInput::SetValue { key, value } => state
                .set_value(&key, value)
                .map(|()| PrefOutput::Set { key }),
            PrefInput::Remove { key } => state.remove(&key).map(|()| PrefOutput::Removed { key }),
            PrefInput::Clear => state.clear().map(|()| PrefOutput::Cleared),
        };

        Some(reply.unwrap_or_else(|e| PrefOutput::Error {
            message: e.to_string(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use crate::value::PrefValue;
    use pretty_assertions::assert_eq;

    fn plugin_state() -> (MemoryBackend, PreferencesPlugin, PreferenceStore) {
        let backend = MemoryBackend::new();
        let plugin = PreferencesPlugin::new("flutter.", Arc::new(backend.clone()));
        let state = plugin.init();
        (backend, plugin, state)
    }

    #[test]
    fn every_input_produces_a_reply() {
        let (_backend, plugin, mut state) = plugin_state();

        let reply = plugin.update(&mut state, PrefInput::set_bool("enabled", true));
        assert!(matches!(reply, Some(PrefOutput::Set { ref key }) if key == "enabled"));

        let reply = plugin.update(&mut state, PrefInput::get_all());
        let entries = reply.as_ref().and_then(|r| r.entries()).unwrap();
        assert_eq!(entries.get("flutter.enabled"), Some(&PrefValue::Bool(true)));

        let reply = plugin.update(&mut state, PrefInput::remove("enabled"));
        assert!(matches!(reply, Some(PrefOutput::Removed { .. })));

        let reply = plugin.update(&mut state, PrefInput::clear());
        assert!(matches!(reply, Some(PrefOutput::Cleared)));
    }

    #[test]
    fn unsupported_kind_surfaces_as_error_reply() {
        let (backend, plugin, mut state) = plugin_state();

        let reply = plugin.update(
            &mut state,
            PrefInput::SetValue {
                key: "flag".to_string(),
                value: PrefValue::Bool(true),
            },
        );

        assert!(reply.is_some_and(|r| r.is_error()));
        assert!(backend.entries().unwrap().is_empty());
    }
}
