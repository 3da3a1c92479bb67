//! Preferences Plugin
//!
//! A thin shim exposing the host's per-application settings store over the
//! message channel. Entries live in a flat string-keyed dictionary shared
//! with other tenants; the plugin owns exactly the keys carrying its
//! namespace prefix and never observes or touches the rest.
//!
//! # Features
//!
//! - Typed get/set/remove/clear operations over namespaced keys
//! - Closed value set: bool, double, int, string, string list, bytes
//! - Pluggable backing domain (JSON file on disk, in-memory for tests)
//! - Synchronous, stateless operations with durable commits
//!
//! # Example
//!
//! ```ignore
//! use channel_plugins::PluginManager;
//! use channel_preferences_plugin::{AppName, PrefInput, PreferencesPlugin};
//!
//! let mut manager = PluginManager::new();
//! let app_name = AppName::new("com", "example", "myapp");
//! let handle = manager.install(PreferencesPlugin::for_app("flutter.", &app_name));
//!
//! manager.update(handle.message(PrefInput::set_bool("enabled", true)));
//!
//! let reply = manager.update(handle.message(PrefInput::get_all()));
//! if let Some(output) = reply.as_ref().and_then(|o| handle.output(o)) {
//!     println!("{:?}", output.entries());
//! }
//! ```

mod backend;
mod error;
mod messages;
mod plugin;
mod store;
mod value;

pub use backend::{AppName, JsonFileBackend, MemoryBackend, SettingsBackend};
pub use error::{BackendError, PreferencesError, Result};
pub use messages::{PrefInput, PrefOutput};
pub use plugin::PreferencesPlugin;
pub use store::PreferenceStore;
pub use value::{PrefValue, ValueKind};
