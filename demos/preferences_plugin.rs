//! Example demonstrating the preferences plugin
//!
//! Installs the plugin over an in-memory settings domain, drives the full
//! message set through the channel, and prints each reply. Swap the
//! backend for `PreferencesPlugin::for_app("flutter.", &app_name)` to
//! persist to the platform configuration directory.

use channel_plugins::PluginManager;
use channel_preferences_plugin::{MemoryBackend, PrefInput, PreferencesPlugin};
use std::sync::Arc;

fn main() {
    let backend = MemoryBackend::new();
    let mut manager = PluginManager::new();
    let handle = manager.install(PreferencesPlugin::new("flutter.", Arc::new(backend)));

    let inputs = [
        PrefInput::set_bool("enabled", true),
        PrefInput::set_double("scale", 1.25),
        PrefInput::set_value("language", "en"),
        PrefInput::set_value("tags", vec!["alpha".to_string(), "beta".to_string()]),
        PrefInput::get_all(),
        PrefInput::remove("language"),
        PrefInput::get_all(),
        PrefInput::clear(),
        PrefInput::get_all(),
    ];

    for input in inputs {
        println!("-> {:?}", input);
        let reply = manager.update(handle.message(input));
        match reply.as_ref().and_then(|o| handle.output(o)) {
            Some(output) => println!("<- {:?}", output),
            None => println!("<- (no reply)"),
        }
    }
}
