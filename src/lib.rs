//! Message-channel plugin host.
//!
//! A small registry that routes type-erased messages to installed plugins
//! and hands each plugin's reply back to the caller. The channel is
//! bidirectional and synchronous: the host sends a [`PluginMessage`] in,
//! the plugin's `update` runs to completion, and the resulting
//! [`PluginOutput`] comes back out of the same call.
//!
//! Plugins implement [`Plugin`] and are installed into a [`PluginManager`].
//! Installation binds the plugin as the sole handler for its message type
//! and returns a typed [`PluginHandle`] used to wrap messages for the
//! channel and to read outputs back out of the type-erased envelope.
//!
//! # Example
//! ```ignore
//! let mut manager = PluginManager::new();
//! let handle = manager.install(PreferencesPlugin::new("flutter.", backend));
//!
//! let output = manager.update(handle.message(PrefInput::get_all()));
//! if let Some(reply) = output.as_ref().and_then(|o| handle.output(o)) {
//!     // typed PrefOutput
//! }
//! ```

use log::warn;
use std::any::{Any, TypeId};
use std::sync::Arc;

/// Core trait that all plugins must implement.
/// Plugins own their state and reply to messages synchronously.
pub trait Plugin: Send + Sync {
    /// The message type this plugin handles
    type Message: Clone + Send + Sync + 'static;

    /// The state type for this plugin
    type State: Send + 'static;

    /// The output message type this plugin replies with
    type Output: Clone + Send + Sync + 'static;

    /// Returns the unique name/identifier for this plugin
    fn name(&self) -> &'static str;

    /// Initialize the plugin and return its initial state
    fn init(&self) -> Self::State;

    /// Handle a message against the plugin state, returning the reply to
    /// hand back to the caller
    fn update(&self, state: &mut Self::State, message: Self::Message) -> Option<Self::Output>;
}

/// A handle to an installed plugin.
///
/// The handle is the typed end of the channel: it wraps plugin messages
/// into the type-erased envelope the manager routes, and unwraps replies
/// coming back the other way.
pub struct PluginHandle<P: Plugin> {
    plugin_index: usize,
    _phantom: std::marker::PhantomData<P>,
}

impl<P: Plugin> Clone for PluginHandle<P> {
    fn clone(&self) -> Self {
        Self {
            plugin_index: self.plugin_index,
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<P: Plugin> std::fmt::Debug for PluginHandle<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PluginHandle {{ plugin_index: {} }}", self.plugin_index)
    }
}

impl<P: Plugin> PluginHandle<P> {
    fn new(plugin_index: usize) -> Self {
        Self {
            plugin_index,
            _phantom: std::marker::PhantomData,
        }
    }

    /// Wrap a plugin message into a routable [`PluginMessage`]
    pub fn message(&self, message: P::Message) -> PluginMessage {
        PluginMessage::new(self.plugin_index, message)
    }

    /// Unwrap a reply from this plugin.
    ///
    /// Returns `None` if the output came from a different plugin.
    pub fn output(&self, output: &PluginOutput) -> Option<P::Output> {
        if output.plugin_index == self.plugin_index {
            output.downcast::<P::Output>().cloned()
        } else {
            None
        }
    }
}

/// A type-erased plugin message that can be routed automatically
#[derive(Clone, Debug)]
pub struct PluginMessage {
    plugin_index: usize,
    message: Arc<dyn Any + Send + Sync>,
    type_id: TypeId,
}

impl PluginMessage {
    fn new<M: 'static + Send + Sync>(plugin_index: usize, message: M) -> Self {
        Self {
            plugin_index,
            type_id: TypeId::of::<M>(),
            message: Arc::new(message),
        }
    }

    /// Get the plugin index this message is for
    pub fn plugin_index(&self) -> usize {
        self.plugin_index
    }
}

/// Type-erased reply from a plugin
#[derive(Clone)]
pub struct PluginOutput {
    plugin_index: usize,
    output: Arc<dyn Any + Send + Sync>,
    type_id: TypeId,
}

impl PluginOutput {
    fn new<O: 'static + Send + Sync>(plugin_index: usize, output: O) -> Self {
        Self {
            plugin_index,
            type_id: TypeId::of::<O>(),
            output: Arc::new(output),
        }
    }

    /// Get the plugin index this output is from
    pub fn plugin_index(&self) -> usize {
        self.plugin_index
    }

    /// Try to downcast the output to a specific type
    pub fn downcast<O: 'static>(&self) -> Option<&O> {
        if self.type_id == TypeId::of::<O>() {
            self.output.downcast_ref::<O>()
        } else {
            None
        }
    }
}

impl std::fmt::Debug for PluginOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "PluginOutput {{ plugin_index: {}, type_id: {:?} }}",
            self.plugin_index, self.type_id
        )
    }
}

type AnyMessage = Arc<dyn Any + Send + Sync>;

/// Holds a single plugin instance with its state and behavior
struct PluginEntry {
    name: &'static str,
    state: Box<dyn Any + Send>,
    state_type_id: TypeId,
    message_type_id: TypeId,
    update_fn: Box<dyn Fn(&mut dyn Any, AnyMessage) -> Option<PluginOutput> + Send + Sync>,
}

impl std::fmt::Debug for PluginEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "PluginEntry {{ name: {}, message_type_id: {:?} }}",
            self.name, self.message_type_id
        )
    }
}

/// Main plugin manager that holds all installed plugins and their states.
/// This struct should be embedded in your application state.
pub struct PluginManager {
    plugins: Vec<PluginEntry>,
}

impl std::fmt::Debug for PluginManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PluginManager {{ plugins: {:?} }}", self.plugins)
    }
}

impl Default for PluginManager {
    fn default() -> Self {
        Self::new()
    }
}

impl PluginManager {
    /// Create a new empty plugin manager
    pub fn new() -> Self {
        Self {
            plugins: Vec::new(),
        }
    }

    /// Install a plugin into the manager.
    /// Returns a handle to the plugin that can be used to build messages.
    /// The plugin becomes the sole handler for its message type set.
    pub fn install<P>(&mut self, plugin: P) -> PluginHandle<P>
    where
        P: Plugin + 'static,
    {
        let name = plugin.name();
        let plugin = Arc::new(plugin);
        let state = plugin.init();
        let plugin_index = self.plugins.len();
        let message_type_id = TypeId::of::<P::Message>();
        let state_type_id = TypeId::of::<P::State>();

        let update_fn = Box::new(move |state: &mut dyn Any, message: AnyMessage| {
            if let Some(msg) = message.downcast_ref::<P::Message>()
                && let Some(typed_state) = state.downcast_mut::<P::State>()
            {
                plugin
                    .update(typed_state, msg.clone())
                    .map(|output| PluginOutput::new(plugin_index, output))
            } else {
                None
            }
        });

        let entry = PluginEntry {
            name,
            state: Box::new(state),
            state_type_id,
            message_type_id,
            update_fn,
        };

        self.plugins.push(entry);
        PluginHandle::new(plugin_index)
    }

    /// Route a message to its plugin and return the plugin's reply.
    ///
    /// Messages whose type does not match the plugin they address are
    /// dropped; the channel recognizes no other message sets.
    pub fn update(&mut self, message: PluginMessage) -> Option<PluginOutput> {
        let Some(entry) = self.plugins.get_mut(message.plugin_index) else {
            warn!(
                "message addressed to unknown plugin {}",
                message.plugin_index
            );
            return None;
        };

        if entry.message_type_id != message.type_id {
            warn!("message type mismatch for plugin '{}'", entry.name);
            return None;
        }

        (entry.update_fn)(entry.state.as_mut(), Arc::clone(&message.message))
    }

    /// Get the number of installed plugins
    pub fn plugin_count(&self) -> usize {
        self.plugins.len()
    }

    /// Get a list of all installed plugin names in order
    pub fn plugin_names(&self) -> Vec<&'static str> {
        self.plugins.iter().map(|p| p.name).collect()
    }

    pub fn get_plugin_state<P: Plugin>(&self) -> Option<&P::State> {
        self.plugins
            .iter()
            .find(|p| TypeId::of::<P::State>() == p.state_type_id)
            .map(|p| p.state.as_ref())
            .and_then(|state| state.downcast_ref::<P::State>())
    }

    pub fn get_plugin_state_mut<P: Plugin>(&mut self) -> Option<&mut P::State> {
        self.plugins
            .iter_mut()
            .find(|p| TypeId::of::<P::State>() == p.state_type_id)
            .map(|p| p.state.as_mut())
            .and_then(|state| state.downcast_mut::<P::State>())
    }
}

/// Builder pattern for constructing a PluginManager
pub struct PluginManagerBuilder {
    plugins: Vec<Box<dyn FnOnce(&mut PluginManager) + Send>>,
}

impl PluginManagerBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            plugins: Vec::new(),
        }
    }

    /// Add a plugin
    pub fn with_plugin<P>(mut self, plugin: P) -> Self
    where
        P: Plugin + 'static,
    {
        self.plugins
            .push(Box::new(move |manager: &mut PluginManager| {
                let _ = manager.install(plugin);
            }));
        self
    }

    /// Build the plugin manager
    pub fn build(self) -> PluginManager {
        let mut manager = PluginManager::new();
        for install_fn in self.plugins {
            install_fn(&mut manager);
        }
        manager
    }
}

impl Default for PluginManagerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter;

    #[derive(Clone, Debug)]
    enum CounterMessage {
        Add(i32),
        Read,
    }

    #[derive(Clone, Debug, PartialEq)]
    enum CounterOutput {
        Value(i32),
    }

    impl Plugin for Counter {
        type Message = CounterMessage;
        type State = i32;
        type Output = CounterOutput;

        fn name(&self) -> &'static str {
            "counter"
        }

        fn init(&self) -> Self::State {
            0
        }

        fn update(&self, state: &mut Self::State, message: Self::Message) -> Option<Self::Output> {
            match message {
                CounterMessage::Add(n) => {
                    *state += n;
                    None
                }
                CounterMessage::Read => Some(CounterOutput::Value(*state)),
            }
        }
    }

    #[test]
    fn routes_messages_and_returns_typed_output() {
        let mut manager = PluginManager::new();
        let handle = manager.install(Counter);

        assert!(
            manager
                .update(handle.message(CounterMessage::Add(2)))
                .is_none()
        );
        assert!(
            manager
                .update(handle.message(CounterMessage::Add(3)))
                .is_none()
        );

        let output = manager.update(handle.message(CounterMessage::Read));
        let reply = output.as_ref().and_then(|o| handle.output(o));
        assert_eq!(reply, Some(CounterOutput::Value(5)));
    }

    #[test]
    fn exposes_plugin_state() {
        let mut manager = PluginManager::new();
        let handle = manager.install(Counter);
        manager.update(handle.message(CounterMessage::Add(7)));

        assert_eq!(manager.get_plugin_state::<Counter>(), Some(&7));
        *manager.get_plugin_state_mut::<Counter>().unwrap() = 1;
        assert_eq!(manager.get_plugin_state::<Counter>(), Some(&1));
    }

    #[test]
    fn builder_installs_in_order() {
        let manager = PluginManagerBuilder::new().with_plugin(Counter).build();
        assert_eq!(manager.plugin_count(), 1);
        assert_eq!(manager.plugin_names(), vec!["counter"]);
    }
}
