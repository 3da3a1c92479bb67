//! Message types for the preferences plugin

use crate::value::PrefValue;
use std::collections::HashMap;

/// Public input API that hosts use to drive the preferences plugin
///
/// This is the complete message set the plugin handles; every input
/// produces exactly one [`PrefOutput`] reply.
#[derive(Clone, Debug)]
pub enum PrefInput {
    /// Read every entry in the namespace
    GetAll,
    /// Store a boolean
    SetBool { key: String, value: bool },
    /// Store a double
    SetDouble { key: String, value: f64 },
    /// Store a string, integer, string list, or byte value
    SetValue { key: String, value: PrefValue },
    /// Delete an entry
    Remove { key: String },
    /// Delete every entry in the namespace
    Clear,
}

impl PrefInput {
    /// Create a GetAll input
    pub fn get_all() -> Self {
        Self::GetAll
    }

    /// Create a SetBool input
    pub fn set_bool(key: impl Into<String>, value: bool) -> Self {
        Self::SetBool {
            key: key.into(),
            value,
        }
    }

    /// Create a SetDouble input
    pub fn set_double(key: impl Into<String>, value: f64) -> Self {
        Self::SetDouble {
            key: key.into(),
            value,
        }
    }

    /// Create a SetValue input
    ///
    /// # Example
    ///
    /// ```
    /// use channel_preferences_plugin::PrefInput;
    ///
    /// let input = PrefInput::set_value("language", "en");
    /// let input = PrefInput::set_value("retries", 3i64);
    /// ```
    pub fn set_value(key: impl Into<String>, value: impl Into<PrefValue>) -> Self {
        Self::SetValue {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Create a Remove input
    pub fn remove(key: impl Into<String>) -> Self {
        Self::Remove { key: key.into() }
    }

    /// Create a Clear input
    pub fn clear() -> Self {
        Self::Clear
    }
}

/// Replies emitted by the preferences plugin
#[derive(Clone, Debug)]
pub enum PrefOutput {
    /// The namespace contents, keyed by qualified key
    All {
        entries: HashMap<String, PrefValue>,
    },
    /// A value was stored
    Set { key: String },
    /// An entry was removed (or was already absent)
    Removed { key: String },
    /// The namespace was cleared
    Cleared,
    /// An operation failed
    Error { message: String },
}

impl PrefOutput {
    /// The entries of a GetAll reply
    pub fn entries(&self) -> Option<&HashMap<String, PrefValue>> {
        match self {
            PrefOutput::All { entries } => Some(entries),
            _ => None,
        }
    }

    /// Whether this reply signals a failed operation
    pub fn is_error(&self) -> bool {
        matches!(self, PrefOutput::Error { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_value_constructor_converts_native_types() {
        let input = PrefInput::set_value("langs", vec!["en".to_string(), "de".to_string()]);
        let PrefInput::SetValue { key, value } = input else {
            panic!("expected SetValue");
        };
        assert_eq!(key, "langs");
        assert_eq!(
            value,
            PrefValue::StringList(vec!["en".to_string(), "de".to_string()])
        );
    }

    #[test]
    fn entries_accessor_only_matches_all() {
        let all = PrefOutput::All {
            entries: HashMap::new(),
        };
        assert!(all.entries().is_some());
        assert!(PrefOutput::Cleared.entries().is_none());
        assert!(!all.is_error());
    }
}
