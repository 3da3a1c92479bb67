//! Error types for the preferences plugin

use crate::value::ValueKind;
use thiserror::Error;

/// Failures raised by a backing settings domain.
///
/// The store treats these as opaque and propagates them unchanged; there is
/// no retry or rollback at this layer.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("failed to access settings domain: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings domain holds malformed data: {0}")]
    Format(#[from] serde_json::Error),
}

/// Errors produced by the preference store.
#[derive(Debug, Error)]
pub enum PreferencesError {
    /// The value handed to `set_value` lies outside the kinds that
    /// operation accepts.
    #[error("value kind '{kind}' is not accepted by set_value")]
    UnsupportedValueKind { kind: ValueKind },

    #[error(transparent)]
    Backend(#[from] BackendError),
}

pub type Result<T, E = PreferencesError> = std::result::Result<T, E>;
