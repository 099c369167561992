//! Error types for the page model and the widget.

use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by the host page and the widget handlers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// No element with this id exists in the visual tree.
    #[error("Element '{0}' not found in the visual tree")]
    ElementNotFound(String),

    /// The element exists but is not displayed, so it cannot be activated.
    #[error("Element '{0}' is not displayed")]
    ElementHidden(String),

    /// The element does not accept clicks.
    #[error("Element '{0}' is not clickable")]
    NotClickable(String),

    /// An element with this id is already mounted.
    #[error("Element id '{0}' is already present in the visual tree")]
    DuplicateId(String),

    /// The virtual clock was asked to move backwards.
    #[error("Cannot move time backwards (now {now_ms}ms, requested {target_ms}ms)")]
    TimeReversed {
        /// Current clock value.
        now_ms: u64,
        /// Requested clock value.
        target_ms: u64,
    },

    /// A configuration value was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, Error>;
