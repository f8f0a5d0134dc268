//! Error types for seating operations.
//!
//! `DeskNotFound`/`LayoutNotFound` and `InvalidArgument` are user-facing
//! rejections that leave the store untouched. `PersistenceUnavailable` is
//! only ever surfaced for writes; failed reads degrade to an empty table.

use crate::id::DeskId;
use thiserror::Error;

/// Errors that can occur while editing or persisting a seating layout.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SeatError {
    /// An operation referenced a desk that does not exist.
    #[error("Desk {0} does not exist")]
    DeskNotFound(DeskId),

    /// An operation referenced a layout name that was never saved.
    #[error("Layout \"{0}\" does not exist")]
    LayoutNotFound(String),

    /// A command was invoked with arguments it cannot act on.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Local storage could not be written.
    #[error("Persistence unavailable: {0}")]
    PersistenceUnavailable(String),

    /// A configuration document is malformed or out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl SeatError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidArgument(reason.into())
    }

    /// True for both desk and layout lookups that missed.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::DeskNotFound(_) | Self::LayoutNotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, SeatError>;
