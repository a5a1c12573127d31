//! Error types for the menu toolkit.
//!
//! Two of these deserve a note. `MissingPlayerRecord` is a deliberate
//! hard failure: a paginated menu cannot pick themed assets without the
//! player's record, so the render aborts instead of guessing.
//! `SpaceExceeded` is thrown only by the class-grouped pagination path;
//! the flat list path silently drops overflowing items instead. The two
//! paths disagree on purpose — callers rely on both behaviors.

use thiserror::Error;
use uuid::Uuid;

/// A malformed slot-range string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SlotRangeError {
    #[error("invalid slot number '{0}'")]
    BadNumber(String),
}

#[derive(Debug, Error)]
pub enum GuiError {
    #[error("invalid menu dimensions: {height} rows x {width} columns")]
    InvalidDimensions { height: u8, width: u8 },

    #[error("player {0} has no backing record")]
    MissingPlayerRecord(Uuid),

    #[error("no available slot starting at {start} for a class element")]
    SpaceExceeded { start: usize },

    #[error("custom item '{0}' could not be found")]
    UnknownCustomItem(String),

    #[error("no content slots available for the scroll window")]
    NoContentSlots,

    #[error("unknown gui '{0}'")]
    UnknownGui(String),

    #[error("unsupported side data for key '{key}': {found}")]
    UnsupportedSideData { key: String, found: String },

    #[error("invalid menu definition: {0}")]
    BadDefinition(String),

    #[error(transparent)]
    SlotRange(#[from] SlotRangeError),
}
