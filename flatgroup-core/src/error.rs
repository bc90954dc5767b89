use std::fmt;

use arrow_schema::ArrowError;

pub type GroupedResult<T> = std::result::Result<T, GroupedStoreError>;

/// Errors produced by this crate.
#[derive(Debug, thiserror::Error)]
pub enum GroupedStoreError {
    /// The offset table decreases somewhere.
    #[error("Offsets must be non-decreasing: offset at position {position} is smaller than its predecessor")]
    InvalidOffsets { position: usize },

    /// The last offset does not close the values buffer.
    #[error("Last offset {last_offset} does not match values length {values_len}")]
    LengthMismatch {
        last_offset: String,
        values_len: usize,
    },

    /// The first offset is not zero.
    #[error("First offset must be 0, found {found}")]
    BadSentinel { found: String },

    /// The offset table is empty, so there is no leading zero.
    #[error("Offset table is empty, expected at least the leading 0")]
    MissingSentinel,

    /// An append was attempted in the wrong lock state.
    #[error("State error: {0}")]
    State(#[from] StateError),

    /// A 1-based index fell outside `[1, len]`.
    #[error("Index {index} out of bounds for {target} of length {len} (indices are 1-based)")]
    IndexOutOfBounds {
        target: IndexTarget,
        index: usize,
        len: usize,
    },

    /// The values buffer grew past what the offset type can address.
    #[error("Values length {values_len} grown by {additional} cannot be represented as a {index_type} offset")]
    OffsetOverflow {
        values_len: usize,
        additional: usize,
        index_type: &'static str,
    },

    #[error("Unsupported list array: {0}")]
    UnsupportedListArray(String),

    #[error("Arrow Error: {0}")]
    Arrow(#[from] ArrowError),
}

/// Appends that are illegal in the current lock state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    #[error("cannot append array while unlocked")]
    AppendGroupWhileUnlocked,
    #[error("cannot append scalar while locked")]
    AppendValueWhileLocked,
}

/// What was being indexed when an [`GroupedStoreError::IndexOutOfBounds`] occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexTarget {
    Store,
    View,
}

impl fmt::Display for IndexTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexTarget::Store => write!(f, "grouped store"),
            IndexTarget::View => write!(f, "group view"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_messages() {
        let err = GroupedStoreError::from(StateError::AppendGroupWhileUnlocked);
        assert_eq!(
            err.to_string(),
            "State error: cannot append array while unlocked"
        );
        assert_eq!(
            StateError::AppendValueWhileLocked.to_string(),
            "cannot append scalar while locked"
        );
    }

    #[test]
    fn index_message_names_target() {
        let err = GroupedStoreError::IndexOutOfBounds {
            target: IndexTarget::View,
            index: 4,
            len: 3,
        };
        assert_eq!(
            err.to_string(),
            "Index 4 out of bounds for group view of length 3 (indices are 1-based)"
        );
    }
}
