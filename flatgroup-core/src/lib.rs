//! Compact storage for ragged data: a sequence of variable-length groups of
//! one numeric type, kept in a single flat values buffer delimited by an
//! offset table.
//!
//! Groups are appended whole while the store is locked, or built value by
//! value while it is unlocked and sealed when the store is locked again.
//! Indexing hands out [`GroupView`]s, borrowed windows over one group.
//!
//! ```
//! use flatgroup_core::FlatGroupedStore;
//!
//! let mut store = FlatGroupedStore::<i64>::new();
//! store.append_group(&[1, 2]).unwrap();
//!
//! store.unlock();
//! for value in [1, 2, 3, 4] {
//!     store.append_value(value).unwrap();
//! }
//! store.lock();
//!
//! assert_eq!(store.group_count(), 2);
//! assert_eq!(store.get(2).unwrap(), [1, 2, 3, 4]);
//! assert_eq!(store.to_string(), "[[1,2],[1,2,3,4]]");
//! ```
//!
//! Group and element indices passed to `get` are 1-based.

pub mod error;
pub mod index;
pub mod list_array;
#[cfg(feature = "subscriber")]
pub mod logging;
pub mod state;
pub mod store;
pub mod view;

pub use error::{GroupedResult, GroupedStoreError, IndexTarget, StateError};
pub use index::OffsetIndex;
pub use state::LockState;
pub use store::{FlatGroupedStore, Groups};
pub use view::GroupView;
