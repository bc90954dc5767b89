//! Flat storage for a sequence of variable-length groups.
//!
//! ```text
//! values:  [5, 8, 3, 1, 2, 4]
//! offsets: [0,    2,       5, 6]
//!
//! group 1 = values[0..2] = [5, 8]
//! group 2 = values[2..5] = [3, 1, 2]
//! group 3 = values[5..6] = [4]
//! ```
//!
//! Groups are added either whole with [`FlatGroupedStore::append_group`]
//! while the store is locked, or value by value with
//! [`FlatGroupedStore::append_value`] while it is unlocked. Re-locking seals
//! the values pushed since the last unlock into a single group.

use std::{fmt, iter::FusedIterator, ops::Range};

use flatgroup_config::Config;

use crate::{
    error::{GroupedResult, GroupedStoreError, IndexTarget, StateError},
    index::OffsetIndex,
    state::LockState,
    view::GroupView,
};

#[derive(Debug, Clone)]
pub struct FlatGroupedStore<T, I = usize> {
    values: Vec<T>,
    offsets: Vec<I>,
    state: LockState,
    /// Values pushed since the last unlock that are not yet sealed.
    pending: usize,
    /// Offset closing the open incremental group.
    pending_end: Option<I>,
}

impl<T, I> FlatGroupedStore<T, I> {
    /// Number of sealed groups.
    pub fn group_count(&self) -> usize {
        self.offsets.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.group_count() == 0
    }

    /// Values of all sealed groups, in append order.
    pub fn values(&self) -> &[T] {
        &self.values[..self.committed_len()]
    }

    pub fn offsets(&self) -> &[I] {
        &self.offsets
    }

    pub fn state(&self) -> LockState {
        self.state
    }

    pub fn is_locked(&self) -> bool {
        self.state.is_locked()
    }

    /// Number of values pushed in the current unlocked session.
    pub fn pending_len(&self) -> usize {
        self.pending
    }

    /// Switches to incremental mode and starts a fresh session.
    ///
    /// Unlocking an already unlocked store discards the values pushed in the
    /// open session, so the offset table keeps describing the values buffer.
    pub fn unlock(&mut self) {
        if self.pending != 0 {
            tracing::warn!(
                discarded = self.pending,
                "unlock on an open session, discarding unsealed values"
            );
            let committed = self.committed_len();
            self.values.truncate(committed);
        }
        self.state = LockState::Unlocked;
        self.pending = 0;
        self.pending_end = None;
        tracing::trace!("store unlocked");
    }

    /// Switches to bulk mode, sealing the values pushed since the last unlock
    /// into one group. Locking an already locked store does nothing.
    pub fn lock(&mut self) {
        self.state = LockState::Locked;
        if let Some(end) = self.pending_end.take() {
            self.offsets.push(end);
            tracing::trace!(
                group = self.group_count(),
                len = self.pending,
                "sealed incremental group"
            );
        }
        self.pending = 0;
    }

    /// Seals any open session and hands back the raw buffers.
    pub fn into_parts(mut self) -> (Vec<T>, Vec<I>) {
        self.lock();
        (self.values, self.offsets)
    }

    pub fn iter(&self) -> Groups<'_, T, I> {
        Groups {
            store: self,
            front: 0,
            back: self.group_count(),
        }
    }

    pub(crate) fn raw_values(&self) -> &[T] {
        &self.values
    }

    fn committed_len(&self) -> usize {
        self.values.len() - self.pending
    }
}

impl<T, I: OffsetIndex> FlatGroupedStore<T, I> {
    /// Creates an empty, locked store.
    pub fn new() -> Self {
        Self::with_capacity(0, 0)
    }

    pub fn with_capacity(groups: usize, values: usize) -> Self {
        let mut offsets = Vec::with_capacity(groups.saturating_add(1));
        offsets.push(I::zero());
        Self {
            values: Vec::with_capacity(values),
            offsets,
            state: LockState::Locked,
            pending: 0,
            pending_end: None,
        }
    }

    /// Creates an empty store with the capacities from `config`.
    pub fn from_config(config: &Config) -> Self {
        Self::with_capacity(config.groups_capacity, config.values_capacity)
    }

    /// Wraps caller-built buffers, checking that the offsets are sorted.
    pub fn try_new(values: Vec<T>, offsets: Vec<I>) -> GroupedResult<Self> {
        Self::try_from_parts(values, offsets, true)
    }

    /// Wraps caller-built buffers without copying them.
    ///
    /// The first offset must be `0` and the last must equal `values.len()`.
    /// With `check_sorted == false` the offsets are trusted to be
    /// non-decreasing; groups whose range turns out to be invalid fail on
    /// access with [`GroupedStoreError::InvalidOffsets`].
    pub fn try_from_parts(
        values: Vec<T>,
        offsets: Vec<I>,
        check_sorted: bool,
    ) -> GroupedResult<Self> {
        let (Some(&first), Some(&last)) = (offsets.first(), offsets.last()) else {
            return Err(GroupedStoreError::MissingSentinel);
        };
        if first != I::zero() {
            return Err(GroupedStoreError::BadSentinel {
                found: first.to_string(),
            });
        }
        if check_sorted {
            ensure_sorted(&offsets)?;
        }
        if last.to_position() != Some(values.len()) {
            return Err(GroupedStoreError::LengthMismatch {
                last_offset: last.to_string(),
                values_len: values.len(),
            });
        }

        tracing::debug!(
            groups = offsets.len() - 1,
            values = values.len(),
            check_sorted,
            "wrapped grouped store from raw parts"
        );

        Ok(Self {
            values,
            offsets,
            state: LockState::Locked,
            pending: 0,
            pending_end: None,
        })
    }

    /// Builds a locked store holding one group per item of `groups`.
    pub fn try_from_groups<G>(groups: impl IntoIterator<Item = G>) -> GroupedResult<Self>
    where
        G: AsRef<[T]>,
        T: Clone,
    {
        let mut store = Self::new();
        for group in groups {
            store.append_group(group.as_ref())?;
        }
        Ok(store)
    }

    /// Appends `group` as one new group. The store must be locked.
    pub fn append_group(&mut self, group: &[T]) -> GroupedResult<()>
    where
        T: Clone,
    {
        if !self.is_locked() {
            return Err(StateError::AppendGroupWhileUnlocked.into());
        }
        let end = self.offset_for(group.len())?;

        self.values.extend_from_slice(group);
        self.offsets.push(end);
        tracing::trace!(
            group = self.group_count(),
            len = group.len(),
            "appended group"
        );
        Ok(())
    }

    /// Pushes one value onto the group being built. The store must be unlocked.
    pub fn append_value(&mut self, value: T) -> GroupedResult<()> {
        if self.is_locked() {
            return Err(StateError::AppendValueWhileLocked.into());
        }
        let end = self.offset_for(1)?;

        self.values.push(value);
        self.pending += 1;
        self.pending_end = Some(end);
        Ok(())
    }

    /// Returns a view of group `index`, counting from 1.
    pub fn get(&self, index: usize) -> GroupedResult<GroupView<'_, T, I>> {
        let count = self.group_count();
        if index == 0 || index > count {
            return Err(GroupedStoreError::IndexOutOfBounds {
                target: IndexTarget::Store,
                index,
                len: count,
            });
        }
        self.view_at(index - 1)
    }

    fn view_at(&self, group: usize) -> GroupedResult<GroupView<'_, T, I>> {
        self.group_range(group)
            .map(|range| GroupView::new(self, range))
    }

    fn group_range(&self, group: usize) -> GroupedResult<Range<usize>> {
        let start = self.offsets[group].to_position();
        let stop = self.offsets[group + 1].to_position();
        match (start, stop) {
            (Some(start), Some(stop)) if start <= stop && stop <= self.committed_len() => {
                Ok(start..stop)
            }
            _ => Err(GroupedStoreError::InvalidOffsets {
                position: group + 1,
            }),
        }
    }

    /// Offset closing the values buffer once it grows by `additional`.
    fn offset_for(&self, additional: usize) -> GroupedResult<I> {
        let values_len = self.values.len();
        values_len
            .checked_add(additional)
            .and_then(I::from_position)
            .ok_or_else(|| GroupedStoreError::OffsetOverflow {
                values_len,
                additional,
                index_type: I::type_name(),
            })
    }

    /// Renders the sealed groups as `[[a,b],[c,d,e]]`, failing on the first
    /// group whose offsets do not describe a range of the values buffer.
    pub fn try_format(&self) -> GroupedResult<String>
    where
        T: fmt::Display,
    {
        let mut rendered = String::from("[");
        for (i, group) in self.iter().enumerate() {
            if i > 0 {
                rendered.push(',');
            }
            rendered.push_str(&group?.to_string());
        }
        rendered.push(']');
        Ok(rendered)
    }
}

impl<T, I: OffsetIndex> Default for FlatGroupedStore<T, I> {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders the sealed groups as `[[a,b],[c,d,e]]`.
///
/// A group with invalid offsets renders as `[]`; use
/// [`FlatGroupedStore::try_format`] to surface the error instead.
impl<T: fmt::Display, I: OffsetIndex> fmt::Display for FlatGroupedStore<T, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, group) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            match group {
                Ok(group) => write!(f, "{group}")?,
                Err(err) => {
                    tracing::warn!(group = i + 1, %err, "rendering invalid group as empty");
                    f.write_str("[]")?;
                }
            }
        }
        f.write_str("]")
    }
}

/// Fails with the position of the first offset smaller than its predecessor.
pub(crate) fn ensure_sorted<I: OffsetIndex>(offsets: &[I]) -> GroupedResult<()> {
    match offsets.windows(2).position(|pair| pair[1] < pair[0]) {
        Some(position) => Err(GroupedStoreError::InvalidOffsets {
            position: position + 1,
        }),
        None => Ok(()),
    }
}

/// Iterator over the groups of a store, see [`FlatGroupedStore::iter`].
///
/// Yields an error for a group whose offsets were never validated and do not
/// describe a range of the values buffer.
#[derive(Debug)]
pub struct Groups<'a, T, I> {
    store: &'a FlatGroupedStore<T, I>,
    front: usize,
    back: usize,
}

impl<'a, T, I: OffsetIndex> Iterator for Groups<'a, T, I> {
    type Item = GroupedResult<GroupView<'a, T, I>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        let group = self.front;
        self.front += 1;
        Some(self.store.view_at(group))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<T, I: OffsetIndex> DoubleEndedIterator for Groups<'_, T, I> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        Some(self.store.view_at(self.back))
    }
}

impl<T, I: OffsetIndex> ExactSizeIterator for Groups<'_, T, I> {}

impl<T, I: OffsetIndex> FusedIterator for Groups<'_, T, I> {}

impl<'a, T, I: OffsetIndex> IntoIterator for &'a FlatGroupedStore<T, I> {
    type Item = GroupedResult<GroupView<'a, T, I>>;
    type IntoIter = Groups<'a, T, I>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
