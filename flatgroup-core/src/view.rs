use std::{fmt, ops::Range, slice};

use crate::{
    error::{GroupedResult, GroupedStoreError, IndexTarget},
    store::FlatGroupedStore,
};

/// Read-only window over one group of a [`FlatGroupedStore`].
///
/// The view borrows the store and remembers the half-open range of the group
/// inside the values buffer; nothing is copied. Holding a view keeps the store
/// borrowed, so no append, lock or unlock can run until the view is dropped.
pub struct GroupView<'a, T, I = usize> {
    store: &'a FlatGroupedStore<T, I>,
    range: Range<usize>,
}

impl<'a, T, I> GroupView<'a, T, I> {
    pub(crate) fn new(store: &'a FlatGroupedStore<T, I>, range: Range<usize>) -> Self {
        Self { store, range }
    }

    /// Number of elements in the group.
    pub fn len(&self) -> usize {
        self.range.len()
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    /// Position of the group inside the store's values buffer.
    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    /// Returns element `index` of the group, counting from 1.
    pub fn get(&self, index: usize) -> GroupedResult<&'a T> {
        if index == 0 || index > self.len() {
            return Err(GroupedStoreError::IndexOutOfBounds {
                target: IndexTarget::View,
                index,
                len: self.len(),
            });
        }
        Ok(&self.as_slice()[index - 1])
    }

    pub fn as_slice(&self) -> &'a [T] {
        &self.store.raw_values()[self.range.clone()]
    }

    pub fn iter(&self) -> slice::Iter<'a, T> {
        self.as_slice().iter()
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.as_slice().to_vec()
    }
}

impl<T, I> Clone for GroupView<'_, T, I> {
    fn clone(&self) -> Self {
        Self {
            store: self.store,
            range: self.range.clone(),
        }
    }
}

impl<T: fmt::Debug, I> fmt::Debug for GroupView<'_, T, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GroupView")
            .field("range", &self.range)
            .field("values", &self.as_slice())
            .finish()
    }
}

/// Renders the group as `[a,b,c]`.
impl<T: fmt::Display, I> fmt::Display for GroupView<'_, T, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, value) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{value}")?;
        }
        f.write_str("]")
    }
}

impl<T: PartialEq, I> PartialEq<[T]> for GroupView<'_, T, I> {
    fn eq(&self, other: &[T]) -> bool {
        self.as_slice() == other
    }
}

impl<T: PartialEq, I> PartialEq<&[T]> for GroupView<'_, T, I> {
    fn eq(&self, other: &&[T]) -> bool {
        self.as_slice() == *other
    }
}

impl<T: PartialEq, I> PartialEq<Vec<T>> for GroupView<'_, T, I> {
    fn eq(&self, other: &Vec<T>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: PartialEq, I, const N: usize> PartialEq<[T; N]> for GroupView<'_, T, I> {
    fn eq(&self, other: &[T; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: PartialEq, I, J> PartialEq<GroupView<'_, T, J>> for GroupView<'_, T, I> {
    fn eq(&self, other: &GroupView<'_, T, J>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<'a, T, I> IntoIterator for GroupView<'a, T, I> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<'a, T, I> IntoIterator for &GroupView<'a, T, I> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
