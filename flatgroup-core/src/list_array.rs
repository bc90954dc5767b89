//! Conversions between a store and Arrow `List`/`LargeList` arrays.
//!
//! Both use the same physical layout: a flat child array of items and an
//! offset buffer with one more entry than there are lists.

use std::sync::Arc;

use arrow::{
    array::{Array, ArrayRef, AsArray, GenericListArray, OffsetSizeTrait, PrimitiveArray},
    buffer::{OffsetBuffer, ScalarBuffer},
    datatypes::{ArrowNativeType, ArrowPrimitiveType},
};
use arrow_schema::Field;

use crate::{
    error::{GroupedResult, GroupedStoreError},
    index::OffsetIndex,
    store::{ensure_sorted, FlatGroupedStore},
};

impl<T, O> FlatGroupedStore<T, O>
where
    T: ArrowNativeType,
    O: OffsetSizeTrait + OffsetIndex,
{
    /// Builds a list array with one non-null list per sealed group.
    pub fn to_list_array<P>(&self) -> GroupedResult<GenericListArray<O>>
    where
        P: ArrowPrimitiveType<Native = T>,
    {
        // Stores wrapped without a sortedness check may carry offsets Arrow rejects.
        ensure_sorted(self.offsets())?;

        let values = PrimitiveArray::<P>::from_iter_values(self.values().iter().copied());
        let offsets = OffsetBuffer::new(ScalarBuffer::from(self.offsets().to_vec()));
        let field = Arc::new(Field::new("item", P::DATA_TYPE, false));

        Ok(GenericListArray::<O>::try_new(
            field,
            offsets,
            Arc::new(values) as ArrayRef,
            None,
        )?)
    }

    /// Copies a list array of `P` items into a new locked store.
    ///
    /// Null lists and null items have no representation in a store and are
    /// rejected. Sliced arrays are rebased so the first offset is `0`.
    pub fn try_from_list_array<P>(array: &GenericListArray<O>) -> GroupedResult<Self>
    where
        P: ArrowPrimitiveType<Native = T>,
    {
        if array.null_count() > 0 {
            return Err(GroupedStoreError::UnsupportedListArray(format!(
                "{} null lists",
                array.null_count()
            )));
        }

        let items = array.values().as_primitive_opt::<P>().ok_or_else(|| {
            GroupedStoreError::UnsupportedListArray(format!(
                "expected {} items, found {}",
                P::DATA_TYPE,
                array.values().data_type()
            ))
        })?;

        let offsets = array.value_offsets();
        let (Some(&first), Some(&last)) = (offsets.first(), offsets.last()) else {
            return Err(GroupedStoreError::MissingSentinel);
        };
        let start = first.as_usize();
        let items = items.slice(start, last.as_usize() - start);
        if items.null_count() > 0 {
            return Err(GroupedStoreError::UnsupportedListArray(format!(
                "{} null items",
                items.null_count()
            )));
        }

        let values = items.values().to_vec();
        let offsets = offsets.iter().map(|offset| *offset - first).collect();

        tracing::debug!(
            lists = array.len(),
            items = values.len(),
            "importing list array"
        );
        Self::try_new(values, offsets)
    }
}

#[cfg(test)]
mod tests {
    use arrow::{
        array::{Int32Array, Int64Array, LargeListArray, ListArray},
        datatypes::{Float64Type, Int32Type, Int64Type},
    };

    use super::*;

    #[test]
    fn exports_groups_as_lists() {
        let store =
            FlatGroupedStore::<i64, i32>::try_from_groups([vec![1, 2], vec![1, 2, 3, 4]]).unwrap();
        let list = store.to_list_array::<Int64Type>().unwrap();

        assert_eq!(list.len(), 2);
        assert_eq!(list.value_offsets(), &[0, 2, 6]);
        let second = list.value(1);
        let second = second.as_any().downcast_ref::<Int64Array>().unwrap();
        assert_eq!(second.values(), &[1, 2, 3, 4]);
    }

    #[test]
    fn exports_large_lists() {
        let mut store = FlatGroupedStore::<f64, i64>::new();
        store.unlock();
        store.append_value(1.5).unwrap();
        store.lock();
        // pending values are not part of the export
        store.unlock();
        store.append_value(9.0).unwrap();

        let list: LargeListArray = store.to_list_array::<Float64Type>().unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list.values().len(), 1);
    }

    #[test]
    fn export_rejects_unsorted_offsets() {
        let store =
            FlatGroupedStore::<i32, i32>::try_from_parts(vec![1, 2, 3], vec![0, 2, 1, 3], false)
                .unwrap();
        assert!(matches!(
            store.to_list_array::<Int32Type>().unwrap_err(),
            GroupedStoreError::InvalidOffsets { position: 2 }
        ));
    }

    #[test]
    fn imports_list_array() {
        let list = ListArray::from_iter_primitive::<Int32Type, _, _>(vec![
            Some(vec![Some(5), Some(8)]),
            Some(vec![Some(3), Some(1), Some(2)]),
            Some(vec![Some(4)]),
        ]);
        let store = FlatGroupedStore::<i32, i32>::try_from_list_array::<Int32Type>(&list).unwrap();
        assert_eq!(store.group_count(), 3);
        assert_eq!(store.get(2).unwrap(), [3, 1, 2]);
        assert_eq!(store.to_string(), "[[5,8],[3,1,2],[4]]");
    }

    #[test]
    fn imports_sliced_list_array() {
        let list = ListArray::from_iter_primitive::<Int32Type, _, _>(vec![
            Some(vec![Some(5), Some(8)]),
            Some(vec![Some(3), Some(1), Some(2)]),
            Some(vec![Some(4)]),
        ]);
        let sliced = list.slice(1, 2);
        let store =
            FlatGroupedStore::<i32, i32>::try_from_list_array::<Int32Type>(&sliced).unwrap();
        assert_eq!(store.offsets(), &[0, 3, 4]);
        assert_eq!(store.values(), &[3, 1, 2, 4]);
    }

    #[test]
    fn import_rejects_nulls() {
        let null_list = ListArray::from_iter_primitive::<Int32Type, _, _>(vec![
            Some(vec![Some(1)]),
            None,
        ]);
        assert!(matches!(
            FlatGroupedStore::<i32, i32>::try_from_list_array::<Int32Type>(&null_list),
            Err(GroupedStoreError::UnsupportedListArray(_))
        ));

        let null_item =
            ListArray::from_iter_primitive::<Int32Type, _, _>(vec![Some(vec![Some(1), None])]);
        assert!(matches!(
            FlatGroupedStore::<i32, i32>::try_from_list_array::<Int32Type>(&null_item),
            Err(GroupedStoreError::UnsupportedListArray(_))
        ));
    }

    #[test]
    fn import_rejects_wrong_item_type() {
        let list = ListArray::new(
            Arc::new(Field::new("item", arrow_schema::DataType::Int32, false)),
            OffsetBuffer::new(ScalarBuffer::from(vec![0i32, 1])),
            Arc::new(Int32Array::from(vec![1])),
            None,
        );
        assert!(matches!(
            FlatGroupedStore::<i64, i32>::try_from_list_array::<Int64Type>(&list),
            Err(GroupedStoreError::UnsupportedListArray(_))
        ));
    }
}
