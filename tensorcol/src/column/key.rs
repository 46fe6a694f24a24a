use super::input::stack_rows;
use super::{RowInput, TensorColumn, TensorRow};
use crate::dtype::DType;
use crate::error::{Error, Result};
use crate::tensor::{DimsExt, ITensor, Tensor, TensorBase, TensorView, TensorViewMut, broadcast_to};
use std::ops::{Bound, Range, RangeBounds, RangeFrom, RangeFull, RangeInclusive, RangeTo, RangeToInclusive};

/// Selects rows of a column.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ColumnKey {
    /// a single row
    Row(usize),
    /// rows `start, start + step, ...` below `stop` (the end of the column if `None`)
    Slice {
        start: usize,
        stop: Option<usize>,
        step: usize,
    },
    /// rows at the given positions, in order, repeats allowed
    Positions(Vec<usize>),
    /// rows whose flag is set, one flag per row
    Mask(Vec<bool>),
}

impl ColumnKey {
    pub fn slice<R: RangeBounds<usize>>(range: R) -> Self {
        let start = match range.start_bound() {
            Bound::Included(&s) => s,
            Bound::Excluded(&s) => s.saturating_add(1),
            Bound::Unbounded => 0,
        };
        let stop = match range.end_bound() {
            Bound::Included(&e) => Some(e.saturating_add(1)),
            Bound::Excluded(&e) => Some(e),
            Bound::Unbounded => None,
        };
        ColumnKey::Slice { start, stop, step: 1 }
    }

    pub fn step_by<R: RangeBounds<usize>>(range: R, step: usize) -> Self {
        match Self::slice(range) {
            ColumnKey::Slice { start, stop, .. } => ColumnKey::Slice { start, stop, step },
            _ => unreachable!(),
        }
    }

    /// Validates the key against a column of `len` rows and lists the
    /// selected row positions.
    pub fn resolve(&self, len: usize) -> Result<Vec<usize>> {
        match self {
            &ColumnKey::Row(i) => {
                if i >= len {
                    return Err(Error::out_of_bounds(i, len));
                }
                Ok(vec![i])
            }
            &ColumnKey::Slice { start, stop, step } => {
                if step == 0 {
                    return Err(Error::InvalidIndexer("slice step cannot be zero".into()));
                }
                let stop = stop.unwrap_or(len);
                if start > len {
                    return Err(Error::out_of_bounds(start, len));
                }
                if stop > len {
                    return Err(Error::out_of_bounds(stop, len));
                }
                Ok((start..stop.max(start)).step_by(step).collect())
            }
            ColumnKey::Positions(positions) => {
                if let Some(&bad) = positions.iter().find(|&&p| p >= len) {
                    return Err(Error::out_of_bounds(bad, len));
                }
                Ok(positions.clone())
            }
            ColumnKey::Mask(mask) => {
                if mask.len() != len {
                    return Err(Error::InvalidIndexer(format!(
                        "boolean mask of length {} does not match column length {len}",
                        mask.len()
                    )));
                }
                Ok(mask
                    .iter()
                    .enumerate()
                    .filter_map(|(i, &selected)| selected.then_some(i))
                    .collect())
            }
        }
    }
}

impl From<usize> for ColumnKey {
    #[inline]
    fn from(value: usize) -> Self {
        ColumnKey::Row(value)
    }
}

macro_rules! impl_key_from_range {
    ($($range:ty),*) => {
        $(
        impl From<$range> for ColumnKey {
            #[inline]
            fn from(value: $range) -> Self {
                ColumnKey::slice(value)
            }
        }
        )*
    };
}

impl_key_from_range!(
    Range<usize>,
    RangeFrom<usize>,
    RangeTo<usize>,
    RangeInclusive<usize>,
    RangeToInclusive<usize>,
    RangeFull
);

impl From<Vec<usize>> for ColumnKey {
    #[inline]
    fn from(value: Vec<usize>) -> Self {
        ColumnKey::Positions(value)
    }
}

impl From<&[usize]> for ColumnKey {
    #[inline]
    fn from(value: &[usize]) -> Self {
        ColumnKey::Positions(value.to_vec())
    }
}

impl From<Vec<bool>> for ColumnKey {
    #[inline]
    fn from(value: Vec<bool>) -> Self {
        ColumnKey::Mask(value)
    }
}

impl From<&[bool]> for ColumnKey {
    #[inline]
    fn from(value: &[bool]) -> Self {
        ColumnKey::Mask(value.to_vec())
    }
}

/// Result of reading a column through a [`ColumnKey`].
#[derive(Debug)]
pub enum Item<'a, T> {
    Row(TensorRow<'a, T>),
    Column(TensorColumn<T>),
}

impl<T: Copy> TensorColumn<T> {
    /// A single row key yields a row view; every other key yields a new
    /// column holding the selected rows in key order.
    pub fn get_item<K: Into<ColumnKey>>(&self, key: K) -> Result<Item<'_, T>> {
        match key.into() {
            ColumnKey::Row(i) => self.row(i).map(Item::Row),
            key => self.select(key).map(Item::Column),
        }
    }

    /// New column holding the selected rows. A single row key yields a
    /// one-row column.
    pub fn select<K: Into<ColumnKey>>(&self, key: K) -> Result<Self> {
        let key = key.into();
        let row_len = self.row_len();
        let data = match key {
            ColumnKey::Slice { start, stop, step: 1 } => {
                let stop = stop.unwrap_or(self.len());
                key.resolve(self.len())?;
                self.as_slice()[start * row_len..stop.max(start) * row_len].to_vec()
            }
            _ => {
                let positions = key.resolve(self.len())?;
                let mut data = Vec::with_capacity(positions.len() * row_len);
                for p in positions {
                    data.extend_from_slice(&self.as_slice()[p * row_len..(p + 1) * row_len]);
                }
                data
            }
        };
        let rows = if row_len == 0 {
            key.resolve(self.len())?.len()
        } else {
            data.len() / row_len
        };
        Ok(TensorColumn::from_tensor_unchecked(Tensor::from_vec_unchecked(
            data,
            self.row_shape().insert_major(rows),
        )))
    }
}

/// A value written into a column through [`TensorColumn::set`].
pub enum SetValue<'a, T> {
    Column(&'a TensorColumn<T>),
    Row(TensorRow<'a, T>),
    Tensor(TensorView<'a, T>),
    /// rows coerced like column construction; an empty list marks the rows missing
    Rows(Vec<RowInput<'a, T>>),
    /// broadcast to every element of the targeted rows
    Scalar(T),
    /// marks the targeted rows missing by filling them with NaN
    Missing,
}

impl<'a, T> From<&'a TensorColumn<T>> for SetValue<'a, T> {
    #[inline]
    fn from(value: &'a TensorColumn<T>) -> Self {
        SetValue::Column(value)
    }
}

impl<'a, T> From<TensorRow<'a, T>> for SetValue<'a, T> {
    #[inline]
    fn from(value: TensorRow<'a, T>) -> Self {
        SetValue::Row(value)
    }
}

impl<'a, T> From<TensorView<'a, T>> for SetValue<'a, T> {
    #[inline]
    fn from(value: TensorView<'a, T>) -> Self {
        SetValue::Tensor(value)
    }
}

impl<'a, T> From<&'a Tensor<T>> for SetValue<'a, T> {
    #[inline]
    fn from(value: &'a Tensor<T>) -> Self {
        SetValue::Tensor(TensorView::new_unchecked(value.as_ref(), value.dims()))
    }
}

impl<'a, T> From<Vec<RowInput<'a, T>>> for SetValue<'a, T> {
    #[inline]
    fn from(value: Vec<RowInput<'a, T>>) -> Self {
        SetValue::Rows(value)
    }
}

macro_rules! impl_scalar_set_values {
    ($($ty:ty),* $(,)?) => {
        $(
        impl<'a> From<$ty> for SetValue<'a, $ty> {
            #[inline]
            fn from(value: $ty) -> Self {
                SetValue::Scalar(value)
            }
        }

        impl<'a> From<Option<$ty>> for SetValue<'a, $ty> {
            #[inline]
            fn from(value: Option<$ty>) -> Self {
                value.map_or(SetValue::Missing, SetValue::Scalar)
            }
        }
        )*
    };
}

impl_scalar_set_values!(f32, f64, i8, i32, i64, u8, u16, u32, u64, usize);
#[cfg(feature = "half")]
impl_scalar_set_values!(half::f16);

impl<T: DType> TensorColumn<T> {
    /// Writes `value` into the rows selected by `key`.
    ///
    /// The value is broadcast to `[selected, row_shape...]`, so a single row
    /// key accepts both a bare row and a one-row block. Key and value are
    /// fully validated before any row is written.
    pub fn set<'v, K, V>(&mut self, key: K, value: V) -> Result<()>
    where
        K: Into<ColumnKey>,
        V: Into<SetValue<'v, T>>,
    {
        let positions = key.into().resolve(self.len())?;
        let target = self.row_shape().insert_major(positions.len());

        let values: Tensor<T> = match value.into() {
            SetValue::Missing => self.missing_fill(&positions)?,
            SetValue::Rows(rows) if rows.is_empty() => self.missing_fill(&positions)?,
            SetValue::Scalar(v) => Tensor::filled(v, target),
            SetValue::Column(col) => broadcast_to(&col.view(), &target)?,
            SetValue::Row(row) => broadcast_to(&TensorView::new_unchecked(row.as_slice(), row.dims()), &target)?,
            SetValue::Tensor(view) => broadcast_to(&view, &target)?,
            SetValue::Rows(rows) => {
                let stacked = stack_rows(&rows)?;
                broadcast_to(&TensorView::new_unchecked(stacked.as_ref(), stacked.dims()), &target)?
            }
        };

        let mut rows: Vec<TensorViewMut<'_, T>> = self.tensor.iter_first_axis_mut().collect();
        for (&p, src) in positions.iter().zip(values.iter_first_axis()) {
            rows[p].copy_from(&src)?;
        }
        Ok(())
    }

    fn missing_fill(&self, positions: &[usize]) -> Result<Tensor<T>> {
        let target = self.row_shape().insert_major(positions.len());
        if positions.is_empty() {
            return Ok(Tensor::from_vec_unchecked(Vec::new(), target));
        }
        let nan = T::missing()?;
        tracing::debug!(rows = positions.len(), "marking rows missing");
        Ok(Tensor::filled(nan, target))
    }
}
