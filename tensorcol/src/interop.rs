//! The boundary a host tabular framework talks to: type registration,
//! zero-copy columnar export/import and dynamically typed keys.

use crate::column::{ColumnInput, ColumnKey, Item, SetValue, TensorColumn, TensorRow};
use crate::dtype::DType;
use crate::error::{Error, Result};
use crate::tensor::{DimsExt, Tensor};
use std::marker::PhantomData;

/// A column type registered with a host framework under a fixed name.
pub trait ColumnType: Sized {
    /// The value of a single row.
    type Element<'a>
    where
        Self: 'a;
    type Array;

    const NAME: &'static str;

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn is_named(name: &str) -> bool {
        name == Self::NAME
    }

    fn construct_from_string(name: &str) -> Result<Self>;
}

#[derive(Debug)]
pub struct TensorType<T>(PhantomData<T>);

impl<T> TensorType<T> {
    pub fn new() -> Self {
        TensorType(PhantomData)
    }
}

impl<T> Default for TensorType<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for TensorType<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for TensorType<T> {}

impl<T: DType> ColumnType for TensorType<T> {
    type Element<'a> = TensorRow<'a, T>;
    type Array = TensorColumn<T>;

    const NAME: &'static str = "TensorType";

    fn construct_from_string(name: &str) -> Result<Self> {
        if Self::is_named(name) {
            Ok(TensorType::new())
        } else {
            Err(Error::TypeMismatch(format!("Cannot construct a '{}' from '{name}'", Self::NAME)))
        }
    }
}

impl<T: DType> TensorType<T> {
    pub fn construct_array<'a, I>(&self, values: I) -> Result<TensorColumn<T>>
    where
        I: Into<ColumnInput<'a, T>>,
    {
        TensorColumn::new(values)
    }

    /// Builds a column from its stored JSON form.
    #[cfg(feature = "serde")]
    pub fn construct_from_json(&self, json: &str) -> Result<TensorColumn<T>>
    where
        T: for<'de> serde::Deserialize<'de>,
    {
        TensorColumn::from_json(json)
    }
}

/// A column laid out for a columnar wire format: the flat row-major values
/// plus the row count and shared row shape.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ColumnarBuffer<'a, T> {
    values: &'a [T],
    len: usize,
    row_shape: &'a [usize],
}

impl<'a, T> ColumnarBuffer<'a, T> {
    pub fn new(values: &'a [T], len: usize, row_shape: &'a [usize]) -> Result<Self> {
        check_parts(values.len(), len, row_shape)?;
        Ok(ColumnarBuffer { values, len, row_shape })
    }

    #[inline]
    pub fn values(&self) -> &'a [T] {
        self.values
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn row_shape(&self) -> &'a [usize] {
        self.row_shape
    }
}

fn check_parts(values: usize, len: usize, row_shape: &[usize]) -> Result<()> {
    if len * row_shape.tensor_len() != values {
        return Err(Error::shape_mismatch(&row_shape.insert_major(len), &[values]));
    }
    Ok(())
}

impl<T> TensorColumn<T> {
    /// Exposes the buffer without copying.
    pub fn export(&self) -> ColumnarBuffer<'_, T> {
        ColumnarBuffer {
            values: self.as_slice(),
            len: self.len(),
            row_shape: self.row_shape(),
        }
    }

    /// Adopts `values` as the buffer of a column of `len` rows.
    pub fn from_parts(values: Vec<T>, len: usize, row_shape: &[usize]) -> Result<Self> {
        check_parts(values.len(), len, row_shape)?;
        Ok(TensorColumn::from_tensor_unchecked(Tensor::from_vec_unchecked(
            values,
            row_shape.insert_major(len),
        )))
    }
}

impl<T: Copy> TensorColumn<T> {
    pub fn import(buffer: &ColumnarBuffer<T>) -> Result<Self> {
        Self::from_parts(buffer.values.to_vec(), buffer.len, buffer.row_shape)
    }
}

/// A key as a host framework hands it over, before normalization.
#[derive(Clone, Debug, PartialEq)]
pub enum HostKey {
    /// counted from the end when negative
    Int(i64),
    Slice {
        start: Option<i64>,
        stop: Option<i64>,
        step: Option<i64>,
    },
    IntArray(Vec<i64>),
    BoolArray(Vec<bool>),
    /// any key kind the column does not understand, by description
    Other(String),
}

impl HostKey {
    /// Normalizes the key against a column of `len` rows.
    pub fn resolve(self, len: usize) -> Result<ColumnKey> {
        match self {
            HostKey::Int(i) => normalize_position(i, len).map(ColumnKey::Row),
            HostKey::IntArray(positions) => positions
                .into_iter()
                .map(|i| normalize_position(i, len))
                .collect::<Result<Vec<usize>>>()
                .map(ColumnKey::Positions),
            HostKey::BoolArray(mask) => Ok(ColumnKey::Mask(mask)),
            HostKey::Slice { start, stop, step } => resolve_slice(start, stop, step, len),
            HostKey::Other(kind) => Err(Error::UnsupportedKey(kind)),
        }
    }
}

fn normalize_position(index: i64, len: usize) -> Result<usize> {
    let n = len as i64;
    let pos = if index < 0 { index + n } else { index };
    if pos < 0 || pos >= n {
        return Err(Error::IndexError {
            index: index as isize,
            len,
        });
    }
    Ok(pos as usize)
}

// Python slice semantics: bounds are clamped instead of rejected.
fn resolve_slice(start: Option<i64>, stop: Option<i64>, step: Option<i64>, len: usize) -> Result<ColumnKey> {
    let n = len as i64;
    let step = step.unwrap_or(1);
    if step == 0 {
        return Err(Error::InvalidIndexer("slice step cannot be zero".into()));
    }
    let (lower, upper) = if step > 0 { (0, n) } else { (-1, n - 1) };
    let clamp = |bound: i64| {
        let bound = if bound < 0 { bound + n } else { bound };
        bound.clamp(lower, upper)
    };
    let (default_start, default_stop) = if step > 0 { (lower, upper) } else { (upper, lower) };
    let start = start.map_or(default_start, clamp);
    let stop = stop.map_or(default_stop, clamp);

    if step > 0 {
        return Ok(ColumnKey::Slice {
            start: start as usize,
            stop: Some(stop.max(start) as usize),
            step: step as usize,
        });
    }
    let mut positions = Vec::new();
    let mut i = start;
    while i > stop {
        positions.push(i as usize);
        i += step;
    }
    Ok(ColumnKey::Positions(positions))
}

impl<T: Copy> TensorColumn<T> {
    pub fn get_host(&self, key: HostKey) -> Result<Item<'_, T>> {
        let key = key.resolve(self.len())?;
        self.get_item(key)
    }
}

impl<T: DType> TensorColumn<T> {
    pub fn set_host<'v, V: Into<SetValue<'v, T>>>(&mut self, key: HostKey, value: V) -> Result<()> {
        let key = key.resolve(self.len())?;
        self.set(key, value)
    }
}
