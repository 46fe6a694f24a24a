//! The tensor column: a variable-length sequence of equally shaped tensors
//! backed by one contiguous row-major buffer whose leading axis is the row
//! axis.
//!
//! Rows are read as [`TensorRow`]s that borrow the buffer. Every other
//! operation (selection, take, concat, reductions, arithmetic) produces a
//! new column with its own buffer, so no two columns ever share storage.
//! Writes only happen through [`TensorColumn::set`].
//!
//! # Missing values
//!
//! There is no validity bitmap. A row is missing when every one of its
//! elements is NaN, see [`TensorColumn::isna`]. Integer columns cannot hold
//! NaN and therefore never have missing rows; operations that would need to
//! write a NaN into them fail with [`Error::NoMissingValue`].

mod input;
mod key;
mod reduce;
mod row;
#[cfg(feature = "serde")]
mod serde;
mod take;

pub use input::*;
pub use key::*;
pub use row::*;
#[cfg(feature = "serde")]
pub use self::serde::SerializedColumn;

use crate::dtype::DType;
use crate::error::{Error, Result};
use crate::tensor::{DimsExt, ITensor, Tensor, TensorBase, TensorView, fmt_dims, fmt_tensor_data};
use std::fmt::{Debug, Display, Formatter};

#[derive(Clone, PartialEq)]
pub struct TensorColumn<T> {
    // always at least one axis, the first being the row axis
    tensor: Tensor<T>,
}

impl<T> TensorColumn<T> {
    #[inline]
    pub(crate) fn from_tensor_unchecked(tensor: Tensor<T>) -> Self {
        debug_assert!(!tensor.dims().is_empty());
        TensorColumn { tensor }
    }

    /// Number of rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.tensor.dims()[0]
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Full buffer shape, `[len, row_shape...]`.
    #[inline]
    pub fn dims(&self) -> &[usize] {
        self.tensor.dims()
    }

    #[inline]
    pub fn row_shape(&self) -> &[usize] {
        self.tensor.dims().without_major()
    }

    /// Number of elements in one row.
    #[inline]
    pub fn row_len(&self) -> usize {
        self.row_shape().tensor_len()
    }

    /// Size of the raw buffer in bytes. Rows carry no overhead of their own.
    #[inline]
    pub fn nbytes(&self) -> usize {
        self.tensor.len() * std::mem::size_of::<T>()
    }

    /// The contiguous row-major buffer.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        self.tensor.as_ref()
    }

    #[inline]
    pub fn view(&self) -> TensorView<'_, T> {
        self.tensor.view()
    }

    #[inline]
    pub fn into_tensor(self) -> Tensor<T> {
        self.tensor
    }

    /// Row `index` as a view into the buffer, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<TensorRow<'_, T>> {
        if index >= self.len() {
            return None;
        }
        let row_len = self.row_len();
        let data = &self.as_slice()[index * row_len..(index + 1) * row_len];
        Some(TensorRow::borrowed(TensorView::new_unchecked(data, self.row_shape())))
    }

    pub fn row(&self, index: usize) -> Result<TensorRow<'_, T>> {
        self.get(index).ok_or(Error::out_of_bounds(index, self.len()))
    }

    pub fn rows(&self) -> impl ExactSizeIterator<Item = TensorRow<'_, T>> {
        self.tensor.iter_first_axis().map(TensorRow::borrowed)
    }
}

impl<T: Clone> TensorColumn<T> {
    /// Deep copy of the column. This is the only way to duplicate a column;
    /// the result never shares its buffer with `self`.
    #[inline]
    pub fn copy(&self) -> Self {
        self.clone()
    }

    #[inline]
    pub fn to_tensor(&self) -> Tensor<T> {
        self.tensor.clone()
    }
}

impl<T: DType> TensorColumn<T> {
    /// Per row, whether every element of the row is NaN.
    pub fn isna(&self) -> Vec<bool> {
        self.rows().map(|row| row.isna()).collect()
    }

    /// Casts every element to `U`, failing on values `U` cannot represent
    /// (e.g. NaN or out-of-range values cast to an integer type).
    pub fn astype<U: DType>(&self) -> Result<TensorColumn<U>> {
        let data = self
            .as_slice()
            .iter()
            .map(|&v| {
                <U as num_traits::NumCast>::from(v)
                    .ok_or_else(|| Error::TypeMismatch(format!("cannot represent {v} as {}", U::NAME)))
            })
            .collect::<Result<Vec<U>>>()?;
        Ok(TensorColumn::from_tensor_unchecked(Tensor::from_vec_unchecked(
            data,
            self.tensor.dims().into(),
        )))
    }

    /// Each row rendered as text.
    pub fn to_strings(&self) -> Vec<String> {
        self.rows().map(|row| row.to_string()).collect()
    }

    /// Tensor columns cannot be factorized into codes and unique values.
    pub fn factorize(&self) -> Result<(Vec<usize>, Self)> {
        Err(Error::NotImplemented("factorize is not supported for tensor columns".into()))
    }
}

impl<T> AsRef<[T]> for TensorColumn<T> {
    #[inline]
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T: Debug> Display for TensorColumn<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        fmt_tensor_data(self.view(), f, 0)
    }
}

impl<T: Debug> Debug for TensorColumn<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        fmt_tensor_data(self.view(), f, 0)?;
        write!(f, " dtype={} len={} row_shape=", std::any::type_name::<T>(), self.len())?;
        fmt_dims(self.row_shape(), f)
    }
}

#[cfg(feature = "approx")]
impl<T: approx::AbsDiffEq> approx::AbsDiffEq for TensorColumn<T>
where
    T::Epsilon: Copy,
{
    type Epsilon = T::Epsilon;
    fn default_epsilon() -> Self::Epsilon {
        T::default_epsilon()
    }
    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.tensor.abs_diff_eq(&other.tensor, epsilon)
    }
}
