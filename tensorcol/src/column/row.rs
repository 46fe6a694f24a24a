use crate::dtype::DType;
use crate::tensor::{Dims, ITensor, Tensor, TensorBase, TensorView, fmt_tensor_data};
use std::fmt::{Debug, Display, Formatter};
use std::ops::Deref;

enum Holder<'a, T: 'a> {
    Borrowed(&'a [T]),
    Owned(Vec<T>),
}

impl<'a, T> Holder<'a, T> {
    fn is_owned(&self) -> bool {
        use Holder::*;
        match self {
            Borrowed(_) => false,
            Owned(_) => true,
        }
    }
    fn into_owned(self) -> Vec<T>
    where
        T: Clone,
    {
        use Holder::*;
        match self {
            Borrowed(data) => data.to_vec(),
            Owned(data) => data,
        }
    }
}

impl<'a, T> Deref for Holder<'a, T> {
    type Target = [T];
    #[inline]
    fn deref(&self) -> &Self::Target {
        use Holder::*;
        match self {
            &Borrowed(data) => data,
            Owned(data) => data.as_slice(),
        }
    }
}

impl<'a, T: Clone> Clone for Holder<'a, T> {
    fn clone(&self) -> Self {
        use Holder::*;
        match self {
            &Borrowed(data) => Borrowed(data),
            Owned(data) => Owned(data.clone()),
        }
    }
}

/// One row of a [`TensorColumn`](crate::column::TensorColumn): a tensor with
/// the column's row shape.
///
/// A row read from a column borrows the column's buffer, so it costs no
/// allocation. Rows produced by arithmetic own their values. A borrowed row
/// is a snapshot of the read; the borrow checker keeps the column from being
/// written while it is alive.
#[derive(Clone)]
pub struct TensorRow<'a, T: 'a> {
    data: Holder<'a, T>,
    dims: Holder<'a, usize>,
}

impl<'a, T: 'a> TensorRow<'a, T> {
    #[inline]
    pub fn borrowed(view: TensorView<'a, T>) -> Self {
        TensorRow {
            data: Holder::Borrowed(view.as_slice()),
            dims: Holder::Borrowed(view.shape()),
        }
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn to_tensor(&self) -> Tensor<T>
    where
        T: Clone,
    {
        Tensor::from_vec_unchecked(self.data.to_vec(), Dims::from(&*self.dims))
    }

    /// Detaches the row from the column it was read from.
    pub fn into_static(self) -> TensorRow<'static, T>
    where
        T: Clone,
    {
        TensorRow {
            data: Holder::Owned(self.data.into_owned()),
            dims: Holder::Owned(self.dims.into_owned()),
        }
    }
}

impl<T> TensorRow<'static, T> {
    pub fn owned(tensor: Tensor<T>) -> Self {
        let (data, dims) = tensor.into_parts();
        TensorRow {
            data: Holder::Owned(data),
            dims: Holder::Owned(dims.into_vec()),
        }
    }
}

impl<'a, T: DType> TensorRow<'a, T> {
    /// `true` when every element is NaN, the missing-row convention.
    #[inline]
    pub fn isna(&self) -> bool {
        self.data.iter().all(|v| v.is_nan())
    }
}

impl<'a, T: 'a> ITensor for TensorRow<'a, T> {
    #[inline]
    fn len(&self) -> usize {
        self.data.len()
    }
    #[inline]
    fn dims(&self) -> &[usize] {
        &self.dims
    }
}

impl<'a, T: 'a> AsRef<[T]> for TensorRow<'a, T> {
    #[inline]
    fn as_ref(&self) -> &[T] {
        &self.data
    }
}

impl<'a, T: 'a> TensorBase<T> for TensorRow<'a, T> {
    #[inline]
    fn is_owned(&self) -> bool {
        self.data.is_owned()
    }

    fn into_owned(self) -> Tensor<T>
    where
        T: Clone,
    {
        Tensor::from_vec_unchecked(self.data.into_owned(), Dims::new(self.dims.into_owned()))
    }

    #[inline]
    fn into_vec(self) -> Vec<T>
    where
        T: Clone,
    {
        self.data.into_owned()
    }
}

impl<'a, T> From<TensorView<'a, T>> for TensorRow<'a, T> {
    #[inline]
    fn from(value: TensorView<'a, T>) -> Self {
        TensorRow::borrowed(value)
    }
}

impl<T> From<Tensor<T>> for TensorRow<'static, T> {
    #[inline]
    fn from(value: Tensor<T>) -> Self {
        TensorRow::owned(value)
    }
}

impl<'a, T: Debug> Debug for TensorRow<'a, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        fmt_tensor_data(self.view(), f, 0)
    }
}

impl<'a, T: Debug> Display for TensorRow<'a, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        fmt_tensor_data(self.view(), f, 0)
    }
}
