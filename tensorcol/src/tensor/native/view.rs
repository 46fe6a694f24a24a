use super::base::TensorBase;
use super::owned::Tensor;
use crate::error::{Error, Result};
use crate::tensor::{Dims, DimsExt, ITensor};
use std::ops::{Deref, DerefMut};
use std::slice::Iter;

/// Borrowed, read-only view over a contiguous row-major tensor.
pub struct TensorView<'a, T> {
    data: &'a [T],
    dims: &'a [usize],
}

impl<'a, T> TensorView<'a, T> {
    pub fn from_slice(data: &'a [T], dims: &'a [usize]) -> Self {
        assert_eq!(
            data.len(),
            dims.tensor_len(),
            "Mismatched data length {} and dimension {:?}",
            data.len(),
            dims
        );
        TensorView { data, dims }
    }

    pub fn try_from_slice(data: &'a [T], dims: &'a [usize]) -> Result<Self> {
        if data.len() != dims.tensor_len() {
            return Err(Error::shape_mismatch(&[dims.tensor_len()], &[data.len()]));
        }
        Ok(TensorView { data, dims })
    }

    #[inline]
    pub(crate) fn new_unchecked(data: &'a [T], dims: &'a [usize]) -> Self {
        debug_assert_eq!(data.len(), dims.tensor_len());
        TensorView { data, dims }
    }

    /// The viewed elements, borrowed for the full lifetime of the view.
    #[inline]
    pub fn as_slice(&self) -> &'a [T] {
        self.data
    }

    /// The viewed shape, borrowed for the full lifetime of the view.
    #[inline]
    pub fn shape(&self) -> &'a [usize] {
        self.dims
    }

    #[inline]
    pub fn to_tensor(&self) -> Tensor<T>
    where
        T: Clone,
    {
        Tensor::from_vec_unchecked(self.data.to_vec(), Dims::from(self.dims))
    }
}

impl<'a, T> Clone for TensorView<'a, T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T> Copy for TensorView<'a, T> {}

impl<'a, T> ITensor for TensorView<'a, T> {
    #[inline]
    fn len(&self) -> usize {
        self.data.len()
    }
    #[inline]
    fn dims(&self) -> &[usize] {
        self.dims
    }
}

impl<'a, T> Deref for TensorView<'a, T> {
    type Target = [T];
    #[inline]
    fn deref(&self) -> &Self::Target {
        self.data
    }
}

impl<'a, T> AsRef<[T]> for TensorView<'a, T> {
    #[inline]
    fn as_ref(&self) -> &[T] {
        self.data
    }
}

impl<'a, T> TensorBase<T> for TensorView<'a, T> {
    #[inline]
    fn is_owned(&self) -> bool {
        false
    }
    fn into_owned(self) -> Tensor<T>
    where
        T: Clone,
    {
        self.to_tensor()
    }
    fn into_vec(self) -> Vec<T>
    where
        T: Clone,
    {
        self.data.to_vec()
    }
}

impl<'a, T> IntoIterator for TensorView<'a, T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

/// Borrowed, writable view over a contiguous row-major tensor.
pub struct TensorViewMut<'a, T> {
    data: &'a mut [T],
    dims: &'a [usize],
}

impl<'a, T> TensorViewMut<'a, T> {
    #[inline]
    pub(crate) fn new_unchecked(data: &'a mut [T], dims: &'a [usize]) -> Self {
        debug_assert_eq!(data.len(), dims.tensor_len());
        TensorViewMut { data, dims }
    }

    /// Overwrites every element with the matching element of `src`.
    pub fn copy_from(&mut self, src: &TensorView<T>) -> Result<()>
    where
        T: Copy,
    {
        if self.dims != src.dims() {
            return Err(Error::shape_mismatch(self.dims, src.dims()));
        }
        self.data.copy_from_slice(src);
        Ok(())
    }
}

impl<'a, T> ITensor for TensorViewMut<'a, T> {
    #[inline]
    fn len(&self) -> usize {
        self.data.len()
    }
    #[inline]
    fn dims(&self) -> &[usize] {
        self.dims
    }
}

impl<'a, T> Deref for TensorViewMut<'a, T> {
    type Target = [T];
    #[inline]
    fn deref(&self) -> &Self::Target {
        &*self.data
    }
}

impl<'a, T> DerefMut for TensorViewMut<'a, T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.data
    }
}

impl<'a, T> AsRef<[T]> for TensorViewMut<'a, T> {
    #[inline]
    fn as_ref(&self) -> &[T] {
        &*self.data
    }
}

impl<'a, T> AsMut<[T]> for TensorViewMut<'a, T> {
    #[inline]
    fn as_mut(&mut self) -> &mut [T] {
        &mut *self.data
    }
}

