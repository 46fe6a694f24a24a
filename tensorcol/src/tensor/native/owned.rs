use crate::error::{Error, Result};
use crate::tensor::{Dims, DimsExt, ITensor, TensorBase, TensorIterMut};
use num_traits::Zero;
use rand::Rng;
use rand::distributions::Distribution;
use std::slice::{Iter, IterMut};
use std::vec::IntoIter;

/// Owned N-dimensional tensor stored contiguously in row-major order.
#[derive(Clone)]
pub struct Tensor<T> {
    data: Vec<T>,
    dims: Dims,
}

impl<T> Tensor<T> {
    /// A one-dimensional tensor of length zero.
    pub fn empty() -> Self {
        Tensor {
            data: Vec::new(),
            dims: Dims::from(0),
        }
    }

    pub fn from_vec<D: Into<Dims>>(data: Vec<T>, dims: D) -> Self {
        let dims = dims.into();
        assert_eq!(
            data.len(),
            dims.tensor_len(),
            "Mismatched data length {} and dimension {}",
            data.len(),
            dims
        );
        Tensor { data, dims }
    }

    pub fn try_from_vec<D: Into<Dims>>(data: Vec<T>, dims: D) -> Result<Self> {
        let dims = dims.into();
        if data.len() != dims.tensor_len() {
            return Err(Error::shape_mismatch(&[dims.tensor_len()], &[data.len()]));
        }
        Ok(Tensor { data, dims })
    }

    #[inline]
    pub(crate) fn from_vec_unchecked(data: Vec<T>, dims: Dims) -> Self {
        debug_assert_eq!(data.len(), dims.tensor_len());
        Tensor { data, dims }
    }

    pub fn from_distribution<R, S, D>(rng: &mut R, dist: S, dims: D) -> Self
    where
        R: Rng,
        S: Distribution<T>,
        D: Into<Dims>,
    {
        let dims = dims.into();
        let data: Vec<T> = dist.sample_iter(rng).take(dims.tensor_len()).collect();
        Tensor { data, dims }
    }

    pub fn scalar(value: T) -> Self {
        Tensor {
            data: vec![value],
            dims: Dims::scalar(),
        }
    }

    pub fn from_vec_1d(data: Vec<T>) -> Self {
        let len = data.len();
        Tensor {
            data,
            dims: Dims::from(len),
        }
    }

    pub fn from_vec_2d<const N: usize>(vec: Vec<[T; N]>) -> Self {
        let rows = vec.len();
        let data: Vec<T> = vec.into_iter().flatten().collect();
        Tensor::from_vec_unchecked(data, Dims::from((rows, N)))
    }

    pub fn from_vec_3d<const N: usize, const M: usize>(vec: Vec<[[T; M]; N]>) -> Self {
        let outer = vec.len();
        let data: Vec<T> = vec.into_iter().flatten().flatten().collect();
        Tensor::from_vec_unchecked(data, Dims::from((outer, N, M)))
    }

    #[inline]
    pub fn into_parts(self) -> (Vec<T>, Dims) {
        (self.data, self.dims)
    }

    pub fn reshape<D: Into<Dims>>(self, dims: D) -> Result<Self> {
        let dims = dims.into();
        if dims.tensor_len() != self.data.len() {
            return Err(Error::shape_mismatch(&self.dims, &dims));
        }
        Ok(Tensor {
            data: self.data,
            dims,
        })
    }

    #[inline]
    pub fn iter_first_axis_mut(&mut self) -> TensorIterMut<'_, T> {
        TensorIterMut::new(&mut self.data, &self.dims)
    }
}

impl<T: Clone> Tensor<T> {
    pub fn filled<D: Into<Dims>>(value: T, dims: D) -> Self {
        let dims = dims.into();
        Tensor {
            data: vec![value; dims.tensor_len()],
            dims,
        }
    }
    #[inline]
    pub fn fill(&mut self, fill: T) {
        self.data.fill(fill);
    }
}

impl<T: Zero + Clone> Tensor<T> {
    #[inline]
    pub fn zeroed<D: Into<Dims>>(dims: D) -> Self {
        Self::filled(T::zero(), dims)
    }
}

impl<T: Copy> Tensor<T> {
    pub fn map<U, F: FnMut(T) -> U>(&self, f: F) -> Tensor<U> {
        Tensor::from_vec_unchecked(self.data.iter().copied().map(f).collect(), self.dims.clone())
    }
}

impl<T> ITensor for Tensor<T> {
    #[inline]
    fn len(&self) -> usize {
        self.data.len()
    }
    #[inline]
    fn dims(&self) -> &[usize] {
        &self.dims
    }
}

impl<T> AsRef<[T]> for Tensor<T> {
    #[inline]
    fn as_ref(&self) -> &[T] {
        &self.data
    }
}

impl<T> AsMut<[T]> for Tensor<T> {
    #[inline]
    fn as_mut(&mut self) -> &mut [T] {
        &mut self.data
    }
}

impl<T> TensorBase<T> for Tensor<T> {
    #[inline]
    fn is_owned(&self) -> bool {
        true
    }
    #[inline]
    fn into_owned(self) -> Tensor<T> {
        self
    }
    #[inline]
    fn into_vec(self) -> Vec<T> {
        self.data
    }
}

impl<'a, T> IntoIterator for &'a Tensor<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Tensor<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.data.iter_mut()
    }
}

impl<T> IntoIterator for Tensor<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

#[macro_export]
macro_rules! tensor {
    ($([$([$($x:expr),* $(,)*]),+ $(,)*]),+ $(,)*) => {
        $crate::tensor::Tensor::from_vec_3d(vec![$([$([$($x,)*],)*],)*])
    };
    ($([$($x:expr),* $(,)*]),+ $(,)*) => {
        $crate::tensor::Tensor::from_vec_2d(vec![$([$($x,)*],)*])
    };
    ($($x:expr),* $(,)*) => {
        $crate::tensor::Tensor::from_vec_1d(vec![$($x,)*])
    };
}
