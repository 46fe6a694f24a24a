use crate::error::{Error, Result};
use crate::tensor::{Dims, DimsExt, Tensor, contiguous_strides, broadcast::Offsets};

/// Borrowed tensor whose elements are laid out with arbitrary (non-negative)
/// element strides, such as a transposed or sub-sampled block owned elsewhere.
pub struct StridedView<'a, T> {
    data: &'a [T],
    dims: Dims,
    strides: Vec<usize>,
}

impl<'a, T> StridedView<'a, T> {
    pub fn new<D: Into<Dims>>(data: &'a [T], dims: D, strides: Vec<usize>) -> Result<Self> {
        let dims = dims.into();
        if strides.len() != dims.len() {
            return Err(Error::shape_mismatch(&dims, &strides));
        }
        if dims.tensor_len() > 0 {
            let last = dims
                .iter()
                .zip(&strides)
                .map(|(&d, &s)| (d - 1) * s)
                .sum::<usize>();
            if last >= data.len() {
                return Err(Error::out_of_bounds(last, data.len()));
            }
        }
        Ok(StridedView { data, dims, strides })
    }

    /// Row-major (C order) view of a contiguous slice.
    pub fn row_major<D: Into<Dims>>(data: &'a [T], dims: D) -> Result<Self> {
        let dims = dims.into();
        let strides = contiguous_strides(&dims);
        Self::new(data, dims, strides)
    }

    /// Column-major (Fortran order) view of a contiguous slice.
    pub fn column_major<D: Into<Dims>>(data: &'a [T], dims: D) -> Result<Self> {
        let dims = dims.into();
        let mut strides = vec![0; dims.len()];
        let mut stride = 1;
        for (s, &d) in strides.iter_mut().zip(dims.iter()) {
            *s = stride;
            stride *= d;
        }
        Self::new(data, dims, strides)
    }

    #[inline]
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    #[inline]
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    pub fn is_contiguous(&self) -> bool {
        self.dims.tensor_len() == 0
            || self
                .dims
                .iter()
                .zip(self.strides.iter().zip(contiguous_strides(&self.dims)))
                .all(|(&d, (&s, c))| d == 1 || s == c)
    }

    /// Gathers the elements into a new row-major tensor.
    pub fn to_contiguous(&self) -> Tensor<T>
    where
        T: Copy,
    {
        let data = Offsets::new(&self.dims, self.strides.clone())
            .map(|offset| self.data[offset])
            .collect();
        Tensor::from_vec_unchecked(data, self.dims.clone())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::tensor::ITensor;

    #[test]
    fn test_column_major_to_contiguous() {
        // 2x3 matrix [[1, 2, 3], [4, 5, 6]] stored column by column
        let data = [1, 4, 2, 5, 3, 6];
        let view = StridedView::column_major(&data, (2, 3)).unwrap();
        assert!(!view.is_contiguous());
        let t = view.to_contiguous();
        assert_eq!(t.dims(), &[2, 3]);
        assert_eq!(t.as_ref(), &[1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_row_major_is_contiguous() {
        let data = [1.0, 2.0, 3.0, 4.0];
        let view = StridedView::row_major(&data, (2, 2)).unwrap();
        assert!(view.is_contiguous());
        assert_eq!(view.to_contiguous().as_ref(), &data);
    }

    #[test]
    fn test_every_other_row() {
        let data: Vec<i32> = (0..12).collect();
        let view = StridedView::new(&data, (3, 2), vec![4, 1]).unwrap();
        assert_eq!(view.to_contiguous().as_ref(), &[0, 1, 4, 5, 8, 9]);
    }

    #[test]
    fn test_out_of_bounds_strides() {
        let data = [0; 4];
        assert_eq!(
            StridedView::new(&data, (2, 2), vec![4, 1]).err(),
            Some(Error::IndexError { index: 5, len: 4 })
        );
        assert!(StridedView::new(&data, (2, 2), vec![1]).is_err());
    }
}
