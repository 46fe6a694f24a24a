use crate::tensor::{DimsExt, TensorView, TensorViewMut};

/// Iterates the leading axis of a tensor, yielding each sub-tensor as a view.
///
/// Works for zero-sized inner shapes, where every yielded view is empty.
pub struct TensorIter<'a, T> {
    data: &'a [T],
    stride: usize,
    remaining: usize,
    out_dims: &'a [usize],
}

impl<'a, T> TensorIter<'a, T> {
    pub(crate) fn new(data: &'a [T], dims: &'a [usize]) -> Self {
        let out_dims = dims.without_major();
        let stride = out_dims.tensor_len();
        debug_assert_eq!(data.len(), stride * dims.major());
        TensorIter {
            data,
            stride,
            remaining: dims.major(),
            out_dims,
        }
    }
}

pub struct TensorIterMut<'a, T> {
    data: &'a mut [T],
    stride: usize,
    remaining: usize,
    out_dims: &'a [usize],
}

impl<'a, T> TensorIterMut<'a, T> {
    pub(crate) fn new(data: &'a mut [T], dims: &'a [usize]) -> Self {
        let out_dims = dims.without_major();
        let stride = out_dims.tensor_len();
        debug_assert_eq!(data.len(), stride * dims.major());
        TensorIterMut {
            data,
            stride,
            remaining: dims.major(),
            out_dims,
        }
    }
}

impl<'a, T> Iterator for TensorIter<'a, T> {
    type Item = TensorView<'a, T>;
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let (chunk, rest) = self.data.split_at(self.stride);
        self.data = rest;
        Some(TensorView::new_unchecked(chunk, self.out_dims))
    }
    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        if n >= self.remaining {
            self.data = &[];
            self.remaining = 0;
            return None;
        }
        self.data = &self.data[n * self.stride..];
        self.remaining -= n;
        self.next()
    }
}

impl<'a, T> ExactSizeIterator for TensorIter<'a, T> {}

impl<'a, T> Iterator for TensorIterMut<'a, T> {
    type Item = TensorViewMut<'a, T>;
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let data = std::mem::take(&mut self.data);
        let (chunk, rest) = data.split_at_mut(self.stride);
        self.data = rest;
        Some(TensorViewMut::new_unchecked(chunk, self.out_dims))
    }
    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> ExactSizeIterator for TensorIterMut<'a, T> {}

#[cfg(test)]
mod test {
    use crate::tensor;
    use crate::tensor::{ITensor, Tensor, TensorBase};

    #[test]
    fn test_tensor_iter_2d() {
        let t: Tensor<i32> = tensor![[1, 2], [3, 4], [5, 6]];
        let rows: Vec<Vec<i32>> = t.iter_first_axis().map(|r| r.to_vec()).collect();
        assert_eq!(rows, vec![vec![1, 2], vec![3, 4], vec![5, 6]]);
        assert!(t.iter_first_axis().all(|r| r.dims() == [2]));
        assert_eq!(t.iter_first_axis().len(), 3);
    }

    #[test]
    fn test_tensor_iter_nth() {
        let t = Tensor::from_vec((0..12).collect::<Vec<i32>>(), (4, 3));
        let mut iter = t.iter_first_axis();
        assert_eq!(iter.nth(2).unwrap().as_slice(), &[6, 7, 8]);
        assert_eq!(iter.next().unwrap().as_slice(), &[9, 10, 11]);
        assert!(iter.next().is_none());
        assert!(t.iter_first_axis().nth(4).is_none());
    }

    #[test]
    fn test_tensor_iter_zero_sized_rows() {
        let t: Tensor<f32> = Tensor::from_vec(vec![], (3, 0));
        let rows: Vec<_> = t.iter_first_axis().collect();
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.is_empty()));
    }

    #[test]
    fn test_tensor_iter_mut() {
        let mut t = Tensor::from_vec(vec![0; 6], (3, 2));
        for (i, mut row) in t.iter_first_axis_mut().enumerate() {
            row.fill(i as i32);
        }
        assert_eq!(t.as_ref(), &[0, 0, 1, 1, 2, 2]);
    }
}
