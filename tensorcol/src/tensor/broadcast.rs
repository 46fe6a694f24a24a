use crate::error::{Error, Result};
use crate::tensor::{Dims, DimsExt, ITensor, Tensor, TensorView};

/// Walks every position of `dims` in row-major order and yields the linear
/// offset of that position under `strides`. A zero stride repeats an axis.
pub(crate) struct Offsets {
    dims: Vec<usize>,
    strides: Vec<usize>,
    index: Vec<usize>,
    offset: usize,
    remaining: usize,
}

impl Offsets {
    pub(crate) fn new(dims: &[usize], strides: Vec<usize>) -> Self {
        debug_assert_eq!(dims.len(), strides.len());
        Offsets {
            dims: dims.to_vec(),
            strides,
            index: vec![0; dims.len()],
            offset: 0,
            remaining: dims.tensor_len(),
        }
    }

    /// Offsets into a contiguous tensor of shape `src` while walking `out`.
    fn broadcasting(src: &[usize], out: &[usize]) -> Self {
        let lead = out.len() - src.len();
        let mut strides = vec![0; out.len()];
        let mut stride = 1;
        for (i, &d) in src.iter().enumerate().rev() {
            if d != 1 {
                strides[lead + i] = stride;
            }
            stride *= d;
        }
        Offsets::new(out, strides)
    }
}

impl Iterator for Offsets {
    type Item = usize;
    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let current = self.offset;
        for axis in (0..self.dims.len()).rev() {
            self.index[axis] += 1;
            self.offset += self.strides[axis];
            if self.index[axis] < self.dims[axis] {
                break;
            }
            self.offset -= self.strides[axis] * self.index[axis];
            self.index[axis] = 0;
        }
        Some(current)
    }
    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

/// Shape of the result of combining tensors of shape `a` and `b` elementwise,
/// following numpy's right-aligned broadcasting rules.
pub fn broadcast_dims(a: &[usize], b: &[usize]) -> Result<Dims> {
    let n = a.len().max(b.len());
    let mut out = vec![0; n];
    for (i, slot) in out.iter_mut().enumerate() {
        let da = axis_from_end(a, n - 1 - i);
        let db = axis_from_end(b, n - 1 - i);
        *slot = match (da, db) {
            (x, y) if x == y => x,
            (1, y) => y,
            (x, 1) => x,
            _ => return Err(Error::shape_mismatch(a, b)),
        };
    }
    Ok(Dims::new(out))
}

#[inline]
fn axis_from_end(dims: &[usize], from_end: usize) -> usize {
    if from_end < dims.len() {
        dims[dims.len() - 1 - from_end]
    } else {
        1
    }
}

/// Applies `f` to every broadcast pair of elements from `a` and `b`.
pub fn zip_broadcast<A, B, R, F>(a: &TensorView<A>, b: &TensorView<B>, mut f: F) -> Result<Tensor<R>>
where
    A: Copy,
    B: Copy,
    F: FnMut(A, B) -> R,
{
    let (la, lb) = (a.as_slice(), b.as_slice());
    if a.dims() == b.dims() {
        let data = la.iter().zip(lb).map(|(&x, &y)| f(x, y)).collect();
        return Ok(Tensor::from_vec_unchecked(data, Dims::from(a.dims())));
    }
    let dims = broadcast_dims(a.dims(), b.dims())?;
    let data = Offsets::broadcasting(a.dims(), &dims)
        .zip(Offsets::broadcasting(b.dims(), &dims))
        .map(|(i, j)| f(la[i], lb[j]))
        .collect();
    Ok(Tensor::from_vec_unchecked(data, dims))
}

/// Like [`zip_broadcast`] but `f` may fail, stopping at the first error.
pub fn try_zip_broadcast<A, B, R, F>(a: &TensorView<A>, b: &TensorView<B>, mut f: F) -> Result<Tensor<R>>
where
    A: Copy,
    B: Copy,
    F: FnMut(A, B) -> Result<R>,
{
    let (la, lb) = (a.as_slice(), b.as_slice());
    let dims = broadcast_dims(a.dims(), b.dims())?;
    let data = Offsets::broadcasting(a.dims(), &dims)
        .zip(Offsets::broadcasting(b.dims(), &dims))
        .map(|(i, j)| f(la[i], lb[j]))
        .collect::<Result<Vec<R>>>()?;
    Ok(Tensor::from_vec_unchecked(data, dims))
}

/// Expands `src` to exactly `target`, repeating along broadcast axes.
pub fn broadcast_to<T: Copy>(src: &TensorView<T>, target: &[usize]) -> Result<Tensor<T>> {
    let dims = broadcast_dims(src.dims(), target)?;
    if dims != *target {
        return Err(Error::shape_mismatch(target, src.dims()));
    }
    let data = src.as_slice();
    let out = Offsets::broadcasting(src.dims(), target)
        .map(|i| data[i])
        .collect();
    Ok(Tensor::from_vec_unchecked(out, dims))
}
