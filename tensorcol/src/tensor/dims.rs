use std::fmt::{Debug, Display, Formatter, Write};
use std::ops::Deref;

/// Owned, dynamically sized tensor shape in row-major order.
#[derive(Clone, Default, Eq, PartialEq, Hash)]
pub struct Dims(Vec<usize>);

impl Dims {
    #[inline]
    pub fn new(axes: Vec<usize>) -> Self {
        Dims(axes)
    }
    #[inline]
    pub fn scalar() -> Self {
        Dims(Vec::new())
    }
    #[inline]
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }
    #[inline]
    pub fn into_vec(self) -> Vec<usize> {
        self.0
    }
}

/// Shape arithmetic shared by owned [`Dims`] and borrowed `&[usize]` shapes.
pub trait DimsExt {
    /// number of elements a tensor of this shape holds
    fn tensor_len(&self) -> usize;
    /// size of the leading axis, `1` for a scalar shape
    fn major(&self) -> usize;
    fn without_major(&self) -> &[usize];
    fn insert_major(&self, size: usize) -> Dims;
}

impl DimsExt for [usize] {
    #[inline]
    fn tensor_len(&self) -> usize {
        self.iter().product()
    }
    #[inline]
    fn major(&self) -> usize {
        self.first().copied().unwrap_or(1)
    }
    #[inline]
    fn without_major(&self) -> &[usize] {
        self.split_first().map_or(self, |(_, rest)| rest)
    }
    fn insert_major(&self, size: usize) -> Dims {
        let mut axes = Vec::with_capacity(self.len() + 1);
        axes.push(size);
        axes.extend_from_slice(self);
        Dims(axes)
    }
}

impl Deref for Dims {
    type Target = [usize];
    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<[usize]> for Dims {
    #[inline]
    fn as_ref(&self) -> &[usize] {
        &self.0
    }
}

impl From<Vec<usize>> for Dims {
    #[inline]
    fn from(value: Vec<usize>) -> Self {
        Dims(value)
    }
}

impl From<&[usize]> for Dims {
    #[inline]
    fn from(value: &[usize]) -> Self {
        Dims(value.to_vec())
    }
}

impl<const N: usize> From<[usize; N]> for Dims {
    #[inline]
    fn from(value: [usize; N]) -> Self {
        Dims(value.to_vec())
    }
}

impl From<usize> for Dims {
    #[inline]
    fn from(value: usize) -> Self {
        Dims(vec![value])
    }
}

impl From<(usize, usize)> for Dims {
    #[inline]
    fn from((a, b): (usize, usize)) -> Self {
        Dims(vec![a, b])
    }
}

impl From<(usize, usize, usize)> for Dims {
    #[inline]
    fn from((a, b, c): (usize, usize, usize)) -> Self {
        Dims(vec![a, b, c])
    }
}

impl PartialEq<[usize]> for Dims {
    #[inline]
    fn eq(&self, other: &[usize]) -> bool {
        self.0 == other
    }
}

pub(crate) fn fmt_dims(dims: &[usize], f: &mut Formatter<'_>) -> std::fmt::Result {
    f.write_char('(')?;
    for (i, d) in dims.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        Display::fmt(d, f)?;
    }
    f.write_char(')')
}

impl Display for Dims {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        fmt_dims(&self.0, f)
    }
}

impl Debug for Dims {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        fmt_dims(&self.0, f)
    }
}

/// Row-major strides (in elements) for a contiguous tensor of the given shape.
pub fn contiguous_strides(dims: &[usize]) -> Vec<usize> {
    let mut strides = vec![0; dims.len()];
    let mut stride = 1;
    for (s, &d) in strides.iter_mut().zip(dims).rev() {
        *s = stride;
        stride *= d;
    }
    strides
}
