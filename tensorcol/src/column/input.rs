use super::{TensorColumn, TensorRow};
use crate::error::{Error, Result};
use crate::tensor::{Dims, DimsExt, ITensor, StridedView, Tensor, TensorView};

const SCALAR_ROW: &[usize] = &[1];

/// A single row handed to column construction or assignment.
///
/// A bare scalar is treated as a one-element row. Tensors and rows keep their
/// own shape, including zero-dimensional ones.
pub enum RowInput<'a, T> {
    Tensor(Tensor<T>),
    View(TensorView<'a, T>),
    Row(TensorRow<'a, T>),
    Scalar(T),
}

impl<'a, T> RowInput<'a, T> {
    fn parts(&self) -> (&[T], &[usize]) {
        match self {
            RowInput::Tensor(t) => (t.as_ref(), t.dims()),
            RowInput::View(v) => (v.as_slice(), v.shape()),
            RowInput::Row(r) => (r.as_slice(), r.dims()),
            RowInput::Scalar(v) => (std::slice::from_ref(v), SCALAR_ROW),
        }
    }
}

/// Everything a column can be built from.
///
/// There is intentionally no conversion from an existing [`TensorColumn`]:
/// duplicating a column goes through [`TensorColumn::copy`].
pub enum ColumnInput<'a, T> {
    /// adopted as the buffer without copying, first axis is the row axis
    Block(Tensor<T>),
    /// copied into a new buffer, first axis is the row axis
    View(TensorView<'a, T>),
    /// a block with arbitrary strides, compacted into row-major order
    Strided(StridedView<'a, T>),
    /// per-row tensors stacked along a new leading axis
    Rows(Vec<RowInput<'a, T>>),
    /// a single row, becomes a one-row column
    Row(TensorRow<'a, T>),
    /// a single value, becomes a one-row column with one element per row
    Scalar(T),
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ColumnOptions {
    /// Compact non-contiguous input into row-major order. When disabled, a
    /// non-contiguous block is rejected since the buffer is always row-major.
    pub make_contiguous: bool,
}

impl Default for ColumnOptions {
    fn default() -> Self {
        ColumnOptions {
            make_contiguous: true,
        }
    }
}

impl<T: Copy> TensorColumn<T> {
    pub fn new<'a, I>(values: I) -> Result<Self>
    where
        I: Into<ColumnInput<'a, T>>,
        T: 'a,
    {
        Self::with_options(values, ColumnOptions::default())
    }

    pub fn with_options<'a, I>(values: I, options: ColumnOptions) -> Result<Self>
    where
        I: Into<ColumnInput<'a, T>>,
        T: 'a,
    {
        let tensor = match values.into() {
            ColumnInput::Block(tensor) => {
                require_row_axis(tensor.dims())?;
                tensor
            }
            ColumnInput::View(view) => {
                require_row_axis(view.dims())?;
                view.to_tensor()
            }
            ColumnInput::Strided(strided) => {
                require_row_axis(strided.dims())?;
                if !strided.is_contiguous() {
                    if !options.make_contiguous {
                        return Err(Error::TypeMismatch(
                            "non-contiguous block requires make_contiguous".into(),
                        ));
                    }
                    tracing::trace!(dims = ?strided.dims(), strides = ?strided.strides(), "compacting strided block");
                }
                strided.to_contiguous()
            }
            ColumnInput::Rows(rows) => stack_rows(&rows)?,
            ColumnInput::Row(row) => {
                let row = RowInput::Row(row);
                let (data, dims) = row.parts();
                Tensor::from_vec_unchecked(data.to_vec(), dims.insert_major(1))
            }
            ColumnInput::Scalar(value) => Tensor::from_vec_unchecked(vec![value], Dims::from((1, 1))),
        };
        Ok(TensorColumn::from_tensor_unchecked(tensor))
    }

    /// Stacks rows given as anything convertible into a [`RowInput`].
    pub fn from_rows<'a, I, R>(rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = R>,
        R: Into<RowInput<'a, T>>,
        T: 'a,
    {
        Self::new(ColumnInput::Rows(rows.into_iter().map(Into::into).collect()))
    }
}

fn require_row_axis(dims: &[usize]) -> Result<()> {
    if dims.is_empty() {
        return Err(Error::TypeMismatch(
            "a zero-dimensional tensor has no row axis".into(),
        ));
    }
    Ok(())
}

/// Stacks rows along a new leading axis. An empty sequence gives an empty
/// one-dimensional buffer.
pub(crate) fn stack_rows<T: Copy>(rows: &[RowInput<T>]) -> Result<Tensor<T>> {
    let Some(first) = rows.first() else {
        return Ok(Tensor::empty());
    };
    let row_shape = first.parts().1;
    let mut data = Vec::with_capacity(rows.len() * row_shape.tensor_len());
    for row in rows {
        let (values, dims) = row.parts();
        if dims != row_shape {
            return Err(Error::shape_mismatch(row_shape, dims));
        }
        data.extend_from_slice(values);
    }
    tracing::trace!(rows = rows.len(), row_shape = ?row_shape, "stacked rows");
    Ok(Tensor::from_vec_unchecked(data, row_shape.insert_major(rows.len())))
}

impl<'a, T> From<Tensor<T>> for ColumnInput<'a, T> {
    #[inline]
    fn from(value: Tensor<T>) -> Self {
        ColumnInput::Block(value)
    }
}

impl<'a, T> From<TensorView<'a, T>> for ColumnInput<'a, T> {
    #[inline]
    fn from(value: TensorView<'a, T>) -> Self {
        ColumnInput::View(value)
    }
}

impl<'a, T> From<StridedView<'a, T>> for ColumnInput<'a, T> {
    #[inline]
    fn from(value: StridedView<'a, T>) -> Self {
        ColumnInput::Strided(value)
    }
}

impl<'a, T> From<TensorRow<'a, T>> for ColumnInput<'a, T> {
    #[inline]
    fn from(value: TensorRow<'a, T>) -> Self {
        ColumnInput::Row(value)
    }
}

impl<'a, T> From<Vec<RowInput<'a, T>>> for ColumnInput<'a, T> {
    #[inline]
    fn from(value: Vec<RowInput<'a, T>>) -> Self {
        ColumnInput::Rows(value)
    }
}

impl<'a, T> From<Vec<Tensor<T>>> for ColumnInput<'a, T> {
    fn from(value: Vec<Tensor<T>>) -> Self {
        ColumnInput::Rows(value.into_iter().map(RowInput::Tensor).collect())
    }
}

impl<'a, T> From<Vec<TensorRow<'a, T>>> for ColumnInput<'a, T> {
    fn from(value: Vec<TensorRow<'a, T>>) -> Self {
        ColumnInput::Rows(value.into_iter().map(RowInput::Row).collect())
    }
}

impl<'a, T> From<Tensor<T>> for RowInput<'a, T> {
    #[inline]
    fn from(value: Tensor<T>) -> Self {
        RowInput::Tensor(value)
    }
}

impl<'a, T> From<TensorView<'a, T>> for RowInput<'a, T> {
    #[inline]
    fn from(value: TensorView<'a, T>) -> Self {
        RowInput::View(value)
    }
}

impl<'a, T> From<TensorRow<'a, T>> for RowInput<'a, T> {
    #[inline]
    fn from(value: TensorRow<'a, T>) -> Self {
        RowInput::Row(value)
    }
}

macro_rules! impl_scalar_inputs {
    ($($ty:ty),* $(,)?) => {
        $(
        impl<'a> From<$ty> for ColumnInput<'a, $ty> {
            #[inline]
            fn from(value: $ty) -> Self {
                ColumnInput::Scalar(value)
            }
        }

        impl<'a> From<Vec<$ty>> for ColumnInput<'a, $ty> {
            fn from(value: Vec<$ty>) -> Self {
                ColumnInput::Rows(value.into_iter().map(RowInput::Scalar).collect())
            }
        }

        impl<'a> From<$ty> for RowInput<'a, $ty> {
            #[inline]
            fn from(value: $ty) -> Self {
                RowInput::Scalar(value)
            }
        }
        )*
    };
}

impl_scalar_inputs!(f32, f64, i8, i32, i64, u8, u16, u32, u64, usize, bool);
#[cfg(feature = "half")]
impl_scalar_inputs!(half::f16);
