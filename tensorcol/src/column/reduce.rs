use super::TensorColumn;
use crate::dtype::DType;
use crate::error::{Error, Result};
use crate::tensor::{DimsExt, Tensor};

impl<T: Copy> TensorColumn<T> {
    /// Appends the buffers of `columns` along the row axis, in order.
    ///
    /// Columns without rows take no part in the row shape check, so an empty
    /// column of any shape can be concatenated with anything.
    pub fn concat<'c, I>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'c TensorColumn<T>>,
        T: 'c,
    {
        let columns: Vec<&TensorColumn<T>> = columns.into_iter().collect();
        let first = *columns.first().ok_or(Error::EmptyConcat)?;
        let row_shape = columns
            .iter()
            .find(|c| !c.is_empty())
            .map_or(first.row_shape(), |c| c.row_shape());

        let mut rows = 0;
        for col in columns.iter().filter(|c| !c.is_empty()) {
            if col.row_shape() != row_shape {
                return Err(Error::shape_mismatch(row_shape, col.row_shape()));
            }
            rows += col.len();
        }

        let mut data = Vec::with_capacity(rows * row_shape.tensor_len());
        for col in &columns {
            data.extend_from_slice(col.as_slice());
        }
        tracing::debug!(columns = columns.len(), rows, "concatenated tensor columns");
        Ok(TensorColumn::from_tensor_unchecked(Tensor::from_vec_unchecked(
            data,
            row_shape.insert_major(rows),
        )))
    }
}

impl<T: DType> TensorColumn<T> {
    /// Elementwise sum over all rows, as a one-row column. Integer sums wrap
    /// on overflow.
    pub fn sum(&self) -> Self {
        let row_len = self.row_len();
        let mut acc = vec![T::ZERO; row_len];
        if row_len > 0 {
            for row in self.as_slice().chunks_exact(row_len) {
                for (a, &v) in acc.iter_mut().zip(row) {
                    *a = (*a).wrapping_add(v);
                }
            }
        }
        TensorColumn::from_tensor_unchecked(Tensor::from_vec_unchecked(acc, self.row_shape().insert_major(1)))
    }

    /// Reduction by name. Only `"sum"` is supported.
    pub fn reduce(&self, name: &str) -> Result<Self> {
        match name {
            "sum" => Ok(self.sum()),
            _ => Err(Error::NotImplemented(format!("'{name}' aggregate not implemented"))),
        }
    }
}
