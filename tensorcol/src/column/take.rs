use super::TensorColumn;
use crate::dtype::DType;
use crate::error::{Error, Result};
use crate::tensor::{DimsExt, Tensor, TensorView, broadcast_to};

impl<T: DType> TensorColumn<T> {
    /// Gathers rows by position.
    ///
    /// Without `allow_fill` every index must lie in `0..len`. With
    /// `allow_fill`, `-1` marks a slot that is filled with `fill_value`
    /// (NaN when `None`) instead of a source row. Negative indices never wrap
    /// around. All indices are validated before the result is built.
    pub fn take(&self, indices: &[isize], allow_fill: bool, fill_value: Option<T>) -> Result<Self> {
        let fill = match fill_value {
            Some(v) => v,
            None if allow_fill && indices.contains(&-1) => T::missing()?,
            None => T::ZERO,
        };
        let fill_row = Tensor::filled(fill, self.row_shape());
        self.take_with(indices, allow_fill, TensorView::new_unchecked(fill_row.as_ref(), self.row_shape()))
    }

    /// Like [`TensorColumn::take`] with fill enabled, using a whole row
    /// (broadcast to the row shape) for the fill slots.
    pub fn take_fill_row(&self, indices: &[isize], fill_row: &TensorView<T>) -> Result<Self> {
        let fill_row = broadcast_to(fill_row, self.row_shape())?;
        self.take_with(indices, true, TensorView::new_unchecked(fill_row.as_ref(), self.row_shape()))
    }

    fn take_with(&self, indices: &[isize], allow_fill: bool, fill_row: TensorView<T>) -> Result<Self> {
        let len = self.len();
        for &index in indices {
            if allow_fill && index < -1 {
                return Err(Error::InvalidIndexer(format!(
                    "'indices' contains values less than allowed ({index} < -1)"
                )));
            }
            let is_fill = allow_fill && index == -1;
            if !is_fill && (index < 0 || index as usize >= len) {
                return Err(Error::IndexError { index, len });
            }
        }

        let row_len = self.row_len();
        let src = self.as_slice();
        let mut data = Vec::with_capacity(indices.len() * row_len);
        let mut filled = 0;
        for &index in indices {
            if index < 0 {
                data.extend_from_slice(fill_row.as_slice());
                filled += 1;
            } else {
                let p = index as usize;
                data.extend_from_slice(&src[p * row_len..(p + 1) * row_len]);
            }
        }
        if filled > 0 {
            tracing::debug!(rows = indices.len(), filled, "take with fill");
        }
        Ok(TensorColumn::from_tensor_unchecked(Tensor::from_vec_unchecked(
            data,
            self.row_shape().insert_major(indices.len()),
        )))
    }
}
