use crate::tensor::{ITensor, Tensor, TensorIter, TensorView};

pub trait TensorBase<T>: ITensor + AsRef<[T]> {
    fn is_owned(&self) -> bool;
    fn into_owned(self) -> Tensor<T>
    where
        T: Clone;
    fn into_vec(self) -> Vec<T>
    where
        T: Clone;

    #[inline]
    fn view(&self) -> TensorView<'_, T> {
        TensorView::new_unchecked(self.as_ref(), self.dims())
    }

    #[inline]
    fn iter_first_axis(&self) -> TensorIter<'_, T> {
        TensorIter::new(self.as_ref(), self.dims())
    }
}
