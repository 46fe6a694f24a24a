use crate::column::TensorRow;
use crate::tensor::{ITensor, Tensor, TensorView, TensorViewMut};

macro_rules! impl_tensor_extras {
    ($type_name: ident $(, $l: lifetime )?) => {
        impl<$($l,)?T> std::ops::Index<usize> for $type_name<$($l,)?T> {
            type Output = T;
            #[inline]
            fn index(&self, index: usize) -> &Self::Output {
                &self.as_ref()[index]
            }
        }

        impl<$($l,)?T> PartialEq<Tensor<T>> for $type_name<$($l,)?T> where T: PartialEq {
            fn eq(&self, other: &Tensor<T>) -> bool {
                self.dims() == other.dims() && self.as_ref() == other.as_ref()
            }
        }

        impl<$($l,)?'b, T> PartialEq<TensorView<'b, T>> for $type_name<$($l,)?T> where T: PartialEq {
            fn eq(&self, other: &TensorView<'b, T>) -> bool {
                self.dims() == other.dims() && self.as_ref() == other.as_ref()
            }
        }

        impl<$($l,)?'b, T> PartialEq<TensorViewMut<'b, T>> for $type_name<$($l,)?T> where T: PartialEq {
            fn eq(&self, other: &TensorViewMut<'b, T>) -> bool {
                self.dims() == other.dims() && self.as_ref() == other.as_ref()
            }
        }

        impl<$($l,)?'b, T> PartialEq<TensorRow<'b, T>> for $type_name<$($l,)?T> where T: PartialEq {
            fn eq(&self, other: &TensorRow<'b, T>) -> bool {
                self.dims() == other.dims() && self.as_ref() == other.as_ref()
            }
        }
    };
}

macro_rules! impl_tensor_extras_mut {
    ($type_name: ident $(, $l: lifetime )?) => {
        impl<$($l,)?T> std::ops::IndexMut<usize> for $type_name<$($l,)?T> {
            #[inline]
            fn index_mut(&mut self, index: usize) -> &mut Self::Output {
                &mut self.as_mut()[index]
            }
        }
    };
}

impl_tensor_extras!(Tensor);
impl_tensor_extras_mut!(Tensor);
impl_tensor_extras!(TensorView, 'a);
impl_tensor_extras!(TensorViewMut, 'a);
impl_tensor_extras_mut!(TensorViewMut, 'a);
impl_tensor_extras!(TensorRow, 'a);

#[cfg(test)]
mod test {
    use crate::tensor;
    use crate::tensor::{Tensor, TensorBase};

    #[test]
    fn test_cross_type_eq() {
        let a: Tensor<i32> = tensor![[1, 2], [3, 4]];
        let b = Tensor::from_vec(vec![1, 2, 3, 4], 4);
        assert!(a == a.view());
        assert!(a != b);
        assert_eq!(a[3], 4);
        let c = b.reshape((2, 2)).unwrap();
        assert!(a == c);
    }
}
