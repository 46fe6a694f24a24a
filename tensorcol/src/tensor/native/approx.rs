use crate::column::TensorRow;
use crate::tensor::{ITensor, Tensor, TensorView, TensorViewMut};
use approx::AbsDiffEq;
use std::iter::zip;

macro_rules! impl_tensor_approx_with {
    ($type_name: ident, $other: ident $(, $l: lifetime )?) => {
        impl<$($l,)?'b, T: AbsDiffEq> AbsDiffEq<$other<'b, T>> for $type_name<$($l,)?T> where T::Epsilon: Copy {
            type Epsilon = T::Epsilon;
            fn default_epsilon() -> Self::Epsilon {
                T::default_epsilon()
            }
            fn abs_diff_eq(&self, other: &$other<'b, T>, epsilon: Self::Epsilon) -> bool {
                self.dims() == other.dims() && zip(self.as_ref(), other.as_ref())
                    .all(|(a, b)| T::abs_diff_eq(a, b, epsilon))
            }
        }
    };
}

macro_rules! impl_tensor_approx {
    ($type_name: ident $(, $l: lifetime )?) => {
        impl<$($l,)?T: AbsDiffEq> AbsDiffEq<Tensor<T>> for $type_name<$($l,)?T> where T::Epsilon: Copy {
            type Epsilon = T::Epsilon;
            fn default_epsilon() -> Self::Epsilon {
                T::default_epsilon()
            }
            fn abs_diff_eq(&self, other: &Tensor<T>, epsilon: Self::Epsilon) -> bool {
                self.dims() == other.dims() && zip(self.as_ref(), other.as_ref())
                    .all(|(a, b)| T::abs_diff_eq(a, b, epsilon))
            }
        }
        impl_tensor_approx_with!($type_name, TensorView $(, $l)?);
        impl_tensor_approx_with!($type_name, TensorViewMut $(, $l)?);
        impl_tensor_approx_with!($type_name, TensorRow $(, $l)?);
    };
}

impl_tensor_approx!(Tensor);
impl_tensor_approx!(TensorView, 'a);
impl_tensor_approx!(TensorViewMut, 'a);
impl_tensor_approx!(TensorRow, 'a);
