//! Elementwise arithmetic and comparison shared by columns, rows and plain
//! tensors.
//!
//! Every operator is the same generic function: take the raw buffer of the
//! left operand, take the raw buffer of the right operand (or a scalar),
//! combine them with numpy broadcasting and wrap the result back into the
//! left operand's type. A column stays a column and a row stays a row.

use crate::column::{TensorColumn, TensorRow};
use crate::dtype::DType;
use crate::error::{Error, Result};
use crate::tensor::{Dims, ITensor, Tensor, TensorBase, TensorView, try_zip_broadcast, zip_broadcast};
use std::ops::{Add, Div, Mul, Rem, Sub};

/// Right-hand side of an elementwise operation.
#[derive(Copy, Clone, Debug)]
pub enum Operand<'a, T> {
    Scalar(T),
    Tensor(TensorView<'a, T>),
}

/// Anything that can stand on the right of an elementwise operation.
pub trait AsOperand<T> {
    fn as_operand(&self) -> Operand<'_, T>;
}

/// Anything that can stand on the left of an elementwise operation and
/// receive the result.
pub trait Wrap<T> {
    type Wrapped<U: 'static>;

    fn raw(&self) -> TensorView<'_, T>;

    /// Wraps a result computed from [`Wrap::raw`] into the receiver's type.
    fn wrap<U: 'static>(raw: Tensor<U>) -> Self::Wrapped<U>;
}

impl<T> AsOperand<T> for TensorColumn<T> {
    #[inline]
    fn as_operand(&self) -> Operand<'_, T> {
        Operand::Tensor(self.view())
    }
}

impl<'a, T: 'a> AsOperand<T> for TensorRow<'a, T> {
    #[inline]
    fn as_operand(&self) -> Operand<'_, T> {
        Operand::Tensor(TensorView::new_unchecked(self.as_slice(), self.dims()))
    }
}

impl<T> AsOperand<T> for Tensor<T> {
    #[inline]
    fn as_operand(&self) -> Operand<'_, T> {
        Operand::Tensor(self.view())
    }
}

impl<'a, T> AsOperand<T> for TensorView<'a, T> {
    #[inline]
    fn as_operand(&self) -> Operand<'_, T> {
        Operand::Tensor(TensorView::new_unchecked(self.as_slice(), self.shape()))
    }
}

impl<T, O: AsOperand<T> + ?Sized> AsOperand<T> for &O {
    #[inline]
    fn as_operand(&self) -> Operand<'_, T> {
        (**self).as_operand()
    }
}

macro_rules! impl_scalar_operands {
    ($($ty:ty),* $(,)?) => {
        $(
        impl AsOperand<$ty> for $ty {
            #[inline]
            fn as_operand(&self) -> Operand<'_, $ty> {
                Operand::Scalar(*self)
            }
        }
        )*
    };
}

impl_scalar_operands!(f32, f64, i8, i32, i64, u8, u16, u32, u64, usize);
#[cfg(feature = "half")]
impl_scalar_operands!(half::f16);

impl<T: DType> Wrap<T> for TensorColumn<T> {
    type Wrapped<U: 'static> = TensorColumn<U>;

    #[inline]
    fn raw(&self) -> TensorView<'_, T> {
        self.view()
    }

    #[inline]
    fn wrap<U: 'static>(raw: Tensor<U>) -> TensorColumn<U> {
        TensorColumn::from_tensor_unchecked(raw)
    }
}

impl<'a, T: DType> Wrap<T> for TensorRow<'a, T> {
    type Wrapped<U: 'static> = TensorRow<'static, U>;

    #[inline]
    fn raw(&self) -> TensorView<'_, T> {
        TensorView::new_unchecked(self.as_slice(), self.dims())
    }

    #[inline]
    fn wrap<U: 'static>(raw: Tensor<U>) -> TensorRow<'static, U> {
        TensorRow::owned(raw)
    }
}

impl<T: DType> Wrap<T> for Tensor<T> {
    type Wrapped<U: 'static> = Tensor<U>;

    #[inline]
    fn raw(&self) -> TensorView<'_, T> {
        self.view()
    }

    #[inline]
    fn wrap<U: 'static>(raw: Tensor<U>) -> Tensor<U> {
        raw
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

impl BinaryOp {
    /// Integer overflow wraps and integer division by zero fails; floats
    /// follow IEEE 754.
    #[inline]
    pub fn apply<T: DType>(self, a: T, b: T) -> Result<T> {
        Ok(match self {
            BinaryOp::Add => a.wrapping_add(b),
            BinaryOp::Sub => a.wrapping_sub(b),
            BinaryOp::Mul => a.wrapping_mul(b),
            BinaryOp::Div | BinaryOp::Rem if T::NAN.is_none() && b == T::ZERO => {
                return Err(Error::DivisionByZero);
            }
            BinaryOp::Div => a / b,
            BinaryOp::Rem => a % b,
        })
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl CompareOp {
    #[inline]
    pub fn apply<T: PartialOrd>(self, a: T, b: T) -> bool {
        match self {
            CompareOp::Eq => a == b,
            CompareOp::Ne => a != b,
            CompareOp::Lt => a < b,
            CompareOp::Le => a <= b,
            CompareOp::Gt => a > b,
            CompareOp::Ge => a >= b,
        }
    }
}

/// `lhs op rhs`, wrapped into the type of `lhs`.
pub fn binary_op<T, L, R>(lhs: &L, rhs: &R, op: BinaryOp) -> Result<L::Wrapped<T>>
where
    T: DType,
    L: Wrap<T> + ?Sized,
    R: AsOperand<T> + ?Sized,
{
    let a = lhs.raw();
    let out = match rhs.as_operand() {
        Operand::Scalar(b) => {
            let data = a.as_slice().iter().map(|&x| op.apply(x, b)).collect::<Result<Vec<T>>>()?;
            Tensor::from_vec_unchecked(data, Dims::from(a.shape()))
        }
        Operand::Tensor(b) => try_zip_broadcast(&a, &b, |x, y| op.apply(x, y))?,
    };
    Ok(L::wrap(out))
}

/// `lhs op rhs` with the scalar on the left, wrapped into the type of `rhs`.
pub fn reflected_op<T, R>(lhs: T, rhs: &R, op: BinaryOp) -> Result<R::Wrapped<T>>
where
    T: DType,
    R: Wrap<T> + ?Sized,
{
    let b = rhs.raw();
    let data = b.as_slice().iter().map(|&y| op.apply(lhs, y)).collect::<Result<Vec<T>>>()?;
    Ok(R::wrap(Tensor::from_vec_unchecked(data, Dims::from(b.shape()))))
}

/// Elementwise comparison, wrapped into the type of `lhs` with `bool`
/// elements.
pub fn compare_op<T, L, R>(lhs: &L, rhs: &R, op: CompareOp) -> Result<L::Wrapped<bool>>
where
    T: DType,
    L: Wrap<T> + ?Sized,
    R: AsOperand<T> + ?Sized,
{
    let a = lhs.raw();
    let out = match rhs.as_operand() {
        Operand::Scalar(b) => {
            let data = a.as_slice().iter().map(|&x| op.apply(x, b)).collect();
            Tensor::from_vec_unchecked(data, Dims::from(a.shape()))
        }
        Operand::Tensor(b) => zip_broadcast(&a, &b, |x, y| op.apply(x, y))?,
    };
    Ok(L::wrap(out))
}

macro_rules! impl_elementwise_methods {
    ([$($lt:lifetime)?] $ty:ty) => {
        impl<$($lt,)? T: DType> $ty {
            pub fn try_add<R: AsOperand<T> + ?Sized>(&self, rhs: &R) -> Result<<Self as Wrap<T>>::Wrapped<T>> {
                binary_op(self, rhs, BinaryOp::Add)
            }

            pub fn try_sub<R: AsOperand<T> + ?Sized>(&self, rhs: &R) -> Result<<Self as Wrap<T>>::Wrapped<T>> {
                binary_op(self, rhs, BinaryOp::Sub)
            }

            pub fn try_mul<R: AsOperand<T> + ?Sized>(&self, rhs: &R) -> Result<<Self as Wrap<T>>::Wrapped<T>> {
                binary_op(self, rhs, BinaryOp::Mul)
            }

            pub fn try_div<R: AsOperand<T> + ?Sized>(&self, rhs: &R) -> Result<<Self as Wrap<T>>::Wrapped<T>> {
                binary_op(self, rhs, BinaryOp::Div)
            }

            pub fn try_rem<R: AsOperand<T> + ?Sized>(&self, rhs: &R) -> Result<<Self as Wrap<T>>::Wrapped<T>> {
                binary_op(self, rhs, BinaryOp::Rem)
            }

            pub fn compare<R: AsOperand<T> + ?Sized>(&self, rhs: &R, op: CompareOp) -> Result<<Self as Wrap<T>>::Wrapped<bool>> {
                compare_op(self, rhs, op)
            }

            pub fn elem_eq<R: AsOperand<T> + ?Sized>(&self, rhs: &R) -> Result<<Self as Wrap<T>>::Wrapped<bool>> {
                compare_op(self, rhs, CompareOp::Eq)
            }

            pub fn elem_ne<R: AsOperand<T> + ?Sized>(&self, rhs: &R) -> Result<<Self as Wrap<T>>::Wrapped<bool>> {
                compare_op(self, rhs, CompareOp::Ne)
            }

            pub fn elem_lt<R: AsOperand<T> + ?Sized>(&self, rhs: &R) -> Result<<Self as Wrap<T>>::Wrapped<bool>> {
                compare_op(self, rhs, CompareOp::Lt)
            }

            pub fn elem_le<R: AsOperand<T> + ?Sized>(&self, rhs: &R) -> Result<<Self as Wrap<T>>::Wrapped<bool>> {
                compare_op(self, rhs, CompareOp::Le)
            }

            pub fn elem_gt<R: AsOperand<T> + ?Sized>(&self, rhs: &R) -> Result<<Self as Wrap<T>>::Wrapped<bool>> {
                compare_op(self, rhs, CompareOp::Gt)
            }

            pub fn elem_ge<R: AsOperand<T> + ?Sized>(&self, rhs: &R) -> Result<<Self as Wrap<T>>::Wrapped<bool>> {
                compare_op(self, rhs, CompareOp::Ge)
            }
        }
    };
}

impl_elementwise_methods!([] TensorColumn<T>);
impl_elementwise_methods!(['a] TensorRow<'a, T>);

fn unwrap_op<V>(result: Result<V>) -> V {
    match result {
        Ok(v) => v,
        Err(e) => panic!("{e}"),
    }
}

// The std operators panic where the `try_` methods return an error.
macro_rules! impl_std_op {
    ([$($lt:lifetime)?] $ty:ty => $out:ty, $trait:ident, $method:ident, $op:expr) => {
        impl<$($lt,)? T: DType, R: AsOperand<T>> $trait<R> for &$ty {
            type Output = $out;
            #[inline]
            fn $method(self, rhs: R) -> $out {
                unwrap_op(binary_op(self, &rhs, $op))
            }
        }

        impl<$($lt,)? T: DType, R: AsOperand<T>> $trait<R> for $ty {
            type Output = $out;
            #[inline]
            fn $method(self, rhs: R) -> $out {
                unwrap_op(binary_op(&self, &rhs, $op))
            }
        }
    };
}

macro_rules! impl_std_ops {
    ([$($lt:lifetime)?] $ty:ty => $out:ty) => {
        impl_std_op!([$($lt)?] $ty => $out, Add, add, BinaryOp::Add);
        impl_std_op!([$($lt)?] $ty => $out, Sub, sub, BinaryOp::Sub);
        impl_std_op!([$($lt)?] $ty => $out, Mul, mul, BinaryOp::Mul);
        impl_std_op!([$($lt)?] $ty => $out, Div, div, BinaryOp::Div);
        impl_std_op!([$($lt)?] $ty => $out, Rem, rem, BinaryOp::Rem);
    };
}

impl_std_ops!([] TensorColumn<T> => TensorColumn<T>);
impl_std_ops!(['a] TensorRow<'a, T> => TensorRow<'static, T>);

macro_rules! impl_scalar_lhs_op {
    ($ty:ty, $trait:ident, $method:ident, $op:expr) => {
        impl $trait<&TensorColumn<$ty>> for $ty {
            type Output = TensorColumn<$ty>;
            #[inline]
            fn $method(self, rhs: &TensorColumn<$ty>) -> TensorColumn<$ty> {
                unwrap_op(reflected_op(self, rhs, $op))
            }
        }

        impl $trait<TensorColumn<$ty>> for $ty {
            type Output = TensorColumn<$ty>;
            #[inline]
            fn $method(self, rhs: TensorColumn<$ty>) -> TensorColumn<$ty> {
                unwrap_op(reflected_op(self, &rhs, $op))
            }
        }

        impl<'a> $trait<&TensorRow<'a, $ty>> for $ty {
            type Output = TensorRow<'static, $ty>;
            #[inline]
            fn $method(self, rhs: &TensorRow<'a, $ty>) -> TensorRow<'static, $ty> {
                unwrap_op(reflected_op(self, rhs, $op))
            }
        }
    };
}

macro_rules! impl_scalar_lhs {
    ($($ty:ty),* $(,)?) => {
        $(
        impl_scalar_lhs_op!($ty, Add, add, BinaryOp::Add);
        impl_scalar_lhs_op!($ty, Sub, sub, BinaryOp::Sub);
        impl_scalar_lhs_op!($ty, Mul, mul, BinaryOp::Mul);
        impl_scalar_lhs_op!($ty, Div, div, BinaryOp::Div);
        impl_scalar_lhs_op!($ty, Rem, rem, BinaryOp::Rem);
        )*
    };
}

impl_scalar_lhs!(f32, f64, i8, i32, i64, u8, u16, u32, u64, usize);
