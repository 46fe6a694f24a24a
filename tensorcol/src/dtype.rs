use num_traits::{Num, NumAssignOps, NumCast, WrappingAdd, WrappingMul, WrappingSub};
use std::fmt::{Debug, Display};

/// Numeric element type of a tensor column.
///
/// `NAN` is the missing-value sentinel. Integer types have none, so rows of an
/// integer column can never be missing and any operation that would have to
/// write a NaN into one fails with [`crate::Error::NoMissingValue`].
///
/// The `wrapping_*` operations wrap integers on overflow in every build
/// profile; floats use plain IEEE arithmetic.
pub trait DType: 'static + Sized + Copy + Debug + Display + PartialOrd + Num + NumAssignOps + NumCast {
    const ZERO: Self;
    const NAN: Option<Self>;
    const NAME: &'static str;
    fn is_nan(self) -> bool;
    fn wrapping_add(self, rhs: Self) -> Self;
    fn wrapping_sub(self, rhs: Self) -> Self;
    fn wrapping_mul(self, rhs: Self) -> Self;

    #[inline]
    fn missing() -> crate::Result<Self> {
        Self::NAN.ok_or(crate::Error::NoMissingValue(Self::NAME))
    }
}

macro_rules! impl_ieee_arith {
    () => {
        #[inline]
        fn wrapping_add(self, rhs: Self) -> Self {
            self + rhs
        }
        #[inline]
        fn wrapping_sub(self, rhs: Self) -> Self {
            self - rhs
        }
        #[inline]
        fn wrapping_mul(self, rhs: Self) -> Self {
            self * rhs
        }
    };
}

macro_rules! impl_dtype_float {
    ($ty:ty, $name:literal) => {
        impl DType for $ty {
            const ZERO: Self = 0.0;
            const NAN: Option<Self> = Some(<$ty>::NAN);
            const NAME: &'static str = $name;
            #[inline]
            fn is_nan(self) -> bool {
                <$ty>::is_nan(self)
            }
            impl_ieee_arith!();
        }
    };
}

macro_rules! impl_dtype_int {
    ($ty:ty, $name:literal) => {
        impl DType for $ty {
            const ZERO: Self = 0;
            const NAN: Option<Self> = None;
            const NAME: &'static str = $name;
            #[inline]
            fn is_nan(self) -> bool {
                false
            }
            #[inline]
            fn wrapping_add(self, rhs: Self) -> Self {
                WrappingAdd::wrapping_add(&self, &rhs)
            }
            #[inline]
            fn wrapping_sub(self, rhs: Self) -> Self {
                WrappingSub::wrapping_sub(&self, &rhs)
            }
            #[inline]
            fn wrapping_mul(self, rhs: Self) -> Self {
                WrappingMul::wrapping_mul(&self, &rhs)
            }
        }
    };
}

impl_dtype_float!(f32, "float32");
impl_dtype_float!(f64, "float64");
impl_dtype_int!(i8, "int8");
impl_dtype_int!(i32, "int32");
impl_dtype_int!(i64, "int64");
impl_dtype_int!(u8, "uint8");
impl_dtype_int!(u16, "uint16");
impl_dtype_int!(u32, "uint32");
impl_dtype_int!(u64, "uint64");
impl_dtype_int!(usize, "uintp");

#[cfg(feature = "half")]
impl DType for half::f16 {
    const ZERO: Self = half::f16::ZERO;
    const NAN: Option<Self> = Some(half::f16::NAN);
    const NAME: &'static str = "float16";
    #[inline]
    fn is_nan(self) -> bool {
        half::f16::is_nan(self)
    }
    impl_ieee_arith!();
}
