mod broadcast;
mod dims;
mod native;

pub use broadcast::*;
pub use dims::*;
pub use native::base::*;
pub use native::iter::*;
pub use native::owned::*;
pub use native::strided::*;
pub use native::view::*;

pub(crate) use dims::fmt_dims;
pub(crate) use native::debug::fmt_tensor_data;

/// Shape information shared by every tensor-like type in the crate
pub trait ITensor {
    /// total number of elements
    fn len(&self) -> usize;
    fn dims(&self) -> &[usize];
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
