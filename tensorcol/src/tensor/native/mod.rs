pub mod base;
pub(crate) mod debug;
mod extras;
pub mod iter;
pub mod owned;
pub mod strided;
pub mod view;
#[cfg(feature = "approx")]
mod approx;
