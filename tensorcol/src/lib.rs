pub mod column;
pub mod dtype;
pub mod error;
pub mod interop;
pub mod ops;
pub mod tensor;
pub mod util;

extern crate num_traits;
extern crate rand;
extern crate rand_distr;
#[cfg(feature = "serde")]
extern crate serde;
#[cfg(feature = "serde")]
extern crate serde_json;

pub use column::{ColumnInput, ColumnKey, ColumnOptions, Item, RowInput, SetValue, TensorColumn, TensorRow};
pub use dtype::DType;
pub use error::{Error, Result};
