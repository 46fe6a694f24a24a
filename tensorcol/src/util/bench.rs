use crate::column::TensorColumn;
use crate::tensor::{DimsExt, Tensor};
use rand::SeedableRng;
use rand::prelude::Distribution;
use rand::rngs::StdRng;
use rand_distr::StandardNormal;

pub const ROWS_LG: usize = 100_000;
pub const ROWS_MD: usize = 10_000;
pub const ROWS_SM: usize = 1_000;
pub const ROW_SHAPE: [usize; 2] = [4, 8];
const SEED: u64 = 0x8371943;

/// A column of normally distributed values, the same for every call with the
/// same arguments.
pub fn random_column<T>(rows: usize, row_shape: &[usize]) -> TensorColumn<T>
where
    T: Copy,
    StandardNormal: Distribution<T>,
{
    let mut rng = StdRng::seed_from_u64(SEED);
    let dims = row_shape.insert_major(rows);
    TensorColumn::from_tensor_unchecked(Tensor::from_distribution(&mut rng, StandardNormal, dims))
}

/// `count` indices into a column of `rows` rows, with every `gap`-th one a
/// fill marker.
pub fn take_indices(rows: usize, count: usize, gap: usize) -> Vec<isize> {
    (0..count)
        .map(|i| if gap > 0 && i % gap == 0 { -1 } else { ((i * 7919) % rows) as isize })
        .collect()
}
