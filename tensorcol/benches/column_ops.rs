#[macro_use]
extern crate bencher;

use bencher::Bencher;
use tensorcol::TensorColumn;
use tensorcol::util::bench::*;

macro_rules! impl_bench {
    ($take:ident, $concat:ident, $sum:ident, $add:ident, $ty:ty, $rows:expr) => {
        fn $take(bench: &mut Bencher) {
            let col = random_column::<$ty>($rows, &ROW_SHAPE);
            let indices = take_indices($rows, $rows, 16);
            bench.iter(|| col.take(&indices, true, None).unwrap())
        }

        fn $concat(bench: &mut Bencher) {
            let a = random_column::<$ty>($rows, &ROW_SHAPE);
            let b = random_column::<$ty>($rows / 2, &ROW_SHAPE);
            bench.iter(|| TensorColumn::concat([&a, &b, &a]).unwrap())
        }

        fn $sum(bench: &mut Bencher) {
            let col = random_column::<$ty>($rows, &ROW_SHAPE);
            bench.iter(|| col.reduce("sum").unwrap())
        }

        fn $add(bench: &mut Bencher) {
            let col = random_column::<$ty>($rows, &ROW_SHAPE);
            let row = random_column::<$ty>(1, &ROW_SHAPE);
            let row = row.row(0).unwrap();
            bench.iter(|| col.try_add(&row).unwrap())
        }
    };
}

impl_bench!(take_f32_lg, concat_f32_lg, sum_f32_lg, add_f32_lg, f32, ROWS_LG);
impl_bench!(take_f32_md, concat_f32_md, sum_f32_md, add_f32_md, f32, ROWS_MD);
impl_bench!(take_f32_sm, concat_f32_sm, sum_f32_sm, add_f32_sm, f32, ROWS_SM);
benchmark_group!(
    column_f32,
    take_f32_lg,
    take_f32_md,
    take_f32_sm,
    concat_f32_lg,
    concat_f32_md,
    concat_f32_sm,
    sum_f32_lg,
    sum_f32_md,
    sum_f32_sm,
    add_f32_lg,
    add_f32_md,
    add_f32_sm
);

impl_bench!(take_f64_lg, concat_f64_lg, sum_f64_lg, add_f64_lg, f64, ROWS_LG);
impl_bench!(take_f64_md, concat_f64_md, sum_f64_md, add_f64_md, f64, ROWS_MD);
impl_bench!(take_f64_sm, concat_f64_sm, sum_f64_sm, add_f64_sm, f64, ROWS_SM);
benchmark_group!(
    column_f64,
    take_f64_lg,
    take_f64_md,
    take_f64_sm,
    concat_f64_lg,
    concat_f64_md,
    concat_f64_sm,
    sum_f64_lg,
    sum_f64_md,
    sum_f64_sm,
    add_f64_lg,
    add_f64_md,
    add_f64_sm
);

benchmark_main!(column_f32, column_f64);
