//! Property-based tests for tensor columns
//!
//! Construction, gather, concatenation, reduction and arithmetic are checked
//! against straightforward per-row reference computations.

use proptest::prelude::*;
use tensorcol::tensor::{ITensor, Tensor};
use tensorcol::{Error, RowInput, SetValue, TensorColumn};

// ============================================================================
// Test Utilities
// ============================================================================

/// Strategy for row shapes of up to three axes
fn row_shape_strategy() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(1usize..4, 0..=3)
}

/// Strategy for a column: its rows as flat vectors plus the row shape
fn rows_strategy() -> impl Strategy<Value = (Vec<Vec<f64>>, Vec<usize>)> {
    (row_shape_strategy(), 0usize..8).prop_flat_map(|(shape, n)| {
        let row_len: usize = shape.iter().product();
        (
            prop::collection::vec(prop::collection::vec(-100.0f64..100.0, row_len), n),
            Just(shape),
        )
    })
}

fn build(rows: &[Vec<f64>], shape: &[usize]) -> TensorColumn<f64> {
    let inputs: Vec<RowInput<f64>> = rows
        .iter()
        .map(|r| RowInput::Tensor(Tensor::from_vec(r.clone(), shape.to_vec())))
        .collect();
    TensorColumn::from_rows(inputs).unwrap()
}

// ============================================================================
// Construction Properties
// ============================================================================

proptest! {
    /// Property: one column row per input row, each with the input shape
    #[test]
    fn prop_construct_len_and_shape((rows, shape) in rows_strategy()) {
        prop_assume!(!rows.is_empty());
        let col = build(&rows, &shape);
        prop_assert_eq!(col.len(), rows.len());
        for (row, expected) in col.rows().zip(&rows) {
            prop_assert_eq!(row.dims(), shape.as_slice());
            prop_assert_eq!(row.as_slice(), expected.as_slice());
        }
    }

    /// Property: rows of differing shape never build a column
    #[test]
    fn prop_construct_shape_mismatch(a in 1usize..5, b in 1usize..5) {
        prop_assume!(a != b);
        let rows = vec![
            RowInput::Tensor(Tensor::<f64>::filled(1.0, a)),
            RowInput::Tensor(Tensor::<f64>::filled(2.0, b)),
        ];
        let is_shape_mismatch = matches!(TensorColumn::from_rows(rows), Err(Error::ShapeMismatch { .. }));
        prop_assert!(is_shape_mismatch);
    }

    /// Property: a row is missing iff all of its elements are NaN
    #[test]
    fn prop_isna_matches_all_nan(mask in prop::collection::vec(0u8..3, 1..10)) {
        // 0 = regular row, 1 = all NaN, 2 = partially NaN
        let rows: Vec<Vec<f64>> = mask
            .iter()
            .map(|m| match m {
                0 => vec![1.0, 2.0],
                1 => vec![f64::NAN, f64::NAN],
                _ => vec![f64::NAN, 3.0],
            })
            .collect();
        let col = build(&rows, &[2]);
        let expected: Vec<bool> = mask.iter().map(|&m| m == 1).collect();
        prop_assert_eq!(col.isna(), expected);
    }
}

// ============================================================================
// Gather Properties
// ============================================================================

proptest! {
    /// Property: take without fill returns exactly the indexed rows
    #[test]
    fn prop_take_gathers_rows(
        (rows, shape) in rows_strategy(),
        picks in prop::collection::vec(0usize..1000, 0..12),
    ) {
        prop_assume!(!rows.is_empty());
        let col = build(&rows, &shape);
        let indices: Vec<isize> = picks.iter().map(|p| (p % rows.len()) as isize).collect();
        let taken = col.take(&indices, false, None).unwrap();
        prop_assert_eq!(taken.len(), indices.len());
        for (row, &i) in taken.rows().zip(&indices) {
            prop_assert_eq!(row.as_slice(), rows[i as usize].as_slice());
        }
    }

    /// Property: fill slots hold the fill value and other slots the source row
    #[test]
    fn prop_take_with_fill(
        (rows, shape) in rows_strategy(),
        picks in prop::collection::vec(prop::option::of(0usize..1000), 0..12),
        fill in -5.0f64..5.0,
    ) {
        prop_assume!(!rows.is_empty());
        let col = build(&rows, &shape);
        let indices: Vec<isize> = picks
            .iter()
            .map(|p| p.map_or(-1, |p| (p % rows.len()) as isize))
            .collect();
        let taken = col.take(&indices, true, Some(fill)).unwrap();
        for (row, &i) in taken.rows().zip(&indices) {
            if i < 0 {
                prop_assert!(row.as_slice().iter().all(|&v| v == fill));
            } else {
                prop_assert_eq!(row.as_slice(), rows[i as usize].as_slice());
            }
        }
    }

    /// Property: an index equal to the length is a bounds error, never a wrap
    #[test]
    fn prop_take_bounds((rows, shape) in rows_strategy(), allow_fill in any::<bool>()) {
        let col = build(&rows, &shape);
        let len = col.len();
        let result = col.take(&[len as isize], allow_fill, Some(0.0));
        prop_assert_eq!(result, Err(Error::IndexError { index: len as isize, len }));
    }
}

// ============================================================================
// Concatenation, Reduction and Arithmetic Properties
// ============================================================================

proptest! {
    /// Property: concat preserves length and row order of its inputs
    #[test]
    fn prop_concat_order((rows, shape) in rows_strategy(), split in 0usize..8) {
        prop_assume!(!rows.is_empty());
        let split = split.min(rows.len());
        let whole = build(&rows, &shape);
        let head = whole.select(0..split).unwrap();
        let tail = whole.select(split..).unwrap();
        let joined = TensorColumn::concat([&head, &tail]).unwrap();
        prop_assert_eq!(joined.len(), rows.len());
        prop_assert_eq!(joined, whole);
    }

    /// Property: sum equals the per-element sum of all rows
    #[test]
    fn prop_sum_matches_reference((rows, shape) in rows_strategy()) {
        prop_assume!(!rows.is_empty());
        let col = build(&rows, &shape);
        let total = col.reduce("sum").unwrap();
        prop_assert_eq!(total.len(), 1);
        let expected: Vec<f64> = (0..rows[0].len())
            .map(|j| rows.iter().map(|r| r[j]).sum())
            .collect();
        for (a, b) in total.as_slice().iter().zip(&expected) {
            prop_assert!((a - b).abs() < 1e-9);
        }
    }

    /// Property: col + col doubles every element, col + scalar shifts it
    #[test]
    fn prop_add_elementwise((rows, shape) in rows_strategy(), k in -10.0f64..10.0) {
        prop_assume!(!rows.is_empty());
        let col = build(&rows, &shape);
        let doubled = &col + &col;
        prop_assert_eq!(doubled.dims(), col.dims());
        for (d, v) in doubled.as_slice().iter().zip(col.as_slice()) {
            prop_assert_eq!(*d, v * 2.0);
        }
        let shifted = col.try_add(&k).unwrap();
        for (s, v) in shifted.as_slice().iter().zip(col.as_slice()) {
            prop_assert_eq!(*s, v + k);
        }
    }

    /// Property: writes to a copy never show up in the source
    #[test]
    fn prop_copy_is_independent((rows, shape) in rows_strategy()) {
        prop_assume!(!rows.is_empty());
        let col = build(&rows, &shape);
        let mut copy = col.copy();
        copy.set(.., SetValue::Missing).unwrap();
        prop_assert!(copy.isna().iter().all(|&na| na));
        prop_assert_eq!(col, build(&rows, &shape));
    }
}
