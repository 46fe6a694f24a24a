use approx::assert_abs_diff_eq;
use tensorcol::interop::{ColumnType, HostKey, TensorType};
use tensorcol::tensor::{StridedView, Tensor, TensorBase};
use tensorcol::{ColumnKey, ColumnOptions, Error, Item, RowInput, SetValue, TensorColumn, TensorRow, tensor};

fn abc() -> TensorColumn<f64> {
    TensorColumn::from_rows(vec![tensor![1.0, 10.0], tensor![2.0, 20.0], tensor![3.0, 30.0]]).unwrap()
}

#[test]
fn build_from_block_adopts_buffer() {
    let block: Tensor<f32> = tensor![[[1.0, 2.0], [3.0, 4.0]], [[5.0, 6.0], [7.0, 8.0]]];
    let ptr = block.as_ref().as_ptr();
    let col = TensorColumn::new(block).unwrap();
    assert_eq!(col.len(), 2);
    assert_eq!(col.row_shape(), &[2, 2]);
    assert_eq!(col.as_slice().as_ptr(), ptr);
}

#[test]
fn build_from_strided_block() {
    // a 2x3 column-major block
    let data = [1, 4, 2, 5, 3, 6];
    let strided = StridedView::column_major(&data, [2, 3]).unwrap();
    let col = TensorColumn::new(strided).unwrap();
    assert_eq!(col.as_slice(), &[1, 2, 3, 4, 5, 6]);

    let strided = StridedView::column_major(&data, [2, 3]).unwrap();
    let rejected = TensorColumn::with_options(strided, ColumnOptions { make_contiguous: false });
    assert!(matches!(rejected, Err(Error::TypeMismatch(_))));
}

#[test]
fn build_from_scalars_and_rows() {
    let col = TensorColumn::from_rows(vec![RowInput::Scalar(1.5), RowInput::Scalar(2.5)]).unwrap();
    assert_eq!(col.dims(), &[2, 1]);

    let source = abc();
    let single = TensorColumn::new(source.row(1).unwrap()).unwrap();
    assert_eq!(single.dims(), &[1, 2]);
    assert_eq!(single.as_slice(), &[2.0, 20.0]);

    let empty = TensorColumn::<f64>::from_rows(Vec::<RowInput<f64>>::new()).unwrap();
    assert!(empty.is_empty());
}

#[test]
fn row_access_and_selection() {
    let col = abc();
    match col.get_item(0).unwrap() {
        Item::Row(row) => assert_eq!(row, tensor![1.0, 10.0]),
        Item::Column(_) => panic!("integer key must yield a row"),
    }
    let tail = col.select(ColumnKey::slice(1..)).unwrap();
    assert_eq!(tail.len(), 2);
    assert_eq!(tail.row(0).unwrap().as_slice(), &[2.0, 20.0]);
    assert_eq!(col.select(vec![false, true]).err().map(|e| matches!(e, Error::InvalidIndexer(_))), Some(true));
}

#[test]
fn take_examples() {
    let col = abc();
    let plain = col.take(&[2, 0], false, None).unwrap();
    assert_eq!(plain.as_slice(), &[3.0, 30.0, 1.0, 10.0]);

    let filled = col.take(&[2, -1, 0], true, Some(0.0)).unwrap();
    assert_eq!(filled.as_slice(), &[3.0, 30.0, 0.0, 0.0, 1.0, 10.0]);
    assert_eq!(filled.isna(), vec![false, false, false]);

    let gaps = col.take(&[-1, 1], true, None).unwrap();
    assert_eq!(gaps.isna(), vec![true, false]);
}

#[test]
fn concat_and_sum() {
    let a = TensorColumn::new(tensor![[1, 1], [2, 2]]).unwrap();
    let b = TensorColumn::new(tensor![[3, 3]]).unwrap();
    let joined = TensorColumn::concat(vec![&a, &b]).unwrap();
    assert_eq!(joined.len(), 3);
    assert_eq!(joined.reduce("sum").unwrap().as_slice(), &[6, 6]);
    assert!(matches!(joined.reduce("max"), Err(Error::NotImplemented(_))));
}

#[test]
fn assignment_marks_missing() {
    let mut col = abc();
    col.set(vec![0, 2], SetValue::Missing).unwrap();
    assert_eq!(col.isna(), vec![true, false, true]);
    col.set(0, tensor![5.0, 6.0].view()).unwrap();
    assert_eq!(col.isna(), vec![false, false, true]);
}

#[test]
fn arithmetic_keeps_wrapper_type() {
    let col = abc();
    let scaled = &col * 0.5;
    for (s, v) in scaled.as_slice().iter().zip(col.as_slice()) {
        assert_abs_diff_eq!(*s, v / 2.0);
    }

    let row: TensorRow<'_, f64> = col.row(2).unwrap();
    let centered: TensorRow<'static, f64> = row.try_sub(&col.row(0).unwrap()).unwrap();
    assert!(centered.is_owned());
    assert_eq!(centered, tensor![2.0, 20.0]);

    let flags = col.elem_ge(&tensor![2.0, 20.0]).unwrap();
    assert_eq!(flags.as_slice(), &[false, false, true, true, true, true]);
}

#[test]
fn copy_never_shares_buffer() {
    let col = abc();
    let mut copy = col.copy();
    copy.set(1, 0.0_f64).unwrap();
    assert_eq!(col.row(1).unwrap().as_slice(), &[2.0, 20.0]);
    assert_ne!(col, copy);
}

#[test]
fn host_boundary() {
    let ty = TensorType::<f64>::construct_from_string("TensorType").unwrap();
    let col = ty.construct_array(tensor![[1.0, 2.0], [3.0, 4.0]]).unwrap();
    let back = TensorColumn::import(&col.export()).unwrap();
    assert_eq!(back, col);

    match col.get_host(HostKey::Slice { start: None, stop: None, step: Some(-1) }).unwrap() {
        Item::Column(rev) => assert_eq!(rev.as_slice(), &[3.0, 4.0, 1.0, 2.0]),
        Item::Row(_) => panic!("slice key must yield a column"),
    }
    assert!(matches!(col.get_host(HostKey::Other("tuple".into())), Err(Error::UnsupportedKey(_))));
}

#[test]
fn text_output() {
    let col = TensorColumn::new(tensor![[1, 2], [3, 4]]).unwrap();
    assert_eq!(col.to_strings(), vec!["[1, 2]", "[3, 4]"]);
    assert_eq!(format!("{}", col.row(1).unwrap()), "[3, 4]");
}
