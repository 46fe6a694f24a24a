use crate::tensor::{ITensor, Tensor, TensorBase, TensorView, TensorViewMut, fmt_dims};
use std::fmt::{Debug, Formatter, Write};

/// Writes `len` items separated by `sep`. When there are more than `max`,
/// only the first and last `max / 2` are written around a hidden count.
fn fmt_elided<I, T, F>(items: I, len: usize, max: usize, f: &mut Formatter, sep: &str, mut fmt: F) -> std::fmt::Result
where
    I: Iterator<Item = T>,
    F: FnMut(T, &mut Formatter) -> std::fmt::Result,
{
    let keep = max / 2;
    let hidden = if len > max { len - 2 * keep } else { 0 };
    for (i, item) in items.enumerate() {
        if hidden > 0 && (keep..keep + hidden).contains(&i) {
            if i == keep {
                write!(f, "{sep}...({hidden} hidden)")?;
            }
            continue;
        }
        if i > 0 {
            f.write_str(sep)?;
        }
        fmt(item, f)?;
    }
    Ok(())
}

const DEBUG_LIMIT_DIM_OUTER: usize = 5;
const DEBUG_LIMIT_DIM_INNER: usize = 10;

/// Writes the nested bracket form of a tensor, eliding the middle of long axes.
pub(crate) fn fmt_tensor_data<T>(t: TensorView<T>, f: &mut Formatter, depth: usize) -> std::fmt::Result
where
    T: Debug,
{
    if t.dims().is_empty() {
        return match t.as_slice().first() {
            Some(el) => Debug::fmt(el, f),
            None => f.write_str("[]"),
        };
    }
    f.write_char('[')?;
    if t.len() > 0 {
        if t.dims().len() < 2 {
            fmt_elided(t.iter(), t.len(), DEBUG_LIMIT_DIM_INNER, f, ", ", |el, f| Debug::fmt(el, f))?;
        } else {
            let indent = "   ".repeat(depth);
            let sep = format!(",\n{indent}   ");
            write!(f, "\n{indent}   ")?;
            fmt_elided(t.iter_first_axis(), t.dims()[0], DEBUG_LIMIT_DIM_OUTER, f, &sep, |row, f| {
                fmt_tensor_data(row, f, depth + 1)
            })?;
            write!(f, "\n{indent}")?;
        }
    }
    f.write_char(']')
}

fn format_tensor<T>(t: TensorView<T>, f: &mut Formatter) -> std::fmt::Result
where
    T: Debug,
{
    fmt_tensor_data(t, f, 0)?;
    write!(f, " dtype={} dims=", std::any::type_name::<T>())?;
    fmt_dims(t.dims(), f)?;
    write!(f, " len={}", t.len())
}

impl<T> Debug for Tensor<T>
where
    T: Debug,
{
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        format_tensor(self.view(), f)
    }
}

impl<'a, T> Debug for TensorView<'a, T>
where
    T: Debug,
{
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        format_tensor(*self, f)
    }
}

impl<'a, T> Debug for TensorViewMut<'a, T>
where
    T: Debug,
{
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        format_tensor(TensorView::new_unchecked(self.as_ref(), self.dims()), f)
    }
}

#[cfg(test)]
mod test {
    use crate::tensor;
    use crate::tensor::Tensor;

    #[test]
    fn test_empty() {
        assert_eq!("[] dtype=i32 dims=(0) len=0", format!("{:?}", tensor![] as Tensor<i32>));
        assert_eq!("[] dtype=i32 dims=(2, 0) len=0", format!("{:?}", tensor![[], []] as Tensor<i32>));
        assert_eq!("[] dtype=i32 dims=(1, 2, 0) len=0", format!("{:?}", tensor![[[], []]] as Tensor<i32>));
    }

    #[test]
    fn test_scalar() {
        assert_eq!("7 dtype=i32 dims=() len=1", format!("{:?}", Tensor::scalar(7)));
    }

    #[test]
    fn test_small() {
        assert_eq!("[1, 2, 3, 4, 5] dtype=i32 dims=(5) len=5", format!("{:?}", tensor![1, 2, 3, 4, 5] as Tensor<i32>));
        assert_eq!(
            "[\n   [1, 2],\n   [3, 4]\n] dtype=i32 dims=(2, 2) len=4",
            format!("{:?}", tensor![[1, 2], [3, 4]] as Tensor<i32>)
        );
        assert_eq!(
            "[\n   [\n      [1, 2],\n      [3, 4],\n      [5, 6]\n   ]\n] dtype=i32 dims=(1, 3, 2) len=6",
            format!("{:?}", tensor![[[1, 2], [3, 4], [5, 6]]] as Tensor<i32>)
        );
    }

    #[test]
    fn test_large() {
        let a = Tensor::from_vec((0..200).collect::<Vec<i32>>(), (10, 20));
        let expected = r#"[
   [0, 1, 2, 3, 4, ...(10 hidden), 15, 16, 17, 18, 19],
   [20, 21, 22, 23, 24, ...(10 hidden), 35, 36, 37, 38, 39],
   ...(6 hidden),
   [160, 161, 162, 163, 164, ...(10 hidden), 175, 176, 177, 178, 179],
   [180, 181, 182, 183, 184, ...(10 hidden), 195, 196, 197, 198, 199]
] dtype=i32 dims=(10, 20) len=200"#;
        assert_eq!(expected, format!("{a:?}"))
    }
}
