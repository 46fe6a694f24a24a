use super::TensorColumn;
use crate::dtype::DType;
use crate::error::{Error, Result};
use crate::tensor::{DimsExt, Tensor};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Stored form of a column: dtype name, full buffer shape and the row-major
/// buffer. NaN elements are stored as `null`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(bound(serialize = "T: DType + Serialize", deserialize = "T: DType + Deserialize<'de>"))]
pub struct SerializedColumn<T> {
    pub dtype: String,
    pub shape: Vec<usize>,
    #[serde(with = "nan_as_null")]
    pub data: Vec<T>,
}

#[derive(Serialize)]
#[serde(bound = "T: DType + Serialize")]
struct ColumnRef<'a, T> {
    dtype: &'static str,
    shape: &'a [usize],
    data: Elements<'a, T>,
}

struct Elements<'a, T>(&'a [T]);

impl<T: DType + Serialize> Serialize for Elements<'_, T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter().map(|&v| (!v.is_nan()).then_some(v)))
    }
}

mod nan_as_null {
    use super::Elements;
    use crate::dtype::DType;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<T, S>(data: &[T], serializer: S) -> Result<S::Ok, S::Error>
    where
        T: DType + Serialize,
        S: Serializer,
    {
        Elements(data).serialize(serializer)
    }

    /// `null` reads back as NaN; element types without NaN reject it.
    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        T: DType + Deserialize<'de>,
        D: Deserializer<'de>,
    {
        Vec::<Option<T>>::deserialize(deserializer)?
            .into_iter()
            .map(|v| match v {
                Some(v) => Ok(v),
                None => T::missing().map_err(D::Error::custom),
            })
            .collect()
    }
}

impl<T: DType> From<&TensorColumn<T>> for SerializedColumn<T> {
    fn from(value: &TensorColumn<T>) -> Self {
        SerializedColumn {
            dtype: T::NAME.to_string(),
            shape: value.dims().to_vec(),
            data: value.as_slice().to_vec(),
        }
    }
}

impl<T: DType> TryFrom<SerializedColumn<T>> for TensorColumn<T> {
    type Error = Error;

    fn try_from(value: SerializedColumn<T>) -> Result<Self> {
        if value.dtype != T::NAME {
            return Err(Error::TypeMismatch(format!(
                "stored dtype {} does not match {}",
                value.dtype,
                T::NAME
            )));
        }
        if value.shape.is_empty() {
            return Err(Error::TypeMismatch("stored shape has no row axis".into()));
        }
        if value.shape.tensor_len() != value.data.len() {
            return Err(Error::shape_mismatch(&value.shape, &[value.data.len()]));
        }
        let tensor = Tensor::from_vec_unchecked(value.data, value.shape.into());
        Ok(TensorColumn::from_tensor_unchecked(tensor))
    }
}

impl<T: DType + Serialize> Serialize for TensorColumn<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        ColumnRef {
            dtype: T::NAME,
            shape: self.dims(),
            data: Elements(self.as_slice()),
        }
        .serialize(serializer)
    }
}

impl<'de, T: DType + Deserialize<'de>> Deserialize<'de> for TensorColumn<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let stored = SerializedColumn::<T>::deserialize(deserializer)?;
        TensorColumn::try_from(stored).map_err(D::Error::custom)
    }
}

impl<T: DType + Serialize> TensorColumn<T> {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl<T: DType + for<'de> Deserialize<'de>> TensorColumn<T> {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::SetValue;
    use crate::tensor;

    #[test]
    fn test_json_round_trip() {
        let col = TensorColumn::new(tensor![[1.5, 2.0], [3.0, -1.0]]).unwrap();
        let json = col.to_json().unwrap();
        assert_eq!(json, r#"{"dtype":"float64","shape":[2,2],"data":[1.5,2.0,3.0,-1.0]}"#);
        assert_eq!(TensorColumn::<f64>::from_json(&json).unwrap(), col);
    }

    #[test]
    fn test_json_round_trip_with_missing_rows() {
        let mut col = TensorColumn::new(tensor![[1.0, 2.0], [3.0, 4.0]]).unwrap();
        col.set(1, SetValue::Missing).unwrap();
        let json = col.to_json().unwrap();
        assert_eq!(json, r#"{"dtype":"float64","shape":[2,2],"data":[1.0,2.0,null,null]}"#);

        let back = TensorColumn::<f64>::from_json(&json).unwrap();
        assert_eq!(back.isna(), vec![false, true]);
        assert_eq!(back.row(0).unwrap().as_slice(), &[1.0, 2.0]);

        let stored = SerializedColumn::from(&col);
        let json = serde_json::to_string(&stored).unwrap();
        let reread: SerializedColumn<f64> = serde_json::from_str(&json).unwrap();
        assert!(reread.data[2].is_nan());
    }

    #[test]
    fn test_null_in_integer_column_rejected() {
        let json = r#"{"dtype":"int32","shape":[2,1],"data":[1,null]}"#;
        match TensorColumn::<i32>::from_json(json) {
            Err(Error::Serialization(msg)) => assert!(msg.contains("int32"), "{msg}"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_rejects_wrong_dtype() {
        let json = r#"{"dtype":"int32","shape":[1,2],"data":[1,2]}"#;
        assert!(matches!(TensorColumn::<f64>::from_json(json), Err(Error::Serialization(_))));
        let stored: SerializedColumn<i64> = serde_json::from_str(json).unwrap();
        assert!(matches!(TensorColumn::try_from(stored), Err(Error::TypeMismatch(_))));
    }

    #[test]
    fn test_rejects_bad_shape() {
        let stored = SerializedColumn {
            dtype: "int32".to_string(),
            shape: vec![2, 2],
            data: vec![1, 2, 3],
        };
        assert_eq!(
            TensorColumn::<i32>::try_from(stored),
            Err(Error::ShapeMismatch {
                expected: vec![2, 2],
                actual: vec![3]
            })
        );
        let scalar = SerializedColumn {
            dtype: "int32".to_string(),
            shape: vec![],
            data: vec![1],
        };
        assert!(matches!(TensorColumn::<i32>::try_from(scalar), Err(Error::TypeMismatch(_))));
    }

    #[test]
    fn test_from_column() {
        let col = TensorColumn::new(tensor![[1u8], [2]]).unwrap();
        let stored = SerializedColumn::from(&col);
        assert_eq!(stored.dtype, "uint8");
        assert_eq!(stored.shape, vec![2, 1]);
        assert_eq!(stored.data, vec![1, 2]);
    }
}
