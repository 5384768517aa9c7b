use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Values that can also be written as a bare JSON string.
pub trait ScalarItem {
	fn from_scalar(value: String) -> Self;
}

/// A field that accepts a string, a single object or an array of objects.
///
/// The shape is decided once while decoding; consumers go through [`Flexible::items`] or
/// [`Flexible::to_vec`] instead of inspecting the arms themselves.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Flexible<T> {
	Scalar(String),
	Single(T),
	List(Vec<T>),
}

impl<T> Flexible<T> {
	/// Object arms as a slice; a scalar has no objects.
	pub fn items(&self) -> &[T] {
		match self {
			Self::Scalar(_) => &[],
			Self::Single(item) => std::slice::from_ref(item),
			Self::List(items) => items,
		}
	}

	pub fn is_empty(&self) -> bool {
		match self {
			Self::Scalar(value) => value.is_empty(),
			Self::Single(_) => false,
			Self::List(items) => items.is_empty(),
		}
	}

	/// Collapses a list into the most compact shape: nothing, one object, or a list.
	pub fn from_vec(mut items: Vec<T>) -> Option<Self> {
		match items.len() {
			0 => None,
			1 => items.pop().map(Self::Single),
			_ => Some(Self::List(items)),
		}
	}
}

impl<T: ScalarItem + Clone> Flexible<T> {
	/// Every arm as a list of objects, promoting a scalar through [`ScalarItem`].
	pub fn to_vec(&self) -> Vec<T> {
		match self {
			Self::Scalar(value) => vec![T::from_scalar(value.clone())],
			Self::Single(item) => vec![item.clone()],
			Self::List(items) => items.clone(),
		}
	}
}

impl<'de, T> Deserialize<'de> for Flexible<T>
where
	T: DeserializeOwned + ScalarItem,
{
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		match Value::deserialize(deserializer)? {
			Value::String(value) => Ok(Self::Scalar(value)),
			Value::Array(values) => values
				.into_iter()
				.map(|value| match value {
					Value::String(value) => Ok(T::from_scalar(value)),
					other => serde_json::from_value(other),
				})
				.collect::<Result<Vec<T>, _>>()
				.map(Self::List)
				.map_err(de::Error::custom),
			value @ Value::Object(_) => serde_json::from_value(value)
				.map(Self::Single)
				.map_err(de::Error::custom),
			other => Err(de::Error::custom(format!(
				"expected a string, object or array, found {other}"
			))),
		}
	}
}
