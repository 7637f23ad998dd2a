use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

use super::{ImmutableValue, Value};
use crate::error::DataError;
use crate::key::{DataValue, Key, KeyDef, KeyId};

trait ErasedValue: Send + Sync {
	fn key_def(&self) -> &KeyDef;
	fn value_type(&self) -> TypeId;
	fn type_name(&self) -> &'static str;
	fn as_any(&self) -> &dyn Any;
	fn eq_erased(&self, other: &dyn ErasedValue) -> bool;
	fn fmt_erased(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
	fn to_json(&self) -> serde_json::Result<serde_json::Value>;
	fn decode_like(&self, raw: &serde_json::Value) -> serde_json::Result<AnyValue>;
}

impl<T: DataValue> ErasedValue for ImmutableValue<T> {
	fn key_def(&self) -> &KeyDef {
		self.key.def()
	}

	fn value_type(&self) -> TypeId {
		TypeId::of::<T>()
	}

	fn type_name(&self) -> &'static str {
		std::any::type_name::<T>()
	}

	fn as_any(&self) -> &dyn Any {
		self
	}

	fn eq_erased(&self, other: &dyn ErasedValue) -> bool {
		other
			.as_any()
			.downcast_ref::<ImmutableValue<T>>()
			.is_some_and(|other| other == self)
	}

	fn fmt_erased(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Debug::fmt(self, f)
	}

	fn to_json(&self) -> serde_json::Result<serde_json::Value> {
		serde_json::to_value(&self.actual)
	}

	fn decode_like(&self, raw: &serde_json::Value) -> serde_json::Result<AnyValue> {
		let actual: T = serde_json::from_value(raw.clone())?;
		Ok(AnyValue::new(self.with(actual)))
	}
}

/// Type-erased [`ImmutableValue`].
///
/// Cloning is a reference-count bump. Equality holds iff both wrap the same
/// value type with equal key and actual value.
#[derive(Clone)]
pub struct AnyValue(Arc<dyn ErasedValue>);

impl AnyValue {
	pub fn new<T: DataValue>(value: ImmutableValue<T>) -> Self {
		Self(Arc::new(value))
	}

	/// Shorthand for wrapping `ImmutableValue::new(key, value)`.
	pub fn of<T: DataValue>(key: Key<T>, value: T) -> Self {
		Self::new(ImmutableValue::new(key, value))
	}

	pub fn key_id(&self) -> KeyId {
		self.0.key_def().key_id()
	}

	pub fn key_def(&self) -> &KeyDef {
		self.0.key_def()
	}

	pub fn value_type(&self) -> TypeId {
		self.0.value_type()
	}

	pub fn type_name(&self) -> &'static str {
		self.0.type_name()
	}

	pub fn is<T: DataValue>(&self) -> bool {
		self.0.value_type() == TypeId::of::<T>()
	}

	pub fn downcast<T: DataValue>(&self) -> Option<&ImmutableValue<T>> {
		self.0.as_any().downcast_ref::<ImmutableValue<T>>()
	}

	/// Returns the actual value if this wraps `key`.
	pub fn get<T: DataValue>(&self, key: Key<T>) -> Option<&T> {
		if self.key_id() != key.id() {
			return None;
		}
		self.downcast::<T>().map(ImmutableValue::get)
	}

	pub fn to_json(&self) -> Result<serde_json::Value, DataError> {
		self.0.to_json().map_err(|err| DataError::Container {
			query: self.key_def().query.to_string(),
			reason: err.to_string(),
		})
	}

	/// Decodes `raw` into a value of the same key, type and default as `self`.
	pub(crate) fn decode_like(&self, raw: &serde_json::Value) -> serde_json::Result<AnyValue> {
		self.0.decode_like(raw)
	}
}

impl PartialEq for AnyValue {
	fn eq(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.0, &other.0) || self.0.eq_erased(&*other.0)
	}
}

impl fmt::Debug for AnyValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		self.0.fmt_erased(f)
	}
}

impl<T: DataValue> From<ImmutableValue<T>> for AnyValue {
	fn from(value: ImmutableValue<T>) -> Self {
		Self::new(value)
	}
}

impl<T: DataValue> From<Value<T>> for AnyValue {
	fn from(value: Value<T>) -> Self {
		Self::new(ImmutableValue::from(value))
	}
}
