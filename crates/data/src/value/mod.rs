//! Key/value pairs.
//!
//! [`Value`] is the mutable form handed to callers, [`ImmutableValue`] the
//! frozen form stored in manipulators and transaction results, and
//! [`AnyValue`] the type-erased wrapper that lets heterogeneous values share
//! one collection.

mod any;

use std::fmt;

pub use any::AnyValue;

use crate::key::{DataValue, Key};


/// Mutable (key, value) pair.
///
/// Equality compares the key identity and the actual value; the default does
/// not participate.
#[derive(Clone)]
pub struct Value<T: DataValue> {
	key: Key<T>,
	actual: T,
	default: T,
}

impl<T: DataValue> Value<T> {
	/// Creates a value whose default equals its actual value.
	pub fn new(key: Key<T>, actual: T) -> Self {
		Self {
			key,
			default: actual.clone(),
			actual,
		}
	}

	pub fn with_default(key: Key<T>, actual: T, default: T) -> Self {
		Self {
			key,
			actual,
			default,
		}
	}

	pub fn key(&self) -> Key<T> {
		self.key
	}

	pub fn get(&self) -> &T {
		&self.actual
	}

	pub fn set(&mut self, value: T) -> &mut Self {
		self.actual = value;
		self
	}

	/// Returns the processor-defined fallback for this attribute.
	pub fn default_value(&self) -> &T {
		&self.default
	}

	pub fn into_inner(self) -> T {
		self.actual
	}

	pub fn as_immutable(&self) -> ImmutableValue<T> {
		ImmutableValue {
			key: self.key,
			actual: self.actual.clone(),
			default: self.default.clone(),
		}
	}
}

impl<T: DataValue> PartialEq for Value<T> {
	fn eq(&self, other: &Self) -> bool {
		self.key == other.key && self.actual == other.actual
	}
}

impl<T: DataValue> fmt::Debug for Value<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Value")
			.field("key", &self.key.id())
			.field("actual", &self.actual)
			.finish()
	}
}

/// Frozen (key, value) pair.
#[derive(Clone)]
pub struct ImmutableValue<T: DataValue> {
	key: Key<T>,
	actual: T,
	default: T,
}

impl<T: DataValue> ImmutableValue<T> {
	pub fn new(key: Key<T>, actual: T) -> Self {
		Self {
			key,
			default: actual.clone(),
			actual,
		}
	}

	pub fn with_default(key: Key<T>, actual: T, default: T) -> Self {
		Self {
			key,
			actual,
			default,
		}
	}

	pub fn key(&self) -> Key<T> {
		self.key
	}

	pub fn get(&self) -> &T {
		&self.actual
	}

	pub fn default_value(&self) -> &T {
		&self.default
	}

	/// Returns a copy holding `value`, keeping key and default.
	pub fn with(&self, value: T) -> Self {
		Self {
			key: self.key,
			actual: value,
			default: self.default.clone(),
		}
	}

	pub fn as_mutable(&self) -> Value<T> {
		Value {
			key: self.key,
			actual: self.actual.clone(),
			default: self.default.clone(),
		}
	}

	pub fn into_inner(self) -> T {
		self.actual
	}
}

impl<T: DataValue> PartialEq for ImmutableValue<T> {
	fn eq(&self, other: &Self) -> bool {
		self.key == other.key && self.actual == other.actual
	}
}

impl<T: DataValue> fmt::Debug for ImmutableValue<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ImmutableValue")
			.field("key", &self.key.id())
			.field("actual", &self.actual)
			.finish()
	}
}

impl<T: DataValue> From<Value<T>> for ImmutableValue<T> {
	fn from(value: Value<T>) -> Self {
		Self {
			key: value.key,
			actual: value.actual,
			default: value.default,
		}
	}
}
