//! Multi-attribute bags of values.
//!
//! A [`Manipulator`] groups the values of one feature (health, food, ...)
//! independently of any holder. Its key set is fixed by a shared
//! [`ManipulatorSchema`]; a manipulator never holds a key its schema lacks.

mod schema;

use std::sync::Arc;

use indexmap::IndexMap;

pub use schema::{ManipulatorSchema, ManipulatorSchemaBuilder, SchemaEntry};

use crate::container::DataContainer;
use crate::error::DataError;
use crate::key::{DataValue, Key, KeyId};
use crate::value::{AnyValue, ImmutableValue, Value};


/// Mutable manipulator.
#[derive(Debug, Clone)]
pub struct Manipulator {
	schema: Arc<ManipulatorSchema>,
	values: IndexMap<KeyId, AnyValue>,
}

impl Manipulator {
	/// Creates a manipulator holding no values.
	pub fn empty(schema: Arc<ManipulatorSchema>) -> Self {
		Self {
			schema,
			values: IndexMap::new(),
		}
	}

	pub fn schema(&self) -> &Arc<ManipulatorSchema> {
		&self.schema
	}

	pub fn id(&self) -> &'static str {
		self.schema.id()
	}

	pub fn supports<T: DataValue>(&self, key: Key<T>) -> bool {
		self.supports_id(key.id())
	}

	pub fn supports_id(&self, key: KeyId) -> bool {
		self.schema.supports(key)
	}

	/// Returns a clone of the value stored under `key`.
	pub fn get<T: DataValue>(&self, key: Key<T>) -> Option<T> {
		self.get_ref(key).cloned()
	}

	pub fn get_ref<T: DataValue>(&self, key: Key<T>) -> Option<&T> {
		self.values.get(&key.id())?.get(key)
	}

	/// Returns the value stored under `key` as a [`Value`].
	pub fn get_value<T: DataValue>(&self, key: Key<T>) -> Option<Value<T>> {
		let erased = self.values.get(&key.id())?;
		erased.downcast::<T>().map(ImmutableValue::as_mutable)
	}

	pub fn get_any(&self, key: KeyId) -> Option<&AnyValue> {
		self.values.get(&key)
	}

	pub fn contains(&self, key: KeyId) -> bool {
		self.values.contains_key(&key)
	}

	/// Stores `value` under `key`, keeping the schema default alongside it.
	pub fn set<T: DataValue>(&mut self, key: Key<T>, value: T) -> Result<&mut Self, DataError> {
		let entry = self.schema.entry(key.id()).ok_or(DataError::UnsupportedKey {
			manipulator: self.schema.id(),
			key: key.id(),
		})?;
		let template = entry
			.default_value()
			.downcast::<T>()
			.ok_or_else(|| DataError::TypeMismatch {
				key: key.id(),
				expected: entry.type_name(),
				got: std::any::type_name::<T>(),
			})?;
		let value = template.with(value);
		self.values.insert(key.id(), AnyValue::new(value));
		Ok(self)
	}

	/// Stores an erased value after checking its key and type against the schema.
	pub fn set_value(&mut self, value: impl Into<AnyValue>) -> Result<&mut Self, DataError> {
		let value = value.into();
		let entry = self
			.schema
			.entry(value.key_id())
			.ok_or(DataError::UnsupportedKey {
				manipulator: self.schema.id(),
				key: value.key_id(),
			})?;
		if entry.value_type() != value.value_type() {
			return Err(DataError::TypeMismatch {
				key: value.key_id(),
				expected: entry.type_name(),
				got: value.type_name(),
			});
		}
		self.values.insert(value.key_id(), value);
		Ok(self)
	}

	/// Removes and returns the value stored under `key`.
	pub fn remove(&mut self, key: KeyId) -> Option<AnyValue> {
		self.values.shift_remove(&key)
	}

	/// Values in insertion order.
	pub fn values(&self) -> impl Iterator<Item = &AnyValue> {
		self.values.values()
	}

	pub fn len(&self) -> usize {
		self.values.len()
	}

	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	pub fn copy(&self) -> Self {
		self.clone()
	}

	pub fn as_immutable(&self) -> ImmutableManipulator {
		ImmutableManipulator {
			schema: self.schema.clone(),
			values: Arc::new(self.values.clone()),
		}
	}

	/// Writes every value at its key's query path.
	pub fn to_container(&self) -> Result<DataContainer, DataError> {
		let mut container = DataContainer::new();
		for value in self.values.values() {
			let Some(entry) = self.schema.entry(value.key_id()) else {
				continue;
			};
			container.set_raw(entry.query(), value.to_json()?)?;
		}
		Ok(container)
	}

	/// Inserts a value already known to match the schema.
	pub(crate) fn put(&mut self, value: AnyValue) {
		debug_assert!(self.schema.supports(value.key_id()));
		self.values.insert(value.key_id(), value);
	}
}

impl PartialEq for Manipulator {
	/// Same schema id and the same values, regardless of insertion order.
	fn eq(&self, other: &Self) -> bool {
		self.schema.id() == other.schema.id()
			&& self.values.len() == other.values.len()
			&& self
				.values
				.iter()
				.all(|(key, value)| other.values.get(key) == Some(value))
	}
}

/// Frozen manipulator. Cloning shares the value map.
#[derive(Debug, Clone)]
pub struct ImmutableManipulator {
	schema: Arc<ManipulatorSchema>,
	values: Arc<IndexMap<KeyId, AnyValue>>,
}

impl ImmutableManipulator {
	pub fn schema(&self) -> &Arc<ManipulatorSchema> {
		&self.schema
	}

	pub fn id(&self) -> &'static str {
		self.schema.id()
	}

	pub fn supports<T: DataValue>(&self, key: Key<T>) -> bool {
		self.schema.supports(key.id())
	}

	pub fn get<T: DataValue>(&self, key: Key<T>) -> Option<&T> {
		self.values.get(&key.id())?.get(key)
	}

	pub fn values(&self) -> impl Iterator<Item = &AnyValue> {
		self.values.values()
	}

	pub fn len(&self) -> usize {
		self.values.len()
	}

	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	/// Returns a copy with `key` set to `value`, or `None` if the schema lacks `key`.
	pub fn with<T: DataValue>(&self, key: Key<T>, value: T) -> Option<Self> {
		let mut next = self.as_mutable();
		next.set(key, value).ok()?;
		Some(next.as_immutable())
	}

	pub fn as_mutable(&self) -> Manipulator {
		Manipulator {
			schema: self.schema.clone(),
			values: (*self.values).clone(),
		}
	}
}

impl PartialEq for ImmutableManipulator {
	fn eq(&self, other: &Self) -> bool {
		self.as_mutable() == other.as_mutable()
	}
}

impl From<Manipulator> for ImmutableManipulator {
	fn from(manipulator: Manipulator) -> Self {
		Self {
			schema: manipulator.schema,
			values: Arc::new(manipulator.values),
		}
	}
}
