use std::any::TypeId;
use std::sync::Arc;

use indexmap::IndexMap;

use super::Manipulator;
use crate::container::DataQuery;
use crate::key::{DataValue, Key, KeyDef, KeyId};
use crate::value::{AnyValue, ImmutableValue};

/// One key of a [`ManipulatorSchema`].
#[derive(Debug, Clone)]
pub struct SchemaEntry {
	default: AnyValue,
	query: DataQuery,
	required: bool,
}

impl SchemaEntry {
	pub fn key_id(&self) -> KeyId {
		self.default.key_id()
	}

	pub fn key_def(&self) -> &KeyDef {
		self.default.key_def()
	}

	pub fn value_type(&self) -> TypeId {
		self.default.value_type()
	}

	pub fn type_name(&self) -> &'static str {
		self.default.type_name()
	}

	/// The processor-defined default for this key.
	pub fn default_value(&self) -> &AnyValue {
		&self.default
	}

	pub fn query(&self) -> &DataQuery {
		&self.query
	}

	/// Whether container fills must find this key to succeed.
	pub fn is_required(&self) -> bool {
		self.required
	}
}

/// Describes one manipulator kind: its id, its keys and their defaults.
#[derive(Debug)]
pub struct ManipulatorSchema {
	id: &'static str,
	entries: IndexMap<KeyId, SchemaEntry>,
}

impl ManipulatorSchema {
	pub fn builder(id: &'static str) -> ManipulatorSchemaBuilder {
		ManipulatorSchemaBuilder {
			id,
			entries: IndexMap::new(),
		}
	}

	pub fn id(&self) -> &'static str {
		self.id
	}

	pub fn supports(&self, key: KeyId) -> bool {
		self.entries.contains_key(&key)
	}

	pub fn entry(&self, key: KeyId) -> Option<&SchemaEntry> {
		self.entries.get(&key)
	}

	pub fn entries(&self) -> impl Iterator<Item = &SchemaEntry> {
		self.entries.values()
	}

	pub fn keys(&self) -> impl Iterator<Item = KeyId> + '_ {
		self.entries.keys().copied()
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Creates a manipulator holding every key at its default.
	pub fn create(self: &Arc<Self>) -> Manipulator {
		let mut manipulator = Manipulator::empty(self.clone());
		for entry in self.entries.values() {
			manipulator.put(entry.default.clone());
		}
		manipulator
	}
}

/// Builder for [`ManipulatorSchema`].
///
/// Schemas are static feature definitions, so malformed input (duplicate keys,
/// unparsable queries, requirements on unknown keys) panics at startup.
pub struct ManipulatorSchemaBuilder {
	id: &'static str,
	entries: IndexMap<KeyId, SchemaEntry>,
}

impl ManipulatorSchemaBuilder {
	/// Adds `key` with the given default.
	///
	/// # Panics
	///
	/// Panics if the key was already added or its query is not a valid path.
	pub fn key<T: DataValue>(mut self, key: Key<T>, default: T) -> Self {
		let query = DataQuery::parse(key.query())
			.unwrap_or_else(|err| panic!("manipulator {}: key {key}: {err}", self.id));
		let entry = SchemaEntry {
			default: AnyValue::new(ImmutableValue::new(key, default)),
			query,
			required: false,
		};
		if self.entries.insert(key.id(), entry).is_some() {
			panic!("duplicate key in manipulator {}: {key}", self.id);
		}
		self
	}

	/// Marks `key` as required for container fills.
	///
	/// # Panics
	///
	/// Panics if `key` was not added first.
	pub fn require<T: DataValue>(mut self, key: Key<T>) -> Self {
		match self.entries.get_mut(&key.id()) {
			Some(entry) => entry.required = true,
			None => panic!("required key {key} is not part of manipulator {}", self.id),
		}
		self
	}

	/// Marks every key added so far as required.
	pub fn require_all(mut self) -> Self {
		for entry in self.entries.values_mut() {
			entry.required = true;
		}
		self
	}

	pub fn build(self) -> Arc<ManipulatorSchema> {
		Arc::new(ManipulatorSchema {
			id: self.id,
			entries: self.entries,
		})
	}
}
