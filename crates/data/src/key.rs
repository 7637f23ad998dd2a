//! Typed attribute identities.
//!
//! A [`Key`] names one attribute and carries the Rust type of its value. Keys
//! are declared as constants by whoever owns the attribute catalog:
//!
//! ```rust
//! use vessel_data::{Key, KeyDef};
//!
//! pub const HEALTH: Key<f64> = Key::new(KeyDef::new("vessel:health", "Health", "health"));
//! assert_eq!(HEALTH.id().as_str(), "vessel:health");
//! ```

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Bound for every type an attribute can hold.
///
/// Values are cloned into manipulators and transaction results, compared for
/// equality, and serialized through the container boundary.
pub trait DataValue:
	Clone + PartialEq + fmt::Debug + Send + Sync + Serialize + DeserializeOwned + 'static
{
}

impl<T> DataValue for T where
	T: Clone + PartialEq + fmt::Debug + Send + Sync + Serialize + DeserializeOwned + 'static
{
}

/// Erased identity of a key.
///
/// Two keys are the same attribute iff their ids are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyId(&'static str);

impl KeyId {
	pub const fn new(id: &'static str) -> Self {
		Self(id)
	}

	pub const fn as_str(self) -> &'static str {
		self.0
	}
}

impl fmt::Display for KeyId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.0)
	}
}

/// Static metadata of a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyDef {
	/// Globally unique identifier (e.g. `"vessel:health"`).
	pub id: &'static str,
	/// Human-readable name.
	pub name: &'static str,
	/// Dotted path of the value inside a serialized container.
	pub query: &'static str,
}

impl KeyDef {
	pub const fn new(id: &'static str, name: &'static str, query: &'static str) -> Self {
		Self { id, name, query }
	}

	pub const fn key_id(&self) -> KeyId {
		KeyId(self.id)
	}
}

/// Typed handle to one attribute.
pub struct Key<T: DataValue> {
	def: KeyDef,
	_marker: PhantomData<fn() -> T>,
}

impl<T: DataValue> Clone for Key<T> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<T: DataValue> Copy for Key<T> {}

impl<T: DataValue> Key<T> {
	pub const fn new(def: KeyDef) -> Self {
		Self {
			def,
			_marker: PhantomData,
		}
	}

	pub const fn def(&self) -> &KeyDef {
		&self.def
	}

	pub const fn id(&self) -> KeyId {
		self.def.key_id()
	}

	pub const fn name(&self) -> &'static str {
		self.def.name
	}

	pub const fn query(&self) -> &'static str {
		self.def.query
	}

	/// Returns the [`TypeId`] of the value type this key addresses.
	pub fn value_type(&self) -> TypeId {
		TypeId::of::<T>()
	}
}

impl<T: DataValue> PartialEq for Key<T> {
	fn eq(&self, other: &Self) -> bool {
		self.def.id == other.def.id
	}
}

impl<T: DataValue> Eq for Key<T> {}

impl<T: DataValue> Hash for Key<T> {
	fn hash<S: Hasher>(&self, state: &mut S) {
		self.def.id.hash(state);
	}
}

impl<T: DataValue> fmt::Debug for Key<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("Key").field(&self.def.id).finish()
	}
}

impl<T: DataValue> fmt::Display for Key<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.def.id)
	}
}
