//! Typed capability tokens.
//!
//! A holder family is one object type `H` (typically a trait object such as
//! `dyn GameObject`) whose instances may or may not expose a given capability.
//! A [`HolderType`] token names one capability and narrows an `&H` to it. The
//! narrowing is an ordinary trait method, so value processors only ever see a
//! correctly typed target and the core never casts.

use std::any::TypeId;
use std::fmt;

/// Capability token for the holder family `H`.
///
/// Tokens are zero-sized marker types; they are never instantiated.
pub trait HolderType<H: ?Sized>: 'static {
	/// The capability processors bound to this token operate on.
	type Target: ?Sized;

	/// Human-readable name used in logs and registry errors.
	const NAME: &'static str;

	fn narrow(holder: &H) -> Option<&Self::Target>;

	fn narrow_mut(holder: &mut H) -> Option<&mut Self::Target>;
}

/// Erased identity of a [`HolderType`] token.
#[derive(Clone, Copy)]
pub struct HolderTypeId {
	type_id: TypeId,
	name: &'static str,
}

impl HolderTypeId {
	pub fn of<H: ?Sized, T: HolderType<H>>() -> Self {
		Self {
			type_id: TypeId::of::<T>(),
			name: T::NAME,
		}
	}

	pub fn name(&self) -> &'static str {
		self.name
	}
}

impl PartialEq for HolderTypeId {
	fn eq(&self, other: &Self) -> bool {
		self.type_id == other.type_id
	}
}

impl Eq for HolderTypeId {}

impl std::hash::Hash for HolderTypeId {
	fn hash<S: std::hash::Hasher>(&self, state: &mut S) {
		self.type_id.hash(state);
	}
}

impl fmt::Debug for HolderTypeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name)
	}
}

impl fmt::Display for HolderTypeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name)
	}
}
