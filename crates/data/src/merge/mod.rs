//! Reconciling a holder's current state with proposed state.
//!
//! A [`MergeFunction`] runs before every manipulator write. It receives the
//! holder's current manipulator (if the holder has any of its values) and the
//! caller's proposal, and returns the manipulator that is actually applied.
//! Merge functions are expected to be pure; a panic inside one is not
//! contained.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::key::{DataValue, Key, KeyId};
use crate::manipulator::Manipulator;
use crate::value::{AnyValue, ImmutableValue};

#[cfg(test)]
mod tests;

pub trait MergeFunction {
	fn merge(&self, old: Option<&Manipulator>, proposed: &Manipulator) -> Manipulator;
}

impl<F> MergeFunction for F
where
	F: Fn(Option<&Manipulator>, &Manipulator) -> Manipulator,
{
	fn merge(&self, old: Option<&Manipulator>, proposed: &Manipulator) -> Manipulator {
		self(old, proposed)
	}
}

/// The proposal wins; current state is ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct TakeNew;

impl MergeFunction for TakeNew {
	fn merge(&self, _old: Option<&Manipulator>, proposed: &Manipulator) -> Manipulator {
		proposed.copy()
	}
}

/// Current state wins. Keys the holder lacks are taken from the proposal.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeepOld;

impl MergeFunction for KeepOld {
	fn merge(&self, old: Option<&Manipulator>, proposed: &Manipulator) -> Manipulator {
		let Some(old) = old else {
			return proposed.copy();
		};
		let mut merged = proposed.copy();
		for value in old.values() {
			if merged.supports_id(value.key_id()) {
				merged.put(value.clone());
			}
		}
		merged
	}
}

type Reconcile = Arc<dyn Fn(&AnyValue, &AnyValue) -> Option<AnyValue> + Send + Sync>;

/// Per-key reconciliation.
///
/// Keys with a registered closure present in both manipulators are resolved
/// by that closure; every other key takes the proposed value.
///
/// ```rust
/// # use vessel_data::{Key, KeyDef, PerKeyMerge};
/// const LEVEL: Key<i32> = Key::new(KeyDef::new("demo:level", "Level", "level"));
/// let merge = PerKeyMerge::new().with(LEVEL, |old: &i32, new: &i32| (*old).max(*new));
/// # let _ = merge;
/// ```
#[derive(Clone, Default)]
pub struct PerKeyMerge {
	rules: FxHashMap<KeyId, Reconcile>,
}

impl PerKeyMerge {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with<T, F>(mut self, key: Key<T>, reconcile: F) -> Self
	where
		T: DataValue,
		F: Fn(&T, &T) -> T + Send + Sync + 'static,
	{
		let rule: Reconcile = Arc::new(move |old: &AnyValue, new: &AnyValue| {
			let old = old.downcast::<T>()?;
			let new = new.downcast::<T>()?;
			let merged: ImmutableValue<T> = new.with(reconcile(old.get(), new.get()));
			Some(AnyValue::new(merged))
		});
		self.rules.insert(key.id(), rule);
		self
	}
}

impl MergeFunction for PerKeyMerge {
	fn merge(&self, old: Option<&Manipulator>, proposed: &Manipulator) -> Manipulator {
		let mut merged = proposed.copy();
		let Some(old) = old else {
			return merged;
		};
		for value in proposed.values() {
			let key = value.key_id();
			let (Some(rule), Some(previous)) = (self.rules.get(&key), old.get_any(key)) else {
				continue;
			};
			if let Some(resolved) = rule(previous, value) {
				merged.put(resolved);
			}
		}
		merged
	}
}

impl std::fmt::Debug for PerKeyMerge {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("PerKeyMerge")
			.field("keys", &self.rules.keys().collect::<Vec<_>>())
			.finish()
	}
}
