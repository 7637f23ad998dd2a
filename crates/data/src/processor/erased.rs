use std::any::TypeId;
use std::sync::Arc;

use super::{Mutation, ValueProcessor};
use crate::holder::{HolderType, HolderTypeId};
use crate::key::{KeyDef, KeyId};
use crate::value::AnyValue;

/// Object-safe view of a [`ValueProcessor`] over the holder family `H`.
///
/// Every method takes the whole holder and narrows it first. Holders outside
/// the processor's capability read as absent and refuse writes.
pub trait ErasedValueProcessor<H: ?Sized>: Send + Sync {
	fn key_def(&self) -> KeyDef;

	fn key_id(&self) -> KeyId {
		self.key_def().key_id()
	}

	fn value_type(&self) -> TypeId;

	fn value_type_name(&self) -> &'static str;

	fn holder_type(&self) -> HolderTypeId;

	fn priority(&self) -> i16;

	/// Whether `holder` has the processor's capability at all.
	fn matches(&self, holder: &H) -> bool;

	/// Capability check plus the processor's dynamic predicate.
	fn supports(&self, holder: &H) -> bool;

	fn has_data(&self, holder: &H) -> bool;

	fn get(&self, holder: &H) -> Option<AnyValue>;

	/// Applies `value`. A value of another key or type is rejected.
	fn set(&self, holder: &mut H, value: &AnyValue) -> Mutation;

	fn remove(&self, holder: &mut H) -> Mutation;

	fn default_value(&self) -> AnyValue;
}

/// Erases `processor` for storage in manipulator processors.
///
/// Registering the returned handle into two manipulator processors is a
/// registration conflict; clone the handle only to compare identities.
pub fn erase<H, P>(processor: P) -> Arc<dyn ErasedValueProcessor<H>>
where
	H: ?Sized + 'static,
	P: ValueProcessor<H>,
{
	Arc::new(Erased(processor))
}

struct Erased<P>(P);

impl<H, P> ErasedValueProcessor<H> for Erased<P>
where
	H: ?Sized + 'static,
	P: ValueProcessor<H>,
{
	fn key_def(&self) -> KeyDef {
		*self.0.key().def()
	}

	fn value_type(&self) -> TypeId {
		TypeId::of::<P::Value>()
	}

	fn value_type_name(&self) -> &'static str {
		std::any::type_name::<P::Value>()
	}

	fn holder_type(&self) -> HolderTypeId {
		HolderTypeId::of::<H, P::Holder>()
	}

	fn priority(&self) -> i16 {
		self.0.priority()
	}

	fn matches(&self, holder: &H) -> bool {
		<P::Holder as HolderType<H>>::narrow(holder).is_some()
	}

	fn supports(&self, holder: &H) -> bool {
		<P::Holder as HolderType<H>>::narrow(holder).is_some_and(|target| self.0.supports(target))
	}

	fn has_data(&self, holder: &H) -> bool {
		<P::Holder as HolderType<H>>::narrow(holder)
			.is_some_and(|target| self.0.supports(target) && self.0.has_data(target))
	}

	fn get(&self, holder: &H) -> Option<AnyValue> {
		let target = <P::Holder as HolderType<H>>::narrow(holder)?;
		if !self.0.supports(target) {
			return None;
		}
		let actual = self.0.get(target)?;
		Some(AnyValue::new(self.0.construct_immutable_value(actual)))
	}

	fn set(&self, holder: &mut H, value: &AnyValue) -> Mutation {
		let key = self.0.key();
		let Some(actual) = value.get(key) else {
			return Mutation::Rejected;
		};
		let Some(target) = <P::Holder as HolderType<H>>::narrow_mut(holder) else {
			return Mutation::Rejected;
		};
		if !self.0.supports(target) {
			return Mutation::Rejected;
		}
		self.0.set(target, actual.clone())
	}

	fn remove(&self, holder: &mut H) -> Mutation {
		let Some(target) = <P::Holder as HolderType<H>>::narrow_mut(holder) else {
			return Mutation::Rejected;
		};
		if !self.0.supports(target) {
			return Mutation::Rejected;
		}
		self.0.remove(target)
	}

	fn default_value(&self) -> AnyValue {
		let default = self.0.default_value();
		AnyValue::new(self.0.construct_immutable_value(default))
	}
}
