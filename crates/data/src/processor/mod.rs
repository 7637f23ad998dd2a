//! Single-attribute processors.
//!
//! # Purpose
//!
//! A [`ValueProcessor`] binds exactly one [`Key`] to exactly one holder
//! capability ([`HolderType`]) and implements get/set/remove against it.
//! Processors hold no per-holder state; everything lives in the holder.
//!
//! # Mental Model
//!
//! Implementors write typed code against the narrowed capability
//! (`&dyn Living`, `&mut dyn ItemStack`, ...). The crate wraps each processor
//! in an [`ErasedValueProcessor`] so processors over different keys and value
//! types can share one table. The erased form narrows the holder itself and
//! answers "does not apply" instead of failing for holders that lack the
//! capability.
//!
//! # Invariants
//!
//! - `set`/`remove` report refusal as [`Mutation::Rejected`] and leave the holder unchanged.
//!   - Enforced in: each processor implementation
//!   - Tested by: `processor::tests::rejected_write_leaves_holder_untouched`
//!   - Failure symptom: a rejected key is reported while the holder shows a half-applied value.
//!
//! - Erased processors never panic on a holder outside their capability.
//!   - Enforced in: [`ErasedValueProcessor`] adapter (`narrow` before every call)
//!   - Tested by: `processor::tests::erased_processor_ignores_foreign_holders`
//!   - Failure symptom: dispatch over a mixed holder family aborts.

mod erased;
pub(crate) mod guard;
mod manipulator;

use std::error::Error;

pub use erased::{ErasedValueProcessor, erase};
pub use manipulator::{ManipulatorProcessor, ManipulatorProcessorBuilder};

use crate::error::MutationError;
use crate::holder::HolderType;
use crate::key::{DataValue, Key};
use crate::value::{ImmutableValue, Value};


/// Priority of processors that do not override [`ValueProcessor::priority`].
pub const DEFAULT_PRIORITY: i16 = 100;

/// Outcome of one attribute write or removal.
#[derive(Debug)]
pub enum Mutation {
	/// The holder now reflects the requested change.
	Applied,
	/// The holder refused the change and is unchanged.
	Rejected,
	/// The change failed unexpectedly. The holder may be partially mutated.
	Errored(MutationError),
}

impl Mutation {
	/// Maps `Ok(true)` to applied, `Ok(false)` to rejected and `Err` to errored.
	pub fn from_result<E>(result: Result<bool, E>) -> Self
	where
		E: Into<Box<dyn Error + Send + Sync>>,
	{
		match result {
			Ok(applied) => applied.into(),
			Err(err) => Self::Errored(MutationError::Holder(err.into())),
		}
	}

	pub fn error(message: impl Into<String>) -> Self {
		Self::Errored(MutationError::Message(message.into()))
	}

	pub fn is_applied(&self) -> bool {
		matches!(self, Self::Applied)
	}
}

impl From<bool> for Mutation {
	fn from(applied: bool) -> Self {
		if applied { Self::Applied } else { Self::Rejected }
	}
}

/// Get/set/remove for one key on one holder capability.
///
/// `H` is the holder family the processor is registered into; the capability
/// it works against is `<Self::Holder as HolderType<H>>::Target`.
pub trait ValueProcessor<H: ?Sized + 'static>: Send + Sync + 'static {
	type Holder: HolderType<H>;
	type Value: DataValue;

	fn key(&self) -> Key<Self::Value>;

	/// Dynamic predicate for holders that only sometimes carry the attribute.
	fn supports(&self, _holder: &<Self::Holder as HolderType<H>>::Target) -> bool {
		true
	}

	fn has_data(&self, holder: &<Self::Holder as HolderType<H>>::Target) -> bool {
		self.get(holder).is_some()
	}

	/// Current value, or `None` when the holder lacks it.
	fn get(&self, holder: &<Self::Holder as HolderType<H>>::Target) -> Option<Self::Value>;

	fn set(&self, holder: &mut <Self::Holder as HolderType<H>>::Target, value: Self::Value) -> Mutation;

	/// Clears the attribute. Intrinsic attributes keep the default and refuse.
	fn remove(&self, _holder: &mut <Self::Holder as HolderType<H>>::Target) -> Mutation {
		Mutation::Rejected
	}

	/// Fallback shown alongside constructed values.
	fn default_value(&self) -> Self::Value;

	fn construct_value(&self, actual: Self::Value) -> Value<Self::Value> {
		Value::with_default(self.key(), actual, self.default_value())
	}

	fn construct_immutable_value(&self, actual: Self::Value) -> ImmutableValue<Self::Value> {
		ImmutableValue::with_default(self.key(), actual, self.default_value())
	}

	/// Higher wins when several processors apply to the same holder and key.
	fn priority(&self) -> i16 {
		DEFAULT_PRIORITY
	}
}
