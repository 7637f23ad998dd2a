//! Holder-type and key indices over every registered processor.
//!
//! # Purpose
//!
//! [`DataRegistry`] answers "which processors apply to this holder" and "which
//! processor handles this key on this holder", and exposes key-level and
//! manipulator-level transactions on top of those answers. It is built once at
//! startup through [`DataRegistryBuilder`] and is immutable afterwards; share it
//! by reference or `Arc`.
//!
//! # Mental Model
//!
//! Value processors are grouped into buckets by holder type. A holder is
//! checked against each bucket once (through the bucket's capability token),
//! and only matching buckets are scanned for the processors' dynamic
//! `supports` predicates. A holder may match several buckets when it exposes
//! several capabilities.
//!
//! Precedence:
//! - Across distinct keys, every matching processor applies.
//! - For one key, the highest [`crate::ValueProcessor::priority`] wins; equal priorities go to
//!   the earlier registration.
//!
//! # Invariants
//!
//! - At most one value processor per (key, holder type) pair.
//!   - Enforced in: [`DataRegistryBuilder::try_register`]
//!   - Tested by: `registry::tests::test_duplicate_pair_is_fatal`
//!   - Failure symptom: two processors race for the same attribute and `set` results depend on registration order.
//!
//! - A value processor instance is registered at most once.
//!   - Enforced in: [`DataRegistryBuilder::try_register`] (pointer identity)
//!   - Tested by: `registry::tests::test_reregistering_a_processor_is_rejected`
//!   - Failure symptom: one processor answers for two manipulators.
//!
//! - One key id has one value type across the registry.
//!   - Enforced in: [`DataRegistryBuilder::try_register`]
//!   - Tested by: `registry::tests::test_key_type_conflicts_are_rejected`
//!   - Failure symptom: typed reads through [`DataRegistry::get`] silently return `None`.
//!
//! - A failed registration inserts nothing.
//!   - Enforced in: [`DataRegistryBuilder::try_register`] (all checks precede insertion)
//!   - Tested by: `registry::tests::test_failed_registration_leaves_builder_untouched`
//!   - Failure symptom: a retried or skipped registration leaves orphaned pairs behind.

mod build;

use std::sync::Arc;

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::{debug, error};

pub use build::DataRegistryBuilder;

use crate::config::DataConfig;
use crate::holder::HolderTypeId;
use crate::key::{DataValue, Key, KeyId};
use crate::manipulator::Manipulator;
use crate::merge::MergeFunction;
use crate::processor::guard::contain;
use crate::processor::{ErasedValueProcessor, ManipulatorProcessor, Mutation};
use crate::transaction::{DataTransactionResult, ResultType};
use crate::value::{AnyValue, ImmutableValue};


/// Dense handle to a registered value processor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProcessorId(u32);

impl ProcessorId {
	#[inline]
	pub fn index(self) -> usize {
		self.0 as usize
	}
}

/// Frozen processor registry for the holder family `H`.
pub struct DataRegistry<H: ?Sized> {
	label: &'static str,
	config: DataConfig,
	manipulators: IndexMap<&'static str, Arc<ManipulatorProcessor<H>>>,
	processors: Vec<Arc<dyn ErasedValueProcessor<H>>>,
	/// Index of the owning manipulator per processor.
	owners: Vec<usize>,
	by_holder: IndexMap<HolderTypeId, SmallVec<[ProcessorId; 4]>>,
	/// Sorted by descending priority, then registration order.
	by_key: FxHashMap<KeyId, SmallVec<[ProcessorId; 2]>>,
}

impl<H: ?Sized> std::fmt::Debug for DataRegistry<H> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("DataRegistry")
			.field("label", &self.label)
			.field("manipulators", &self.manipulators.keys().collect::<Vec<_>>())
			.field("processors", &self.processors.len())
			.finish()
	}
}

impl<H: ?Sized + 'static> DataRegistry<H> {
	pub fn builder(label: &'static str) -> DataRegistryBuilder<H> {
		DataRegistryBuilder::new(label)
	}

	pub fn label(&self) -> &'static str {
		self.label
	}

	pub fn config(&self) -> &DataConfig {
		&self.config
	}

	/// Number of registered value processors.
	pub fn len(&self) -> usize {
		self.processors.len()
	}

	pub fn is_empty(&self) -> bool {
		self.processors.is_empty()
	}

	pub fn processor(&self, id: ProcessorId) -> Option<&Arc<dyn ErasedValueProcessor<H>>> {
		self.processors.get(id.index())
	}

	/// Key handled by the processor `id`.
	pub fn key_of(&self, id: ProcessorId) -> Option<KeyId> {
		self.processor(id).map(|processor| processor.key_id())
	}

	/// Manipulator processor owning the value processor `id`.
	pub fn owner_of(&self, id: ProcessorId) -> Option<&Arc<ManipulatorProcessor<H>>> {
		let owner = *self.owners.get(id.index())?;
		self.manipulators.get_index(owner).map(|(_, processor)| processor)
	}

	/// Every processor supporting `holder`, in registration order.
	pub fn processors_for(&self, holder: &H) -> SmallVec<[ProcessorId; 8]> {
		let mut found: SmallVec<[ProcessorId; 8]> = SmallVec::new();
		for ids in self.by_holder.values() {
			let Some(&first) = ids.first() else {
				continue;
			};
			if !self.processors[first.index()].matches(holder) {
				continue;
			}
			found.extend(
				ids.iter()
					.copied()
					.filter(|id| self.processors[id.index()].supports(holder)),
			);
		}
		found.sort_unstable();
		found
	}

	/// All processors registered for `key`, highest priority first.
	pub fn processors_of_key(&self, key: KeyId) -> &[ProcessorId] {
		self.by_key
			.get(&key)
			.map(|ids| ids.as_slice())
			.unwrap_or_default()
	}

	/// The processor that handles `key` on `holder`, if any.
	pub fn processor_of(&self, key: KeyId, holder: &H) -> Option<ProcessorId> {
		self.processors_of_key(key)
			.iter()
			.copied()
			.find(|id| self.processors[id.index()].supports(holder))
	}

	/// Number of processors registered for the (key, holder type) pair.
	pub fn processor_count(&self, key: KeyId, holder_type: HolderTypeId) -> usize {
		self.processors_of_key(key)
			.iter()
			.filter(|id| self.processors[id.index()].holder_type() == holder_type)
			.count()
	}

	pub fn supports_key<T: DataValue>(&self, holder: &H, key: Key<T>) -> bool {
		self.processor_of(key.id(), holder).is_some()
	}

	/// Current value of `key` on `holder`.
	pub fn get<T: DataValue>(&self, holder: &H, key: Key<T>) -> Option<T> {
		self.get_value(holder, key).map(ImmutableValue::into_inner)
	}

	/// Current value of `key` on `holder`, with the processor's default.
	pub fn get_value<T: DataValue>(&self, holder: &H, key: Key<T>) -> Option<ImmutableValue<T>> {
		let id = self.processor_of(key.id(), holder)?;
		let value = self.processors[id.index()].get(holder)?;
		value.downcast::<T>().cloned()
	}

	/// Writes one value, bypassing manipulators.
	///
	/// Unsupported keys and refused values fail with the value rejected; an
	/// errored write is classified [`ResultType::Error`].
	pub fn offer<T: DataValue>(&self, holder: &mut H, key: Key<T>, value: T) -> DataTransactionResult {
		let Some(id) = self.processor_of(key.id(), holder) else {
			return DataTransactionResult::fail_result([AnyValue::of(key, value)]);
		};
		let processor = &self.processors[id.index()];
		let proposed = match processor.default_value().downcast::<T>() {
			Some(template) => AnyValue::new(template.with(value)),
			None => AnyValue::of(key, value),
		};
		let previous = if processor.has_data(holder) {
			processor.get(holder)
		} else {
			None
		};
		match contain(self.config.contain_panics, || processor.set(holder, &proposed)) {
			Mutation::Applied => DataTransactionResult::builder()
				.success(proposed)
				.replace_all(previous)
				.result(ResultType::Success)
				.build(),
			Mutation::Rejected => DataTransactionResult::fail_result([proposed]),
			Mutation::Errored(err) => {
				debug!(registry = self.label, key = %key, error = %err, "value write errored");
				DataTransactionResult::error_result(proposed)
			}
		}
	}

	/// Removes one value, bypassing manipulators.
	///
	/// A holder already lacking the value succeeds without data.
	pub fn remove_key<T: DataValue>(&self, holder: &mut H, key: Key<T>) -> DataTransactionResult {
		let Some(id) = self.processor_of(key.id(), holder) else {
			return DataTransactionResult::fail_no_data();
		};
		let processor = &self.processors[id.index()];
		let existing = processor.has_data(holder).then(|| processor.get(holder)).flatten();
		let Some(existing) = existing else {
			return DataTransactionResult::success_no_data();
		};
		match contain(self.config.contain_panics, || processor.remove(holder)) {
			Mutation::Applied => DataTransactionResult::success_remove(existing),
			Mutation::Rejected => DataTransactionResult::fail_no_data(),
			Mutation::Errored(err) => {
				error!(registry = self.label, key = %key, error = %err, "value removal errored");
				DataTransactionResult::builder().result(ResultType::Error).build()
			}
		}
	}

	pub fn manipulator_processor(&self, id: &str) -> Option<&Arc<ManipulatorProcessor<H>>> {
		self.manipulators.get(id)
	}

	/// Manipulator processors in registration order.
	pub fn manipulators(&self) -> impl Iterator<Item = &Arc<ManipulatorProcessor<H>>> {
		self.manipulators.values()
	}

	/// Manipulator processors supporting `holder`.
	pub fn supported_manipulators<'a>(
		&'a self,
		holder: &'a H,
	) -> impl Iterator<Item = &'a Arc<ManipulatorProcessor<H>>> + 'a {
		self.manipulators
			.values()
			.filter(move |processor| processor.supports(holder))
	}

	/// Current state of the manipulator `id` on `holder`.
	pub fn get_manipulator(&self, holder: &H, id: &str) -> Option<Manipulator> {
		self.manipulator_processor(id)?.from(holder)
	}

	/// Current state of the manipulator `id`, or its defaults for a supported holder.
	pub fn create_manipulator(&self, holder: &H, id: &str) -> Option<Manipulator> {
		self.manipulator_processor(id)?.create_from(holder)
	}

	/// Writes `manipulator` through the processor registered for its id.
	pub fn offer_manipulator(
		&self,
		holder: &mut H,
		manipulator: &Manipulator,
		merge: &dyn MergeFunction,
	) -> DataTransactionResult {
		match self.manipulator_processor(manipulator.id()) {
			Some(processor) => processor.set(holder, manipulator, merge),
			None => DataTransactionResult::fail_result(manipulator.values().cloned()),
		}
	}

	pub fn remove_manipulator(&self, holder: &mut H, id: &str) -> DataTransactionResult {
		match self.manipulator_processor(id) {
			Some(processor) => processor.remove(holder),
			None => DataTransactionResult::fail_no_data(),
		}
	}
}
