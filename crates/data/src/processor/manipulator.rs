use std::sync::Arc;

use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use tracing::{debug, error, warn};

use super::guard::contain;
use super::{ErasedValueProcessor, Mutation, ValueProcessor, erase};
use crate::config::{DataConfig, PartialRejection};
use crate::container::DataView;
use crate::error::RegistryError;
use crate::holder::HolderTypeId;
use crate::key::{DataValue, Key, KeyId};
use crate::manipulator::{ImmutableManipulator, Manipulator, ManipulatorSchema};
use crate::merge::MergeFunction;
use crate::transaction::{DataTransactionBuilder, DataTransactionResult, ResultType};

type Resolved<'a, H> = SmallVec<[&'a Arc<dyn ErasedValueProcessor<H>>; 4]>;

/// Composite processor exposing the holder-facing API of one manipulator.
///
/// Owns the value processors that populate and drain the manipulator. Each
/// owned processor may target a different holder capability, so one
/// manipulator processor can serve unrelated holders that each expose a
/// subset of its keys.
pub struct ManipulatorProcessor<H: ?Sized> {
	schema: Arc<ManipulatorSchema>,
	/// Sorted by descending priority; registration order among equals.
	processors: Vec<Arc<dyn ErasedValueProcessor<H>>>,
	config: DataConfig,
}

impl<H: ?Sized> Clone for ManipulatorProcessor<H> {
	fn clone(&self) -> Self {
		Self {
			schema: self.schema.clone(),
			processors: self.processors.clone(),
			config: self.config,
		}
	}
}

impl<H: ?Sized> std::fmt::Debug for ManipulatorProcessor<H> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ManipulatorProcessor")
			.field("id", &self.schema.id())
			.field("processors", &self.processors.len())
			.finish()
	}
}

/// Builder for [`ManipulatorProcessor`].
pub struct ManipulatorProcessorBuilder<H: ?Sized> {
	schema: Arc<ManipulatorSchema>,
	processors: Vec<Arc<dyn ErasedValueProcessor<H>>>,
	config: DataConfig,
}

impl<H: ?Sized + 'static> ManipulatorProcessorBuilder<H> {
	pub fn with<P: ValueProcessor<H>>(self, processor: P) -> Self {
		self.with_erased(erase(processor))
	}

	/// Adds an already erased processor handle.
	pub fn with_erased(mut self, processor: Arc<dyn ErasedValueProcessor<H>>) -> Self {
		self.processors.push(processor);
		self
	}

	/// Policy used when the processor is run outside a registry.
	pub fn config(mut self, config: DataConfig) -> Self {
		self.config = config;
		self
	}

	/// Validates the owned processors against the schema and each other.
	pub fn build(mut self) -> Result<ManipulatorProcessor<H>, RegistryError> {
		let manipulator = self.schema.id();
		let mut seen = FxHashSet::default();
		let mut pairs = FxHashSet::default();
		for processor in &self.processors {
			let key = processor.key_id();
			let holder_type = processor.holder_type();
			let entry = self
				.schema
				.entry(key)
				.ok_or(RegistryError::KeyNotInSchema { key, manipulator })?;
			if entry.value_type() != processor.value_type() {
				return Err(RegistryError::KeyTypeMismatch {
					key,
					existing: entry.type_name(),
					new: processor.value_type_name(),
				});
			}
			if !seen.insert(Arc::as_ptr(processor) as *const () as usize) {
				return Err(RegistryError::ProcessorAlreadyRegistered {
					key,
					holder_type: holder_type.name(),
				});
			}
			if !pairs.insert((key, holder_type)) {
				return Err(RegistryError::DuplicateValueProcessor {
					key,
					holder_type: holder_type.name(),
				});
			}
		}
		self.processors
			.sort_by_key(|processor| std::cmp::Reverse(processor.priority()));
		Ok(ManipulatorProcessor {
			schema: self.schema,
			processors: self.processors,
			config: self.config,
		})
	}
}

impl<H: ?Sized + 'static> ManipulatorProcessor<H> {
	pub fn builder(schema: Arc<ManipulatorSchema>) -> ManipulatorProcessorBuilder<H> {
		ManipulatorProcessorBuilder {
			schema,
			processors: Vec::new(),
			config: DataConfig::default(),
		}
	}

	pub fn id(&self) -> &'static str {
		self.schema.id()
	}

	pub fn schema(&self) -> &Arc<ManipulatorSchema> {
		&self.schema
	}

	pub fn config(&self) -> &DataConfig {
		&self.config
	}

	pub fn value_processors(&self) -> &[Arc<dyn ErasedValueProcessor<H>>] {
		&self.processors
	}

	pub(crate) fn with_config(mut self, config: DataConfig) -> Self {
		self.config = config;
		self
	}

	/// Picks, per key, the highest-priority owned processor that supports `holder`.
	fn resolve(&self, holder: &H) -> Resolved<'_, H> {
		let mut resolved: Resolved<'_, H> = SmallVec::new();
		for processor in &self.processors {
			let key = processor.key_id();
			if resolved.iter().any(|chosen| chosen.key_id() == key) {
				continue;
			}
			if processor.supports(holder) {
				resolved.push(processor);
			}
		}
		resolved
	}

	/// Values the holder currently has, without defaults.
	fn present(&self, holder: &H, resolved: &Resolved<'_, H>) -> Manipulator {
		let mut present = Manipulator::empty(self.schema.clone());
		for processor in resolved {
			if !processor.has_data(holder) {
				continue;
			}
			if let Some(value) = processor.get(holder) {
				present.put(value);
			}
		}
		present
	}

	/// Whether at least one owned processor applies to `holder`.
	pub fn supports(&self, holder: &H) -> bool {
		self.processors.iter().any(|processor| processor.supports(holder))
	}

	/// Holder-supported keys of this manipulator, in schema order.
	pub fn supported_keys(&self, holder: &H) -> Vec<KeyId> {
		let resolved = self.resolve(holder);
		self.schema
			.keys()
			.filter(|key| resolved.iter().any(|processor| processor.key_id() == *key))
			.collect()
	}

	/// Current state of `holder`, or `None` if it has none of this manipulator's values.
	///
	/// Keys the holder lacks keep their defaults.
	pub fn from(&self, holder: &H) -> Option<Manipulator> {
		let resolved = self.resolve(holder);
		self.overlay(&self.present(holder, &resolved))
	}

	/// Schema defaults overlaid with `present`, or `None` when nothing is present.
	fn overlay(&self, present: &Manipulator) -> Option<Manipulator> {
		if present.is_empty() {
			return None;
		}
		let mut manipulator = self.schema.create();
		for value in present.values() {
			manipulator.put(value.clone());
		}
		Some(manipulator)
	}

	/// Like [`Self::from`], falling back to defaults for a supported holder.
	pub fn create_from(&self, holder: &H) -> Option<Manipulator> {
		if !self.supports(holder) {
			return None;
		}
		Some(self.from(holder).unwrap_or_else(|| self.schema.create()))
	}

	/// Merges the holder's current state into a copy of `manipulator`.
	///
	/// `merge` receives the caller's manipulator as the old side and the
	/// holder's state as the proposal.
	pub fn fill(
		&self,
		holder: &H,
		manipulator: &Manipulator,
		merge: &dyn MergeFunction,
	) -> Option<Manipulator> {
		if manipulator.id() != self.id() || !self.supports(holder) {
			return None;
		}
		let mut filled = manipulator.copy();
		let Some(current) = self.from(holder) else {
			return Some(filled);
		};
		let merged = merge.merge(Some(manipulator), &current);
		for value in merged.values() {
			if filled.supports_id(value.key_id()) {
				filled.put(value.clone());
			}
		}
		Some(filled)
	}

	/// Populates `manipulator` from serialized state, without a holder.
	///
	/// Absent optional fields are skipped. A missing or undecodable required
	/// field fails the whole fill.
	pub fn fill_from_container(
		&self,
		view: &dyn DataView,
		mut manipulator: Manipulator,
	) -> Option<Manipulator> {
		if manipulator.id() != self.id() {
			return None;
		}
		for entry in self.schema.entries() {
			let Some(raw) = view.get_raw(entry.query()) else {
				if entry.is_required() {
					debug!(manipulator = self.id(), query = %entry.query(), "required field absent");
					return None;
				}
				continue;
			};
			match entry.default_value().decode_like(raw) {
				Ok(value) => manipulator.put(value),
				Err(err) => {
					warn!(
						manipulator = self.id(),
						query = %entry.query(),
						error = %err,
						"container field could not be decoded"
					);
					if entry.is_required() {
						return None;
					}
				}
			}
		}
		Some(manipulator)
	}

	/// Writes `manipulator` to `holder` after reconciling it with `merge`.
	///
	/// Values are written in schema order. Values the holder refuses are
	/// rejected. The first errored write stops the operation with
	/// [`ResultType::Error`]; writes applied before it stay applied.
	pub fn set(
		&self,
		holder: &mut H,
		manipulator: &Manipulator,
		merge: &dyn MergeFunction,
	) -> DataTransactionResult {
		if manipulator.id() != self.id() {
			return DataTransactionResult::fail_result(manipulator.values().cloned());
		}
		let resolved = self.resolve(holder);
		if resolved.is_empty() {
			return DataTransactionResult::fail_result(manipulator.values().cloned());
		}

		let present = self.present(holder, &resolved);
		let old = self.overlay(&present);
		let merged = merge.merge(old.as_ref(), manipulator);

		// Schema order, whatever order the caller inserted values in.
		let ordered = self
			.schema
			.keys()
			.filter_map(|key| merged.get_any(key))
			.chain(merged.values().filter(|value| !self.schema.supports(value.key_id())));
		let mut builder = DataTransactionBuilder::new();
		for value in ordered {
			let key = value.key_id();
			let Some(processor) = resolved.iter().find(|processor| processor.key_id() == key) else {
				builder = builder.reject(value.clone());
				continue;
			};
			match contain(self.config.contain_panics, || processor.set(holder, value)) {
				Mutation::Applied => {
					builder = builder.success(value.clone());
					if let Some(previous) = present.get_any(key) {
						builder = builder.replace(previous.clone());
					}
				}
				Mutation::Rejected => builder = builder.reject(value.clone()),
				Mutation::Errored(err) => {
					debug!(manipulator = self.id(), key = %key, error = %err, "value write errored");
					return builder
						.reject(value.clone())
						.result(ResultType::Error)
						.build();
				}
			}
		}
		let result_type = classify(&builder, self.config.partial_rejection);
		builder.result(result_type).build()
	}

	/// Clears every removable value of this manipulator from `holder`.
	///
	/// Values the holder lacks count as already removed. The first errored
	/// removal aborts with a bare [`ResultType::Error`].
	pub fn remove(&self, holder: &mut H) -> DataTransactionResult {
		let resolved = self.resolve(holder);
		if resolved.is_empty() {
			return DataTransactionResult::fail_no_data();
		}
		let mut builder = DataTransactionBuilder::new();
		for processor in resolved {
			let existing = processor.has_data(holder).then(|| processor.get(holder)).flatten();
			let Some(existing) = existing else {
				builder = builder.result(ResultType::Success);
				continue;
			};
			match contain(self.config.contain_panics, || processor.remove(holder)) {
				Mutation::Applied => {
					builder = builder.replace(existing).result(ResultType::Success);
				}
				Mutation::Rejected => {}
				Mutation::Errored(err) => {
					error!(manipulator = self.id(), key = %processor.key_id(), error = %err, "value removal errored");
					return DataTransactionResult::builder().result(ResultType::Error).build();
				}
			}
		}
		builder.build()
	}

	/// Functional update of an immutable manipulator of this kind.
	pub fn with<T: DataValue>(
		&self,
		key: Key<T>,
		value: T,
		immutable: &ImmutableManipulator,
	) -> Option<ImmutableManipulator> {
		if immutable.id() != self.id() {
			return None;
		}
		immutable.with(key, value)
	}

	/// Holder types served by the owned processors, in resolution order.
	pub fn holder_types(&self) -> impl Iterator<Item = HolderTypeId> + '_ {
		self.processors.iter().map(|processor| processor.holder_type())
	}
}

fn classify(builder: &DataTransactionBuilder, policy: PartialRejection) -> ResultType {
	if builder.successful_count() == 0 {
		return ResultType::Failure;
	}
	match policy {
		PartialRejection::Failure if builder.rejected_count() > 0 => ResultType::Failure,
		_ => ResultType::Success,
	}
}
