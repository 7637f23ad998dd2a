use std::any::TypeId;
use std::cmp::Reverse;
use std::sync::Arc;

use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;
use tracing::{debug, trace};

use super::{DataRegistry, ProcessorId};
use crate::config::DataConfig;
use crate::error::RegistryError;
use crate::holder::HolderTypeId;
use crate::key::KeyId;
use crate::processor::ManipulatorProcessor;

/// Collects manipulator processors during startup.
///
/// Every check runs before anything is inserted, so a rejected registration
/// leaves the builder unchanged.
pub struct DataRegistryBuilder<H: ?Sized> {
	label: &'static str,
	config: DataConfig,
	manipulators: IndexMap<&'static str, ManipulatorProcessor<H>>,
	pairs: FxHashSet<(KeyId, HolderTypeId)>,
	key_types: FxHashMap<KeyId, (TypeId, &'static str)>,
	seen: FxHashSet<usize>,
}

impl<H: ?Sized + 'static> DataRegistryBuilder<H> {
	pub fn new(label: &'static str) -> Self {
		Self {
			label,
			config: DataConfig::default(),
			manipulators: IndexMap::new(),
			pairs: FxHashSet::default(),
			key_types: FxHashMap::default(),
			seen: FxHashSet::default(),
		}
	}

	pub fn with_config(mut self, config: DataConfig) -> Self {
		self.config = config;
		self
	}

	/// Registers `processor`, panicking on any conflict.
	///
	/// Registration conflicts are configuration bugs; aborting startup is the
	/// only sound reaction.
	pub fn register(mut self, processor: ManipulatorProcessor<H>) -> Self {
		if let Err(err) = self.try_register(processor) {
			panic!("{}: {err}", self.label);
		}
		self
	}

	/// Registers `processor`, reporting conflicts instead of panicking.
	pub fn try_register(&mut self, processor: ManipulatorProcessor<H>) -> Result<(), RegistryError> {
		for value_processor in processor.value_processors() {
			let ptr = Arc::as_ptr(value_processor) as *const () as usize;
			if self.seen.contains(&ptr) {
				return Err(RegistryError::ProcessorAlreadyRegistered {
					key: value_processor.key_id(),
					holder_type: value_processor.holder_type().name(),
				});
			}
		}

		if self.manipulators.contains_key(processor.id()) {
			return Err(RegistryError::DuplicateManipulator(processor.id()));
		}

		for entry in processor.schema().entries() {
			let key = entry.key_id();
			if let Some(&(existing, existing_name)) = self.key_types.get(&key)
				&& existing != entry.value_type()
			{
				return Err(RegistryError::KeyTypeMismatch {
					key,
					existing: existing_name,
					new: entry.type_name(),
				});
			}
		}

		for value_processor in processor.value_processors() {
			let holder_type = value_processor.holder_type();
			if self.pairs.contains(&(value_processor.key_id(), holder_type)) {
				return Err(RegistryError::DuplicateValueProcessor {
					key: value_processor.key_id(),
					holder_type: holder_type.name(),
				});
			}
		}

		for entry in processor.schema().entries() {
			self.key_types
				.entry(entry.key_id())
				.or_insert((entry.value_type(), entry.type_name()));
		}
		for value_processor in processor.value_processors() {
			self.seen
				.insert(Arc::as_ptr(value_processor) as *const () as usize);
			self.pairs
				.insert((value_processor.key_id(), value_processor.holder_type()));
			trace!(
				registry = self.label,
				manipulator = processor.id(),
				key = %value_processor.key_id(),
				holder_type = %value_processor.holder_type(),
				"value processor registered"
			);
		}
		self.manipulators.insert(processor.id(), processor);
		Ok(())
	}

	pub fn len(&self) -> usize {
		self.manipulators.len()
	}

	pub fn is_empty(&self) -> bool {
		self.manipulators.is_empty()
	}

	/// Freezes the registry. Every manipulator processor adopts its config.
	pub fn build(self) -> DataRegistry<H> {
		let mut manipulators = IndexMap::with_capacity(self.manipulators.len());
		let mut processors = Vec::new();
		let mut owners = Vec::new();
		let mut by_holder: IndexMap<HolderTypeId, SmallVec<[ProcessorId; 4]>> = IndexMap::new();
		let mut by_key: FxHashMap<KeyId, SmallVec<[ProcessorId; 2]>> = FxHashMap::default();

		for (owner, (id, processor)) in self.manipulators.into_iter().enumerate() {
			let processor = processor.with_config(self.config);
			for value_processor in processor.value_processors() {
				let pid = ProcessorId(processors.len() as u32);
				by_holder
					.entry(value_processor.holder_type())
					.or_default()
					.push(pid);
				by_key.entry(value_processor.key_id()).or_default().push(pid);
				processors.push(value_processor.clone());
				owners.push(owner);
			}
			manipulators.insert(id, Arc::new(processor));
		}

		for ids in by_key.values_mut() {
			ids.sort_by_key(|pid| Reverse(processors[pid.index()].priority()));
		}

		debug!(
			registry = self.label,
			manipulators = manipulators.len(),
			processors = processors.len(),
			holder_types = by_holder.len(),
			"data registry built"
		);

		DataRegistry {
			label: self.label,
			config: self.config,
			manipulators,
			processors,
			owners,
			by_holder,
			by_key,
		}
	}
}
