//! Typed attribute framework.
//!
//! Lets heterogeneous holder objects expose, query and transactionally mutate
//! named, strongly typed attributes through one API, without the holders
//! implementing any of the dispatch themselves.
//!
//! - [`Key`]: typed identity of one attribute
//! - [`Value`] / [`ImmutableValue`] / [`AnyValue`]: (key, value) pairs
//! - [`ValueProcessor`]: get/set/remove for one key on one holder capability
//! - [`Manipulator`]: holder-independent bag of values for one feature
//! - [`ManipulatorProcessor`]: composite processor with the transactional API
//! - [`MergeFunction`]: reconciles current and proposed state before writes
//! - [`DataTransactionResult`]: outcome of every mutation
//! - [`DataRegistry`]: startup-built index from holders and keys to processors
//!
//! Holder families plug in through [`HolderType`] tokens that narrow a family
//! object to a capability; see the `vessel-builtins` crate for a complete
//! family.

mod config;
mod container;
mod error;
mod holder;
mod key;
mod manipulator;
mod merge;
mod processor;
mod registry;
mod transaction;
mod value;

#[cfg(test)]
mod test_fixtures;

pub use config::{DataConfig, PartialRejection};
pub use container::{DataContainer, DataQuery, DataView};
pub use error::{DataError, MutationError, RegistryError};
pub use holder::{HolderType, HolderTypeId};
pub use key::{DataValue, Key, KeyDef, KeyId};
pub use manipulator::{
	ImmutableManipulator, Manipulator, ManipulatorSchema, ManipulatorSchemaBuilder, SchemaEntry,
};
pub use merge::{KeepOld, MergeFunction, PerKeyMerge, TakeNew};
pub use processor::{
	DEFAULT_PRIORITY, ErasedValueProcessor, ManipulatorProcessor, ManipulatorProcessorBuilder,
	Mutation, ValueProcessor, erase,
};
pub use registry::{DataRegistry, DataRegistryBuilder, ProcessorId};
pub use transaction::{DataTransactionBuilder, DataTransactionResult, ResultType};
pub use value::{AnyValue, ImmutableValue, Value};
