use thiserror::Error;

use crate::key::KeyId;

/// Startup configuration errors raised while wiring processors together.
///
/// These are never recovered from at runtime: [`crate::DataRegistryBuilder::register`]
/// turns them into a panic so initialization aborts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
	/// A second value processor was offered for an already claimed (key, holder type) pair.
	#[error("duplicate value processor: key={key} holder_type={holder_type}")]
	DuplicateValueProcessor {
		key: KeyId,
		holder_type: &'static str,
	},
	/// The exact same value processor instance was registered twice.
	#[error("value processor already registered: key={key} holder_type={holder_type}")]
	ProcessorAlreadyRegistered {
		key: KeyId,
		holder_type: &'static str,
	},
	/// Two manipulator processors share a manipulator id.
	#[error("duplicate manipulator processor: {0}")]
	DuplicateManipulator(&'static str),
	/// One key id is used with two different value types.
	#[error("key {key} used with conflicting value types: existing={existing} new={new}")]
	KeyTypeMismatch {
		key: KeyId,
		existing: &'static str,
		new: &'static str,
	},
	/// A value processor's key does not belong to its manipulator.
	#[error("key {key} is not part of manipulator {manipulator}")]
	KeyNotInSchema {
		key: KeyId,
		manipulator: &'static str,
	},
}

/// Errors raised by manipulator and container access.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataError {
	#[error("manipulator {manipulator} does not support key {key}")]
	UnsupportedKey {
		manipulator: &'static str,
		key: KeyId,
	},
	#[error("type mismatch for key {key}: expected {expected}, got {got}")]
	TypeMismatch {
		key: KeyId,
		expected: &'static str,
		got: &'static str,
	},
	#[error("invalid data query {0:?}")]
	InvalidQuery(String),
	#[error("container value at {query} could not be converted: {reason}")]
	Container { query: String, reason: String },
}

/// Cause of an errored attribute write or removal.
#[derive(Debug, Error)]
pub enum MutationError {
	/// The holder reported a failure from its raw primitive.
	#[error("holder error: {0}")]
	Holder(#[source] Box<dyn std::error::Error + Send + Sync>),
	/// Processor-level failure described by a message.
	#[error("{0}")]
	Message(String),
	/// The holder or processor panicked mid-mutation.
	#[error("panicked: {0}")]
	Panicked(String),
}
