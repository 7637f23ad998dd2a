use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use super::Mutation;
use crate::error::MutationError;

/// Runs `op`, turning a panic into [`Mutation::Errored`] when `contain` is set.
///
/// The holder may be left partially mutated by a contained panic; callers
/// report that as an error and do not touch the holder again in the same call.
pub(crate) fn contain(contain: bool, op: impl FnOnce() -> Mutation) -> Mutation {
	if !contain {
		return op();
	}
	match panic::catch_unwind(AssertUnwindSafe(op)) {
		Ok(mutation) => mutation,
		Err(payload) => Mutation::Errored(MutationError::Panicked(panic_message(&*payload))),
	}
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
	if let Some(message) = payload.downcast_ref::<&'static str>() {
		(*message).to_string()
	} else if let Some(message) = payload.downcast_ref::<String>() {
		message.clone()
	} else {
		"non-string panic payload".to_string()
	}
}
