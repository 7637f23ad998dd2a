//! Outcome records for mutating operations.
//!
//! Every write or removal returns a [`DataTransactionResult`]: one overall
//! classification plus the values that were applied, the values they
//! replaced, and the values that could not be applied. A partially applied
//! write may still be classified [`ResultType::Success`], so callers that
//! care about individual keys inspect [`DataTransactionResult::rejected_data`].

use crate::value::AnyValue;

#[cfg(test)]
mod tests;

/// Overall classification of a transaction.
///
/// Ordered by severity so that combining results keeps the worst outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResultType {
	Success,
	Failure,
	Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DataTransactionResult {
	result_type: ResultType,
	successful: Vec<AnyValue>,
	replaced: Vec<AnyValue>,
	rejected: Vec<AnyValue>,
}

impl DataTransactionResult {
	pub fn builder() -> DataTransactionBuilder {
		DataTransactionBuilder::default()
	}

	/// Success that touched nothing.
	pub fn success_no_data() -> Self {
		Self::builder().result(ResultType::Success).build()
	}

	/// Failure with nothing rejected.
	pub fn fail_no_data() -> Self {
		Self::builder().result(ResultType::Failure).build()
	}

	/// Failure rejecting every given value.
	pub fn fail_result(values: impl IntoIterator<Item = AnyValue>) -> Self {
		Self::builder()
			.reject_all(values)
			.result(ResultType::Failure)
			.build()
	}

	/// Error rejecting the value whose application errored.
	pub fn error_result(value: AnyValue) -> Self {
		Self::builder()
			.reject(value)
			.result(ResultType::Error)
			.build()
	}

	/// Success that removed `value`.
	pub fn success_remove(value: AnyValue) -> Self {
		Self::builder()
			.replace(value)
			.result(ResultType::Success)
			.build()
	}

	/// Success that applied `value`.
	pub fn success_result(value: AnyValue) -> Self {
		Self::builder()
			.success(value)
			.result(ResultType::Success)
			.build()
	}

	pub fn result_type(&self) -> ResultType {
		self.result_type
	}

	pub fn is_successful(&self) -> bool {
		self.result_type == ResultType::Success
	}

	pub fn successful_data(&self) -> &[AnyValue] {
		&self.successful
	}

	pub fn replaced_data(&self) -> &[AnyValue] {
		&self.replaced
	}

	pub fn rejected_data(&self) -> &[AnyValue] {
		&self.rejected
	}

	/// Folds `other` into `self`. Value sets are unioned and the worse
	/// classification is kept.
	pub fn absorb(self, other: DataTransactionResult) -> Self {
		let result_type = self.result_type.max(other.result_type);
		DataTransactionBuilder::from(self)
			.success_all(other.successful)
			.replace_all(other.replaced)
			.reject_all(other.rejected)
			.result(result_type)
			.build()
	}
}

/// Accumulates per-attribute outcomes into a [`DataTransactionResult`].
///
/// Starts classified as [`ResultType::Failure`]. Values are de-duplicated by
/// equality; insertion order is kept.
#[derive(Debug, Clone)]
pub struct DataTransactionBuilder {
	result_type: ResultType,
	successful: Vec<AnyValue>,
	replaced: Vec<AnyValue>,
	rejected: Vec<AnyValue>,
}

impl Default for DataTransactionBuilder {
	fn default() -> Self {
		Self {
			result_type: ResultType::Failure,
			successful: Vec::new(),
			replaced: Vec::new(),
			rejected: Vec::new(),
		}
	}
}

fn push_unique(set: &mut Vec<AnyValue>, value: AnyValue) {
	if !set.contains(&value) {
		set.push(value);
	}
}

impl DataTransactionBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn result(mut self, result_type: ResultType) -> Self {
		self.result_type = result_type;
		self
	}

	pub fn success(mut self, value: AnyValue) -> Self {
		push_unique(&mut self.successful, value);
		self
	}

	pub fn success_all(mut self, values: impl IntoIterator<Item = AnyValue>) -> Self {
		for value in values {
			push_unique(&mut self.successful, value);
		}
		self
	}

	pub fn replace(mut self, value: AnyValue) -> Self {
		push_unique(&mut self.replaced, value);
		self
	}

	pub fn replace_all(mut self, values: impl IntoIterator<Item = AnyValue>) -> Self {
		for value in values {
			push_unique(&mut self.replaced, value);
		}
		self
	}

	pub fn reject(mut self, value: AnyValue) -> Self {
		push_unique(&mut self.rejected, value);
		self
	}

	pub fn reject_all(mut self, values: impl IntoIterator<Item = AnyValue>) -> Self {
		for value in values {
			push_unique(&mut self.rejected, value);
		}
		self
	}

	pub fn result_type(&self) -> ResultType {
		self.result_type
	}

	pub fn successful_count(&self) -> usize {
		self.successful.len()
	}

	pub fn rejected_count(&self) -> usize {
		self.rejected.len()
	}

	pub fn build(self) -> DataTransactionResult {
		DataTransactionResult {
			result_type: self.result_type,
			successful: self.successful,
			replaced: self.replaced,
			rejected: self.rejected,
		}
	}
}

impl From<DataTransactionResult> for DataTransactionBuilder {
	fn from(result: DataTransactionResult) -> Self {
		Self {
			result_type: result.result_type,
			successful: result.successful,
			replaced: result.replaced,
			rejected: result.rejected,
		}
	}
}
