use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

use super::*;
use crate::key::{Key, KeyDef};

const LEVEL: Key<i32> = Key::new(KeyDef::new("test:level", "Level", "level"));

#[test]
fn fresh_builder_is_failure() {
	let result = DataTransactionResult::builder().build();
	assert_eq!(result.result_type(), ResultType::Failure);
	assert!(!result.is_successful());
	assert!(result.successful_data().is_empty());
}

#[test]
fn builder_deduplicates_equal_values() {
	let result = DataTransactionResult::builder()
		.success(AnyValue::of(LEVEL, 1))
		.success(AnyValue::of(LEVEL, 1))
		.success(AnyValue::of(LEVEL, 2))
		.reject_all([AnyValue::of(LEVEL, 3), AnyValue::of(LEVEL, 3)])
		.result(ResultType::Success)
		.build();
	assert_eq!(
		result.successful_data(),
		&[AnyValue::of(LEVEL, 1), AnyValue::of(LEVEL, 2)]
	);
	assert_eq!(result.rejected_data(), &[AnyValue::of(LEVEL, 3)]);
}

#[rstest]
#[case(DataTransactionResult::success_no_data(), ResultType::Success, 0, 0, 0)]
#[case(DataTransactionResult::fail_no_data(), ResultType::Failure, 0, 0, 0)]
#[case(DataTransactionResult::fail_result([AnyValue::of(LEVEL, 1)]), ResultType::Failure, 0, 0, 1)]
#[case(DataTransactionResult::error_result(AnyValue::of(LEVEL, 1)), ResultType::Error, 0, 0, 1)]
#[case(DataTransactionResult::success_remove(AnyValue::of(LEVEL, 1)), ResultType::Success, 0, 1, 0)]
#[case(DataTransactionResult::success_result(AnyValue::of(LEVEL, 1)), ResultType::Success, 1, 0, 0)]
fn shorthand_constructors(
	#[case] result: DataTransactionResult,
	#[case] expected: ResultType,
	#[case] successful: usize,
	#[case] replaced: usize,
	#[case] rejected: usize,
) {
	assert_eq!(result.result_type(), expected);
	assert_eq!(result.successful_data().len(), successful);
	assert_eq!(result.replaced_data().len(), replaced);
	assert_eq!(result.rejected_data().len(), rejected);
}

#[rstest]
#[case(ResultType::Success, ResultType::Success, ResultType::Success)]
#[case(ResultType::Success, ResultType::Failure, ResultType::Failure)]
#[case(ResultType::Error, ResultType::Success, ResultType::Error)]
#[case(ResultType::Failure, ResultType::Error, ResultType::Error)]
fn absorb_keeps_worst_outcome(
	#[case] left: ResultType,
	#[case] right: ResultType,
	#[case] expected: ResultType,
) {
	let a = DataTransactionResult::builder()
		.success(AnyValue::of(LEVEL, 1))
		.result(left)
		.build();
	let b = DataTransactionResult::builder()
		.success(AnyValue::of(LEVEL, 1))
		.replace(AnyValue::of(LEVEL, 0))
		.result(right)
		.build();
	let merged = a.absorb(b);
	assert_eq!(merged.result_type(), expected);
	assert_eq!(merged.successful_data(), &[AnyValue::of(LEVEL, 1)]);
	assert_eq!(merged.replaced_data(), &[AnyValue::of(LEVEL, 0)]);
}

proptest! {
	/// Value sets hold each distinct value once, in first-seen order.
	#[test]
	fn prop_builder_sets_are_deduplicated(levels in prop::collection::vec(0i32..8, 0..24)) {
		let result = levels
			.iter()
			.fold(DataTransactionResult::builder(), |builder, &level| {
				builder.success(AnyValue::of(LEVEL, level))
			})
			.build();

		let mut expected: Vec<i32> = Vec::new();
		for &level in &levels {
			if !expected.contains(&level) {
				expected.push(level);
			}
		}
		let actual: Vec<i32> = result
			.successful_data()
			.iter()
			.filter_map(|value| value.get(LEVEL).copied())
			.collect();
		prop_assert_eq!(actual, expected);
	}
}
