use std::sync::Arc;

use pretty_assertions::assert_eq;

use super::*;
use crate::key::KeyDef;
use crate::manipulator::ManipulatorSchema;

const LEVEL: Key<i32> = Key::new(KeyDef::new("test:level", "Level", "level"));
const LIMIT: Key<i32> = Key::new(KeyDef::new("test:limit", "Limit", "limit"));

fn schema() -> Arc<ManipulatorSchema> {
	ManipulatorSchema::builder("test:meter")
		.key(LEVEL, 0)
		.key(LIMIT, 0)
		.build()
}

fn meter(schema: &Arc<ManipulatorSchema>, level: Option<i32>, limit: Option<i32>) -> Manipulator {
	let mut manipulator = Manipulator::empty(schema.clone());
	if let Some(level) = level {
		manipulator.set(LEVEL, level).unwrap();
	}
	if let Some(limit) = limit {
		manipulator.set(LIMIT, limit).unwrap();
	}
	manipulator
}

#[test]
fn take_new_ignores_old() {
	let schema = schema();
	let old = meter(&schema, Some(10), Some(20));
	let proposed = meter(&schema, Some(15), None);
	assert_eq!(TakeNew.merge(Some(&old), &proposed), proposed);
}

#[test]
fn keep_old_prefers_current_state() {
	let schema = schema();
	let old = meter(&schema, Some(10), None);
	let proposed = meter(&schema, Some(15), Some(30));
	let merged = KeepOld.merge(Some(&old), &proposed);
	assert_eq!(merged, meter(&schema, Some(10), Some(30)));
	assert_eq!(KeepOld.merge(None, &proposed), proposed);
}

#[test]
fn per_key_merge_reconciles_listed_keys() {
	let schema = schema();
	let old = meter(&schema, Some(10), Some(20));
	let proposed = meter(&schema, Some(4), Some(5));
	let merge = PerKeyMerge::new().with(LEVEL, |old: &i32, new: &i32| old + new);
	assert_eq!(
		merge.merge(Some(&old), &proposed),
		meter(&schema, Some(14), Some(5))
	);
	assert_eq!(merge.merge(None, &proposed), proposed);
}

#[test]
fn closures_are_merge_functions() {
	let schema = schema();
	let proposed = meter(&schema, Some(1), None);
	let merge = |old: Option<&Manipulator>, _: &Manipulator| old.cloned().unwrap_or_else(|| schema.create());
	assert_eq!(merge.merge(None, &proposed), schema.create());
}
