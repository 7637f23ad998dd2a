//! Durability of damageable items.
//!
//! Durability is the damage an item can still take (`max_damage - damage`).
//! Items that never take damage do not support this manipulator.

use std::sync::{Arc, LazyLock};

use vessel_data::{
	Key, ManipulatorProcessor, ManipulatorSchema, Mutation, RegistryError, ValueProcessor,
};

use crate::holder::{GameObject, HolderError, ItemHolder, ItemStack};
use crate::keys::{ITEM_DURABILITY, UNBREAKABLE};

pub const ID: &str = "vessel:durability_data";

const DEFAULT_DURABILITY: i32 = 60;

static SCHEMA: LazyLock<Arc<ManipulatorSchema>> = LazyLock::new(|| {
	ManipulatorSchema::builder(ID)
		.key(ITEM_DURABILITY, DEFAULT_DURABILITY)
		.key(UNBREAKABLE, false)
		.require_all()
		.build()
});

pub fn schema() -> Arc<ManipulatorSchema> {
	SCHEMA.clone()
}

pub fn processor() -> Result<ManipulatorProcessor<dyn GameObject>, RegistryError> {
	ManipulatorProcessor::builder(schema())
		.with(DurabilityProcessor)
		.with(UnbreakableProcessor)
		.build()
}

struct DurabilityProcessor;

impl ValueProcessor<dyn GameObject> for DurabilityProcessor {
	type Holder = ItemHolder;
	type Value = i32;

	fn key(&self) -> Key<i32> {
		ITEM_DURABILITY
	}

	fn supports(&self, item: &(dyn ItemStack + 'static)) -> bool {
		item.is_damageable()
	}

	fn get(&self, item: &(dyn ItemStack + 'static)) -> Option<i32> {
		item.is_damageable()
			.then(|| item.max_damage() - item.damage())
	}

	fn set(&self, item: &mut (dyn ItemStack + 'static), durability: i32) -> Mutation {
		let max_damage = item.max_damage();
		if !(0..=max_damage).contains(&durability) {
			return Mutation::Rejected;
		}
		Mutation::from_result(item.set_damage(max_damage - durability).map(|()| true))
	}

	fn default_value(&self) -> i32 {
		DEFAULT_DURABILITY
	}
}

struct UnbreakableProcessor;

impl ValueProcessor<dyn GameObject> for UnbreakableProcessor {
	type Holder = ItemHolder;
	type Value = bool;

	fn key(&self) -> Key<bool> {
		UNBREAKABLE
	}

	fn supports(&self, item: &(dyn ItemStack + 'static)) -> bool {
		item.is_damageable()
	}

	fn get(&self, item: &(dyn ItemStack + 'static)) -> Option<bool> {
		Some(item.is_unbreakable())
	}

	fn set(&self, item: &mut (dyn ItemStack + 'static), unbreakable: bool) -> Mutation {
		Mutation::from_result(set_unbreakable(item, unbreakable).map(|()| true))
	}

	fn default_value(&self) -> bool {
		false
	}
}

/// Making an item unbreakable also repairs it.
fn set_unbreakable(
	item: &mut (dyn ItemStack + 'static),
	unbreakable: bool,
) -> Result<(), HolderError> {
	if unbreakable {
		item.set_damage(0)?;
	}
	item.set_unbreakable(unbreakable)
}
