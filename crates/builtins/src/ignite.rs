//! Burning state of entities.
//!
//! Both values only exist while the entity is on fire. Removing the
//! manipulator extinguishes the entity.

use std::sync::{Arc, LazyLock};

use vessel_data::{
	Key, ManipulatorProcessor, ManipulatorSchema, Mutation, RegistryError, ValueProcessor,
};

use crate::holder::{Entity, EntityHolder, GameObject};
use crate::keys::{FIRE_DAMAGE_DELAY, FIRE_TICKS};

pub const ID: &str = "vessel:ignitable_data";

pub const MINIMUM_FIRE_TICKS: i32 = 1;
const DEFAULT_FIRE_TICKS: i32 = 10;
const DEFAULT_FIRE_DAMAGE_DELAY: i32 = 20;

static SCHEMA: LazyLock<Arc<ManipulatorSchema>> = LazyLock::new(|| {
	ManipulatorSchema::builder(ID)
		.key(FIRE_TICKS, DEFAULT_FIRE_TICKS)
		.key(FIRE_DAMAGE_DELAY, DEFAULT_FIRE_DAMAGE_DELAY)
		.build()
});

pub fn schema() -> Arc<ManipulatorSchema> {
	SCHEMA.clone()
}

pub fn processor() -> Result<ManipulatorProcessor<dyn GameObject>, RegistryError> {
	ManipulatorProcessor::builder(schema())
		.with(FireTicksProcessor)
		.with(FireDamageDelayProcessor)
		.build()
}

struct FireTicksProcessor;

impl ValueProcessor<dyn GameObject> for FireTicksProcessor {
	type Holder = EntityHolder;
	type Value = i32;

	fn key(&self) -> Key<i32> {
		FIRE_TICKS
	}

	fn has_data(&self, entity: &(dyn Entity + 'static)) -> bool {
		entity.is_burning()
	}

	fn get(&self, entity: &(dyn Entity + 'static)) -> Option<i32> {
		entity.is_burning().then(|| entity.fire_ticks())
	}

	fn set(&self, entity: &mut (dyn Entity + 'static), ticks: i32) -> Mutation {
		if ticks < MINIMUM_FIRE_TICKS {
			return Mutation::Rejected;
		}
		Mutation::from_result(entity.set_fire_ticks(ticks).map(|()| true))
	}

	fn remove(&self, entity: &mut (dyn Entity + 'static)) -> Mutation {
		if entity.fire_ticks() < MINIMUM_FIRE_TICKS {
			return Mutation::Rejected;
		}
		Mutation::from_result(entity.extinguish().map(|()| true))
	}

	fn default_value(&self) -> i32 {
		DEFAULT_FIRE_TICKS
	}
}

struct FireDamageDelayProcessor;

impl ValueProcessor<dyn GameObject> for FireDamageDelayProcessor {
	type Holder = EntityHolder;
	type Value = i32;

	fn key(&self) -> Key<i32> {
		FIRE_DAMAGE_DELAY
	}

	fn has_data(&self, entity: &(dyn Entity + 'static)) -> bool {
		entity.is_burning()
	}

	fn get(&self, entity: &(dyn Entity + 'static)) -> Option<i32> {
		Some(entity.fire_damage_delay())
	}

	fn set(&self, entity: &mut (dyn Entity + 'static), delay: i32) -> Mutation {
		if delay < 0 {
			return Mutation::Rejected;
		}
		Mutation::from_result(entity.set_fire_damage_delay(delay).map(|()| true))
	}

	fn default_value(&self) -> i32 {
		DEFAULT_FIRE_DAMAGE_DELAY
	}
}
