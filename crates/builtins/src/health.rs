//! Health of living holders.

use std::sync::{Arc, LazyLock};

use vessel_data::{
	Key, ManipulatorProcessor, ManipulatorSchema, Mutation, RegistryError, ValueProcessor,
};

use crate::holder::{GameObject, Living, LivingHolder};
use crate::keys::{HEALTH, MAX_HEALTH};

pub const ID: &str = "vessel:health_data";

const DEFAULT_HEALTH: f64 = 20.0;

// Max health precedes health so a combined write raises the bound first.
static SCHEMA: LazyLock<Arc<ManipulatorSchema>> = LazyLock::new(|| {
	ManipulatorSchema::builder(ID)
		.key(MAX_HEALTH, DEFAULT_HEALTH)
		.key(HEALTH, DEFAULT_HEALTH)
		.require_all()
		.build()
});

pub fn schema() -> Arc<ManipulatorSchema> {
	SCHEMA.clone()
}

pub fn processor() -> Result<ManipulatorProcessor<dyn GameObject>, RegistryError> {
	ManipulatorProcessor::builder(schema())
		.with(MaxHealthProcessor)
		.with(HealthProcessor)
		.build()
}

struct HealthProcessor;

impl ValueProcessor<dyn GameObject> for HealthProcessor {
	type Holder = LivingHolder;
	type Value = f64;

	fn key(&self) -> Key<f64> {
		HEALTH
	}

	fn get(&self, living: &(dyn Living + 'static)) -> Option<f64> {
		Some(living.health())
	}

	fn set(&self, living: &mut (dyn Living + 'static), health: f64) -> Mutation {
		if !(0.0..=living.max_health()).contains(&health) {
			return Mutation::Rejected;
		}
		Mutation::from_result(living.set_health(health).map(|()| true))
	}

	fn default_value(&self) -> f64 {
		DEFAULT_HEALTH
	}
}

struct MaxHealthProcessor;

impl ValueProcessor<dyn GameObject> for MaxHealthProcessor {
	type Holder = LivingHolder;
	type Value = f64;

	fn key(&self) -> Key<f64> {
		MAX_HEALTH
	}

	fn get(&self, living: &(dyn Living + 'static)) -> Option<f64> {
		Some(living.max_health())
	}

	fn set(&self, living: &mut (dyn Living + 'static), max_health: f64) -> Mutation {
		if max_health < 1.0 || !max_health.is_finite() {
			return Mutation::Rejected;
		}
		Mutation::from_result(living.set_max_health(max_health).map(|()| true))
	}

	fn default_value(&self) -> f64 {
		DEFAULT_HEALTH
	}
}
