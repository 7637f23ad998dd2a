//! Hunger state of players.

use std::ops::RangeInclusive;
use std::sync::{Arc, LazyLock};

use vessel_data::{
	Key, ManipulatorProcessor, ManipulatorSchema, Mutation, RegistryError, ValueProcessor,
};

use crate::holder::{GameObject, Player, PlayerHolder};
use crate::keys::{EXHAUSTION, FOOD_LEVEL, SATURATION};

pub const ID: &str = "vessel:food_data";

pub const FOOD_LEVEL_RANGE: RangeInclusive<i32> = 0..=20;
pub const SATURATION_RANGE: RangeInclusive<f64> = 0.0..=5.0;
pub const EXHAUSTION_RANGE: RangeInclusive<f64> = 0.0..=4.0;

const DEFAULT_FOOD_LEVEL: i32 = 20;
const DEFAULT_SATURATION: f64 = 5.0;
const DEFAULT_EXHAUSTION: f64 = 0.0;

static SCHEMA: LazyLock<Arc<ManipulatorSchema>> = LazyLock::new(|| {
	ManipulatorSchema::builder(ID)
		.key(FOOD_LEVEL, DEFAULT_FOOD_LEVEL)
		.key(SATURATION, DEFAULT_SATURATION)
		.key(EXHAUSTION, DEFAULT_EXHAUSTION)
		.build()
});

pub fn schema() -> Arc<ManipulatorSchema> {
	SCHEMA.clone()
}

pub fn processor() -> Result<ManipulatorProcessor<dyn GameObject>, RegistryError> {
	ManipulatorProcessor::builder(schema())
		.with(FoodLevelProcessor)
		.with(SaturationProcessor)
		.with(ExhaustionProcessor)
		.build()
}

struct FoodLevelProcessor;

impl ValueProcessor<dyn GameObject> for FoodLevelProcessor {
	type Holder = PlayerHolder;
	type Value = i32;

	fn key(&self) -> Key<i32> {
		FOOD_LEVEL
	}

	fn get(&self, player: &(dyn Player + 'static)) -> Option<i32> {
		Some(player.food_level())
	}

	fn set(&self, player: &mut (dyn Player + 'static), level: i32) -> Mutation {
		if !FOOD_LEVEL_RANGE.contains(&level) {
			return Mutation::Rejected;
		}
		Mutation::from_result(player.set_food_level(level).map(|()| true))
	}

	fn default_value(&self) -> i32 {
		DEFAULT_FOOD_LEVEL
	}
}

struct SaturationProcessor;

impl ValueProcessor<dyn GameObject> for SaturationProcessor {
	type Holder = PlayerHolder;
	type Value = f64;

	fn key(&self) -> Key<f64> {
		SATURATION
	}

	fn get(&self, player: &(dyn Player + 'static)) -> Option<f64> {
		Some(player.saturation())
	}

	fn set(&self, player: &mut (dyn Player + 'static), saturation: f64) -> Mutation {
		if !SATURATION_RANGE.contains(&saturation) {
			return Mutation::Rejected;
		}
		Mutation::from_result(player.set_saturation(saturation).map(|()| true))
	}

	fn default_value(&self) -> f64 {
		DEFAULT_SATURATION
	}
}

struct ExhaustionProcessor;

impl ValueProcessor<dyn GameObject> for ExhaustionProcessor {
	type Holder = PlayerHolder;
	type Value = f64;

	fn key(&self) -> Key<f64> {
		EXHAUSTION
	}

	fn get(&self, player: &(dyn Player + 'static)) -> Option<f64> {
		Some(player.exhaustion())
	}

	fn set(&self, player: &mut (dyn Player + 'static), exhaustion: f64) -> Mutation {
		if !EXHAUSTION_RANGE.contains(&exhaustion) {
			return Mutation::Rejected;
		}
		Mutation::from_result(player.set_exhaustion(exhaustion).map(|()| true))
	}

	fn default_value(&self) -> f64 {
		DEFAULT_EXHAUSTION
	}
}
