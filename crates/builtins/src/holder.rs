//! The game-object holder family.
//!
//! Every holder the builtin processors serve implements [`GameObject`] and
//! opts into capabilities by overriding the matching accessors. The capability
//! traits expose raw primitives only; validation lives in the processors.

use thiserror::Error;
use vessel_data::HolderType;

/// Failure reported by a holder's raw primitive.
#[derive(Debug, Error)]
pub enum HolderError {
	#[error("holder has been removed")]
	Removed,
	#[error("{attribute} is locked")]
	Locked { attribute: &'static str },
}

/// Object type of the holder family. Accessors default to "not supported".
pub trait GameObject {
	fn as_entity(&self) -> Option<&(dyn Entity + 'static)> {
		None
	}

	fn as_entity_mut(&mut self) -> Option<&mut (dyn Entity + 'static)> {
		None
	}

	fn as_living(&self) -> Option<&(dyn Living + 'static)> {
		None
	}

	fn as_living_mut(&mut self) -> Option<&mut (dyn Living + 'static)> {
		None
	}

	fn as_player(&self) -> Option<&(dyn Player + 'static)> {
		None
	}

	fn as_player_mut(&mut self) -> Option<&mut (dyn Player + 'static)> {
		None
	}

	fn as_item(&self) -> Option<&(dyn ItemStack + 'static)> {
		None
	}

	fn as_item_mut(&mut self) -> Option<&mut (dyn ItemStack + 'static)> {
		None
	}
}

pub trait Entity {
	/// Remaining burn time; zero or less means not burning.
	fn fire_ticks(&self) -> i32;
	fn set_fire_ticks(&mut self, ticks: i32) -> Result<(), HolderError>;
	/// Ticks between fire damage applications.
	fn fire_damage_delay(&self) -> i32;
	fn set_fire_damage_delay(&mut self, delay: i32) -> Result<(), HolderError>;

	fn is_burning(&self) -> bool {
		self.fire_ticks() > 0
	}

	fn extinguish(&mut self) -> Result<(), HolderError> {
		self.set_fire_ticks(0)
	}
}

pub trait Living: Entity {
	fn health(&self) -> f64;
	fn set_health(&mut self, health: f64) -> Result<(), HolderError>;
	fn max_health(&self) -> f64;
	fn set_max_health(&mut self, max_health: f64) -> Result<(), HolderError>;
}

pub trait Player: Living {
	fn food_level(&self) -> i32;
	fn set_food_level(&mut self, level: i32) -> Result<(), HolderError>;
	fn saturation(&self) -> f64;
	fn set_saturation(&mut self, saturation: f64) -> Result<(), HolderError>;
	fn exhaustion(&self) -> f64;
	fn set_exhaustion(&mut self, exhaustion: f64) -> Result<(), HolderError>;
}

pub trait ItemStack {
	/// Damage at which the item breaks. Zero for items that never take damage.
	fn max_damage(&self) -> i32;
	fn damage(&self) -> i32;
	fn set_damage(&mut self, damage: i32) -> Result<(), HolderError>;
	fn is_unbreakable(&self) -> bool;
	fn set_unbreakable(&mut self, unbreakable: bool) -> Result<(), HolderError>;

	fn is_damageable(&self) -> bool {
		self.max_damage() > 0
	}
}

macro_rules! holder_type {
	($token:ident, $target:ident, $name:literal, $narrow:ident, $narrow_mut:ident) => {
		#[doc = concat!("Narrows a [`GameObject`] to [`", stringify!($target), "`].")]
		pub struct $token;

		impl HolderType<dyn GameObject> for $token {
			type Target = dyn $target;
			const NAME: &'static str = $name;

			fn narrow<'a>(holder: &'a (dyn GameObject + 'static)) -> Option<&'a (dyn $target + 'static)> {
				holder.$narrow()
			}

			fn narrow_mut<'a>(
				holder: &'a mut (dyn GameObject + 'static),
			) -> Option<&'a mut (dyn $target + 'static)> {
				holder.$narrow_mut()
			}
		}
	};
}

holder_type!(EntityHolder, Entity, "entity", as_entity, as_entity_mut);
holder_type!(LivingHolder, Living, "living", as_living, as_living_mut);
holder_type!(PlayerHolder, Player, "player", as_player, as_player_mut);
holder_type!(ItemHolder, ItemStack, "item_stack", as_item, as_item_mut);
