//! Concrete holders for the integration tests.

#![allow(dead_code)]

use vessel_builtins::{Entity, GameObject, HolderError, ItemStack, Living, Player};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Fault {
	#[default]
	None,
	/// Every write fails with a holder error.
	Locked,
	/// Every write panics.
	Panics,
}

impl Fault {
	fn check(self, attribute: &'static str) -> Result<(), HolderError> {
		match self {
			Fault::None => Ok(()),
			Fault::Locked => Err(HolderError::Locked { attribute }),
			Fault::Panics => panic!("{attribute} write exploded"),
		}
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct Burn {
	pub ticks: i32,
	pub delay: i32,
}

impl Default for Burn {
	fn default() -> Self {
		Self { ticks: 0, delay: 20 }
	}
}

macro_rules! impl_entity {
	($ty:ty) => {
		impl Entity for $ty {
			fn fire_ticks(&self) -> i32 {
				self.burn.ticks
			}

			fn set_fire_ticks(&mut self, ticks: i32) -> Result<(), HolderError> {
				self.fault.check("fire_ticks")?;
				self.burn.ticks = ticks;
				Ok(())
			}

			fn fire_damage_delay(&self) -> i32 {
				self.burn.delay
			}

			fn set_fire_damage_delay(&mut self, delay: i32) -> Result<(), HolderError> {
				self.fault.check("fire_damage_delay")?;
				self.burn.delay = delay;
				Ok(())
			}
		}
	};
}

macro_rules! impl_living {
	($ty:ty) => {
		impl Living for $ty {
			fn health(&self) -> f64 {
				self.health
			}

			fn set_health(&mut self, health: f64) -> Result<(), HolderError> {
				self.fault.check("health")?;
				self.health = health;
				Ok(())
			}

			fn max_health(&self) -> f64 {
				self.max_health
			}

			fn set_max_health(&mut self, max_health: f64) -> Result<(), HolderError> {
				self.fault.check("max_health")?;
				self.max_health = max_health;
				Ok(())
			}
		}
	};
}

#[derive(Debug, Clone, PartialEq)]
pub struct Zombie {
	pub health: f64,
	pub max_health: f64,
	pub burn: Burn,
	pub fault: Fault,
}

impl Zombie {
	pub fn new(health: f64, max_health: f64) -> Self {
		Self {
			health,
			max_health,
			burn: Burn::default(),
			fault: Fault::None,
		}
	}
}

impl_entity!(Zombie);
impl_living!(Zombie);

impl GameObject for Zombie {
	fn as_entity(&self) -> Option<&(dyn Entity + 'static)> {
		Some(self)
	}

	fn as_entity_mut(&mut self) -> Option<&mut (dyn Entity + 'static)> {
		Some(self)
	}

	fn as_living(&self) -> Option<&(dyn Living + 'static)> {
		Some(self)
	}

	fn as_living_mut(&mut self) -> Option<&mut (dyn Living + 'static)> {
		Some(self)
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct Human {
	pub health: f64,
	pub max_health: f64,
	pub food_level: i32,
	pub saturation: f64,
	pub exhaustion: f64,
	pub burn: Burn,
	pub fault: Fault,
}

impl Human {
	pub fn new() -> Self {
		Self {
			health: 20.0,
			max_health: 20.0,
			food_level: 20,
			saturation: 5.0,
			exhaustion: 0.0,
			burn: Burn::default(),
			fault: Fault::None,
		}
	}

	pub fn faulty(fault: Fault) -> Self {
		Self { fault, ..Self::new() }
	}
}

impl_entity!(Human);
impl_living!(Human);

impl Player for Human {
	fn food_level(&self) -> i32 {
		self.food_level
	}

	fn set_food_level(&mut self, level: i32) -> Result<(), HolderError> {
		self.fault.check("food_level")?;
		self.food_level = level;
		Ok(())
	}

	fn saturation(&self) -> f64 {
		self.saturation
	}

	fn set_saturation(&mut self, saturation: f64) -> Result<(), HolderError> {
		self.fault.check("saturation")?;
		self.saturation = saturation;
		Ok(())
	}

	fn exhaustion(&self) -> f64 {
		self.exhaustion
	}

	fn set_exhaustion(&mut self, exhaustion: f64) -> Result<(), HolderError> {
		self.fault.check("exhaustion")?;
		self.exhaustion = exhaustion;
		Ok(())
	}
}

impl GameObject for Human {
	fn as_entity(&self) -> Option<&(dyn Entity + 'static)> {
		Some(self)
	}

	fn as_entity_mut(&mut self) -> Option<&mut (dyn Entity + 'static)> {
		Some(self)
	}

	fn as_living(&self) -> Option<&(dyn Living + 'static)> {
		Some(self)
	}

	fn as_living_mut(&mut self) -> Option<&mut (dyn Living + 'static)> {
		Some(self)
	}

	fn as_player(&self) -> Option<&(dyn Player + 'static)> {
		Some(self)
	}

	fn as_player_mut(&mut self) -> Option<&mut (dyn Player + 'static)> {
		Some(self)
	}
}

/// Entity without health.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arrow {
	pub burn: Burn,
	pub fault: Fault,
}

impl_entity!(Arrow);

impl GameObject for Arrow {
	fn as_entity(&self) -> Option<&(dyn Entity + 'static)> {
		Some(self)
	}

	fn as_entity_mut(&mut self) -> Option<&mut (dyn Entity + 'static)> {
		Some(self)
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct Item {
	pub max_damage: i32,
	pub damage: i32,
	pub unbreakable: bool,
	pub fault: Fault,
}

impl Item {
	pub fn sword(damage: i32) -> Self {
		Self {
			max_damage: 100,
			damage,
			unbreakable: false,
			fault: Fault::None,
		}
	}

	pub fn stick() -> Self {
		Self {
			max_damage: 0,
			damage: 0,
			unbreakable: false,
			fault: Fault::None,
		}
	}
}

impl ItemStack for Item {
	fn max_damage(&self) -> i32 {
		self.max_damage
	}

	fn damage(&self) -> i32 {
		self.damage
	}

	fn set_damage(&mut self, damage: i32) -> Result<(), HolderError> {
		self.fault.check("damage")?;
		self.damage = damage;
		Ok(())
	}

	fn is_unbreakable(&self) -> bool {
		self.unbreakable
	}

	fn set_unbreakable(&mut self, unbreakable: bool) -> Result<(), HolderError> {
		self.fault.check("unbreakable")?;
		self.unbreakable = unbreakable;
		Ok(())
	}
}

impl GameObject for Item {
	fn as_item(&self) -> Option<&(dyn ItemStack + 'static)> {
		Some(self)
	}

	fn as_item_mut(&mut self) -> Option<&mut (dyn ItemStack + 'static)> {
		Some(self)
	}
}

/// Holder with no capabilities at all.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Rock;

impl GameObject for Rock {}
