//! Builtin key catalog.

use vessel_data::{Key, KeyDef};

pub const HEALTH: Key<f64> = Key::new(KeyDef::new("vessel:health", "Health", "health"));
pub const MAX_HEALTH: Key<f64> =
	Key::new(KeyDef::new("vessel:max_health", "Max Health", "max_health"));

pub const FOOD_LEVEL: Key<i32> =
	Key::new(KeyDef::new("vessel:food_level", "Food Level", "food.level"));
pub const SATURATION: Key<f64> =
	Key::new(KeyDef::new("vessel:saturation", "Saturation", "food.saturation"));
pub const EXHAUSTION: Key<f64> =
	Key::new(KeyDef::new("vessel:exhaustion", "Exhaustion", "food.exhaustion"));

pub const FIRE_TICKS: Key<i32> =
	Key::new(KeyDef::new("vessel:fire_ticks", "Fire Ticks", "fire.ticks"));
pub const FIRE_DAMAGE_DELAY: Key<i32> = Key::new(KeyDef::new(
	"vessel:fire_damage_delay",
	"Fire Damage Delay",
	"fire.damage_delay",
));

pub const ITEM_DURABILITY: Key<i32> =
	Key::new(KeyDef::new("vessel:item_durability", "Durability", "durability"));
pub const UNBREAKABLE: Key<bool> =
	Key::new(KeyDef::new("vessel:unbreakable", "Unbreakable", "unbreakable"));
