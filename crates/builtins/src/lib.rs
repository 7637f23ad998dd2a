//! Builtin data for game objects.
//!
//! Defines the [`GameObject`] holder family with its capability traits and
//! tokens, the builtin key catalog, and four manipulators over it:
//!
//! - [`health`]: health and max health of [`Living`] holders
//! - [`food`]: food level, saturation and exhaustion of [`Player`]s
//! - [`ignite`]: fire ticks and fire damage delay of burning [`Entity`]s
//! - [`durability`]: durability and unbreakability of damageable [`ItemStack`]s
//!
//! [`builtin_registry`] wires all of them into one registry.

pub mod durability;
pub mod food;
pub mod health;
mod holder;
pub mod ignite;
pub mod keys;
mod registry;

pub use holder::{
	Entity, EntityHolder, GameObject, HolderError, ItemHolder, ItemStack, Living, LivingHolder,
	Player, PlayerHolder,
};
pub use registry::{builtin_registry, builtin_registry_with};
