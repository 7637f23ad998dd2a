use tracing::info;
use vessel_data::{DataConfig, DataRegistry, RegistryError};

use crate::holder::GameObject;
use crate::{durability, food, health, ignite};

/// Registry with every builtin manipulator processor and the default config.
pub fn builtin_registry() -> Result<DataRegistry<dyn GameObject>, RegistryError> {
	builtin_registry_with(DataConfig::default())
}

pub fn builtin_registry_with(config: DataConfig) -> Result<DataRegistry<dyn GameObject>, RegistryError> {
	let mut builder = DataRegistry::builder("builtin").with_config(config);
	builder.try_register(health::processor()?)?;
	builder.try_register(food::processor()?)?;
	builder.try_register(ignite::processor()?)?;
	builder.try_register(durability::processor()?)?;
	let registry = builder.build();
	info!(
		manipulators = registry.manipulators().count(),
		processors = registry.len(),
		"builtin data registry ready"
	);
	Ok(registry)
}
