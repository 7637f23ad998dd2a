//! Runtime policy shared by every processor of a registry.

use serde::Deserialize;

/// How `set` classifies a write where some keys were rejected and others applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartialRejection {
	/// Report success; callers inspect the rejected set.
	#[default]
	SuccessWithRejects,
	/// Any rejected key fails the whole result. Applied values stay applied.
	Failure,
}

/// Registry-wide data configuration.
///
/// Deserializable so embedders can load it from their own config file:
///
/// ```rust
/// # use vessel_data::{DataConfig, PartialRejection};
/// let config = DataConfig::from_json(r#"{ "partial_rejection": "failure" }"#).unwrap();
/// assert_eq!(config.partial_rejection, PartialRejection::Failure);
/// assert!(config.contain_panics);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DataConfig {
	/// Convert panics raised by holders during `set`/`remove` into errored results.
	pub contain_panics: bool,
	pub partial_rejection: PartialRejection,
}

impl Default for DataConfig {
	fn default() -> Self {
		Self {
			contain_panics: true,
			partial_rejection: PartialRejection::default(),
		}
	}
}

impl DataConfig {
	pub fn from_json(text: &str) -> serde_json::Result<Self> {
		serde_json::from_str(text)
	}
}
