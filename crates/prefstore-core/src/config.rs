//! Registry configuration

use serde::{Deserialize, Serialize};

use crate::prelude::*;

/// How strictly `set_setting` checks written values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WriteValidation {
	/// Accept any value
	None,
	/// Value variant must match the declared type
	#[default]
	TypeOnly,
	/// Declared type, constraints and custom validator
	Full,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryConfig {
	/// Scopes the persisted snapshot
	pub namespace: String,
	/// Snapshots written by another version are discarded on load
	pub version: String,
	#[serde(default)]
	pub write_validation: WriteValidation,
}

impl RegistryConfig {
	pub fn new(namespace: impl Into<String>, version: impl Into<String>) -> Self {
		Self {
			namespace: namespace.into(),
			version: version.into(),
			write_validation: WriteValidation::default(),
		}
	}

	pub fn validate(&self) -> PsResult<()> {
		if self.namespace.trim().is_empty() {
			return Err(Error::ConfigError("namespace must not be empty".into()));
		}
		if self.version.trim().is_empty() {
			return Err(Error::ConfigError("version must not be empty".into()));
		}
		Ok(())
	}
}


// vim: ts=4
