//! Definition registry
//!
//! Maps setting keys to their definitions and remembers registration order,
//! which is the iteration order for listing and bulk resets.

use std::collections::HashMap;

use crate::prelude::*;

use super::types::SettingDefinition;
use super::validation;

#[derive(Debug, Default)]
pub struct DefinitionRegistry {
	definitions: HashMap<String, SettingDefinition>,
	order: Vec<String>,
}

impl DefinitionRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Validate and register a definition
	///
	/// Registering an existing key replaces its definition entirely (last
	/// writer wins) and keeps the key's original position. Returns the
	/// replaced definition, if any.
	pub fn register(&mut self, def: SettingDefinition) -> PsResult<Option<SettingDefinition>> {
		validation::validate_definition(&def)?;

		let key = def.key.clone();
		let previous = self.definitions.insert(key.clone(), def);
		if previous.is_some() {
			debug!("Replacing definition of setting: {}", key);
		} else {
			debug!("Registering setting: {}", key);
			self.order.push(key);
		}
		Ok(previous)
	}

	pub fn get(&self, key: &str) -> Option<&SettingDefinition> {
		self.definitions.get(key)
	}

	pub fn contains(&self, key: &str) -> bool {
		self.definitions.contains_key(key)
	}

	/// Keys in registration order
	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.order.iter().map(String::as_str)
	}

	/// Definitions in registration order
	pub fn iter(&self) -> impl Iterator<Item = &SettingDefinition> {
		self.order.iter().filter_map(|key| self.definitions.get(key))
	}

	pub fn len(&self) -> usize {
		self.definitions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.definitions.is_empty()
	}
}


// vim: ts=4
