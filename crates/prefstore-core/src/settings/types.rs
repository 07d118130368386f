//! Setting definitions
//!
//! A definition declares the type, default value and constraints of one
//! setting. Definitions are immutable once registered; registering the same
//! key again replaces the whole definition.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::sync::Arc;

use crate::prelude::*;
use prefstore_types::types::{Choice, ColorFormat, SettingOptions, SettingType};

/// Type alias for a custom setting predicate
pub type SettingValidator = Arc<dyn Fn(&SettingValue) -> bool + Send + Sync>;

/// Setting definition - declared metadata for each setting
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingDefinition {
	/// Unique key (e.g., "refreshInterval")
	pub key: String,

	/// Declared type, fixes the value variant
	#[serde(rename = "type")]
	pub setting_type: SettingType,

	/// Value used when nothing else is stored
	#[serde(rename = "defaultValue")]
	pub default: SettingValue,

	/// Type-specific constraints
	#[serde(default)]
	pub options: SettingOptions,

	/// Human-readable description
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,

	/// Optional predicate run in addition to the built-in checks
	#[serde(skip)]
	pub validator: Option<SettingValidator>,

	/// Presentation hints for the UI layer, opaque to the registry
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub ui: Option<serde_json::Value>,
}

impl Debug for SettingDefinition {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("SettingDefinition")
			.field("key", &self.key)
			.field("setting_type", &self.setting_type)
			.field("default", &self.default)
			.field("options", &self.options)
			.field("description", &self.description)
			.field("validator", &self.validator.is_some())
			.field("ui", &self.ui)
			.finish()
	}
}

impl SettingDefinition {
	/// Create a builder for constructing a SettingDefinition
	pub fn builder(key: impl Into<String>, setting_type: SettingType) -> SettingDefinitionBuilder {
		SettingDefinitionBuilder::new(key, setting_type)
	}

	/// Same definition with its default and choices in canonical form
	pub fn normalized(mut self) -> Self {
		self.default = self.default.normalized();
		if let Some(choices) = self.options.choices.as_mut() {
			for choice in choices {
				choice.value = choice.value.clone().normalized();
			}
		}
		self
	}

	/// Parse a JSON array of definitions (validators cannot be expressed in JSON)
	pub fn from_manifest(manifest: &str) -> PsResult<Vec<SettingDefinition>> {
		Ok(serde_json::from_str(manifest)?)
	}
}

/// Builder for SettingDefinition with fluent API
pub struct SettingDefinitionBuilder {
	key: String,
	setting_type: SettingType,
	default: Option<SettingValue>,
	options: SettingOptions,
	description: Option<String>,
	validator: Option<SettingValidator>,
	ui: Option<serde_json::Value>,
}

impl SettingDefinitionBuilder {
	pub fn new(key: impl Into<String>, setting_type: SettingType) -> Self {
		Self {
			key: key.into(),
			setting_type,
			default: None,
			options: SettingOptions::default(),
			description: None,
			validator: None,
			ui: None,
		}
	}

	/// Set the default value (required)
	pub fn default(mut self, value: impl Into<SettingValue>) -> Self {
		self.default = Some(value.into());
		self
	}

	pub fn description(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());
		self
	}

	/// Replace the whole option bag
	pub fn options(mut self, options: SettingOptions) -> Self {
		self.options = options;
		self
	}

	/// Append one dropdown/radio choice
	pub fn choice(mut self, value: impl Into<SettingValue>, label: impl Into<String>) -> Self {
		self.options.choices.get_or_insert_with(Vec::new).push(Choice::new(value, label));
		self
	}

	pub fn choices(mut self, choices: impl IntoIterator<Item = Choice>) -> Self {
		self.options.choices.get_or_insert_with(Vec::new).extend(choices);
		self
	}

	pub fn min(mut self, min: f64) -> Self {
		self.options.min = Some(min);
		self
	}

	pub fn max(mut self, max: f64) -> Self {
		self.options.max = Some(max);
		self
	}

	pub fn step(mut self, step: f64) -> Self {
		self.options.step = Some(step);
		self
	}

	pub fn max_length(mut self, max_length: usize) -> Self {
		self.options.max_length = Some(max_length);
		self
	}

	pub fn format(mut self, format: ColorFormat) -> Self {
		self.options.format = Some(format);
		self
	}

	/// Set a custom predicate; returning `false` rejects the value
	pub fn validator<F>(mut self, f: F) -> Self
	where
		F: Fn(&SettingValue) -> bool + Send + Sync + 'static,
	{
		self.validator = Some(Arc::new(f));
		self
	}

	/// Attach opaque presentation hints
	pub fn ui(mut self, ui: serde_json::Value) -> Self {
		self.ui = Some(ui);
		self
	}

	/// Build the SettingDefinition
	///
	/// Only structural completeness is checked here; type/constraint
	/// consistency is checked when the definition is registered.
	pub fn build(self) -> PsResult<SettingDefinition> {
		let default =
			self.default.ok_or_else(|| Error::definition(&self.key, "default value is required"))?;

		Ok(SettingDefinition {
			key: self.key,
			setting_type: self.setting_type,
			default,
			options: self.options,
			description: self.description,
			validator: self.validator,
			ui: self.ui,
		})
	}
}


// vim: ts=4
