//! Validation rules for setting definitions and written values
//!
//! Definition checks run once, when a setting is registered. Write checks
//! depend on the configured [`WriteValidation`] policy.

use crate::config::WriteValidation;
use crate::prelude::*;
use prefstore_types::types::{SettingOptions, SettingType};

use super::types::SettingDefinition;

/// Check a definition's default value and options for internal consistency
pub fn validate_definition(def: &SettingDefinition) -> PsResult<()> {
	if def.key.is_empty() {
		return Err(Error::definition(&def.key, "key must not be empty"));
	}

	check_options(def.setting_type, &def.options)
		.map_err(|reason| Error::definition(&def.key, reason))?;

	if let Err(reason) = check_value(def.setting_type, &def.options, &def.default) {
		return Err(Error::definition(&def.key, format!("default value {}", reason)));
	}

	if let Some(validator) = &def.validator {
		if !validator(&def.default) {
			return Err(Error::definition(&def.key, "custom validator rejected the default value"));
		}
	}

	Ok(())
}

/// Check a value about to be written against its definition
pub fn validate_write(
	def: &SettingDefinition,
	value: &SettingValue,
	policy: WriteValidation,
) -> PsResult<()> {
	match policy {
		WriteValidation::None => Ok(()),
		WriteValidation::TypeOnly => check_variant(def, value),
		WriteValidation::Full => {
			check_variant(def, value)?;
			check_value(def.setting_type, &def.options, value)
				.map_err(|reason| Error::validation(&def.key, format!("value {}", reason)))?;
			if let Some(validator) = &def.validator {
				if !validator(value) {
					return Err(Error::validation(&def.key, "custom validator rejected the value"));
				}
			}
			Ok(())
		}
	}
}

/// Check that the value has the variant fixed by the declared type
///
/// Non-finite numbers are refused for every type: they cannot be written to
/// a snapshot and would come back as `null`.
fn check_variant(def: &SettingDefinition, value: &SettingValue) -> PsResult<()> {
	if value.as_number().is_some_and(|n| !n.is_finite()) {
		return Err(Error::validation(&def.key, format!("{} is not a finite number", value)));
	}

	let expected = match def.setting_type {
		SettingType::Custom => return Ok(()),
		SettingType::Checkbox => "boolean",
		SettingType::Number | SettingType::Slider => "number",
		SettingType::Text | SettingType::Color => "string",
		// Choices share the variant of the default, which is one of them
		SettingType::Dropdown | SettingType::Radio if value.matches_type(&def.default) => {
			return Ok(());
		}
		SettingType::Dropdown | SettingType::Radio => def.default.type_name(),
	};

	if value.type_name() == expected {
		Ok(())
	} else {
		Err(Error::TypeMismatch { key: def.key.clone(), expected, got: value.type_name() })
	}
}

/// Structural checks on the option bag
fn check_options(setting_type: SettingType, options: &SettingOptions) -> Result<(), String> {
	if setting_type.has_choices() && options.choices.as_ref().is_none_or(Vec::is_empty) {
		return Err(format!("{} setting requires a non-empty choices list", setting_type));
	}
	if setting_type == SettingType::Slider && (options.min.is_none() || options.max.is_none()) {
		return Err("slider setting requires both min and max".into());
	}

	if matches!(setting_type, SettingType::Number | SettingType::Slider) {
		if let (Some(min), Some(max)) = (options.min, options.max) {
			if min > max {
				return Err(format!("min {} is greater than max {}", min, max));
			}
		}
		if let Some(step) = options.step {
			if step.is_nan() || step <= 0.0 {
				return Err(format!("step must be positive, got {}", step));
			}
		}
	}

	Ok(())
}

/// Type and constraint checks shared by definitions and full write validation
fn check_value(
	setting_type: SettingType,
	options: &SettingOptions,
	value: &SettingValue,
) -> Result<(), String> {
	match setting_type {
		SettingType::Dropdown | SettingType::Radio => {
			let choices = options.choices.as_deref().unwrap_or_default();
			if !choices.iter().any(|choice| &choice.value == value) {
				return Err(format!("{} is not one of the choices", value));
			}
		}
		SettingType::Number | SettingType::Slider => {
			let n = value
				.as_number()
				.ok_or_else(|| format!("must be a number, got {}", value.type_name()))?;
			if !n.is_finite() {
				return Err("must be a finite number".into());
			}
			check_bounds(n, options.min, options.max)?;
		}
		SettingType::Color => {
			if value.as_str().is_none() {
				return Err(format!("must be a string, got {}", value.type_name()));
			}
		}
		SettingType::Text => {
			let s = value
				.as_str()
				.ok_or_else(|| format!("must be a string, got {}", value.type_name()))?;
			if let Some(max_length) = options.max_length {
				let len = s.chars().count();
				if len > max_length {
					return Err(format!("is {} characters long, max is {}", len, max_length));
				}
			}
		}
		SettingType::Checkbox => {
			if value.as_bool().is_none() {
				return Err(format!("must be a boolean, got {}", value.type_name()));
			}
		}
		SettingType::Custom => {}
	}

	Ok(())
}

fn check_bounds(n: f64, min: Option<f64>, max: Option<f64>) -> Result<(), String> {
	if let Some(min) = min {
		if n < min {
			return Err(format!("{} is below min {}", n, min));
		}
	}
	if let Some(max) = max {
		if n > max {
			return Err(format!("{} is above max {}", n, max));
		}
	}
	Ok(())
}


// vim: ts=4
