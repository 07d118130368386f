//! Value and definition types shared by the registry and the storage adapters.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// SettingValue //
//**************//

/// Setting value types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)] // No type tag - variant is fixed by the SettingType of the definition
pub enum SettingValue {
	Bool(bool), // Must be before Number so `true` never becomes a number
	Number(f64),
	String(String),
	Json(serde_json::Value),
}

impl SettingValue {
	/// Check if this value has the same variant as another value
	pub fn matches_type(&self, other: &SettingValue) -> bool {
		matches!(
			(self, other),
			(SettingValue::Bool(_), SettingValue::Bool(_))
				| (SettingValue::Number(_), SettingValue::Number(_))
				| (SettingValue::String(_), SettingValue::String(_))
				| (SettingValue::Json(_), SettingValue::Json(_))
		)
	}

	/// Get the type name for error messages
	pub fn type_name(&self) -> &'static str {
		match self {
			SettingValue::Bool(_) => "boolean",
			SettingValue::Number(_) => "number",
			SettingValue::String(_) => "string",
			SettingValue::Json(_) => "json",
		}
	}

	pub fn as_bool(&self) -> Option<bool> {
		match self {
			SettingValue::Bool(b) => Some(*b),
			_ => None,
		}
	}

	pub fn as_number(&self) -> Option<f64> {
		match self {
			SettingValue::Number(n) => Some(*n),
			_ => None,
		}
	}

	pub fn as_str(&self) -> Option<&str> {
		match self {
			SettingValue::String(s) => Some(s),
			_ => None,
		}
	}

	/// Canonical form: JSON scalars become `Bool`, `Number` or `String`
	///
	/// Untagged deserialization always yields the canonical form, so a value
	/// must be normalized before it is compared or stored.
	pub fn normalized(self) -> Self {
		match self {
			SettingValue::Json(value) => SettingValue::from(value),
			other => other,
		}
	}

	/// Any value as JSON
	///
	/// Whole numbers within the exactly representable range come out as JSON
	/// integers, non-finite numbers as `null`.
	#[allow(clippy::cast_possible_truncation)]
	pub fn to_json(&self) -> serde_json::Value {
		const MAX_EXACT: f64 = 9_007_199_254_740_992.0; // 2^53
		match self {
			SettingValue::Bool(b) => serde_json::Value::Bool(*b),
			SettingValue::Number(n) if n.fract() == 0.0 && n.abs() <= MAX_EXACT => {
				serde_json::Value::from(*n as i64)
			}
			SettingValue::Number(n) => serde_json::Number::from_f64(*n)
				.map_or(serde_json::Value::Null, serde_json::Value::Number),
			SettingValue::String(s) => serde_json::Value::String(s.clone()),
			SettingValue::Json(j) => j.clone(),
		}
	}
}

impl fmt::Display for SettingValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			SettingValue::Bool(b) => write!(f, "{}", b),
			SettingValue::Number(n) => write!(f, "{}", n),
			SettingValue::String(s) => write!(f, "'{}'", s),
			SettingValue::Json(j) => write!(f, "{}", j),
		}
	}
}

impl From<bool> for SettingValue {
	fn from(value: bool) -> Self {
		SettingValue::Bool(value)
	}
}

impl From<f64> for SettingValue {
	fn from(value: f64) -> Self {
		SettingValue::Number(value)
	}
}

impl From<i32> for SettingValue {
	fn from(value: i32) -> Self {
		SettingValue::Number(f64::from(value))
	}
}

impl From<&str> for SettingValue {
	fn from(value: &str) -> Self {
		SettingValue::String(value.to_string())
	}
}

impl From<String> for SettingValue {
	fn from(value: String) -> Self {
		SettingValue::String(value)
	}
}

impl From<serde_json::Value> for SettingValue {
	fn from(value: serde_json::Value) -> Self {
		match value {
			serde_json::Value::Bool(b) => SettingValue::Bool(b),
			serde_json::Value::Number(n) => match n.as_f64() {
				Some(f) => SettingValue::Number(f),
				None => SettingValue::Json(serde_json::Value::Number(n)),
			},
			serde_json::Value::String(s) => SettingValue::String(s),
			other => SettingValue::Json(other),
		}
	}
}

// SettingType //
//*************//

/// Declared type of a setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingType {
	Dropdown,
	Radio,
	Checkbox,
	Number,
	Text,
	Color,
	Slider,
	Custom,
}

impl SettingType {
	pub fn as_str(&self) -> &'static str {
		match self {
			SettingType::Dropdown => "dropdown",
			SettingType::Radio => "radio",
			SettingType::Checkbox => "checkbox",
			SettingType::Number => "number",
			SettingType::Text => "text",
			SettingType::Color => "color",
			SettingType::Slider => "slider",
			SettingType::Custom => "custom",
		}
	}

	/// Dropdown and radio settings pick their value from a list of choices
	pub fn has_choices(&self) -> bool {
		matches!(self, SettingType::Dropdown | SettingType::Radio)
	}
}

impl fmt::Display for SettingType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.pad(self.as_str())
	}
}

// Options //
//*********//

/// One entry of a dropdown or radio list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
	pub value: SettingValue,
	#[serde(default)]
	pub label: String,
}

impl Choice {
	pub fn new(value: impl Into<SettingValue>, label: impl Into<String>) -> Self {
		Self { value: value.into(), label: label.into() }
	}
}

/// Color notation hint for color settings (advisory, not enforced)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorFormat {
	Hex,
	Rgb,
	Rgba,
	Hsl,
}

/// Type-specific constraint bag
///
/// Which fields are required depends on the [`SettingType`]; unrelated
/// fields are ignored by validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SettingOptions {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub choices: Option<Vec<Choice>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub min: Option<f64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub max: Option<f64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub step: Option<f64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub max_length: Option<usize>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub format: Option<ColorFormat>,
}

// Persisted state //
//*****************//

/// Current value of a setting together with its drift-from-default flag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSetting {
	pub value: SettingValue,
	#[serde(rename = "isDefault")]
	pub is_default: bool,
}

impl StoredSetting {
	pub fn new(value: SettingValue, default: &SettingValue) -> Self {
		let value = value.normalized();
		let is_default = &value == default;
		Self { value, is_default }
	}

	pub fn from_default(default: &SettingValue) -> Self {
		Self { value: default.clone(), is_default: true }
	}
}

/// Serialized form of a registry written to durable storage under its namespace
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
	pub version: String,
	#[serde(default)]
	pub settings: BTreeMap<String, StoredSetting>,
}


// vim: ts=4
