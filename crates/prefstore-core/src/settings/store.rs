//! Value store: current value and is-default flag per key

use std::collections::{BTreeMap, HashMap};

use crate::prelude::*;
use prefstore_types::types::{Snapshot, StoredSetting};

#[derive(Debug, Default)]
pub struct ValueStore {
	values: HashMap<String, StoredSetting>,
}

impl ValueStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn get(&self, key: &str) -> Option<&StoredSetting> {
		self.values.get(key)
	}

	/// Seed a freshly defined key with its default, or recompute the flag of
	/// an existing (possibly persisted) value against the current default
	pub fn seed(&mut self, key: &str, default: &SettingValue) {
		match self.values.get_mut(key) {
			Some(stored) => stored.is_default = &stored.value == default,
			None => {
				self.values.insert(key.to_string(), StoredSetting::from_default(default));
			}
		}
	}

	/// Replace the stored value, returning the previous one
	pub fn replace(&mut self, key: &str, stored: StoredSetting) -> Option<StoredSetting> {
		self.values.insert(key.to_string(), stored)
	}

	/// Copy persisted values verbatim
	pub fn restore(&mut self, settings: BTreeMap<String, StoredSetting>) {
		self.values.extend(settings);
	}

	pub fn clear(&mut self) {
		self.values.clear();
	}

	pub fn len(&self) -> usize {
		self.values.len()
	}

	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	pub fn to_snapshot(&self, version: &str) -> Snapshot {
		Snapshot {
			version: version.to_string(),
			settings: self.values.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
		}
	}
}


// vim: ts=4
