//! Settings registry - main interface for defining, reading and changing settings

use parking_lot::{Mutex, RwLock};
use std::fmt;
use std::sync::Arc;

use crate::config::{RegistryConfig, WriteValidation};
use crate::memory_storage::MemoryStorage;
use crate::prelude::*;
use prefstore_types::storage_adapter::StorageAdapter;
use prefstore_types::types::{Snapshot, StoredSetting};

use super::notify::{self, ChangeBus, Dispatch, SettingObserver};
use super::persist::{LoadOutcome, Persistence};
use super::registry::DefinitionRegistry;
use super::store::ValueStore;
use super::types::SettingDefinition;
use super::validation;

#[derive(Debug, Default)]
struct State {
	definitions: DefinitionRegistry,
	values: ValueStore,
}

/// Typed settings registry for one namespace
///
/// Owns the definitions, current values and observers of its namespace.
/// Share it as `Arc<SettingsRegistry>`; every operation takes `&self`.
pub struct SettingsRegistry {
	config: RegistryConfig,
	state: RwLock<State>,
	observers: RwLock<ChangeBus>,
	persistence: Persistence,
	// Serializes apply + save so persisted order equals applied order
	write_lock: Mutex<()>,
}

impl fmt::Debug for SettingsRegistry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SettingsRegistry")
			.field("config", &self.config)
			.field("settings", &self.state.read().definitions.len())
			.finish_non_exhaustive()
	}
}

impl SettingsRegistry {
	pub fn builder(
		namespace: impl Into<String>,
		version: impl Into<String>,
	) -> SettingsRegistryBuilder {
		SettingsRegistryBuilder::new(RegistryConfig::new(namespace, version))
	}

	/// Construct a registry and load its persisted snapshot
	pub fn new(config: RegistryConfig, storage: Arc<dyn StorageAdapter>) -> PsResult<Self> {
		config.validate()?;

		let persistence =
			Persistence::new(storage, config.namespace.clone(), config.version.clone());
		let registry = Self {
			config,
			state: RwLock::new(State::default()),
			observers: RwLock::new(ChangeBus::new()),
			persistence,
			write_lock: Mutex::new(()),
		};
		registry.load_settings();

		info!(
			namespace = %registry.config.namespace,
			version = %registry.config.version,
			"Settings registry initialized"
		);
		Ok(registry)
	}

	fn load_settings(&self) {
		let mut state = self.state.write();
		match self.persistence.load() {
			LoadOutcome::Restored(settings) => state.values.restore(settings),
			LoadOutcome::Discarded { .. } | LoadOutcome::Failed => reset_values(&mut state),
			LoadOutcome::Missing => {}
		}
	}

	// Definitions
	//*************

	/// Validate and register a setting
	///
	/// Re-registering a key replaces its definition (last writer wins) but
	/// keeps its current value, whose is-default flag is recomputed against
	/// the new default.
	pub fn define_setting(&self, def: SettingDefinition) -> PsResult<()> {
		let def = def.normalized();
		let key = def.key.clone();
		let default = def.default.clone();

		let mut state = self.state.write();
		state.definitions.register(def)?;
		state.values.seed(&key, &default);
		Ok(())
	}

	/// Register every definition of a JSON manifest
	///
	/// All definitions are validated before any is registered.
	pub fn define_settings_from_json(&self, manifest: &str) -> PsResult<usize> {
		let defs = SettingDefinition::from_manifest(manifest)?;
		for def in &defs {
			validation::validate_definition(def)?;
		}

		let count = defs.len();
		for def in defs {
			self.define_setting(def)?;
		}
		Ok(count)
	}

	/// Copy of all definitions in registration order
	pub fn get_all_settings(&self) -> Vec<SettingDefinition> {
		self.state.read().definitions.iter().cloned().collect()
	}

	pub fn get_definition(&self, key: &str) -> Option<SettingDefinition> {
		self.state.read().definitions.get(key).cloned()
	}

	pub fn has_setting(&self, key: &str) -> bool {
		self.state.read().definitions.contains(key)
	}

	/// Defined keys in registration order
	pub fn keys(&self) -> Vec<String> {
		self.state.read().definitions.keys().map(str::to_string).collect()
	}

	// Values
	//********

	pub fn get_setting(&self, key: &str) -> PsResult<SettingValue> {
		let state = self.state.read();
		let def = state.definitions.get(key).ok_or_else(|| Error::not_found(key))?;
		Ok(state.values.get(key).map_or_else(|| def.default.clone(), |s| s.value.clone()))
	}

	/// Store a new value, persist the snapshot, then notify observers
	///
	/// Persistence failures do not roll back the change; they show up as
	/// `persisted == false` on the returned [`Dispatch`].
	pub fn set_setting(&self, key: &str, value: impl Into<SettingValue>) -> PsResult<Dispatch> {
		let value = value.into().normalized();

		let (previous, persisted) = {
			let _write = self.write_lock.lock();
			let (previous, snapshot) = {
				let mut guard = self.state.write();
				let state = &mut *guard;
				let def = state.definitions.get(key).ok_or_else(|| Error::not_found(key))?;
				validation::validate_write(def, &value, self.config.write_validation)?;

				let stored = StoredSetting::new(value.clone(), &def.default);
				let previous = state
					.values
					.replace(key, stored)
					.map_or_else(|| def.default.clone(), |s| s.value);
				(previous, state.values.to_snapshot(&self.config.version))
			};
			(previous, self.persistence.save(&snapshot))
		};
		debug!(key = %key, value = %value, previous = %previous, "Setting changed");

		let observers = self.observers.read().observers(key);
		let failures = notify::dispatch(key, &observers, &value, &previous);

		Ok(Dispatch { key: key.to_string(), persisted, notified: observers.len(), failures })
	}

	pub fn reset_to_default(&self, key: &str) -> PsResult<Dispatch> {
		let default = self
			.state
			.read()
			.definitions
			.get(key)
			.map(|def| def.default.clone())
			.ok_or_else(|| Error::not_found(key))?;
		self.set_setting(key, default)
	}

	/// Reset every setting in registration order
	///
	/// Each reset persists and notifies on its own; this is not a batch.
	pub fn reset_all_to_defaults(&self) -> PsResult<Vec<Dispatch>> {
		let keys = self.keys();
		info!(namespace = %self.config.namespace, count = keys.len(), "Resetting all settings");

		keys.iter().map(|key| self.reset_to_default(key)).collect()
	}

	/// Stored is-default flag; unknown settings are considered default
	pub fn is_default(&self, key: &str) -> bool {
		let state = self.state.read();
		if !state.definitions.contains(key) {
			return true;
		}
		state.values.get(key).is_none_or(|s| s.is_default)
	}

	/// Typed getters (error if undefined or of another type)
	pub fn get_bool(&self, key: &str) -> PsResult<bool> {
		match self.get_setting(key)? {
			SettingValue::Bool(b) => Ok(b),
			v => Err(mismatch(key, "boolean", &v)),
		}
	}

	pub fn get_number(&self, key: &str) -> PsResult<f64> {
		match self.get_setting(key)? {
			SettingValue::Number(n) => Ok(n),
			v => Err(mismatch(key, "number", &v)),
		}
	}

	pub fn get_string(&self, key: &str) -> PsResult<String> {
		match self.get_setting(key)? {
			SettingValue::String(s) => Ok(s),
			v => Err(mismatch(key, "string", &v)),
		}
	}

	/// Any value as JSON; custom settings may hold scalars as well as objects
	pub fn get_json(&self, key: &str) -> PsResult<serde_json::Value> {
		Ok(self.get_setting(key)?.to_json())
	}

	// Observers
	//***********

	/// Register an observer for a key; registering the same `Arc` twice is a no-op
	pub fn on_setting_change(&self, key: &str, observer: SettingObserver) {
		if !self.observers.write().subscribe(key, observer) {
			debug!(key = %key, "Observer already registered");
		}
	}

	/// Remove an observer by identity; unknown observers are ignored
	pub fn remove_setting_change_listener(&self, key: &str, observer: &SettingObserver) {
		if !self.observers.write().unsubscribe(key, observer) {
			debug!(key = %key, "Observer was not registered");
		}
	}

	// Snapshots
	//***********

	/// Current state in the persisted snapshot format
	pub fn snapshot(&self) -> Snapshot {
		self.state.read().values.to_snapshot(&self.config.version)
	}

	pub fn export_settings(&self) -> PsResult<String> {
		Ok(serde_json::to_string_pretty(&self.snapshot())?)
	}

	/// Apply an exported snapshot through `set_setting`
	///
	/// The snapshot must carry this registry's version. Keys that are not
	/// defined are skipped. Every value is checked before any is applied.
	pub fn import_settings(&self, data: &str) -> PsResult<Vec<Dispatch>> {
		let snapshot: Snapshot = serde_json::from_str(data)?;
		if snapshot.version != self.config.version {
			return Err(Error::VersionMismatch {
				expected: self.config.version.clone(),
				found: snapshot.version,
			});
		}

		let entries: Vec<(String, SettingValue)> = {
			let state = self.state.read();
			let mut entries = Vec::new();
			for (key, stored) in snapshot.settings {
				match state.definitions.get(&key) {
					Some(def) => {
						validation::validate_write(def, &stored.value, self.config.write_validation)?;
						entries.push((key, stored.value));
					}
					None => debug!(key = %key, "Skipping import of undefined setting"),
				}
			}
			entries
		};

		entries.into_iter().map(|(key, value)| self.set_setting(&key, value)).collect()
	}

	/// Remove the persisted snapshot; in-memory values are kept
	pub fn clear_persisted(&self) -> PsResult<()> {
		let _write = self.write_lock.lock();
		self.persistence.clear()
	}

	pub fn namespace(&self) -> &str {
		&self.config.namespace
	}

	pub fn version(&self) -> &str {
		&self.config.version
	}

	pub fn config(&self) -> &RegistryConfig {
		&self.config
	}
}

/// Drop all values and re-seed defined keys with their defaults
fn reset_values(state: &mut State) {
	state.values.clear();
	for def in state.definitions.iter() {
		state.values.seed(&def.key, &def.default);
	}
}

fn mismatch(key: &str, expected: &'static str, got: &SettingValue) -> Error {
	Error::TypeMismatch { key: key.to_string(), expected, got: got.type_name() }
}

/// Builder for SettingsRegistry
pub struct SettingsRegistryBuilder {
	config: RegistryConfig,
	storage: Option<Arc<dyn StorageAdapter>>,
}

impl SettingsRegistryBuilder {
	pub fn new(config: RegistryConfig) -> Self {
		Self { config, storage: None }
	}

	/// Durable medium (defaults to process memory)
	pub fn storage(mut self, storage: Arc<dyn StorageAdapter>) -> Self {
		self.storage = Some(storage);
		self
	}

	pub fn write_validation(mut self, write_validation: WriteValidation) -> Self {
		self.config.write_validation = write_validation;
		self
	}

	pub fn build(self) -> PsResult<SettingsRegistry> {
		let storage = self.storage.unwrap_or_else(|| Arc::new(MemoryStorage::new()));
		SettingsRegistry::new(self.config, storage)
	}
}


// vim: ts=4
