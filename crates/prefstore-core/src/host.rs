//! Registry host
//!
//! A caller-owned table of registries that guarantees one registry per
//! namespace. The host is passed explicitly to every consumer (UI layer,
//! host scripts) instead of living in global state.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

use crate::config::{RegistryConfig, WriteValidation};
use crate::memory_storage::MemoryStorage;
use crate::prelude::*;
use crate::settings::SettingsRegistry;
use prefstore_types::storage_adapter::StorageAdapter;

/// How `initialize` treats a namespace it has not seen yet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HostMode {
	/// One registry per namespace
	#[default]
	PerNamespace,
	/// The first registry serves every later call, whatever its arguments
	Single,
}

#[derive(Default)]
struct Registries {
	by_namespace: HashMap<String, Arc<SettingsRegistry>>,
	first: Option<Arc<SettingsRegistry>>,
}

pub struct RegistryHost {
	storage: Arc<dyn StorageAdapter>,
	mode: HostMode,
	write_validation: WriteValidation,
	registries: Mutex<Registries>,
}

impl RegistryHost {
	pub fn new(storage: Arc<dyn StorageAdapter>) -> Self {
		Self {
			storage,
			mode: HostMode::default(),
			write_validation: WriteValidation::default(),
			registries: Mutex::new(Registries::default()),
		}
	}

	/// Host backed by process memory
	pub fn in_memory() -> Self {
		Self::new(Arc::new(MemoryStorage::new()))
	}

	/// Host where the first initialized registry is the only one
	pub fn single(storage: Arc<dyn StorageAdapter>) -> Self {
		Self { mode: HostMode::Single, ..Self::new(storage) }
	}

	/// Write validation policy for registries created from now on
	pub fn with_write_validation(mut self, write_validation: WriteValidation) -> Self {
		self.write_validation = write_validation;
		self
	}

	/// Get or create the registry for a namespace
	///
	/// The first call constructs the registry and loads its snapshot. Later
	/// calls return the same instance; their `version` is ignored.
	pub fn initialize(&self, namespace: &str, version: &str) -> PsResult<Arc<SettingsRegistry>> {
		// Held across construction so a namespace is never initialized twice
		let mut registries = self.registries.lock();

		let existing = match self.mode {
			HostMode::PerNamespace => registries.by_namespace.get(namespace),
			HostMode::Single => registries.first.as_ref(),
		};
		if let Some(registry) = existing {
			if registry.namespace() != namespace || registry.version() != version {
				warn!(
					namespace = %namespace,
					version = %version,
					active_namespace = %registry.namespace(),
					active_version = %registry.version(),
					"Registry already initialized, ignoring arguments"
				);
			}
			return Ok(registry.clone());
		}

		let mut config = RegistryConfig::new(namespace, version);
		config.write_validation = self.write_validation;
		let registry = Arc::new(SettingsRegistry::new(config, self.storage.clone())?);

		registries.by_namespace.insert(namespace.to_string(), registry.clone());
		if registries.first.is_none() {
			registries.first = Some(registry.clone());
		}
		Ok(registry)
	}

	/// Registry previously created by `initialize`
	pub fn get_instance(&self, namespace: &str) -> PsResult<Arc<SettingsRegistry>> {
		let registries = self.registries.lock();
		let found = match self.mode {
			HostMode::PerNamespace => registries.by_namespace.get(namespace),
			HostMode::Single => registries.first.as_ref(),
		};
		found.cloned().ok_or_else(|| Error::NotInitialized(namespace.to_string()))
	}

	/// The first registry this host initialized
	pub fn get_default_instance(&self) -> PsResult<Arc<SettingsRegistry>> {
		self.registries.lock().first.clone().ok_or_else(|| Error::NotInitialized(String::new()))
	}

	pub fn namespaces(&self) -> Vec<String> {
		self.registries.lock().by_namespace.keys().cloned().collect()
	}
}


// vim: ts=4
