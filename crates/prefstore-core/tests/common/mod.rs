//! Shared test helpers and fixtures
//!
//! Each integration test file pulls this in with `mod common;` and uses only
//! what it needs.

#![allow(dead_code)]

use std::sync::Arc;

use parking_lot::Mutex;
use prefstore_core::settings::{observer, SettingObserver};
use prefstore_core::{MemoryStorage, SettingDefinition, SettingsRegistry};
use prefstore_types::error::{Error, PsResult};
use prefstore_types::storage_adapter::StorageAdapter;
use prefstore_types::types::{SettingType, SettingValue};

/// Common test setup helper
pub fn setup_test_logging() {
	let _ = tracing_subscriber::fmt()
		.with_test_writer()
		.with_max_level(tracing::Level::DEBUG)
		.try_init();
}

/// `refreshInterval`: number, 5000, range 1000..=30000
pub fn refresh_interval() -> SettingDefinition {
	SettingDefinition::builder("refreshInterval", SettingType::Number)
		.default(5000)
		.min(1000.0)
		.max(30000.0)
		.step(500.0)
		.description("Polling period in milliseconds")
		.build()
		.expect("valid definition")
}

/// `theme`: dropdown light/dark, default light
pub fn theme() -> SettingDefinition {
	SettingDefinition::builder("theme", SettingType::Dropdown)
		.default("light")
		.choice("light", "Light")
		.choice("dark", "Dark")
		.build()
		.expect("valid definition")
}

/// `compact`: checkbox, default false
pub fn compact() -> SettingDefinition {
	SettingDefinition::builder("compact", SettingType::Checkbox)
		.default(false)
		.build()
		.expect("valid definition")
}

/// `nickname`: text up to 16 characters
pub fn nickname() -> SettingDefinition {
	SettingDefinition::builder("nickname", SettingType::Text)
		.default("guest")
		.max_length(16)
		.build()
		.expect("valid definition")
}

/// Registry over the given storage with the standard fixtures defined
pub fn registry_with(storage: Arc<dyn StorageAdapter>, version: &str) -> SettingsRegistry {
	let registry = SettingsRegistry::builder("test-app", version)
		.storage(storage)
		.build()
		.expect("registry builds");
	for def in [refresh_interval(), theme(), compact(), nickname()] {
		registry.define_setting(def).expect("fixture defines");
	}
	registry
}

pub fn memory_registry() -> (SettingsRegistry, Arc<MemoryStorage>) {
	let storage = Arc::new(MemoryStorage::new());
	(registry_with(storage.clone(), "1.0.0"), storage)
}

/// Observer that records every `(new, old)` pair under a label
pub fn recording_observer(
	label: &'static str,
	calls: &Arc<Mutex<Vec<(String, SettingValue, SettingValue)>>>,
) -> SettingObserver {
	let calls = calls.clone();
	observer(move |new, old| {
		calls.lock().push((label.to_string(), new.clone(), old.clone()));
		Ok(())
	})
}

/// Storage whose reads and writes can be switched to fail
#[derive(Debug, Default)]
pub struct FlakyStorage {
	inner: MemoryStorage,
	pub fail_reads: Mutex<bool>,
	pub fail_writes: Mutex<bool>,
}

impl StorageAdapter for FlakyStorage {
	fn read(&self, key: &str) -> PsResult<Option<String>> {
		if *self.fail_reads.lock() {
			return Err(Error::Io(std::io::Error::other("storage unavailable")));
		}
		self.inner.read(key)
	}

	fn write(&self, key: &str, data: &str) -> PsResult<()> {
		if *self.fail_writes.lock() {
			return Err(Error::QuotaExceeded { needed: data.len(), available: 0 });
		}
		self.inner.write(key, data)
	}

	fn remove(&self, key: &str) -> PsResult<()> {
		self.inner.remove(key)
	}
}

// vim: ts=4
