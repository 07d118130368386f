//! Basic filesystem storage adapter tests
//!
//! Tests read/write/remove of namespace snapshots and the registry on top

use std::sync::Arc;

use prefstore::storage_adapter::StorageAdapter;
use prefstore::types::{SettingType, SettingValue};
use prefstore_core::{SettingDefinition, SettingsRegistry};
use prefstore_storage_adapter_fs::StorageAdapterFs;
use tempfile::TempDir;

fn create_test_adapter() -> (StorageAdapterFs, TempDir) {
	let temp_dir = TempDir::new().expect("Failed to create temp directory");
	let adapter = StorageAdapterFs::new(temp_dir.path()).expect("Failed to create adapter");
	(adapter, temp_dir)
}

#[test]
fn test_write_and_read_snapshot() {
	let (adapter, temp) = create_test_adapter();
	let data = r#"{"version":"1","settings":{}}"#;

	adapter.write("my-app", data).expect("Failed to write snapshot");

	assert_eq!(adapter.read("my-app").unwrap().as_deref(), Some(data));
	assert!(temp.path().join("my-app.json").exists());
}

#[test]
fn test_read_missing_namespace() {
	let (adapter, _temp) = create_test_adapter();
	assert_eq!(adapter.read("never-written").unwrap(), None);
}

#[test]
fn test_overwrite_replaces_whole_file() {
	let (adapter, temp) = create_test_adapter();

	adapter.write("app", "a much longer first snapshot").unwrap();
	adapter.write("app", "short").unwrap();

	assert_eq!(adapter.read("app").unwrap().as_deref(), Some("short"));

	// No temporary files left behind
	let entries: Vec<_> = std::fs::read_dir(temp.path()).unwrap().collect();
	assert_eq!(entries.len(), 1);
}

#[test]
fn test_per_namespace_isolation() {
	let (adapter, _temp) = create_test_adapter();

	adapter.write("app", "app data").unwrap();
	adapter.write("widget", "widget data").unwrap();
	adapter.remove("app").unwrap();

	assert_eq!(adapter.read("app").unwrap(), None);
	assert_eq!(adapter.read("widget").unwrap().as_deref(), Some("widget data"));
}

#[test]
fn test_remove_missing_is_ok() {
	let (adapter, _temp) = create_test_adapter();
	adapter.remove("never-written").expect("removing a missing snapshot succeeds");
}

#[test]
fn test_creates_base_dir() {
	let temp = TempDir::new().unwrap();
	let nested = temp.path().join("a").join("b");

	let adapter = StorageAdapterFs::new(&nested).unwrap();
	adapter.write("app", "{}").unwrap();

	assert_eq!(adapter.base_dir(), nested.as_path());
	assert_eq!(adapter.snapshot_path("app").unwrap(), nested.join("app.json"));
}

#[test]
fn test_registry_survives_restart() {
	let temp = TempDir::new().unwrap();
	let theme = || {
		SettingDefinition::builder("theme", SettingType::Dropdown)
			.default("light")
			.choice("light", "Light")
			.choice("dark", "Dark")
			.build()
			.unwrap()
	};

	{
		let storage = Arc::new(StorageAdapterFs::new(temp.path()).unwrap());
		let registry = SettingsRegistry::builder("desktop", "3.1").storage(storage).build().unwrap();
		registry.define_setting(theme()).unwrap();
		assert!(registry.set_setting("theme", "dark").unwrap().persisted);
	}

	let raw = std::fs::read_to_string(temp.path().join("desktop.json")).unwrap();
	let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
	assert_eq!(json["version"], "3.1");
	assert_eq!(json["settings"]["theme"]["isDefault"], false);

	let storage = Arc::new(StorageAdapterFs::new(temp.path()).unwrap());
	let registry = SettingsRegistry::builder("desktop", "3.1").storage(storage).build().unwrap();
	registry.define_setting(theme()).unwrap();
	assert_eq!(registry.get_setting("theme").unwrap(), SettingValue::from("dark"));
	assert!(!registry.is_default("theme"));
}

// vim: ts=4
