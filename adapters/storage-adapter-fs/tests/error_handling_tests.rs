//! Filesystem storage adapter error handling tests
//!
//! Tests invalid namespaces and unusable directories

use std::sync::Arc;

use prefstore::error::Error;
use prefstore::storage_adapter::StorageAdapter;
use prefstore::types::SettingType;
use prefstore_core::{SettingDefinition, SettingsRegistry};
use prefstore_storage_adapter_fs::StorageAdapterFs;
use tempfile::TempDir;

fn create_test_adapter() -> (StorageAdapterFs, TempDir) {
	let temp_dir = TempDir::new().expect("Failed to create temp directory");
	let adapter = StorageAdapterFs::new(temp_dir.path()).expect("Failed to create adapter");
	(adapter, temp_dir)
}

#[test]
fn test_path_traversal_namespace() {
	let (adapter, temp) = create_test_adapter();

	let result = adapter.write("../escape", "data");

	assert!(matches!(result, Err(Error::InvalidNamespace(ns)) if ns == "../escape"));
	assert!(!temp.path().parent().unwrap().join("escape.json").exists());
}

#[test]
fn test_invalid_namespaces_rejected_everywhere() {
	let (adapter, _temp) = create_test_adapter();

	for ns in ["", ".hidden", "with/slash", "with space"] {
		assert!(matches!(adapter.read(ns), Err(Error::InvalidNamespace(_))), "read {:?}", ns);
		assert!(matches!(adapter.write(ns, "x"), Err(Error::InvalidNamespace(_))), "write {:?}", ns);
		assert!(matches!(adapter.remove(ns), Err(Error::InvalidNamespace(_))), "remove {:?}", ns);
	}
}

#[test]
fn test_base_dir_is_a_file() {
	let temp = TempDir::new().unwrap();
	let file = temp.path().join("not-a-dir");
	std::fs::write(&file, "occupied").unwrap();

	let result = StorageAdapterFs::new(&file);
	assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn test_snapshot_path_is_a_directory() {
	let (adapter, temp) = create_test_adapter();
	std::fs::create_dir(temp.path().join("app.json")).unwrap();

	assert!(matches!(adapter.read("app"), Err(Error::Io(_))));
	assert!(matches!(adapter.write("app", "{}"), Err(Error::Io(_))));

	// The failed write cleaned up after itself
	let entries: Vec<_> = std::fs::read_dir(temp.path()).unwrap().collect();
	assert_eq!(entries.len(), 1);
}

#[test]
fn test_registry_over_unwritable_snapshot_keeps_values() {
	let (adapter, temp) = create_test_adapter();
	std::fs::create_dir(temp.path().join("app.json")).unwrap();

	// Unreadable snapshot: the registry starts from defaults
	let registry = SettingsRegistry::builder("app", "1").storage(Arc::new(adapter)).build().unwrap();
	registry
		.define_setting(
			SettingDefinition::builder("compact", SettingType::Checkbox).default(false).build().unwrap(),
		)
		.unwrap();
	assert!(registry.is_default("compact"));

	let dispatch = registry.set_setting("compact", true).unwrap();
	assert!(!dispatch.persisted);
	assert!(registry.get_bool("compact").unwrap());
}

#[test]
fn test_registry_with_invalid_namespace_still_works_in_memory() {
	let (adapter, _temp) = create_test_adapter();

	let registry = SettingsRegistry::builder("bad/ns", "1").storage(Arc::new(adapter)).build().unwrap();
	registry
		.define_setting(
			SettingDefinition::builder("compact", SettingType::Checkbox).default(false).build().unwrap(),
		)
		.unwrap();

	assert!(!registry.set_setting("compact", true).unwrap().persisted);
	assert!(registry.get_bool("compact").unwrap());
}

// vim: ts=4
