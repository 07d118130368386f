//! In-process storage adapter
//!
//! Keeps snapshots in a map for the lifetime of the process. An optional
//! byte quota makes writes fail the way browser storage does when full.

use parking_lot::RwLock;
use std::collections::HashMap;

use crate::prelude::*;
use prefstore_types::storage_adapter::StorageAdapter;

#[derive(Debug, Default)]
pub struct MemoryStorage {
	entries: RwLock<HashMap<String, String>>,
	quota: Option<usize>,
}

impl MemoryStorage {
	pub fn new() -> Self {
		Self::default()
	}

	/// Limit the total size of keys and values, in bytes
	pub fn with_quota(quota: usize) -> Self {
		Self { entries: RwLock::new(HashMap::new()), quota: Some(quota) }
	}

	/// Bytes used by all entries except `key`
	fn used_without(entries: &HashMap<String, String>, key: &str) -> usize {
		entries.iter().filter(|(k, _)| k.as_str() != key).map(|(k, v)| k.len() + v.len()).sum()
	}
}

impl StorageAdapter for MemoryStorage {
	fn read(&self, key: &str) -> PsResult<Option<String>> {
		Ok(self.entries.read().get(key).cloned())
	}

	fn write(&self, key: &str, data: &str) -> PsResult<()> {
		let mut entries = self.entries.write();

		if let Some(quota) = self.quota {
			let available = quota.saturating_sub(Self::used_without(&entries, key));
			let needed = key.len() + data.len();
			if needed > available {
				return Err(Error::QuotaExceeded { needed, available });
			}
		}

		entries.insert(key.to_string(), data.to_string());
		Ok(())
	}

	fn remove(&self, key: &str) -> PsResult<()> {
		self.entries.write().remove(key);
		Ok(())
	}
}


// vim: ts=4
