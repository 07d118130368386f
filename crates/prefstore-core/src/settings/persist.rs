//! Persistence layer
//!
//! Reads and writes the registry snapshot through a [`StorageAdapter`],
//! keyed by namespace. Storage failures are logged here and never
//! propagate to callers of the registry.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::prelude::*;
use prefstore_types::storage_adapter::StorageAdapter;
use prefstore_types::types::{Snapshot, StoredSetting};

/// Result of reading the persisted snapshot
#[derive(Debug, PartialEq)]
pub enum LoadOutcome {
	/// Nothing stored for the namespace
	Missing,
	/// Snapshot matched the configured version
	Restored(BTreeMap<String, StoredSetting>),
	/// Snapshot was written by another version and was discarded
	Discarded { found: String },
	/// Read or parse failed, already reported
	Failed,
}

pub struct Persistence {
	storage: Arc<dyn StorageAdapter>,
	namespace: String,
	version: String,
}

impl Persistence {
	pub fn new(storage: Arc<dyn StorageAdapter>, namespace: String, version: String) -> Self {
		Self { storage, namespace, version }
	}

	/// Read the snapshot for the namespace
	pub fn load(&self) -> LoadOutcome {
		let data = match self.storage.read(&self.namespace) {
			Ok(Some(data)) => data,
			Ok(None) => {
				debug!(namespace = %self.namespace, "No persisted settings");
				return LoadOutcome::Missing;
			}
			Err(err) => {
				error!(namespace = %self.namespace, error = %err, "Failed to read settings, using defaults");
				return LoadOutcome::Failed;
			}
		};

		let snapshot: Snapshot = match serde_json::from_str(&data) {
			Ok(snapshot) => snapshot,
			Err(err) => {
				error!(namespace = %self.namespace, error = %err, "Corrupt settings snapshot, using defaults");
				return LoadOutcome::Failed;
			}
		};

		if snapshot.version != self.version {
			info!(
				namespace = %self.namespace,
				found = %snapshot.version,
				expected = %self.version,
				"Settings version changed, resetting to defaults"
			);
			return LoadOutcome::Discarded { found: snapshot.version };
		}

		info!(namespace = %self.namespace, count = snapshot.settings.len(), "Loaded persisted settings");
		LoadOutcome::Restored(snapshot.settings)
	}

	/// Write a snapshot, reporting failures instead of returning them
	pub fn save(&self, snapshot: &Snapshot) -> bool {
		match self.try_save(snapshot) {
			Ok(()) => true,
			Err(err) => {
				error!(namespace = %self.namespace, error = %err, "Failed to save settings");
				false
			}
		}
	}

	pub fn try_save(&self, snapshot: &Snapshot) -> PsResult<()> {
		let data = serde_json::to_string(snapshot)?;
		self.storage.write(&self.namespace, &data)?;
		debug!(namespace = %self.namespace, bytes = data.len(), "Saved settings");
		Ok(())
	}

	/// Drop the persisted snapshot
	pub fn clear(&self) -> PsResult<()> {
		self.storage.remove(&self.namespace)
	}
}


// vim: ts=4
