//! Adapter for the durable key-value medium that holds persisted snapshots.
//!
//! A storage adapter is a plain string store: the registry serializes its
//! snapshot to JSON and writes it under the namespace key. Implementations
//! decide where the bytes live (memory, files, browser storage).

use std::fmt::Debug;

use crate::prelude::*;

pub trait StorageAdapter: Debug + Send + Sync {
	/// Reads the entry stored under `key`, `None` if there is none
	fn read(&self, key: &str) -> PsResult<Option<String>>;

	/// Stores `data` under `key`, replacing any previous entry
	fn write(&self, key: &str, data: &str) -> PsResult<()>;

	/// Removes the entry under `key`. Removing a missing entry is not an error.
	fn remove(&self, key: &str) -> PsResult<()>;
}

// vim: ts=4
