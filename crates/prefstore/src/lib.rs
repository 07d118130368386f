//! prefstore is a typed, persistent, observable settings registry.
//!
//! # Features
//!
//! - Typed setting definitions
//!     - checkbox, number, slider, text, color, dropdown, radio, custom JSON
//!     - validated once at registration
//! - Per-namespace registries handed out by a `RegistryHost`
//! - Snapshot persistence through pluggable storage adapters
//!     - in-memory storage built in
//!     - one JSON file per namespace with the `fs` feature
//!     - version-stamped, stale snapshots are discarded
//! - Change observers
//!     - per key, called in registration order with `(new, old)`
//!     - failures are reported, never propagated

// Re-export shared types and adapter traits from prefstore-types
pub use prefstore_types::error;
pub use prefstore_types::storage_adapter;
pub use prefstore_types::types;

// Registry re-exports
pub use prefstore_core::config;
pub use prefstore_core::host;
pub use prefstore_core::memory_storage;
pub use prefstore_core::settings;

#[cfg(feature = "fs")]
pub use prefstore_storage_adapter_fs as storage_fs;

pub mod prelude;

pub use prefstore_core::{
	HostMode, MemoryStorage, RegistryConfig, RegistryHost, SettingDefinition, SettingsRegistry,
	WriteValidation,
};

// vim: ts=4
