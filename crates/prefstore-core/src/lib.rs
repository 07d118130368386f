//! Core of the prefstore settings registry.
//!
//! Definitions with per-type validation, the value store, change
//! notification, snapshot persistence, and the registry host that hands out
//! one registry per namespace.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod config;
pub mod host;
pub mod memory_storage;
pub mod prelude;
pub mod settings;

// Re-export commonly used types
pub use config::{RegistryConfig, WriteValidation};
pub use host::{HostMode, RegistryHost};
pub use memory_storage::MemoryStorage;
pub use settings::{SettingDefinition, SettingsRegistry};

// vim: ts=4
