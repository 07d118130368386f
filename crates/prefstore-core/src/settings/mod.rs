//! Settings subsystem: definitions, values, persistence and change notification
//!
//! # Architecture
//!
//! - **Types** (`types.rs`): setting definitions and their builder
//! - **Validation** (`validation.rs`): per-type definition and write checks
//! - **Registry** (`registry.rs`): ordered key -> definition map
//! - **Store** (`store.rs`): key -> current value and is-default flag
//! - **Persist** (`persist.rs`): snapshot load/save through a storage adapter
//! - **Notify** (`notify.rs`): per-key observers and dispatch
//! - **Service** (`service.rs`): `SettingsRegistry`, the public facade
//!
//! # Change protocol
//!
//! `set_setting` validates the write, stores the value, saves the snapshot
//! and only then notifies observers. Observer and storage failures are
//! reported on the returned `Dispatch`; they never undo the change.

pub mod notify;
pub mod persist;
pub mod registry;
pub mod service;
pub mod store;
pub mod types;
pub mod validation;

pub use notify::{observer, Dispatch, ObserverError, ObserverFailure, SettingObserver};
pub use service::{SettingsRegistry, SettingsRegistryBuilder};
pub use types::{SettingDefinition, SettingDefinitionBuilder, SettingValidator};

// vim: ts=4
