pub use prefstore_types::prelude::*;

pub use prefstore_core::settings::{observer, Dispatch, ObserverError, SettingObserver};
pub use prefstore_core::{RegistryHost, SettingDefinition, SettingsRegistry};
pub use prefstore_types::storage_adapter::StorageAdapter;
pub use prefstore_types::types::{Choice, SettingType};

// vim: ts=4
