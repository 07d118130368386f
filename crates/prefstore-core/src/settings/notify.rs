//! Change notification bus
//!
//! Observers are registered per key and invoked synchronously, in
//! registration order, after a value change has been stored and persisted.
//! A failing observer is reported and skipped; it never prevents the
//! remaining observers from running.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::prelude::*;

/// Callback invoked with `(new_value, old_value)`
pub type SettingObserver =
	Arc<dyn Fn(&SettingValue, &SettingValue) -> Result<(), ObserverError> + Send + Sync>;

/// Wrap a closure into a [`SettingObserver`]
///
/// Keep the returned `Arc` around: removal works by pointer identity.
pub fn observer<F>(f: F) -> SettingObserver
where
	F: Fn(&SettingValue, &SettingValue) -> Result<(), ObserverError> + Send + Sync + 'static,
{
	Arc::new(f)
}

/// Failure reported by an observer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObserverError(pub String);

impl fmt::Display for ObserverError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl std::error::Error for ObserverError {}

impl From<String> for ObserverError {
	fn from(msg: String) -> Self {
		ObserverError(msg)
	}
}

impl From<&str> for ObserverError {
	fn from(msg: &str) -> Self {
		ObserverError(msg.to_string())
	}
}

/// One observer that failed during a dispatch
#[derive(Debug, Clone, PartialEq)]
pub struct ObserverFailure {
	/// Position of the observer in registration order
	pub index: usize,
	pub error: ObserverError,
}

/// Outcome of a value change
#[derive(Debug, Clone, PartialEq)]
pub struct Dispatch {
	pub key: String,
	/// Whether the snapshot reached durable storage
	pub persisted: bool,
	/// Number of observers invoked
	pub notified: usize,
	pub failures: Vec<ObserverFailure>,
}

impl Dispatch {
	/// Persisted and every observer succeeded
	pub fn is_clean(&self) -> bool {
		self.persisted && self.failures.is_empty()
	}
}

#[derive(Default)]
pub struct ChangeBus {
	observers: HashMap<String, Vec<SettingObserver>>,
}

impl ChangeBus {
	pub fn new() -> Self {
		Self::default()
	}

	/// Register an observer. Returns false if this exact observer is already
	/// registered for the key.
	pub fn subscribe(&mut self, key: &str, observer: SettingObserver) -> bool {
		let list = self.observers.entry(key.to_string()).or_default();
		if list.iter().any(|o| Arc::ptr_eq(o, &observer)) {
			return false;
		}
		list.push(observer);
		true
	}

	/// Remove an observer by identity. Returns false if it was not registered.
	pub fn unsubscribe(&mut self, key: &str, observer: &SettingObserver) -> bool {
		let Some(list) = self.observers.get_mut(key) else {
			return false;
		};
		let before = list.len();
		list.retain(|o| !Arc::ptr_eq(o, observer));
		let removed = list.len() != before;

		if list.is_empty() {
			self.observers.remove(key);
		}
		removed
	}

	/// Observers of a key at this moment, in registration order
	pub fn observers(&self, key: &str) -> Vec<SettingObserver> {
		self.observers.get(key).cloned().unwrap_or_default()
	}

	pub fn count(&self, key: &str) -> usize {
		self.observers.get(key).map_or(0, Vec::len)
	}
}

/// Invoke every observer with `(new_value, old_value)`
///
/// Runs all observers even when some fail; failures are logged and returned.
pub fn dispatch(
	key: &str,
	observers: &[SettingObserver],
	new_value: &SettingValue,
	old_value: &SettingValue,
) -> Vec<ObserverFailure> {
	let mut failures = Vec::new();

	for (index, observer) in observers.iter().enumerate() {
		if let Err(error) = observer(new_value, old_value) {
			warn!(key = %key, index, error = %error, "Setting observer failed");
			failures.push(ObserverFailure { index, error });
		}
	}

	failures
}


// vim: ts=4
