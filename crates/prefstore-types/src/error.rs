//! Error types shared by the registry and the storage adapters

use std::fmt;

pub type PsResult<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
	/// Setting definition is internally inconsistent
	Definition { key: String, reason: String },
	/// Operation on a key that was never defined
	NotFound(String),
	/// Registry for the namespace was never initialized
	NotInitialized(String),
	/// Written value has the wrong variant for the declared setting type
	TypeMismatch { key: String, expected: &'static str, got: &'static str },
	/// Written value violates the definition's constraints
	Validation { key: String, reason: String },
	/// Imported snapshot was written by another version
	VersionMismatch { expected: String, found: String },
	InvalidNamespace(String),
	/// Durable medium refused the write
	QuotaExceeded { needed: usize, available: usize },
	ConfigError(String),
	Serialization(String),

	// externals
	Io(std::io::Error),
}

impl Error {
	pub fn definition(key: impl Into<String>, reason: impl Into<String>) -> Self {
		Error::Definition { key: key.into(), reason: reason.into() }
	}

	pub fn validation(key: impl Into<String>, reason: impl Into<String>) -> Self {
		Error::Validation { key: key.into(), reason: reason.into() }
	}

	pub fn not_found(key: impl Into<String>) -> Self {
		Error::NotFound(key.into())
	}
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Error::Definition { key, reason } => {
				write!(f, "invalid definition for setting '{}': {}", key, reason)
			}
			Error::NotFound(key) => write!(f, "setting '{}' is not defined", key),
			Error::NotInitialized(namespace) => {
				write!(f, "settings registry '{}' is not initialized", namespace)
			}
			Error::TypeMismatch { key, expected, got } => {
				write!(f, "type mismatch for setting '{}': expected {}, got {}", key, expected, got)
			}
			Error::Validation { key, reason } => {
				write!(f, "invalid value for setting '{}': {}", key, reason)
			}
			Error::VersionMismatch { expected, found } => {
				write!(f, "snapshot version '{}' does not match '{}'", found, expected)
			}
			Error::InvalidNamespace(namespace) => write!(f, "invalid namespace: '{}'", namespace),
			Error::QuotaExceeded { needed, available } => {
				write!(f, "storage quota exceeded: need {} bytes, {} available", needed, available)
			}
			Error::ConfigError(msg) => write!(f, "configuration error: {}", msg),
			Error::Serialization(msg) => write!(f, "serialization error: {}", msg),
			Error::Io(err) => write!(f, "I/O error: {}", err),
		}
	}
}

impl std::error::Error for Error {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Error::Io(err) => Some(err),
			_ => None,
		}
	}
}

impl From<std::io::Error> for Error {
	fn from(err: std::io::Error) -> Self {
		Self::Io(err)
	}
}

impl From<serde_json::Error> for Error {
	fn from(err: serde_json::Error) -> Self {
		Self::Serialization(err.to_string())
	}
}


// vim: ts=4
