//! Error types for the filesystem storage adapter

use std::fmt;
use std::path::PathBuf;

/// Filesystem adapter-specific errors
#[derive(Debug)]
pub enum Error {
	/// Namespace cannot be used as a file name
	InvalidNamespace(String),

	/// I/O error on a snapshot file
	Io { path: PathBuf, source: std::io::Error },
}

impl Error {
	pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
		let path = path.into();
		move |source| Error::Io { path, source }
	}
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Error::InvalidNamespace(ns) => write!(f, "invalid namespace: '{}'", ns),
			Error::Io { path, source } => write!(f, "I/O error on {}: {}", path.display(), source),
		}
	}
}

impl std::error::Error for Error {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Error::Io { source, .. } => Some(source),
			Error::InvalidNamespace(_) => None,
		}
	}
}

impl From<Error> for prefstore::error::Error {
	fn from(err: Error) -> Self {
		match err {
			Error::InvalidNamespace(ns) => prefstore::error::Error::InvalidNamespace(ns),
			Error::Io { path, source } => prefstore::error::Error::Io(std::io::Error::new(
				source.kind(),
				format!("{}: {}", path.display(), source),
			)),
		}
	}
}


// vim: ts=4
