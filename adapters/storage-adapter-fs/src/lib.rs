//! Filesystem storage adapter
//!
//! Stores one snapshot file per namespace, `<base_dir>/<namespace>.json`.
//! Writes go to a temporary file in the same directory which is then renamed
//! over the snapshot, so readers never see a half-written file.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod error;

use std::{
	fmt::Debug,
	fs::{self, File},
	io::{ErrorKind, Write},
	path::{Path, PathBuf},
	sync::atomic::{AtomicU64, Ordering},
};

use prefstore::{prelude::*, storage_adapter::StorageAdapter};

pub use error::Error as FsError;

static TMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Namespaces become file names: `[A-Za-z0-9._-]+`, not starting with a dot
fn check_namespace(namespace: &str) -> Result<(), FsError> {
	let valid = !namespace.is_empty()
		&& !namespace.starts_with('.')
		&& namespace.bytes().all(|b| b.is_ascii_alphanumeric() || matches!(b, b'.' | b'_' | b'-'));
	if valid { Ok(()) } else { Err(FsError::InvalidNamespace(namespace.to_string())) }
}

fn snapshot_path(base_dir: &Path, namespace: &str) -> Result<PathBuf, FsError> {
	check_namespace(namespace)?;
	Ok(base_dir.join(format!("{}.json", namespace)))
}

fn tmp_path(base_dir: &Path, namespace: &str) -> PathBuf {
	let seq = TMP_COUNTER.fetch_add(1, Ordering::Relaxed);
	base_dir.join(format!(".{}.{}-{}.tmp", namespace, std::process::id(), seq))
}

#[derive(Debug)]
pub struct StorageAdapterFs {
	base_dir: Box<Path>,
}

impl StorageAdapterFs {
	/// Open (and create if needed) the snapshot directory
	pub fn new(base_dir: impl AsRef<Path>) -> PsResult<Self> {
		let base_dir = base_dir.as_ref();
		fs::create_dir_all(base_dir).map_err(FsError::io(base_dir))?;
		Ok(Self { base_dir: base_dir.into() })
	}

	pub fn base_dir(&self) -> &Path {
		&self.base_dir
	}

	/// Location of a namespace's snapshot file
	pub fn snapshot_path(&self, namespace: &str) -> PsResult<PathBuf> {
		Ok(snapshot_path(&self.base_dir, namespace)?)
	}

	fn write_atomic(&self, path: &Path, namespace: &str, data: &str) -> Result<(), FsError> {
		let tmp = tmp_path(&self.base_dir, namespace);

		let res = (|| {
			let mut file = File::create(&tmp)?;
			file.write_all(data.as_bytes())?;
			file.sync_all()?;
			fs::rename(&tmp, path)
		})();
		if let Err(err) = res {
			warn!("snapshot write failed, removing tmpfile: {:?}", &tmp);
			let _ = fs::remove_file(&tmp);
			return Err(FsError::Io { path: path.to_path_buf(), source: err });
		}
		Ok(())
	}
}

impl StorageAdapter for StorageAdapterFs {
	fn read(&self, namespace: &str) -> PsResult<Option<String>> {
		let path = snapshot_path(&self.base_dir, namespace)?;
		match fs::read_to_string(&path) {
			Ok(data) => Ok(Some(data)),
			Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
			Err(err) => Err(FsError::Io { path, source: err }.into()),
		}
	}

	fn write(&self, namespace: &str, data: &str) -> PsResult<()> {
		let path = snapshot_path(&self.base_dir, namespace)?;
		debug!("write snapshot: {:?} ({} bytes)", &path, data.len());
		self.write_atomic(&path, namespace, data)?;
		Ok(())
	}

	fn remove(&self, namespace: &str) -> PsResult<()> {
		let path = snapshot_path(&self.base_dir, namespace)?;
		match fs::remove_file(&path) {
			Ok(()) => {
				info!("removed snapshot: {:?}", &path);
				Ok(())
			}
			Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
			Err(err) => Err(FsError::Io { path, source: err }.into()),
		}
	}
}


// vim: ts=4
