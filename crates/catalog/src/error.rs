//! Error types for catalog assembly.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors that abort an aggregation run.
///
/// Per-manifest and per-asset failures are accumulated in
/// [`AggregateReport`](crate::aggregate::AggregateReport) instead; only
/// artifact-emission failures surface here.
#[derive(Debug, Error)]
pub enum CatalogError {
	/// The output root could not be created.
	#[error("failed to create output root {path}: {error}")]
	CreateOutputRoot {
		/// The output root that could not be created.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// Manifest discovery failed at the aggregation root.
	#[error("failed to scan aggregation root {path}: {error}")]
	Discover {
		/// The aggregation root that could not be scanned.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// The catalog artifact could not be serialized.
	#[error("failed to serialize catalog: {0}")]
	Serialize(#[from] serde_json::Error),

	/// The catalog artifact could not be written.
	#[error("failed to write catalog {path}: {error}")]
	WriteCatalog {
		/// The catalog file path.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// An asset copy failed for a reason other than a missing source.
	#[error("failed to copy {src} to {dest}: {error}")]
	Copy {
		/// The asset being copied.
		src: PathBuf,
		/// The destination it was copied towards.
		dest: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},
}

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
