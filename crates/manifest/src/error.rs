//! Error types for manifest loading.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur when reading or parsing a declaration file.
///
/// Schema violations are not errors; they are reported through
/// [`Validation::Invalid`](crate::loader::Validation).
#[derive(Debug, Error)]
pub enum ManifestError {
	/// The content is not syntactically valid TOML.
	#[error("TOML parse error: {0}")]
	Syntax(#[from] toml::de::Error),

	/// A declaration file on disk is not syntactically valid TOML.
	#[error("TOML parse error in {path}: {error}")]
	Parse {
		/// Path to the file that failed to parse.
		path: PathBuf,
		/// The underlying TOML error.
		error: toml::de::Error,
	},

	/// A declaration file could not be read.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},
}

impl ManifestError {
	/// Attach a file path to a bare syntax error.
	pub(crate) fn with_path(self, path: &Path) -> Self {
		match self {
			ManifestError::Syntax(error) => ManifestError::Parse {
				path: path.to_path_buf(),
				error,
			},
			other => other,
		}
	}
}

/// Result type for manifest operations.
pub type Result<T> = std::result::Result<T, ManifestError>;
