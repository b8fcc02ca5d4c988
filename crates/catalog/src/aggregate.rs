//! Aggregation driver.
//!
//! Orchestrates one run: discover manifest-bearing directories, load and
//! expand each manifest while accumulating failures instead of aborting,
//! fold the records into the domain trie, derive the copy plan, emit the
//! catalog artifact, and execute the copies. Discovery and copying are
//! injected so the pipeline is testable without touching a real tree.
//!
//! The run is optimized for a maximal partial catalog: a bad manifest or a
//! missing icon file is logged and skipped, and only emission-level failures
//! (output root, catalog write, a copy failing for reasons other than a
//! missing source) abort.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use favicat_manifest::{
	FlatIconRecord, Manifest, ManifestError, SchemaViolation, Validation, expand_records,
};

use crate::Catalog;
use crate::error::{CatalogError, Result};
use crate::plan::{CopyInstruction, build_copy_plan};
use crate::trie::build_trie;

/// File name of the emitted catalog artifact.
pub const CATALOG_FILE: &str = "manifest.json";

/// Default file name of per-directory declaration files.
pub const DEFAULT_MANIFEST_NAME: &str = "manifest.toml";

/// A manifest-bearing directory found under the aggregation root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredManifest {
	/// Directory path relative to the aggregation root, e.g. `google.com`.
	pub relative_dir: PathBuf,
	/// Full path of the declaration file.
	pub manifest_path: PathBuf,
}

/// Directory discovery collaborator.
pub trait DiscoverManifests {
	/// Return manifest-bearing directories under `root` in a deterministic
	/// order. That order decides which record wins a domain collision, so
	/// implementations must not let platform directory order leak through.
	fn discover(&self, root: &Path) -> io::Result<Vec<DiscoveredManifest>>;
}

/// Outcome of copying one asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
	/// The asset was copied.
	Copied,
	/// The source file does not exist; the copy was skipped.
	SkippedMissing,
}

/// Asset copy collaborator.
pub trait CopyAssets {
	/// Copy one asset, creating missing destination directories. A missing
	/// source must report [`CopyOutcome::SkippedMissing`] rather than fail.
	fn copy(&self, instruction: &CopyInstruction) -> io::Result<CopyOutcome>;
}

/// Why one manifest contributed no records.
#[derive(Debug)]
pub enum ManifestFailure {
	/// The file could not be read or parsed.
	Unreadable(ManifestError),
	/// The file parsed but violated the declaration schema.
	Schema {
		/// Path of the offending declaration file.
		path: PathBuf,
		/// Field-level violations.
		violations: Vec<SchemaViolation>,
	},
}

/// Summary of one aggregation run.
#[derive(Debug, Default)]
pub struct AggregateReport {
	/// Manifest-bearing directories discovered.
	pub manifests_found: usize,
	/// Manifests that validated and contributed records.
	pub manifests_loaded: usize,
	/// Flat records folded into the catalog, aliases included.
	pub records: usize,
	/// Assets copied into the output tree.
	pub copied: usize,
	/// Copy sources that were missing on disk.
	pub missing_assets: Vec<PathBuf>,
	/// Manifests skipped for parse or schema failures.
	pub failures: Vec<ManifestFailure>,
}

/// Filesystem discovery over the immediate children of the aggregation root.
///
/// A child directory qualifies when its name does not start with `.` or `_`,
/// contains a dot (domain-like), and holds a declaration file. Results are
/// sorted by name so collision resolution does not depend on readdir order.
#[derive(Debug, Clone)]
pub struct FsDiscovery {
	manifest_name: String,
}

impl FsDiscovery {
	pub fn new(manifest_name: impl Into<String>) -> Self {
		Self {
			manifest_name: manifest_name.into(),
		}
	}
}

impl Default for FsDiscovery {
	fn default() -> Self {
		Self::new(DEFAULT_MANIFEST_NAME)
	}
}

impl DiscoverManifests for FsDiscovery {
	fn discover(&self, root: &Path) -> io::Result<Vec<DiscoveredManifest>> {
		let mut found = Vec::new();
		for dir_entry in fs::read_dir(root)? {
			let dir_entry = dir_entry?;
			if !dir_entry.file_type()?.is_dir() {
				continue;
			}
			let name = dir_entry.file_name();
			let Some(name) = name.to_str() else {
				continue;
			};
			if name.starts_with('.') || name.starts_with('_') || !name.contains('.') {
				continue;
			}
			let manifest_path = dir_entry.path().join(&self.manifest_name);
			if manifest_path.is_file() {
				found.push(DiscoveredManifest {
					relative_dir: PathBuf::from(name),
					manifest_path,
				});
			}
		}
		found.sort_by(|a, b| a.relative_dir.cmp(&b.relative_dir));
		Ok(found)
	}
}

/// Filesystem copier.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsCopier;

impl CopyAssets for FsCopier {
	fn copy(&self, instruction: &CopyInstruction) -> io::Result<CopyOutcome> {
		if !instruction.src.is_file() {
			return Ok(CopyOutcome::SkippedMissing);
		}
		if let Some(parent) = instruction.dest.parent() {
			fs::create_dir_all(parent)?;
		}
		fs::copy(&instruction.src, &instruction.dest)?;
		Ok(CopyOutcome::Copied)
	}
}

/// Run one full aggregation from `root` into `out_dir`.
///
/// Per-manifest and per-asset failures accumulate in the returned report;
/// only output-emission failures abort the run.
pub fn aggregate(
	root: &Path,
	out_dir: &Path,
	discovery: &dyn DiscoverManifests,
	copier: &dyn CopyAssets,
) -> Result<AggregateReport> {
	fs::create_dir_all(out_dir).map_err(|e| CatalogError::CreateOutputRoot {
		path: out_dir.to_path_buf(),
		error: e,
	})?;

	let manifests = discovery.discover(root).map_err(|e| CatalogError::Discover {
		path: root.to_path_buf(),
		error: e,
	})?;
	tracing::info!(count = manifests.len(), root = %root.display(), "discovered manifests");

	let mut report = AggregateReport {
		manifests_found: manifests.len(),
		..AggregateReport::default()
	};

	let mut records: Vec<FlatIconRecord> = Vec::new();
	for discovered in &manifests {
		match Manifest::load(&discovered.manifest_path) {
			Ok(Validation::Valid(manifest)) => {
				records.extend(expand_records(&manifest, &discovered.relative_dir));
				report.manifests_loaded += 1;
			}
			Ok(Validation::Invalid(violations)) => {
				tracing::warn!(
					path = %discovered.manifest_path.display(),
					count = violations.len(),
					"manifest failed schema validation, skipping"
				);
				for violation in &violations {
					tracing::warn!(field = %violation.field, reason = %violation.reason, "schema violation");
				}
				report.failures.push(ManifestFailure::Schema {
					path: discovered.manifest_path.clone(),
					violations,
				});
			}
			Err(error) => {
				tracing::warn!(error = %error, "manifest unreadable, skipping");
				report.failures.push(ManifestFailure::Unreadable(error));
			}
		}
	}
	report.records = records.len();
	tracing::info!(records = records.len(), "collected icon records");

	let trie = build_trie(&records);
	let plan = build_copy_plan(&records, root, out_dir);

	let catalog = Catalog::new(trie, records.len());
	let json = catalog.to_json()?;
	let catalog_path = out_dir.join(CATALOG_FILE);
	fs::write(&catalog_path, json).map_err(|e| CatalogError::WriteCatalog {
		path: catalog_path.clone(),
		error: e,
	})?;
	tracing::info!(path = %catalog_path.display(), "catalog written");

	for instruction in &plan {
		match copier.copy(instruction) {
			Ok(CopyOutcome::Copied) => report.copied += 1,
			Ok(CopyOutcome::SkippedMissing) => {
				tracing::warn!(src = %instruction.src.display(), "icon file not found, skipping copy");
				report.missing_assets.push(instruction.src.clone());
			}
			Err(error) => {
				return Err(CatalogError::Copy {
					src: instruction.src.clone(),
					dest: instruction.dest.clone(),
					error,
				});
			}
		}
	}
	tracing::info!(copied = report.copied, "assets copied");

	Ok(report)
}

#[cfg(test)]
mod tests {
	use std::fs;

	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn fs_discovery_filters_non_domain_directories() {
		let root = tempfile::tempdir().expect("must create tempdir");
		for name in [".hidden.com", "_private.com", "nodot", "b.example", "a.example"] {
			let dir = root.path().join(name);
			fs::create_dir(&dir).unwrap();
			fs::write(dir.join("manifest.toml"), "icons = []").unwrap();
		}
		// Domain-like directory without a declaration file.
		fs::create_dir(root.path().join("empty.example")).unwrap();
		// Plain file with a domain-like name.
		fs::write(root.path().join("file.example"), "").unwrap();

		let found = FsDiscovery::default().discover(root.path()).unwrap();

		let dirs: Vec<&Path> = found.iter().map(|m| m.relative_dir.as_path()).collect();
		assert_eq!(dirs, vec![Path::new("a.example"), Path::new("b.example")]);
	}

	#[test]
	fn fs_discovery_honors_a_custom_manifest_name() {
		let root = tempfile::tempdir().expect("must create tempdir");
		let dir = root.path().join("site.example");
		fs::create_dir(&dir).unwrap();
		fs::write(dir.join("icons.toml"), "icons = []").unwrap();

		assert!(FsDiscovery::default().discover(root.path()).unwrap().is_empty());

		let found = FsDiscovery::new("icons.toml").discover(root.path()).unwrap();
		assert_eq!(found.len(), 1);
		assert_eq!(found[0].manifest_path, dir.join("icons.toml"));
	}

	#[test]
	fn fs_copier_creates_destination_directories() {
		let root = tempfile::tempdir().expect("must create tempdir");
		let src = root.path().join("fav.png");
		fs::write(&src, b"png").unwrap();
		let dest = root.path().join("out/site.example/fav.png");

		let outcome = FsCopier
			.copy(&CopyInstruction {
				src: src.clone(),
				dest: dest.clone(),
			})
			.unwrap();

		assert_eq!(outcome, CopyOutcome::Copied);
		assert_eq!(fs::read(dest).unwrap(), b"png");
	}

	#[test]
	fn fs_copier_skips_missing_sources() {
		let root = tempfile::tempdir().expect("must create tempdir");
		let outcome = FsCopier
			.copy(&CopyInstruction {
				src: root.path().join("absent.png"),
				dest: root.path().join("out/absent.png"),
			})
			.unwrap();

		assert_eq!(outcome, CopyOutcome::SkippedMissing);
		assert!(!root.path().join("out/absent.png").exists());
	}
}
