//! Asset copy-plan derivation.

use std::path::{Path, PathBuf};

use favicat_manifest::FlatIconRecord;
use indexmap::IndexSet;

/// A resolved (source, destination) file-path pair for asset deployment.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct CopyInstruction {
	/// Root-joined path of the icon on disk.
	pub src: PathBuf,
	/// Where the icon lands under the output root.
	pub dest: PathBuf,
}

/// Derive the deduplicated copy plan for a record list.
///
/// Records sharing one physical icon (a domain and its aliases) collapse to
/// a single instruction; dedup is by structural (src, dest) equality and
/// first-occurrence order is preserved.
pub fn build_copy_plan(
	records: &[FlatIconRecord],
	root: &Path,
	out_dir: &Path,
) -> Vec<CopyInstruction> {
	let mut plan: IndexSet<CopyInstruction> = IndexSet::new();
	for record in records {
		plan.insert(CopyInstruction {
			src: root.join(&record.icon),
			dest: out_dir.join(&record.icon),
		});
	}
	plan.into_iter().collect()
}
