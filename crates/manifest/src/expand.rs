//! Flattening declarations into root-relative catalog records.

use std::path::Path;

use crate::schema::Manifest;

/// One flattened output unit: a domain (primary or alias) mapped to a
/// root-relative icon path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatIconRecord {
	/// The record's domain. Aliases become independent records with their
	/// alias as the domain.
	pub domain: String,
	/// Display name shared with the primary declaration.
	pub site_name: String,
	/// Icon path relative to the aggregation root, forward-slash separated.
	pub icon: String,
}

/// Expand a manifest into flat records.
///
/// Each declaration yields one record for its primary domain followed by one
/// record per alias in declaration order, all sharing the declaration's site
/// name and resolved icon path. Later records for a colliding domain silently
/// override earlier ones during indexing, so emission order must stay stable.
pub fn expand_records(manifest: &Manifest, relative_dir: &Path) -> Vec<FlatIconRecord> {
	let mut records = Vec::new();
	for declaration in &manifest.icons {
		let icon = resolve_icon_path(relative_dir, &declaration.icon);
		records.push(FlatIconRecord {
			domain: declaration.domain.clone(),
			site_name: declaration.site_name.clone(),
			icon: icon.clone(),
		});
		for alias in &declaration.aliases {
			records.push(FlatIconRecord {
				domain: alias.clone(),
				site_name: declaration.site_name.clone(),
				icon: icon.clone(),
			});
		}
	}
	records
}

/// Join a declaration-relative icon path onto the manifest's root-relative
/// directory, normalized to forward slashes for the catalog artifact.
fn resolve_icon_path(relative_dir: &Path, icon: &str) -> String {
	relative_dir.join(icon).to_string_lossy().replace('\\', "/")
}
