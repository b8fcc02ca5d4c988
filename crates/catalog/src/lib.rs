//! Catalog assembly for the favicat aggregator.
//!
//! This crate owns everything downstream of manifest loading: folding flat
//! icon records into a reversed-label domain trie, deriving the deduplicated
//! asset copy plan, and driving a full aggregation run over injected
//! discovery and copy collaborators.
//!
//! # Catalog artifact
//!
//! A run emits a single `manifest.json` under the output root:
//!
//! ```json
//! {
//!   "icons": {
//!     "com": {
//!       "gmail": { ".": { "domain": "gmail.com", "site_name": "Gmail", "icon": "google.com/gmail.png" } },
//!       "google": {
//!         "mail": { ".": { "domain": "mail.google.com", "site_name": "Gmail", "icon": "google.com/gmail.png" } }
//!       }
//!     }
//!   },
//!   "totalCount": 2,
//!   "generatedAt": "2026-08-05T12:00:00Z"
//! }
//! ```
//!
//! Terminal entries serialize under the reserved `"."` key so a consumer can
//! walk query labels most-significant-first and fall back to the nearest
//! ancestor that carries an entry.

pub mod aggregate;
pub mod error;
pub mod plan;
pub mod trie;

use chrono::{DateTime, Utc};
use serde::Serialize;

pub use aggregate::{
	AggregateReport, CATALOG_FILE, CopyAssets, CopyOutcome, DEFAULT_MANIFEST_NAME,
	DiscoverManifests, DiscoveredManifest, FsCopier, FsDiscovery, ManifestFailure, aggregate,
};
pub use error::{CatalogError, Result};
pub use plan::{CopyInstruction, build_copy_plan};
pub use trie::{CatalogEntry, DomainTrie, build_trie};

/// The final aggregated artifact: the domain index plus run metadata.
///
/// Immutable once emitted; a run fully replaces any prior catalog file.
#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
	/// Nested domain index keyed by reversed domain labels.
	pub icons: DomainTrie,
	/// Number of flat records folded into the index, aliases included.
	#[serde(rename = "totalCount")]
	pub total_count: usize,
	/// When this catalog was generated.
	#[serde(rename = "generatedAt")]
	pub generated_at: DateTime<Utc>,
}

impl Catalog {
	/// Assemble a catalog from an indexed trie, stamped with the current time.
	pub fn new(icons: DomainTrie, total_count: usize) -> Self {
		Self {
			icons,
			total_count,
			generated_at: Utc::now(),
		}
	}

	/// Serialize to the pretty-printed JSON artifact form.
	pub fn to_json(&self) -> serde_json::Result<String> {
		let mut json = serde_json::to_string_pretty(self)?;
		json.push('\n');
		Ok(json)
	}
}

#[cfg(test)]
mod tests {
	use favicat_manifest::FlatIconRecord;

	use super::*;

	#[test]
	fn catalog_serializes_with_artifact_field_names() {
		let records = [FlatIconRecord {
			domain: "example.org".into(),
			site_name: "Example".into(),
			icon: "example.org/fav.png".into(),
		}];
		let catalog = Catalog::new(build_trie(&records), records.len());

		let json = catalog.to_json().unwrap();
		assert!(json.ends_with('\n'));

		let value: serde_json::Value = serde_json::from_str(&json).unwrap();
		assert_eq!(value["totalCount"], 1);
		assert!(value["generatedAt"].is_string());
		assert_eq!(
			value["icons"]["org"]["example"]["."]["site_name"],
			"Example"
		);
	}
}
