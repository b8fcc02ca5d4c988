//! Reversed-label domain trie.
//!
//! Flat records are indexed by splitting the domain on `.`, reversing the
//! labels, and descending one child per label, so `mail.google.com` lives
//! along `com → google → mail` with its entry on the `mail` node. A runtime
//! consumer resolves a query domain by walking labels most-significant-first
//! and greedily matching down to the nearest ancestor that carries an entry;
//! this module only guarantees the shape supports that traversal.

use std::collections::BTreeMap;

use favicat_manifest::FlatIconRecord;
use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

/// Terminal payload stored where a record's domain ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
	/// The full domain as declared, not re-assembled from labels.
	pub domain: String,
	/// Display name of the site.
	pub site_name: String,
	/// Root-relative icon path.
	pub icon: String,
}

impl From<&FlatIconRecord> for CatalogEntry {
	fn from(record: &FlatIconRecord) -> Self {
		Self {
			domain: record.domain.clone(),
			site_name: record.site_name.clone(),
			icon: record.icon.clone(),
		}
	}
}

/// One node of the domain trie.
///
/// Children are keyed by a single reversed domain label. A node carries an
/// entry when some record's domain terminates there; interior nodes a record
/// merely passes through carry none.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainTrie {
	entry: Option<CatalogEntry>,
	children: BTreeMap<String, DomainTrie>,
}

impl DomainTrie {
	/// Index one record, overwriting any entry already stored for the same
	/// label path. Last write wins, within and across manifests.
	///
	/// A domain with no labels left after dropping empty ones (all dots)
	/// indexes nowhere.
	pub fn insert(&mut self, record: &FlatIconRecord) {
		let labels: Vec<&str> = reversed_labels(&record.domain).collect();
		if labels.is_empty() {
			return;
		}
		let mut node = self;
		for label in labels {
			node = node.children.entry(label.to_string()).or_default();
		}
		node.entry = Some(CatalogEntry::from(record));
	}

	/// Exact lookup: walk the reversed labels of `domain` and return the
	/// entry at the final node, if any.
	pub fn entry_for(&self, domain: &str) -> Option<&CatalogEntry> {
		let mut node = self;
		for label in reversed_labels(domain) {
			node = node.children.get(label)?;
		}
		node.entry.as_ref()
	}

	/// The entry terminating at this node.
	pub fn entry(&self) -> Option<&CatalogEntry> {
		self.entry.as_ref()
	}

	/// The child node for a single reversed label.
	pub fn child(&self, label: &str) -> Option<&DomainTrie> {
		self.children.get(label)
	}

	/// Whether the node holds neither an entry nor children.
	pub fn is_empty(&self) -> bool {
		self.entry.is_none() && self.children.is_empty()
	}
}

/// Labels of `domain` in most-significant-first order. Empty labels from
/// leading, trailing, or doubled dots are dropped.
fn reversed_labels(domain: &str) -> impl Iterator<Item = &str> {
	domain.split('.').rev().filter(|label| !label.is_empty())
}

/// Fold an ordered record list into a single trie root.
pub fn build_trie<'a, I>(records: I) -> DomainTrie
where
	I: IntoIterator<Item = &'a FlatIconRecord>,
{
	let mut root = DomainTrie::default();
	for record in records {
		root.insert(record);
	}
	root
}

impl Serialize for DomainTrie {
	/// Serialize as a nested label map with the terminal entry under the
	/// reserved `"."` key. Real labels are never empty, so the key cannot
	/// collide with a child.
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		let len = self.children.len() + usize::from(self.entry.is_some());
		let mut map = serializer.serialize_map(Some(len))?;
		if let Some(entry) = &self.entry {
			map.serialize_entry(".", entry)?;
		}
		for (label, child) in &self.children {
			map.serialize_entry(label, child)?;
		}
		map.end()
	}
}
