//! Declaration schema types.

/// One icon declaration inside a manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconDeclaration {
	/// Primary dot-separated DNS-style domain, e.g. `mail.google.com`.
	pub domain: String,
	/// Display name of the site the icon belongs to.
	pub site_name: String,
	/// Icon path relative to the manifest's directory.
	pub icon: String,
	/// Additional domains that resolve to the same icon, in declaration order.
	pub aliases: Vec<String>,
}

/// A validated set of declarations loaded from one declaration file.
///
/// Duplicate domains are allowed, within and across manifests; later records
/// silently overwrite earlier ones during indexing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
	/// Declarations in file order.
	pub icons: Vec<IconDeclaration>,
}
