//! Manifest loading and record expansion for the favicat aggregator.
//!
//! A manifest is a declaration file owned by one domain-like directory,
//! listing the icons that directory provides:
//!
//! ```toml
//! [[icons]]
//! domain = "mail.google.com"
//! site_name = "Gmail"
//! icon = "gmail.png"
//! aliases = ["gmail.com"]
//! ```
//!
//! [`Manifest::parse`] validates declaration file content into typed records.
//! Malformed TOML is an error; schema violations are reported as a structured
//! list instead so callers can skip one bad manifest and keep aggregating the
//! rest. [`expand_records`] then flattens each declaration (primary domain
//! plus aliases) into root-relative [`FlatIconRecord`]s for indexing.

pub mod error;
pub mod expand;
pub mod loader;
pub mod schema;

pub use error::{ManifestError, Result};
pub use expand::{FlatIconRecord, expand_records};
pub use loader::{SchemaViolation, Validation};
pub use schema::{IconDeclaration, Manifest};
