//! Declaration file parsing and schema validation.
//!
//! Parsing is two-phase: TOML syntax first, then schema validation over the
//! raw value tree. Validation never raises; it collects every violation with
//! the path of the offending field so a caller can log the full report and
//! skip the manifest.

use std::path::Path;

use toml::Value;

use crate::error::{ManifestError, Result};
use crate::schema::{IconDeclaration, Manifest};

/// A single schema violation found while validating a declaration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
	/// Path of the offending field, e.g. `icons[2].domain`.
	pub field: String,
	/// Why the field was rejected.
	pub reason: String,
}

impl SchemaViolation {
	fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
		Self {
			field: field.into(),
			reason: reason.into(),
		}
	}
}

impl std::fmt::Display for SchemaViolation {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}: {}", self.field, self.reason)
	}
}

/// Result of validating a parsed declaration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
	/// The file matched the schema.
	Valid(Manifest),
	/// The file is well-formed TOML but violates the schema. The manifest
	/// contributes no records; the list is never empty.
	Invalid(Vec<SchemaViolation>),
}

impl Manifest {
	/// Parse declaration file content.
	///
	/// Returns `Err` only for malformed TOML; schema violations are reported
	/// through [`Validation::Invalid`] instead.
	pub fn parse(input: &str) -> Result<Validation> {
		let value: Value = toml::from_str(input)?;
		Ok(validate(&value))
	}

	/// Load and parse a declaration file from disk.
	pub fn load(path: impl AsRef<Path>) -> Result<Validation> {
		let path = path.as_ref();
		let content = std::fs::read_to_string(path).map_err(|e| ManifestError::Io {
			path: path.to_path_buf(),
			error: e,
		})?;
		Self::parse(&content).map_err(|e| e.with_path(path))
	}
}

fn validate(root: &Value) -> Validation {
	let mut violations = Vec::new();
	let mut icons = Vec::new();

	match root.get("icons") {
		None => violations.push(SchemaViolation::new("icons", "missing required array")),
		Some(Value::Array(items)) => {
			for (index, item) in items.iter().enumerate() {
				if let Some(declaration) = validate_declaration(item, index, &mut violations) {
					icons.push(declaration);
				}
			}
		}
		Some(other) => violations.push(SchemaViolation::new(
			"icons",
			format!("expected array, found {}", type_name(other)),
		)),
	}

	if violations.is_empty() {
		Validation::Valid(Manifest { icons })
	} else {
		Validation::Invalid(violations)
	}
}

fn validate_declaration(
	item: &Value,
	index: usize,
	violations: &mut Vec<SchemaViolation>,
) -> Option<IconDeclaration> {
	let Some(table) = item.as_table() else {
		violations.push(SchemaViolation::new(
			format!("icons[{index}]"),
			format!("expected table, found {}", type_name(item)),
		));
		return None;
	};

	let domain = require_string(table, index, "domain", violations);
	let site_name = require_string(table, index, "site_name", violations);
	let icon = require_string(table, index, "icon", violations);
	let aliases = validate_aliases(table, index, violations);

	Some(IconDeclaration {
		domain: domain?,
		site_name: site_name?,
		icon: icon?,
		aliases: aliases?,
	})
}

fn require_string(
	table: &toml::value::Table,
	index: usize,
	key: &str,
	violations: &mut Vec<SchemaViolation>,
) -> Option<String> {
	match table.get(key) {
		None => {
			violations.push(SchemaViolation::new(
				format!("icons[{index}].{key}"),
				"missing required string",
			));
			None
		}
		Some(Value::String(value)) if value.is_empty() => {
			violations.push(SchemaViolation::new(
				format!("icons[{index}].{key}"),
				"must be non-empty",
			));
			None
		}
		Some(Value::String(value)) => Some(value.clone()),
		Some(other) => {
			violations.push(SchemaViolation::new(
				format!("icons[{index}].{key}"),
				format!("expected string, found {}", type_name(other)),
			));
			None
		}
	}
}

fn validate_aliases(
	table: &toml::value::Table,
	index: usize,
	violations: &mut Vec<SchemaViolation>,
) -> Option<Vec<String>> {
	match table.get("aliases") {
		// Absent aliases expand to nothing.
		None => Some(Vec::new()),
		Some(Value::Array(items)) => {
			let before = violations.len();
			let mut aliases = Vec::with_capacity(items.len());
			for (alias_index, alias) in items.iter().enumerate() {
				match alias {
					Value::String(value) if value.is_empty() => {
						violations.push(SchemaViolation::new(
							format!("icons[{index}].aliases[{alias_index}]"),
							"must be non-empty",
						));
					}
					Value::String(value) => aliases.push(value.clone()),
					other => violations.push(SchemaViolation::new(
						format!("icons[{index}].aliases[{alias_index}]"),
						format!("expected string, found {}", type_name(other)),
					)),
				}
			}
			(violations.len() == before).then_some(aliases)
		}
		Some(other) => {
			violations.push(SchemaViolation::new(
				format!("icons[{index}].aliases"),
				format!("expected array, found {}", type_name(other)),
			));
			None
		}
	}
}

fn type_name(value: &Value) -> &'static str {
	match value {
		Value::String(_) => "string",
		Value::Integer(_) => "integer",
		Value::Float(_) => "float",
		Value::Boolean(_) => "boolean",
		Value::Datetime(_) => "datetime",
		Value::Array(_) => "array",
		Value::Table(_) => "table",
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	fn parse(input: &str) -> Validation {
		Manifest::parse(input).expect("input must be valid TOML")
	}

	fn violations(input: &str) -> Vec<SchemaViolation> {
		match parse(input) {
			Validation::Invalid(violations) => violations,
			Validation::Valid(manifest) => panic!("expected violations, got {manifest:?}"),
		}
	}

	#[test]
	fn parses_full_declaration() {
		let validation = parse(
			r#"
			[[icons]]
			domain = "mail.google.com"
			site_name = "Gmail"
			icon = "gmail.png"
			aliases = ["gmail.com", "googlemail.com"]
			"#,
		);

		let Validation::Valid(manifest) = validation else {
			panic!("expected valid manifest, got {validation:?}");
		};
		assert_eq!(
			manifest.icons,
			vec![IconDeclaration {
				domain: "mail.google.com".into(),
				site_name: "Gmail".into(),
				icon: "gmail.png".into(),
				aliases: vec!["gmail.com".into(), "googlemail.com".into()],
			}]
		);
	}

	#[test]
	fn absent_aliases_default_to_empty() {
		let validation = parse(
			r#"
			[[icons]]
			domain = "example.org"
			site_name = "Example"
			icon = "fav.png"
			"#,
		);

		let Validation::Valid(manifest) = validation else {
			panic!("expected valid manifest");
		};
		assert!(manifest.icons[0].aliases.is_empty());
	}

	#[test]
	fn missing_icons_array_is_reported() {
		let report = violations(r#"name = "not a manifest""#);
		assert_eq!(report.len(), 1);
		assert_eq!(report[0].field, "icons");
		assert_eq!(report[0].reason, "missing required array");
	}

	#[test]
	fn icons_of_wrong_type_is_reported() {
		let report = violations(r#"icons = "nope""#);
		assert_eq!(report[0].field, "icons");
		assert_eq!(report[0].reason, "expected array, found string");
	}

	#[test]
	fn empty_required_fields_are_reported_with_paths() {
		let report = violations(
			r#"
			[[icons]]
			domain = ""
			site_name = "Example"
			icon = "fav.png"

			[[icons]]
			domain = "example.org"
			site_name = "Example"
			"#,
		);

		let fields: Vec<&str> = report.iter().map(|v| v.field.as_str()).collect();
		assert_eq!(fields, vec!["icons[0].domain", "icons[1].icon"]);
		assert_eq!(report[0].reason, "must be non-empty");
		assert_eq!(report[1].reason, "missing required string");
	}

	#[test]
	fn alias_violations_carry_element_indices() {
		let report = violations(
			r#"
			[[icons]]
			domain = "example.org"
			site_name = "Example"
			icon = "fav.png"
			aliases = ["ok.org", "", 7]
			"#,
		);

		let fields: Vec<&str> = report.iter().map(|v| v.field.as_str()).collect();
		assert_eq!(fields, vec!["icons[0].aliases[1]", "icons[0].aliases[2]"]);
		assert_eq!(report[1].reason, "expected string, found integer");
	}

	#[test]
	fn wrong_field_type_is_reported() {
		let report = violations(
			r#"
			[[icons]]
			domain = "example.org"
			site_name = 12
			icon = "fav.png"
			"#,
		);

		assert_eq!(report[0].field, "icons[0].site_name");
		assert_eq!(report[0].reason, "expected string, found integer");
	}

	#[test]
	fn one_bad_declaration_invalidates_the_manifest() {
		// Matches aggregator semantics: a manifest with any violation
		// contributes zero records.
		let report = violations(
			r#"
			[[icons]]
			domain = "good.example"
			site_name = "Good"
			icon = "good.png"

			[[icons]]
			domain = "bad.example"
			site_name = "Bad"
			icon = ""
			"#,
		);

		assert_eq!(report.len(), 1);
		assert_eq!(report[0].field, "icons[1].icon");
	}

	#[test]
	fn malformed_toml_is_a_parse_error() {
		let error = Manifest::parse("icons = [").unwrap_err();
		assert!(matches!(error, ManifestError::Syntax(_)));
	}

	#[test]
	fn load_attaches_the_file_path() {
		let error = Manifest::load("/nonexistent/manifest.toml").unwrap_err();
		let ManifestError::Io { path, .. } = error else {
			panic!("expected I/O error, got {error:?}");
		};
		assert_eq!(path, std::path::PathBuf::from("/nonexistent/manifest.toml"));
	}

	#[test]
	fn empty_icons_array_is_valid() {
		let Validation::Valid(manifest) = parse("icons = []") else {
			panic!("expected valid manifest");
		};
		assert!(manifest.icons.is_empty());
	}
}
