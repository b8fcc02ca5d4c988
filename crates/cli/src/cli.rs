use std::path::PathBuf;

use clap::Parser;
use favicat_catalog::DEFAULT_MANIFEST_NAME;

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "favicat")]
#[command(about = "Aggregate per-domain icon manifests into an indexed catalog")]
#[command(version)]
pub struct Cli {
	/// Aggregation root containing domain-named manifest directories
	pub root: Option<PathBuf>,

	/// Output directory for the catalog and copied assets (defaults to ROOT/dist)
	#[arg(long, short = 'o')]
	pub out: Option<PathBuf>,

	/// File name of per-directory declaration files
	#[arg(long, default_value = DEFAULT_MANIFEST_NAME)]
	pub manifest_name: String,

	/// Verbose logging
	#[arg(long, short = 'v')]
	pub verbose: bool,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_are_applied() {
		let cli = Cli::parse_from(["favicat"]);
		assert!(cli.root.is_none());
		assert!(cli.out.is_none());
		assert_eq!(cli.manifest_name, "manifest.toml");
		assert!(!cli.verbose);
	}

	#[test]
	fn root_and_out_are_accepted() {
		let cli = Cli::parse_from(["favicat", "site", "-o", "build", "--manifest-name", "icons.toml"]);
		assert_eq!(cli.root.unwrap(), PathBuf::from("site"));
		assert_eq!(cli.out.unwrap(), PathBuf::from("build"));
		assert_eq!(cli.manifest_name, "icons.toml");
	}
}
