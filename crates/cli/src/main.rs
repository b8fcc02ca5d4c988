//! Favicat command-line entry point.
//!
//! Runs one aggregation over the given root and reports a summary. Bad
//! manifests and missing icon files are logged and skipped; the process
//! exits non-zero only when the catalog itself cannot be emitted.

mod cli;

use std::path::PathBuf;

use clap::Parser;
use favicat_catalog::{FsCopier, FsDiscovery, aggregate};

use crate::cli::Cli;

fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();
	setup_tracing(cli.verbose);

	let root = cli.root.unwrap_or_else(|| PathBuf::from("."));
	let out_dir = cli.out.unwrap_or_else(|| root.join("dist"));

	let discovery = FsDiscovery::new(cli.manifest_name.as_str());
	let report = aggregate(&root, &out_dir, &discovery, &FsCopier)?;

	if !report.failures.is_empty() {
		tracing::warn!(
			skipped = report.failures.len(),
			"some manifests were skipped; see warnings above"
		);
	}
	tracing::info!(
		manifests = report.manifests_loaded,
		records = report.records,
		copied = report.copied,
		out = %out_dir.display(),
		"aggregation complete"
	);

	Ok(())
}

fn setup_tracing(verbose: bool) {
	use tracing_subscriber::EnvFilter;

	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
		if verbose {
			EnvFilter::new("debug")
		} else {
			EnvFilter::new("info")
		}
	});

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_target(false)
		.init();
}
