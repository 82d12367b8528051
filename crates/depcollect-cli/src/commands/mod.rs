//! Command dispatch and handler modules.

mod collect;
mod tree;

use miette::Result;

use depcollect_core::config::CollectConfig;
use depcollect_core::{DEFAULT_DEST, DEFAULT_MANIFEST_FILE, DEFAULT_ROOT, DEFAULT_SOURCE};
use depcollect_ops::ops_collect::CollectOptions;
use depcollect_util::errors::DepcollectError;

use crate::cli::Cli;

/// Route a parsed CLI invocation to the appropriate command handler.
pub async fn dispatch(cli: Cli) -> Result<()> {
    let (opts, label) = resolve_options(&cli)?;
    tracing::debug!("Resolved options: {opts:?}");

    if cli.tree {
        tree::exec_tree(&opts, cli.depth.map(|d| d as usize));
        Ok(())
    } else if let Some(target) = cli.why.as_deref() {
        tree::exec_why(&opts, target)
    } else {
        collect::exec(&opts, &label).await
    }
}

/// Merge flags, environment, config file and defaults, in that order of precedence.
fn resolve_options(cli: &Cli) -> Result<(CollectOptions, String)> {
    let config = match &cli.config {
        Some(path) => CollectConfig::from_path(path)?,
        None => CollectConfig::default(),
    };

    let root = cli
        .root
        .clone()
        .or(config.root)
        .unwrap_or_else(|| DEFAULT_ROOT.to_string());
    if root.is_empty() {
        return Err(DepcollectError::Config {
            message: "root package name must not be empty".to_string(),
        }
        .into());
    }

    let label = cli
        .label
        .clone()
        .or(config.label)
        .unwrap_or_else(|| format!("{root}-runtime"));

    let opts = CollectOptions {
        source: cli
            .source
            .clone()
            .or(config.source)
            .unwrap_or_else(|| DEFAULT_SOURCE.into()),
        dest: cli
            .dest
            .clone()
            .or(config.dest)
            .unwrap_or_else(|| DEFAULT_DEST.into()),
        manifest_file: cli
            .manifest
            .clone()
            .or(config.manifest)
            .unwrap_or_else(|| DEFAULT_MANIFEST_FILE.to_string()),
        jobs: cli.jobs.map(|j| j as usize).or(config.jobs).unwrap_or(1),
        dry_run: cli.dry_run,
        root,
    };
    Ok((opts, label))
}
