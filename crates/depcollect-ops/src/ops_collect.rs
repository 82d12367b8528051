//! Operation: collect the runtime closure of a package and copy it out.

use std::path::PathBuf;
use std::sync::Arc;

use depcollect_core::source::NodeModules;
use depcollect_core::{DEFAULT_DEST, DEFAULT_MANIFEST_FILE, DEFAULT_ROOT, DEFAULT_SOURCE};
use depcollect_resolver::closure::{collect_closure, Closure};
use depcollect_util::errors::DepcollectResult;
use depcollect_util::progress;

use crate::materialize::{self, FsCopier, Materializer};

/// Options for a collection run.
#[derive(Debug, Clone)]
pub struct CollectOptions {
    /// Tree holding one directory per installed package.
    pub source: PathBuf,
    /// Tree that receives the copied packages.
    pub dest: PathBuf,
    /// Package whose closure is collected.
    pub root: String,
    /// Manifest filename inside each package directory.
    pub manifest_file: String,
    /// Maximum concurrent copies.
    pub jobs: usize,
    /// Collect and report without copying anything.
    pub dry_run: bool,
}

impl Default for CollectOptions {
    fn default() -> Self {
        Self {
            source: PathBuf::from(DEFAULT_SOURCE),
            dest: PathBuf::from(DEFAULT_DEST),
            root: DEFAULT_ROOT.to_string(),
            manifest_file: DEFAULT_MANIFEST_FILE.to_string(),
            jobs: 1,
            dry_run: false,
        }
    }
}

impl CollectOptions {
    pub fn manifest_source(&self) -> NodeModules {
        NodeModules::new(&self.source).with_manifest_file(&self.manifest_file)
    }
}

/// Result of a collection run.
#[derive(Debug)]
pub struct CollectOutcome {
    pub closure: Closure,
    /// Number of packages copied; zero for a dry run.
    pub copied: usize,
}

/// Collect the closure of `opts.root` and copy it using [`FsCopier`].
pub async fn collect(opts: &CollectOptions) -> DepcollectResult<CollectOutcome> {
    collect_with(opts, Arc::new(FsCopier)).await
}

/// Collect the closure of `opts.root` and copy it with `copier`.
pub async fn collect_with(
    opts: &CollectOptions,
    copier: Arc<dyn Materializer>,
) -> DepcollectResult<CollectOutcome> {
    if !opts.source.is_dir() {
        progress::status_warn(
            "Missing",
            &format!(
                "{} is not a directory; only {} will be collected",
                opts.source.display(),
                opts.root
            ),
        );
    }

    progress::status(
        "Collecting",
        &format!("{} from {}", opts.root, opts.source.display()),
    );
    let closure = collect_closure(&opts.root, &opts.manifest_source());

    if !closure.unreadable().is_empty() {
        progress::status_info(
            "Leaves",
            &format!(
                "{} packages without a readable {}",
                closure.unreadable().len(),
                opts.manifest_file
            ),
        );
        for name in closure.unreadable() {
            tracing::debug!("No readable manifest for {name}");
        }
    }

    if opts.dry_run {
        return Ok(CollectOutcome { closure, copied: 0 });
    }

    progress::status(
        "Copying",
        &format!("{} packages to {}", closure.len(), opts.dest.display()),
    );
    let report = if opts.jobs > 1 {
        materialize::materialize_parallel(
            closure.names(),
            &opts.source,
            &opts.dest,
            copier,
            opts.jobs,
        )
        .await?
    } else {
        materialize::materialize(closure.names(), &opts.source, &opts.dest, copier.as_ref())?
    };

    Ok(CollectOutcome {
        closure,
        copied: report.copied,
    })
}
