//! Copy collected packages from the source tree into the destination tree.
//!
//! Unlike manifest lookups, copy failures are fatal: the first failing package
//! aborts the run.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use depcollect_core::source::package_path;
use depcollect_util::errors::{DepcollectError, DepcollectResult};
use depcollect_util::fs::{copy_dir_recursive, ensure_dir};
use depcollect_util::progress;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Copies one package directory into a destination parent directory.
pub trait Materializer: Send + Sync {
    /// Copy the directory `src` into `dest_parent`, keeping its final path
    /// component. Existing content is overwritten.
    fn copy(&self, src: &Path, dest_parent: &Path) -> DepcollectResult<()>;
}

/// Recursive filesystem copy, equivalent to `cp -r <src> <dest_parent>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsCopier;

impl Materializer for FsCopier {
    fn copy(&self, src: &Path, dest_parent: &Path) -> DepcollectResult<()> {
        let dir_name = src.file_name().ok_or_else(|| DepcollectError::Generic {
            message: format!("{} has no directory name", src.display()),
        })?;
        copy_dir_recursive(src, &dest_parent.join(dir_name)).map_err(DepcollectError::Io)?;
        Ok(())
    }
}

/// Summary of a materialize run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterializeReport {
    pub copied: usize,
}

/// Where one package is copied from and to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyTask {
    pub name: String,
    pub src: PathBuf,
    pub dest_parent: PathBuf,
}

impl CopyTask {
    /// Plan the copy of `name`: `src = source_root/name`,
    /// `dest_parent = parent(dest_root/name)`.
    ///
    /// Names must be relative paths made of plain components, so scoped
    /// packages (`@scope/pkg`) are allowed but `..` or absolute paths are not.
    pub fn plan(name: &str, source_root: &Path, dest_root: &Path) -> Result<Self, DepcollectError> {
        let relative = package_path(name).ok_or_else(|| DepcollectError::Copy {
            name: name.to_string(),
            message: "package name is not a relative directory name".to_string(),
        })?;

        let dest = dest_root.join(relative);
        let dest_parent = dest.parent().unwrap_or(dest_root).to_path_buf();
        Ok(Self {
            name: name.to_string(),
            src: source_root.join(relative),
            dest_parent,
        })
    }

    /// Create the destination parent and copy the package into it.
    pub fn run<M: Materializer + ?Sized>(&self, copier: &M) -> Result<(), DepcollectError> {
        ensure_dir(&self.dest_parent).map_err(|e| self.failed(e))?;
        copier.copy(&self.src, &self.dest_parent).map_err(|e| self.failed(e))?;
        tracing::debug!("Copied {} to {}", self.name, self.dest_parent.display());
        Ok(())
    }

    fn failed(&self, e: impl std::fmt::Display) -> DepcollectError {
        DepcollectError::Copy {
            name: self.name.clone(),
            message: e.to_string(),
        }
    }
}

fn plan_all(
    names: &BTreeSet<String>,
    source_root: &Path,
    dest_root: &Path,
) -> Result<Vec<CopyTask>, DepcollectError> {
    names
        .iter()
        .map(|name| CopyTask::plan(name, source_root, dest_root))
        .collect()
}

/// Copy every package in `names` one after another, stopping at the first failure.
pub fn materialize<M: Materializer + ?Sized>(
    names: &BTreeSet<String>,
    source_root: &Path,
    dest_root: &Path,
    copier: &M,
) -> DepcollectResult<MaterializeReport> {
    let tasks = plan_all(names, source_root, dest_root)?;
    let pb = progress::progress_bar(tasks.len() as u64, "Copying");
    for task in &tasks {
        task.run(copier)?;
        pb.inc(1);
    }
    pb.finish_and_clear();
    Ok(MaterializeReport {
        copied: tasks.len(),
    })
}

/// Like [`materialize`] but runs up to `jobs` copies at once on the blocking
/// pool. The first failure aborts copies that have not started yet.
pub async fn materialize_parallel(
    names: &BTreeSet<String>,
    source_root: &Path,
    dest_root: &Path,
    copier: Arc<dyn Materializer>,
    jobs: usize,
) -> DepcollectResult<MaterializeReport> {
    let tasks = plan_all(names, source_root, dest_root)?;
    let total = tasks.len();
    let pb = progress::progress_bar(total as u64, "Copying");

    // More workers than packages is pointless, and tokio caps the permit count.
    let workers = jobs.clamp(1, total.max(1));
    let semaphore = Arc::new(Semaphore::new(workers));
    let mut join_set = JoinSet::new();
    for task in tasks {
        let sem = semaphore.clone();
        let copier = copier.clone();
        join_set.spawn(async move {
            let _permit = sem
                .acquire_owned()
                .await
                .map_err(|e| DepcollectError::Generic {
                    message: format!("Copy scheduler closed: {e}"),
                })?;
            tokio::task::spawn_blocking(move || task.run(copier.as_ref()))
                .await
                .map_err(|e| DepcollectError::Generic {
                    message: format!("Copy task failed: {e}"),
                })?
        });
    }

    while let Some(result) = join_set.join_next().await {
        match result {
            Ok(Ok(())) => pb.inc(1),
            Ok(Err(e)) => {
                join_set.abort_all();
                pb.abandon();
                return Err(e.into());
            }
            Err(e) => {
                join_set.abort_all();
                pb.abandon();
                return Err(miette::miette!("Background task failed: {}", e));
            }
        }
    }

    pb.finish_and_clear();
    Ok(MaterializeReport { copied: total })
}
