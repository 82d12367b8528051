//! Handlers for `--tree` and `--why`.

use miette::Result;

use depcollect_ops::ops_collect::CollectOptions;
use depcollect_ops::ops_tree;
use depcollect_util::errors::DepcollectError;

pub fn exec_tree(opts: &CollectOptions, depth: Option<usize>) {
    print!("{}", ops_tree::tree(opts, depth));
}

pub fn exec_why(opts: &CollectOptions, target: &str) -> Result<()> {
    match ops_tree::why(opts, target) {
        Some(path) => {
            println!("Path to {target}:");
            print!("{path}");
            Ok(())
        }
        None => Err(DepcollectError::Generic {
            message: format!("Package '{target}' is not part of the {} closure", opts.root),
        }
        .into()),
    }
}
