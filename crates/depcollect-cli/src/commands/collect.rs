use miette::Result;

use depcollect_ops::ops_collect::{self, CollectOptions};
use depcollect_util::progress;

pub async fn exec(opts: &CollectOptions, label: &str) -> Result<()> {
    let outcome = ops_collect::collect(opts).await?;

    if opts.dry_run {
        for name in outcome.closure.names() {
            progress::status_info("Would copy", name);
        }
    } else {
        progress::status(
            "Finished",
            &format!("{} packages in {}", outcome.copied, opts.dest.display()),
        );
    }

    println!("{label}: {} packages collected", outcome.closure.len());
    Ok(())
}
