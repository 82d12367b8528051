//! Operation: display the collected dependency tree.

use depcollect_resolver::closure::collect_closure;

use crate::ops_collect::CollectOptions;

/// Render the dependency tree of `opts.root`, optionally limited to `depth` levels.
pub fn tree(opts: &CollectOptions, depth: Option<usize>) -> String {
    let closure = collect_closure(&opts.root, &opts.manifest_source());
    closure.graph().print_tree(depth)
}

/// Render the chain of packages that pulls `target` into the closure, one per
/// line and indented by depth. Returns `None` if `target` is not collected.
pub fn why(opts: &CollectOptions, target: &str) -> Option<String> {
    let closure = collect_closure(&opts.root, &opts.manifest_source());
    let path = closure.graph().find_path(target)?;
    let mut output = String::new();
    for (i, name) in path.iter().enumerate() {
        output.push_str(&format!("{}{name}\n", "  ".repeat(i)));
    }
    Some(output)
}
