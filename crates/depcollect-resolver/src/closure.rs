//! Visited-set closure over "depends on" edges.

use std::collections::BTreeSet;

use depcollect_core::source::{ManifestLookup, ManifestSource};

use crate::graph::DependencyGraph;

/// The result of one collection run: every package reachable from the root.
#[derive(Debug)]
pub struct Closure {
    root: String,
    names: BTreeSet<String>,
    unreadable: BTreeSet<String>,
    graph: DependencyGraph,
}

impl Closure {
    pub fn root(&self) -> &str {
        &self.root
    }

    /// All collected package names, including the root, in sorted order.
    pub fn names(&self) -> &BTreeSet<String> {
        &self.names
    }

    /// Packages kept as leaves because their manifest could not be read.
    pub fn unreadable(&self) -> &BTreeSet<String> {
        &self.unreadable
    }

    pub fn graph(&self) -> &DependencyGraph {
        &self.graph
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Always false: the root is a member of every closure.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Collect every package transitively reachable from `root`.
///
/// Each name is marked visited before its manifest is looked up, so every
/// manifest is read at most once and cyclic graphs terminate. A manifest the
/// source cannot provide turns its package into a leaf; that is never an
/// error.
pub fn collect_closure<S>(root: &str, source: &S) -> Closure
where
    S: ManifestSource + ?Sized,
{
    let mut names = BTreeSet::new();
    let mut unreadable = BTreeSet::new();
    let mut graph = DependencyGraph::new();

    let root_idx = graph.add_node(root);
    graph.set_root(root_idx);
    names.insert(root.to_string());
    let mut stack = vec![root.to_string()];

    while let Some(name) = stack.pop() {
        let deps = match source.lookup(&name) {
            ManifestLookup::Found(deps) => deps,
            ManifestLookup::Unavailable(reason) => {
                tracing::debug!("Treating {name} as a leaf: {reason}");
                unreadable.insert(name);
                continue;
            }
        };

        let from = graph.add_node(&name);
        // Reverse so the stack pops dependencies in declaration order.
        for dep in deps.into_iter().rev() {
            let to = graph.add_node(&dep);
            graph.add_edge(from, to);
            if names.insert(dep.clone()) {
                stack.push(dep);
            }
        }
    }

    tracing::debug!(
        "Collected {} packages from {root} ({} without a readable manifest)",
        names.len(),
        unreadable.len()
    );

    Closure {
        root: root.to_string(),
        names,
        unreadable,
        graph,
    }
}
