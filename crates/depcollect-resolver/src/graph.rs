//! Dependency graph recorded during closure collection.

use std::collections::{HashMap, HashSet, VecDeque};

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;

/// Directed "depends on" graph keyed by package name, backed by petgraph.
#[derive(Debug, Default)]
pub struct DependencyGraph {
    graph: DiGraph<String, ()>,
    index: HashMap<String, NodeIndex>,
    pub root: Option<NodeIndex>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or retrieve a node. If the name already exists, returns the existing index.
    pub fn add_node(&mut self, name: &str) -> NodeIndex {
        if let Some(&idx) = self.index.get(name) {
            return idx;
        }
        let idx = self.graph.add_node(name.to_string());
        self.index.insert(name.to_string(), idx);
        idx
    }

    pub fn set_root(&mut self, idx: NodeIndex) {
        self.root = Some(idx);
    }

    /// Add a dependency edge from `from` to `to`. Duplicate edges are ignored.
    pub fn add_edge(&mut self, from: NodeIndex, to: NodeIndex) {
        if !self.graph.edges(from).any(|e| e.target() == to) {
            self.graph.add_edge(from, to, ());
        }
    }

    pub fn find(&self, name: &str) -> Option<NodeIndex> {
        self.index.get(name).copied()
    }

    pub fn name(&self, idx: NodeIndex) -> &str {
        &self.graph[idx]
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Direct dependencies of a node, sorted by name.
    pub fn dependencies_of(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        self.sorted(self.graph.neighbors_directed(idx, Direction::Outgoing))
    }

    fn sorted(&self, nodes: impl Iterator<Item = NodeIndex>) -> Vec<NodeIndex> {
        let mut nodes: Vec<NodeIndex> = nodes.collect();
        nodes.sort_by(|a, b| self.graph[*a].cmp(&self.graph[*b]));
        nodes
    }

    /// Print the dependency tree to a string.
    ///
    /// A package whose subtree was already printed is shown once more with a
    /// trailing ` (*)` and not expanded again, so cycles terminate.
    pub fn print_tree(&self, max_depth: Option<usize>) -> String {
        let mut output = String::new();
        let Some(root) = self.root else {
            return output;
        };

        output.push_str(&format!("{}\n", self.graph[root]));
        let mut expanded = HashSet::new();
        expanded.insert(root);

        let deps = self.dependencies_of(root);
        let count = deps.len();
        for (i, idx) in deps.into_iter().enumerate() {
            let is_last = i == count - 1;
            self.print_subtree(&mut output, idx, "", is_last, 1, max_depth, &mut expanded);
        }
        output
    }

    #[allow(clippy::too_many_arguments)]
    fn print_subtree(
        &self,
        output: &mut String,
        idx: NodeIndex,
        prefix: &str,
        is_last: bool,
        depth: usize,
        max_depth: Option<usize>,
        expanded: &mut HashSet<NodeIndex>,
    ) {
        let connector = if is_last { "└── " } else { "├── " };
        let name = &self.graph[idx];
        let deps = self.dependencies_of(idx);

        if !deps.is_empty() && expanded.contains(&idx) {
            output.push_str(&format!("{prefix}{connector}{name} (*)\n"));
            return;
        }
        output.push_str(&format!("{prefix}{connector}{name}\n"));

        if max_depth.is_some_and(|max| depth >= max) {
            return;
        }
        expanded.insert(idx);

        let child_prefix = format!("{prefix}{}", if is_last { "    " } else { "│   " });
        let count = deps.len();
        for (i, child) in deps.into_iter().enumerate() {
            let is_last = i == count - 1;
            self.print_subtree(
                output,
                child,
                &child_prefix,
                is_last,
                depth + 1,
                max_depth,
                expanded,
            );
        }
    }

    /// Find the shortest chain of packages from root to `name`.
    pub fn find_path(&self, name: &str) -> Option<Vec<&str>> {
        let root = self.root?;
        let target = self.find(name)?;

        let mut previous: HashMap<NodeIndex, NodeIndex> = HashMap::new();
        let mut seen = HashSet::new();
        let mut queue = VecDeque::new();
        seen.insert(root);
        queue.push_back(root);

        while let Some(current) = queue.pop_front() {
            if current == target {
                let mut path = vec![self.name(current)];
                let mut cursor = current;
                while let Some(&prev) = previous.get(&cursor) {
                    path.push(self.name(prev));
                    cursor = prev;
                }
                path.reverse();
                return Some(path);
            }
            for next in self.dependencies_of(current) {
                if seen.insert(next) {
                    previous.insert(next, current);
                    queue.push_back(next);
                }
            }
        }
        None
    }
}
