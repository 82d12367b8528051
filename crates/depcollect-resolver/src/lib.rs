//! Dependency closure collection: visited-set traversal over package
//! manifests and the dependency graph it observes.

pub mod closure;
pub mod graph;
