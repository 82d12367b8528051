pub mod materialize;
pub mod ops_collect;
pub mod ops_tree;
