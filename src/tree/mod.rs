pub mod predict;
pub mod setters;
pub mod tree;

pub use tree::{DecisionTree, RuleSet};
