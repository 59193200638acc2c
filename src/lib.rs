// Modules
pub mod config;
pub mod constants;
pub mod data;
pub mod errors;
pub mod node;
pub mod reader;
pub mod splitter;
pub mod tree;
pub mod utils;

// Individual classes, and functions
pub use config::{ConfigIO, ReaderConfig, TreeConfig};
pub use data::Dataset;
pub use errors::DecTreeError;
pub use node::Node;
pub use reader::{parse_str, read_path};
pub use tree::DecisionTree;
