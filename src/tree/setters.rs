use super::tree::DecisionTree;

impl DecisionTree {
    // Set methods for paramters

    /// Set the target column on the tree.
    /// * `target` - Index of the column to predict.
    pub fn set_target(mut self, target: usize) -> Self {
        self.cfg.target = target;
        self
    }

    /// Set guess_from_parent on the tree.
    /// * `guess_from_parent` - Give unseen values of a split column a leaf with the
    ///   parent's majority class.
    pub fn set_guess_from_parent(mut self, guess_from_parent: bool) -> Self {
        self.cfg.guess_from_parent = guess_from_parent;
        self
    }

    /// Set the number of threads on the tree.
    /// * `num_threads` - Threads used to build sibling subtrees.
    pub fn set_num_threads(mut self, num_threads: Option<usize>) -> Self {
        self.cfg.num_threads = num_threads;
        self
    }

    /// Set log_splits on the tree.
    /// * `log_splits` - Log every chosen split at debug level.
    pub fn set_log_splits(mut self, log_splits: bool) -> Self {
        self.cfg.log_splits = log_splits;
        self
    }
}
