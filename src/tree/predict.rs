use super::tree::DecisionTree;
use crate::data::Dataset;
use crate::errors::DecTreeError;
use crate::node::Node;
use rayon::prelude::*;

impl DecisionTree {
    /// Class code for an encoded row.
    ///
    /// Returns `Ok(None)` when the row reaches a node with no child for its
    /// value, which only happens when `guess_from_parent` is off.
    pub fn predict_codes(&self, row: &[usize]) -> Result<Option<usize>, DecTreeError> {
        let mut node = self.root()?;
        loop {
            match node {
                Node::Leaf { value, .. } => return Ok(Some(*value)),
                Node::Internal { split_feature, .. } => {
                    let value = *row
                        .get(*split_feature)
                        .ok_or(DecTreeError::ColumnOutOfRange(*split_feature, row.len()))?;
                    match node.child(value) {
                        Some(child) => node = child,
                        None => return Ok(None),
                    }
                }
            }
        }
    }

    /// Predicted class string for a row of raw fields, encoded with the
    /// vocabularies of `dataset`.
    ///
    /// Only the columns visited on the path are looked up. A string never
    /// seen for a visited column is an `UnknownValueString` error.
    pub fn predict_row(&self, dataset: &Dataset, row: &[&str]) -> Result<Option<String>, DecTreeError> {
        let mut node = self.root()?;
        loop {
            match node {
                Node::Leaf { value, target } => return Ok(Some(dataset.get_value_string(*target, *value)?.to_string())),
                Node::Internal { split_feature, .. } => {
                    let field = row
                        .get(*split_feature)
                        .ok_or(DecTreeError::ColumnOutOfRange(*split_feature, row.len()))?;
                    let value = dataset.get_value_code(*split_feature, field)?;
                    match node.child(value) {
                        Some(child) => node = child,
                        None => return Ok(None),
                    }
                }
            }
        }
    }

    /// Class codes for every enabled row of `dataset`.
    ///
    /// * `parallel` - Predict rows on the global rayon pool.
    pub fn predict(&self, dataset: &Dataset, parallel: bool) -> Result<Vec<Option<usize>>, DecTreeError> {
        let rows = &dataset.table().rows;
        if parallel {
            dataset
                .enabled_rows()
                .par_iter()
                .map(|&i| self.predict_codes(&rows[i]))
                .collect()
        } else {
            dataset
                .enabled_rows()
                .iter()
                .map(|&i| self.predict_codes(&rows[i]))
                .collect()
        }
    }
}
