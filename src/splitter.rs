//! Splitter
//!
//! Chooses the column a node splits on. Candidates are scored against the
//! target over the current view and the lowest score wins.
use crate::data::Dataset;
use crate::errors::DecTreeError;
use crate::utils::entropy;

/// The chosen split column and its score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitInfo {
    pub split_feature: usize,
    pub split_score: f64,
}

pub trait Splitter: Sync {
    /// Score of splitting `dataset` on `column` when predicting `target`. Lower is better.
    fn score(&self, dataset: &Dataset, target: usize, column: usize) -> Result<f64, DecTreeError>;

    /// Best enabled column, first in ascending order on ties.
    /// `None` when no column other than the target is enabled.
    fn best_split(&self, dataset: &Dataset, target: usize) -> Result<Option<SplitInfo>, DecTreeError> {
        let mut best: Option<SplitInfo> = None;
        for column in dataset.get_enabled_columns() {
            if column == target {
                continue;
            }
            let split_score = self.score(dataset, target, column)?;
            match best {
                Some(info) if split_score >= info.split_score => {}
                _ => {
                    best = Some(SplitInfo {
                        split_feature: column,
                        split_score,
                    })
                }
            }
        }
        Ok(best)
    }
}

/// ID3 splitter: minimises the conditional entropy of the target given the
/// column, which is the same as maximising information gain.
#[derive(Debug, Default, Clone, Copy)]
pub struct EntropySplitter;

impl EntropySplitter {
    pub fn new() -> Self {
        EntropySplitter
    }

    /// Entropy of a column's value distribution over the enabled rows.
    pub fn column_entropy(&self, dataset: &Dataset, column: usize) -> Result<f64, DecTreeError> {
        let (counters, total) = dataset.count_values(column, None)?;
        Ok(entropy(&counters, total))
    }

    /// `H(target | column) = sum_v P(column = v) * H(target | column = v)`, over
    /// the values of `column` present in the view.
    pub fn conditional_entropy(&self, dataset: &Dataset, target: usize, column: usize) -> Result<f64, DecTreeError> {
        let (counters, total) = dataset.count_values(column, None)?;
        let mut conditional_entropy = 0.0;
        for (value, &count) in counters.iter().enumerate() {
            if count == 0 {
                continue;
            }
            let (value_counters, value_total) = dataset.count_values(target, Some((column, value)))?;
            let probability = count as f64 / total as f64;
            conditional_entropy += probability * entropy(&value_counters, value_total);
        }
        Ok(conditional_entropy)
    }
}

impl Splitter for EntropySplitter {
    fn score(&self, dataset: &Dataset, target: usize, column: usize) -> Result<f64, DecTreeError> {
        self.conditional_entropy(dataset, target, column)
    }
}
