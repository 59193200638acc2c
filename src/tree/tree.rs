use crate::config::TreeConfig;
use crate::constants::{RULE_CONJUNCTION, RULE_EQUALS, RULE_IMPLICATION};
use crate::data::Dataset;
use crate::errors::DecTreeError;
use crate::node::Node;
use crate::splitter::{EntropySplitter, Splitter};
use crate::utils::{max_index, validate_column_index, validate_num_threads};
use log::{debug, info};
use rayon::prelude::*;
use rayon::ThreadPool;
use std::fmt::{self, Display};
use std::io::Write;
use std::time::Instant;

/// ID3 decision tree over a categorical `Dataset`.
#[derive(Debug, Clone, Default)]
pub struct DecisionTree {
    pub cfg: TreeConfig,
    pub root: Option<Node>,
}

impl DecisionTree {
    /// Decision tree object
    ///
    /// * `target` - Index of the column to predict.
    /// * `guess_from_parent` - Give values of a split column that are absent from a
    ///   branch a leaf holding the parent's majority class. When false no child is
    ///   created for them and prediction through that branch yields no class.
    /// * `num_threads` - Threads used to build sibling subtrees, `None` builds sequentially.
    pub fn new(target: usize, guess_from_parent: bool, num_threads: Option<usize>) -> Result<Self, DecTreeError> {
        let tree = DecisionTree {
            cfg: TreeConfig {
                target,
                guess_from_parent,
                num_threads,
                ..TreeConfig::default()
            },
            root: None,
        };
        tree.validate_parameters()?;
        Ok(tree)
    }

    pub fn from_config(cfg: TreeConfig) -> Result<Self, DecTreeError> {
        let tree = DecisionTree { cfg, root: None };
        tree.validate_parameters()?;
        Ok(tree)
    }

    pub fn validate_parameters(&self) -> Result<(), DecTreeError> {
        validate_num_threads(self.cfg.num_threads)
    }

    pub fn reset(&mut self) {
        self.root = None;
    }

    /// Fit the tree on the enabled rows of `dataset`, splitting by conditional entropy.
    pub fn fit(&mut self, dataset: &Dataset) -> Result<(), DecTreeError> {
        self.fit_with(dataset, &EntropySplitter::new())
    }

    /// Fit the tree with a custom split criterion.
    pub fn fit_with<T: Splitter>(&mut self, dataset: &Dataset, splitter: &T) -> Result<(), DecTreeError> {
        self.validate_parameters()?;
        validate_column_index(self.cfg.target, dataset.n_columns())?;
        if dataset.enabled_rows_count() == 0 {
            return Err(DecTreeError::EmptyDataset);
        }
        let start = Instant::now();

        let pool = match self.cfg.num_threads {
            Some(num_threads) if num_threads > 1 => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(num_threads)
                    .build()
                    .map_err(|e| {
                        DecTreeError::InvalidParameter(
                            "num_threads".to_string(),
                            "a buildable thread pool size".to_string(),
                            e.to_string(),
                        )
                    })?,
            ),
            _ => None,
        };

        let root = self.grow(dataset.clone(), splitter, pool.as_ref())?;
        info!(
            "Built a decision tree for {:?} over {} rows in {:.3} seconds: {} leaves, depth {}.",
            dataset.get_column_name(self.cfg.target)?,
            dataset.enabled_rows_count(),
            start.elapsed().as_secs_f32(),
            root.n_leaves(),
            root.depth(),
        );
        self.root = Some(root);
        Ok(())
    }

    fn grow<T: Splitter>(
        &self,
        mut dataset: Dataset,
        splitter: &T,
        pool: Option<&ThreadPool>,
    ) -> Result<Node, DecTreeError> {
        let target = self.cfg.target;
        dataset.disable_column(target)?;

        let (counters, total) = dataset.count_values(target, None)?;
        let majority = max_index(&counters);
        let leaf = Node::Leaf {
            value: majority,
            target,
        };
        // Every row has the same class, or no attribute can tell the rows apart.
        if counters.get(majority).copied().unwrap_or(0) == total || dataset.is_indistinguishable() {
            return Ok(leaf);
        }
        let split = match splitter.best_split(&dataset, target)? {
            Some(split) => split,
            None => return Ok(leaf),
        };
        let split_feature = split.split_feature;
        if self.cfg.log_splits {
            debug!(
                "Splitting {} rows on {:?} (score {:.4}).",
                total,
                dataset.get_column_name(split_feature)?,
                split.split_score
            );
        }

        let (counters_x, _) = dataset.count_values(split_feature, None)?;
        let build_child = |(value, count): (usize, usize)| -> Result<Option<(usize, Node)>, DecTreeError> {
            if count > 0 {
                let filtered = dataset.filter(split_feature, value, true)?;
                Ok(Some((value, self.grow(filtered, splitter, pool)?)))
            } else if self.cfg.guess_from_parent {
                if self.cfg.log_splits {
                    debug!(
                        "No rows for {:?} = {:?}, guessing the parent's majority.",
                        dataset.get_column_name(split_feature)?,
                        dataset.get_value_string(split_feature, value)?
                    );
                }
                Ok(Some((
                    value,
                    Node::Leaf {
                        value: majority,
                        target,
                    },
                )))
            } else {
                Ok(None)
            }
        };

        // Siblings share nothing but the read-only table.
        let children: Vec<Option<(usize, Node)>> = match pool {
            Some(pool) => pool.install(|| {
                counters_x
                    .par_iter()
                    .copied()
                    .enumerate()
                    .map(build_child)
                    .collect::<Result<Vec<_>, _>>()
            })?,
            None => counters_x
                .iter()
                .copied()
                .enumerate()
                .map(build_child)
                .collect::<Result<Vec<_>, _>>()?,
        };

        Ok(Node::Internal {
            split_feature,
            target,
            children: children.into_iter().flatten().collect(),
        })
    }

    /// Root of the fitted tree.
    pub fn root(&self) -> Result<&Node, DecTreeError> {
        self.root.as_ref().ok_or(DecTreeError::NotFitted)
    }

    pub fn n_leaves(&self) -> usize {
        self.root.as_ref().map_or(0, |r| r.n_leaves())
    }

    pub fn depth(&self) -> usize {
        self.root.as_ref().map_or(0, |r| r.depth())
    }

    /// One rule per leaf, `cond & cond => target = class`, in value-code order.
    ///
    /// * `dataset` - Any view over the table the tree was fitted on, used for
    ///   column and value names.
    pub fn rules(&self, dataset: &Dataset) -> Result<Vec<String>, DecTreeError> {
        let mut rules = Vec::new();
        collect_rules(self.root()?, dataset, "", &mut rules)?;
        Ok(rules)
    }

    /// Write the rules, one per line.
    pub fn print<W: Write>(&self, dataset: &Dataset, output: &mut W) -> Result<(), DecTreeError> {
        for rule in self.rules(dataset)? {
            writeln!(output, "{}", rule).map_err(|e| DecTreeError::UnableToWrite(e.to_string()))?;
        }
        Ok(())
    }

    /// Pair the tree with a dataset so its rules can be formatted with `{}`.
    pub fn display<'a>(&'a self, dataset: &'a Dataset) -> RuleSet<'a> {
        RuleSet { tree: self, dataset }
    }
}

fn collect_rules(node: &Node, dataset: &Dataset, parents: &str, rules: &mut Vec<String>) -> Result<(), DecTreeError> {
    match node {
        Node::Leaf { value, target } => {
            let consequent = format!(
                "{}{}{}",
                dataset.get_column_name(*target)?,
                RULE_EQUALS,
                dataset.get_value_string(*target, *value)?
            );
            if parents.is_empty() {
                rules.push(format!("{}{}", RULE_IMPLICATION.trim_start(), consequent));
            } else {
                rules.push(format!("{}{}{}", parents, RULE_IMPLICATION, consequent));
            }
        }
        Node::Internal {
            split_feature,
            children,
            ..
        } => {
            let column_name = dataset.get_column_name(*split_feature)?;
            for (value, child) in children {
                let condition = format!(
                    "{}{}{}",
                    column_name,
                    RULE_EQUALS,
                    dataset.get_value_string(*split_feature, *value)?
                );
                let path = if parents.is_empty() {
                    condition
                } else {
                    format!("{}{}{}", parents, RULE_CONJUNCTION, condition)
                };
                collect_rules(child, dataset, &path, rules)?;
            }
        }
    }
    Ok(())
}

/// Rules of a tree, rendered against a dataset's names.
pub struct RuleSet<'a> {
    tree: &'a DecisionTree,
    dataset: &'a Dataset,
}

impl<'a> Display for RuleSet<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for rule in self.tree.rules(self.dataset).map_err(|_| fmt::Error)? {
            writeln!(f, "{}", rule)?;
        }
        Ok(())
    }
}

impl Display for DecisionTree {
    // Encoded structure, one node per line, children indented under their parent.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let root = match &self.root {
            Some(root) => root,
            None => return write!(f, "unfitted"),
        };
        let mut print_buffer: Vec<(usize, Option<usize>, &Node)> = vec![(0, None, root)];
        let mut r = String::new();
        while let Some((depth, branch, node)) = print_buffer.pop() {
            let indent = "      ".repeat(depth);
            match branch {
                Some(value) => r += format!("{}[{}] {}\n", indent, value, node).as_str(),
                None => r += format!("{}{}\n", indent, node).as_str(),
            }
            if let Node::Internal { children, .. } = node {
                for (value, child) in children.iter().rev() {
                    print_buffer.push((depth + 1, Some(*value), child));
                }
            }
        }
        write!(f, "{}", r)
    }
}
