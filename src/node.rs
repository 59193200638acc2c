use std::fmt::{self, Display};

/// A node of an induced tree.
///
/// Leaves carry the predicted class code, internal nodes carry one child per
/// value code of the split column, ordered by code.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Leaf {
        value: usize,
        target: usize,
    },
    Internal {
        split_feature: usize,
        target: usize,
        children: Vec<(usize, Node)>,
    },
}

impl Node {
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    pub fn target(&self) -> usize {
        match self {
            Node::Leaf { target, .. } | Node::Internal { target, .. } => *target,
        }
    }

    /// Child for a value code of the split column. Always `None` on a leaf.
    pub fn child(&self, value: usize) -> Option<&Node> {
        match self {
            Node::Leaf { .. } => None,
            Node::Internal { children, .. } => children
                .binary_search_by_key(&value, |(v, _)| *v)
                .ok()
                .map(|i| &children[i].1),
        }
    }

    pub fn n_leaves(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Internal { children, .. } => children.iter().map(|(_, c)| c.n_leaves()).sum(),
        }
    }

    pub fn n_nodes(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Internal { children, .. } => 1 + children.iter().map(|(_, c)| c.n_nodes()).sum::<usize>(),
        }
    }

    /// Number of edges on the longest root to leaf path.
    pub fn depth(&self) -> usize {
        match self {
            Node::Leaf { .. } => 0,
            Node::Internal { children, .. } => 1 + children.iter().map(|(_, c)| c.depth()).max().unwrap_or(0),
        }
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Node::Leaf { value, target } => write!(f, "leaf: {} = {}", target, value),
            Node::Internal {
                split_feature,
                children,
                ..
            } => write!(f, "split: {} ({} children)", split_feature, children.len()),
        }
    }
}
