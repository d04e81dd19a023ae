//! Decision-tree root-cause classifier
//!
//! CART with gini impurity, grown until every leaf is pure (no depth limit,
//! no pruning). Chosen for interpretability over generalization: the tree
//! memorizes the threshold structure of the labeled training table.

use crate::models::{RootCause, FEATURE_COUNT};

/// Closed class set, indexed for counting
const CLASSES: [RootCause; 4] = [
    RootCause::Normal,
    RootCause::HighCpu,
    RootCause::NetworkLag,
    RootCause::MemoryLeak,
];

enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
    Leaf {
        class: RootCause,
    },
}

/// Fitted decision-tree classifier
pub struct DecisionTreeClassifier {
    root: TreeNode,
}

impl DecisionTreeClassifier {
    /// Fit the tree on row-aligned features and labels.
    pub fn fit(features: &[[f64; FEATURE_COUNT]], labels: &[RootCause]) -> Self {
        let indices: Vec<usize> = (0..features.len().min(labels.len())).collect();
        Self {
            root: build_node(features, labels, indices),
        }
    }

    /// Predicted label for one feature row
    pub fn predict(&self, features: &[f64; FEATURE_COUNT]) -> RootCause {
        let mut node = &self.root;
        loop {
            match node {
                TreeNode::Leaf { class } => return *class,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if features[*feature] <= *threshold {
                        left
                    } else {
                        right
                    };
                }
            }
        }
    }
}

fn class_index(class: RootCause) -> usize {
    match class {
        RootCause::Normal => 0,
        RootCause::HighCpu => 1,
        RootCause::NetworkLag => 2,
        RootCause::MemoryLeak => 3,
    }
}

fn class_counts(labels: &[RootCause], indices: &[usize]) -> [usize; 4] {
    let mut counts = [0usize; 4];
    for &i in indices {
        counts[class_index(labels[i])] += 1;
    }
    counts
}

/// Majority class; ties resolve to the lowest class index
fn majority_class(counts: &[usize; 4]) -> RootCause {
    let mut best = 0;
    for i in 1..counts.len() {
        if counts[i] > counts[best] {
            best = i;
        }
    }
    CLASSES[best]
}

fn gini(counts: &[usize; 4], total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let total = total as f64;
    1.0 - counts
        .iter()
        .map(|&c| {
            let p = c as f64 / total;
            p * p
        })
        .sum::<f64>()
}

fn build_node(features: &[[f64; FEATURE_COUNT]], labels: &[RootCause], indices: Vec<usize>) -> TreeNode {
    let counts = class_counts(labels, &indices);
    if indices.is_empty() || counts.iter().filter(|&&c| c > 0).count() <= 1 {
        return TreeNode::Leaf {
            class: majority_class(&counts),
        };
    }

    let Some((feature, threshold)) = best_split(features, labels, &indices, &counts) else {
        // Identical feature rows with conflicting labels
        return TreeNode::Leaf {
            class: majority_class(&counts),
        };
    };

    let (left, right): (Vec<usize>, Vec<usize>) = indices
        .into_iter()
        .partition(|&i| features[i][feature] <= threshold);

    TreeNode::Split {
        feature,
        threshold,
        left: Box::new(build_node(features, labels, left)),
        right: Box::new(build_node(features, labels, right)),
    }
}

/// Exhaustive search over midpoint thresholds for the split with the lowest
/// weighted gini impurity. Returns `None` when no split improves on the
/// parent node.
fn best_split(
    features: &[[f64; FEATURE_COUNT]],
    labels: &[RootCause],
    indices: &[usize],
    parent_counts: &[usize; 4],
) -> Option<(usize, f64)> {
    let total = indices.len();
    let parent_gini = gini(parent_counts, total);
    let mut best: Option<(usize, f64)> = None;
    let mut best_score = parent_gini;

    for feature in 0..FEATURE_COUNT {
        let mut order = indices.to_vec();
        order.sort_by(|&a, &b| {
            features[a][feature]
                .partial_cmp(&features[b][feature])
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut left_counts = [0usize; 4];
        let mut right_counts = *parent_counts;

        for k in 0..total - 1 {
            let idx = order[k];
            left_counts[class_index(labels[idx])] += 1;
            right_counts[class_index(labels[idx])] -= 1;

            let value = features[idx][feature];
            let next = features[order[k + 1]][feature];
            if next <= value {
                continue;
            }

            let n_left = k + 1;
            let n_right = total - n_left;
            let score = (n_left as f64 * gini(&left_counts, n_left)
                + n_right as f64 * gini(&right_counts, n_right))
                / total as f64;

            if score + f64::EPSILON < best_score {
                best_score = score;
                best = Some((feature, (value + next) / 2.0));
            }
        }
    }

    best
}
