//! Isolation forest outlier detection
//!
//! Anomalous points are isolated by random axis-aligned splits in fewer
//! steps than points from the dense bulk of the data. The anomaly score is
//! derived from the average path length across an ensemble of trees built
//! on row subsamples; the outlier threshold is fitted from the expected
//! anomaly fraction (contamination) over the training scores.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::models::FEATURE_COUNT;

/// Euler-Mascheroni constant, used in the average path length normalizer
const EULER_MASCHERONI: f64 = 0.577_215_664_9;

/// Isolation forest fitting parameters
#[derive(Debug, Clone)]
pub struct IsolationForestConfig {
    /// Number of trees in the ensemble
    pub num_trees: usize,
    /// Rows subsampled per tree
    pub sample_size: usize,
    /// Expected fraction of outliers in the training data
    pub contamination: f64,
    /// Seed for subsampling and split choices
    pub seed: u64,
}

impl Default for IsolationForestConfig {
    fn default() -> Self {
        Self {
            num_trees: 100,
            sample_size: 256,
            contamination: 0.05,
            seed: 42,
        }
    }
}

enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
    Leaf {
        size: usize,
    },
}

/// Fitted isolation forest
pub struct IsolationForest {
    trees: Vec<Node>,
    sample_size: usize,
    score_threshold: f64,
}

impl IsolationForest {
    /// Fit the ensemble and calibrate the outlier threshold so that the
    /// configured contamination fraction of the training rows scores at or
    /// above it.
    pub fn fit(data: &[[f64; FEATURE_COUNT]], config: &IsolationForestConfig) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let sample_size = config.sample_size.min(data.len()).max(2);
        // Grow trees only to the expected isolation depth of the subsample
        let height_limit = (sample_size as f64).log2().ceil() as usize;

        let trees = (0..config.num_trees)
            .map(|_| {
                let subset = subsample(data, sample_size, &mut rng);
                build_tree(&subset, 0, height_limit, &mut rng)
            })
            .collect();

        let mut forest = Self {
            trees,
            sample_size,
            score_threshold: f64::INFINITY,
        };

        let mut scores: Vec<f64> = data.iter().map(|row| forest.score(row)).collect();
        scores.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let n_outliers = (config.contamination * scores.len() as f64).floor() as usize;
        forest.score_threshold = scores
            .get(scores.len() - n_outliers.min(scores.len()))
            .copied()
            .unwrap_or(f64::INFINITY);

        forest
    }

    /// Anomaly score in (0, 1]; higher means more isolated
    pub fn score(&self, features: &[f64; FEATURE_COUNT]) -> f64 {
        let total: f64 = self
            .trees
            .iter()
            .map(|tree| path_length(tree, features, 0))
            .sum();
        let avg_path = total / self.trees.len() as f64;
        2f64.powf(-avg_path / average_path_length(self.sample_size))
    }

    /// Outlier verdict for one feature row
    pub fn is_outlier(&self, features: &[f64; FEATURE_COUNT]) -> bool {
        self.score(features) >= self.score_threshold
    }
}

fn subsample(
    data: &[[f64; FEATURE_COUNT]],
    sample_size: usize,
    rng: &mut ChaCha8Rng,
) -> Vec<[f64; FEATURE_COUNT]> {
    if sample_size >= data.len() {
        return data.to_vec();
    }
    rand::seq::index::sample(rng, data.len(), sample_size)
        .into_iter()
        .map(|i| data[i])
        .collect()
}

fn build_tree(data: &[[f64; FEATURE_COUNT]], depth: usize, limit: usize, rng: &mut ChaCha8Rng) -> Node {
    if depth >= limit || data.len() <= 1 {
        return Node::Leaf { size: data.len() };
    }

    let feature = rng.gen_range(0..FEATURE_COUNT);
    let (min, max) = data.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |acc, row| {
        (acc.0.min(row[feature]), acc.1.max(row[feature]))
    });
    if max - min < f64::EPSILON {
        return Node::Leaf { size: data.len() };
    }

    let threshold = rng.gen_range(min..max);
    let (left, right): (Vec<[f64; FEATURE_COUNT]>, Vec<[f64; FEATURE_COUNT]>) =
        data.iter().copied().partition(|row| row[feature] < threshold);

    Node::Split {
        feature,
        threshold,
        left: Box::new(build_tree(&left, depth + 1, limit, rng)),
        right: Box::new(build_tree(&right, depth + 1, limit, rng)),
    }
}

fn path_length(node: &Node, features: &[f64; FEATURE_COUNT], depth: usize) -> f64 {
    match node {
        Node::Leaf { size } => depth as f64 + average_path_length(*size),
        Node::Split {
            feature,
            threshold,
            left,
            right,
        } => {
            if features[*feature] < *threshold {
                path_length(left, features, depth + 1)
            } else {
                path_length(right, features, depth + 1)
            }
        }
    }
}

/// Expected path length of an unsuccessful BST search over `n` points
fn average_path_length(n: usize) -> f64 {
    if n <= 1 {
        return 0.0;
    }
    let n = n as f64;
    2.0 * ((n - 1.0).ln() + EULER_MASCHERONI) - 2.0 * (n - 1.0) / n
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Dense cluster around a center with deterministic jitter, plus a few
    /// extreme rows mixed in the way the fault windows are.
    fn cluster_with_outliers(count: usize, outliers: usize) -> Vec<[f64; FEATURE_COUNT]> {
        let mut data: Vec<[f64; FEATURE_COUNT]> = (0..count)
            .map(|i| {
                let j1 = (i % 97) as f64 * 0.05;
                let j2 = (i % 89) as f64 * 0.06;
                [30.0 + j1, 40.0 - j2, 50.0 + j1 * 0.5 - j2, (i % 5) as f64]
            })
            .collect();
        for k in 0..outliers {
            data.push([95.0 + k as f64, 40.0, 50.0, 1.0]);
        }
        data
    }

    #[test]
    fn test_training_outliers_score_above_cluster_members() {
        let data = cluster_with_outliers(200, 5);
        let forest = IsolationForest::fit(&data, &IsolationForestConfig::default());

        let mean_inlier = data[..200]
            .iter()
            .map(|row| forest.score(row))
            .sum::<f64>()
            / 200.0;
        for row in &data[200..] {
            assert!(forest.score(row) > mean_inlier);
        }
    }

    #[test]
    fn test_training_outliers_flagged() {
        let data = cluster_with_outliers(200, 5);
        let forest = IsolationForest::fit(&data, &IsolationForestConfig::default());

        for row in &data[200..] {
            assert!(forest.is_outlier(row));
        }
    }

    #[test]
    fn test_scores_are_normalized() {
        let data = cluster_with_outliers(100, 3);
        let forest = IsolationForest::fit(&data, &IsolationForestConfig::default());
        for row in &data {
            let score = forest.score(row);
            assert!(score > 0.0 && score <= 1.0, "score was {score}");
        }
    }

    #[test]
    fn test_fit_is_deterministic() {
        let data = cluster_with_outliers(150, 4);
        let config = IsolationForestConfig::default();
        let a = IsolationForest::fit(&data, &config);
        let b = IsolationForest::fit(&data, &config);

        let probe = [45.0, 33.0, 80.0, 2.0];
        assert_eq!(a.score(&probe), b.score(&probe));
        assert_eq!(a.score_threshold, b.score_threshold);
    }

    #[test]
    fn test_average_path_length_monotonic() {
        assert_eq!(average_path_length(1), 0.0);
        assert!(average_path_length(256) > average_path_length(16));
    }
}
