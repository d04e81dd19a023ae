//! In-process models for the diagnosis pipeline
//!
//! This module provides:
//! - An isolation forest for unsupervised outlier detection
//! - A decision-tree classifier for supervised root-cause labeling

mod decision_tree;
mod isolation_forest;

pub use decision_tree::DecisionTreeClassifier;
pub use isolation_forest::{IsolationForest, IsolationForestConfig};
