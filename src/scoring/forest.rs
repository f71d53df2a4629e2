use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::scoring::{Classifier, ClassifierError, FeatureVector, RiskLabel, FEATURE_COUNT, FEATURE_NAMES};

/// On-disk layout of a trained forest.
///
/// ```json
/// {
///   "features": ["transaction_id", "merchant_id", ...],
///   "trees": [
///     { "feature": 4, "threshold": 1000.0, "left": { "label": 0 }, "right": { "label": 1 } }
///   ]
/// }
/// ```
#[derive(Debug, Deserialize)]
struct ForestArtifact {
    features: Vec<String>,
    trees: Vec<TreeNode>
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum TreeNode {
    Leaf {
        label: RiskLabel
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<TreeNode>,
        right: Box<TreeNode>
    }
}

impl TreeNode {
    fn validate(&self) -> Result<(), ClassifierError> {
        match self {
            TreeNode::Leaf { .. } => Ok(()),
            TreeNode::Split { feature, left, right, .. } => {
                if *feature >= FEATURE_COUNT {
                    return Err(ClassifierError::FeatureOutOfRange(*feature));
                }

                left.validate()?;
                right.validate()
            }
        }
    }

    /// Walks down to a leaf, `value <= threshold` goes left.
    fn classify(&self, features: &FeatureVector) -> Result<RiskLabel, ClassifierError> {
        let mut node = self;

        loop {
            match node {
                TreeNode::Leaf { label } => return Ok(*label),
                TreeNode::Split { feature, threshold, left, right } => {
                    let value = features.get(*feature)
                        .ok_or(ClassifierError::FeatureOutOfRange(*feature))?;

                    node = if value <= *threshold { left } else { right };
                }
            }
        }
    }
}

/// A forest of binary decision trees combined by majority vote.
///
/// A tied vote approves, the first class wins just like an argmax over the
/// class probabilities would.
pub struct DecisionForest {
    trees: Vec<TreeNode>
}

impl DecisionForest {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ClassifierError> {
        let file = File::open(path.as_ref())?;
        let forest = Self::from_reader(BufReader::new(file))?;

        info!("Loaded credit model with [{}] trees from {}", forest.tree_count(), path.as_ref().display());

        Ok(forest)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ClassifierError> {
        let artifact: ForestArtifact = serde_json::from_reader(reader)?;

        if !artifact.features.iter().map(String::as_str).eq(FEATURE_NAMES) {
            return Err(ClassifierError::SchemaMismatch {
                expected: FEATURE_NAMES.iter().map(|name| name.to_string()).collect(),
                found: artifact.features
            });
        }

        if artifact.trees.is_empty() {
            return Err(ClassifierError::Empty);
        }

        for tree in &artifact.trees {
            tree.validate()?;
        }

        Ok(Self { trees: artifact.trees })
    }

    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }
}

impl Classifier for DecisionForest {
    fn predict(&self, features: &FeatureVector) -> Result<RiskLabel, ClassifierError> {
        let mut rejections = 0;

        for tree in &self.trees {
            if tree.classify(features)? == RiskLabel::Reject {
                rejections += 1;
            }
        }

        if rejections * 2 > self.trees.len() {
            Ok(RiskLabel::Reject)
        } else {
            Ok(RiskLabel::Approve)
        }
    }
}
