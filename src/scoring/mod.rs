mod classifier;
mod features;
mod forest;
mod scorer;

pub use classifier::{Classifier, ClassifierError, RiskLabel};
pub use features::{FeatureVector, FEATURE_COUNT, FEATURE_NAMES};
pub use forest::DecisionForest;
pub use scorer::{ModelOutcome, ModelScorer};
