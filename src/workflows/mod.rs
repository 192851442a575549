//! Multi-step workflows composed from the repository's public operations

pub mod feature_branch;

pub use feature_branch::{create_feature_branch, FeatureBranchOptions, PARKING_BRANCH};
