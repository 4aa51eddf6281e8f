//! Node featurization.
//!
//! Converts a search-node snapshot into a fixed-size numeric feature
//! vector with named slots, and places vectors into disjoint blocks of a
//! global sparse index space keyed by depth decile and bound direction.

pub mod calc;
pub mod vector;

pub use calc::calculate;
pub use vector::{FeatureSlot, FeatureVector, FEATURE_COUNT};
