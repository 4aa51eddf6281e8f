//! Feature vector container and index-space placement.
//!
//! A `FeatureVector` holds the numeric features of one search node plus
//! the metadata that places those features into the global sparse index
//! space of a training file. Vectors computed at different depth deciles
//! or for different bound-change directions must not collide in that
//! space, so each (decile, direction) combination owns an exclusive
//! contiguous block of indices; `offset` computes the block start.

use crate::solver::BoundType;

/// Named feature slots, in value-array order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureSlot {
    /// Node lower bound / root lower bound.
    LowerBound = 0,
    /// Node objective estimate / root lower bound.
    Estimate = 1,
    /// Position of the node bound between global lower and cutoff bound.
    RelativeBound = 2,
    /// One-hot: node is a sibling of the focus node.
    KindSibling = 3,
    /// One-hot: node is a child of the focus node.
    KindChild = 4,
    /// One-hot: node is a leaf of the open queue.
    KindLeaf = 5,
    /// Branching variable's objective coefficient per column nonzero.
    ObjPerNonzero = 6,
    /// New branching bound minus the variable's current LP value.
    BoundLpDiff = 7,
    /// The variable's root LP value minus its current LP value.
    RootLpDiff = 8,
    /// One-hot: the variable prefers branching downwards.
    PrefDown = 9,
    /// One-hot: the variable prefers branching upwards.
    PrefUp = 10,
    /// Pseudocost estimate over the objective coefficient magnitude.
    Pseudocost = 11,
    /// Average inference count over the maximum depth.
    Inference = 12,
}

/// Number of named feature slots.
pub const FEATURE_COUNT: usize = 13;

impl FeatureSlot {
    /// Returns the slot's index in the value array.
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Fixed-size feature vector with placement metadata.
///
/// The value buffer's length is fixed at construction. `depth` stays 0
/// until the vector has been calculated; serialization rejects unset
/// vectors. `max_depth` must be set before calculation or offset
/// computation.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    pub(crate) vals: Vec<f64>,
    pub(crate) depth: u32,
    pub(crate) max_depth: u32,
    pub(crate) bound_type: BoundType,
    root_lp_obj: f64,
    sum_obj_coeff: f64,
    n_constrs: usize,
}

impl FeatureVector {
    /// Creates a zeroed vector of the given size.
    pub fn new(size: usize) -> Self {
        assert!(size > 0, "feature vector size must be positive");
        FeatureVector {
            vals: vec![0.0; size],
            depth: 0,
            max_depth: 0,
            bound_type: BoundType::Lower,
            root_lp_obj: 0.0,
            sum_obj_coeff: 0.0,
            n_constrs: 0,
        }
    }

    /// Copies all metadata and values from `source` into this vector.
    ///
    /// Panics if the sizes differ.
    pub fn copy_from(&mut self, source: &FeatureVector) {
        assert_eq!(
            self.size(),
            source.size(),
            "cannot copy between feature vectors of different sizes"
        );
        self.vals.copy_from_slice(&source.vals);
        self.depth = source.depth;
        self.max_depth = source.max_depth;
        self.bound_type = source.bound_type;
        self.root_lp_obj = source.root_lp_obj;
        self.sum_obj_coeff = source.sum_obj_coeff;
        self.n_constrs = source.n_constrs;
    }

    /// Number of feature slots.
    pub fn size(&self) -> usize {
        self.vals.len()
    }

    /// The feature values, indexed by `FeatureSlot`.
    pub fn values(&self) -> &[f64] {
        &self.vals
    }

    /// Depth of the node this vector was calculated for (0 = unset).
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// The normalization depth set by the caller.
    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// Direction of the branching bound change.
    pub fn bound_type(&self) -> BoundType {
        self.bound_type
    }

    pub fn root_lp_obj(&self) -> f64 {
        self.root_lp_obj
    }

    pub fn sum_obj_coeff(&self) -> f64 {
        self.sum_obj_coeff
    }

    pub fn n_constrs(&self) -> usize {
        self.n_constrs
    }

    /// Sets the maximum search depth used for normalization and
    /// placement. Must be nonzero before calculation or `offset`.
    pub fn set_max_depth(&mut self, max_depth: u32) {
        self.max_depth = max_depth;
    }

    /// Stores the root LP objective for downstream consumers.
    pub fn set_root_lp_obj(&mut self, root_lp_obj: f64) {
        self.root_lp_obj = root_lp_obj;
    }

    /// Stores the sum of objective coefficients for downstream consumers.
    pub fn set_sum_obj_coeff(&mut self, sum_obj_coeff: f64) {
        self.sum_obj_coeff = sum_obj_coeff;
    }

    /// Stores the constraint count for downstream consumers.
    pub fn set_n_constrs(&mut self, n_constrs: usize) {
        self.n_constrs = n_constrs;
    }

    /// Returns the start of this vector's exclusive index block in the
    /// global sparse feature space:
    /// `size * 2 * (depth / (max_depth / 10)) + size * bound_type`.
    ///
    /// Depths bucket into deciles of `max_depth`; the divisor is clamped
    /// to 1 so a maximum depth below 10 gives every depth its own bucket
    /// pair instead of dividing by zero. A node at `depth == max_depth`
    /// lands in an eleventh bucket, as the truncating division dictates.
    pub fn offset(&self) -> usize {
        assert!(
            self.max_depth != 0,
            "max depth must be set before computing a feature offset"
        );
        let decile = (self.max_depth / 10).max(1);
        let size = self.size();
        size * 2 * (self.depth / decile) as usize + size * self.bound_type.as_index()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_vector_is_zeroed() {
        let feat = FeatureVector::new(FEATURE_COUNT);
        assert_eq!(feat.size(), FEATURE_COUNT);
        assert!(feat.values().iter().all(|&v| v == 0.0));
        assert_eq!(feat.depth(), 0);
        assert_eq!(feat.max_depth(), 0);
        assert_eq!(feat.bound_type(), BoundType::Lower);
        assert_eq!(feat.root_lp_obj(), 0.0);
        assert_eq!(feat.sum_obj_coeff(), 0.0);
        assert_eq!(feat.n_constrs(), 0);
    }

    #[test]
    #[should_panic(expected = "must be positive")]
    fn zero_size_rejected() {
        FeatureVector::new(0);
    }

    #[test]
    fn scalar_setters() {
        let mut feat = FeatureVector::new(3);
        feat.set_root_lp_obj(1.5);
        feat.set_sum_obj_coeff(-2.0);
        feat.set_n_constrs(42);
        feat.set_max_depth(10);
        assert_eq!(feat.root_lp_obj(), 1.5);
        assert_eq!(feat.sum_obj_coeff(), -2.0);
        assert_eq!(feat.n_constrs(), 42);
        assert_eq!(feat.max_depth(), 10);
    }

    #[test]
    fn copy_preserves_everything() {
        let mut src = FeatureVector::new(3);
        src.vals.copy_from_slice(&[1.0, 2.0, 3.0]);
        src.depth = 5;
        src.max_depth = 10;
        src.bound_type = BoundType::Upper;
        src.set_root_lp_obj(0.25);
        src.set_sum_obj_coeff(9.0);
        src.set_n_constrs(7);

        let mut dst = FeatureVector::new(3);
        dst.copy_from(&src);
        assert_eq!(dst, src);
    }

    #[test]
    #[should_panic(expected = "different sizes")]
    fn copy_size_mismatch_panics() {
        let src = FeatureVector::new(3);
        let mut dst = FeatureVector::new(4);
        dst.copy_from(&src);
    }

    #[test]
    fn offset_is_pure() {
        let mut feat = FeatureVector::new(3);
        feat.depth = 5;
        feat.max_depth = 10;
        assert_eq!(feat.offset(), 30);
        assert_eq!(feat.offset(), 30);
    }

    #[test]
    fn offset_bound_type_shifts_by_size() {
        let mut feat = FeatureVector::new(3);
        feat.depth = 5;
        feat.max_depth = 10;
        let lower = feat.offset();
        feat.bound_type = BoundType::Upper;
        assert_eq!(feat.offset(), lower + 3);
    }

    #[test]
    fn offset_consecutive_deciles_shift_by_twice_size() {
        let mut feat = FeatureVector::new(3);
        feat.max_depth = 20;
        feat.depth = 2; // decile 1
        let first = feat.offset();
        feat.depth = 4; // decile 2
        assert_eq!(feat.offset(), first + 6);
    }

    #[test]
    fn offset_small_max_depth_does_not_divide_by_zero() {
        let mut feat = FeatureVector::new(3);
        feat.max_depth = 4;
        feat.depth = 3;
        // Divisor clamps to 1: each depth owns its own bucket pair.
        assert_eq!(feat.offset(), 3 * 2 * 3);
    }

    #[test]
    fn offset_at_max_depth_uses_eleventh_bucket() {
        let mut feat = FeatureVector::new(3);
        feat.max_depth = 10;
        feat.depth = 10;
        assert_eq!(feat.offset(), 3 * 2 * 10);
    }

    #[test]
    #[should_panic(expected = "max depth must be set")]
    fn offset_without_max_depth_panics() {
        let mut feat = FeatureVector::new(3);
        feat.depth = 5;
        feat.offset();
    }

    #[test]
    fn slot_indices_are_dense() {
        let slots = [
            FeatureSlot::LowerBound,
            FeatureSlot::Estimate,
            FeatureSlot::RelativeBound,
            FeatureSlot::KindSibling,
            FeatureSlot::KindChild,
            FeatureSlot::KindLeaf,
            FeatureSlot::ObjPerNonzero,
            FeatureSlot::BoundLpDiff,
            FeatureSlot::RootLpDiff,
            FeatureSlot::PrefDown,
            FeatureSlot::PrefUp,
            FeatureSlot::Pseudocost,
            FeatureSlot::Inference,
        ];
        assert_eq!(slots.len(), FEATURE_COUNT);
        for (i, slot) in slots.iter().enumerate() {
            assert_eq!(slot.index(), i);
        }
    }
}
