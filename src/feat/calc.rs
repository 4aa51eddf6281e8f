//! Feature calculation from a node snapshot.
//!
//! Reads a `SearchNode` and the `SearchContext` and fills every slot of a
//! `FeatureVector`. Solver quantities are volatile and frequently
//! degenerate (zero bounds, empty columns, no incumbent yet), so several
//! ratios substitute small constants instead of dividing by zero.

use crate::solver::{
    BoundChangeKind, BoundType, BranchDirection, NodeKind, SearchContext, SearchNode,
};

use super::vector::{FeatureSlot, FeatureVector, FEATURE_COUNT};

/// Substitute for ratio denominators that would otherwise be zero.
const ZERO_GUARD: f64 = 0.1;

/// Fraction of the lower-to-cutoff gap kept as the effective cutoff
/// before any incumbent exists.
const NO_INCUMBENT_GAP_SHRINK: f64 = 0.2;

/// Populates `feat` from the given node and search context.
///
/// Overwrites all values, the depth, and the bound type; any prior
/// content is discarded. The stored-only scalars (root LP objective, sum
/// of objective coefficients, constraint count) are left untouched.
///
/// Panics when the contract is violated: a root node, an unset
/// `max_depth`, a node without bound changes, a leading bound change
/// that is not a branching decision, or a branching decision covering
/// more than one variable.
pub fn calculate(node: &SearchNode, ctx: &SearchContext, feat: &mut FeatureVector) {
    assert!(!node.is_root(), "cannot featurize the root node");
    assert!(
        feat.max_depth() != 0,
        "max depth must be set before feature calculation"
    );
    assert!(
        feat.size() >= FEATURE_COUNT,
        "feature vector of size {} cannot hold {} slots",
        feat.size(),
        FEATURE_COUNT
    );
    let branching = node
        .bound_changes
        .first()
        .expect("node has no recorded bound changes");
    assert!(
        branching.kind == BoundChangeKind::Branching,
        "leading bound change must be a branching decision"
    );
    assert!(
        node.bound_changes[1..]
            .iter()
            .all(|c| c.kind != BoundChangeKind::Branching),
        "branching on more than one variable is unsupported"
    );

    let mut root_lower = ctx.root_lower_bound;
    if root_lower == 0.0 {
        root_lower = ZERO_GUARD;
    }
    let lower = ctx.global_lower_bound;
    let mut cutoff = ctx.cutoff_bound;
    if ctx.n_sols_found == 0 {
        // No incumbent yet: pull the cutoff toward the lower bound so
        // the relative-bound feature stays meaningful.
        cutoff = lower + NO_INCUMBENT_GAP_SHRINK * (cutoff - lower);
    }

    let var = ctx.variable(branching.var);
    let var_obj = var.column.obj;
    let mut col_size = var.column.n_nonzeros as f64;
    if col_size == 0.0 {
        col_size = ZERO_GUARD;
    }
    let var_sol = var.solution_value(ctx.focus_has_lp);

    feat.depth = node.depth;
    feat.bound_type = branching.bound_type;
    feat.vals.fill(0.0);
    let max_depth = feat.max_depth();
    let vals = &mut feat.vals;

    vals[FeatureSlot::LowerBound.index()] = node.lower_bound / root_lower;
    vals[FeatureSlot::Estimate.index()] = node.estimate / root_lower;

    if cutoff - lower != 0.0 {
        vals[FeatureSlot::RelativeBound.index()] = (node.lower_bound - lower) / (cutoff - lower);
    }

    match node.kind {
        NodeKind::Sibling => vals[FeatureSlot::KindSibling.index()] = 1.0,
        NodeKind::Child => vals[FeatureSlot::KindChild.index()] = 1.0,
        NodeKind::Leaf => vals[FeatureSlot::KindLeaf.index()] = 1.0,
        NodeKind::Focus => {}
    }

    vals[FeatureSlot::ObjPerNonzero.index()] = var_obj / col_size;
    vals[FeatureSlot::BoundLpDiff.index()] = branching.new_bound - var_sol;
    vals[FeatureSlot::RootLpDiff.index()] = var.root_sol - var_sol;

    match var.preferred_direction {
        BranchDirection::Downwards => vals[FeatureSlot::PrefDown.index()] = 1.0,
        BranchDirection::Upwards => vals[FeatureSlot::PrefUp.index()] = 1.0,
        BranchDirection::Auto => {}
    }

    let mut obj_scale = var_obj.abs();
    if obj_scale == 0.0 {
        obj_scale = ZERO_GUARD;
    }
    vals[FeatureSlot::Pseudocost.index()] =
        var.pseudocost(branching.new_bound - var_sol) / obj_scale;

    // A tightened lower bound pushes the variable up, so the relevant
    // inference history is the upward one, and vice versa.
    let infer_dir = match branching.bound_type {
        BoundType::Lower => BranchDirection::Upwards,
        BoundType::Upper => BranchDirection::Downwards,
    };
    vals[FeatureSlot::Inference.index()] =
        var.avg_inferences(infer_dir) / f64::from(max_depth);
}
