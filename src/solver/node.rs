//! Search-node snapshot types.
//!
//! Represents the node-side view of a branch-and-bound search: the node's
//! position in the tree, its bounds, and the ordered list of bound changes
//! that created it. The first bound change of a non-root node is the
//! branching decision; later entries come from constraint or propagation
//! inference.

use super::var::VarId;

/// The kind of a search node relative to the current focus node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// The node currently being processed.
    Focus,
    /// A sibling of the focus node.
    Sibling,
    /// A child of the focus node.
    Child,
    /// A leaf of the open-node queue.
    Leaf,
}

/// The direction of a variable bound change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundType {
    Lower,
    Upper,
}

impl BoundType {
    /// Returns the index used to place this direction in the global
    /// sparse feature space (lower = 0, upper = 1).
    pub const fn as_index(self) -> usize {
        match self {
            BoundType::Lower => 0,
            BoundType::Upper => 1,
        }
    }
}

/// How a bound change came about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundChangeKind {
    /// A branching decision.
    Branching,
    /// Deduced by a constraint handler.
    ConsInference,
    /// Deduced by domain propagation.
    PropInference,
}

/// A single recorded change to a variable's bound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundChange {
    pub var: VarId,
    pub new_bound: f64,
    pub bound_type: BoundType,
    pub kind: BoundChangeKind,
}

/// Read-only snapshot of a search node.
///
/// `depth` is 0 only for the root; branching always happens below the
/// root, so featurization rejects depth-0 nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchNode {
    pub depth: u32,
    pub kind: NodeKind,
    pub lower_bound: f64,
    pub estimate: f64,
    pub bound_changes: Vec<BoundChange>,
}

impl SearchNode {
    /// Returns true if this is the root node.
    pub fn is_root(&self) -> bool {
        self.depth == 0
    }

    /// Returns the branching decision that created this node, if the
    /// leading bound change is one.
    pub fn branching_change(&self) -> Option<&BoundChange> {
        self.bound_changes
            .first()
            .filter(|c| c.kind == BoundChangeKind::Branching)
    }
}
