//! Decision variables and their statistics.
//!
//! A `Variable` bundles everything the featurizer reads about a branching
//! variable: its LP column, solution values, per-direction pseudocosts,
//! and per-direction average inference counts. All statistics are
//! maintained by the surrounding solver; this crate only reads them.

/// Index of a variable in the search context's variable table.
pub type VarId = usize;

/// A preferred branching direction, as hinted by the model or the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BranchDirection {
    Downwards,
    Upwards,
    /// No preference recorded.
    Auto,
}

/// The LP column associated with a variable.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Column {
    /// Coefficient in the objective function.
    pub obj: f64,
    /// Number of nonzero entries in the column.
    pub n_nonzeros: usize,
}

/// Read-only snapshot of a decision variable.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub column: Column,
    /// Solution value in the focus node's LP relaxation.
    pub lp_sol: f64,
    /// Fallback solution value used when no LP is available.
    pub pseudo_sol: f64,
    /// Solution value in the root node's LP relaxation.
    pub root_sol: f64,
    /// Estimated objective degradation per unit of upward bound change.
    pub pseudocost_up: f64,
    /// Estimated objective degradation per unit of downward bound change.
    pub pseudocost_down: f64,
    /// Average number of inferences triggered by branching upwards.
    pub avg_inferences_up: f64,
    /// Average number of inferences triggered by branching downwards.
    pub avg_inferences_down: f64,
    pub preferred_direction: BranchDirection,
}

impl Default for Variable {
    fn default() -> Self {
        Variable {
            column: Column::default(),
            lp_sol: 0.0,
            pseudo_sol: 0.0,
            root_sol: 0.0,
            pseudocost_up: 0.0,
            pseudocost_down: 0.0,
            avg_inferences_up: 0.0,
            avg_inferences_down: 0.0,
            preferred_direction: BranchDirection::Auto,
        }
    }
}

impl Variable {
    /// Returns the current solution value: the focus LP value when an LP
    /// is available, the fallback value otherwise.
    pub fn solution_value(&self, has_lp: bool) -> f64 {
        if has_lp {
            self.lp_sol
        } else {
            self.pseudo_sol
        }
    }

    /// Returns the pseudocost estimate for moving this variable's bound
    /// by `delta`: the upward pseudocost scaled by `delta` when the move
    /// is nonnegative, the downward pseudocost scaled by `|delta|`
    /// otherwise.
    pub fn pseudocost(&self, delta: f64) -> f64 {
        if delta >= 0.0 {
            self.pseudocost_up * delta
        } else {
            self.pseudocost_down * -delta
        }
    }

    /// Returns the average historical inference count for branching in
    /// the given direction. `Auto` has no recorded history.
    pub fn avg_inferences(&self, direction: BranchDirection) -> f64 {
        match direction {
            BranchDirection::Upwards => self.avg_inferences_up,
            BranchDirection::Downwards => self.avg_inferences_down,
            BranchDirection::Auto => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var_with_stats() -> Variable {
        Variable {
            column: Column { obj: 2.0, n_nonzeros: 5 },
            lp_sol: 1.5,
            pseudo_sol: 3.0,
            root_sol: 0.5,
            pseudocost_up: 4.0,
            pseudocost_down: 8.0,
            avg_inferences_up: 6.0,
            avg_inferences_down: 2.0,
            preferred_direction: BranchDirection::Upwards,
        }
    }

    #[test]
    fn solution_value_respects_lp_flag() {
        let var = var_with_stats();
        assert_eq!(var.solution_value(true), 1.5);
        assert_eq!(var.solution_value(false), 3.0);
    }

    #[test]
    fn pseudocost_picks_direction_from_delta_sign() {
        let var = var_with_stats();
        assert_eq!(var.pseudocost(0.5), 2.0);
        assert_eq!(var.pseudocost(-0.5), 4.0);
        assert_eq!(var.pseudocost(0.0), 0.0);
    }

    #[test]
    fn avg_inferences_per_direction() {
        let var = var_with_stats();
        assert_eq!(var.avg_inferences(BranchDirection::Upwards), 6.0);
        assert_eq!(var.avg_inferences(BranchDirection::Downwards), 2.0);
        assert_eq!(var.avg_inferences(BranchDirection::Auto), 0.0);
    }

    #[test]
    fn default_has_no_preference() {
        let var = Variable::default();
        assert_eq!(var.preferred_direction, BranchDirection::Auto);
        assert_eq!(var.column.n_nonzeros, 0);
    }
}
