/// Terminal outcome of a solve.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum Solution {
    /// An optimal basic solution was found.
    Optimal(Optimum),
    /// Phase one could not drive the auxiliary objective to zero.
    Infeasible,
    /// Phase two found an improving direction with no blocking row.
    Unbounded,
}

impl Solution {
    pub fn optimum(&self) -> Option<&Optimum> {
        match self {
            Solution::Optimal(opt) => Some(opt),
            _ => None,
        }
    }
}

/// An optimal solution together with the terminal tableau data needed for
/// reporting.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Optimum {
    /// Optimal value for each original variable.
    pub values: Vec<f64>,
    /// Objective value c'x at the optimum.
    pub objective: f64,
    /// Number of basis exchanges performed across both phases.
    pub pivots: usize,
    /// Original indices of constraint rows dropped as redundant during
    /// phase-one cleanup.
    pub dropped_rows: Vec<usize>,
    reduced: Vec<f64>,
    anchors: Vec<usize>,
}

impl Optimum {
    pub(crate) fn new(
        values: Vec<f64>,
        objective: f64,
        pivots: usize,
        dropped_rows: Vec<usize>,
        reduced: Vec<f64>,
        anchors: Vec<usize>,
    ) -> Self {
        Self {
            values,
            objective,
            pivots,
            dropped_rows,
            reduced,
            anchors,
        }
    }

    /// Final reduced-cost row; nonnegative everywhere at optimality.
    pub fn reduced_costs(&self) -> &[f64] {
        &self.reduced
    }

    /// Dual value per surviving constraint, read off the reduced costs of
    /// the variables that were basic when phase two began.
    pub fn duals(&self) -> Vec<f64> {
        self.anchors.iter().map(|&j| -self.reduced[j]).collect()
    }
}
