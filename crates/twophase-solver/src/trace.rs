/// Which pivoting loop is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Auxiliary feasibility problem.
    One,
    /// Original problem, starting from the feasible basis.
    Two,
}

/// Read-only snapshot of the working tableau handed to a [`Trace`].
#[derive(Debug, Clone, Copy)]
pub struct TableauView<'a> {
    /// Basic variable index per constraint row.
    pub basis: &'a [usize],
    /// Constraint matrix rows.
    pub matrix: &'a [Vec<f64>],
    /// Right-hand side, one entry per row.
    pub rhs: &'a [f64],
    /// Reduced-cost row.
    pub reduced: &'a [f64],
    /// Running objective accumulator; the negative of the true objective.
    pub objective: f64,
}

/// One basis exchange, as reported after the fact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PivotRecord {
    /// 1-based running count across both phases.
    pub count: usize,
    /// Column index that entered the basis.
    pub entering: usize,
    /// Variable index that left the basis.
    pub leaving: usize,
}

/// Observer for step-by-step solver progress.
///
/// Implementations see borrowed snapshots only; attaching an observer must
/// not change the outcome of a solve.
pub trait Trace {
    /// Called when a phase begins, before any of its pivots.
    fn phase_started(&mut self, _phase: Phase, _view: TableauView<'_>) {}

    /// Called after every pivot, including phase-one cleanup pivots.
    fn pivoted(&mut self, _record: PivotRecord, _view: TableauView<'_>) {}

    /// Called when phase-one cleanup removes a redundant constraint.
    /// `row` is the index of the constraint in the original problem.
    fn row_dropped(&mut self, _row: usize) {}
}
