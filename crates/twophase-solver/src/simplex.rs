use crate::error::MalformedProblem;
use crate::problem::StandardLp;
use crate::solution::{Optimum, Solution};
use crate::tableau::{EPS, WorkingState};
use crate::trace::{Phase, PivotRecord, Trace};

/// Feasible starting point handed from phase one to phase two.
struct FeasibleStart {
    matrix: Vec<Vec<f64>>,
    rhs: Vec<f64>,
    basis: Vec<usize>,
    dropped: Vec<usize>,
}

/// Two-phase primal simplex solver.
///
/// Pivot selection follows Bland's rule in both phases: the entering column
/// is the smallest index with a negative reduced cost, and ratio-test ties
/// break toward the smallest row index. For a fixed problem the pivot
/// sequence is fully deterministic.
pub struct Solver<'t> {
    trace: Option<&'t mut dyn Trace>,
}

impl Default for Solver<'_> {
    fn default() -> Self {
        Self { trace: None }
    }
}

impl<'t> Solver<'t> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach an observer that sees every pivot and phase boundary.
    pub fn with_trace(mut self, trace: &'t mut dyn Trace) -> Self {
        self.trace = Some(trace);
        self
    }

    /// Run both phases on `problem`.
    pub fn solve(mut self, problem: &StandardLp) -> Result<Solution, MalformedProblem> {
        problem.validate()?;
        let mut pivots = 0;
        match self.phase_one(problem, &mut pivots) {
            Some(start) => Ok(self.phase_two(problem, start, &mut pivots)),
            None => Ok(Solution::Infeasible),
        }
    }

    /// Build and solve the auxiliary feasibility problem. Returns `None`
    /// when the original problem is infeasible.
    fn phase_one(&mut self, problem: &StandardLp, pivots: &mut usize) -> Option<FeasibleStart> {
        let m = problem.num_constraints();
        let n = problem.num_variables();
        let width = n + m;

        // Augment [A | I] with one artificial column per row; rows with a
        // negative right-hand side are negated wholesale, identity block
        // included.
        let mut matrix = Vec::with_capacity(m);
        let mut rhs = Vec::with_capacity(m);
        for (i, row) in problem.a.iter().enumerate() {
            let sign = if problem.b[i] < 0.0 { -1.0 } else { 1.0 };
            let mut aug: Vec<f64> = row.iter().map(|&x| sign * x).collect();
            aug.extend((0..m).map(|k| if k == i { sign } else { 0.0 }));
            matrix.push(aug);
            rhs.push(sign * problem.b[i]);
        }

        // Auxiliary costs are 0 on the original columns and 1 on the
        // artificials, so r_aux = c_aux minus the sum of all rows.
        let mut reduced = vec![0.0; width];
        for (j, r) in reduced.iter_mut().enumerate() {
            let col_sum: f64 = matrix.iter().map(|row| row[j]).sum();
            *r = if j < n { -col_sum } else { 1.0 - col_sum };
        }
        let obj = -rhs.iter().sum::<f64>();

        let mut state = WorkingState {
            matrix,
            rhs,
            reduced,
            obj,
            basis: (n..width).collect(),
        };
        if let Some(trace) = self.trace.as_deref_mut() {
            trace.phase_started(Phase::One, state.view());
        }

        while let Some(enter) = state.entering(EPS) {
            let Some(leave) = state.leaving(enter) else {
                // The artificial identity guarantees a bounded ratio here.
                unreachable!("phase one ratio test found no eligible row");
            };
            self.exchange(&mut state, enter, leave, pivots);
        }

        if state.obj.abs() >= EPS {
            return None;
        }

        // Drive out any artificial still in the basis. A row whose original
        // columns are all zero is a redundant constraint and is deleted;
        // otherwise pivot on its first nonzero original column.
        let mut dropped = Vec::new();
        let mut i = 0;
        while i < state.basis.len() {
            if state.basis[i] < n {
                i += 1;
                continue;
            }
            match state.matrix[i][..n].iter().position(|&x| x.abs() > EPS) {
                Some(enter) => {
                    self.exchange(&mut state, enter, i, pivots);
                    i += 1;
                }
                None => {
                    state.matrix.remove(i);
                    state.rhs.remove(i);
                    state.basis.remove(i);
                    let original = i + dropped.len();
                    dropped.push(original);
                    if let Some(trace) = self.trace.as_deref_mut() {
                        trace.row_dropped(original);
                    }
                }
            }
        }

        for row in &mut state.matrix {
            row.truncate(n);
        }
        Some(FeasibleStart {
            matrix: state.matrix,
            rhs: state.rhs,
            basis: state.basis,
            dropped,
        })
    }

    /// Pivot the original problem to optimality starting from the feasible
    /// basis produced by phase one.
    fn phase_two(
        &mut self,
        problem: &StandardLp,
        start: FeasibleStart,
        pivots: &mut usize,
    ) -> Solution {
        let n = problem.num_variables();
        let FeasibleStart {
            matrix,
            rhs,
            basis,
            dropped,
        } = start;

        let obj = -basis
            .iter()
            .zip(&rhs)
            .map(|(&j, &bi)| problem.c[j] * bi)
            .sum::<f64>();
        let mut reduced = problem.c.clone();
        for (i, &bj) in basis.iter().enumerate() {
            let cb = problem.c[bj];
            for (j, r) in reduced.iter_mut().enumerate() {
                *r -= cb * matrix[i][j];
            }
        }

        // Anchor the basis before any phase-two pivot; dual values are read
        // from these columns at termination.
        let anchors = basis.clone();

        let mut state = WorkingState {
            matrix,
            rhs,
            reduced,
            obj,
            basis,
        };
        if let Some(trace) = self.trace.as_deref_mut() {
            trace.phase_started(Phase::Two, state.view());
        }

        while let Some(enter) = state.entering(0.0) {
            let Some(leave) = state.leaving(enter) else {
                return Solution::Unbounded;
            };
            self.exchange(&mut state, enter, leave, pivots);
        }

        let mut values = vec![0.0; n];
        for (i, &j) in state.basis.iter().enumerate() {
            values[j] = state.rhs[i];
        }
        Solution::Optimal(Optimum::new(
            values,
            -state.obj,
            *pivots,
            dropped,
            state.reduced,
            anchors,
        ))
    }

    fn exchange(&mut self, state: &mut WorkingState, enter: usize, leave: usize, pivots: &mut usize) {
        let leaving = state.basis[leave];
        state.pivot(enter, leave);
        *pivots += 1;
        if let Some(trace) = self.trace.as_deref_mut() {
            trace.pivoted(
                PivotRecord {
                    count: *pivots,
                    entering: enter,
                    leaving,
                },
                state.view(),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::TableauView;

    fn solve(a: Vec<Vec<f64>>, b: Vec<f64>, c: Vec<f64>) -> Solution {
        let lp = StandardLp::new(a, b, c).unwrap();
        Solver::new().solve(&lp).unwrap()
    }

    fn assert_close(got: &[f64], want: &[f64]) {
        assert_eq!(got.len(), want.len(), "got {:?}, want {:?}", got, want);
        for (g, w) in got.iter().zip(want) {
            assert!((g - w).abs() < 1e-9, "got {:?}, want {:?}", got, want);
        }
    }

    #[derive(Default)]
    struct Recorder {
        phases: Vec<Phase>,
        pivots: Vec<(usize, usize)>,
        dropped: Vec<usize>,
    }

    impl Trace for Recorder {
        fn phase_started(&mut self, phase: Phase, _view: TableauView<'_>) {
            self.phases.push(phase);
        }
        fn pivoted(&mut self, record: PivotRecord, _view: TableauView<'_>) {
            self.pivots.push((record.entering, record.leaving));
        }
        fn row_dropped(&mut self, row: usize) {
            self.dropped.push(row);
        }
    }

    /// Checks the per-pivot tableau invariants from every snapshot.
    struct InvariantCheck;

    impl Trace for InvariantCheck {
        fn pivoted(&mut self, _record: PivotRecord, view: TableauView<'_>) {
            assert!(
                view.rhs.iter().all(|&b| b >= -EPS),
                "rhs went negative: {:?}",
                view.rhs
            );
            for (i, &x) in view.basis.iter().enumerate() {
                assert!(
                    !view.basis[i + 1..].contains(&x),
                    "duplicate basis index {} in {:?}",
                    x,
                    view.basis
                );
            }
            // The matrix restricted to basis columns is the identity.
            for (i, &col) in view.basis.iter().enumerate() {
                for (r, row) in view.matrix.iter().enumerate() {
                    let expected = if r == i { 1.0 } else { 0.0 };
                    assert!(
                        (row[col] - expected).abs() < 1e-9,
                        "basis column {} not canonical in row {}",
                        col,
                        r
                    );
                }
            }
        }
    }

    // maximize 2x1 + 3x2 subject to x1 + x2 <= 4, x1 + 3x2 <= 6, posed in
    // standard form with slacks x3, x4 and a negated cost vector.
    // Hand-checked optimum: x = (3, 1, 0, 0), objective -9.
    #[test]
    fn test_textbook_optimum() {
        let solution = solve(
            vec![vec![1.0, 1.0, 1.0, 0.0], vec![1.0, 3.0, 0.0, 1.0]],
            vec![4.0, 6.0],
            vec![-2.0, -3.0, 0.0, 0.0],
        );
        let opt = solution.optimum().expect("optimal");
        assert_close(&opt.values, &[3.0, 1.0, 0.0, 0.0]);
        assert!((opt.objective + 9.0).abs() < 1e-9);
        assert_close(opt.reduced_costs(), &[0.0, 0.0, 1.5, 0.5]);
        assert_eq!(opt.pivots, 2);
        assert!(opt.dropped_rows.is_empty());
        // The structural variables were basic when phase two began, so
        // their zero reduced costs are what the anchors see.
        assert_close(&opt.duals(), &[0.0, 0.0]);
    }

    #[test]
    fn test_negated_row_matches_unflipped() {
        let plain = solve(
            vec![vec![1.0, 1.0, 1.0, 0.0], vec![1.0, 3.0, 0.0, 1.0]],
            vec![4.0, 6.0],
            vec![-2.0, -3.0, 0.0, 0.0],
        );
        // Same feasible region with the first row multiplied by -1.
        let flipped = solve(
            vec![vec![-1.0, -1.0, -1.0, 0.0], vec![1.0, 3.0, 0.0, 1.0]],
            vec![-4.0, 6.0],
            vec![-2.0, -3.0, 0.0, 0.0],
        );
        let plain = plain.optimum().expect("optimal");
        let flipped = flipped.optimum().expect("optimal");
        assert_close(&flipped.values, &plain.values);
        assert!((flipped.objective - plain.objective).abs() < 1e-9);
        assert_eq!(flipped.pivots, plain.pivots);
    }

    #[test]
    fn test_redundant_row_dropped() {
        // Second row is twice the first; phase-one cleanup must delete it
        // and phase two runs on a single constraint.
        let solution = solve(
            vec![vec![1.0, 1.0], vec![2.0, 2.0]],
            vec![2.0, 4.0],
            vec![1.0, 0.0],
        );
        let opt = solution.optimum().expect("optimal");
        assert_close(&opt.values, &[0.0, 2.0]);
        assert!(opt.objective.abs() < 1e-9);
        assert_eq!(opt.dropped_rows, vec![1]);
        // One dual per surviving constraint.
        assert_eq!(opt.duals().len(), 1);
        assert_close(&opt.duals(), &[-1.0]);
    }

    #[test]
    fn test_artificial_pivoted_out_in_cleanup() {
        // x1 = 1, x2 = 1, x1 + x2 - x3 = 2 forces x3 = 0; the third row's
        // artificial survives the phase-one loop at level zero and must be
        // pivoted out through the x3 column rather than dropped.
        let solution = solve(
            vec![
                vec![1.0, 0.0, 0.0],
                vec![0.0, 1.0, 0.0],
                vec![1.0, 1.0, -1.0],
            ],
            vec![1.0, 1.0, 2.0],
            vec![0.0, 0.0, 1.0],
        );
        let opt = solution.optimum().expect("optimal");
        assert_close(&opt.values, &[1.0, 1.0, 0.0]);
        assert!(opt.objective.abs() < 1e-9);
        assert_eq!(opt.pivots, 3);
        assert!(opt.dropped_rows.is_empty());
    }

    #[test]
    fn test_unbounded() {
        // x1 - x2 = 1 lets x1 grow without bound while c rewards it.
        let solution = solve(vec![vec![1.0, -1.0]], vec![1.0], vec![-1.0, 0.0]);
        assert_eq!(solution, Solution::Unbounded);
    }

    #[test]
    fn test_infeasible() {
        // x1 >= 5 and x1 <= 2 in standard form: x1 - x2 = 5, x1 + x3 = 2.
        let solution = solve(
            vec![vec![1.0, -1.0, 0.0], vec![1.0, 0.0, 1.0]],
            vec![5.0, 2.0],
            vec![0.0, 0.0, 0.0],
        );
        assert_eq!(solution, Solution::Infeasible);
    }

    #[test]
    fn test_no_constraints() {
        let solution = solve(Vec::new(), Vec::new(), vec![1.0, 2.0]);
        let opt = solution.optimum().expect("optimal");
        assert_close(&opt.values, &[0.0, 0.0]);
        assert_eq!(opt.pivots, 0);

        let solution = solve(Vec::new(), Vec::new(), vec![-1.0, 0.0]);
        assert_eq!(solution, Solution::Unbounded);
    }

    // Beale's cycling example; Bland's rule must terminate it. Standard
    // form with slacks x5..x7. Optimal value is -1/20.
    #[test]
    fn test_degenerate_cycling_example_terminates() {
        let a = vec![
            vec![0.25, -60.0, -0.04, 9.0, 1.0, 0.0, 0.0],
            vec![0.5, -90.0, -0.02, 3.0, 0.0, 1.0, 0.0],
            vec![0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
        ];
        let b = vec![0.0, 0.0, 1.0];
        let c = vec![-0.75, 150.0, -0.02, 6.0, 0.0, 0.0, 0.0];
        let lp = StandardLp::new(a.clone(), b.clone(), c.clone()).unwrap();
        let mut check = InvariantCheck;
        let solution = Solver::new().with_trace(&mut check).solve(&lp).unwrap();
        let opt = solution.optimum().expect("optimal");
        assert!((opt.objective + 0.05).abs() < 1e-9);
        // Optimality certificate and primal feasibility.
        assert!(opt.reduced_costs().iter().all(|&r| r >= -EPS));
        assert!(opt.values.iter().all(|&x| x >= -EPS));
        for (row, &bi) in a.iter().zip(&b) {
            let lhs: f64 = row.iter().zip(&opt.values).map(|(aij, xj)| aij * xj).sum();
            assert!((lhs - bi).abs() < 1e-9);
        }
    }

    #[test]
    fn test_pivot_sequence_is_deterministic() {
        let a = vec![vec![1.0, 1.0, 1.0, 0.0], vec![1.0, 3.0, 0.0, 1.0]];
        let b = vec![4.0, 6.0];
        let c = vec![-2.0, -3.0, 0.0, 0.0];
        let lp = StandardLp::new(a, b, c).unwrap();

        let mut first = Recorder::default();
        let one = Solver::new().with_trace(&mut first).solve(&lp).unwrap();
        let mut second = Recorder::default();
        let two = Solver::new().with_trace(&mut second).solve(&lp).unwrap();

        assert!(!first.pivots.is_empty());
        assert_eq!(first.pivots, second.pivots);
        assert_eq!(first.phases, vec![Phase::One, Phase::Two]);
        assert_eq!(one, two);
    }

    #[test]
    fn test_trace_does_not_affect_result() {
        let lp = StandardLp::new(
            vec![vec![1.0, 1.0], vec![2.0, 2.0]],
            vec![2.0, 4.0],
            vec![1.0, 0.0],
        )
        .unwrap();
        let mut recorder = Recorder::default();
        let traced = Solver::new().with_trace(&mut recorder).solve(&lp).unwrap();
        let silent = Solver::new().solve(&lp).unwrap();
        assert_eq!(traced, silent);
        assert_eq!(recorder.dropped, vec![1]);
    }

    #[test]
    fn test_duals_are_idempotent() {
        let solution = solve(
            vec![vec![1.0, 1.0, 1.0, 0.0], vec![1.0, 3.0, 0.0, 1.0]],
            vec![4.0, 6.0],
            vec![-2.0, -3.0, 0.0, 0.0],
        );
        let opt = solution.optimum().expect("optimal");
        assert_eq!(opt.duals(), opt.duals());
    }

    #[test]
    fn test_malformed_problem_rejected_before_solving() {
        // The fields are public, so a size mismatch can be introduced after
        // construction; solve must still catch it.
        let lp = StandardLp {
            a: vec![vec![1.0, 2.0]],
            b: Vec::new(),
            c: vec![1.0, 1.0],
        };
        let err = Solver::new().solve(&lp).unwrap_err();
        assert_eq!(err, MalformedProblem::RhsLength { rows: 1, rhs: 0 });
    }
}
