use crate::error::MalformedProblem;

/// A linear program in standard equality form:
/// minimize c'x subject to Ax = b, x >= 0.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct StandardLp {
    /// Constraint matrix, one inner vector per row
    pub a: Vec<Vec<f64>>,
    /// Right-hand side, one entry per constraint
    pub b: Vec<f64>,
    /// Cost coefficients, one entry per variable
    pub c: Vec<f64>,
}

impl StandardLp {
    pub fn new(a: Vec<Vec<f64>>, b: Vec<f64>, c: Vec<f64>) -> Result<Self, MalformedProblem> {
        let lp = Self { a, b, c };
        lp.validate()?;
        Ok(lp)
    }

    /// Check the size invariants: one rhs entry per matrix row, one cost
    /// coefficient per matrix column. The fields are public, so the solver
    /// re-checks this at its entry point.
    pub fn validate(&self) -> Result<(), MalformedProblem> {
        if self.b.len() != self.a.len() {
            return Err(MalformedProblem::RhsLength {
                rows: self.a.len(),
                rhs: self.b.len(),
            });
        }
        for (row, coeffs) in self.a.iter().enumerate() {
            if coeffs.len() != self.c.len() {
                return Err(MalformedProblem::RowLength {
                    row,
                    got: coeffs.len(),
                    expected: self.c.len(),
                });
            }
        }
        Ok(())
    }

    pub fn num_constraints(&self) -> usize {
        self.a.len()
    }

    pub fn num_variables(&self) -> usize {
        self.c.len()
    }
}
