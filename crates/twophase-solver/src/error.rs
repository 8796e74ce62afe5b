use thiserror::Error;

/// Size-invariant violations detected before any simplex phase runs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedProblem {
    #[error("right-hand side has {rhs} entries but the matrix has {rows} rows")]
    RhsLength { rows: usize, rhs: usize },
    #[error("matrix row {row} has {got} entries, expected {expected}")]
    RowLength {
        row: usize,
        got: usize,
        expected: usize,
    },
}
