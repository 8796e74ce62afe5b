mod error;
mod problem;
mod simplex;
mod solution;
mod tableau;
mod trace;

pub use error::MalformedProblem;
pub use problem::StandardLp;
pub use simplex::Solver;
pub use solution::{Optimum, Solution};
pub use trace::{Phase, PivotRecord, TableauView, Trace};
