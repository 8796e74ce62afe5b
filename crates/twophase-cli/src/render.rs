use twophase_solver::{Optimum, Phase, PivotRecord, TableauView, Trace};

const RULE: &str = "---------------------------------------------";

/// Prints every intermediate tableau as the solver visits it: column
/// headers, one basis-labelled line per constraint row, and the
/// reduced-cost line with the running objective cell.
#[derive(Default)]
pub struct StepPrinter;

impl StepPrinter {
    pub fn new() -> Self {
        Self
    }

    fn print_tableau(&self, view: &TableauView<'_>) {
        println!("{RULE}");
        print!("{:<8}", "");
        for j in 0..view.reduced.len() {
            print!("{:<12}", format!("x_{}", j + 1));
        }
        println!("b");
        for (i, row) in view.matrix.iter().enumerate() {
            print!("x_{:<6}", view.basis[i] + 1);
            for value in row {
                print!("{value:<12.4}");
            }
            println!("{:<12.4}", view.rhs[i]);
        }
        print!("{:<8}", "r");
        for value in view.reduced {
            print!("{value:<12.4}");
        }
        println!("{:<12.4}", view.objective);
        println!("{RULE}");
    }
}

impl Trace for StepPrinter {
    fn phase_started(&mut self, phase: Phase, view: TableauView<'_>) {
        println!("{RULE}");
        match phase {
            Phase::One => println!("- Starting phase ONE"),
            Phase::Two => println!("- Starting phase TWO"),
        }
        self.print_tableau(&view);
    }

    fn pivoted(&mut self, record: PivotRecord, view: TableauView<'_>) {
        println!(
            "-- pivot {}: x_{} enters, x_{} leaves",
            record.count,
            record.entering + 1,
            record.leaving + 1
        );
        self.print_tableau(&view);
    }

    fn row_dropped(&mut self, row: usize) {
        println!("-- constraint row {} is redundant, dropping it", row + 1);
    }
}

/// Final report for an optimal solve, 1-based variable numbering.
pub fn print_optimum(opt: &Optimum, dual: bool) {
    println!("Status: OPTIMAL");
    println!("Objective value: {:.4}", opt.objective);
    println!();
    println!("Variables:");
    for (i, value) in opt.values.iter().enumerate() {
        println!("  x_{:<4} = {value:.4}", i + 1);
    }
    if dual {
        println!();
        println!("Dual values:");
        for (i, value) in opt.duals().iter().enumerate() {
            println!("  d_{:<4} = {value:.4}", i + 1);
        }
    }
    println!();
    println!("Total pivots: {}", opt.pivots);
}
