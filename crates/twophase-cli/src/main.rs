mod loader;
mod render;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Instant;
use twophase_solver::{Solution, Solver, StandardLp};

#[derive(Parser)]
#[command(name = "twophase")]
#[command(about = "Two-phase simplex solver for standard-form linear programs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve the problem stored in a folder of A.csv, b.csv and c.csv
    Solve {
        /// Folder containing the input files
        folder: PathBuf,
        /// Print every intermediate tableau
        #[arg(short, long)]
        step: bool,
        /// Show dual variable values
        #[arg(short, long)]
        dual: bool,
    },
    /// Load a problem folder and dump the parsed matrices
    Parse {
        /// Folder containing the input files
        folder: PathBuf,
        /// Output format (json, pretty)
        #[arg(short, long, default_value = "pretty")]
        format: String,
    },
    /// Check a problem folder for errors
    Check {
        /// Folder containing the input files
        folder: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve { folder, step, dual } => {
            let problem = load_or_exit(&folder);
            let mut printer = render::StepPrinter::new();
            let solver = if step {
                Solver::new().with_trace(&mut printer)
            } else {
                Solver::new()
            };

            let start = Instant::now();
            let solution = match solver.solve(&problem) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            };
            let elapsed = start.elapsed().as_secs_f64();

            match solution {
                Solution::Optimal(opt) => {
                    for &row in &opt.dropped_rows {
                        eprintln!(
                            "warning: constraint row {} is redundant and was removed",
                            row + 1
                        );
                    }
                    render::print_optimum(&opt, dual);
                    println!("Run time: {elapsed:.6} seconds");
                }
                Solution::Infeasible => {
                    println!("Status: INFEASIBLE");
                    println!("No point satisfies all constraints.");
                    println!("Run time: {elapsed:.6} seconds");
                    std::process::exit(1);
                }
                Solution::Unbounded => {
                    println!("Status: UNBOUNDED");
                    println!("The objective can decrease without limit.");
                    println!("Run time: {elapsed:.6} seconds");
                    std::process::exit(1);
                }
            }
        }
        Commands::Parse { folder, format } => {
            let problem = load_or_exit(&folder);
            if format == "json" {
                match serde_json::to_string_pretty(&problem) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        eprintln!("Error: {}", e);
                        std::process::exit(1);
                    }
                }
            } else {
                println!("{:#?}", problem);
            }
        }
        Commands::Check { folder } => {
            let problem = load_or_exit(&folder);
            println!("✓ {} is a valid problem", folder.display());
            println!("  {} constraints", problem.num_constraints());
            println!("  {} variables", problem.num_variables());
        }
    }
}

fn load_or_exit(folder: &Path) -> StandardLp {
    match loader::load_dir(folder) {
        Ok(problem) => problem,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
