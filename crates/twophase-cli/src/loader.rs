use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use twophase_solver::{MalformedProblem, StandardLp};

/// Input files every problem folder must contain.
const MANDATORY_FILES: [&str; 3] = ["A.csv", "b.csv", "c.csv"];

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("missing input file {0} (a problem folder needs A.csv, b.csv and c.csv)")]
    Missing(PathBuf),
    #[error("failed to read {file}: {source}")]
    Io {
        file: PathBuf,
        source: std::io::Error,
    },
    #[error("{file}:{line}: invalid number {text:?}")]
    BadNumber {
        file: PathBuf,
        line: usize,
        text: String,
    },
    #[error(transparent)]
    Malformed(#[from] MalformedProblem),
}

/// Load A.csv, b.csv and c.csv from `folder` into a validated problem.
pub fn load_dir(folder: &Path) -> Result<StandardLp, LoadError> {
    // Check all mandatory files up front so the first message names the
    // missing piece rather than failing midway through a partial read.
    for name in MANDATORY_FILES {
        let path = folder.join(name);
        if !path.exists() {
            return Err(LoadError::Missing(path));
        }
    }

    let a = read_rows(&folder.join("A.csv"))?;
    let b = read_flat(&folder.join("b.csv"))?;
    let c = read_flat(&folder.join("c.csv"))?;
    Ok(StandardLp::new(a, b, c)?)
}

fn read_to_string(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| LoadError::Io {
        file: path.to_path_buf(),
        source,
    })
}

fn read_rows(path: &Path) -> Result<Vec<Vec<f64>>, LoadError> {
    parse_rows(&read_to_string(path)?, path)
}

/// Vectors may be laid out as a column, a row, or any mix; the values are
/// flattened in reading order.
fn read_flat(path: &Path) -> Result<Vec<f64>, LoadError> {
    Ok(parse_rows(&read_to_string(path)?, path)?
        .into_iter()
        .flatten()
        .collect())
}

/// One row of comma-separated numbers per nonempty line, no header.
fn parse_rows(text: &str, file: &Path) -> Result<Vec<Vec<f64>>, LoadError> {
    let mut rows = Vec::new();
    for (lineno, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let mut row = Vec::new();
        for field in line.split(',') {
            let field = field.trim();
            let value = field.parse::<f64>().map_err(|_| LoadError::BadNumber {
                file: file.to_path_buf(),
                line: lineno + 1,
                text: field.to_string(),
            })?;
            row.push(value);
        }
        rows.push(row);
    }
    Ok(rows)
}
