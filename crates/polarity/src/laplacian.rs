//! Signed Laplacian construction.
//!
//! `L[i][i]` is the number of edges incident to `i`; `L[i][j]` is minus the summed sign weight of
//! the edges between `i` and `j`. Parallel edges accumulate.

use nalgebra::DMatrix;

use crate::error::{Error, Result};
use crate::graph::Edge;

#[derive(Debug, Clone, PartialEq)]
pub struct SignedLaplacian {
    matrix: DMatrix<f64>,
}

impl SignedLaplacian {
    pub fn build(node_count: usize, edges: &[Edge]) -> Result<Self> {
        let mut m = DMatrix::<f64>::zeros(node_count, node_count);

        for e in edges {
            let (s, t) = (e.source, e.target);
            if s >= node_count || t >= node_count {
                return Err(Error::invariant(format!(
                    "edge {} references node outside 0..{node_count} ({s} -> {t})",
                    e.id
                )));
            }

            // Self-loops only contribute to the degree.
            if s != t {
                let w = e.sign.weight();
                m[(s, t)] -= w;
                m[(t, s)] -= w;
            }
            m[(s, s)] += 1.0;
            m[(t, t)] += 1.0;
        }

        Ok(Self { matrix: m })
    }

    /// Wraps an existing matrix after checking it is square and exactly symmetric.
    pub fn from_matrix(matrix: DMatrix<f64>) -> Result<Self> {
        validate(&matrix)?;
        Ok(Self { matrix })
    }

    pub fn dim(&self) -> usize {
        self.matrix.nrows()
    }

    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.matrix
    }

    pub fn degree(&self, node: usize) -> f64 {
        self.matrix[(node, node)]
    }

    /// Row-major copy, for JSON output.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.matrix
            .row_iter()
            .map(|row| row.iter().copied().collect())
            .collect()
    }
}

pub fn validate(matrix: &DMatrix<f64>) -> Result<()> {
    let (rows, cols) = matrix.shape();
    if rows != cols {
        return Err(Error::invariant(format!(
            "laplacian must be square, got {rows}x{cols}"
        )));
    }
    for i in 0..rows {
        for j in (i + 1)..cols {
            if matrix[(i, j)] != matrix[(j, i)] {
                return Err(Error::invariant(format!(
                    "laplacian is not symmetric at ({i}, {j})"
                )));
            }
        }
    }
    Ok(())
}
