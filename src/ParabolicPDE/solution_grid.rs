//! Field values on the mesh: row i is the time level t_i, column j the node x_j.
use super::mesh_planner::MeshPlan;
use nalgebra::{DMatrix, DVector};

#[derive(Debug, Clone, PartialEq)]
pub struct SolutionGrid {
    pub values: DMatrix<f64>,
    pub mesh: MeshPlan,
}

impl SolutionGrid {
    /// k × n grid of zeros
    pub fn zeros(mesh: MeshPlan) -> Self {
        Self {
            values: DMatrix::zeros(mesh.k, mesh.n),
            mesh,
        }
    }

    /// Evaluate `f(x, t)` on every node of the mesh
    pub fn from_fn<F>(mesh: MeshPlan, f: F) -> Self
    where
        F: Fn(f64, f64) -> f64,
    {
        let values = DMatrix::from_fn(mesh.k, mesh.n, |i, j| f(mesh.x(j), mesh.t(i)));
        Self { values, mesh }
    }

    pub fn levels(&self) -> usize {
        self.values.nrows()
    }

    pub fn nodes(&self) -> usize {
        self.values.ncols()
    }

    /// Values of time level i
    pub fn line(&self, i: usize) -> Vec<f64> {
        self.values.row(i).iter().copied().collect()
    }

    pub fn set_line(&mut self, i: usize, line: &DVector<f64>) {
        self.values.set_row(i, &line.transpose());
    }

    pub fn x_coordinates(&self) -> Vec<f64> {
        (0..self.nodes()).map(|j| self.mesh.x(j)).collect()
    }

    pub fn t_coordinates(&self) -> Vec<f64> {
        (0..self.levels()).map(|i| self.mesh.t(i)).collect()
    }

    pub fn max_abs(&self) -> f64 {
        self.values.iter().fold(0.0, |acc: f64, v| acc.max(v.abs()))
    }

    /// Largest |value| of each time level
    pub fn max_abs_per_level(&self) -> Vec<f64> {
        self.values
            .row_iter()
            .map(|row| row.iter().fold(0.0, |acc: f64, v| acc.max(v.abs())))
            .collect()
    }

    /// `(t, u)` pairs at the node closest to x = l0 + rate·(l1 - l0), rate in [0, 1]
    pub fn time_series_at(&self, rate: f64) -> Vec<(f64, f64)> {
        let j = nearest_index(rate, self.nodes());
        (0..self.levels())
            .map(|i| (self.mesh.t(i), self.values[(i, j)]))
            .collect()
    }

    /// `(x, u)` pairs on the level closest to t = rate·T, rate in [0, 1]
    pub fn profile_at(&self, rate: f64) -> Vec<(f64, f64)> {
        let i = nearest_index(rate, self.levels());
        (0..self.nodes())
            .map(|j| (self.mesh.x(j), self.values[(i, j)]))
            .collect()
    }

    /// Rows as nested vectors, level by level
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.levels()).map(|i| self.line(i)).collect()
    }
}

fn nearest_index(rate: f64, count: usize) -> usize {
    let rate = rate.clamp(0.0, 1.0);
    ((rate * (count - 1) as f64).round() as usize).min(count - 1)
}
