//! Closed-form solution sampled on the solve mesh, and the pointwise error grid.
use super::mesh_planner::MeshPlan;
use super::solution_grid::SolutionGrid;

/// u_exact(x_j, t_i) for every node of `mesh`
pub fn sample_analytic<F>(mesh: MeshPlan, analytic: F) -> SolutionGrid
where
    F: Fn(f64, f64) -> f64,
{
    SolutionGrid::from_fn(mesh, analytic)
}

/// analytic - numerical, element by element; both grids must share the mesh
pub fn error_grid(analytic: &SolutionGrid, numerical: &SolutionGrid) -> SolutionGrid {
    SolutionGrid {
        values: &analytic.values - &numerical.values,
        mesh: numerical.mesh,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ParabolicPDE::mesh_planner::{MeshRequest, plan_mesh};
    use approx::assert_relative_eq;

    #[test]
    fn test_error_sign_and_shape() {
        let mesh = plan_mesh(0.0, 1.0, 1.0, 1.0, &MeshRequest::new(Some(4), Some(3), 0.5)).unwrap();
        let exact = sample_analytic(mesh, |x, t| x + t);
        let numerical = SolutionGrid::from_fn(mesh, |x, t| x + t - 0.25);
        let error = error_grid(&exact, &numerical);
        assert_eq!(error.values.shape(), (3, 4));
        for value in error.values.iter() {
            assert_relative_eq!(*value, 0.25, epsilon = 1e-15);
        }
    }
}
