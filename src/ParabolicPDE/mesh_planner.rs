//! # Mesh planning
//!
//! Resolves the spatial step `h` and time step `tau` from the requested node count `n`,
//! the requested number of time levels `k`, or both, using the Courant ratio
//! `r = a·tau/h²`:
//!
//! | given | h | tau |
//! |-------|---|-----|
//! | n     | (l1 - l0)/(n - 1) | h²·r/a |
//! | k     | sqrt(tau·a/r)     | T/(k - 1) |
//! | n, k  | (l1 - l0)/(n - 1) | T/(k - 1), warning if a·tau/h² > r |
//!
//! When one count is derived, the derived step is snapped so that the last node lies
//! exactly on l1 (or T). Snapping never increases the realized ratio: the derived
//! node count rounds down and the derived level count rounds up.
use super::parabolic_error::ParabolicError;
use log::{info, warn};

/// Default stability ratio of the explicit scheme
pub const DEFAULT_COURANT: f64 = 0.5;
/// Slack for float noise in the number of derived steps
const STEP_SLACK: f64 = 1e-9;

/// What the caller asks for
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshRequest {
    pub n: Option<usize>,
    pub k: Option<usize>,
    pub courant: f64,
}

impl MeshRequest {
    pub fn new(n: Option<usize>, k: Option<usize>, courant: f64) -> Self {
        Self { n, k, courant }
    }
}

/// Mesh of one solve; never changes during the march
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshPlan {
    pub l0: f64,
    pub l1: f64,
    pub t_end: f64,
    pub h: f64,
    pub tau: f64,
    /// spatial nodes
    pub n: usize,
    /// time levels, including t = 0
    pub k: usize,
    /// requested ratio
    pub courant: f64,
    /// a·tau/h² of this mesh
    pub realized_courant: f64,
}

impl MeshPlan {
    pub fn x(&self, j: usize) -> f64 {
        self.l0 + self.h * j as f64
    }

    pub fn t(&self, i: usize) -> f64 {
        self.tau * i as f64
    }

    pub fn violates_courant(&self) -> bool {
        self.realized_courant > self.courant
    }
}

fn check_nodes(n: usize) -> Result<usize, ParabolicError> {
    if n < 3 {
        return Err(ParabolicError::InvalidMesh(format!(
            "at least 3 spatial nodes are needed, got {}",
            n
        )));
    }
    Ok(n)
}

fn check_levels(k: usize) -> Result<usize, ParabolicError> {
    if k < 2 {
        return Err(ParabolicError::InvalidMesh(format!(
            "at least 2 time levels are needed, got {}",
            k
        )));
    }
    Ok(k)
}

/// Plan the mesh on [l0, l1] × [0, t_end] for the diffusion coefficient `a`
pub fn plan_mesh(
    l0: f64,
    l1: f64,
    t_end: f64,
    a: f64,
    request: &MeshRequest,
) -> Result<MeshPlan, ParabolicError> {
    let length = l1 - l0;
    if !(length > 0.0) || !(t_end > 0.0) {
        return Err(ParabolicError::InvalidMesh(format!(
            "domain [{}, {}] x [0, {}] is empty",
            l0, l1, t_end
        )));
    }
    if !(request.courant > 0.0) {
        return Err(ParabolicError::InvalidMesh(format!(
            "Courant ratio must be positive, got {}",
            request.courant
        )));
    }
    let courant = request.courant;
    let (h, tau, n, k) = match (request.n, request.k) {
        (None, None) => return Err(ParabolicError::NoMeshResolution),
        (Some(n), None) => {
            let n = check_nodes(n)?;
            if a == 0.0 {
                return Err(ParabolicError::ZeroDiffusion);
            }
            let h = length / (n - 1) as f64;
            let tau_stable = h * h * courant / a.abs();
            let k = check_levels((t_end / tau_stable - STEP_SLACK).ceil() as usize + 1)?;
            (h, t_end / (k - 1) as f64, n, k)
        }
        (None, Some(k)) => {
            let k = check_levels(k)?;
            if a == 0.0 {
                return Err(ParabolicError::ZeroDiffusion);
            }
            let tau = t_end / (k - 1) as f64;
            let h_stable = (tau * a.abs() / courant).sqrt();
            let n = check_nodes((length / h_stable + STEP_SLACK).floor() as usize + 1)?;
            (length / (n - 1) as f64, tau, n, k)
        }
        (Some(n), Some(k)) => {
            let n = check_nodes(n)?;
            let k = check_levels(k)?;
            (length / (n - 1) as f64, t_end / (k - 1) as f64, n, k)
        }
    };
    let plan = MeshPlan {
        l0,
        l1,
        t_end,
        h,
        tau,
        n,
        k,
        courant,
        realized_courant: a.abs() * tau / (h * h),
    };
    if plan.violates_courant() {
        warn!(
            "tau and h must satisfy Courant condition: resolved {} instead of {}",
            plan.realized_courant, courant
        );
    }
    info!(
        "mesh planned: n = {}, k = {}, h = {:.3e}, tau = {:.3e}",
        n, k, h, tau
    );
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_spatial_only() {
        let plan = plan_mesh(0.0, 1.0, 1.0, 1.0, &MeshRequest::new(Some(11), None, 0.5)).unwrap();
        assert_relative_eq!(plan.h, 0.1);
        // tau = h²·r/a = 0.005 -> 200 intervals
        assert_eq!(plan.k, 201);
        assert_relative_eq!(plan.tau, 0.005, epsilon = 1e-15);
        assert!(!plan.violates_courant());
        assert_relative_eq!(plan.x(10), 1.0);
        assert_relative_eq!(plan.t(plan.k - 1), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_temporal_only() {
        let plan = plan_mesh(0.0, 1.0, 1.0, 2.0, &MeshRequest::new(None, Some(101), 0.5)).unwrap();
        assert_relative_eq!(plan.tau, 0.01);
        // h = sqrt(0.01·2/0.5) = 0.2 -> 5 intervals
        assert_eq!(plan.n, 6);
        assert_relative_eq!(plan.h, 0.2, epsilon = 1e-12);
        assert!(plan.realized_courant <= 0.5 + 1e-12);
    }

    #[test]
    fn test_both_given_reports_violation() {
        let plan = plan_mesh(0.0, 1.0, 1.0, 1.0, &MeshRequest::new(Some(10), Some(5), 0.4)).unwrap();
        assert_relative_eq!(plan.h, 1.0 / 9.0);
        assert_relative_eq!(plan.tau, 0.25);
        assert_relative_eq!(plan.realized_courant, 20.25, epsilon = 1e-9);
        assert!(plan.violates_courant());
    }

    #[test]
    fn test_failures() {
        assert!(matches!(
            plan_mesh(0.0, 1.0, 1.0, 1.0, &MeshRequest::new(None, None, 0.5)),
            Err(ParabolicError::NoMeshResolution)
        ));
        assert!(matches!(
            plan_mesh(0.0, 1.0, 1.0, 0.0, &MeshRequest::new(Some(10), None, 0.5)),
            Err(ParabolicError::ZeroDiffusion)
        ));
        assert!(matches!(
            plan_mesh(0.0, 1.0, 1.0, 1.0, &MeshRequest::new(Some(2), Some(5), 0.5)),
            Err(ParabolicError::InvalidMesh(_))
        ));
        assert!(matches!(
            plan_mesh(1.0, 1.0, 1.0, 1.0, &MeshRequest::new(Some(5), Some(5), 0.5)),
            Err(ParabolicError::InvalidMesh(_))
        ));
    }
}
