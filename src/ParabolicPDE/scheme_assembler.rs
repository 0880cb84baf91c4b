//! # Scheme assembly
//!
//! ## Interior rows
//! The theta-method for `u_t = a·u_xx + b·u_x + c·u + f` multiplied through by `2h²` reads
//! ```text
//! (-2τθa + hτθb)·u^{k+1}_{j-1} + (2h² + 4τθa - 2h²τθc)·u^{k+1}_j + (-2τθa - hτθb)·u^{k+1}_{j+1}
//!   = (2τθ'a - hτθ'b)·u^k_{j-1} + (2h² - 4τθ'a + 2h²τθ'c)·u^k_j + (2τθ'a + hτθ'b)·u^k_{j+1}
//!   + 2h²τθ·f(x_j, t_{k+1}) + 2h²τθ'·f(x_j, t_k),          θ' = 1 - θ
//! ```
//!
//! ## Boundary rows
//! With the condition `alpha·u_x + beta·u = φ(t)`:
//!
//! | approximation | left row (nodes 0, 1, 2) | rhs |
//! |---------------|--------------------------|-----|
//! | alpha = 0 | u_0 | φ/beta |
//! | two-point first order | (hβ - α)·u_0 + α·u_1 | h·φ |
//! | three-point second order | (2hβ - 3α)·u_0 + 4α·u_1 - α·u_2 | 2h·φ |
//! | two-point second order | interior template at node 0 with the ghost `u_{-1} = u_1 + (2hβ/α)·u_0 - (2h/α)·φ` | both time levels |
//!
//! The right end mirrors the nodes (n-1, n-2, n-3) and flips the sign of the
//! first-derivative terms.
use super::band_solver::BandRow;
use super::boundary_condition::BoundCondition;
use super::mesh_planner::MeshPlan;
use super::parabolic_error::{BoundarySide, ParabolicError};
use super::parabolic_task::BoundProblem;
use super::pde_constants::PdeConstants;
use super::scheme::{BoundaryApproximation, Scheme};

/// Coefficients of the interior template; `new_*` act on the level being solved,
/// `old_*` on the known level
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StencilCoefficients {
    pub new_lower: f64,
    pub new_center: f64,
    pub new_upper: f64,
    pub old_lower: f64,
    pub old_center: f64,
    pub old_upper: f64,
    pub source_new: f64,
    pub source_old: f64,
}

impl StencilCoefficients {
    pub fn theta_method(h: f64, tau: f64, theta: f64, constants: &PdeConstants) -> Self {
        let PdeConstants { a, b, c } = *constants;
        let h2 = h * h;
        let th = theta;
        let te = 1.0 - theta;
        Self {
            new_lower: -2.0 * tau * th * a + h * tau * th * b,
            new_center: 2.0 * h2 + 4.0 * tau * th * a - 2.0 * h2 * tau * th * c,
            new_upper: -2.0 * tau * th * a - h * tau * th * b,
            old_lower: 2.0 * tau * te * a - h * tau * te * b,
            old_center: 2.0 * h2 - 4.0 * tau * te * a + 2.0 * h2 * tau * te * c,
            old_upper: 2.0 * tau * te * a + h * tau * te * b,
            source_new: 2.0 * h2 * tau * th,
            source_old: 2.0 * h2 * tau * te,
        }
    }

    /// Row j, 1 <= j <= n - 2, given the previous line and the source at both time levels
    pub fn interior_row(
        &self,
        previous: &[f64],
        j: usize,
        f_new: f64,
        f_old: f64,
    ) -> BandRow {
        BandRow {
            sub: self.new_lower,
            diag: self.new_center,
            sup: self.new_upper,
            far: 0.0,
            rhs: self.old_lower * previous[j - 1]
                + self.old_center * previous[j]
                + self.old_upper * previous[j + 1]
                + self.source_new * f_new
                + self.source_old * f_old,
        }
    }
}

/// Coefficients of a boundary row. `boundary` sits on the end node, `neighbor` one
/// node inside, `far` two nodes inside (off the tridiagonal band).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundaryRowTemplate {
    pub boundary: f64,
    pub neighbor: f64,
    pub far: f64,
    pub old_boundary: f64,
    pub old_neighbor: f64,
    pub value_new: f64,
    pub value_old: f64,
    pub source_new: f64,
    pub source_old: f64,
}

/// Row of a Dirichlet end: `u = φ/beta`
pub fn dirichlet_template(
    side: BoundarySide,
    beta: f64,
) -> Result<BoundaryRowTemplate, ParabolicError> {
    if beta == 0.0 {
        return Err(ParabolicError::DegenerateBoundary { side });
    }
    Ok(BoundaryRowTemplate {
        boundary: 1.0,
        value_new: 1.0 / beta,
        ..Default::default()
    })
}

/// Two-point second order row: the interior template applied at the end node with
/// the ghost node replaced through the Robin relation
pub fn ghost_node_template(
    side: BoundarySide,
    alpha: f64,
    beta: f64,
    h: f64,
    stencil: &StencilCoefficients,
) -> Result<BoundaryRowTemplate, ParabolicError> {
    if alpha == 0.0 {
        return Err(ParabolicError::ZeroAlphaGhostNode { side });
    }
    let s = stencil;
    let value_factor = 2.0 * h / alpha;
    let beta_factor = 2.0 * h * beta / alpha;
    let template = match side {
        BoundarySide::Left => BoundaryRowTemplate {
            boundary: s.new_center + s.new_lower * beta_factor,
            neighbor: s.new_upper + s.new_lower,
            far: 0.0,
            old_boundary: s.old_center + s.old_lower * beta_factor,
            old_neighbor: s.old_upper + s.old_lower,
            value_new: s.new_lower * value_factor,
            value_old: -s.old_lower * value_factor,
            source_new: s.source_new,
            source_old: s.source_old,
        },
        BoundarySide::Right => BoundaryRowTemplate {
            boundary: s.new_center - s.new_upper * beta_factor,
            neighbor: s.new_lower + s.new_upper,
            far: 0.0,
            old_boundary: s.old_center - s.old_upper * beta_factor,
            old_neighbor: s.old_lower + s.old_upper,
            value_new: -s.new_upper * value_factor,
            value_old: s.old_upper * value_factor,
            source_new: s.source_new,
            source_old: s.source_old,
        },
    };
    Ok(template)
}

/// Template of the boundary row at `side`; alpha = 0 always routes to the Dirichlet row
pub fn boundary_template(
    side: BoundarySide,
    condition: &BoundCondition,
    approximation: BoundaryApproximation,
    h: f64,
    stencil: &StencilCoefficients,
) -> Result<BoundaryRowTemplate, ParabolicError> {
    let (alpha, beta) = (condition.alpha, condition.beta);
    if alpha == 0.0 {
        return dirichlet_template(side, beta);
    }
    // sign of the one-sided derivative: forward at the left end, backward at the right
    let template = match (approximation, side) {
        (BoundaryApproximation::TwoPointFirstOrder, BoundarySide::Left) => BoundaryRowTemplate {
            boundary: h * beta - alpha,
            neighbor: alpha,
            value_new: h,
            ..Default::default()
        },
        (BoundaryApproximation::TwoPointFirstOrder, BoundarySide::Right) => BoundaryRowTemplate {
            boundary: alpha + h * beta,
            neighbor: -alpha,
            value_new: h,
            ..Default::default()
        },
        (BoundaryApproximation::ThreePointSecondOrder, BoundarySide::Left) => {
            BoundaryRowTemplate {
                boundary: -3.0 * alpha + 2.0 * h * beta,
                neighbor: 4.0 * alpha,
                far: -alpha,
                value_new: 2.0 * h,
                ..Default::default()
            }
        }
        (BoundaryApproximation::ThreePointSecondOrder, BoundarySide::Right) => {
            BoundaryRowTemplate {
                boundary: 3.0 * alpha + 2.0 * h * beta,
                neighbor: -4.0 * alpha,
                far: alpha,
                value_new: 2.0 * h,
                ..Default::default()
            }
        }
        (BoundaryApproximation::TwoPointSecondOrder, side) => {
            return ghost_node_template(side, alpha, beta, h, stencil);
        }
    };
    Ok(template)
}

/// Everything one time march needs, fixed for the whole march
#[derive(Debug, Clone, Copy)]
pub struct SolveContext {
    pub mesh: MeshPlan,
    pub scheme: Scheme,
    pub approximation: BoundaryApproximation,
    pub constants: PdeConstants,
    pub stencil: StencilCoefficients,
    pub left: BoundaryRowTemplate,
    pub right: BoundaryRowTemplate,
}

impl SolveContext {
    pub fn assemble(
        mesh: MeshPlan,
        scheme: Scheme,
        approximation: BoundaryApproximation,
        problem: &BoundProblem,
    ) -> Result<Self, ParabolicError> {
        let constants = problem.constants;
        let stencil = StencilCoefficients::theta_method(mesh.h, mesh.tau, scheme.theta(), &constants);
        let left = boundary_template(
            BoundarySide::Left,
            &problem.left,
            approximation,
            mesh.h,
            &stencil,
        )?;
        let right = boundary_template(
            BoundarySide::Right,
            &problem.right,
            approximation,
            mesh.h,
            &stencil,
        )?;
        Ok(Self {
            mesh,
            scheme,
            approximation,
            constants,
            stencil,
            left,
            right,
        })
    }

    /// Rows of the system for time level `level` (>= 1) given the line of level - 1
    pub fn assemble_level(
        &self,
        problem: &BoundProblem,
        previous: &[f64],
        level: usize,
    ) -> Vec<BandRow> {
        let mesh = &self.mesh;
        let n = mesh.n;
        let t_new = mesh.t(level);
        let t_old = mesh.t(level - 1);
        let source = |x: f64, t: f64| problem.source(x, t);

        let mut rows = Vec::with_capacity(n);

        let x0 = mesh.x(0);
        let l = &self.left;
        rows.push(BandRow {
            sub: 0.0,
            diag: l.boundary,
            sup: l.neighbor,
            far: l.far,
            rhs: l.old_boundary * previous[0]
                + l.old_neighbor * previous[1]
                + l.value_new * problem.left.value(t_new)
                + l.value_old * problem.left.value(t_old)
                + l.source_new * source(x0, t_new)
                + l.source_old * source(x0, t_old),
        });

        for j in 1..n - 1 {
            let x = mesh.x(j);
            rows.push(self.stencil.interior_row(
                previous,
                j,
                source(x, t_new),
                source(x, t_old),
            ));
        }

        let xn = mesh.x(n - 1);
        let r = &self.right;
        rows.push(BandRow {
            sub: r.neighbor,
            diag: r.boundary,
            sup: 0.0,
            far: r.far,
            rhs: r.old_boundary * previous[n - 1]
                + r.old_neighbor * previous[n - 2]
                + r.value_new * problem.right.value(t_new)
                + r.value_old * problem.right.value(t_old)
                + r.source_new * source(xn, t_new)
                + r.source_old * source(xn, t_old),
        });
        rows
    }
}
