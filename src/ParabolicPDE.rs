//! # Parabolic PDE module
//!
//! Finite-difference engine for one-dimensional linear parabolic equations
//! ```text
//! u_t = a·u_xx + b·u_x + c·u + f(x, t)
//! ```
//! with Robin conditions `alpha·u_x + beta·u = φ(t)` at both ends and an initial line
//! `u(x, 0) = φ_0(x)`.
//!
//! ## Pipeline
//! | stage | module |
//! |-------|--------|
//! | constants validated, conditions and source bound | `pde_constants`, `boundary_condition`, `parabolic_task` |
//! | h and tau resolved from n, k and the Courant ratio | `mesh_planner` |
//! | theta-method template and boundary rows | `scheme_assembler` |
//! | off-band folding and Thomas sweep | `band_solver` |
//! | level-by-level march | `time_marcher` |
//! | analytic sample and error grid | `analytic_sampler`, `solution_grid` |
//! | error over resolutions and all scheme/approximation pairs | `convergence_sweep` |
//!
//! ## Schemes
//! | name | θ |
//! |------|---|
//! | explicit | 0 |
//! | implicit | 1 |
//! | crank-nicolson | 0.5 |
//! | custom | user θ in [0, 1] |
//!
//! ## Boundary approximations
//! | name | order | off-band entry |
//! |------|-------|----------------|
//! | two-point first order | 1 | no |
//! | three-point second order | 2 | yes |
//! | two-point second order (ghost node) | 2 | no |
//!
//! ## Example
//! ```rust, ignore
//! use ParaThe::ParabolicPDE::manufactured_problems::dirichlet_sine_decay;
//! use ParaThe::ParabolicPDE::solve_settings::SolveSettings;
//!
//! let task = dirichlet_sine_decay()?;
//! let settings = SolveSettings::new("implicit", "two-point first order").with_n(50).with_k(50);
//! let outcome = task.solve(&settings)?;
//! println!("max error {:?}", outcome.max_error());
//! ```
pub mod analytic_sampler;
pub mod band_solver;
pub mod boundary_condition;
pub mod convergence_sweep;
pub mod manufactured_problems;
pub mod mesh_planner;
pub mod parabolic_error;
pub mod parabolic_task;
pub mod pde_constants;
pub mod scheme;
pub mod scheme_assembler;
pub mod solution_grid;
pub mod solve_settings;
pub mod time_marcher;
