//! # Parabolic task
//!
//! ## Purpose
//! `ParabolicTask` collects everything a user states about the problem
//! ```text
//! u_t = a·u_xx + b·u_x + c·u + f(x, t),   x in [l0, l1],   t in [0, T]
//! alpha_l·u_x + beta_l·u = φ_l(t)  at x = l0
//! alpha_r·u_x + beta_r·u = φ_r(t)  at x = l1
//! u(x, 0) = φ_0(x)
//! ```
//! and turns it into solutions.
//!
//! ## Workflow
//! 1. `new()`, then `set_domain`, `set_time_horizon`, conditions and the free function;
//! 2. `require_constant` for every constant the problem needs;
//! 3. `set_constants` validates the constants and binds the conditions, the source and
//!    the analytic solution into a [`BoundProblem`];
//! 4. `solve` (or `solve_triple`) marches in time and compares with the analytic solution.
//!
//! The forcing term is `f(x, t) = raw_source(x, t, constants, free_fn(x, t))`. Without a
//! raw source it is the free function itself.
use super::analytic_sampler::{error_grid, sample_analytic};
use super::boundary_condition::{BoundCondition, BoundaryCondition};
use super::mesh_planner::{MeshPlan, MeshRequest};
use super::parabolic_error::ParabolicError;
use super::pde_constants::{ConstantValidator, PdeConstants};
use super::scheme::{BoundaryApproximation, Scheme};
use super::solution_grid::SolutionGrid;
use super::solve_settings::SolveSettings;
use super::time_marcher::TimeMarcher;
use log::{error, info, warn};
use serde_json::{Value, json};
use std::fmt;
use std::sync::Arc;

/// g(x, t)
pub type FieldFn = Arc<dyn Fn(f64, f64) -> f64 + Send + Sync>;
/// f(x, t, constants, g(x, t))
pub type RawSourceFn = Arc<dyn Fn(f64, f64, &PdeConstants, f64) -> f64 + Send + Sync>;
/// u(x, t, constants)
pub type RawAnalyticFn = Arc<dyn Fn(f64, f64, &PdeConstants) -> f64 + Send + Sync>;

/// Advisory messages of a solve; none of them stops it
#[derive(Debug, Clone, PartialEq)]
pub enum SolveDiagnostic {
    CourantExceeded { realized: f64, bound: f64 },
    ThetaIgnored { theta: f64 },
    ConstantIgnored { name: char },
    NotDiagonallyDominant { rows: Vec<usize> },
}

impl fmt::Display for SolveDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveDiagnostic::CourantExceeded { realized, bound } => write!(
                f,
                "tau and h must satisfy Courant condition: resolved {} instead of {}",
                realized, bound
            ),
            SolveDiagnostic::ThetaIgnored { theta } => {
                write!(f, "parameter theta = {} is ignored by a fixed scheme", theta)
            }
            SolveDiagnostic::ConstantIgnored { name } => {
                write!(f, "parameter \"{}\" is not required and was ignored", name)
            }
            SolveDiagnostic::NotDiagonallyDominant { rows } => {
                write!(f, "rows {:?} are not diagonally dominant", rows)
            }
        }
    }
}

/// Problem with constants bound into every function; immutable for the whole solve
#[derive(Clone)]
pub struct BoundProblem {
    pub constants: PdeConstants,
    pub l0: f64,
    pub l1: f64,
    pub t_end: f64,
    pub left: BoundCondition,
    pub right: BoundCondition,
    pub initial: BoundCondition,
    source: FieldFn,
    analytic: Option<FieldFn>,
}

impl BoundProblem {
    pub fn source(&self, x: f64, t: f64) -> f64 {
        (self.source)(x, t)
    }

    pub fn analytic(&self) -> Option<&FieldFn> {
        self.analytic.as_ref()
    }
}

impl fmt::Debug for BoundProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundProblem")
            .field("constants", &self.constants)
            .field("l0", &self.l0)
            .field("l1", &self.l1)
            .field("t_end", &self.t_end)
            .field("left", &self.left)
            .field("right", &self.right)
            .field("analytic", &self.analytic.is_some())
            .finish()
    }
}

/// Result of one solve
#[derive(Debug, Clone)]
pub struct SolveOutcome {
    pub scheme: Scheme,
    pub approximation: BoundaryApproximation,
    pub numerical: SolutionGrid,
    pub analytic: Option<SolutionGrid>,
    pub error: Option<SolutionGrid>,
    pub diagnostics: Vec<SolveDiagnostic>,
}

impl SolveOutcome {
    pub fn mesh(&self) -> &MeshPlan {
        &self.numerical.mesh
    }

    /// max |analytic - numerical| over the whole grid
    pub fn max_error(&self) -> Option<f64> {
        self.error.as_ref().map(|grid| grid.max_abs())
    }

    /// `{"numerical": [[..]], "analytic": [[..]], "error": [[..]]}`, rows are time levels;
    /// missing grids are null
    pub fn to_response_json(&self) -> Value {
        json!({
            "numerical": self.numerical.to_rows(),
            "analytic": self.analytic.as_ref().map(|grid| grid.to_rows()),
            "error": self.error.as_ref().map(|grid| grid.to_rows()),
        })
    }

    pub fn into_triple(self) -> (SolutionGrid, Option<SolutionGrid>, Option<SolutionGrid>) {
        (self.numerical, self.analytic, self.error)
    }
}

/// Numerical, analytic and error grid; all None when the solve did not happen
pub type SolveTriple = (
    Option<SolutionGrid>,
    Option<SolutionGrid>,
    Option<SolutionGrid>,
);

#[derive(Clone)]
pub struct ParabolicTask {
    pub l0: f64,
    pub l1: f64,
    pub t_end: f64,
    validator: ConstantValidator,
    left: BoundaryCondition,
    right: BoundaryCondition,
    initial: BoundaryCondition,
    free_fn: FieldFn,
    raw_source: Option<RawSourceFn>,
    raw_analytic: Option<RawAnalyticFn>,
    bound: Option<BoundProblem>,
    ignored_constants: Vec<char>,
}

impl Default for ParabolicTask {
    fn default() -> Self {
        Self::new()
    }
}

impl ParabolicTask {
    /// Domain [0, 1] × [0, 1], homogeneous Dirichlet ends, zero initial line and source
    pub fn new() -> Self {
        Self {
            l0: 0.0,
            l1: 1.0,
            t_end: 1.0,
            validator: ConstantValidator::new(),
            left: BoundaryCondition::dirichlet(|_, _| 0.0),
            right: BoundaryCondition::dirichlet(|_, _| 0.0),
            initial: BoundaryCondition::initial(|_, _| 0.0),
            free_fn: Arc::new(|_, _| 0.0),
            raw_source: None,
            raw_analytic: None,
            bound: None,
            ignored_constants: Vec::new(),
        }
    }

    pub fn set_domain(&mut self, l0: f64, l1: f64) -> &mut Self {
        self.l0 = l0;
        self.l1 = l1;
        self.rebind();
        self
    }

    pub fn set_time_horizon(&mut self, t_end: f64) -> &mut Self {
        self.t_end = t_end;
        self.rebind();
        self
    }

    pub fn length(&self) -> f64 {
        self.l1 - self.l0
    }

    pub fn time_horizon(&self) -> f64 {
        self.t_end
    }

    /// Register the predicate a constant ('a', 'b' or 'c') must satisfy. Registering
    /// drops previously set constants.
    pub fn require_constant<F>(&mut self, name: char, predicate: F) -> &mut Self
    where
        F: Fn(f64) -> bool + Send + Sync + 'static,
    {
        self.validator.require(name, predicate);
        self.bound = None;
        self
    }

    pub fn set_left_condition(&mut self, condition: BoundaryCondition) -> &mut Self {
        self.left = condition;
        self.rebind();
        self
    }

    pub fn set_right_condition(&mut self, condition: BoundaryCondition) -> &mut Self {
        self.right = condition;
        self.rebind();
        self
    }

    pub fn set_initial_condition(&mut self, condition: BoundaryCondition) -> &mut Self {
        self.initial = condition;
        self.rebind();
        self
    }

    pub fn set_free_function<F>(&mut self, free_fn: F) -> &mut Self
    where
        F: Fn(f64, f64) -> f64 + Send + Sync + 'static,
    {
        self.free_fn = Arc::new(free_fn);
        self.rebind();
        self
    }

    /// Source built from the constants and the free function value
    pub fn set_raw_source<F>(&mut self, raw_source: F) -> &mut Self
    where
        F: Fn(f64, f64, &PdeConstants, f64) -> f64 + Send + Sync + 'static,
    {
        self.raw_source = Some(Arc::new(raw_source));
        self.rebind();
        self
    }

    pub fn set_analytic_solution<F>(&mut self, analytic: F) -> &mut Self
    where
        F: Fn(f64, f64, &PdeConstants) -> f64 + Send + Sync + 'static,
    {
        self.raw_analytic = Some(Arc::new(analytic));
        self.rebind();
        self
    }

    pub fn has_analytic_solution(&self) -> bool {
        self.raw_analytic.is_some()
    }

    pub fn constants(&self) -> Option<PdeConstants> {
        self.bound.as_ref().map(|problem| problem.constants)
    }

    /// Validate the constants and bind them into conditions, source and analytic
    /// solution. A failed call leaves the constants unset.
    pub fn set_constants(
        &mut self,
        a: Option<f64>,
        b: Option<f64>,
        c: Option<f64>,
    ) -> Result<PdeConstants, ParabolicError> {
        self.bound = None;
        self.ignored_constants.clear();
        let (constants, ignored) = self.validator.validate(a, b, c)?;
        self.ignored_constants = ignored;
        self.bound = Some(self.bind(constants));
        info!("constants set: {}", constants);
        Ok(constants)
    }

    fn bind(&self, constants: PdeConstants) -> BoundProblem {
        let free_fn = self.free_fn.clone();
        let source: FieldFn = match &self.raw_source {
            Some(raw) => {
                let raw = raw.clone();
                Arc::new(move |x: f64, t: f64| raw(x, t, &constants, free_fn(x, t)))
            }
            None => free_fn,
        };
        let analytic = self.raw_analytic.as_ref().map(|raw| {
            let raw = raw.clone();
            Arc::new(move |x: f64, t: f64| raw(x, t, &constants)) as FieldFn
        });
        BoundProblem {
            constants,
            l0: self.l0,
            l1: self.l1,
            t_end: self.t_end,
            left: self.left.bind(&constants),
            right: self.right.bind(&constants),
            initial: self.initial.bind(&constants),
            source,
            analytic,
        }
    }

    fn rebind(&mut self) {
        if let Some(constants) = self.constants() {
            self.bound = Some(self.bind(constants));
        }
    }

    pub fn bound_problem(&self) -> Result<&BoundProblem, ParabolicError> {
        self.bound.as_ref().ok_or(ParabolicError::ConstantsNotSet)
    }

    /// Solve with names resolved from the settings
    pub fn solve(&self, settings: &SolveSettings) -> Result<SolveOutcome, ParabolicError> {
        self.bound_problem()?;
        let (scheme, theta_ignored) = Scheme::from_name(&settings.scheme, settings.theta)?;
        let approximation = BoundaryApproximation::from_name(&settings.approximation)?;
        let mut outcome = self.solve_with(scheme, approximation, &settings.mesh_request())?;
        if theta_ignored {
            if let Some(theta) = settings.theta {
                warn!(
                    "parameter theta = {} is ignored by the {} scheme",
                    theta, scheme
                );
                outcome
                    .diagnostics
                    .push(SolveDiagnostic::ThetaIgnored { theta });
            }
        }
        Ok(outcome)
    }

    /// Solve with an already resolved scheme and approximation
    pub fn solve_with(
        &self,
        scheme: Scheme,
        approximation: BoundaryApproximation,
        request: &MeshRequest,
    ) -> Result<SolveOutcome, ParabolicError> {
        let problem = self.bound_problem()?;
        let (numerical, mut diagnostics) =
            TimeMarcher::run(problem, request, scheme, approximation)?;
        diagnostics.extend(
            self.ignored_constants
                .iter()
                .map(|name| SolveDiagnostic::ConstantIgnored { name: *name }),
        );
        let (analytic, error) = match problem.analytic() {
            Some(exact) => {
                let sample = sample_analytic(numerical.mesh, |x, t| exact(x, t));
                let error = error_grid(&sample, &numerical);
                info!("max abs error: {:.3e}", error.max_abs());
                (Some(sample), Some(error))
            }
            None => (None, None),
        };
        Ok(SolveOutcome {
            scheme,
            approximation,
            numerical,
            analytic,
            error,
            diagnostics,
        })
    }

    /// `(None, None, None)` when the solve did not happen, the reason is logged
    pub fn solve_triple(&self, settings: &SolveSettings) -> SolveTriple {
        match self.solve(settings) {
            Ok(outcome) => {
                let (numerical, analytic, error) = outcome.into_triple();
                (Some(numerical), analytic, error)
            }
            Err(err) => {
                error!("{}", err);
                (None, None, None)
            }
        }
    }

    pub fn pretty_print_task(&self) {
        use prettytable::{Table, row};
        let mut table = Table::new();
        table.add_row(row!["Parameter", "Value"]);
        table.add_row(row!["domain", format!("[{}, {}]", self.l0, self.l1)]);
        table.add_row(row!["time horizon", format!("{}", self.t_end)]);
        table.add_row(row![
            "constants",
            match self.constants() {
                Some(constants) => constants.to_string(),
                None => "not set".to_string(),
            }
        ]);
        table.add_row(row![
            "left end",
            format!("alpha = {}, beta = {}", self.left.alpha, self.left.beta)
        ]);
        table.add_row(row![
            "right end",
            format!("alpha = {}, beta = {}", self.right.alpha, self.right.beta)
        ]);
        table.add_row(row![
            "analytic solution",
            if self.has_analytic_solution() { "yes" } else { "no" }
        ]);
        table.printstd();
    }
}

impl fmt::Debug for ParabolicTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParabolicTask")
            .field("l0", &self.l0)
            .field("l1", &self.l1)
            .field("t_end", &self.t_end)
            .field("validator", &self.validator)
            .field("left", &self.left)
            .field("right", &self.right)
            .field("bound", &self.bound)
            .finish()
    }
}
