//! # Time march
//!
//! Drives one solve level by level. The marcher is an explicit state machine:
//!
//! | state | reached by | next call |
//! |-------|------------|-----------|
//! | Uninitialized | `TimeMarcher::new` | `bind` |
//! | ConstantsBound | `bind` | `plan_mesh` |
//! | MeshPlanned | `plan_mesh` | `assemble` |
//! | Assembled | `assemble` (writes the initial line) | `step` |
//! | Stepping | `step` while levels remain | `step` |
//! | Done | `step` on the last level | `finish` |
//!
//! A call made in any other state fails with `MarchOutOfOrder` and leaves the marcher untouched.
use super::band_solver::{diagonal_dominance, solve_band};
use super::mesh_planner::{MeshPlan, MeshRequest, plan_mesh};
use super::parabolic_error::ParabolicError;
use super::parabolic_task::{BoundProblem, SolveDiagnostic};
use super::scheme::{BoundaryApproximation, Scheme};
use super::scheme_assembler::SolveContext;
use super::solution_grid::SolutionGrid;
use log::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarchState {
    Uninitialized,
    ConstantsBound,
    MeshPlanned,
    Assembled,
    Stepping,
    Done,
}

impl MarchState {
    pub fn name(&self) -> &'static str {
        match self {
            MarchState::Uninitialized => "Uninitialized",
            MarchState::ConstantsBound => "ConstantsBound",
            MarchState::MeshPlanned => "MeshPlanned",
            MarchState::Assembled => "Assembled",
            MarchState::Stepping => "Stepping",
            MarchState::Done => "Done",
        }
    }
}

#[derive(Debug)]
pub struct TimeMarcher<'a> {
    state: MarchState,
    problem: Option<&'a BoundProblem>,
    mesh: Option<MeshPlan>,
    context: Option<SolveContext>,
    grid: Option<SolutionGrid>,
    level: usize,
    diagnostics: Vec<SolveDiagnostic>,
}

impl<'a> Default for TimeMarcher<'a> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> TimeMarcher<'a> {
    pub fn new() -> Self {
        Self {
            state: MarchState::Uninitialized,
            problem: None,
            mesh: None,
            context: None,
            grid: None,
            level: 0,
            diagnostics: Vec::new(),
        }
    }

    pub fn state(&self) -> MarchState {
        self.state
    }

    /// Index of the last solved time level
    pub fn level(&self) -> usize {
        self.level
    }

    fn require(&self, expected: MarchState) -> Result<(), ParabolicError> {
        if self.state != expected {
            return Err(ParabolicError::MarchOutOfOrder {
                expected: expected.name(),
                found: self.state.name(),
            });
        }
        Ok(())
    }

    fn out_of_order(&self, expected: &'static str) -> ParabolicError {
        ParabolicError::MarchOutOfOrder {
            expected,
            found: self.state.name(),
        }
    }

    /// Attach a problem whose constants are already bound
    pub fn bind(&mut self, problem: &'a BoundProblem) -> Result<(), ParabolicError> {
        self.require(MarchState::Uninitialized)?;
        self.problem = Some(problem);
        self.state = MarchState::ConstantsBound;
        Ok(())
    }

    pub fn plan_mesh(&mut self, request: &MeshRequest) -> Result<MeshPlan, ParabolicError> {
        self.require(MarchState::ConstantsBound)?;
        let problem = self.problem.ok_or(ParabolicError::ConstantsNotSet)?;
        let mesh = plan_mesh(
            problem.l0,
            problem.l1,
            problem.t_end,
            problem.constants.a,
            request,
        )?;
        if mesh.violates_courant() {
            self.diagnostics.push(SolveDiagnostic::CourantExceeded {
                realized: mesh.realized_courant,
                bound: mesh.courant,
            });
        }
        self.mesh = Some(mesh);
        self.state = MarchState::MeshPlanned;
        Ok(mesh)
    }

    /// Fix the scheme and boundary approximation for the whole march and write the
    /// initial line
    pub fn assemble(
        &mut self,
        scheme: Scheme,
        approximation: BoundaryApproximation,
    ) -> Result<(), ParabolicError> {
        self.require(MarchState::MeshPlanned)?;
        let problem = self.problem.ok_or(ParabolicError::ConstantsNotSet)?;
        let mesh = self.mesh.ok_or(ParabolicError::NoMeshResolution)?;
        let context = SolveContext::assemble(mesh, scheme, approximation, problem)?;
        info!(
            "scheme {} with {} boundaries assembled",
            scheme, approximation
        );
        let mut grid = SolutionGrid::zeros(mesh);
        for j in 0..mesh.n {
            grid.values[(0, j)] = problem.initial.value(mesh.x(j));
        }
        self.context = Some(context);
        self.grid = Some(grid);
        self.level = 0;
        self.state = MarchState::Assembled;
        Ok(())
    }

    /// Solve the next time level. Returns `true` while levels remain.
    pub fn step(&mut self) -> Result<bool, ParabolicError> {
        if !matches!(self.state, MarchState::Assembled | MarchState::Stepping) {
            return Err(self.out_of_order("Assembled | Stepping"));
        }
        let problem = self.problem.ok_or(ParabolicError::ConstantsNotSet)?;
        let context = self
            .context
            .as_ref()
            .ok_or_else(|| self.out_of_order("Assembled"))?;
        let grid = self
            .grid
            .as_mut()
            .ok_or(ParabolicError::NoMeshResolution)?;
        let level = self.level + 1;
        let previous = grid.line(level - 1);
        let rows = context.assemble_level(problem, &previous, level);
        if level == 1 {
            let weak = diagonal_dominance(&rows);
            if !weak.is_empty() {
                warn!("rows {:?} of the system are not diagonally dominant", weak);
                self.diagnostics
                    .push(SolveDiagnostic::NotDiagonallyDominant { rows: weak });
            }
        }
        let line = solve_band(rows)?;
        grid.set_line(level, &line);
        debug!("time level {} of {} solved", level, context.mesh.k - 1);
        self.level = level;
        if level + 1 >= context.mesh.k {
            self.state = MarchState::Done;
            Ok(false)
        } else {
            self.state = MarchState::Stepping;
            Ok(true)
        }
    }

    /// Grid and advisory diagnostics of a finished march
    pub fn finish(self) -> Result<(SolutionGrid, Vec<SolveDiagnostic>), ParabolicError> {
        self.require(MarchState::Done)?;
        let grid = self.grid.ok_or(ParabolicError::NoMeshResolution)?;
        Ok((grid, self.diagnostics))
    }

    /// The whole march in one call
    pub fn run(
        problem: &'a BoundProblem,
        request: &MeshRequest,
        scheme: Scheme,
        approximation: BoundaryApproximation,
    ) -> Result<(SolutionGrid, Vec<SolveDiagnostic>), ParabolicError> {
        let mut marcher = TimeMarcher::new();
        marcher.bind(problem)?;
        marcher.plan_mesh(request)?;
        marcher.assemble(scheme, approximation)?;
        while marcher.step()? {}
        info!("time march finished after {} levels", marcher.level());
        marcher.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ParabolicPDE::manufactured_problems::dirichlet_sine_decay;

    #[test]
    fn test_out_of_order_calls() {
        let task = dirichlet_sine_decay().unwrap();
        let problem = task.bound_problem().unwrap();
        let mut marcher = TimeMarcher::new();
        assert!(matches!(
            marcher.plan_mesh(&MeshRequest::new(Some(5), Some(5), 0.5)),
            Err(ParabolicError::MarchOutOfOrder {
                expected: "ConstantsBound",
                found: "Uninitialized"
            })
        ));
        marcher.bind(problem).unwrap();
        assert!(marcher.step().is_err());
        assert!(
            marcher
                .assemble(Scheme::Implicit, BoundaryApproximation::TwoPointFirstOrder)
                .is_err()
        );
        assert_eq!(marcher.state(), MarchState::ConstantsBound);
        marcher
            .plan_mesh(&MeshRequest::new(Some(5), Some(4), 0.5))
            .unwrap();
        marcher
            .assemble(Scheme::Implicit, BoundaryApproximation::TwoPointFirstOrder)
            .unwrap();
        assert_eq!(marcher.state(), MarchState::Assembled);
        assert!(marcher.step().unwrap());
        assert_eq!(marcher.state(), MarchState::Stepping);
        assert!(marcher.step().unwrap());
        assert!(!marcher.step().unwrap());
        assert_eq!(marcher.state(), MarchState::Done);
        assert!(marcher.step().is_err());
        let (grid, _) = marcher.finish().unwrap();
        assert_eq!(grid.levels(), 4);
    }

    #[test]
    fn test_finish_before_done_fails() {
        let task = dirichlet_sine_decay().unwrap();
        let problem = task.bound_problem().unwrap();
        let mut marcher = TimeMarcher::new();
        marcher.bind(problem).unwrap();
        assert!(matches!(
            marcher.finish(),
            Err(ParabolicError::MarchOutOfOrder { expected: "Done", .. })
        ));
    }

    #[test]
    fn test_run_fills_every_level() {
        let task = dirichlet_sine_decay().unwrap();
        let problem = task.bound_problem().unwrap();
        let (grid, diagnostics) = TimeMarcher::run(
            problem,
            &MeshRequest::new(Some(11), Some(6), 0.5),
            Scheme::CrankNicolson,
            BoundaryApproximation::TwoPointSecondOrder,
        )
        .unwrap();
        assert_eq!(grid.values.shape(), (6, 11));
        // the mesh violates the ratio 0.5, the march still completes
        assert!(
            diagnostics
                .iter()
                .any(|d| matches!(d, SolveDiagnostic::CourantExceeded { .. }))
        );
        assert!(grid.values.iter().all(|v| v.is_finite()));
    }
}
