//! # Manufactured problems
//!
//! Ready tasks with closed-form solutions, used by the examples, the CLI and the tests.
//!
//! | name | equation | ends | solution |
//! |------|----------|------|----------|
//! | dirichlet sine decay | u_t = a·u_xx on [0, π] | u = 0 | e^{-at}·sin x |
//! | neumann cosine decay | u_t = a·u_xx on [0, π] | u_x = ±e^{-at} | e^{-at}·(cos x + sin x) |
//! | robin advection reaction | u_t = a·u_xx + b·u_x + c·u + f on [0, 1] | -u_x + u, u_x + u | e^{-t}·(1 + x²) |
//!
//! Every builder returns the task with its constants already set.
use super::boundary_condition::BoundaryCondition;
use super::parabolic_error::ParabolicError;
use super::parabolic_task::ParabolicTask;
use std::f64::consts::PI;

pub const PROBLEM_NAMES: [&str; 3] = [
    "dirichlet sine decay",
    "neumann cosine decay",
    "robin advection reaction",
];

/// a = 1, homogeneous Dirichlet ends, u(x, 0) = sin x, T = 1
pub fn dirichlet_sine_decay() -> Result<ParabolicTask, ParabolicError> {
    let mut task = ParabolicTask::new();
    task.set_domain(0.0, PI)
        .set_time_horizon(1.0)
        .require_constant('a', |a| a > 0.0)
        .set_left_condition(BoundaryCondition::dirichlet(|_, _| 0.0))
        .set_right_condition(BoundaryCondition::dirichlet(|_, _| 0.0))
        .set_initial_condition(BoundaryCondition::initial(|x, _| x.sin()))
        .set_analytic_solution(|x, t, c| (-c.a * t).exp() * x.sin());
    task.set_constants(Some(1.0), None, None)?;
    Ok(task)
}

/// a = 1, flux prescribed at both ends, u(x, 0) = cos x + sin x, T = 1
pub fn neumann_cosine_decay() -> Result<ParabolicTask, ParabolicError> {
    let mut task = ParabolicTask::new();
    task.set_domain(0.0, PI)
        .set_time_horizon(1.0)
        .require_constant('a', |a| a > 0.0)
        .set_left_condition(BoundaryCondition::neumann(|t, c| (-c.a * t).exp()))
        .set_right_condition(BoundaryCondition::neumann(|t, c| -(-c.a * t).exp()))
        .set_initial_condition(BoundaryCondition::initial(|x, _| x.cos() + x.sin()))
        .set_analytic_solution(|x, t, c| (-c.a * t).exp() * (x.cos() + x.sin()));
    task.set_constants(Some(1.0), None, None)?;
    Ok(task)
}

/// a = 0.5, b = 0.3, c = -0.2 with the source that makes e^{-t}·(1 + x²) exact, T = 0.5
pub fn robin_advection_reaction() -> Result<ParabolicTask, ParabolicError> {
    let mut task = ParabolicTask::new();
    task.set_domain(0.0, 1.0)
        .set_time_horizon(0.5)
        .require_constant('a', |a| a > 0.0)
        .require_constant('b', |b| b.is_finite())
        .require_constant('c', |c| c <= 0.0)
        .set_left_condition(BoundaryCondition::robin(-1.0, 1.0, |t, _| (-t).exp()))
        .set_right_condition(BoundaryCondition::robin(1.0, 1.0, |t, _| 4.0 * (-t).exp()))
        .set_initial_condition(BoundaryCondition::initial(|x, _| 1.0 + x * x))
        .set_free_function(|_, t| (-t).exp())
        .set_raw_source(|x, _, c, g| {
            g * (-(1.0 + c.c) * (1.0 + x * x) - 2.0 * c.a - 2.0 * c.b * x)
        })
        .set_analytic_solution(|x, t, _| (-t).exp() * (1.0 + x * x));
    task.set_constants(Some(0.5), Some(0.3), Some(-0.2))?;
    Ok(task)
}

/// Look a problem up by name; case, '-' and '_' do not matter
pub fn problem_by_name(name: &str) -> Option<Result<ParabolicTask, ParabolicError>> {
    let name = name.trim().to_lowercase().replace(['-', '_'], " ");
    match name.as_str() {
        "dirichlet sine decay" => Some(dirichlet_sine_decay()),
        "neumann cosine decay" => Some(neumann_cosine_decay()),
        "robin advection reaction" => Some(robin_advection_reaction()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_catalogue_is_complete() {
        for name in PROBLEM_NAMES {
            let task = problem_by_name(name).unwrap().unwrap();
            assert!(task.has_analytic_solution());
            assert!(task.constants().is_some());
        }
        assert!(problem_by_name("Dirichlet_Sine-Decay").is_some());
        assert!(problem_by_name("wave").is_none());
    }

    #[test]
    fn test_robin_source_is_consistent() {
        // residual of the PDE for the exact solution, with derivatives by differences
        let task = robin_advection_reaction().unwrap();
        let problem = task.bound_problem().unwrap();
        let c = problem.constants;
        let exact = problem.analytic().unwrap();
        let (x, t, d) = (0.37, 0.21, 1e-4);
        let u_t = (exact(x, t + d) - exact(x, t - d)) / (2.0 * d);
        let u_x = (exact(x + d, t) - exact(x - d, t)) / (2.0 * d);
        let u_xx = (exact(x + d, t) - 2.0 * exact(x, t) + exact(x - d, t)) / (d * d);
        let rhs = c.a * u_xx + c.b * u_x + c.c * exact(x, t) + problem.source(x, t);
        assert_relative_eq!(u_t, rhs, epsilon = 1e-5);
    }

    #[test]
    fn test_conditions_match_solutions() {
        let task = neumann_cosine_decay().unwrap();
        let problem = task.bound_problem().unwrap();
        let exact = problem.analytic().unwrap();
        let d = 1e-6;
        let t = 0.4;
        let slope_left = (exact(d, t) - exact(-d, t)) / (2.0 * d);
        let slope_right = (exact(PI + d, t) - exact(PI - d, t)) / (2.0 * d);
        assert_relative_eq!(slope_left, problem.left.value(t), epsilon = 1e-6);
        assert_relative_eq!(slope_right, problem.right.value(t), epsilon = 1e-6);

        let task = robin_advection_reaction().unwrap();
        let problem = task.bound_problem().unwrap();
        let exact = problem.analytic().unwrap();
        let left = -(exact(d, t) - exact(-d, t)) / (2.0 * d) + exact(0.0, t);
        let right = (exact(1.0 + d, t) - exact(1.0 - d, t)) / (2.0 * d) + exact(1.0, t);
        assert_relative_eq!(left, problem.left.value(t), epsilon = 1e-6);
        assert_relative_eq!(right, problem.right.value(t), epsilon = 1e-6);
    }
}
