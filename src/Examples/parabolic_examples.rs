use crate::ParabolicPDE::boundary_condition::BoundaryCondition;
use crate::ParabolicPDE::convergence_sweep::{SweepConfig, SweepPolicy, convergence_sweep};
use crate::ParabolicPDE::manufactured_problems::{
    dirichlet_sine_decay, neumann_cosine_decay, robin_advection_reaction,
};
use crate::ParabolicPDE::parabolic_task::ParabolicTask;
use crate::ParabolicPDE::solve_settings::SolveSettings;
use log::error;

pub fn parabolic_examples(task: usize) {
    match task {
        0 => {
            // HEAT EQUATION WITH DIRICHLET ENDS, u = exp(-t)·sin(x)
            let task = match dirichlet_sine_decay() {
                Ok(task) => task,
                Err(e) => {
                    error!("{}", e);
                    return;
                }
            };
            task.pretty_print_task();
            let settings = SolveSettings::new("implicit", "two-point first order")
                .with_n(50)
                .with_k(50);
            match task.solve(&settings) {
                Ok(outcome) => {
                    println!("max error: {:?}", outcome.max_error());
                    for (t, u) in outcome.numerical.time_series_at(0.5).iter().step_by(10) {
                        println!("u(pi/2, {:.3}) = {:.6}", t, u);
                    }
                }
                Err(e) => error!("{}", e),
            }
        }
        1 => {
            // FLUX AT BOTH ENDS: ORDER OF THE BOUNDARY APPROXIMATIONS
            let task = match neumann_cosine_decay() {
                Ok(task) => task,
                Err(e) => {
                    error!("{}", e);
                    return;
                }
            };
            for approximation in [
                "two-point first order",
                "three-point second order",
                "two-point second order",
            ] {
                let errors: Vec<f64> = [11, 21, 41]
                    .iter()
                    .filter_map(|n| {
                        let settings = SolveSettings::new("implicit", approximation).with_n(*n);
                        task.solve(&settings).ok().and_then(|o| o.max_error())
                    })
                    .collect();
                println!("{}: {:?}", approximation, errors);
            }
        }
        2 => {
            // ROBIN ENDS, ADVECTION, REACTION AND SOURCE
            let task = match robin_advection_reaction() {
                Ok(task) => task,
                Err(e) => {
                    error!("{}", e);
                    return;
                }
            };
            task.pretty_print_task();
            let settings = SolveSettings::new("crank-nicolson", "two-point second order").with_n(41);
            match task.solve(&settings) {
                Ok(outcome) => {
                    println!("max error: {:?}", outcome.max_error());
                    for (x, u) in outcome.numerical.profile_at(1.0) {
                        println!("u({:.3}, T) = {:.6}", x, u);
                    }
                }
                Err(e) => error!("{}", e),
            }
        }
        3 => {
            // CONVERGENCE SWEEP OVER ALL SCHEMES AND APPROXIMATIONS
            let task = match neumann_cosine_decay() {
                Ok(task) => task,
                Err(e) => {
                    error!("{}", e);
                    return;
                }
            };
            let config = SweepConfig::new(SweepPolicy::VaryN, 10, 50, 10);
            match convergence_sweep(&task, &config) {
                Ok(report) => {
                    report.pretty_print();
                    for label in report.errors.keys() {
                        println!("{}: observed orders {:?}", label, report.observed_orders(label));
                    }
                }
                Err(e) => error!("{}", e),
            }
        }
        4 => {
            // USER-DEFINED TASK: CUSTOM THETA, CONSTANTS WITH CONDITIONS
            let mut task = ParabolicTask::new();
            task.set_domain(0.0, 2.0)
                .set_time_horizon(0.5)
                .require_constant('a', |a| a > 0.0)
                .require_constant('c', |c| c < 0.0)
                .set_left_condition(BoundaryCondition::dirichlet(|t, _| 1.0 + t))
                .set_right_condition(BoundaryCondition::neumann(|_, _| 0.0))
                .set_initial_condition(BoundaryCondition::initial(|x, _| (x * 1.5).cos()));
            if let Err(e) = task.set_constants(Some(0.8), None, Some(-0.5)) {
                error!("{}", e);
                return;
            }
            let settings = SolveSettings::new("custom", "three-point second order")
                .with_theta(0.7)
                .with_n(40)
                .with_k(100);
            let (numerical, _, _) = task.solve_triple(&settings);
            if let Some(grid) = numerical {
                println!("max |u| over the grid: {:.6}", grid.max_abs());
                println!("max |u| per level: {:?}", grid.max_abs_per_level());
            }
        }
        _ => println!("no example with number {}", task),
    }
}
