//! # Convergence sweep
//!
//! Repeats the solve over a range of node counts (or time level counts) for every
//! fixed scheme and every boundary approximation, and records the largest absolute
//! error of each combination at each resolution. The count on the other axis is
//! derived from the Courant ratio, so the explicit scheme stays stable throughout.
//!
//! Labels read `"<scheme> + <approximation>"`, e.g. `"implicit + two-point first order"`.
use super::mesh_planner::{DEFAULT_COURANT, MeshRequest};
use super::parabolic_error::ParabolicError;
use super::parabolic_task::ParabolicTask;
use super::scheme::{BoundaryApproximation, Scheme};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SweepPolicy {
    /// vary the spatial node count n, record h
    VaryN,
    /// vary the number of time levels k, record tau
    VaryK,
}

fn default_courant() -> f64 {
    DEFAULT_COURANT
}

/// Resolutions `from, from + step, ..` up to and including `to`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    pub policy: SweepPolicy,
    pub from: usize,
    pub to: usize,
    pub step: usize,
    #[serde(default = "default_courant")]
    pub courant: f64,
}

impl SweepConfig {
    pub fn new(policy: SweepPolicy, from: usize, to: usize, step: usize) -> Self {
        Self {
            policy,
            from,
            to,
            step,
            courant: DEFAULT_COURANT,
        }
    }

    pub fn resolutions(&self) -> Result<Vec<usize>, ParabolicError> {
        if self.step == 0 || self.from > self.to {
            return Err(ParabolicError::InvalidMesh(format!(
                "empty sweep range {}..={} with step {}",
                self.from, self.to, self.step
            )));
        }
        Ok((self.from..=self.to).step_by(self.step).collect())
    }

    fn request(&self, resolution: usize) -> MeshRequest {
        match self.policy {
            SweepPolicy::VaryN => MeshRequest::new(Some(resolution), None, self.courant),
            SweepPolicy::VaryK => MeshRequest::new(None, Some(resolution), self.courant),
        }
    }
}

pub fn sweep_label(scheme: Scheme, approximation: BoundaryApproximation) -> String {
    format!("{} + {}", scheme.name(), approximation.name())
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConvergenceReport {
    pub policy: SweepPolicy,
    pub resolutions: Vec<usize>,
    /// realized h (VaryN) or tau (VaryK) of each resolution
    pub steps: Vec<f64>,
    /// max |error| per label, one entry per resolution
    pub errors: BTreeMap<String, Vec<f64>>,
}

impl ConvergenceReport {
    /// ln(e_i / e_{i+1}) / ln(s_i / s_{i+1}) between successive resolutions
    pub fn observed_orders(&self, label: &str) -> Option<Vec<f64>> {
        let errors = self.errors.get(label)?;
        let orders = errors
            .windows(2)
            .zip(self.steps.windows(2))
            .map(|(e, s)| (e[0] / e[1]).ln() / (s[0] / s[1]).ln())
            .collect();
        Some(orders)
    }

    pub fn pretty_print(&self) {
        use prettytable::{Cell, Row, Table};
        let mut table = Table::new();
        let step_name = match self.policy {
            SweepPolicy::VaryN => "h",
            SweepPolicy::VaryK => "tau",
        };
        let mut header = vec![Cell::new("scheme + approximation")];
        header.extend(
            self.steps
                .iter()
                .map(|step| Cell::new(&format!("{} = {:.3e}", step_name, step))),
        );
        table.add_row(Row::new(header));
        for (label, errors) in &self.errors {
            let mut cells = vec![Cell::new(label)];
            cells.extend(errors.iter().map(|e| Cell::new(&format!("{:.3e}", e))));
            table.add_row(Row::new(cells));
        }
        table.printstd();
    }
}

/// Solve every fixed scheme with every approximation at each resolution of `config`
pub fn convergence_sweep(
    task: &ParabolicTask,
    config: &SweepConfig,
) -> Result<ConvergenceReport, ParabolicError> {
    task.bound_problem()?;
    if !task.has_analytic_solution() {
        return Err(ParabolicError::MissingAnalyticSolution);
    }
    let resolutions = config.resolutions()?;
    let mut steps = Vec::with_capacity(resolutions.len());
    let mut errors: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for &resolution in &resolutions {
        let request = config.request(resolution);
        let mut realized = None;
        for scheme in Scheme::FIXED {
            for approximation in BoundaryApproximation::ALL {
                let outcome = task.solve_with(scheme, approximation, &request)?;
                let max_error = outcome
                    .max_error()
                    .ok_or(ParabolicError::MissingAnalyticSolution)?;
                if realized.is_none() {
                    let mesh = outcome.mesh();
                    realized = Some(match config.policy {
                        SweepPolicy::VaryN => mesh.h,
                        SweepPolicy::VaryK => mesh.tau,
                    });
                }
                errors
                    .entry(sweep_label(scheme, approximation))
                    .or_default()
                    .push(max_error);
            }
        }
        if let Some(step) = realized {
            info!("resolution {} swept, step {:.3e}", resolution, step);
            steps.push(step);
        }
    }
    Ok(ConvergenceReport {
        policy: config.policy,
        resolutions,
        steps,
        errors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ParabolicPDE::manufactured_problems::{dirichlet_sine_decay, neumann_cosine_decay};
    use approx::assert_relative_eq;

    #[test]
    fn test_range() {
        let config = SweepConfig::new(SweepPolicy::VaryN, 10, 30, 10);
        assert_eq!(config.resolutions().unwrap(), vec![10, 20, 30]);
        assert!(SweepConfig::new(SweepPolicy::VaryN, 10, 30, 0).resolutions().is_err());
        assert!(SweepConfig::new(SweepPolicy::VaryK, 30, 10, 1).resolutions().is_err());
    }

    #[test]
    fn test_observed_orders() {
        let mut errors = BTreeMap::new();
        errors.insert("x".to_string(), vec![4e-2, 1e-2, 2.5e-3]);
        let report = ConvergenceReport {
            policy: SweepPolicy::VaryN,
            resolutions: vec![10, 20, 40],
            steps: vec![0.1, 0.05, 0.025],
            errors,
        };
        let orders = report.observed_orders("x").unwrap();
        assert_eq!(orders.len(), 2);
        assert_relative_eq!(orders[0], 2.0, epsilon = 1e-12);
        assert_relative_eq!(orders[1], 2.0, epsilon = 1e-12);
        assert!(report.observed_orders("y").is_none());
    }

    #[test]
    fn test_sweep_covers_all_combinations() {
        let task = neumann_cosine_decay().unwrap();
        let config = SweepConfig::new(SweepPolicy::VaryN, 6, 10, 4);
        let report = convergence_sweep(&task, &config).unwrap();
        assert_eq!(report.steps.len(), 2);
        assert!(report.steps[1] < report.steps[0]);
        assert_eq!(report.errors.len(), 9);
        for errors in report.errors.values() {
            assert_eq!(errors.len(), 2);
            assert!(errors.iter().all(|e| e.is_finite()));
        }
        assert!(
            report
                .errors
                .contains_key("crank-nicolson + two-point second order")
        );
    }

    #[test]
    fn test_sweep_errors_shrink_for_dirichlet_problem() {
        let task = dirichlet_sine_decay().unwrap();
        let config = SweepConfig::new(SweepPolicy::VaryN, 11, 21, 10);
        let report = convergence_sweep(&task, &config).unwrap();
        for (label, errors) in &report.errors {
            assert!(errors[1] < errors[0], "{}: {:?}", label, errors);
        }
    }

    #[test]
    fn test_sweep_needs_analytic_solution() {
        let mut task = ParabolicTask::new();
        task.require_constant('a', |a| a > 0.0);
        task.set_constants(Some(1.0), None, None).unwrap();
        let config = SweepConfig::new(SweepPolicy::VaryN, 5, 6, 1);
        assert!(matches!(
            convergence_sweep(&task, &config),
            Err(ParabolicError::MissingAnalyticSolution)
        ));
    }
}
