//! # Boundary and initial conditions
//!
//! A condition at a spatial end reads
//! ```text
//! alpha·∂u/∂x + beta·u = φ(t)
//! ```
//! so `alpha = 0` is the Dirichlet case `beta·u = φ(t)` and `beta = 0` the Neumann case.
//! The initial condition is the same object on the time axis: `alpha = 0`, `beta = 1`,
//! evaluated as `u(x, 0) = φ(x)`.
//!
//! Conditions are built in two phases. The raw function sees the PDE constants,
//! `bind` closes over them once and yields a one-argument evaluator.
use super::pde_constants::PdeConstants;
use std::fmt;
use std::sync::Arc;

/// φ(s; a, b, c) where s is t for spatial ends and x for the initial line
pub type RawConditionFn = Arc<dyn Fn(f64, &PdeConstants) -> f64 + Send + Sync>;
/// φ(s) after binding
pub type ConditionFn = Arc<dyn Fn(f64) -> f64 + Send + Sync>;

/// Which argument the condition function takes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionAxis {
    /// condition at a spatial end, evaluated over time
    Space,
    /// initial condition, evaluated over x
    Time,
}

#[derive(Clone)]
pub struct BoundaryCondition {
    pub alpha: f64,
    pub beta: f64,
    raw: RawConditionFn,
    pub axis: ConditionAxis,
}

impl BoundaryCondition {
    pub fn new<F>(alpha: f64, beta: f64, raw: F, axis: ConditionAxis) -> Self
    where
        F: Fn(f64, &PdeConstants) -> f64 + Send + Sync + 'static,
    {
        Self {
            alpha,
            beta,
            raw: Arc::new(raw),
            axis,
        }
    }

    /// Robin condition at a spatial end
    pub fn robin<F>(alpha: f64, beta: f64, raw: F) -> Self
    where
        F: Fn(f64, &PdeConstants) -> f64 + Send + Sync + 'static,
    {
        Self::new(alpha, beta, raw, ConditionAxis::Space)
    }

    /// u = φ(t)
    pub fn dirichlet<F>(raw: F) -> Self
    where
        F: Fn(f64, &PdeConstants) -> f64 + Send + Sync + 'static,
    {
        Self::robin(0.0, 1.0, raw)
    }

    /// ∂u/∂x = φ(t)
    pub fn neumann<F>(raw: F) -> Self
    where
        F: Fn(f64, &PdeConstants) -> f64 + Send + Sync + 'static,
    {
        Self::robin(1.0, 0.0, raw)
    }

    /// u(x, 0) = φ(x)
    pub fn initial<F>(raw: F) -> Self
    where
        F: Fn(f64, &PdeConstants) -> f64 + Send + Sync + 'static,
    {
        Self::new(0.0, 1.0, raw, ConditionAxis::Time)
    }

    pub fn is_dirichlet(&self) -> bool {
        self.alpha == 0.0
    }

    /// Close over the constants
    pub fn bind(&self, constants: &PdeConstants) -> BoundCondition {
        let raw = self.raw.clone();
        let constants = *constants;
        BoundCondition {
            alpha: self.alpha,
            beta: self.beta,
            axis: self.axis,
            evaluator: Arc::new(move |s| raw(s, &constants)),
        }
    }
}

impl Default for BoundaryCondition {
    /// homogeneous condition with alpha = beta = 0, as an unset end of the task
    fn default() -> Self {
        Self::robin(0.0, 0.0, |_, _| 0.0)
    }
}

impl fmt::Debug for BoundaryCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundaryCondition")
            .field("alpha", &self.alpha)
            .field("beta", &self.beta)
            .field("axis", &self.axis)
            .finish()
    }
}

/// Condition with constants bound in; immutable
#[derive(Clone)]
pub struct BoundCondition {
    pub alpha: f64,
    pub beta: f64,
    pub axis: ConditionAxis,
    evaluator: ConditionFn,
}

impl BoundCondition {
    pub fn value(&self, s: f64) -> f64 {
        (self.evaluator)(s)
    }
}

impl fmt::Debug for BoundCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundCondition")
            .field("alpha", &self.alpha)
            .field("beta", &self.beta)
            .field("axis", &self.axis)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_bind_closes_over_constants() {
        let condition = BoundaryCondition::robin(1.0, 2.0, |t, c| c.a * t + c.b);
        let bound = condition.bind(&PdeConstants::new(3.0, 1.0, 0.0));
        assert_relative_eq!(bound.value(2.0), 7.0);
        assert_eq!(bound.alpha, 1.0);
        assert_eq!(bound.beta, 2.0);
        // a second binding does not disturb the first one
        let other = condition.bind(&PdeConstants::new(0.0, 0.0, 0.0));
        assert_relative_eq!(other.value(2.0), 0.0);
        assert_relative_eq!(bound.value(2.0), 7.0);
    }

    #[test]
    fn test_constructors() {
        assert!(BoundaryCondition::dirichlet(|_, _| 0.0).is_dirichlet());
        assert!(!BoundaryCondition::neumann(|_, _| 0.0).is_dirichlet());
        let initial = BoundaryCondition::initial(|x, _| x.sin());
        assert_eq!(initial.axis, ConditionAxis::Time);
        let bound = initial.bind(&PdeConstants::default());
        assert_relative_eq!(bound.value(std::f64::consts::FRAC_PI_2), 1.0);
    }
}
