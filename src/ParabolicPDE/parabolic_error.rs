//! # Errors of the parabolic engine
//!
//! Two families of failures are distinguished:
//!
//! | Family | Meaning | Variants |
//! |--------|---------|----------|
//! | configuration | the request can not be turned into a solve | constants, names, θ, mesh resolution, call order |
//! | domain | the numbers make a step undefined | zero alpha in the ghost-node row, vacuous boundary row, zero pivot |
//!
//! Stability warnings are not errors, they travel as [`SolveDiagnostic`](super::parabolic_task::SolveDiagnostic).
use std::fmt;
use thiserror::Error;

/// End of the spatial domain a boundary row belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundarySide {
    Left,
    Right,
}

impl fmt::Display for BoundarySide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundarySide::Left => write!(f, "left (x = l0)"),
            BoundarySide::Right => write!(f, "right (x = l1)"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ParabolicError {
    #[error("constants in the task are not set")]
    ConstantsNotSet,
    #[error("parameter \"{name}\" is set to {value}, but not allowed by condition")]
    ConstantRejected { name: char, value: f64 },
    #[error("parameter \"{name}\" is not set, but required")]
    ConstantMissing { name: char },
    #[error(
        "incorrect solve type \"{0}\", allowed types are: explicit, implicit, crank-nicolson, custom"
    )]
    UnknownScheme(String),
    #[error(
        "incorrect approximation type \"{0}\", allowed types are: two-point first order, three-point second order, two-point second order"
    )]
    UnknownApproximation(String),
    #[error("custom solve type was selected, but parameter \"theta\" was not set")]
    CustomSchemeWithoutTheta,
    #[error("theta must lie in [0, 1], got {0}")]
    ThetaOutOfRange(f64),
    #[error("either n or k must be set")]
    NoMeshResolution,
    #[error("invalid mesh: {0}")]
    InvalidMesh(String),
    #[error("diffusion coefficient a is zero, mesh can not be derived from the Courant ratio")]
    ZeroDiffusion,
    #[error("analytic solution is not supplied")]
    MissingAnalyticSolution,
    #[error("time march step out of order: expected state {expected}, found {found}")]
    MarchOutOfOrder {
        expected: &'static str,
        found: &'static str,
    },
    #[error("two-point second order approximation at the {side} boundary requires alpha != 0")]
    ZeroAlphaGhostNode { side: BoundarySide },
    #[error("boundary condition at the {side} end has alpha = beta = 0")]
    DegenerateBoundary { side: BoundarySide },
    #[error("zero pivot in row {row} of the band system")]
    ZeroPivot { row: usize },
    #[error("off-band coefficient in row {row} has no usable eliminating row")]
    UnusableOffBand { row: usize },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ParabolicError {
    /// true for errors caused by the request rather than by the numbers
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            ParabolicError::ConstantsNotSet
                | ParabolicError::ConstantRejected { .. }
                | ParabolicError::ConstantMissing { .. }
                | ParabolicError::UnknownScheme(_)
                | ParabolicError::UnknownApproximation(_)
                | ParabolicError::CustomSchemeWithoutTheta
                | ParabolicError::ThetaOutOfRange(_)
                | ParabolicError::NoMeshResolution
                | ParabolicError::InvalidMesh(_)
                | ParabolicError::MissingAnalyticSolution
                | ParabolicError::MarchOutOfOrder { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ParabolicError::ConstantRejected {
            name: 'a',
            value: -1.0,
        };
        assert_eq!(
            err.to_string(),
            "parameter \"a\" is set to -1, but not allowed by condition"
        );
        let err = ParabolicError::ZeroAlphaGhostNode {
            side: BoundarySide::Right,
        };
        assert!(err.to_string().contains("right (x = l1)"));
    }

    #[test]
    fn test_error_families() {
        assert!(ParabolicError::NoMeshResolution.is_configuration());
        assert!(ParabolicError::CustomSchemeWithoutTheta.is_configuration());
        assert!(!ParabolicError::ZeroPivot { row: 3 }.is_configuration());
        assert!(
            !ParabolicError::DegenerateBoundary {
                side: BoundarySide::Left
            }
            .is_configuration()
        );
    }
}
