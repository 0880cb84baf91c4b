//! Time schemes of the theta-method and boundary approximation orders, with name parsing.
use super::parabolic_error::ParabolicError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lowercase and unify the separators so that "Crank–Nicolson", "crank_nicolson"
/// and "crank nicolson" read the same
fn normalize_name(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .chars()
        .map(|ch| match ch {
            '–' | '—' | '_' | ' ' => '-',
            other => other,
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Scheme {
    /// θ = 0
    Explicit,
    /// θ = 1
    Implicit,
    /// θ = 0.5
    CrankNicolson,
    /// any θ in [0, 1]
    Custom(f64),
}

impl Scheme {
    /// All schemes with a fixed θ, used by the convergence sweep
    pub const FIXED: [Scheme; 3] = [Scheme::Explicit, Scheme::Implicit, Scheme::CrankNicolson];

    /// Resolve a scheme name. `theta` is required for "custom" and ignored otherwise;
    /// the second field of the result reports whether a supplied θ was ignored.
    pub fn from_name(name: &str, theta: Option<f64>) -> Result<(Scheme, bool), ParabolicError> {
        let scheme = match normalize_name(name).as_str() {
            "explicit" | "explict" => Scheme::Explicit,
            "implicit" | "implict" => Scheme::Implicit,
            "crank-nicolson" | "cn" => Scheme::CrankNicolson,
            "custom" => {
                let theta = theta.ok_or(ParabolicError::CustomSchemeWithoutTheta)?;
                if !(0.0..=1.0).contains(&theta) {
                    return Err(ParabolicError::ThetaOutOfRange(theta));
                }
                return Ok((Scheme::Custom(theta), false));
            }
            _ => return Err(ParabolicError::UnknownScheme(name.to_string())),
        };
        Ok((scheme, theta.is_some()))
    }

    pub fn theta(&self) -> f64 {
        match self {
            Scheme::Explicit => 0.0,
            Scheme::Implicit => 1.0,
            Scheme::CrankNicolson => 0.5,
            Scheme::Custom(theta) => *theta,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Scheme::Explicit => "explicit",
            Scheme::Implicit => "implicit",
            Scheme::CrankNicolson => "crank-nicolson",
            Scheme::Custom(_) => "custom",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scheme::Custom(theta) => write!(f, "custom (theta = {})", theta),
            other => write!(f, "{}", other.name()),
        }
    }
}

/// Discretization of the Robin condition at a spatial end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoundaryApproximation {
    /// one-sided difference on two nodes, O(h)
    TwoPointFirstOrder,
    /// one-sided difference on three nodes, O(h²), leaves an off-band entry
    ThreePointSecondOrder,
    /// ghost node eliminated through the interior template, O(h²)
    TwoPointSecondOrder,
}

impl BoundaryApproximation {
    pub const ALL: [BoundaryApproximation; 3] = [
        BoundaryApproximation::TwoPointFirstOrder,
        BoundaryApproximation::ThreePointSecondOrder,
        BoundaryApproximation::TwoPointSecondOrder,
    ];

    pub fn from_name(name: &str) -> Result<Self, ParabolicError> {
        match normalize_name(name).as_str() {
            "two-point-first-order" => Ok(BoundaryApproximation::TwoPointFirstOrder),
            "three-point-second-order" => Ok(BoundaryApproximation::ThreePointSecondOrder),
            "two-point-second-order" => Ok(BoundaryApproximation::TwoPointSecondOrder),
            _ => Err(ParabolicError::UnknownApproximation(name.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BoundaryApproximation::TwoPointFirstOrder => "two-point first order",
            BoundaryApproximation::ThreePointSecondOrder => "three-point second order",
            BoundaryApproximation::TwoPointSecondOrder => "two-point second order",
        }
    }

    /// nominal order of the truncation error in h
    pub fn order(&self) -> usize {
        match self {
            BoundaryApproximation::TwoPointFirstOrder => 1,
            _ => 2,
        }
    }
}

impl fmt::Display for BoundaryApproximation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheme_names() {
        assert_eq!(
            Scheme::from_name("Crank–Nicolson", None).unwrap(),
            (Scheme::CrankNicolson, false)
        );
        assert_eq!(
            Scheme::from_name("explict", None).unwrap().0,
            Scheme::Explicit
        );
        assert_eq!(
            Scheme::from_name("implicit", Some(0.3)).unwrap(),
            (Scheme::Implicit, true)
        );
        assert_eq!(
            Scheme::from_name("custom", Some(0.3)).unwrap().0,
            Scheme::Custom(0.3)
        );
        assert!(matches!(
            Scheme::from_name("custom", None),
            Err(ParabolicError::CustomSchemeWithoutTheta)
        ));
        assert!(matches!(
            Scheme::from_name("custom", Some(1.5)),
            Err(ParabolicError::ThetaOutOfRange(_))
        ));
        assert!(matches!(
            Scheme::from_name("leapfrog", None),
            Err(ParabolicError::UnknownScheme(_))
        ));
    }

    #[test]
    fn test_scheme_theta() {
        assert_eq!(Scheme::Explicit.theta(), 0.0);
        assert_eq!(Scheme::Implicit.theta(), 1.0);
        assert_eq!(Scheme::CrankNicolson.theta(), 0.5);
        assert_eq!(Scheme::Custom(0.25).theta(), 0.25);
    }

    #[test]
    fn test_approximation_names() {
        for approximation in BoundaryApproximation::ALL {
            assert_eq!(
                BoundaryApproximation::from_name(approximation.name()).unwrap(),
                approximation
            );
        }
        assert_eq!(
            BoundaryApproximation::from_name("three_point_second_order").unwrap(),
            BoundaryApproximation::ThreePointSecondOrder
        );
        assert!(BoundaryApproximation::from_name("four-point").is_err());
    }
}
