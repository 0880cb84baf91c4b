//! # PDE constants and their validation
//!
//! The equation `u_t = a·u_xx + b·u_x + c·u + f(x,t)` carries three scalar constants.
//! A task registers a predicate for every constant it needs; `validate` then accepts
//! exactly those constants:
//!
//! | predicate | value supplied | outcome |
//! |-----------|----------------|---------|
//! | no  | no  | constant is 0 |
//! | no  | yes | value ignored (warning), constant is 0 |
//! | yes | yes, predicate holds | value accepted |
//! | yes | yes, predicate fails | whole call fails |
//! | yes | no  | whole call fails |
//!
//! Constants are checked in the order a, b, c and the first failure stops the check.
use super::parabolic_error::ParabolicError;
use log::warn;
use std::fmt;
use std::sync::Arc;

/// Coefficients of `a·u_xx + b·u_x + c·u`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PdeConstants {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl PdeConstants {
    pub fn new(a: f64, b: f64, c: f64) -> Self {
        Self { a, b, c }
    }
}

impl fmt::Display for PdeConstants {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a = {}, b = {}, c = {}", self.a, self.b, self.c)
    }
}

pub type ConstantPredicate = Arc<dyn Fn(f64) -> bool + Send + Sync>;

/// Registered predicates for a, b and c
#[derive(Clone, Default)]
pub struct ConstantValidator {
    predicates: [Option<ConstantPredicate>; 3],
}

const NAMES: [char; 3] = ['a', 'b', 'c'];

fn slot(name: char) -> Option<usize> {
    NAMES.iter().position(|n| *n == name)
}

impl ConstantValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a predicate for constant `name` ('a', 'b' or 'c'); other names are ignored
    pub fn require<F>(&mut self, name: char, predicate: F)
    where
        F: Fn(f64) -> bool + Send + Sync + 'static,
    {
        match slot(name) {
            Some(i) => self.predicates[i] = Some(Arc::new(predicate)),
            None => warn!("unknown constant \"{}\" has no slot, predicate ignored", name),
        }
    }

    pub fn is_required(&self, name: char) -> bool {
        slot(name)
            .map(|i| self.predicates[i].is_some())
            .unwrap_or(false)
    }

    /// Check the supplied values. Returns the accepted constants and the names of
    /// supplied constants that were ignored because nothing requires them.
    pub fn validate(
        &self,
        a: Option<f64>,
        b: Option<f64>,
        c: Option<f64>,
    ) -> Result<(PdeConstants, Vec<char>), ParabolicError> {
        let supplied = [a, b, c];
        let mut accepted = [0.0; 3];
        let mut ignored = Vec::new();
        for i in 0..3 {
            let name = NAMES[i];
            match (&self.predicates[i], supplied[i]) {
                (None, None) => {}
                (None, Some(_)) => {
                    warn!(
                        "parameter \"{}\" is not required and will be ignored",
                        name
                    );
                    ignored.push(name);
                }
                (Some(predicate), Some(value)) => {
                    if predicate(value) {
                        accepted[i] = value;
                    } else {
                        return Err(ParabolicError::ConstantRejected { name, value });
                    }
                }
                (Some(_), None) => return Err(ParabolicError::ConstantMissing { name }),
            }
        }
        Ok((
            PdeConstants::new(accepted[0], accepted[1], accepted[2]),
            ignored,
        ))
    }
}

impl fmt::Debug for ConstantValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstantValidator")
            .field("a", &self.is_required('a'))
            .field("b", &self.is_required('b'))
            .field("c", &self.is_required('c'))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_nothing_required_defaults_to_zero() {
        let validator = ConstantValidator::new();
        let (constants, ignored) = validator.validate(None, None, None).unwrap();
        assert_eq!(constants, PdeConstants::default());
        assert!(ignored.is_empty());
    }

    #[test]
    fn test_unrequired_value_is_ignored() {
        let mut validator = ConstantValidator::new();
        validator.require('a', |a| a > 0.0);
        let (constants, ignored) = validator.validate(Some(2.0), Some(5.0), None).unwrap();
        assert_eq!(constants.a, 2.0);
        assert_eq!(constants.b, 0.0);
        assert_eq!(ignored, vec!['b']);
    }

    #[test]
    fn test_rejected_and_missing() {
        let mut validator = ConstantValidator::new();
        validator.require('a', |a| a > 0.0);
        validator.require('c', |c| c <= 0.0);
        match validator.validate(Some(-1.0), None, Some(-1.0)) {
            Err(ParabolicError::ConstantRejected { name, value }) => {
                assert_eq!(name, 'a');
                assert_eq!(value, -1.0);
            }
            other => panic!("unexpected {:?}", other),
        }
        match validator.validate(Some(1.0), None, None) {
            Err(ParabolicError::ConstantMissing { name }) => assert_eq!(name, 'c'),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_short_circuit_order() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut validator = ConstantValidator::new();
        validator.require('a', |_| false);
        let counter = calls.clone();
        validator.require('b', move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            true
        });
        assert!(validator.validate(Some(1.0), Some(1.0), None).is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
