//! # Solve settings and run configuration
//!
//! `SolveSettings` names the scheme and boundary approximation and fixes the mesh
//! resolution of one solve. `RunConfig` adds the problem (by catalogue name) and an
//! optional convergence sweep, and is read from and written to JSON:
//! ```json
//! {
//!   "problem": "dirichlet sine decay",
//!   "settings": {
//!     "scheme": "crank-nicolson",
//!     "approximation": "two-point second order",
//!     "theta": null,
//!     "n": 50,
//!     "k": 50,
//!     "courant": 0.5
//!   },
//!   "sweep": { "policy": "VaryN", "from": 10, "to": 80, "step": 10, "courant": 0.5 }
//! }
//! ```
use super::convergence_sweep::{SweepConfig, SweepPolicy};
use super::mesh_planner::{DEFAULT_COURANT, MeshRequest};
use super::parabolic_error::ParabolicError;
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

fn default_courant() -> f64 {
    DEFAULT_COURANT
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveSettings {
    pub scheme: String,
    pub approximation: String,
    #[serde(default)]
    pub theta: Option<f64>,
    #[serde(default)]
    pub n: Option<usize>,
    #[serde(default)]
    pub k: Option<usize>,
    #[serde(default = "default_courant")]
    pub courant: f64,
}

impl Default for SolveSettings {
    fn default() -> Self {
        Self::new("implicit", "two-point first order")
    }
}

impl SolveSettings {
    pub fn new(scheme: &str, approximation: &str) -> Self {
        Self {
            scheme: scheme.to_string(),
            approximation: approximation.to_string(),
            theta: None,
            n: None,
            k: None,
            courant: DEFAULT_COURANT,
        }
    }

    pub fn with_n(mut self, n: usize) -> Self {
        self.n = Some(n);
        self
    }

    pub fn with_k(mut self, k: usize) -> Self {
        self.k = Some(k);
        self
    }

    pub fn with_theta(mut self, theta: f64) -> Self {
        self.theta = Some(theta);
        self
    }

    pub fn with_courant(mut self, courant: f64) -> Self {
        self.courant = courant;
        self
    }

    pub fn mesh_request(&self) -> MeshRequest {
        MeshRequest::new(self.n, self.k, self.courant)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    pub problem: String,
    pub settings: SolveSettings,
    #[serde(default)]
    pub sweep: Option<SweepConfig>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            problem: "dirichlet sine decay".to_string(),
            settings: SolveSettings::new("crank-nicolson", "two-point second order")
                .with_n(50)
                .with_k(50),
            sweep: Some(SweepConfig::new(SweepPolicy::VaryN, 10, 80, 10)),
        }
    }
}

impl RunConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ParabolicError> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: RunConfig = serde_json::from_str(&content)?;
        info!("run config loaded from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ParabolicError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), content)?;
        Ok(())
    }

    /// Write the default config to `path` as a starting point for editing
    pub fn create_template<P: AsRef<Path>>(path: P) -> Result<Self, ParabolicError> {
        let config = RunConfig::default();
        config.save_to_file(path.as_ref())?;
        info!("template written to {}", path.as_ref().display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_builders() {
        let settings = SolveSettings::new("custom", "two-point first order")
            .with_theta(0.3)
            .with_n(20)
            .with_courant(0.4);
        assert_eq!(settings.theta, Some(0.3));
        let request = settings.mesh_request();
        assert_eq!(request.n, Some(20));
        assert_eq!(request.k, None);
        assert_eq!(request.courant, 0.4);
    }

    #[test]
    fn test_defaults_when_fields_are_missing() {
        let settings: SolveSettings =
            serde_json::from_str(r#"{"scheme": "explicit", "approximation": "two-point first order", "n": 10}"#)
                .unwrap();
        assert_eq!(settings.courant, DEFAULT_COURANT);
        assert_eq!(settings.k, None);
        assert_eq!(settings.theta, None);
    }

    #[test]
    fn test_file_round_trip() {
        let file = NamedTempFile::new().unwrap();
        let template = RunConfig::create_template(file.path()).unwrap();
        let loaded = RunConfig::load_from_file(file.path()).unwrap();
        assert_eq!(loaded, template);
    }

    #[test]
    fn test_broken_file() {
        let file = NamedTempFile::new().unwrap();
        fs::write(file.path(), "{ not json").unwrap();
        assert!(matches!(
            RunConfig::load_from_file(file.path()),
            Err(ParabolicError::Json(_))
        ));
        assert!(matches!(
            RunConfig::load_from_file("/nonexistent/run_config.json"),
            Err(ParabolicError::Io(_))
        ));
    }
}
