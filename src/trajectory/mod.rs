mod error;
mod parsing;
mod source;
mod synthetic;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::orbit::StateVector;

pub use error::TrajectoryError;
pub use source::{LogFile, TrajectorySource};

#[derive(Debug, Clone, PartialEq)]
pub enum TrajectoryOrigin {
    Log(PathBuf),
    Synthetic,
}

impl fmt::Display for TrajectoryOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrajectoryOrigin::Log(path) => write!(f, "{}", path.display()),
            TrajectoryOrigin::Synthetic => write!(f, "synthetic"),
        }
    }
}

/// Ordered state samples, read-only once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    origin: TrajectoryOrigin,
    states: Vec<StateVector>,
}

impl Trajectory {
    pub fn new(origin: TrajectoryOrigin, states: Vec<StateVector>) -> Self {
        Self { origin, states }
    }

    /// Read a state log (see [`parsing::parse_records`] for the accepted layout)
    pub fn from_log(path: &Path) -> Result<Self, TrajectoryError> {
        let content = fs::read_to_string(path)?;
        let states = parsing::parse_records(&content)?;
        Ok(Self::new(TrajectoryOrigin::Log(path.to_path_buf()), states))
    }

    /// Analytic sample ellipse, identical on every call
    pub fn synthetic() -> Self {
        Self::new(TrajectoryOrigin::Synthetic, synthetic::sample_ellipse())
    }

    /// Read a state log, substituting the synthetic trajectory if the log
    /// cannot be read or parsed.
    pub fn load(path: &Path) -> Self {
        match Self::from_log(path) {
            Ok(trajectory) => {
                log::info!(
                    "Loaded {} state samples from {}",
                    trajectory.len(),
                    path.display()
                );
                trajectory
            }
            Err(e) => {
                log::warn!(
                    "Failed to read trajectory {}: {}; using synthetic samples",
                    path.display(),
                    e
                );
                Self::synthetic()
            }
        }
    }

    pub fn origin(&self) -> &TrajectoryOrigin {
        &self.origin
    }

    pub fn states(&self) -> &[StateVector] {
        &self.states
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
