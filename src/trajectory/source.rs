use std::fmt;
use std::path::{Path, PathBuf};

use super::Trajectory;

/// Where a stream session takes its samples from. Called once per session.
pub trait TrajectorySource: fmt::Debug + Send + Sync {
    fn load(&self) -> Trajectory;
}

/// Re-reads a state log on every load, so a log written after start-up is
/// picked up by the next subscriber.
#[derive(Debug, Clone)]
pub struct LogFile {
    path: PathBuf,
}

impl LogFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TrajectorySource for LogFile {
    fn load(&self) -> Trajectory {
        Trajectory::load(&self.path)
    }
}

impl TrajectorySource for Trajectory {
    fn load(&self) -> Trajectory {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trajectory::TrajectoryOrigin;
    use std::fs;

    #[test]
    fn log_file_sees_later_writes() {
        let path = std::env::temp_dir().join(format!("source_{}.txt", uuid::Uuid::new_v4()));
        let source = LogFile::new(&path);
        assert_eq!(source.load().origin(), &TrajectoryOrigin::Synthetic);

        fs::write(&path, "7000 0 0 0 7.5 0\n").unwrap();
        let reloaded = source.load();
        fs::remove_file(&path).unwrap();

        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.origin(), &TrajectoryOrigin::Log(path));
    }
}
