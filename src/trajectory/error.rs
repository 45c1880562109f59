use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrajectoryError {
    #[error("trajectory file read error: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
}
