use ndarray::{Array, Ix4};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InferenceError {
    #[error("Failed to load model: {0}")]
    Load(String),
    #[error("Session mutex poisoned: {0}")]
    SessionPoisoned(String),
    #[error("Failed to build input tensor: {0}")]
    Input(String),
    #[error("Inference failed: {0}")]
    Run(String),
    #[error("Unexpected model output: expected {expected} scores, got {actual}")]
    UnexpectedOutput { expected: usize, actual: usize },
    #[error("Model returned no usable scores")]
    NoScores,
}

/// Opaque classifier: maps a `[1, 224, 224, 3]` tensor to one score per class.
pub trait ModelService: Send + Sync + 'static {
    fn predict(&self, input: &Array<f32, Ix4>) -> Result<Vec<f32>, InferenceError>;
}
