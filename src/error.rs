//! Error types shared across the estimation pipeline.

/// Failure classes surfaced at the public API boundary.
///
/// `InvalidInput` and `ShapeMismatch` are precondition violations: they
/// indicate caller bugs and fail the whole call rather than being coerced.
/// `InvariantViolation` signals a distribution that broke its mass
/// precondition before a moment fit.
#[derive(Clone, Debug, PartialEq)]
pub enum EstimateError {
    /// A value lies outside the legal input domain.
    InvalidInput { context: &'static str },
    /// Tensor dimensions disagree with what the operation requires.
    ShapeMismatch {
        context: &'static str,
        expected: usize,
        actual: usize,
    },
    /// A distribution precondition does not hold.
    InvariantViolation { context: &'static str, value: f32 },
}

impl std::fmt::Display for EstimateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EstimateError::InvalidInput { context } => {
                write!(f, "invalid input: {context}")
            }
            EstimateError::ShapeMismatch {
                context,
                expected,
                actual,
            } => {
                write!(f, "shape mismatch: {context} (expected {expected}, got {actual})")
            }
            EstimateError::InvariantViolation { context, value } => {
                write!(f, "invariant violation: {context} (value {value})")
            }
        }
    }
}

impl std::error::Error for EstimateError {}
