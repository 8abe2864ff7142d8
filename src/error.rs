use thiserror::Error;

/// Top-level error type for the spatial3d geometry kernel.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Operation(#[from] OperationError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Errors raised while constructing a geometric value.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("parameter {parameter} = {value} is out of range [{min}, {max}]")]
    ParameterOutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,

    #[error("vector length {length} deviates from 1 by more than {tolerance}")]
    NotUnitLength { length: f64, tolerance: f64 },

    #[error("start point and end point are the same")]
    CoincidentPoints,

    #[error("points are collinear: {0}")]
    Collinear(String),

    #[error("matrix is singular")]
    SingularMatrix,

    #[error("invalid matrix: {0}")]
    InvalidMatrix(String),
}

/// Errors raised when an operation's precondition does not hold.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("not parallel: {0}")]
    NotParallel(String),

    #[error("parallel: {0}")]
    Parallel(String),

    #[error("line lies in the plane")]
    LiesInPlane,
}

/// Errors raised while reading text.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("could not parse {input:?}: {reason}")]
    Malformed { input: String, reason: String },
}

impl ParseError {
    pub(crate) fn malformed(input: &str, reason: impl Into<String>) -> Self {
        Self::Malformed {
            input: input.to_owned(),
            reason: reason.into(),
        }
    }
}

/// Convenience type alias for results using [`SpatialError`].
pub type Result<T> = std::result::Result<T, SpatialError>;
