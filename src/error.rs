use thiserror::Error;

use crate::solver::SolveStatus;

/// Top-level error type for the heronic solver.
#[derive(Debug, Error)]
pub enum HeronicError {
    #[error(transparent)]
    Set(#[from] SetError),

    #[error(transparent)]
    Solve(#[from] SolveError),
}

/// Errors raised by structural validation of the problem input,
/// before any solver model is constructed.
#[derive(Debug, Error)]
pub enum SetError {
    #[error("sets and weights differ in length: {sets} sets, {weights} weights")]
    LengthMismatch { sets: usize, weights: usize },

    #[error("problem contains no sets")]
    Empty,

    #[error("disk radius {radius} must be nonnegative and finite")]
    InvalidRadius { radius: f64 },

    #[error("polygon has {count} vertices, at least 3 are required")]
    TooFewVertices { count: usize },

    #[error("polygon vertices do not form a convex polygon with consistent winding")]
    NonConvexPolygon,

    #[error("non-finite coordinate in input geometry")]
    NonFiniteCoordinate,

    #[error("weight {value} at index {index} must be nonnegative and finite")]
    InvalidWeight { index: usize, value: f64 },
}

/// Errors raised by the conic solve itself.
#[derive(Debug, Error)]
pub enum SolveError {
    #[error("solver terminated with status {status}")]
    NonOptimal { status: SolveStatus },

    #[error("solver rejected the problem data: {0}")]
    Setup(String),
}

/// Convenience type alias for results using [`HeronicError`].
pub type Result<T> = std::result::Result<T, HeronicError>;
