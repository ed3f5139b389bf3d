pub mod error;
pub mod math;
pub mod model;
pub mod scene;
pub mod set;
pub mod solver;

pub use error::{HeronicError, Result};
pub use set::ConvexSet;
pub use solver::{solve_heron, SolveHeron, SolveResult, SolveStatus};
