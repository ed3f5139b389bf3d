use std::fmt;

use clarabel::solver::{DefaultSettings, DefaultSolver, IPSolver, SolverStatus};
use log::debug;

use crate::error::{Result, SetError, SolveError};
use crate::math::Point2;
use crate::model::{membership, ConicModel, LinExpr};
use crate::set::ConvexSet;

/// Termination status of a solve, as surfaced to the caller.
///
/// Only `Optimal` and `OptimalInaccurate` ever appear in a returned
/// [`SolveResult`]; the remaining variants are carried inside
/// [`SolveError::NonOptimal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    Optimal,
    /// The solver stopped at reduced accuracy. The result is usable but
    /// should be presented with a precision caveat, not as exact.
    OptimalInaccurate,
    Infeasible,
    Unbounded,
    SolverError,
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Optimal => "optimal",
            Self::OptimalInaccurate => "optimal (inaccurate)",
            Self::Infeasible => "infeasible",
            Self::Unbounded => "unbounded",
            Self::SolverError => "solver error",
        };
        f.write_str(s)
    }
}

/// Result of one weighted closest-point solve.
#[derive(Debug, Clone)]
pub struct SolveResult {
    /// The optimal query point.
    pub x: Point2,
    /// The optimal point of each set closest to `x`, in input order.
    pub closest_points: Vec<Point2>,
    /// The optimal epigraph value per set; upper-bounds the distance from
    /// `x` to the set and is tight at optimality.
    pub distances: Vec<f64>,
    /// The attained minimum of the weighted distance sum.
    pub objective: f64,
    /// `Optimal` or `OptimalInaccurate`.
    pub status: SolveStatus,
}

/// Finds the point minimizing the weighted sum of Euclidean distances to
/// a collection of convex sets.
///
/// Builds one second-order-cone program jointly over the query point `x`,
/// a closest-point variable per set, and an epigraph variable `t_i` per
/// set with `t_i >= ||x - y_i||`, then solves it in a single
/// interior-point pass. Each call assembles a fresh model; nothing is
/// shared or reused across solves.
pub struct SolveHeron<'a> {
    sets: &'a [ConvexSet],
    weights: &'a [f64],
}

impl<'a> SolveHeron<'a> {
    /// Creates a new solve over the given sets and parallel weights.
    #[must_use]
    pub fn new(sets: &'a [ConvexSet], weights: &'a [f64]) -> Self {
        Self { sets, weights }
    }

    /// Executes the solve.
    ///
    /// # Errors
    ///
    /// Returns [`SetError`] when the input fails structural validation
    /// (length mismatch, empty problem, malformed shape, negative or
    /// non-finite weight), and [`SolveError`] when the conic solver
    /// terminates with a non-optimal status. No partial result is ever
    /// returned on failure.
    pub fn execute(&self) -> Result<SolveResult> {
        self.validate()?;

        let m = self.sets.len();
        let mut model = ConicModel::new();
        let x0 = model.new_var();
        let x1 = model.new_var();

        let mut closest = Vec::with_capacity(m);
        let mut epigraph = Vec::with_capacity(m);
        for (set, &w) in self.sets.iter().zip(self.weights) {
            let y = membership(set, &mut model);
            let t = model.new_var();
            model.nonneg(LinExpr::var(t));
            model.objective_term(t, w);
            model.soc(vec![
                LinExpr::var(t),
                LinExpr::var(x0).minus(&y.coord(0)),
                LinExpr::var(x1).minus(&y.coord(1)),
            ]);
            closest.push(y);
            epigraph.push(t);
        }

        debug!(
            "assembled heron model: {} sets, {} variables, {} rows",
            m,
            model.n_vars(),
            model.n_rows()
        );

        let stuffed = model.stuff();
        // The objective is flat near the minimizer, so the default gap
        // tolerance pins x down only to ~1e-4. Tighten it.
        let settings = DefaultSettings {
            verbose: false,
            tol_gap_abs: 1e-12,
            tol_gap_rel: 1e-12,
            tol_feas: 1e-12,
            ..DefaultSettings::default()
        };
        let mut solver = DefaultSolver::new(
            &stuffed.p,
            &stuffed.q,
            &stuffed.a,
            &stuffed.b,
            &stuffed.cones,
            settings,
        )
        .map_err(|e| SolveError::Setup(format!("{e:?}")))?;
        solver.solve();

        let solution = &solver.solution;
        let status = map_status(solution.status);
        debug!(
            "solve finished: {} after {} iterations in {:.3}ms",
            status,
            solution.iterations,
            solution.solve_time * 1e3
        );
        if !matches!(
            status,
            SolveStatus::Optimal | SolveStatus::OptimalInaccurate
        ) {
            return Err(SolveError::NonOptimal { status }.into());
        }

        let z = &solution.x;
        Ok(SolveResult {
            x: Point2::new(z[x0], z[x1]),
            closest_points: closest.iter().map(|y| y.eval(z)).collect(),
            distances: epigraph.iter().map(|&t| z[t]).collect(),
            objective: solution.obj_val,
            status,
        })
    }

    fn validate(&self) -> Result<()> {
        if self.sets.len() != self.weights.len() {
            return Err(SetError::LengthMismatch {
                sets: self.sets.len(),
                weights: self.weights.len(),
            }
            .into());
        }
        if self.sets.is_empty() {
            return Err(SetError::Empty.into());
        }
        for set in self.sets {
            set.validate()?;
        }
        for (index, &value) in self.weights.iter().enumerate() {
            if !value.is_finite() || value < 0.0 {
                return Err(SetError::InvalidWeight { index, value }.into());
            }
        }
        Ok(())
    }
}

/// Solves `min_x sum(w_i * dist(x, C_i))` over convex sets in the plane.
///
/// Convenience wrapper around [`SolveHeron`].
///
/// # Errors
///
/// See [`SolveHeron::execute`].
pub fn solve_heron(sets: &[ConvexSet], weights: &[f64]) -> Result<SolveResult> {
    SolveHeron::new(sets, weights).execute()
}

fn map_status(status: SolverStatus) -> SolveStatus {
    match status {
        SolverStatus::Solved => SolveStatus::Optimal,
        SolverStatus::AlmostSolved => SolveStatus::OptimalInaccurate,
        SolverStatus::PrimalInfeasible | SolverStatus::AlmostPrimalInfeasible => {
            SolveStatus::Infeasible
        }
        SolverStatus::DualInfeasible | SolverStatus::AlmostDualInfeasible => SolveStatus::Unbounded,
        _ => SolveStatus::SolverError,
    }
}
