mod membership;

pub use membership::{membership, AffinePoint};

use clarabel::algebra::CscMatrix;
use clarabel::solver::SupportedConeT;
use log::trace;

/// A scalar affine expression `constant + sum(coeff_j * var_j)` over the
/// decision variables of a [`ConicModel`].
#[derive(Debug, Clone, Default)]
pub struct LinExpr {
    pub constant: f64,
    pub terms: Vec<(usize, f64)>,
}

impl LinExpr {
    /// An expression with no variable terms.
    #[must_use]
    pub fn constant(value: f64) -> Self {
        Self {
            constant: value,
            terms: Vec::new(),
        }
    }

    /// The expression `1.0 * var`.
    #[must_use]
    pub fn var(index: usize) -> Self {
        Self::term(index, 1.0)
    }

    /// The expression `coeff * var`.
    #[must_use]
    pub fn term(index: usize, coeff: f64) -> Self {
        Self {
            constant: 0.0,
            terms: vec![(index, coeff)],
        }
    }

    /// Returns `self - other`.
    #[must_use]
    pub fn minus(mut self, other: &Self) -> Self {
        self.constant -= other.constant;
        self.terms
            .extend(other.terms.iter().map(|&(v, c)| (v, -c)));
        self
    }
}

/// Incrementally assembled conic program in the solver's native form
///
/// ```text
/// minimize    q' z
/// subject to  A z + s = b,   s in K
/// ```
///
/// where `K` is a product of a zero cone, a nonnegative cone, and
/// second-order cones, in that row order. Every constraint is recorded as
/// the affine expression that the corresponding slack `s` must equal.
#[derive(Debug, Default)]
pub struct ConicModel {
    n_vars: usize,
    objective: Vec<f64>,
    eq_rows: Vec<LinExpr>,
    nonneg_rows: Vec<LinExpr>,
    soc_blocks: Vec<Vec<LinExpr>>,
}

impl ConicModel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a fresh decision variable and returns its index.
    pub fn new_var(&mut self) -> usize {
        let index = self.n_vars;
        self.n_vars += 1;
        self.objective.push(0.0);
        index
    }

    #[must_use]
    pub fn n_vars(&self) -> usize {
        self.n_vars
    }

    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.eq_rows.len()
            + self.nonneg_rows.len()
            + self.soc_blocks.iter().map(Vec::len).sum::<usize>()
    }

    /// Adds `coeff * var` to the linear objective.
    pub fn objective_term(&mut self, var: usize, coeff: f64) {
        self.objective[var] += coeff;
    }

    /// Constrains `expr == 0` (zero cone row).
    pub fn eq_zero(&mut self, expr: LinExpr) {
        self.eq_rows.push(expr);
    }

    /// Constrains `expr >= 0` (nonnegative cone row).
    pub fn nonneg(&mut self, expr: LinExpr) {
        self.nonneg_rows.push(expr);
    }

    /// Constrains `block[0] >= || block[1..] ||_2` (second-order cone).
    pub fn soc(&mut self, block: Vec<LinExpr>) {
        debug_assert!(block.len() >= 2);
        self.soc_blocks.push(block);
    }

    /// Stuffs the accumulated rows into Clarabel's sparse `(P, q, A, b)`
    /// data with the matching cone list.
    #[must_use]
    pub fn stuff(&self) -> StuffedProblem {
        let n = self.n_vars;
        let m = self.n_rows();

        // Row order: zero cone, nonnegative cone, then SOC blocks.
        let rows = self
            .eq_rows
            .iter()
            .chain(self.nonneg_rows.iter())
            .chain(self.soc_blocks.iter().flatten());

        let mut b = Vec::with_capacity(m);
        let mut triplets: Vec<(usize, usize, f64)> = Vec::new();
        for (row, expr) in rows.enumerate() {
            // The slack equals the expression: s = b - A z, so the
            // variable coefficients enter A negated.
            b.push(expr.constant);
            for &(var, coeff) in &expr.terms {
                if coeff != 0.0 {
                    triplets.push((var, row, -coeff));
                }
            }
        }

        let mut cones: Vec<SupportedConeT<f64>> = Vec::new();
        if !self.eq_rows.is_empty() {
            cones.push(SupportedConeT::ZeroConeT(self.eq_rows.len()));
        }
        if !self.nonneg_rows.is_empty() {
            cones.push(SupportedConeT::NonnegativeConeT(self.nonneg_rows.len()));
        }
        for block in &self.soc_blocks {
            cones.push(SupportedConeT::SecondOrderConeT(block.len()));
        }

        trace!(
            "stuffed conic model: {} vars, {} rows, {} cones",
            n,
            m,
            cones.len()
        );

        StuffedProblem {
            p: CscMatrix::zeros((n, n)),
            q: self.objective.clone(),
            a: csc_from_triplets(m, n, triplets),
            b,
            cones,
        }
    }
}

/// A conic program in the sparse form consumed by Clarabel.
#[derive(Debug)]
pub struct StuffedProblem {
    pub p: CscMatrix<f64>,
    pub q: Vec<f64>,
    pub a: CscMatrix<f64>,
    pub b: Vec<f64>,
    pub cones: Vec<SupportedConeT<f64>>,
}

/// Builds a compressed-sparse-column matrix from `(col, row, value)`
/// triplets, summing duplicates.
fn csc_from_triplets(m: usize, n: usize, mut triplets: Vec<(usize, usize, f64)>) -> CscMatrix<f64> {
    triplets.sort_unstable_by(|x, y| (x.0, x.1).cmp(&(y.0, y.1)));

    let mut colptr = Vec::with_capacity(n + 1);
    let mut rowval = Vec::with_capacity(triplets.len());
    let mut nzval: Vec<f64> = Vec::with_capacity(triplets.len());

    colptr.push(0);
    let mut col = 0;
    for (c, r, v) in triplets {
        while col < c {
            colptr.push(rowval.len());
            col += 1;
        }
        if rowval.last() == Some(&r) && colptr.last() != Some(&rowval.len()) {
            // Duplicate entry in the same column: accumulate.
            if let Some(last) = nzval.last_mut() {
                *last += v;
            }
        } else {
            rowval.push(r);
            nzval.push(v);
        }
    }
    while col < n {
        colptr.push(rowval.len());
        col += 1;
    }

    CscMatrix::new(m, n, colptr, rowval, nzval)
}
