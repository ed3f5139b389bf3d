use crate::math::{Point2, Vector2};
use crate::set::ConvexSet;

use super::{ConicModel, LinExpr};

/// An affine expression for a point in the plane,
/// `base + sum(coeff_j * var_j)` with vector-valued coefficients.
///
/// The closest-point variable of every set variant is expressed this way,
/// so the coupling cone and the result extraction are uniform across
/// shapes.
#[derive(Debug, Clone)]
pub struct AffinePoint {
    base: Vector2,
    terms: Vec<(usize, Vector2)>,
}

impl AffinePoint {
    /// A constant expression with no variable terms.
    #[must_use]
    pub fn constant(p: Point2) -> Self {
        Self {
            base: p.coords,
            terms: Vec::new(),
        }
    }

    /// The scalar expression for one coordinate (`axis` 0 or 1).
    #[must_use]
    pub fn coord(&self, axis: usize) -> LinExpr {
        LinExpr {
            constant: self.base[axis],
            terms: self
                .terms
                .iter()
                .filter(|(_, c)| c[axis] != 0.0)
                .map(|&(v, c)| (v, c[axis]))
                .collect(),
        }
    }

    /// Evaluates the expression at a solution vector.
    #[must_use]
    pub fn eval(&self, values: &[f64]) -> Point2 {
        let mut p = self.base;
        for &(v, c) in &self.terms {
            p += c * values[v];
        }
        Point2::from(p)
    }
}

/// Emits the membership parameterization of a convex set into the model:
/// auxiliary variables plus the linear/conic rows that hold exactly when
/// the returned point expression lies in the set.
///
/// - `Point`: the constant expression `p`; a singleton needs no variable.
/// - `Segment`: `y = a + theta * (b - a)` with `theta` in `[0, 1]`.
/// - `Polygon`: convex combination `y = sum(lambda_j * V_j)` with
///   `lambda >= 0`, `sum(lambda) = 1`.
/// - `Disk`: a free 2-vector `y` with `||y - center|| <= radius`.
///
/// Every variant yields a non-empty feasible region; malformed shapes are
/// rejected by [`ConvexSet::validate`] before this runs.
pub fn membership(set: &ConvexSet, model: &mut ConicModel) -> AffinePoint {
    match set {
        ConvexSet::Point { p } => AffinePoint::constant(*p),
        ConvexSet::Segment { a, b } => {
            let theta = model.new_var();
            model.nonneg(LinExpr::var(theta));
            model.nonneg(LinExpr::constant(1.0).minus(&LinExpr::var(theta)));
            AffinePoint {
                base: a.coords,
                terms: vec![(theta, b - a)],
            }
        }
        ConvexSet::Polygon { vertices } => {
            let mut lambda_sum = LinExpr::constant(-1.0);
            let mut terms = Vec::with_capacity(vertices.len());
            for v in vertices {
                let lambda = model.new_var();
                model.nonneg(LinExpr::var(lambda));
                lambda_sum.terms.push((lambda, 1.0));
                terms.push((lambda, v.coords));
            }
            model.eq_zero(lambda_sum);
            AffinePoint {
                base: Vector2::zeros(),
                terms,
            }
        }
        ConvexSet::Disk { center, radius } => {
            let y0 = model.new_var();
            let y1 = model.new_var();
            model.soc(vec![
                LinExpr::constant(*radius),
                LinExpr::var(y0).minus(&LinExpr::constant(center.x)),
                LinExpr::var(y1).minus(&LinExpr::constant(center.y)),
            ]);
            AffinePoint {
                base: Vector2::zeros(),
                terms: vec![(y0, Vector2::x()), (y1, Vector2::y())],
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn point_needs_no_variables() {
        let mut model = ConicModel::new();
        let y = membership(&ConvexSet::point(Point2::new(1.0, 2.0)).unwrap(), &mut model);
        assert_eq!(model.n_vars(), 0);
        assert_eq!(model.n_rows(), 0);
        assert_eq!(y.eval(&[]), Point2::new(1.0, 2.0));
    }

    #[test]
    fn segment_spans_endpoints() {
        let mut model = ConicModel::new();
        let a = Point2::new(1.0, 0.0);
        let b = Point2::new(3.0, 4.0);
        let y = membership(&ConvexSet::segment(a, b).unwrap(), &mut model);
        assert_eq!(model.n_vars(), 1);
        assert_eq!(model.n_rows(), 2);
        assert_eq!(y.eval(&[0.0]), a);
        assert_eq!(y.eval(&[1.0]), b);
        assert_eq!(y.eval(&[0.5]), Point2::new(2.0, 2.0));
    }

    #[test]
    fn polygon_is_barycentric() {
        let mut model = ConicModel::new();
        let vertices = vec![
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(0.0, 2.0),
        ];
        let y = membership(
            &ConvexSet::Polygon {
                vertices: vertices.clone(),
            },
            &mut model,
        );
        // One lambda per vertex, one nonneg row each, one equality row.
        assert_eq!(model.n_vars(), 3);
        assert_eq!(model.n_rows(), 4);
        assert_eq!(y.eval(&[1.0, 0.0, 0.0]), vertices[0]);
        let centroid = y.eval(&[1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0]);
        assert!((centroid - Point2::new(2.0 / 3.0, 2.0 / 3.0)).norm() < 1e-12);
    }

    #[test]
    fn disk_adds_one_cone() {
        let mut model = ConicModel::new();
        let y = membership(
            &ConvexSet::Disk {
                center: Point2::new(5.0, -1.0),
                radius: 2.0,
            },
            &mut model,
        );
        assert_eq!(model.n_vars(), 2);
        assert_eq!(model.n_rows(), 3);
        assert_eq!(y.eval(&[4.0, -1.5]), Point2::new(4.0, -1.5));
    }

    #[test]
    fn coord_drops_zero_coefficients() {
        let mut model = ConicModel::new();
        let y = membership(
            &ConvexSet::Disk {
                center: Point2::new(0.0, 0.0),
                radius: 1.0,
            },
            &mut model,
        );
        // y0 only contributes to axis 0, y1 only to axis 1.
        assert_eq!(y.coord(0).terms.len(), 1);
        assert_eq!(y.coord(1).terms.len(), 1);
    }
}
