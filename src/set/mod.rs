use crate::error::{Result, SetError};
use crate::math::{is_convex_polygon, Point2};

/// A convex set in the plane.
///
/// The four shapes share one closed enum so that solver dispatch is
/// exhaustive: adding a shape forces every `match` to handle it. Each
/// value is pure input data, immutable once built and borrowed read-only
/// by the solver for the duration of one solve.
#[derive(Debug, Clone, PartialEq)]
pub enum ConvexSet {
    /// A single fixed location.
    Point { p: Point2 },
    /// A closed line segment between two endpoints.
    Segment { a: Point2, b: Point2 },
    /// A convex polygon given by its boundary vertices (at least 3),
    /// in a consistent winding.
    Polygon { vertices: Vec<Point2> },
    /// A closed disk.
    Disk { center: Point2, radius: f64 },
}

impl ConvexSet {
    /// Creates a point set.
    ///
    /// # Errors
    ///
    /// Returns an error if a coordinate is non-finite.
    pub fn point(p: Point2) -> Result<Self> {
        let set = Self::Point { p };
        set.validate()?;
        Ok(set)
    }

    /// Creates a segment set. Zero-length segments are allowed and behave
    /// like a point.
    ///
    /// # Errors
    ///
    /// Returns an error if a coordinate is non-finite.
    pub fn segment(a: Point2, b: Point2) -> Result<Self> {
        let set = Self::Segment { a, b };
        set.validate()?;
        Ok(set)
    }

    /// Creates a polygon set from its boundary vertices.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than 3 vertices are given, any coordinate
    /// is non-finite, or the vertices are not convex with a consistent
    /// winding.
    pub fn polygon(vertices: Vec<Point2>) -> Result<Self> {
        let set = Self::Polygon { vertices };
        set.validate()?;
        Ok(set)
    }

    /// Creates a disk set.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is negative or any value is
    /// non-finite. A zero radius is allowed and behaves like a point.
    pub fn disk(center: Point2, radius: f64) -> Result<Self> {
        let set = Self::Disk { center, radius };
        set.validate()?;
        Ok(set)
    }

    /// Checks the structural invariants of the shape.
    ///
    /// The solver runs this on every input set before building any model,
    /// so malformed geometry never reaches the conic solver.
    ///
    /// # Errors
    ///
    /// Returns the [`SetError`] describing the first violated invariant.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Point { p } => finite_point(p)?,
            Self::Segment { a, b } => {
                finite_point(a)?;
                finite_point(b)?;
            }
            Self::Polygon { vertices } => {
                if vertices.len() < 3 {
                    return Err(SetError::TooFewVertices {
                        count: vertices.len(),
                    }
                    .into());
                }
                for v in vertices {
                    finite_point(v)?;
                }
                if !is_convex_polygon(vertices) {
                    return Err(SetError::NonConvexPolygon.into());
                }
            }
            Self::Disk { center, radius } => {
                finite_point(center)?;
                if !radius.is_finite() || *radius < 0.0 {
                    return Err(SetError::InvalidRadius { radius: *radius }.into());
                }
            }
        }
        Ok(())
    }
}

fn finite_point(p: &Point2) -> Result<()> {
    if p.x.is_finite() && p.y.is_finite() {
        Ok(())
    } else {
        Err(SetError::NonFiniteCoordinate.into())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::HeronicError;

    #[test]
    fn disk_negative_radius_rejected() {
        let err = ConvexSet::disk(Point2::new(0.0, 0.0), -1.0).unwrap_err();
        assert!(matches!(
            err,
            HeronicError::Set(SetError::InvalidRadius { .. })
        ));
    }

    #[test]
    fn disk_zero_radius_accepted() {
        assert!(ConvexSet::disk(Point2::new(1.0, 2.0), 0.0).is_ok());
    }

    #[test]
    fn polygon_two_vertices_rejected() {
        let err =
            ConvexSet::polygon(vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)]).unwrap_err();
        assert!(matches!(
            err,
            HeronicError::Set(SetError::TooFewVertices { count: 2 })
        ));
    }

    #[test]
    fn polygon_reflex_rejected() {
        let err = ConvexSet::polygon(vec![
            Point2::new(0.0, 0.0),
            Point2::new(4.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 4.0),
        ])
        .unwrap_err();
        assert!(matches!(
            err,
            HeronicError::Set(SetError::NonConvexPolygon)
        ));
    }

    #[test]
    fn polygon_convex_accepted() {
        assert!(ConvexSet::polygon(vec![
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(1.0, 1.5),
        ])
        .is_ok());
    }

    #[test]
    fn point_non_finite_rejected_at_construction() {
        let err = ConvexSet::point(Point2::new(f64::NAN, 0.0)).unwrap_err();
        assert!(matches!(
            err,
            HeronicError::Set(SetError::NonFiniteCoordinate)
        ));
    }

    #[test]
    fn segment_non_finite_rejected_at_construction() {
        let err = ConvexSet::segment(Point2::new(0.0, 0.0), Point2::new(f64::INFINITY, 0.0))
            .unwrap_err();
        assert!(matches!(
            err,
            HeronicError::Set(SetError::NonFiniteCoordinate)
        ));
    }

    #[test]
    fn non_finite_coordinate_rejected() {
        let set = ConvexSet::Point {
            p: Point2::new(f64::NAN, 0.0),
        };
        assert!(set.validate().is_err());

        let set = ConvexSet::Segment {
            a: Point2::new(0.0, 0.0),
            b: Point2::new(f64::INFINITY, 0.0),
        };
        assert!(set.validate().is_err());
    }
}
