/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Computes the signed area of a polygon (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Checks whether a vertex loop describes a convex polygon with a
/// consistent winding.
///
/// Walks the boundary and requires every cross product of consecutive
/// edges to carry the same sign. Collinear triples (cross product within
/// [`TOLERANCE`]) are accepted, so degenerate-but-convex input passes.
#[must_use]
pub fn is_convex_polygon(points: &[Point2]) -> bool {
    let n = points.len();
    if n < 3 {
        return false;
    }
    let mut ccw: Option<bool> = None;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        let c = points[(i + 2) % n];
        let cross = (b.x - a.x) * (c.y - b.y) - (b.y - a.y) * (c.x - b.x);
        if cross.abs() < TOLERANCE {
            continue;
        }
        match ccw {
            None => ccw = Some(cross > 0.0),
            Some(turn) if turn != (cross > 0.0) => return false,
            Some(_) => {}
        }
    }
    true
}
