//! Deterministic example scenes for the solver.
//!
//! Each example maps a sweep parameter `alpha` in `[0, 1]` to a fixed
//! `(sets, weights, canvas)` triple, so an animation driver can replay a
//! sweep and always obtain identical problems. Rendering and interaction
//! stay outside this crate; a scene is pure input data.

use std::f64::consts::PI;

use crate::error::Result;
use crate::math::{Point2, Vector2};
use crate::set::ConvexSet;

/// Axis-aligned drawing bounds suggested for a scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            x_min: -2.0,
            x_max: 6.0,
            y_min: -2.0,
            y_max: 6.0,
        }
    }
}

/// One ready-to-solve problem instance plus its drawing bounds.
#[derive(Debug, Clone)]
pub struct Scene {
    pub sets: Vec<ConvexSet>,
    pub weights: Vec<f64>,
    pub canvas: Canvas,
}

/// The built-in example catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Example {
    /// Three fixed points, one weight morphing with `alpha`.
    ThreePoints,
    /// Two points and a segment rotating about its midpoint.
    PointsAndSegment,
    /// A point and two disks whose positions and radii vary.
    PointAndDisks,
    /// A fixed convex pentagon and a point orbiting a circle.
    PolygonAndOrbitingPoint,
}

impl Example {
    pub const ALL: [Self; 4] = [
        Self::ThreePoints,
        Self::PointsAndSegment,
        Self::PointAndDisks,
        Self::PolygonAndOrbitingPoint,
    ];

    /// Short human-readable name for menus and figure titles.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::ThreePoints => "Three points (classic Fermat/Heron)",
            Self::PointsAndSegment => "Two points + a segment",
            Self::PointAndDisks => "A point + two disks",
            Self::PolygonAndOrbitingPoint => "Polygon + moving point",
        }
    }

    /// Builds the scene for a sweep parameter `alpha` in `[0, 1]`.
    ///
    /// Deterministic: the same `alpha` always produces an identical scene.
    ///
    /// # Errors
    ///
    /// Returns an error if a generated shape fails validation; the
    /// built-in generators stay within valid ranges for any finite
    /// `alpha`.
    pub fn scene(self, alpha: f64) -> Result<Scene> {
        match self {
            Self::ThreePoints => three_points(alpha),
            Self::PointsAndSegment => points_and_segment(alpha),
            Self::PointAndDisks => point_and_disks(alpha),
            Self::PolygonAndOrbitingPoint => polygon_and_orbiting_point(alpha),
        }
    }
}

fn three_points(alpha: f64) -> Result<Scene> {
    Ok(Scene {
        sets: vec![
            ConvexSet::point(Point2::new(0.0, 0.0))?,
            ConvexSet::point(Point2::new(4.0, 0.0))?,
            ConvexSet::point(Point2::new(2.0, 3.5))?,
        ],
        weights: vec![1.0, 1.0, 0.8 + 0.4 * alpha],
        canvas: Canvas::default(),
    })
}

fn points_and_segment(alpha: f64) -> Result<Scene> {
    let a = Point2::new(1.0, 0.2);
    let b = Point2::new(5.0, 0.5);
    let mid = nalgebra::center(&a, &b);
    let angle = (alpha - 0.5) * 0.6;
    Ok(Scene {
        sets: vec![
            ConvexSet::point(Point2::new(0.5, 4.5))?,
            ConvexSet::point(Point2::new(4.5, 4.0))?,
            ConvexSet::segment(rotate_about(a, mid, angle), rotate_about(b, mid, angle))?,
        ],
        weights: vec![1.0, 1.0, 1.0],
        canvas: Canvas::default(),
    })
}

fn point_and_disks(alpha: f64) -> Result<Scene> {
    Ok(Scene {
        sets: vec![
            ConvexSet::point(Point2::new(1.0, 1.2))?,
            ConvexSet::disk(Point2::new(4.0, 1.2 + 0.8 * alpha), 0.7 + 0.3 * alpha)?,
            ConvexSet::disk(Point2::new(2.0 + (2.0 * PI * alpha).sin(), 4.5), 0.9)?,
        ],
        weights: vec![1.0, 0.9, 1.1],
        canvas: Canvas::default(),
    })
}

fn polygon_and_orbiting_point(alpha: f64) -> Result<Scene> {
    let pentagon = ConvexSet::polygon(vec![
        Point2::new(0.5, 1.0),
        Point2::new(1.8, 0.2),
        Point2::new(3.8, 0.8),
        Point2::new(4.2, 2.8),
        Point2::new(1.2, 3.5),
    ])?;
    let angle = 2.0 * PI * alpha;
    let orbit = Point2::new(3.5, 3.7) + 1.5 * Vector2::new(angle.cos(), angle.sin());
    Ok(Scene {
        sets: vec![pentagon, ConvexSet::point(orbit)?],
        weights: vec![1.0, 1.0],
        canvas: Canvas::default(),
    })
}

fn rotate_about(p: Point2, center: Point2, angle: f64) -> Point2 {
    let rot = nalgebra::Rotation2::new(angle);
    center + rot * (p - center)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::solver::solve_heron;

    #[test]
    fn scenes_are_deterministic() {
        for example in Example::ALL {
            let a = example.scene(0.37).unwrap();
            let b = example.scene(0.37).unwrap();
            assert_eq!(a.sets, b.sets);
            assert_eq!(a.weights, b.weights);
        }
    }

    #[test]
    fn scenes_have_parallel_weights() {
        for example in Example::ALL {
            let scene = example.scene(0.0).unwrap();
            assert_eq!(scene.sets.len(), scene.weights.len());
            assert!(!scene.sets.is_empty());
        }
    }

    #[test]
    fn every_scene_solves_across_the_sweep() {
        for example in Example::ALL {
            for step in 0..=4 {
                let alpha = f64::from(step) / 4.0;
                let scene = example.scene(alpha).unwrap();
                let sol = solve_heron(&scene.sets, &scene.weights).unwrap();
                assert!(sol.objective.is_finite(), "{} at alpha={alpha}", example.label());
            }
        }
    }

    #[test]
    fn segment_rotation_keeps_midpoint() {
        let scene = Example::PointsAndSegment.scene(1.0).unwrap();
        let ConvexSet::Segment { a, b } = &scene.sets[2] else {
            panic!("expected a segment");
        };
        let mid = nalgebra::center(a, b);
        assert!((mid - Point2::new(3.0, 0.35)).norm() < 1e-12);
    }

    #[test]
    fn labels_are_distinct() {
        for (i, a) in Example::ALL.iter().enumerate() {
            for b in &Example::ALL[i + 1..] {
                assert_ne!(a.label(), b.label());
            }
        }
    }
}
