// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Closed centripetal Catmull-Rom resampling

use nalgebra::{Point2, Vector2};

/// Knot spacings below this are treated as coincident points.
const MIN_KNOT_SPACING: f64 = 1e-4;

/// Cubic segment in Hermite power form: `c0 + c1 t + c2 t² + c3 t³`.
struct Cubic {
    c0: Vector2<f64>,
    c1: Vector2<f64>,
    c2: Vector2<f64>,
    c3: Vector2<f64>,
}

impl Cubic {
    fn nonuniform(
        x0: Vector2<f64>,
        x1: Vector2<f64>,
        x2: Vector2<f64>,
        x3: Vector2<f64>,
        dt0: f64,
        dt1: f64,
        dt2: f64,
    ) -> Self {
        let t1 = ((x1 - x0) / dt0 - (x2 - x0) / (dt0 + dt1) + (x2 - x1) / dt1) * dt1;
        let t2 = ((x2 - x1) / dt1 - (x3 - x1) / (dt1 + dt2) + (x3 - x2) / dt2) * dt1;

        Self {
            c0: x1,
            c1: t1,
            c2: x1 * -3.0 + x2 * 3.0 - t1 * 2.0 - t2,
            c3: x1 * 2.0 - x2 * 2.0 + t1 + t2,
        }
    }

    fn eval(&self, t: f64) -> Vector2<f64> {
        let t2 = t * t;
        self.c0 + self.c1 * t + self.c2 * t2 + self.c3 * (t2 * t)
    }
}

/// Centripetal knot spacing: squared distance to the power 1/4.
fn knot(a: &Vector2<f64>, b: &Vector2<f64>) -> f64 {
    (b - a).norm_squared().powf(0.25)
}

/// Evaluate the closed spline through `points` at `t ∈ [0, 1)`.
///
/// Each control segment spans an equal share of `t`.
fn point_at(points: &[Point2<f64>], t: f64) -> Point2<f64> {
    let n = points.len();
    let p = t * n as f64;
    let mut segment = p.floor() as usize;
    let mut weight = p - segment as f64;
    if segment >= n {
        segment = n - 1;
        weight = 1.0;
    }

    let at = |offset: isize| -> Vector2<f64> {
        let idx = (segment as isize + offset).rem_euclid(n as isize) as usize;
        points[idx].coords
    };
    let (p0, p1, p2, p3) = (at(-1), at(0), at(1), at(2));

    let mut dt0 = knot(&p0, &p1);
    let mut dt1 = knot(&p1, &p2);
    let mut dt2 = knot(&p2, &p3);

    if dt1 < MIN_KNOT_SPACING {
        dt1 = 1.0;
    }
    if dt0 < MIN_KNOT_SPACING {
        dt0 = dt1;
    }
    if dt2 < MIN_KNOT_SPACING {
        dt2 = dt1;
    }

    Point2::from(Cubic::nonuniform(p0, p1, p2, p3, dt0, dt1, dt2).eval(weight))
}

/// Resample a closed ring as an interpolating centripetal Catmull-Rom curve.
///
/// Returns `samples` points evenly spaced in curve parameter, starting at
/// `points[0]`; the closing point is not repeated. Rings of fewer than three
/// points are returned unchanged.
pub fn resample_closed(points: &[Point2<f64>], samples: usize) -> Vec<Point2<f64>> {
    if points.len() < 3 || samples == 0 {
        return points.to_vec();
    }

    (0..samples)
        .map(|i| point_at(points, i as f64 / samples as f64))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::math::signed_area;
    use approx::assert_relative_eq;

    fn square() -> Vec<Point2<f64>> {
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(4.0, 0.0),
            Point2::new(4.0, 4.0),
            Point2::new(0.0, 4.0),
        ]
    }

    #[test]
    fn test_interpolates_control_points() {
        let ring = square();
        let samples = resample_closed(&ring, 20);
        assert_eq!(samples.len(), 20);
        // every 5th sample sits on a control point
        for (i, control) in ring.iter().enumerate() {
            let s = samples[i * 5];
            assert_relative_eq!(s.x, control.x, epsilon = 1e-9);
            assert_relative_eq!(s.y, control.y, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_preserves_orientation() {
        let ring = square();
        let samples = resample_closed(&ring, 40);
        assert!(signed_area(&samples) > 0.0);

        let mut reversed = ring.clone();
        reversed.reverse();
        assert!(signed_area(&resample_closed(&reversed, 40)) < 0.0);
    }

    #[test]
    fn test_rounds_corners() {
        let samples = resample_closed(&square(), 40);
        // the curve bulges out between corners; area stays near the square's
        let area = signed_area(&samples);
        assert!(area > 12.0 && area < 24.0, "area {area}");
        assert!(samples.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
    }

    #[test]
    fn test_coincident_points_stay_finite() {
        let ring = vec![
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(1.0, 2.0),
        ];
        let samples = resample_closed(&ring, 20);
        assert!(samples.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
    }

    #[test]
    fn test_short_ring_untouched() {
        let ring = vec![Point2::new(0.0, 0.0), Point2::new(1.0, 1.0)];
        assert_eq!(resample_closed(&ring, 20), ring);
    }
}
