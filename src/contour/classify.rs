// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Outer/hole classification and hole nesting

use super::trace::Contour;
use crate::utils::math::{point_in_polygon, signed_area};
use nalgebra::Point2;
use tracing::debug;

/// An outer contour with the hole contours nested directly inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    pub outer: Contour,
    pub holes: Vec<Contour>,
}

impl Shape {
    pub fn new(outer: Contour) -> Self {
        Self {
            outer,
            holes: Vec::new(),
        }
    }

    /// Outer area minus hole areas, in grid units.
    pub fn net_area(&self) -> f64 {
        let holes: f64 = self
            .holes
            .iter()
            .map(|h| signed_area(&h.to_f64()).abs())
            .sum();
        signed_area(&self.outer.to_f64()).abs() - holes
    }
}

/// Point used to test which outer boundary holds a hole: the midpoint of
/// its first segment. Lattice edges are never shared between contours, so
/// this point is never on another contour.
fn sample_point(points: &[Point2<f64>]) -> Option<Point2<f64>> {
    match points {
        [] => None,
        [only] => Some(*only),
        [a, b, ..] => Some(Point2::from((a.coords + b.coords) / 2.0)),
    }
}

/// Group contours into shapes.
///
/// Contours are visited by descending absolute area. Positive area starts a
/// new shape; negative area is a hole and goes to the innermost shape
/// created so far whose outer boundary contains it. A hole without a
/// container becomes a standalone shape.
pub fn classify_contours(contours: Vec<Contour>) -> Vec<Shape> {
    let mut entries: Vec<(f64, Vec<Point2<f64>>, Contour)> = contours
        .into_iter()
        .map(|c| {
            let pts = c.to_f64();
            (signed_area(&pts), pts, c)
        })
        .collect();

    // Stable, so equal areas keep tracing order.
    entries.sort_by(|a, b| b.0.abs().total_cmp(&a.0.abs()));

    let mut shapes: Vec<Shape> = Vec::new();
    let mut outers: Vec<Vec<Point2<f64>>> = Vec::new();
    let mut promoted = 0usize;

    for (area, points, contour) in entries {
        if area >= 0.0 {
            shapes.push(Shape::new(contour));
            outers.push(points);
            continue;
        }

        let container = sample_point(&points).and_then(|sample| {
            outers
                .iter()
                .rposition(|outer| point_in_polygon(&sample, outer))
        });

        match container {
            Some(index) => shapes[index].holes.push(contour),
            None => {
                promoted += 1;
                shapes.push(Shape::new(contour));
                outers.push(points);
            }
        }
    }

    if promoted > 0 {
        debug!(promoted, "holes without a container promoted to shapes");
    }

    shapes
}
