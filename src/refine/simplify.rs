// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Iterative-endpoints (Douglas-Peucker) reduction for closed rings

use crate::utils::math::distance_to_segment;
use nalgebra::Point2;

/// Douglas-Peucker over an open polyline. First and last points are kept.
///
/// Uses an explicit work stack, so long near-collinear chains cannot
/// overflow the call stack.
pub fn douglas_peucker(points: &[Point2<f64>], tolerance: f64) -> Vec<Point2<f64>> {
    if points.len() <= 2 {
        return points.to_vec();
    }

    let mut keep = vec![false; points.len()];
    keep[0] = true;
    keep[points.len() - 1] = true;

    let mut stack = vec![(0, points.len() - 1)];
    while let Some((anchor, floater)) = stack.pop() {
        if anchor + 1 >= floater {
            continue;
        }

        let mut max_dist = 0.0;
        let mut furthest = anchor;
        for i in (anchor + 1)..floater {
            let dist = distance_to_segment(&points[i], &points[anchor], &points[floater]);
            if dist > max_dist {
                max_dist = dist;
                furthest = i;
            }
        }

        if max_dist > tolerance {
            keep[furthest] = true;
            stack.push((anchor, furthest));
            stack.push((furthest, floater));
        }
    }

    points
        .iter()
        .zip(keep)
        .filter_map(|(p, k)| k.then_some(*p))
        .collect()
}

/// Simplify a closed ring (first point not repeated at the end).
///
/// The ring is opened at its first point, which is always kept. A tolerance
/// of zero or less, or a ring of two points or fewer, is returned unchanged.
pub fn simplify_closed(points: &[Point2<f64>], tolerance: f64) -> Vec<Point2<f64>> {
    if tolerance <= 0.0 || points.len() <= 2 {
        return points.to_vec();
    }

    let mut open = Vec::with_capacity(points.len() + 1);
    open.extend_from_slice(points);
    open.push(points[0]);

    let mut simplified = douglas_peucker(&open, tolerance);
    simplified.pop();
    simplified
}
