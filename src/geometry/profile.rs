// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Planar polygon-with-holes profiles

use crate::utils::math::signed_area;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Profiles with less absolute area than this are not extruded.
pub const MIN_PROFILE_AREA: f64 = 1e-9;

/// One outer ring and the hole rings cut from it. Rings are implicitly
/// closed; the first point is not repeated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub outer: Vec<Point2<f64>>,
    pub holes: Vec<Vec<Point2<f64>>>,
}

impl Profile {
    pub fn new(outer: Vec<Point2<f64>>, holes: Vec<Vec<Point2<f64>>>) -> Self {
        Self { outer, holes }
    }

    /// Axis-aligned rectangle centered on the origin.
    pub fn rectangle(width: f64, height: f64) -> Self {
        let (hw, hh) = (width / 2.0, height / 2.0);
        Self::new(
            vec![
                Point2::new(-hw, -hh),
                Point2::new(hw, -hh),
                Point2::new(hw, hh),
                Point2::new(-hw, hh),
            ],
            Vec::new(),
        )
    }

    pub fn outer_area(&self) -> f64 {
        signed_area(&self.outer).abs()
    }

    pub fn hole_areas(&self) -> Vec<f64> {
        self.holes.iter().map(|h| signed_area(h).abs()).collect()
    }

    /// Outer area minus hole areas.
    pub fn area(&self) -> f64 {
        self.outer_area() - self.hole_areas().iter().sum::<f64>()
    }

    pub fn is_degenerate(&self) -> bool {
        self.outer.len() < 3 || self.outer_area() < MIN_PROFILE_AREA
    }

    /// Apply `f` to every point.
    pub fn map_points(&self, f: impl Fn(&Point2<f64>) -> Point2<f64>) -> Self {
        Self {
            outer: self.outer.iter().map(&f).collect(),
            holes: self
                .holes
                .iter()
                .map(|h| h.iter().map(&f).collect())
                .collect(),
        }
    }

    /// Grid corner coordinates to physical coordinates: scaled by
    /// `cell_size`, Y flipped to point up, centered on the grid midpoint.
    pub fn to_physical(&self, grid_width: usize, grid_height: usize, cell_size: f64) -> Self {
        let cx = grid_width as f64 / 2.0;
        let cy = grid_height as f64 / 2.0;
        self.map_points(|p| Point2::new((p.x - cx) * cell_size, (cy - p.y) * cell_size))
    }

    /// Outer ring counter-clockwise, holes clockwise, with repeated and
    /// straight-through points removed. Degenerate hole rings are dropped.
    pub fn normalized(&self) -> Self {
        let mut outer = clean_ring(&self.outer);
        if signed_area(&outer) < 0.0 {
            outer.reverse();
        }

        let holes = self
            .holes
            .iter()
            .map(|h| clean_ring(h))
            .filter(|h| h.len() >= 3 && signed_area(h).abs() >= MIN_PROFILE_AREA)
            .map(|mut hole| {
                if signed_area(&hole) > 0.0 {
                    hole.reverse();
                }
                hole
            })
            .collect();

        Self { outer, holes }
    }
}

/// Drop points equal to their predecessor and points lying on the straight
/// segment between their neighbors. Traced outlines carry one point per
/// cell edge, so long runs collapse to their end corners.
fn clean_ring(ring: &[Point2<f64>]) -> Vec<Point2<f64>> {
    let mut points: Vec<Point2<f64>> = Vec::with_capacity(ring.len());
    for p in ring {
        if points.last() != Some(p) {
            points.push(*p);
        }
    }
    while points.len() > 1 && points.first() == points.last() {
        points.pop();
    }

    loop {
        let n = points.len();
        if n <= 3 {
            return points;
        }
        let keep: Vec<bool> = (0..n)
            .map(|i| {
                let prev = points[(i + n - 1) % n];
                let next = points[(i + 1) % n];
                let (a, b) = (points[i] - prev, next - points[i]);
                a.perp(&b) != 0.0 || a.dot(&b) <= 0.0
            })
            .collect();
        if keep.iter().all(|k| *k) {
            return points;
        }
        // Never drop two neighbors in one pass, so each decision holds
        // against the neighbors that survive.
        let mut drop = vec![false; n];
        for i in 0..n {
            if !keep[i] && !drop[(i + n - 1) % n] {
                drop[i] = true;
            }
        }
        if drop[n - 1] && drop[0] {
            drop[n - 1] = false;
        }
        points = points
            .iter()
            .zip(&drop)
            .filter(|(_, d)| !**d)
            .map(|(p, _)| *p)
            .collect();
    }
}
