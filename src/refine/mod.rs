// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Path refinement - optional simplification followed by spline smoothing

mod simplify;
mod spline;

pub use simplify::{douglas_peucker, simplify_closed};
pub use spline::resample_closed;

use crate::config::LayerSettings;
use crate::contour::Shape;
use crate::geometry::Profile;
use nalgebra::Point2;

/// Physical tolerance above which simplified rings are also spline-resampled.
pub const SPLINE_THRESHOLD: f64 = 0.05;

/// Minimum number of spline samples per ring.
pub const MIN_SPLINE_SAMPLES: usize = 20;

/// Samples per simplified point when resampling.
pub const SAMPLES_PER_POINT: usize = 5;

/// Refine one ring in grid units.
///
/// `tolerance` is physical and is divided by `cell_size` before the
/// simplification pass. Disabled gates, non-positive tolerances and rings of
/// two points or fewer pass through unchanged.
pub fn refine_ring(
    points: &[Point2<f64>],
    enabled: bool,
    tolerance: f64,
    cell_size: f64,
) -> Vec<Point2<f64>> {
    if !enabled || tolerance <= 0.0 || points.len() <= 2 {
        return points.to_vec();
    }

    let simplified = simplify_closed(points, tolerance / cell_size);
    if tolerance > SPLINE_THRESHOLD && simplified.len() >= 3 {
        let samples = (simplified.len() * SAMPLES_PER_POINT).max(MIN_SPLINE_SAMPLES);
        resample_closed(&simplified, samples)
    } else {
        simplified
    }
}

/// Refine a classified shape into a float profile, still in grid units.
///
/// The outer ring is gated by `smooth_outer`, every hole by `smooth_inner`.
pub fn refine_shape(shape: &Shape, settings: &LayerSettings, cell_size: f64) -> Profile {
    let outer = refine_ring(
        &shape.outer.to_f64(),
        settings.smooth_outer,
        settings.tolerance,
        cell_size,
    );
    let holes = shape
        .holes
        .iter()
        .map(|hole| {
            refine_ring(
                &hole.to_f64(),
                settings.smooth_inner,
                settings.tolerance,
                cell_size,
            )
        })
        .collect();

    Profile::new(outer, holes)
}
