// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Contour module - occupancy masks, boundary tracing and shape classification

mod classify;
mod mask;
mod trace;

pub use classify::{classify_contours, Shape};
pub use mask::{CellState, OccupancyMask};
pub use trace::{trace_contours, Contour, Corner, EdgeKind};

use crate::raster::{Raster, Rgb};

/// Shapes covering every cell whose color is in `targets`.
pub fn shapes_for(raster: &Raster, targets: &[Rgb]) -> Vec<Shape> {
    let mask = OccupancyMask::build(raster, targets);
    if mask.is_empty() {
        return Vec::new();
    }
    classify_contours(trace_contours(&mask))
}
