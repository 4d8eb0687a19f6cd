// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Per-layer extrusion with cumulative stacking

use super::{Solid, SolidKind};
use crate::config::{EngineConfig, LayerSettings};
use crate::contour::{shapes_for, Shape};
use crate::geometry::Profile;
use crate::raster::{Raster, StackingOrder};
use crate::refine::refine_shape;
use tracing::debug;

/// Shapes of the union-support mask for layer `index`: the layer's own
/// color plus every color stacked above it, so no upper cell floats.
pub fn layer_shapes(raster: &Raster, order: &StackingOrder, index: usize) -> Vec<Shape> {
    let targets = order.at_and_above(index);
    if targets.is_empty() {
        return Vec::new();
    }
    shapes_for(raster, targets)
}

/// Refined, physical-space profiles for one layer. Degenerate profiles are
/// dropped.
pub fn layer_profiles(
    raster: &Raster,
    order: &StackingOrder,
    index: usize,
    config: &EngineConfig,
) -> Vec<Profile> {
    let Some(&color) = order.colors().get(index) else {
        return Vec::new();
    };
    let settings = config.settings_for(color);
    let shapes = layer_shapes(raster, order, index);
    shape_profiles(&shapes, settings, raster.width(), raster.height(), config.cell_size)
}

/// Refine shapes of a `grid_width` × `grid_height` grid and map them to
/// physical space, dropping any that end up degenerate (open or flat chains).
pub(crate) fn shape_profiles(
    shapes: &[Shape],
    settings: &LayerSettings,
    grid_width: usize,
    grid_height: usize,
    cell_size: f64,
) -> Vec<Profile> {
    shapes
        .iter()
        .map(|shape| {
            refine_shape(shape, settings, cell_size).to_physical(grid_width, grid_height, cell_size)
        })
        .filter(|profile| !profile.is_degenerate())
        .collect()
}

/// Extrude every layer bottom to top, starting at `start_z`.
///
/// Layers with an effective thickness of zero or less, or with nothing to
/// extrude, are skipped and do not advance the stack height.
pub fn extrude_layers(
    raster: &Raster,
    order: &StackingOrder,
    config: &EngineConfig,
    start_z: f64,
) -> Vec<Solid> {
    let mut solids = Vec::with_capacity(order.len());
    let mut z = start_z;

    for (index, &color) in order.colors().iter().enumerate() {
        let thickness = config.settings_for(color).effective_thickness();
        if thickness <= 0.0 {
            debug!(index, %color, thickness, "skipping layer with non-positive thickness");
            continue;
        }

        let profiles = layer_profiles(raster, order, index, config);
        if profiles.is_empty() {
            debug!(index, %color, "skipping layer with no profiles");
            continue;
        }

        debug!(
            index,
            %color,
            z_offset = z,
            thickness,
            profiles = profiles.len(),
            "extruded layer"
        );

        solids.push(Solid {
            kind: SolidKind::Layer { color, index },
            z_offset: z,
            thickness,
            profiles,
        });
        z += thickness;
    }

    solids
}
