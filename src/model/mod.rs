// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Model module - layer extrusion and final assembly

mod layer;
mod solid;

pub use layer::{extrude_layers, layer_profiles, layer_shapes};
pub use solid::{Solid, SolidKind};

use crate::config::EngineConfig;
use crate::error::Result;
use crate::geometry::{BoundingBox, Mesh, Profile};
use crate::raster::{Raster, Rgb, StackingOrder};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Ordered solids: the base slab (if any) followed by layer solids bottom to
/// top. Solids are independent; touching layers are not unioned.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Model {
    solids: Vec<Solid>,
}

impl Model {
    pub fn new(solids: Vec<Solid>) -> Self {
        Self { solids }
    }

    pub fn solids(&self) -> &[Solid] {
        &self.solids
    }

    pub fn into_solids(self) -> Vec<Solid> {
        self.solids
    }

    pub fn is_empty(&self) -> bool {
        self.solids.is_empty()
    }

    pub fn base(&self) -> Option<&Solid> {
        self.solids.iter().find(|s| s.kind == SolidKind::Base)
    }

    /// Layer solids in stacking order
    pub fn layers(&self) -> impl Iterator<Item = &Solid> {
        self.solids
            .iter()
            .filter(|s| matches!(s.kind, SolidKind::Layer { .. }))
    }

    pub fn layer_for(&self, color: Rgb) -> Option<&Solid> {
        self.layers().find(|s| s.color() == Some(color))
    }

    /// Highest top face, or zero for an empty model
    pub fn height(&self) -> f64 {
        self.solids.iter().map(Solid::top).fold(0.0, f64::max)
    }

    /// Bounds of all solids, computed from their profiles
    pub fn bounding_box(&self) -> BoundingBox {
        let mut bbox = BoundingBox::empty();
        for solid in &self.solids {
            for p in solid.profiles.iter().flat_map(|profile| &profile.outer) {
                bbox.expand_to_include(&nalgebra::Point3::new(p.x, p.y, solid.z_offset));
                bbox.expand_to_include(&nalgebra::Point3::new(p.x, p.y, solid.top()));
            }
        }
        bbox
    }

    /// Concatenate every solid's mesh
    pub fn to_mesh(&self) -> Result<Mesh> {
        let mut mesh = Mesh::new();
        for solid in &self.solids {
            mesh.merge(&solid.to_mesh()?);
        }
        Ok(mesh)
    }
}

/// Slab covering the full grid from `z = 0` to the base thickness.
pub fn base_slab(raster: &Raster, config: &EngineConfig) -> Option<Solid> {
    if config.base_thickness <= 0.0 {
        return None;
    }
    Some(Solid {
        kind: SolidKind::Base,
        z_offset: 0.0,
        thickness: config.base_thickness,
        profiles: vec![Profile::rectangle(
            raster.width() as f64 * config.cell_size,
            raster.height() as f64 * config.cell_size,
        )],
    })
}

/// Build the model: optional base slab, then every layer stacked on it.
pub fn assemble(raster: &Raster, order: &StackingOrder, config: &EngineConfig) -> Model {
    let base = base_slab(raster, config);
    let start_z = base.as_ref().map_or(0.0, |b| b.thickness);

    let mut solids: Vec<Solid> = base.into_iter().collect();
    solids.extend(extrude_layers(raster, order, config, start_z));

    let model = Model::new(solids);
    info!(
        solids = model.solids().len(),
        layers = model.layers().count(),
        height = model.height(),
        "assembled model"
    );
    model
}
