// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Engine API: raster and stacking order in, layered model out

use crate::config::EngineConfig;
use crate::contour::Shape;
use crate::error::Result;
use crate::geometry::Mesh;
use crate::model::{self, Model};
use crate::raster::{Raster, StackingOrder};
use tracing::debug;

/// Main engine for building layered models
///
/// Holds configuration only. Every call recomputes from its inputs and
/// never mutates them.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    /// Create a new engine
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut EngineConfig {
        &mut self.config
    }

    /// Build the model for a raster snapshot
    pub fn build(&self, raster: &Raster, order: &StackingOrder) -> Result<Model> {
        self.config.validate()?;
        order.ensure_matches(raster)?;
        debug!(
            width = raster.width(),
            height = raster.height(),
            layers = order.len(),
            "building model"
        );
        Ok(model::assemble(raster, order, &self.config))
    }

    /// Build the model and tessellate it into one mesh
    pub fn build_mesh(&self, raster: &Raster, order: &StackingOrder) -> Result<Mesh> {
        self.build(raster, order)?.to_mesh()
    }

    /// Classified grid-space shapes of layer `index`, before refinement
    pub fn layer_shapes(
        &self,
        raster: &Raster,
        order: &StackingOrder,
        index: usize,
    ) -> Result<Vec<Shape>> {
        order.ensure_matches(raster)?;
        Ok(model::layer_shapes(raster, order, index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::geometry::mesh_utils::is_closed;
    use crate::raster::Rgb;

    const R: Rgb = Rgb::new(255, 0, 0);
    const G: Rgb = Rgb::new(0, 255, 0);

    fn raster() -> Raster {
        Raster::from_rgb_rows(&[vec![R, R], vec![R, G]]).unwrap()
    }

    #[test]
    fn test_engine_build() {
        let raster = raster();
        let order = StackingOrder::from_raster(&raster);
        let model = Engine::default().build(&raster, &order).unwrap();

        assert!(model.base().is_some());
        assert_eq!(model.layers().count(), 2);
        assert!((model.height() - 2.2).abs() < 1e-12);
    }

    #[test]
    fn test_engine_rejects_stale_order() {
        let raster = raster();
        let order = StackingOrder::from_colors(vec![R]).unwrap();
        let err = Engine::default().build(&raster, &order).unwrap_err();
        assert!(matches!(err, EngineError::OrderMismatch { .. }));
    }

    #[test]
    fn test_engine_rejects_bad_cell_size() {
        let raster = raster();
        let order = StackingOrder::from_raster(&raster);
        let mut engine = Engine::default();
        engine.config_mut().cell_size = -1.0;
        assert!(matches!(
            engine.build(&raster, &order),
            Err(EngineError::InvalidCellSize(_))
        ));
    }

    #[test]
    fn test_engine_mesh_is_closed_per_solid() {
        let raster = raster();
        let order = StackingOrder::from_raster(&raster);
        let engine = Engine::default();
        let model = engine.build(&raster, &order).unwrap();
        for solid in model.solids() {
            assert!(is_closed(&solid.to_mesh().unwrap()));
        }
        let mesh = engine.build_mesh(&raster, &order).unwrap();
        assert!(mesh.triangle_count() > 0);
    }

    #[test]
    fn test_layer_shapes_diagnostics() {
        let raster = raster();
        let order = StackingOrder::from_raster(&raster);
        let shapes = Engine::default().layer_shapes(&raster, &order, 1).unwrap();
        assert_eq!(shapes.len(), 1);
        assert_eq!(shapes[0].net_area(), 1.0);
    }
}
