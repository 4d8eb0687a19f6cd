// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Dotplate layered-plate engine
//!
//! Turns a colored pixel raster into a stack of extruded solids: one per
//! color, in a user-chosen order, on an optional base slab. Each layer's
//! footprint is the union of its own cells and every cell stacked above it.

pub mod config;
pub mod contour;
pub mod error;
pub mod geometry;
pub mod kernel;
pub mod model;
pub mod raster;
pub mod refine;
pub mod utils;

pub use config::{EngineConfig, LayerSettings};
pub use contour::{Contour, OccupancyMask, Shape};
pub use error::{EngineError, Result};
pub use geometry::{Mesh, Profile};
pub use kernel::Engine;
pub use model::{Model, Solid, SolidKind};
pub use raster::{Cell, Raster, Rgb, StackingOrder};

/// Main entry point: build the layered model for a raster snapshot
pub fn build_model(raster: &Raster, order: &StackingOrder, config: &EngineConfig) -> Result<Model> {
    Engine::new(config.clone()).build(raster, order)
}
