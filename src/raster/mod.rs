// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Raster module - color grid snapshot and layer order

mod color;
mod grid;
mod stacking;

pub use color::{Cell, Rgb};
pub use grid::Raster;
pub use stacking::StackingOrder;
