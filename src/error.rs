// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Error types for the layered-solid engine

use crate::raster::Rgb;
use thiserror::Error;

/// Errors raised while validating inputs or tessellating output.
///
/// Degenerate geometry is not an error: open chains, zero-area
/// profiles and skipped layers are absorbed by the pipeline.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A row does not have the same length as the first row.
    #[error("Raster row {row} has {found} cells, expected {expected}")]
    RaggedRaster {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Stored cells do not fill the declared dimensions.
    #[error("Raster of {width}x{height} needs {expected} cells, found {found}")]
    CellCount {
        width: usize,
        height: usize,
        expected: usize,
        found: usize,
    },

    /// Width or height is zero.
    #[error("Raster must have at least one row and one column")]
    EmptyRaster,

    /// Cell size must be a positive, finite length.
    #[error("Invalid cell size: {0} (must be > 0)")]
    InvalidCellSize(f64),

    /// Stacking order contains the same color twice.
    #[error("Color {0} appears more than once in the stacking order")]
    DuplicateColor(Rgb),

    /// Stacking order does not match the colors present in the raster.
    #[error("Stacking order does not match raster colors (missing: {missing:?}, stale: {stale:?})")]
    OrderMismatch { missing: Vec<Rgb>, stale: Vec<Rgb> },

    /// A color key string could not be parsed.
    #[error("Invalid color key: {0:?} (expected \"#rrggbb\")")]
    InvalidColorKey(String),

    /// Cap triangulation failed.
    #[error("Failed to triangulate profile: {0}")]
    Triangulation(String),
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
