// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Engine configuration: physical scale, base slab and per-color layer settings

use crate::error::{EngineError, Result};
use crate::raster::Rgb;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Thickness and smoothing for one color layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerSettings {
    /// Nominal thickness in physical units
    pub thickness: f64,
    /// Signed user adjustment added to `thickness`
    pub delta: f64,
    /// Refine outer boundaries
    pub smooth_outer: bool,
    /// Refine hole boundaries
    pub smooth_inner: bool,
    /// Refinement tolerance in physical units
    pub tolerance: f64,
}

impl Default for LayerSettings {
    fn default() -> Self {
        Self {
            thickness: 1.0,
            delta: 0.0,
            smooth_outer: false,
            smooth_inner: false,
            tolerance: 0.1,
        }
    }
}

impl LayerSettings {
    pub fn with_thickness(thickness: f64) -> Self {
        Self {
            thickness,
            ..Default::default()
        }
    }

    /// Nominal thickness plus delta. May be zero or negative.
    pub fn effective_thickness(&self) -> f64 {
        self.thickness + self.delta
    }
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Physical edge length of one raster cell
    pub cell_size: f64,
    /// Base slab thickness; no slab when zero or less
    pub base_thickness: f64,
    /// Settings for colors without an entry in `layers`
    pub default_layer: LayerSettings,
    /// Per-color settings keyed by `#rrggbb`
    pub layers: BTreeMap<Rgb, LayerSettings>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cell_size: 1.0,
            base_thickness: 0.2,
            default_layer: LayerSettings::default(),
            layers: BTreeMap::new(),
        }
    }
}

impl EngineConfig {
    /// Settings for `color`, falling back to `default_layer`.
    pub fn settings_for(&self, color: Rgb) -> &LayerSettings {
        self.layers.get(&color).unwrap_or(&self.default_layer)
    }

    pub fn set_layer(&mut self, color: Rgb, settings: LayerSettings) {
        self.layers.insert(color, settings);
    }

    /// Reject a cell size the coordinate mapping cannot use.
    /// Thicknesses and tolerances are taken as given.
    pub fn validate(&self) -> Result<()> {
        if !self.cell_size.is_finite() || self.cell_size <= 0.0 {
            return Err(EngineError::InvalidCellSize(self.cell_size));
        }
        Ok(())
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))
    }

    /// Parse and validate a TOML document
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;
        Ok(())
    }
}
