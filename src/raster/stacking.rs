// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Bottom-to-top layer order

use super::{Raster, Rgb};
use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Ordered set of distinct colors. Index 0 is the bottom layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StackingData")]
pub struct StackingOrder {
    colors: Vec<Rgb>,
}

/// Serialized form, checked for repeated colors on the way in.
#[derive(Deserialize)]
struct StackingData {
    colors: Vec<Rgb>,
}

impl TryFrom<StackingData> for StackingOrder {
    type Error = EngineError;

    fn try_from(data: StackingData) -> Result<Self> {
        Self::from_colors(data.colors)
    }
}

impl StackingOrder {
    /// Order matching the raster's first-appearance color order.
    pub fn from_raster(raster: &Raster) -> Self {
        Self {
            colors: raster.colors(),
        }
    }

    /// Explicit order. Rejects repeated colors.
    pub fn from_colors(colors: Vec<Rgb>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(colors.len());
        for color in &colors {
            if !seen.insert(*color) {
                return Err(EngineError::DuplicateColor(*color));
            }
        }
        Ok(Self { colors })
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn index_of(&self, color: Rgb) -> Option<usize> {
        self.colors.iter().position(|c| *c == color)
    }

    /// Colors from `index` to the top of the stack.
    pub fn at_and_above(&self, index: usize) -> &[Rgb] {
        self.colors.get(index..).unwrap_or(&[])
    }

    /// Re-synchronize with the raster after an edit: surviving colors keep
    /// their relative order, vanished colors are dropped, new colors are
    /// appended in first-appearance order.
    pub fn sync_with(&mut self, raster: &Raster) {
        let present = raster.colors();
        let present_set: HashSet<Rgb> = present.iter().copied().collect();

        self.colors.retain(|c| present_set.contains(c));
        let known: HashSet<Rgb> = self.colors.iter().copied().collect();
        self.colors
            .extend(present.into_iter().filter(|c| !known.contains(c)));
    }

    /// Swap the layer at `index` with its neighbor at `index + direction`.
    /// Moves that would leave the stack are ignored and return `false`.
    pub fn move_layer(&mut self, index: usize, direction: isize) -> bool {
        let Some(target) = index.checked_add_signed(direction) else {
            return false;
        };
        if index >= self.colors.len() || target >= self.colors.len() {
            return false;
        }
        self.colors.swap(index, target);
        true
    }

    /// Check that this order is exactly the raster's color set.
    pub fn ensure_matches(&self, raster: &Raster) -> Result<()> {
        let present = raster.colors();
        let present_set: HashSet<Rgb> = present.iter().copied().collect();
        let ordered: HashSet<Rgb> = self.colors.iter().copied().collect();

        if ordered.len() != self.colors.len() {
            let mut seen = HashSet::new();
            if let Some(dup) = self.colors.iter().find(|c| !seen.insert(**c)) {
                return Err(EngineError::DuplicateColor(*dup));
            }
        }

        let missing: Vec<Rgb> = present
            .into_iter()
            .filter(|c| !ordered.contains(c))
            .collect();
        let stale: Vec<Rgb> = self
            .colors
            .iter()
            .copied()
            .filter(|c| !present_set.contains(c))
            .collect();

        if missing.is_empty() && stale.is_empty() {
            Ok(())
        } else {
            Err(EngineError::OrderMismatch { missing, stale })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const R: Rgb = Rgb::new(255, 0, 0);
    const G: Rgb = Rgb::new(0, 255, 0);
    const B: Rgb = Rgb::new(0, 0, 255);
    const E: Rgb = Rgb::EMPTY_SENTINEL;

    #[test]
    fn test_sync_drops_and_appends() {
        let before = Raster::from_rgb_rows(&[vec![R, G, B]]).unwrap();
        let mut order = StackingOrder::from_raster(&before);
        assert!(order.move_layer(1, 1));
        assert_eq!(order.colors(), &[R, B, G]);

        let x = Rgb::new(9, 9, 9);
        let after = Raster::from_rgb_rows(&[vec![E, G, B], vec![x, B, G]]).unwrap();
        order.sync_with(&after);

        assert_eq!(order.colors(), &[B, G, x]);
        assert!(order.ensure_matches(&after).is_ok());
    }

    #[test]
    fn test_move_layer_bounds() {
        let mut order = StackingOrder::from_colors(vec![R, G, B]).unwrap();
        assert!(!order.move_layer(0, -1));
        assert!(!order.move_layer(2, 1));
        assert!(!order.move_layer(5, -1));
        assert!(order.move_layer(1, 1));
        assert_eq!(order.colors(), &[R, B, G]);
        assert!(order.move_layer(1, -1));
        assert_eq!(order.colors(), &[B, R, G]);
    }

    #[test]
    fn test_duplicates_rejected() {
        assert!(matches!(
            StackingOrder::from_colors(vec![R, G, R]),
            Err(EngineError::DuplicateColor(c)) if c == R
        ));
    }

    #[test]
    fn test_deserialize_rejects_duplicates() {
        let doubled = toml::from_str::<StackingOrder>(r##"colors = ["#ff0000", "#ff0000"]"##);
        assert!(doubled.is_err());

        let order: StackingOrder = toml::from_str(r##"colors = ["#0000ff", "#ff0000"]"##).unwrap();
        assert_eq!(order.colors(), &[B, R]);
        assert_eq!(order.index_of(R), Some(1));
        assert_eq!(order.index_of(G), None);
    }

    #[test]
    fn test_mismatch_reported() {
        let raster = Raster::from_rgb_rows(&[vec![R, G]]).unwrap();
        let order = StackingOrder::from_colors(vec![R, B]).unwrap();
        match order.ensure_matches(&raster) {
            Err(EngineError::OrderMismatch { missing, stale }) => {
                assert_eq!(missing, vec![G]);
                assert_eq!(stale, vec![B]);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_at_and_above() {
        let order = StackingOrder::from_colors(vec![R, G, B]).unwrap();
        assert_eq!(order.at_and_above(1), &[G, B]);
        assert!(order.at_and_above(3).is_empty());
        assert!(order.at_and_above(7).is_empty());
    }
}
