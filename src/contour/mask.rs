// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Occupancy masks derived from a raster

use crate::raster::{Cell, Raster, Rgb};
use std::collections::HashSet;

/// What a mask cell holds relative to the target color set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    /// Color is in the target set.
    Occupied,
    /// Colored, but not a target.
    Foreign,
    Empty,
}

/// Boolean W×H occupancy grid, remembering why unoccupied cells are unoccupied
/// so boundary edges can be tagged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyMask {
    width: usize,
    height: usize,
    states: Vec<CellState>,
}

impl OccupancyMask {
    /// Mark every cell whose color belongs to `targets`.
    pub fn build(raster: &Raster, targets: &[Rgb]) -> Self {
        let targets: HashSet<Rgb> = targets.iter().copied().collect();
        let states = raster
            .cells()
            .iter()
            .map(|cell| match cell {
                Cell::Empty => CellState::Empty,
                Cell::Color(c) if targets.contains(c) => CellState::Occupied,
                Cell::Color(_) => CellState::Foreign,
            })
            .collect();

        Self {
            width: raster.width(),
            height: raster.height(),
            states,
        }
    }

    /// Mask from plain booleans; unoccupied cells count as empty.
    pub fn from_bools(width: usize, height: usize, occupied: &[bool]) -> Self {
        debug_assert_eq!(occupied.len(), width * height);
        Self {
            width,
            height,
            states: occupied
                .iter()
                .map(|&o| if o { CellState::Occupied } else { CellState::Empty })
                .collect(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// State at signed coordinates; anything outside the grid reads as empty.
    pub fn state(&self, x: i64, y: i64) -> CellState {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return CellState::Empty;
        }
        self.states[y as usize * self.width + x as usize]
    }

    pub fn is_occupied(&self, x: i64, y: i64) -> bool {
        self.state(x, y) == CellState::Occupied
    }

    pub fn occupied_count(&self) -> usize {
        self.states
            .iter()
            .filter(|s| **s == CellState::Occupied)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.occupied_count() == 0
    }
}
