// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Rectangular color raster

use super::{Cell, Rgb};
use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// W×H grid of cells, stored row-major. Row 0 is the top row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RasterData")]
pub struct Raster {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

/// Serialized form, checked before it becomes a [`Raster`].
#[derive(Deserialize)]
struct RasterData {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl TryFrom<RasterData> for Raster {
    type Error = EngineError;

    fn try_from(data: RasterData) -> Result<Self> {
        if data.width == 0 || data.height == 0 {
            return Err(EngineError::EmptyRaster);
        }
        let expected = data.width.checked_mul(data.height).unwrap_or(usize::MAX);
        if data.cells.len() != expected {
            return Err(EngineError::CellCount {
                width: data.width,
                height: data.height,
                expected,
                found: data.cells.len(),
            });
        }
        Ok(Self {
            width: data.width,
            height: data.height,
            cells: data.cells,
        })
    }
}

impl Raster {
    /// Create an all-empty raster.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(EngineError::EmptyRaster);
        }
        Ok(Self {
            width,
            height,
            cells: vec![Cell::Empty; width * height],
        })
    }

    /// Build from rows of cells. Every row must have the same length.
    pub fn from_cells(rows: Vec<Vec<Cell>>) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if width == 0 || height == 0 {
            return Err(EngineError::EmptyRaster);
        }

        let mut cells = Vec::with_capacity(width * height);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != width {
                return Err(EngineError::RaggedRaster {
                    row,
                    expected: width,
                    found: values.len(),
                });
            }
            cells.extend(values);
        }

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Build from plain RGB rows, mapping [`Rgb::EMPTY_SENTINEL`] to empty.
    pub fn from_rgb_rows(rows: &[Vec<Rgb>]) -> Result<Self> {
        Self::from_cells(
            rows.iter()
                .map(|row| row.iter().copied().map(Cell::from_rgb).collect())
                .collect(),
        )
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Cell at `(x, y)`, or `None` outside the grid.
    pub fn get(&self, x: usize, y: usize) -> Option<Cell> {
        if x < self.width && y < self.height {
            Some(self.cells[y * self.width + x])
        } else {
            None
        }
    }

    /// Overwrite a cell. Returns `false` when `(x, y)` is outside the grid.
    pub fn set(&mut self, x: usize, y: usize, cell: Cell) -> bool {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = cell;
            true
        } else {
            false
        }
    }

    /// True for empty cells and for coordinates outside the grid.
    pub fn is_empty_at(&self, x: usize, y: usize) -> bool {
        self.get(x, y).map_or(true, Cell::is_empty)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Distinct non-empty colors in row-major first-appearance order.
    pub fn colors(&self) -> Vec<Rgb> {
        let mut seen = HashSet::new();
        self.cells
            .iter()
            .filter_map(|cell| cell.color())
            .filter(|color| seen.insert(*color))
            .collect()
    }

    /// Number of cells holding a color.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_empty()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const R: Rgb = Rgb::new(255, 0, 0);
    const G: Rgb = Rgb::new(0, 255, 0);
    const E: Rgb = Rgb::EMPTY_SENTINEL;

    #[test]
    fn test_from_rgb_rows() {
        let raster = Raster::from_rgb_rows(&[vec![R, E], vec![G, R]]).unwrap();
        assert_eq!(raster.width(), 2);
        assert_eq!(raster.height(), 2);
        assert_eq!(raster.get(1, 0), Some(Cell::Empty));
        assert_eq!(raster.get(0, 1), Some(Cell::Color(G)));
        assert_eq!(raster.get(2, 0), None);
        assert_eq!(raster.occupied_count(), 3);
    }

    #[test]
    fn test_colors_first_appearance_order() {
        let raster = Raster::from_rgb_rows(&[vec![E, G], vec![R, G]]).unwrap();
        assert_eq!(raster.colors(), vec![G, R]);
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let err = Raster::from_rgb_rows(&[vec![R, R], vec![R]]).unwrap_err();
        assert!(matches!(
            err,
            EngineError::RaggedRaster {
                row: 1,
                expected: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn test_empty_raster_rejected() {
        assert!(matches!(Raster::new(0, 4), Err(EngineError::EmptyRaster)));
        assert!(matches!(
            Raster::from_cells(vec![]),
            Err(EngineError::EmptyRaster)
        ));
    }

    #[test]
    fn test_set_outside_grid() {
        let mut raster = Raster::new(2, 2).unwrap();
        assert!(raster.set(1, 1, Cell::Color(R)));
        assert!(!raster.set(2, 0, Cell::Color(R)));
        assert_eq!(raster.colors(), vec![R]);
        assert!(!raster.is_empty_at(1, 1));
        assert!(raster.is_empty_at(0, 0));
        assert!(raster.is_empty_at(5, 5));
    }

    #[test]
    fn test_deserialize_checks_cell_count() {
        let short = toml::from_str::<Raster>("width = 2\nheight = 2\ncells = [{ Color = \"#ff0000\" }]");
        assert!(short.is_err());

        let empty = toml::from_str::<Raster>("width = 0\nheight = 3\ncells = []");
        assert!(empty.is_err());

        let raster: Raster = toml::from_str(
            "width = 2\nheight = 1\ncells = [\"Empty\", { Color = \"#ff0000\" }]",
        )
        .unwrap();
        assert_eq!(raster.get(1, 0), Some(Cell::Color(R)));
        assert!(raster.is_empty_at(0, 0));
    }
}
