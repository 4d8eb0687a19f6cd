// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Boundary tracing on the corner lattice
//!
//! Every occupied cell contributes one unit edge per side that faces an
//! unoccupied neighbor. Edges wind so that occupied material lies to the
//! right when walking in image coordinates (Y down), which gives outer
//! boundaries a positive shoelace area and holes a negative one.
//! Edges are then chained end-to-start into contours.

use super::mask::{CellState, OccupancyMask};
use ahash::AHashMap;
use nalgebra::Point2;
use tracing::trace;

/// Grid-line intersection. `(0, 0)` is the top-left corner of the grid.
pub type Corner = Point2<i64>;

/// What lies on the far side of a boundary edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    /// Grid border or an empty cell.
    External,
    /// A colored cell outside the mask.
    Internal,
}

#[derive(Debug, Clone, Copy)]
struct BoundaryEdge {
    start: Corner,
    end: Corner,
    kind: EdgeKind,
}

/// Closed sequence of lattice corners. Segment `i` runs from `points[i]`
/// to `points[i + 1]` (wrapping) and is tagged by `kinds[i]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contour {
    points: Vec<Corner>,
    kinds: Vec<EdgeKind>,
    closed: bool,
}

impl Contour {
    pub fn new(points: Vec<Corner>, kinds: Vec<EdgeKind>, closed: bool) -> Self {
        debug_assert_eq!(points.len(), kinds.len());
        Self {
            points,
            kinds,
            closed,
        }
    }

    pub fn points(&self) -> &[Corner] {
        &self.points
    }

    pub fn edge_kinds(&self) -> &[EdgeKind] {
        &self.kinds
    }

    /// `false` when the walk ran out of continuations before returning to
    /// its first corner.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Corner coordinates as floats.
    pub fn to_f64(&self) -> Vec<Point2<f64>> {
        self.points
            .iter()
            .map(|p| Point2::new(p.x as f64, p.y as f64))
            .collect()
    }
}

fn edge_kind(state: CellState) -> EdgeKind {
    match state {
        CellState::Foreign => EdgeKind::Internal,
        _ => EdgeKind::External,
    }
}

fn collect_edges(mask: &OccupancyMask) -> Vec<BoundaryEdge> {
    let mut edges = Vec::new();

    for y in 0..mask.height() as i64 {
        for x in 0..mask.width() as i64 {
            if !mask.is_occupied(x, y) {
                continue;
            }

            // (neighbor, start, end) for top, right, bottom, left
            let sides = [
                ((x, y - 1), (x, y), (x + 1, y)),
                ((x + 1, y), (x + 1, y), (x + 1, y + 1)),
                ((x, y + 1), (x + 1, y + 1), (x, y + 1)),
                ((x - 1, y), (x, y + 1), (x, y)),
            ];

            for ((nx, ny), (sx, sy), (ex, ey)) in sides {
                let state = mask.state(nx, ny);
                if state == CellState::Occupied {
                    continue;
                }
                edges.push(BoundaryEdge {
                    start: Corner::new(sx, sy),
                    end: Corner::new(ex, ey),
                    kind: edge_kind(state),
                });
            }
        }
    }

    edges
}

/// Trace all boundary contours of `mask`.
///
/// Each emitted edge ends up in exactly one contour. Walks follow the first
/// unused edge leaving the current end corner, so a diagonal pinch may join
/// two loops into one contour.
pub fn trace_contours(mask: &OccupancyMask) -> Vec<Contour> {
    let edges = collect_edges(mask);

    let mut by_start: AHashMap<(i64, i64), Vec<usize>> = AHashMap::with_capacity(edges.len());
    for (i, edge) in edges.iter().enumerate() {
        by_start
            .entry((edge.start.x, edge.start.y))
            .or_default()
            .push(i);
    }

    let mut used = vec![false; edges.len()];
    let mut contours = Vec::new();

    for first in 0..edges.len() {
        if used[first] {
            continue;
        }
        used[first] = true;

        let mut points = vec![edges[first].start];
        let mut kinds = vec![edges[first].kind];
        let mut current = first;

        loop {
            let end = edges[current].end;
            let next = by_start
                .get(&(end.x, end.y))
                .and_then(|candidates| candidates.iter().copied().find(|&i| !used[i]));

            let Some(next) = next else {
                break;
            };
            used[next] = true;
            points.push(edges[next].start);
            kinds.push(edges[next].kind);
            current = next;
        }

        let closed = edges[current].end == edges[first].start;
        if !closed {
            trace!(start = ?edges[first].start, len = points.len(), "open boundary chain");
        }
        contours.push(Contour::new(points, kinds, closed));
    }

    contours
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::math::signed_area;

    fn mask(rows: &[&str]) -> OccupancyMask {
        let height = rows.len();
        let width = rows[0].len();
        let bits: Vec<bool> = rows
            .iter()
            .flat_map(|r| r.chars().map(|c| c == '#'))
            .collect();
        OccupancyMask::from_bools(width, height, &bits)
    }

    #[test]
    fn test_single_cell() {
        let contours = trace_contours(&mask(&["#"]));
        assert_eq!(contours.len(), 1);
        let c = &contours[0];
        assert!(c.is_closed());
        assert_eq!(
            c.points(),
            &[
                Corner::new(0, 0),
                Corner::new(1, 0),
                Corner::new(1, 1),
                Corner::new(0, 1)
            ]
        );
        assert_eq!(signed_area(&c.to_f64()), 1.0);
        assert!(c.edge_kinds().iter().all(|k| *k == EdgeKind::External));
    }

    #[test]
    fn test_rectangle_sign_independent_of_position() {
        for rows in [
            ["##..", "##..", "...."],
            ["..##", "..##", "...."],
            ["....", ".##.", ".##."],
        ] {
            let contours = trace_contours(&mask(&rows));
            assert_eq!(contours.len(), 1);
            assert_eq!(signed_area(&contours[0].to_f64()), 4.0);
        }
    }

    #[test]
    fn test_ring_has_outer_and_hole() {
        let contours = trace_contours(&mask(&["###", "#.#", "###"]));
        assert_eq!(contours.len(), 2);
        let mut areas: Vec<f64> = contours.iter().map(|c| signed_area(&c.to_f64())).collect();
        areas.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(areas, vec![-1.0, 9.0]);
        assert!(contours.iter().all(Contour::is_closed));
    }

    #[test]
    fn test_every_edge_used_once() {
        let m = mask(&["##.#", "#..#", "####"]);
        let contours = trace_contours(&m);
        let total: usize = contours.iter().map(Contour::len).sum();
        assert_eq!(total, collect_edges(&m).len());
    }

    #[test]
    fn test_internal_edges_tagged() {
        let r = crate::raster::Rgb::new(255, 0, 0);
        let g = crate::raster::Rgb::new(0, 255, 0);
        let raster = crate::raster::Raster::from_rgb_rows(&[vec![r, g]]).unwrap();
        let m = OccupancyMask::build(&raster, &[r]);
        let contours = trace_contours(&m);
        assert_eq!(contours.len(), 1);

        let internal = contours[0]
            .edge_kinds()
            .iter()
            .filter(|k| **k == EdgeKind::Internal)
            .count();
        assert_eq!(internal, 1);
    }

    #[test]
    fn test_diagonal_pinch_is_accepted() {
        let contours = trace_contours(&mask(&["#.", ".#"]));
        let total: f64 = contours.iter().map(|c| signed_area(&c.to_f64())).sum();
        assert_eq!(total, 2.0);
        assert!(contours.iter().all(Contour::is_closed));
    }

    #[test]
    fn test_empty_mask() {
        assert!(trace_contours(&mask(&["...", "..."])).is_empty());
    }
}
