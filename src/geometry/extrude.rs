// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Linear extrusion of planar profiles into closed triangle meshes

use super::{Mesh, Profile, Triangle, Vertex};
use crate::error::{EngineError, Result};
use ahash::AHashSet;
use nalgebra::{Point2, Point3, Vector3};
use tracing::trace;

/// Triangulate a profile's interior with ear clipping.
///
/// Indices address the profile's points in ring order: outer ring first,
/// then each hole. Triangles are returned counter-clockwise.
pub fn triangulate(profile: &Profile) -> Result<Vec<[usize; 3]>> {
    let mut coords: Vec<f64> = Vec::new();
    let mut hole_indices: Vec<usize> = Vec::with_capacity(profile.holes.len());
    let mut points: Vec<Point2<f64>> = Vec::new();

    for p in &profile.outer {
        coords.extend([p.x, p.y]);
        points.push(*p);
    }
    for hole in &profile.holes {
        hole_indices.push(points.len());
        for p in hole {
            coords.extend([p.x, p.y]);
            points.push(*p);
        }
    }

    let flat = earcutr::earcut(&coords, &hole_indices, 2)
        .map_err(|e| EngineError::Triangulation(format!("{e:?}")))?;

    let mut triangles: Vec<[usize; 3]> = flat
        .chunks_exact(3)
        .map(|t| {
            let (a, b, c) = (points[t[0]], points[t[1]], points[t[2]]);
            let cross = (b - a).perp(&(c - a));
            if cross < 0.0 {
                [t[0], t[2], t[1]]
            } else {
                [t[0], t[1], t[2]]
            }
        })
        .collect();

    let ring_starts: Vec<usize> = std::iter::once(0).chain(hole_indices).collect();
    restore_skipped_vertices(&points, &ring_starts, &mut triangles);
    Ok(triangles)
}

/// Ear clipping filters out points that sit on a straight line through their
/// neighbors, including ones made straight by hole bridges. Walls still use
/// every ring edge, so any ring edge missing from the caps marks a point to
/// split back into the cap triangle edge passing through it.
fn restore_skipped_vertices(
    points: &[Point2<f64>],
    ring_starts: &[usize],
    triangles: &mut Vec<[usize; 3]>,
) {
    let key = |a: usize, b: usize| if a < b { (a, b) } else { (b, a) };
    let cap_edges: AHashSet<(usize, usize)> = triangles
        .iter()
        .flat_map(|t| [key(t[0], t[1]), key(t[1], t[2]), key(t[2], t[0])])
        .collect();

    let mut candidates: Vec<usize> = Vec::new();
    for (r, &start) in ring_starts.iter().enumerate() {
        let end = ring_starts.get(r + 1).copied().unwrap_or(points.len());
        for i in start..end {
            let j = if i + 1 == end { start } else { i + 1 };
            if !cap_edges.contains(&key(i, j)) {
                candidates.extend([i, j]);
            }
        }
    }
    candidates.sort_unstable();
    candidates.dedup();

    for v in candidates {
        let p = points[v];
        let mut split = Vec::new();
        triangles.retain(|t| {
            for k in 0..3 {
                let (a, b, c) = (t[k], t[(k + 1) % 3], t[(k + 2) % 3]);
                if on_open_segment(&p, &points[a], &points[b]) {
                    split.push([a, v, c]);
                    split.push([v, b, c]);
                    return false;
                }
            }
            true
        });
        if !split.is_empty() {
            trace!(vertex = v, triangles = split.len(), "restored skipped cap vertex");
        }
        triangles.extend(split);
    }
}

fn on_open_segment(p: &Point2<f64>, a: &Point2<f64>, b: &Point2<f64>) -> bool {
    let ab = b - a;
    let ap = p - a;
    let len_sq = ab.norm_squared();
    if len_sq == 0.0 {
        return false;
    }
    let t = ap.dot(&ab) / len_sq;
    t > 0.0 && t < 1.0 && ab.perp(&ap).abs() <= 1e-12 * len_sq
}

/// Extrude a profile from `z = 0` to `z = height`.
///
/// Caps and side walls share vertices, so the result is closed whenever the
/// profile's rings are simple. Degenerate profiles and non-positive heights
/// give an empty mesh.
pub fn extrude_profile(profile: &Profile, height: f64) -> Result<Mesh> {
    if height <= 0.0 || profile.is_degenerate() {
        return Ok(Mesh::new());
    }

    let profile = profile.normalized();
    let caps = triangulate(&profile)?;

    let rings: Vec<&[Point2<f64>]> = std::iter::once(profile.outer.as_slice())
        .chain(profile.holes.iter().map(Vec::as_slice))
        .collect();
    let n: usize = rings.iter().map(|r| r.len()).sum();

    let mut mesh = Mesh::with_capacity(2 * n, 2 * caps.len() + 2 * n);

    for z in [0.0, height] {
        for ring in &rings {
            for p in ring.iter() {
                mesh.add_vertex(Vertex::new(Point3::new(p.x, p.y, z), Vector3::zeros()));
            }
        }
    }

    for [a, b, c] in &caps {
        mesh.add_triangle(Triangle::new([*a, *c, *b]));
        mesh.add_triangle(Triangle::new([a + n, b + n, c + n]));
    }

    // Outer runs counter-clockwise and holes clockwise, so material is
    // always on the left of each edge.
    let mut base = 0;
    for ring in &rings {
        let len = ring.len();
        for i in 0..len {
            let j = (i + 1) % len;
            let (bi, bj) = (base + i, base + j);
            let (ti, tj) = (bi + n, bj + n);
            mesh.add_triangle(Triangle::new([bi, bj, tj]));
            mesh.add_triangle(Triangle::new([bi, tj, ti]));
        }
        base += len;
    }

    mesh.recompute_normals();
    Ok(mesh)
}
