// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Mesh validation utilities

use super::Mesh;
use ahash::AHashMap;

/// Undirected edge, smaller index first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Edge {
    v0: usize,
    v1: usize,
}

impl Edge {
    fn new(v0: usize, v1: usize) -> Self {
        if v0 < v1 {
            Self { v0, v1 }
        } else {
            Self { v0: v1, v1: v0 }
        }
    }
}

fn edge_counts(mesh: &Mesh) -> AHashMap<Edge, u32> {
    let mut counts: AHashMap<Edge, u32> = AHashMap::new();
    for triangle in &mesh.triangles {
        let [a, b, c] = triangle.indices;
        for edge in [Edge::new(a, b), Edge::new(b, c), Edge::new(c, a)] {
            *counts.entry(edge).or_insert(0) += 1;
        }
    }
    counts
}

/// Check if mesh is manifold (each edge shared by at most 2 triangles)
pub fn is_manifold(mesh: &Mesh) -> bool {
    edge_counts(mesh).values().all(|&count| count <= 2)
}

/// Check if mesh is closed (each edge shared by exactly 2 triangles)
pub fn is_closed(mesh: &Mesh) -> bool {
    !mesh.triangles.is_empty() && edge_counts(mesh).values().all(|&count| count == 2)
}

/// Number of edges used by exactly one triangle
pub fn boundary_edge_count(mesh: &Mesh) -> usize {
    edge_counts(mesh).values().filter(|&&count| count == 1).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Triangle, Vertex};
    use nalgebra::{Point3, Vector3};

    fn quad(closed: bool) -> Mesh {
        let mut mesh = Mesh::new();
        for p in [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)] {
            mesh.add_vertex(Vertex::new(Point3::new(p.0, p.1, 0.0), Vector3::z()));
        }
        mesh.add_triangle(Triangle::new([0, 1, 2]));
        mesh.add_triangle(Triangle::new([0, 2, 3]));
        if closed {
            mesh.add_triangle(Triangle::new([0, 2, 1]));
            mesh.add_triangle(Triangle::new([0, 3, 2]));
        }
        mesh
    }

    #[test]
    fn test_open_quad() {
        let mesh = quad(false);
        assert!(is_manifold(&mesh));
        assert!(!is_closed(&mesh));
        assert_eq!(boundary_edge_count(&mesh), 4);
    }

    #[test]
    fn test_double_sided_quad_is_closed() {
        let mesh = quad(true);
        assert!(is_closed(&mesh));
        assert_eq!(boundary_edge_count(&mesh), 0);
    }

    #[test]
    fn test_empty_mesh_is_not_closed() {
        assert!(!is_closed(&Mesh::new()));
    }
}
