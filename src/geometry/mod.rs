// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry module - planar profiles, meshes and extrusion

mod analytics;
mod bbox;
mod extrude;
mod mesh;
pub mod mesh_utils;
mod profile;

pub use analytics::{analyze, signed_volume, GeometryStats};
pub use bbox::BoundingBox;
pub use extrude::{extrude_profile, triangulate};
pub use mesh::{Mesh, Triangle, Vertex};
pub use profile::{Profile, MIN_PROFILE_AREA};
