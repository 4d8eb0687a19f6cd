// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Extruded solids

use crate::error::Result;
use crate::geometry::{extrude_profile, Mesh, Profile};
use crate::raster::Rgb;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// What a solid stands for in the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolidKind {
    /// Flat slab under the whole grid
    Base,
    /// Color layer at `index` in the stacking order
    Layer { color: Rgb, index: usize },
}

/// Profiles in physical XY extruded by `thickness`, starting at `z_offset`.
///
/// A layer keeps all of its shapes together: each profile is one traced
/// shape extruded on its own, and they only share the layer's Z range.
/// [`Solid::parts`] yields them one solid per shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solid {
    pub kind: SolidKind,
    pub z_offset: f64,
    pub thickness: f64,
    pub profiles: Vec<Profile>,
}

impl Solid {
    pub fn color(&self) -> Option<Rgb> {
        match self.kind {
            SolidKind::Base => None,
            SolidKind::Layer { color, .. } => Some(color),
        }
    }

    /// Z of the top face
    pub fn top(&self) -> f64 {
        self.z_offset + self.thickness
    }

    /// Footprint area summed over profiles
    pub fn area(&self) -> f64 {
        self.profiles.iter().map(Profile::area).sum()
    }

    /// Extrusion volume (footprint × thickness)
    pub fn volume(&self) -> f64 {
        self.area() * self.thickness
    }

    /// One single-profile solid per shape, same kind and Z range.
    pub fn parts(&self) -> impl Iterator<Item = Solid> + '_ {
        self.profiles.iter().map(|profile| Solid {
            kind: self.kind,
            z_offset: self.z_offset,
            thickness: self.thickness,
            profiles: vec![profile.clone()],
        })
    }

    /// Triangulate every profile and place the result at `z_offset`.
    pub fn to_mesh(&self) -> Result<Mesh> {
        let mut mesh = Mesh::new();
        for profile in &self.profiles {
            mesh.merge(&extrude_profile(profile, self.thickness)?);
        }
        mesh.translate(&Vector3::new(0.0, 0.0, self.z_offset));
        Ok(mesh)
    }
}
