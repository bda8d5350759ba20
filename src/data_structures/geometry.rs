//! Procedural meshes for celestial bodies.
//!
//! The generators here produce CPU-side [`MeshData`] only; uploading to the GPU
//! happens in [`crate::resources::mesh`]. Keeping them GPU-free allows the
//! vertex layout to be tested without a device.

use std::f32::consts::{PI, TAU};

use crate::data_structures::model::ModelVertex;

/// Vertices and triangle-list indices of a mesh that has not been uploaded yet.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<ModelVertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// UV sphere centred at the origin.
///
/// Vertices are laid out row by row from the north pole (`v = 0`) to the south
/// pole (`v = 1`), each row going once around the equator with `u` from 0 to 1.
/// The seam column is duplicated so the texture wraps without stretching.
/// At least 3 width and 2 height segments are generated.
pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> MeshData {
    let width_segments = width_segments.max(3);
    let height_segments = height_segments.max(2);
    let row_len = width_segments + 1;

    let mut vertices = Vec::with_capacity((row_len * (height_segments + 1)) as usize);
    for iy in 0..=height_segments {
        let v = iy as f32 / height_segments as f32;
        let (sin_theta, cos_theta) = (v * PI).sin_cos();
        for ix in 0..=width_segments {
            let u = ix as f32 / width_segments as f32;
            let (sin_phi, cos_phi) = (u * TAU).sin_cos();
            let normal = [-cos_phi * sin_theta, cos_theta, sin_phi * sin_theta];
            vertices.push(ModelVertex {
                position: [normal[0] * radius, normal[1] * radius, normal[2] * radius],
                tex_coords: [u, v],
                normal,
            });
        }
    }

    let mut indices = Vec::new();
    for iy in 0..height_segments {
        for ix in 0..width_segments {
            let a = iy * row_len + ix + 1;
            let b = iy * row_len + ix;
            let c = (iy + 1) * row_len + ix;
            let d = (iy + 1) * row_len + ix + 1;
            // the pole rows collapse into single triangles
            if iy != 0 {
                indices.extend_from_slice(&[a, b, d]);
            }
            if iy != height_segments - 1 {
                indices.extend_from_slice(&[b, c, d]);
            }
        }
    }

    MeshData { vertices, indices }
}

/// Flat annulus in the XY plane facing +Z.
///
/// Texture coordinates are planar: the outer radius spans the full texture.
/// Radii given in the wrong order are swapped; at least 3 segments are generated.
pub fn ring(inner_radius: f32, outer_radius: f32, theta_segments: u32) -> MeshData {
    let (inner, outer) = if inner_radius <= outer_radius {
        (inner_radius, outer_radius)
    } else {
        (outer_radius, inner_radius)
    };
    let theta_segments = theta_segments.max(3);
    let row_len = theta_segments + 1;

    let mut vertices = Vec::with_capacity((row_len * 2) as usize);
    for radius in [inner, outer] {
        for i in 0..=theta_segments {
            let segment = i as f32 / theta_segments as f32 * TAU;
            let (sin, cos) = segment.sin_cos();
            let (x, y) = (radius * cos, radius * sin);
            let (u, v) = if outer > 0.0 {
                ((x / outer + 1.0) / 2.0, (y / outer + 1.0) / 2.0)
            } else {
                (0.5, 0.5)
            };
            vertices.push(ModelVertex {
                position: [x, y, 0.0],
                tex_coords: [u, 1.0 - v],
                normal: [0.0, 0.0, 1.0],
            });
        }
    }

    let mut indices = Vec::with_capacity((theta_segments * 6) as usize);
    for i in 0..theta_segments {
        let a = i;
        let b = i + row_len;
        let c = i + row_len + 1;
        let d = i + 1;
        indices.extend_from_slice(&[a, b, d, b, c, d]);
    }

    MeshData { vertices, indices }
}
