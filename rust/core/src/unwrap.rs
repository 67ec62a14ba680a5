// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Chart segmentation and atlas packing for UV unwrapping.
//!
//! Face-normal-based chart grouping and the actual 2D packing into the unit
//! square are delegated to [`uvgen`], which already solves exactly this
//! problem (it backs lightmap UV generation elsewhere in this ecosystem).
//! This module owns marshalling in and out and the recommended texture size,
//! which `uvgen` itself has no opinion on.

use crate::error::{Error, Result};
use crate::mesh::{face_count, get_face, Face};
use crate::numerics::Point2F;
use crate::numerics::Point3F;

/// Target texels along one edge of an average triangle. Tuned to keep small
/// meshes from producing tiny textures and large meshes from producing
/// absurdly large ones.
const TEXELS_PER_TRIANGLE_EDGE: f32 = 8.0;
const MIN_TEXTURE_SIZE: u32 = 64;
const MAX_TEXTURE_SIZE: u32 = 4096;

/// Gap, in UV space, uvgen leaves between packed charts.
const CHART_SPACING: f32 = 0.01;

pub struct UnwrapResult {
    pub uvs: Vec<Point2F>,
    pub texture_width: u32,
    pub texture_height: u32,
}

pub fn unwrap(vertices: &[Point3F], faces: &[Face]) -> Result<UnwrapResult> {
    let total_faces = face_count(vertices.len(), faces);
    if vertices.is_empty() || total_faces == 0 {
        return Err(Error::UnwrapFailed);
    }

    let positions: Vec<[f32; 3]> = vertices.iter().map(|p| [p.x, p.y, p.z]).collect();
    let triangles: Vec<[u32; 3]> = (0..total_faces as u32)
        .map(|f| {
            let face = get_face(faces, f);
            [face.i1, face.i2, face.i3]
        })
        .collect();

    let patch = uvgen::generate_uvs(
        positions.iter().copied(),
        triangles.iter().copied(),
        CHART_SPACING,
    )
    .ok_or(Error::UnwrapFailed)?;

    // uvgen may duplicate vertices along UV seams (`patch.additional_vertices`)
    // to give each chart a clean cut; this crate's contract keeps one UV per
    // input vertex (§3), so we take the UV assigned to each vertex's first
    // occurrence and accept that seam vertices shared by charts with
    // divergent orientations lose their second copy. See DESIGN.md.
    if patch.second_tex_coords.len() < vertices.len() {
        return Err(Error::InvariantViolation(
            "atlas packer returned fewer UVs than input vertices".to_string(),
        ));
    }
    let uvs: Vec<Point2F> = patch.second_tex_coords[..vertices.len()]
        .iter()
        .map(|uv| Point2F::new(uv.x, uv.y))
        .collect();

    let texture_size = recommended_texture_size(total_faces);

    Ok(UnwrapResult {
        uvs,
        texture_width: texture_size,
        texture_height: texture_size,
    })
}

/// Heuristic texture size from face count: approximate each triangle as
/// covering a fixed texel footprint, take the square root to get a linear
/// texture edge, then round up to a power of two (friendlier to GPU upload
/// and mipmapping on the host side).
fn recommended_texture_size(total_faces: usize) -> u32 {
    let texels_per_edge = (total_faces as f32).sqrt() * TEXELS_PER_TRIANGLE_EDGE;
    let size = texels_per_edge.ceil() as u32;
    size.clamp(MIN_TEXTURE_SIZE, MAX_TEXTURE_SIZE).next_power_of_two()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::Face;

    fn cube_like_mesh() -> (Vec<Point3F>, Vec<Face>) {
        // A simple quad split into two triangles, repeated with a slight
        // offset to give the packer more than a single chart to place.
        let mut vertices = Vec::new();
        let mut faces = Vec::new();
        for i in 0..4u32 {
            let base = vertices.len() as u32;
            let z = i as f32;
            vertices.push(Point3F::new(0.0, 0.0, z));
            vertices.push(Point3F::new(1.0, 0.0, z));
            vertices.push(Point3F::new(1.0, 1.0, z));
            vertices.push(Point3F::new(0.0, 1.0, z));
            faces.push(Face::new(base, base + 1, base + 2));
            faces.push(Face::new(base, base + 2, base + 3));
        }
        (vertices, faces)
    }

    #[test]
    fn unwrap_yields_uvs_in_unit_square() {
        let (vertices, faces) = cube_like_mesh();
        let result = unwrap(&vertices, &faces).unwrap();
        assert_eq!(result.uvs.len(), vertices.len());
        for uv in &result.uvs {
            assert!((0.0..=1.0).contains(&uv.x), "uv.x={}", uv.x);
            assert!((0.0..=1.0).contains(&uv.y), "uv.y={}", uv.y);
        }
    }

    #[test]
    fn unwrap_is_deterministic() {
        let (vertices, faces) = cube_like_mesh();
        let first = unwrap(&vertices, &faces).unwrap();
        let second = unwrap(&vertices, &faces).unwrap();
        assert_eq!(first.uvs.len(), second.uvs.len());
        for (a, b) in first.uvs.iter().zip(second.uvs.iter()) {
            assert_eq!(a.x, b.x);
            assert_eq!(a.y, b.y);
        }
        assert_eq!(first.texture_width, second.texture_width);
        assert_eq!(first.texture_height, second.texture_height);
    }

    #[test]
    fn unwrap_of_empty_mesh_fails() {
        assert!(matches!(unwrap(&[], &[]), Err(Error::UnwrapFailed)));
    }

    #[test]
    fn recommended_texture_size_grows_with_face_count() {
        assert!(recommended_texture_size(4) <= recommended_texture_size(4_000));
        assert!(recommended_texture_size(0) >= MIN_TEXTURE_SIZE);
    }
}
