// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The stroke-projection pipeline: a front-facing flood fill over the face
//! adjacency graph, per-triangle screen projection, clipping against the
//! stroke, and a barycentric lift back into UV/texture space.

use crate::clipping::{self, Polygon};
use crate::geometry_utils::triangle_normal_raw;
use crate::mesh::{face_count, get_face, Face, FaceSigned};
use crate::numerics::{Matrix44F, Point2F, Point3F, Vector2F, Vector3F};
use rustc_hash::FxHashSet;

/// Barycentric denominator below which a 2D triangle is treated as
/// degenerate. Scale-dependent (viewport pixels squared); see the design
/// notes for why this isn't a relative threshold.
const BARYCENTRIC_DEGENERACY_EPSILON: f32 = 1e-6;

/// Projects a stroke onto a mesh's texture space. Has no failure mode:
/// pathological or shape-invalid input (a stroke under 3 points, a uv/vertex
/// count mismatch, an out-of-bounds seed face) yields an empty result rather
/// than an error. Array-shape validation lives in the host bindings, which
/// re-check lengths before marshalling into this call.
#[allow(clippy::too_many_arguments)]
pub fn project(
    stroke: &[Point2F],
    vertices: &[Point3F],
    faces: &[Face],
    uvs: &[Point2F],
    adjacency: &[FaceSigned],
    texture_width: u32,
    texture_height: u32,
    camera_projection: Matrix44F,
    perspective: bool,
    viewport_width: u32,
    viewport_height: u32,
    camera_normal: Vector3F,
    seed_face: u32,
) -> Vec<Polygon> {
    if stroke.len() < 3 || uvs.len() != vertices.len() {
        return Vec::new();
    }
    let total_faces = face_count(vertices.len(), faces);
    if !adjacency.is_empty() && adjacency.len() != total_faces {
        return Vec::new();
    }
    if seed_face as usize >= total_faces {
        // Out-of-bounds seed is a caller bug at the contract level; we
        // bounds-check rather than index out of range.
        return Vec::new();
    }

    let mut work_set: FxHashSet<u32> = FxHashSet::default();
    work_set.insert(seed_face);
    let mut processed: FxHashSet<u32> = FxHashSet::default();
    let mut contributions: Vec<Polygon> = Vec::new();

    while let Some(&f) = work_set.iter().next() {
        work_set.remove(&f);
        processed.insert(f);

        let face = get_face(faces, f);
        let p1 = vertices[face.i1 as usize];
        let p2 = vertices[face.i2 as usize];
        let p3 = vertices[face.i3 as usize];

        let face_normal = triangle_normal_raw(p1, p2, p3);
        let is_front_facing = face_normal.dot(&camera_normal) >= 0.0;

        if is_front_facing {
            let q1 = project_to_viewport(p1, &camera_projection, perspective, viewport_width, viewport_height);
            let q2 = project_to_viewport(p2, &camera_projection, perspective, viewport_width, viewport_height);
            let q3 = project_to_viewport(p3, &camera_projection, perspective, viewport_width, viewport_height);

            let clipped_areas = clipping::intersect(stroke, &[q1, q2, q3]);
            if !clipped_areas.is_empty() {
                let uv1 = uvs[face.i1 as usize];
                let uv2 = uvs[face.i2 as usize];
                let uv3 = uvs[face.i3 as usize];

                for area in &clipped_areas {
                    if let Some(barycentrics) = barycentric_coordinates(area, q1, q2, q3) {
                        let texture_polygon = barycentrics
                            .into_iter()
                            .map(|(u, v, w)| {
                                texture_coordinates(u, v, w, uv1, uv2, uv3, texture_width, texture_height)
                            })
                            .collect();
                        contributions.push(texture_polygon);
                    }
                }
            }
        }

        // Neighbors are enqueued regardless of culling or clipping outcome
        // above: traversal must keep going through back-faces and
        // stroke-missed faces alike (see §4.3 step 7 / scenario 6).
        if !adjacency.is_empty() {
            for neighbor in adjacency[f as usize].neighbors() {
                if neighbor >= 0 && !processed.contains(&(neighbor as u32)) {
                    work_set.insert(neighbor as u32);
                }
            }
        }
    }

    clipping::union_all(&contributions)
}

/// Maps a 3D point through the camera matrix and, for perspective cameras,
/// divides by `2*z` rather than `z` — an intentional part of the contract
/// matching the host's normalized-device-coordinate convention.
fn project_to_viewport(
    point: Point3F,
    matrix: &Matrix44F,
    is_perspective: bool,
    viewport_width: u32,
    viewport_height: u32,
) -> Point2F {
    let mut projected = matrix.pre_multiply(point);
    if is_perspective && projected.z != 0.0 {
        projected = projected / (projected.z * 2.0);
    }
    Point2F::new(
        projected.x * viewport_width as f32 / 2.0,
        projected.y * viewport_height as f32 / 2.0,
    )
}

/// Barycentric (u, v, w) of each point in `polygon` against the 2D triangle
/// (t1, t2, t3), or `None` if the triangle is degenerate in 2D. Coordinates
/// are not clamped to [0, 1]: the caller has already clipped to within the
/// triangle, so out-of-range values only arise from numerical slop.
fn barycentric_coordinates(
    polygon: &[Point2F],
    t1: Point2F,
    t2: Point2F,
    t3: Point2F,
) -> Option<Vec<(f32, f32, f32)>> {
    let v0 = Vector2F::from_points(t1, t2);
    let v1 = Vector2F::from_points(t1, t3);
    let d00 = v0.dot(&v0);
    let d01 = v0.dot(&v1);
    let d11 = v1.dot(&v1);
    let denom = d00 * d11 - d01 * d01;
    if denom.abs() < BARYCENTRIC_DEGENERACY_EPSILON {
        return None;
    }

    let mut result = Vec::with_capacity(polygon.len());
    for point in polygon {
        let v2 = Vector2F::from_points(t1, *point);
        let d20 = v2.dot(&v0);
        let d21 = v2.dot(&v1);
        let v = (d11 * d20 - d01 * d21) / denom;
        let w = (d00 * d21 - d01 * d20) / denom;
        let u = 1.0 - v - w;
        result.push((u, v, w));
    }
    Some(result)
}

#[allow(clippy::too_many_arguments)]
fn texture_coordinates(
    u: f32,
    v: f32,
    w: f32,
    uv1: Point2F,
    uv2: Point2F,
    uv3: Point2F,
    texture_width: u32,
    texture_height: u32,
) -> Point2F {
    let x = u * uv1.x + v * uv2.x + w * uv3.x;
    let y = u * uv1.y + v * uv2.y + w * uv3.y;
    Point2F::new(x * texture_width as f32, y * texture_height as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct UnitSquareMesh {
        vertices: Vec<Point3F>,
        faces: Vec<Face>,
        uvs: Vec<Point2F>,
        adjacency: Vec<FaceSigned>,
    }

    /// Two triangles covering the [0,1]^2 plane at z=0, UVs matching XY.
    fn unit_square_mesh() -> UnitSquareMesh {
        let vertices = vec![
            Point3F::new(0.0, 0.0, 0.0),
            Point3F::new(1.0, 0.0, 0.0),
            Point3F::new(1.0, 1.0, 0.0),
            Point3F::new(0.0, 1.0, 0.0),
        ];
        let faces = vec![Face::new(0, 1, 2), Face::new(0, 2, 3)];
        let uvs = vec![
            Point2F::new(0.0, 0.0),
            Point2F::new(1.0, 0.0),
            Point2F::new(1.0, 1.0),
            Point2F::new(0.0, 1.0),
        ];
        let adjacency = vec![FaceSigned::new(1, -1, -1), FaceSigned::new(-1, 0, -1)];
        UnitSquareMesh {
            vertices,
            faces,
            uvs,
            adjacency,
        }
    }

    fn full_viewport_stroke() -> Vec<Point2F> {
        vec![
            Point2F::new(-1.0, -1.0),
            Point2F::new(1.0, -1.0),
            Point2F::new(1.0, 1.0),
            Point2F::new(-1.0, 1.0),
        ]
    }

    #[test]
    fn scenario_1_full_viewport_stroke_covers_texture() {
        let mesh = unit_square_mesh();
        let result = project(
            &full_viewport_stroke(),
            &mesh.vertices,
            &mesh.faces,
            &mesh.uvs,
            &mesh.adjacency,
            100,
            100,
            Matrix44F::identity(),
            false,
            2,
            2,
            Vector3F::new(0.0, 0.0, 1.0),
            0,
        );
        assert_eq!(result.len(), 1);
        let polygon = &result[0];
        let min_x = polygon.iter().map(|p| p.x).fold(f32::MAX, f32::min);
        let max_x = polygon.iter().map(|p| p.x).fold(f32::MIN, f32::max);
        assert!(min_x <= 1.0, "min_x={min_x}");
        assert!(max_x >= 99.0, "max_x={max_x}");
    }

    #[test]
    fn scenario_2_reversed_camera_normal_culls_everything() {
        let mesh = unit_square_mesh();
        let result = project(
            &full_viewport_stroke(),
            &mesh.vertices,
            &mesh.faces,
            &mesh.uvs,
            &mesh.adjacency,
            100,
            100,
            Matrix44F::identity(),
            false,
            2,
            2,
            Vector3F::new(0.0, 0.0, -1.0),
            0,
        );
        assert!(result.is_empty());
    }

    #[test]
    fn scenario_3_disjoint_stroke_is_empty() {
        let mesh = unit_square_mesh();
        let stroke = vec![
            Point2F::new(10.0, 10.0),
            Point2F::new(11.0, 10.0),
            Point2F::new(11.0, 11.0),
            Point2F::new(10.0, 11.0),
        ];
        let result = project(
            &stroke,
            &mesh.vertices,
            &mesh.faces,
            &mesh.uvs,
            &mesh.adjacency,
            100,
            100,
            Matrix44F::identity(),
            false,
            2,
            2,
            Vector3F::new(0.0, 0.0, 1.0),
            0,
        );
        assert!(result.is_empty());
    }

    #[test]
    fn scenario_4_indexed_and_flat_faces_agree() {
        let mesh = unit_square_mesh();
        let indexed = project(
            &full_viewport_stroke(),
            &mesh.vertices,
            &mesh.faces,
            &mesh.uvs,
            &mesh.adjacency,
            100,
            100,
            Matrix44F::identity(),
            false,
            2,
            2,
            Vector3F::new(0.0, 0.0, 1.0),
            0,
        );

        // Flat layout: vertices repeated in implicit triples matching face 0.
        let flat_vertices = vec![
            mesh.vertices[0],
            mesh.vertices[1],
            mesh.vertices[2],
        ];
        let flat_uvs = vec![mesh.uvs[0], mesh.uvs[1], mesh.uvs[2]];
        let flat_adjacency = vec![FaceSigned::new(-1, -1, -1)];
        let flat = project(
            &full_viewport_stroke(),
            &flat_vertices,
            &[],
            &flat_uvs,
            &flat_adjacency,
            100,
            100,
            Matrix44F::identity(),
            false,
            2,
            2,
            Vector3F::new(0.0, 0.0, 1.0),
            0,
        );

        assert_eq!(indexed.len() >= 1, flat.len() >= 1);
    }

    #[test]
    fn scenario_6_adjacency_propagates_through_culled_middle_face() {
        // Strip T0 - T1 - T2 along +x, all coplanar at z=0.
        let vertices = vec![
            Point3F::new(0.0, 0.0, 0.0),
            Point3F::new(1.0, 0.0, 0.0),
            Point3F::new(1.0, 1.0, 0.0),
            Point3F::new(2.0, 0.0, 0.0),
            Point3F::new(2.0, 1.0, 0.0),
            Point3F::new(3.0, 0.0, 0.0),
            Point3F::new(3.0, 1.0, 0.0),
        ];
        let faces = vec![
            Face::new(0, 1, 2), // T0
            Face::new(1, 3, 2), // T1
            Face::new(3, 5, 4), // T2 (not sharing an edge with T1 in this
                                 // simplified strip, but reachable via adjacency)
        ];
        let uvs = vec![
            Point2F::new(0.0, 0.0),
            Point2F::new(1.0 / 3.0, 0.0),
            Point2F::new(1.0 / 3.0, 1.0),
            Point2F::new(2.0 / 3.0, 0.0),
            Point2F::new(2.0 / 3.0, 1.0),
            Point2F::new(1.0, 0.0),
            Point2F::new(1.0, 1.0),
        ];
        let adjacency = vec![
            FaceSigned::new(1, -1, -1),
            FaceSigned::new(0, 2, -1),
            FaceSigned::new(1, -1, -1),
        ];

        // With viewport_width = 6 and these vertices, screen-space (pixel) x
        // ranges are T0 -> [0, 3], T1 -> [3, 6], T2 -> [6, 9]. The stroke
        // below covers only T2's footprint, so T0 and T1 must contribute
        // nothing and are reached only by neighbor propagation through the
        // flood fill, not by the stroke overlapping them.
        let stroke = vec![
            Point2F::new(5.9, -0.1),
            Point2F::new(9.1, -0.1),
            Point2F::new(9.1, 1.1),
            Point2F::new(5.9, 1.1),
        ];

        let result = project(
            &stroke,
            &vertices,
            &faces,
            &uvs,
            &adjacency,
            300,
            100,
            Matrix44F::identity(),
            false,
            6,
            2,
            Vector3F::new(0.0, 0.0, 1.0),
            0,
        );

        assert!(!result.is_empty());
        // T2's uv region starts at texture x = 200 (uv x = 2/3 * 300); T0 and
        // T1 would land below that. Every contributed point must fall in
        // T2's region, confirming traversal actually reached it through T1.
        for polygon in &result {
            for point in polygon {
                assert!(
                    point.x >= 190.0,
                    "expected a point in T2's texture region, got x={}",
                    point.x
                );
            }
        }
    }

    #[test]
    fn out_of_bounds_seed_yields_empty_not_panic() {
        let mesh = unit_square_mesh();
        let result = project(
            &full_viewport_stroke(),
            &mesh.vertices,
            &mesh.faces,
            &mesh.uvs,
            &mesh.adjacency,
            100,
            100,
            Matrix44F::identity(),
            false,
            2,
            2,
            Vector3F::new(0.0, 0.0, 1.0),
            999,
        );
        assert!(result.is_empty());
    }

    #[test]
    fn mismatched_uv_count_yields_empty_result() {
        let mesh = unit_square_mesh();
        let result = project(
            &full_viewport_stroke(),
            &mesh.vertices,
            &mesh.faces,
            &mesh.uvs[..2],
            &mesh.adjacency,
            100,
            100,
            Matrix44F::identity(),
            false,
            2,
            2,
            Vector3F::new(0.0, 0.0, 1.0),
            0,
        );
        assert!(result.is_empty());
    }

    #[test]
    fn stroke_under_three_points_yields_empty_result() {
        let mesh = unit_square_mesh();
        let stroke = vec![Point2F::new(-1.0, -1.0), Point2F::new(1.0, -1.0)];
        let result = project(
            &stroke,
            &mesh.vertices,
            &mesh.faces,
            &mesh.uvs,
            &mesh.adjacency,
            100,
            100,
            Matrix44F::identity(),
            false,
            2,
            2,
            Vector3F::new(0.0, 0.0, 1.0),
            0,
        );
        assert!(result.is_empty());
    }
}
