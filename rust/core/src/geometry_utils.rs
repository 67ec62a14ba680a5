// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Small geometric helpers shared by the unwrap and projection cores.

use crate::numerics::{Point3F, Vector3F};

/// Unit normal of the triangle (v1, v2, v3), or `None` if the triangle is
/// degenerate (zero area).
pub fn triangle_normal(v1: Point3F, v2: Point3F, v3: Point3F) -> Option<Vector3F> {
    Vector3F::from_points(v1, v2)
        .cross(&Vector3F::from_points(v1, v3))
        .normalized()
}

/// Raw (unnormalized) cross-product normal, used by the projection core's
/// back-face test where only the sign of the dot product with the camera
/// normal matters.
pub fn triangle_normal_raw(v1: Point3F, v2: Point3F, v3: Point3F) -> Vector3F {
    Vector3F::from_points(v1, v2).cross(&Vector3F::from_points(v1, v3))
}

pub fn deg2rad(angle: f32) -> f32 {
    angle * std::f32::consts::PI / 180.0
}
