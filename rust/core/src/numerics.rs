// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pure value types: points, vectors, and the two matrix shapes the rest of
//! the crate builds on. Kept free of any dependency on a general-purpose
//! linear algebra crate so that the bespoke semantics below (a `normalize`
//! that reports success rather than always succeeding, a `preMultiply` that
//! never perspective-divides) stay exactly what callers expect rather than
//! whatever a borrowed inherent method happens to do.

use std::ops::{Add, Div, Mul, Sub};

/// Machine epsilon used as the "effectively zero length" cutoff for vector
/// normalization, matching the threshold the rest of this lineage uses for
/// single-precision geometry.
const LENGTH_EPSILON: f32 = f32::EPSILON;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point2F {
    pub x: f32,
    pub y: f32,
}

impl Point2F {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Lexicographic order on (x, y, z), matching the original's `operator<`.
/// Field declaration order drives the derived comparison.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Point3F {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Point3F {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

impl Div<f32> for Point3F {
    type Output = Point3F;
    fn div(self, scale: f32) -> Point3F {
        Point3F::new(self.x / scale, self.y / scale, self.z / scale)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2F {
    pub x: f32,
    pub y: f32,
}

impl Vector2F {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Direction from `from` to `to`, i.e. `to - from`.
    pub fn from_points(from: Point2F, to: Point2F) -> Self {
        Self::new(to.x - from.x, to.y - from.y)
    }

    pub fn dot(&self, other: &Vector2F) -> f32 {
        self.x * other.x + self.y * other.y
    }
}

impl Sub for Vector2F {
    type Output = Vector2F;
    fn sub(self, rhs: Vector2F) -> Vector2F {
        Vector2F::new(self.x - rhs.x, self.y - rhs.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector3F {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3F {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Direction from `from` to `to`, i.e. `to - from`.
    pub fn from_points(from: Point3F, to: Point3F) -> Self {
        Self::new(to.x - from.x, to.y - from.y, to.z - from.z)
    }

    pub fn dot(&self, other: &Vector3F) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(&self, other: &Vector3F) -> Vector3F {
        Vector3F::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    pub fn length_squared(&self) -> f32 {
        self.dot(self)
    }

    pub fn length(&self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Normalizes in place, returning whether it succeeded. Leaves the
    /// vector zeroed when the length is at or below machine epsilon, rather
    /// than dividing by (near) zero.
    pub fn normalize(&mut self) -> bool {
        let length = self.length();
        if length <= LENGTH_EPSILON {
            self.x = 0.0;
            self.y = 0.0;
            self.z = 0.0;
            return false;
        }
        self.x /= length;
        self.y /= length;
        self.z /= length;
        true
    }

    /// Non-mutating counterpart of [`Vector3F::normalize`]; `None` on the
    /// same degenerate case.
    pub fn normalized(&self) -> Option<Vector3F> {
        let mut copy = *self;
        if copy.normalize() {
            Some(copy)
        } else {
            None
        }
    }
}

impl Add for Vector3F {
    type Output = Vector3F;
    fn add(self, rhs: Vector3F) -> Vector3F {
        Vector3F::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vector3F {
    type Output = Vector3F;
    fn sub(self, rhs: Vector3F) -> Vector3F {
        Vector3F::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vector3F {
    type Output = Vector3F;
    fn mul(self, scale: f32) -> Vector3F {
        Vector3F::new(self.x * scale, self.y * scale, self.z * scale)
    }
}

impl Div<f32> for Vector3F {
    type Output = Vector3F;
    fn div(self, scale: f32) -> Vector3F {
        Vector3F::new(self.x / scale, self.y / scale, self.z / scale)
    }
}

/// Row-major 3x3 matrix. The only construction path this crate needs is
/// [`Matrix33F::make_orthogonal_basis`]; `transpose`/`project` exist because
/// the basis-construction algorithm builds a matrix by columns and then
/// transposes it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix33F {
    values: [[f32; 3]; 3],
}

impl Matrix33F {
    pub fn zero() -> Self {
        Self {
            values: [[0.0; 3]; 3],
        }
    }

    pub fn transpose(&self) -> Matrix33F {
        let mut out = Matrix33F::zero();
        for row in 0..3 {
            for col in 0..3 {
                out.values[row][col] = self.values[col][row];
            }
        }
        out
    }

    /// Projects a 3D point to 2D by dotting with the first two columns,
    /// matching [`Matrix33F::make_orthogonal_basis`]'s column storage.
    pub fn project(&self, point: Point3F) -> Point2F {
        let v = [point.x, point.y, point.z];
        let x = self.values[0][0] * v[0] + self.values[1][0] * v[1] + self.values[2][0] * v[2];
        let y = self.values[0][1] * v[0] + self.values[1][1] * v[1] + self.values[2][1] * v[2];
        Point2F::new(x, y)
    }

    /// Builds an orthonormal basis whose third row is `normal`, so that
    /// [`Matrix33F::project`] maps 3D points onto the plane perpendicular to
    /// it. Ported from the original's column-then-transpose construction:
    /// when `normal` isn't close to parallel with Z, the first basis vector
    /// is the in-plane perpendicular of `normal`'s XY projection; when it
    /// is (near the poles), the basis falls back to a fixed X/Y pair flipped
    /// by the sign of `normal.z`.
    pub fn make_orthogonal_basis(normal: Vector3F) -> Matrix33F {
        let mut matrix = Matrix33F::zero();
        matrix.values[2][0] = normal.x;
        matrix.values[2][1] = normal.y;
        matrix.values[2][2] = normal.z;

        let eps = f32::EPSILON;
        let length_squared = Vector3F::new(normal.x, normal.y, 0.0).length_squared();

        if length_squared > eps {
            let length = length_squared.sqrt();
            matrix.values[0][0] = normal.y / length;
            matrix.values[0][1] = -normal.x / length;
            matrix.values[0][2] = 0.0;
            matrix.values[1][0] = -normal.z * matrix.values[0][1];
            matrix.values[1][1] = normal.z * matrix.values[0][0];
            matrix.values[1][2] = normal.x * matrix.values[0][1] - normal.y * matrix.values[0][0];
        } else {
            matrix.values[0][0] = if normal.z < 0.0 { -1.0 } else { 1.0 };
            matrix.values[0][1] = 0.0;
            matrix.values[0][2] = 0.0;
            matrix.values[1][0] = 0.0;
            matrix.values[1][1] = 1.0;
            matrix.values[1][2] = 0.0;
        }

        matrix.transpose()
    }
}

/// Row-major 4x4 matrix used for the camera projection contract.
/// `pre_multiply` is deliberately affine: it never divides by `w`. The
/// perspective divide the projection core applies afterwards is by `2*z`,
/// not `w`, and happens outside this type entirely (see §4.3/§9 of the
/// design notes — this is an intentional part of the contract, not an
/// omission).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix44F {
    values: [[f32; 4]; 4],
}

impl Matrix44F {
    pub fn from_row_major(values: [[f32; 4]; 4]) -> Self {
        Self { values }
    }

    pub fn identity() -> Self {
        let mut values = [[0.0f32; 4]; 4];
        for i in 0..4 {
            values[i][i] = 1.0;
        }
        Self { values }
    }

    /// Affine `M * [p.x, p.y, p.z, 1]`, dropping the homogeneous `w` row
    /// rather than dividing by it.
    pub fn pre_multiply(&self, point: Point3F) -> Point3F {
        let v = [point.x, point.y, point.z, 1.0];
        let mut out = [0.0f32; 3];
        for (row, slot) in out.iter_mut().enumerate() {
            *slot = self.values[row][0] * v[0]
                + self.values[row][1] * v[1]
                + self.values[row][2] * v[2]
                + self.values[row][3] * v[3];
        }
        Point3F::new(out[0], out[1], out[2])
    }
}
