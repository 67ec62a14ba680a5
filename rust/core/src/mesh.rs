// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Index types for the flat, arena-style mesh representation the core
//! operates on. There is no owning `Mesh` struct: every public entry point
//! borrows its vertex/face/uv/adjacency slices directly rather than copying
//! them into an intermediate container, since calls are single-shot and
//! nothing persists past the call (§5 of the design notes).

/// Three vertex indices forming a triangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face {
    pub i1: u32,
    pub i2: u32,
    pub i3: u32,
}

impl Face {
    pub fn new(i1: u32, i2: u32, i3: u32) -> Self {
        Self { i1, i2, i3 }
    }

    /// The implicit face for index `f` when the mesh carries no explicit
    /// face list: vertices arrive pre-grouped in triples.
    pub fn implicit(f: u32) -> Self {
        Self::new(3 * f, 3 * f + 1, 3 * f + 2)
    }
}

/// Three neighboring face ids, or -1 where an edge has no neighbor
/// (a mesh boundary).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceSigned {
    pub i1: i32,
    pub i2: i32,
    pub i3: i32,
}

impl FaceSigned {
    pub fn new(i1: i32, i2: i32, i3: i32) -> Self {
        Self { i1, i2, i3 }
    }

    pub fn neighbors(&self) -> [i32; 3] {
        [self.i1, self.i2, self.i3]
    }
}

/// Looks up face `f`, honoring the "empty faces means implicit triples"
/// convention (§3).
pub fn get_face(faces: &[Face], f: u32) -> Face {
    if faces.is_empty() {
        Face::implicit(f)
    } else {
        faces[f as usize]
    }
}

/// Number of faces implied by `vertices`/`faces`, honoring the same
/// convention.
pub fn face_count(vertex_count: usize, faces: &[Face]) -> usize {
    if faces.is_empty() {
        vertex_count / 3
    } else {
        faces.len()
    }
}
