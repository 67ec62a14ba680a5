// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Uvula
//!
//! UV unwrapping and stroke-to-texture projection for triangulated meshes.
//!
//! Two operations make up the public surface:
//!
//! - [`unwrap`]: segment a mesh into charts and pack them into a UV atlas.
//! - [`project`]: trace a 2D screen-space stroke across mesh faces reachable
//!   from a seed triangle and lift its footprint into texture space.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use uvula_core::{unwrap, project};
//!
//! let result = unwrap(&vertices, &faces)?;
//! println!("packed into a {}x{} texture", result.texture_width, result.texture_height);
//! ```
//!
//! ## Layout
//!
//! - [`numerics`]: pure value types (points, vectors, 3x3/4x4 matrices).
//! - [`geometry_utils`]: triangle normal, angle conversion.
//! - [`clipping`]: fixed-point 2D polygon boolean-op adaptor.
//! - [`mesh`]: face/adjacency index types.
//! - [`project`]: the stroke-projection flood fill.
//! - [`unwrap`]: chart segmentation and atlas packing.

pub mod clipping;
pub mod error;
pub mod geometry_utils;
pub mod mesh;
pub mod numerics;
pub mod project;
pub mod unwrap;

pub use clipping::{Polygon, CLIPPER_PRECISION};
pub use error::{Error, Result};
pub use mesh::{Face, FaceSigned};
pub use numerics::{Matrix33F, Matrix44F, Point2F, Point3F, Vector2F, Vector3F};
pub use project::project;
pub use unwrap::{unwrap, UnwrapResult};
