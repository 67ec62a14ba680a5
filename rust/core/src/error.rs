// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for unwrap/project operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the core crate.
#[derive(Error, Debug)]
pub enum Error {
    /// Caller passed malformed array shapes: length mismatches, indices out
    /// of range, non-triangular counts.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The atlas packer declined the mesh. Every binding surfaces this exact
    /// message; do not reword it per adaptor.
    #[error("Couldn't unwrap UVs!")]
    UnwrapFailed,

    /// Internal consistency problem (NaN coordinates, asymmetric adjacency
    /// surfacing as a clipping anomaly). Treated as a bug, not user error.
    #[error("Internal invariant violation: {0}")]
    InvariantViolation(String),
}
