// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fixed-point polygon clipping adaptor.
//!
//! Wraps [`i_overlay`]'s float overlay engine behind the fixed-point
//! quantization contract the projection core relies on: every polygon is
//! scaled by [`CLIPPER_PRECISION`] and rounded to the nearest integer before
//! any boolean operation, and divided back afterwards. This caps effective
//! precision at one thousandth of a unit and is part of the observable
//! contract, not an implementation detail — a replacement engine must
//! preserve it.

use crate::numerics::Point2F;
use i_overlay::core::fill_rule::FillRule;
use i_overlay::core::overlay_rule::OverlayRule;
use i_overlay::float::single::SingleFloatOverlay;

/// Fixed-point scale factor. Floating coordinates are multiplied by this,
/// rounded to the nearest integer, and divided back on the way out.
pub const CLIPPER_PRECISION: f64 = 1000.0;

/// A closed polygon ring in floating-point space.
pub type Polygon = Vec<Point2F>;

/// A single closed ring in the clipping engine's fixed-point representation.
pub type FixedPath = Vec<[i64; 2]>;

/// Quantizes a polygon to the fixed-point path representation.
pub fn to_fixed_path(polygon: &[Point2F]) -> FixedPath {
    polygon
        .iter()
        .map(|p| {
            [
                (p.x as f64 * CLIPPER_PRECISION).round() as i64,
                (p.y as f64 * CLIPPER_PRECISION).round() as i64,
            ]
        })
        .collect()
}

/// Inverse of [`to_fixed_path`].
pub fn from_fixed_path(path: &FixedPath) -> Polygon {
    path.iter()
        .map(|[x, y]| Point2F::new((*x as f64 / CLIPPER_PRECISION) as f32, (*y as f64 / CLIPPER_PRECISION) as f32))
        .collect()
}

fn fixed_to_engine_path(path: &FixedPath) -> Vec<[f64; 2]> {
    path.iter().map(|[x, y]| [*x as f64, *y as f64]).collect()
}

fn engine_shapes_to_polygons(shapes: Vec<Vec<Vec<[f64; 2]>>>) -> Vec<Polygon> {
    let mut polygons = Vec::new();
    for shape in shapes {
        for contour in shape {
            if contour.len() < 3 {
                continue;
            }
            let fixed: FixedPath = contour
                .iter()
                .map(|[x, y]| [x.round() as i64, y.round() as i64])
                .collect();
            polygons.push(from_fixed_path(&fixed));
        }
    }
    polygons
}

/// Boolean AND of `subject` and `clip`, each treated as a single closed
/// region. Returns zero or more polygons, one per resulting outer loop.
pub fn intersect(subject: &[Point2F], clip: &[Point2F]) -> Vec<Polygon> {
    if subject.len() < 3 || clip.len() < 3 {
        return Vec::new();
    }
    let subject_path = vec![fixed_to_engine_path(&to_fixed_path(subject))];
    let clip_path = vec![fixed_to_engine_path(&to_fixed_path(clip))];
    let result = subject_path.overlay(&clip_path, OverlayRule::Intersect, FillRule::EvenOdd);
    engine_shapes_to_polygons(result)
}

/// Boolean OR of every polygon in `polygons`. Empty input yields empty
/// output.
pub fn union_all(polygons: &[Polygon]) -> Vec<Polygon> {
    let mut paths: Vec<Vec<[f64; 2]>> = polygons
        .iter()
        .filter(|p| p.len() >= 3)
        .map(|p| fixed_to_engine_path(&to_fixed_path(p)))
        .collect();
    if paths.is_empty() {
        return Vec::new();
    }
    let subject = vec![paths.remove(0)];
    if paths.is_empty() {
        return engine_shapes_to_polygons(vec![subject]);
    }
    let result = subject.overlay(&paths, OverlayRule::Union, FillRule::EvenOdd);
    engine_shapes_to_polygons(result)
}
