// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! JS-facing `unwrap`/`project` entry points. Flat arrays in, flat arrays
//! (or a small typed object) out — no algorithmic behavior lives here
//! beyond array marshalling and error translation (§11.1).

use js_sys::{Array, Float32Array, Object, Reflect, Uint32Array};
use uvula_core::{Face, FaceSigned, Matrix44F, Point2F, Point3F, Vector3F};
use wasm_bindgen::prelude::*;

fn set_js_prop(obj: &Object, key: &str, value: impl Into<JsValue>) {
    let _ = Reflect::set(obj, &JsValue::from_str(key), &value.into());
}

fn vertices_from_flat(flat: &[f32]) -> Result<Vec<Point3F>, JsValue> {
    if flat.len() % 3 != 0 {
        return Err(JsValue::from_str("vertex array length must be a multiple of 3"));
    }
    Ok(flat
        .chunks_exact(3)
        .map(|c| Point3F::new(c[0], c[1], c[2]))
        .collect())
}

fn uvs_from_flat(flat: &[f32]) -> Result<Vec<Point2F>, JsValue> {
    if flat.len() % 2 != 0 {
        return Err(JsValue::from_str("uv array length must be a multiple of 2"));
    }
    Ok(flat.chunks_exact(2).map(|c| Point2F::new(c[0], c[1])).collect())
}

fn faces_from_flat(flat: &[u32]) -> Result<Vec<Face>, JsValue> {
    if flat.len() % 3 != 0 {
        return Err(JsValue::from_str("index array length must be a multiple of 3"));
    }
    Ok(flat.chunks_exact(3).map(|c| Face::new(c[0], c[1], c[2])).collect())
}

fn adjacency_from_flat(flat: &[i32]) -> Result<Vec<FaceSigned>, JsValue> {
    if flat.len() % 3 != 0 {
        return Err(JsValue::from_str(
            "adjacency array length must be a multiple of 3",
        ));
    }
    Ok(flat
        .chunks_exact(3)
        .map(|c| FaceSigned::new(c[0], c[1], c[2]))
        .collect())
}

fn camera_matrix_from_flat(flat: &[f32]) -> Result<Matrix44F, JsValue> {
    if flat.len() != 16 {
        return Err(JsValue::from_str("camera matrix must have exactly 16 entries"));
    }
    let mut rows = [[0.0f32; 4]; 4];
    for row in 0..4 {
        for col in 0..4 {
            rows[row][col] = flat[row * 4 + col];
        }
    }
    Ok(Matrix44F::from_row_major(rows))
}

/// Unwraps a mesh, returning `{ uvCoordinates, textureWidth, textureHeight }`.
/// Throws with the literal message `"Couldn't unwrap UVs!"` on failure, per
/// §6/§11.1.
#[wasm_bindgen]
pub fn unwrap(vertices: &[f32], indices: &[u32]) -> Result<JsValue, JsValue> {
    let vertices = vertices_from_flat(vertices)?;
    let faces = faces_from_flat(indices)?;

    let result = uvula_core::unwrap(&vertices, &faces)
        .map_err(|_| JsValue::from_str("Couldn't unwrap UVs!"))?;

    let flat_uvs: Vec<f32> = result.uvs.iter().flat_map(|p| [p.x, p.y]).collect();

    let out = Object::new();
    set_js_prop(&out, "uvCoordinates", Float32Array::from(flat_uvs.as_slice()));
    set_js_prop(&out, "textureWidth", result.texture_width);
    set_js_prop(&out, "textureHeight", result.texture_height);
    Ok(out.into())
}

/// Projects a stroke onto a mesh's texture space, returning a nested
/// `number[][]` (one flat `[x0, y0, x1, y1, ...]` array per output polygon).
#[allow(clippy::too_many_arguments)]
#[wasm_bindgen]
pub fn project(
    stroke: &[f32],
    vertices: &[f32],
    indices: &[u32],
    uvs: &[f32],
    adjacency: &[i32],
    texture_width: u32,
    texture_height: u32,
    camera_projection: &[f32],
    perspective: bool,
    viewport_width: u32,
    viewport_height: u32,
    camera_normal: &[f32],
    seed_face: u32,
) -> Result<JsValue, JsValue> {
    let stroke = uvs_from_flat(stroke)?;
    let vertices = vertices_from_flat(vertices)?;
    let faces = faces_from_flat(indices)?;
    let uvs = uvs_from_flat(uvs)?;
    let adjacency = adjacency_from_flat(adjacency)?;
    let camera_projection = camera_matrix_from_flat(camera_projection)?;
    if camera_normal.len() != 3 {
        return Err(JsValue::from_str("camera normal must have exactly 3 entries"));
    }
    let camera_normal = Vector3F::new(camera_normal[0], camera_normal[1], camera_normal[2]);

    let polygons = uvula_core::project(
        &stroke,
        &vertices,
        &faces,
        &uvs,
        &adjacency,
        texture_width,
        texture_height,
        camera_projection,
        perspective,
        viewport_width,
        viewport_height,
        camera_normal,
        seed_face,
    );

    let out = Array::new();
    for polygon in polygons {
        let flat: Vec<f32> = polygon.iter().flat_map(|p| [p.x, p.y]).collect();
        out.push(&Float32Array::from(flat.as_slice()));
    }
    Ok(out.into())
}

/// Returns a version string for diagnostics, matching the original host
/// binding's `get_uvula_info` accessor.
#[wasm_bindgen(js_name = uvula_info)]
pub fn uvula_info() -> String {
    format!("uvula {}", env!("CARGO_PKG_VERSION"))
}
