// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Python bindings over numpy arrays. Mirrors the shape contract of the
//! original host binding: vertices as `(N, 3)` float arrays, faces as
//! `(N, 3)` integer arrays, UVs as `(N, 2)` float arrays. The actual
//! unwrap/project call runs with the GIL released.

use numpy::{PyArray2, PyReadonlyArray1, PyReadonlyArray2};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use uvula_core::{Face, FaceSigned, Matrix44F, Point2F, Point3F, Vector3F};

fn vertices_from_array(array: PyReadonlyArray2<f32>) -> PyResult<Vec<Point3F>> {
    if array.shape()[1] != 3 {
        return Err(PyValueError::new_err("vertices array must have shape (N, 3)"));
    }
    Ok(array
        .as_array()
        .rows()
        .into_iter()
        .map(|r| Point3F::new(r[0], r[1], r[2]))
        .collect())
}

fn uvs_from_array(array: PyReadonlyArray2<f32>) -> PyResult<Vec<Point2F>> {
    if array.shape()[1] != 2 {
        return Err(PyValueError::new_err("uv array must have shape (N, 2)"));
    }
    Ok(array
        .as_array()
        .rows()
        .into_iter()
        .map(|r| Point2F::new(r[0], r[1]))
        .collect())
}

fn faces_from_array(array: PyReadonlyArray2<u32>) -> PyResult<Vec<Face>> {
    if array.shape()[1] != 3 {
        return Err(PyValueError::new_err("index array must have shape (N, 3)"));
    }
    Ok(array
        .as_array()
        .rows()
        .into_iter()
        .map(|r| Face::new(r[0], r[1], r[2]))
        .collect())
}

fn adjacency_from_array(array: PyReadonlyArray2<i32>) -> PyResult<Vec<FaceSigned>> {
    if array.shape()[1] != 3 {
        return Err(PyValueError::new_err("adjacency array must have shape (N, 3)"));
    }
    Ok(array
        .as_array()
        .rows()
        .into_iter()
        .map(|r| FaceSigned::new(r[0], r[1], r[2]))
        .collect())
}

fn camera_matrix_from_array(array: PyReadonlyArray2<f32>) -> PyResult<Matrix44F> {
    if array.shape() != [4, 4] {
        return Err(PyValueError::new_err("camera matrix must have shape (4, 4)"));
    }
    let view = array.as_array();
    let mut rows = [[0.0f32; 4]; 4];
    for r in 0..4 {
        for c in 0..4 {
            rows[r][c] = view[[r, c]];
        }
    }
    Ok(Matrix44F::from_row_major(rows))
}

fn camera_normal_from_array(array: PyReadonlyArray1<f32>) -> PyResult<Vector3F> {
    if array.len() != 3 {
        return Err(PyValueError::new_err("camera normal must have exactly 3 entries"));
    }
    let view = array.as_array();
    Ok(Vector3F::new(view[0], view[1], view[2]))
}

/// Unwraps a mesh, returning `(uv_coordinates, texture_width, texture_height)`.
#[pyfunction]
fn unwrap(
    py: Python<'_>,
    vertices: PyReadonlyArray2<f32>,
    indices: PyReadonlyArray2<u32>,
) -> PyResult<(Py<PyArray2<f32>>, u32, u32)> {
    let vertices = vertices_from_array(vertices)?;
    let faces = faces_from_array(indices)?;

    let result = py
        .allow_threads(|| uvula_core::unwrap(&vertices, &faces))
        .map_err(|_| PyValueError::new_err("Couldn't unwrap UVs!"))?;

    let flat: Vec<f32> = result.uvs.iter().flat_map(|p| [p.x, p.y]).collect();
    let rows = result.uvs.len();
    let array = PyArray2::from_vec2(
        py,
        &flat
            .chunks_exact(2)
            .map(|c| c.to_vec())
            .collect::<Vec<_>>(),
    )
    .map_err(|_| PyValueError::new_err("failed to build output array"))?;
    debug_assert_eq!(array.shape(), [rows, 2]);

    Ok((array.into(), result.texture_width, result.texture_height))
}

/// Projects a stroke onto a mesh's texture space, returning one `(M, 2)`
/// array per output polygon.
#[allow(clippy::too_many_arguments)]
#[pyfunction]
fn project(
    py: Python<'_>,
    stroke: PyReadonlyArray2<f32>,
    mesh_vertices: PyReadonlyArray2<f32>,
    mesh_indices: PyReadonlyArray2<u32>,
    mesh_uv: PyReadonlyArray2<f32>,
    adjacency: PyReadonlyArray2<i32>,
    texture_width: u32,
    texture_height: u32,
    camera_projection_matrix: PyReadonlyArray2<f32>,
    is_camera_perspective: bool,
    viewport_width: u32,
    viewport_height: u32,
    camera_normal: PyReadonlyArray1<f32>,
    seed_face: u32,
) -> PyResult<Vec<Py<PyArray2<f32>>>> {
    let stroke = uvs_from_array(stroke)?;
    let mesh_vertices = vertices_from_array(mesh_vertices)?;
    let mesh_indices = faces_from_array(mesh_indices)?;
    let mesh_uv = uvs_from_array(mesh_uv)?;
    let adjacency = adjacency_from_array(adjacency)?;
    let camera_projection_matrix = camera_matrix_from_array(camera_projection_matrix)?;
    let camera_normal = camera_normal_from_array(camera_normal)?;

    let polygons = py.allow_threads(|| {
        uvula_core::project(
            &stroke,
            &mesh_vertices,
            &mesh_indices,
            &mesh_uv,
            &adjacency,
            texture_width,
            texture_height,
            camera_projection_matrix,
            is_camera_perspective,
            viewport_width,
            viewport_height,
            camera_normal,
            seed_face,
        )
    });

    polygons
        .into_iter()
        .map(|polygon| {
            let rows: Vec<Vec<f32>> = polygon.iter().map(|p| vec![p.x, p.y]).collect();
            PyArray2::from_vec2(py, &rows)
                .map(|a| a.into())
                .map_err(|_| PyValueError::new_err("failed to build output array"))
        })
        .collect()
}

#[pymodule]
fn pyuvula(_py: Python<'_>, module: &Bound<'_, PyModule>) -> PyResult<()> {
    module.add("__version__", env!("CARGO_PKG_VERSION"))?;
    module.add_function(wrap_pyfunction!(unwrap, module)?)?;
    module.add_function(wrap_pyfunction!(project, module)?)?;
    Ok(())
}
