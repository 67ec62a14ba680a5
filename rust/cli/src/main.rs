// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Command-line driver: load a mesh, unwrap each submesh, and optionally
//! write an OBJ with the unwrapped UVs back out.

use std::io::Write;
use std::path::Path;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use uvula_core::{Face, Point3F};

struct Args {
    filepath: String,
    output_file: Option<String>,
    debug: bool,
}

fn parse_args() -> Option<Args> {
    let argv: Vec<String> = std::env::args().skip(1).collect();
    let mut filepath = None;
    let mut output_file = None;
    let mut debug = false;

    let mut i = 0;
    while i < argv.len() {
        match argv[i].as_str() {
            "-h" | "--help" => return None,
            "-d" | "--debug" => debug = true,
            "-o" | "--outputfile" => {
                i += 1;
                output_file = argv.get(i).cloned();
            }
            other if filepath.is_none() => filepath = Some(other.to_string()),
            other => {
                eprintln!("Unknown argument: {other}");
                return None;
            }
        }
        i += 1;
    }

    Some(Args {
        filepath: filepath?,
        output_file,
        debug,
    })
}

fn print_usage() {
    println!("Uvula - UV unwrapping for triangulated meshes");
    println!();
    println!("Usage: uvula <filepath> [-o <outputfile>] [-d] [-h]");
    println!();
    println!("  <filepath>            Path of the 3D mesh file to load (OBJ)");
    println!("  -o, --outputfile      Path of the output OBJ with UV coordinates");
    println!("  -d, --debug           Display debug output");
    println!("  -h, --help            Print this help and exit");
}

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_env("UVULA_LOG").unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

struct UnwrappedMesh {
    name: String,
    vertices: Vec<[f32; 3]>,
    indices: Vec<u32>,
    uvs: Vec<[f32; 2]>,
}

fn main() {
    let Some(args) = parse_args() else {
        print_usage();
        std::process::exit(0);
    };

    init_logging(args.debug);

    tracing::info!("Loading mesh from {}", args.filepath);

    let load_options = tobj::LoadOptions {
        triangulate: true,
        single_index: true,
        ..Default::default()
    };
    let (models, _materials) = match tobj::load_obj(&args.filepath, &load_options) {
        Ok(loaded) => loaded,
        Err(err) => {
            tracing::error!("Failed to load mesh: {err}");
            std::process::exit(1);
        }
    };

    tracing::info!("Loaded {} mesh(es)", models.len());

    let mut unwrapped_meshes = Vec::new();

    for model in &models {
        if model.name.is_empty() {
            tracing::info!("Processing unnamed mesh");
        } else {
            tracing::info!("Processing mesh {}", model.name);
        }

        let mesh = &model.mesh;
        let vertices: Vec<Point3F> = mesh
            .positions
            .chunks_exact(3)
            .map(|c| Point3F::new(c[0], c[1], c[2]))
            .collect();
        let faces: Vec<Face> = mesh
            .indices
            .chunks_exact(3)
            .map(|c| Face::new(c[0], c[1], c[2]))
            .collect();

        let timer = Instant::now();
        tracing::info!("Start UV unwrapping");
        match uvula_core::unwrap(&vertices, &faces) {
            Ok(result) => {
                tracing::info!(
                    "Suggested texture size is {}x{}",
                    result.texture_width,
                    result.texture_height
                );
                tracing::info!("UV unwrapping took {:?}", timer.elapsed());

                unwrapped_meshes.push(UnwrappedMesh {
                    name: model.name.clone(),
                    vertices: vertices.iter().map(|p| [p.x, p.y, p.z]).collect(),
                    indices: mesh.indices.clone(),
                    uvs: result.uvs.iter().map(|uv| [uv.x, uv.y]).collect(),
                });
            }
            Err(err) => {
                tracing::warn!("{err}");
            }
        }
    }

    if let Some(output_path) = &args.output_file {
        if let Err(err) = write_obj(Path::new(output_path), &unwrapped_meshes) {
            tracing::error!("Failed to write output file: {err}");
            std::process::exit(1);
        }
        tracing::info!("Wrote unwrapped mesh to {}", output_path);
    }

    std::process::exit(0);
}

fn write_obj(path: &Path, meshes: &[UnwrappedMesh]) -> std::io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    let mut vertex_offset = 0usize;

    for mesh in meshes {
        if mesh.name.is_empty() {
            writeln!(file, "o mesh")?;
        } else {
            writeln!(file, "o {}", mesh.name)?;
        }
        for v in &mesh.vertices {
            writeln!(file, "v {} {} {}", v[0], v[1], v[2])?;
        }
        // OBJ has no named texture-coordinate-channel concept; the channel
        // name carried by the original host's export ("unwrapped") is
        // preserved here as a comment directly above the vt block.
        writeln!(file, "# texture coordinate channel 0: unwrapped")?;
        for uv in &mesh.uvs {
            writeln!(file, "vt {} {}", uv[0], uv[1])?;
        }
        for tri in mesh.indices.chunks_exact(3) {
            let a = vertex_offset + tri[0] as usize + 1;
            let b = vertex_offset + tri[1] as usize + 1;
            let c = vertex_offset + tri[2] as usize + 1;
            writeln!(file, "f {a}/{a} {b}/{b} {c}/{c}")?;
        }
        vertex_offset += mesh.vertices.len();
    }

    Ok(())
}
