// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CLI tool: Convert a 2D floor plan image into a 3D room layout (OBJ output)
//!
//! Usage:
//!   plan-to-scene <image_path> [options]

use image::ImageReader;
use planrise_vision::{build_scene, HoughParams, PlanConfig, ProjectData, Scene};
use std::env;
use std::fs;
use std::time::{SystemTime, UNIX_EPOCH};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        print_usage();
        return;
    }

    let image_path = &args[1];

    let mut config = PlanConfig::default();
    let mut hough = HoughParams::default();
    let mut output_path = String::from("scene.obj");
    let mut project_path: Option<String> = None;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--plane" => {
                i += 1;
                let w: f64 = args[i].parse().expect("Invalid plane width");
                i += 1;
                let h: f64 = args[i].parse().expect("Invalid plane height");
                config.plane_size = (w, h);
            }
            "--min-pixels" => {
                i += 1;
                config.min_region_pixels = args[i].parse().expect("Invalid min pixels value");
            }
            "--wall-height" => {
                i += 1;
                config.wall_height = args[i].parse().expect("Invalid wall height value");
            }
            "--scrub" => {
                i += 1;
                config.mask_scrub_radius = args[i].parse().expect("Invalid scrub radius");
            }
            "--votes" => {
                i += 1;
                hough.vote_threshold = args[i].parse().expect("Invalid vote threshold");
            }
            "--min-length" => {
                i += 1;
                hough.min_length = args[i].parse().expect("Invalid min length value");
            }
            "--max-gap" => {
                i += 1;
                hough.max_gap = args[i].parse().expect("Invalid max gap value");
            }
            "--output" => {
                i += 1;
                output_path = args[i].clone();
            }
            "--project" => {
                i += 1;
                project_path = Some(args[i].clone());
            }
            other => {
                eprintln!("Unknown option: {}", other);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }
    config.hough = hough;

    println!("=== Floor Plan to 3D Scene Generator ===");
    println!();

    // Step 1: Load image
    println!("[1/4] Loading image: {}", image_path);
    let img = ImageReader::open(image_path)
        .unwrap_or_else(|e| {
            eprintln!("Error: Cannot open image '{}': {}", image_path, e);
            std::process::exit(1);
        })
        .decode()
        .unwrap_or_else(|e| {
            eprintln!("Error: Cannot decode image '{}': {}", image_path, e);
            std::process::exit(1);
        });

    let rgba = img.to_rgba8();
    let (width, height) = (rgba.width(), rgba.height());
    println!("  Image size: {}x{} pixels", width, height);

    // Step 2: Run the pipeline
    println!("[2/4] Building scene...");
    let scene = build_scene(rgba.as_raw(), width, height, &config).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    println!("  Rooms: {}", scene.floors.len());
    println!("  Wall segments: {}", scene.segments.len());
    println!("  Inner wall groups: {}", scene.inner_walls.len());
    println!("  Total triangles: {}", scene.triangle_count());

    // Step 3: Export OBJ
    println!("[3/4] Writing OBJ: {}", output_path);
    let obj = scene_to_obj(&scene);
    fs::write(&output_path, obj).unwrap_or_else(|e| {
        eprintln!("Error: Cannot write '{}': {}", output_path, e);
        std::process::exit(1);
    });

    // Step 4: Optional project description
    if let Some(path) = project_path {
        println!("[4/4] Writing project description: {}", path);
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs().to_string())
            .unwrap_or_default();
        let project = ProjectData::from_segments(
            &scene.segments,
            scene.grid_width,
            scene.grid_height,
            &config,
            format!("p_{}", stamp),
            stamp,
        );
        let json = serde_json::to_string_pretty(&project).expect("serializable project");
        fs::write(&path, json).unwrap_or_else(|e| {
            eprintln!("Error: Cannot write '{}': {}", path, e);
            std::process::exit(1);
        });
    } else {
        println!("[4/4] No project output requested");
    }

    println!();
    println!("Done.");
}

/// Serialize every scene group into a single OBJ document, applying each
/// group's world origin to its vertices.
fn scene_to_obj(scene: &Scene) -> String {
    let mut out = String::new();
    let mut index_base = 1u32; // OBJ indices are 1-based

    let mut write_group =
        |out: &mut String, name: &str, origin: (f64, f64, f64), mesh: &planrise_geometry::Mesh| {
            out.push_str(&format!("o {}\n", name));
            for chunk in mesh.positions.chunks_exact(3) {
                out.push_str(&format!(
                    "v {} {} {}\n",
                    chunk[0] as f64 + origin.0,
                    chunk[1] as f64 + origin.1,
                    chunk[2] as f64 + origin.2,
                ));
            }
            for chunk in mesh.normals.chunks_exact(3) {
                out.push_str(&format!("vn {} {} {}\n", chunk[0], chunk[1], chunk[2]));
            }
            for tri in mesh.indices.chunks_exact(3) {
                let (a, b, c) = (tri[0] + index_base, tri[1] + index_base, tri[2] + index_base);
                out.push_str(&format!("f {0}//{0} {1}//{1} {2}//{2}\n", a, b, c));
            }
            index_base += mesh.vertex_count() as u32;
        };

    for floor in &scene.floors {
        write_group(
            &mut out,
            &floor.name,
            (floor.origin.x, floor.origin.y, floor.origin.z),
            &floor.mesh,
        );
    }

    if let Some(walls) = &scene.walls {
        write_group(
            &mut out,
            &walls.name,
            (walls.origin.x, walls.origin.y, walls.origin.z),
            &walls.mesh,
        );
    }

    for group in &scene.inner_walls {
        for face in &group.faces {
            let name = format!("{}_{}", group.name, face.direction.label());
            write_group(
                &mut out,
                &name,
                (group.origin.x, group.origin.y, group.origin.z),
                &face.mesh,
            );
        }
    }

    out
}

fn print_usage() {
    println!("Usage: plan-to-scene <image_path> [options]");
    println!();
    println!("Options:");
    println!("  --plane <w> <h>     World plane size (default: 10 10)");
    println!("  --min-pixels <n>    Minimum region/cluster pixel count (default: 50)");
    println!("  --wall-height <h>   Wall height in world units (default: 3.0)");
    println!("  --scrub <r>         Morphological-open radius for the wall mask (default: 0)");
    println!("  --votes <n>         Hough vote threshold (default: 10)");
    println!("  --min-length <n>    Minimum segment length in pixels (default: 20)");
    println!("  --max-gap <n>       Maximum bridged gap in pixels (default: 15)");
    println!("  --output <path>     OBJ output path (default: scene.obj)");
    println!("  --project <path>    Also write a project description JSON");
}
