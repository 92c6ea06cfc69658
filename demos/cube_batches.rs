//! Tessellates a few cubes and prints the resulting batches.
//!
//! Usage:
//! ```text
//! cargo run --example cube_batches                       # flat shading
//! cargo run --example cube_batches -- --smooth           # smooth shading
//! RUST_LOG=csg_geometries=debug cargo run --example cube_batches
//! ```

use csg_geometries::color::Color;
use csg_geometries::csg::{SharedData, Solid};
use csg_geometries::math::Point3;
use csg_geometries::{CsgGeometriesError, TessellateSolids, TessellationOptions};

fn main() -> Result<(), CsgGeometriesError> {
    // Default: WARN for everything, INFO for csg_geometries.
    // Override with RUST_LOG env var (e.g. RUST_LOG=csg_geometries=debug).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("csg_geometries=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let smooth_lighting = std::env::args().any(|arg| arg == "--smooth");

    let plain = Solid::cube(Point3::origin(), 1.0);

    let mut tinted = Solid::new();
    let blue = tinted.add_shared(SharedData::with_color(Color::from_hex("#3366cc")?));
    for polygon in Solid::cube(Point3::new(3.0, 0.0, 0.0), 0.5).polygons() {
        tinted.add_polygon(polygon.clone().with_shared(blue));
    }

    let options = TessellationOptions {
        smooth_lighting,
        normal_threshold: if smooth_lighting { 2.0 } else { 0.349_066 },
        ..TessellationOptions::default()
    };
    let output = TessellateSolids::new(options).execute([&plain, &tinted])?;

    for (solid, batches) in output.iter().enumerate() {
        for (i, batch) in batches.iter().enumerate() {
            println!(
                "solid {solid} batch {i}: {} vertices, {} triangles, first color {:?}",
                batch.vertex_count(),
                batch.triangle_count(),
                batch.colors.first(),
            );
        }
    }
    Ok(())
}
