/// Example: Load and render an STL file in the terminal
///
/// Usage: cargo run --example load_stl -- path/to/file.stl
use std::env;
use std::fs;

use anyhow::Context;
use nalgebra::Vector3;
use wire3d_core::{Basis, Mesh, ModelManager, ModelSource, MotionMap, TrackSource};
use wire3d_terminal::{SceneApp, SceneConfig};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    let mut manager = ModelManager::new();
    let title = match args.get(1) {
        Some(path) => {
            let data = fs::read(path).with_context(|| format!("reading {path}"))?;
            let mesh = wire3d_core::stl::parse_stl(&data).context("parsing STL")?;
            eprintln!("Loaded {} triangles", mesh.triangles.len());
            manager.add_model("subject", ModelSource::Mesh(mesh))?;
            path.clone()
        }
        None => {
            eprintln!("No STL file provided, using default cube...");
            manager.add_model("subject", ModelSource::Mesh(Mesh::cube(2.0)))?;
            "cube".to_string()
        }
    };

    // STL files are commonly authored z-up; re-express the vertices in the
    // scene's y-up convention.
    manager.change_local_basis(
        "subject",
        Basis::new(
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 0.0, -1.0),
            Vector3::new(0.0, 1.0, 0.0),
        )?,
    )?;

    // Slow tumble so every side comes into view.
    manager.set_motion(
        "subject",
        MotionMap::orientations(TrackSource::continuous(|t| [t * 0.5, t * 0.3, 0.0])),
    )?;

    let config = SceneConfig {
        viewpoint: [0.0, 0.0, -5.0],
        title,
        ..SceneConfig::default()
    };

    let mut app = SceneApp::new(config, manager)?;
    app.run(0.0)
}
