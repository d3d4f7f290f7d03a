/// wire3d Terminal Demo - Orbiting Cubes
///
/// Five coloured cubes: one stationary at the origin, four driven by
/// continuous circular-motion functions, two of them orbiting another cube.
/// Controls:
///   - WASD / Arrow Keys: Move the camera
///   - E / Space: Move up / down
///   - Mouse: Look around
///   - Q/ESC: Quit
use std::f64::consts::{FRAC_PI_3, PI};

use anyhow::Context;
use wire3d_core::{Color, Mesh, ModelManager, ModelSource, MotionMap, TrackSource};
use wire3d_terminal::{SceneApp, SceneConfig};

/// Circular motion in the xz plane.
fn xz_circular_motion(time: f64, radius: f64, frequency: f64) -> (f64, f64, f64) {
    let angle = 2.0 * PI * frequency * time;
    (radius * angle.cos(), 0.0, radius * angle.sin())
}

fn cube2_position(time: f64) -> [f64; 3] {
    let (x, y, z) = xz_circular_motion(time, 15.0, 0.1);
    [x, y, z]
}

/// cube3 orbits cube2.
fn cube3_position(time: f64) -> [f64; 3] {
    let [xc, yc, zc] = cube2_position(time);
    let (xr, yr, zr) = xz_circular_motion(time, 3.0, 1.0);
    [xc + xr, yc + yr, zc - zr]
}

fn cube4_position(time: f64) -> [f64; 3] {
    let (x, y, z) = xz_circular_motion(time, 35.0, 0.05);
    [x, y, -z]
}

/// cube5 orbits cube4.
fn cube5_position(time: f64) -> [f64; 3] {
    let [xc, yc, zc] = cube4_position(time);
    let (xr, yr, zr) = xz_circular_motion(time, 10.0, 0.15);
    [xc + xr, yc + yr, zc + zr]
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut manager = ModelManager::new();

    for key in ["cube1", "cube2", "cube3", "cube4", "cube5"] {
        manager
            .add_model(key, ModelSource::Mesh(Mesh::cube(1.0)))
            .with_context(|| format!("adding {key}"))?;
    }

    manager.set_color("cube1", Color::rgb(255, 255, 255))?;
    manager.set_color("cube2", Color::rgb(0, 255, 0))?;
    manager.set_color("cube3", Color::rgb(255, 0, 0))?;
    manager.set_color("cube4", Color::rgb(0, 0, 255))?;
    manager.set_color("cube5", Color::rgb(255, 255, 0))?;

    manager.scale("cube1", 10.0)?;
    manager.scale("cube3", 0.5)?;
    manager.scale("cube4", 2.0)?;

    // cube1 is stationary.
    manager.set_motion("cube2", MotionMap::positions(TrackSource::continuous(cube2_position)))?;
    manager.set_motion("cube3", MotionMap::positions(TrackSource::continuous(cube3_position)))?;
    manager.set_motion("cube4", MotionMap::positions(TrackSource::continuous(cube4_position)))?;
    manager.set_motion("cube5", MotionMap::positions(TrackSource::continuous(cube5_position)))?;

    let config = SceneConfig {
        viewpoint: [0.0, -30.0, -30.0],
        rotation: [FRAC_PI_3, 0.0],
        title: "Orbit Example".into(),
        ..SceneConfig::default()
    };

    let mut app = SceneApp::new(config, manager).context("initializing scene")?;
    app.run(0.0)
}
