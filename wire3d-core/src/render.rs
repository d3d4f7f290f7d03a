/// Per-frame rendering: camera conversion, clipping, projection, depth sort
use std::cmp::Ordering;

use tracing::warn;

use crate::error::Result;
use crate::linalg::project;
use crate::manager::ModelManager;
use crate::model::Color;
use crate::projection::Camera;

/// A projected point in screen pixel coordinates.
pub type ScreenPoint = (i32, i32);

/// Drawing collaborator: fills an ordered 2D polygon and optionally strokes
/// its closed outline.
pub trait DrawTarget {
    fn draw_polygon(&mut self, points: &[ScreenPoint], fill: Color, outline: Option<Color>);
}

/// Clip an ordered polygon against the plane `z = clip_distance`.
///
/// Vertices at or beyond the plane are kept; each edge crossing the plane
/// synthesizes a vertex at the intersection by linear interpolation on z.
/// The result may degenerate to fewer than three vertices; such faces are
/// for the caller to discard.
pub fn clip_polygon(points: &[(f64, f64, f64)], clip_distance: f64) -> Vec<(f64, f64, f64)> {
    let n = points.len();
    let mut out = Vec::with_capacity(n + 2);
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        let a_front = a.2 >= clip_distance;
        let b_front = b.2 >= clip_distance;
        if a_front {
            out.push(a);
        }
        if a_front != b_front {
            let s = (clip_distance - a.2) / (b.2 - a.2);
            out.push((
                a.0 + (b.0 - a.0) * s,
                a.1 + (b.1 - a.1) * s,
                clip_distance,
            ));
        }
    }
    out
}

/// Approximate back-to-front ordering key: the squared magnitude of the
/// face's camera-space centroid. Not a true per-pixel depth sort;
/// overlapping faces at similar depth may z-fight, which is accepted.
fn depth_key(points: &[(f64, f64, f64)]) -> f64 {
    let n = points.len() as f64;
    let (mut cx, mut cy, mut cz) = (0.0, 0.0, 0.0);
    for p in points {
        cx += p.0 / n;
        cy += p.1 / n;
        cz += p.2 / n;
    }
    cx * cx + cy * cy + cz * cz
}

struct RenderFace {
    depth: f64,
    points: Vec<ScreenPoint>,
    color: Color,
}

/// Painter's-algorithm renderer over a [`ModelManager`].
pub struct Renderer {
    pub camera: Camera,
    center: (i32, i32),
    outline: Color,
}

impl Renderer {
    pub fn new(camera: Camera, width: u32, height: u32) -> Self {
        Self {
            camera,
            center: (width as i32 / 2, height as i32 / 2),
            outline: Color::rgb(0, 0, 0),
        }
    }

    /// Advance all models to `time` and draw one frame. A model whose
    /// geometry cannot be queried is skipped for the frame rather than
    /// blanking the scene.
    pub fn render_frame(
        &mut self,
        manager: &mut ModelManager,
        time: f64,
        target: &mut dyn DrawTarget,
    ) -> Result<()> {
        manager.advance(time)?;

        let keys: Vec<String> = manager.keys().map(str::to_string).collect();
        let mut faces = Vec::new();
        for key in &keys {
            if let Err(error) = self.gather_faces(manager, key, &mut faces) {
                warn!(key = key.as_str(), %error, "skipping model for this frame");
            }
        }

        // Stable sort, farthest first.
        faces.sort_by(|a, b| b.depth.partial_cmp(&a.depth).unwrap_or(Ordering::Equal));

        for face in &faces {
            target.draw_polygon(&face.points, face.color, Some(self.outline));
        }
        Ok(())
    }

    fn gather_faces(
        &self,
        manager: &ModelManager,
        key: &str,
        out: &mut Vec<RenderFace>,
    ) -> Result<()> {
        let color = manager.color(key)?;
        let camera_vertices: Vec<(f64, f64, f64)> = manager
            .vertices(key, true)?
            .iter()
            .map(|v| self.camera.to_camera_space(v))
            .collect();

        for face in manager.faces(key)? {
            let polygon: Vec<(f64, f64, f64)> =
                face.iter().map(|&i| camera_vertices[i]).collect();
            let clipped = clip_polygon(&polygon, self.camera.clip_distance);
            if clipped.len() <= 2 {
                continue;
            }
            let depth = depth_key(&clipped);
            let points = clipped
                .iter()
                .map(|&p| project(p, self.center, (self.camera.proj_x, self.camera.proj_y)))
                .collect();
            out.push(RenderFace {
                depth,
                points,
                color,
            });
        }
        Ok(())
    }
}
