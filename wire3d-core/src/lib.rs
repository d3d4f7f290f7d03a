/// wire3d Core Library - transform and rendering pipeline
///
/// This library provides the core of a wireframe 3D renderer: homogeneous
/// linear algebra, per-model spatial frames, time-indexed motion, a keyed
/// model registry, STL import, and the per-frame clip/project/depth-sort
/// pipeline. Windowing, input devices, and pixel drawing live behind the
/// [`render::DrawTarget`] boundary in frontend crates.

pub mod error;
pub mod frame;
pub mod linalg;
pub mod manager;
pub mod mesh;
pub mod model;
pub mod motion;
pub mod projection;
pub mod render;
pub mod stl;

// Re-export commonly used types
pub use error::{Error, Result};
pub use frame::Frame;
pub use linalg::Basis;
pub use manager::ModelManager;
pub use mesh::{Mesh, Triangle};
pub use model::{Color, Model, ModelSource};
pub use motion::{MotionMap, Piecewise, TrackSource};
pub use projection::Camera;
pub use render::{DrawTarget, Renderer, ScreenPoint};
