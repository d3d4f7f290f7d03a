/// Wireframe model: local vertices, indexed faces, colour, and spatial frame
use std::collections::HashMap;

use nalgebra::{Vector3, Vector4};

use crate::error::{Error, Result};
use crate::frame::Frame;
use crate::linalg::{translation_matrix, Basis};
use crate::mesh::Mesh;

/// An RGB colour triplet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a colour from raw components, e.g. a config value. Anything
    /// other than exactly three components is rejected.
    pub fn from_slice(components: &[u8]) -> Result<Self> {
        match components {
            [r, g, b] => Ok(Self::rgb(*r, *g, *b)),
            _ => Err(Error::InvalidColor),
        }
    }
}

const DEFAULT_COLOR: Color = Color::rgb(255, 0, 0);

/// Input from which a model can be constructed, resolved once at
/// construction time.
pub enum ModelSource {
    /// Triangle soup from a mesh importer; duplicate points are collapsed
    /// into a shared vertex list and faces re-indexed.
    Mesh(Mesh),
    /// Explicit vertex list with optional faces.
    Vertices {
        vertices: Vec<Vector3<f64>>,
        faces: Option<Vec<Vec<usize>>>,
    },
    /// A pre-built model, adopted as-is.
    Existing(Model),
}

/// Simple wireframe representation of an object.
///
/// Vertices are stored as homogeneous local-space points (weight 1). On
/// construction the vertices are re-centered about their centroid and the
/// frame starts as the identity, so a freshly built model sits at the world
/// origin until positioned.
#[derive(Debug, Clone)]
pub struct Model {
    vertices: Vec<Vector4<f64>>,
    faces: Vec<Vec<usize>>,
    color: Color,
    frame: Frame,
}

impl Model {
    pub fn new(vertices: Vec<Vector3<f64>>, faces: Vec<Vec<usize>>) -> Result<Self> {
        if vertices.is_empty() {
            return Err(Error::Construction(
                "a model requires at least one vertex".to_string(),
            ));
        }

        let mut model = Self {
            vertices: vertices
                .into_iter()
                .map(|v| Vector4::new(v.x, v.y, v.z, 1.0))
                .collect(),
            faces: Vec::new(),
            color: DEFAULT_COLOR,
            frame: Frame::new(),
        };
        model.add_faces(faces)?;
        let centroid = model.centroid();
        model.set_local_center(centroid);
        Ok(model)
    }

    /// Build a model from imported triangles, collapsing points that match
    /// exactly into a shared vertex list.
    pub fn from_mesh(mesh: &Mesh) -> Result<Self> {
        let mut seen: HashMap<[u64; 3], usize> = HashMap::new();
        let mut vertices: Vec<Vector3<f64>> = Vec::new();
        let mut faces = Vec::with_capacity(mesh.triangles.len());

        for triangle in &mesh.triangles {
            let mut face = Vec::with_capacity(3);
            for point in &triangle.points {
                let key = [point.x.to_bits(), point.y.to_bits(), point.z.to_bits()];
                let index = *seen.entry(key).or_insert_with(|| {
                    vertices.push(point.coords);
                    vertices.len() - 1
                });
                face.push(index);
            }
            faces.push(face);
        }

        Self::new(vertices, faces)
    }

    /// Resolve a [`ModelSource`] into a concrete model.
    pub fn from_source(source: ModelSource) -> Result<Self> {
        match source {
            ModelSource::Mesh(mesh) => Self::from_mesh(&mesh),
            ModelSource::Vertices { vertices, faces } => {
                Self::new(vertices, faces.unwrap_or_default())
            }
            ModelSource::Existing(model) => Ok(model),
        }
    }

    /// Position of the model in world coordinates.
    pub fn position(&self) -> Vector3<f64> {
        self.frame.origin()
    }

    pub fn set_position(&mut self, position: Vector3<f64>) -> Result<()> {
        self.frame.set_origin(position)
    }

    /// Basis vectors of the model in world coordinates.
    pub fn basis(&self) -> Basis {
        self.frame.basis()
    }

    pub fn set_basis(&mut self, basis: Basis) -> Result<()> {
        self.frame.set_basis(basis)
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Local-space vertices.
    pub fn vertices(&self) -> Vec<Vector3<f64>> {
        self.vertices.iter().map(|v| v.xyz()).collect()
    }

    /// Vertices mapped through the frame into world coordinates.
    pub fn world_vertices(&self) -> Vec<Vector3<f64>> {
        self.vertices
            .iter()
            .map(|v| self.frame.world_point(v).xyz())
            .collect()
    }

    pub fn faces(&self) -> &[Vec<usize>] {
        &self.faces
    }

    /// Replace all faces. To keep existing faces, use [`Model::add_faces`].
    pub fn set_faces(&mut self, faces: Vec<Vec<usize>>) -> Result<()> {
        self.faces.clear();
        self.add_faces(faces)
    }

    pub fn add_faces(&mut self, faces: Vec<Vec<usize>>) -> Result<()> {
        for face in faces {
            self.add_face(face)?;
        }
        Ok(())
    }

    fn add_face(&mut self, face: Vec<usize>) -> Result<()> {
        if face.len() < 3 {
            return Err(Error::Construction(
                "a face requires at least three vertices".to_string(),
            ));
        }
        for &index in &face {
            if index >= self.vertices.len() {
                return Err(Error::InvalidFace {
                    index,
                    vertex_count: self.vertices.len(),
                });
            }
        }
        self.faces.push(face);
        Ok(())
    }

    /// Centroid of the local vertices.
    pub fn centroid(&self) -> Vector3<f64> {
        let sum = self
            .vertices
            .iter()
            .fold(Vector3::zeros(), |acc, v| acc + v.xyz());
        sum / self.vertices.len() as f64
    }

    /// Scale the model about its own origin. Position and orientation are
    /// unaffected. The factor is not validated: zero collapses the model and
    /// negative factors mirror it.
    pub fn scale(&mut self, factor: f64) {
        for v in &mut self.vertices {
            v.x *= factor;
            v.y *= factor;
            v.z *= factor;
        }
    }

    /// Shift the local vertices so that `center` becomes the local origin.
    pub fn set_local_center(&mut self, center: Vector3<f64>) {
        let shift = translation_matrix(-center.x, -center.y, -center.z);
        for v in &mut self.vertices {
            *v = shift * *v;
        }
    }

    /// Re-express the local vertices under a new local coordinate
    /// convention while preserving the model's current world-visible pose:
    /// the new basis is adopted, the stored vertices are re-mapped through
    /// it, and the previous basis is restored as the frame's current basis.
    pub fn change_local_basis(&mut self, basis: Basis) -> Result<()> {
        let current = self.frame.basis();
        self.frame.set_basis(basis)?;
        for v in &mut self.vertices {
            *v = self.frame.world_point(v);
        }
        self.frame.set_basis(current)
    }
}
