/// Triangle-soup mesh produced by external importers
use nalgebra::Point3;

/// A triangular face given as three raw points, with no shared vertex buffer.
#[derive(Debug, Clone)]
pub struct Triangle {
    pub points: [Point3<f64>; 3],
}

impl Triangle {
    pub fn new(p0: Point3<f64>, p1: Point3<f64>, p2: Point3<f64>) -> Self {
        Self {
            points: [p0, p1, p2],
        }
    }
}

/// A 3D mesh composed of triangles.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            triangles: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(capacity),
        }
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    /// Create a simple cube mesh for demos and tests.
    pub fn cube(size: f64) -> Self {
        let h = size / 2.0;
        let corners = [
            Point3::new(-h, -h, -h),
            Point3::new(-h, -h, h),
            Point3::new(-h, h, -h),
            Point3::new(-h, h, h),
            Point3::new(h, -h, -h),
            Point3::new(h, -h, h),
            Point3::new(h, h, -h),
            Point3::new(h, h, h),
        ];
        // Two triangles per cube face.
        let indices = [
            [0, 2, 6],
            [0, 6, 4],
            [1, 3, 7],
            [1, 7, 5],
            [0, 1, 5],
            [0, 5, 4],
            [2, 3, 7],
            [2, 7, 6],
            [0, 1, 3],
            [0, 3, 2],
            [4, 5, 7],
            [4, 7, 6],
        ];

        let mut mesh = Self::with_capacity(indices.len());
        for [a, b, c] in indices {
            mesh.add_triangle(Triangle::new(corners[a], corners[b], corners[c]));
        }
        mesh
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}
