//! Bounding boxes
//!
//! Axis-aligned and oriented box variants. Both expose the same derived
//! surface: an axis list, the eight vertices, the center, a bounding
//! sphere, and the six face quads used by the ray slab tests. All derived
//! data is computed once at construction; transforming a box always
//! produces a new box, never mutates vertices in place.
//!
//! Vertex ordering convention (shared by both variants): index bit 0
//! selects +X, bit 1 selects +Y, bit 2 selects +Z, so vertex 0 is the
//! "minimum" corner and vertex 7 the "maximum" corner.

use crate::foundation::math::{transform_point, Mat4, Vec3};
use crate::geometry::primitives::Sphere;

/// One face of a box: a planar quad with an outward unit normal.
///
/// Used by the ray-box test, which intersects the face plane and then runs
/// a two-parallelogram containment test on the corners.
#[derive(Debug, Clone, Copy)]
pub struct BoxPlane {
    /// Outward unit normal of the face
    pub normal: Vec3,
    /// The four corners, ordered around the quad perimeter
    pub corners: [Vec3; 4],
}

impl BoxPlane {
    /// Test whether a point (assumed on the face plane) lies inside the quad.
    ///
    /// The quad is covered by the two parallelograms spanned from opposite
    /// corners; a point inside either is inside the quad.
    pub fn contains(&self, point: Vec3) -> bool {
        let [c0, c1, c2, c3] = self.corners;
        point_in_parallelogram(point, c0, c1 - c0, c3 - c0, self.normal)
            || point_in_parallelogram(point, c2, c1 - c2, c3 - c2, self.normal)
    }
}

/// Solve `p - origin = a*e1 + b*e2` in the face plane and check both
/// parameters land in [0, 1].
fn point_in_parallelogram(point: Vec3, origin: Vec3, e1: Vec3, e2: Vec3, normal: Vec3) -> bool {
    let denom = e1.cross(&e2).dot(&normal);
    if denom.abs() < 1e-8 {
        return false;
    }
    let rel = point - origin;
    let a = rel.cross(&e2).dot(&normal) / denom;
    let b = e1.cross(&rel).dot(&normal) / denom;
    (-1e-5..=1.0 + 1e-5).contains(&a) && (-1e-5..=1.0 + 1e-5).contains(&b)
}

/// The six faces in terms of vertex indices plus the axis and sign of the
/// outward normal. Corner order walks the quad perimeter.
const FACES: [([usize; 4], usize, f32); 6] = [
    ([0, 2, 6, 4], 0, -1.0), // -X
    ([1, 3, 7, 5], 0, 1.0),  // +X
    ([0, 1, 5, 4], 1, -1.0), // -Y
    ([2, 3, 7, 6], 1, 1.0),  // +Y
    ([0, 1, 3, 2], 2, -1.0), // -Z
    ([4, 5, 7, 6], 2, 1.0),  // +Z
];

/// Axis-Aligned Bounding Box
///
/// Axes are fixed to the world X/Y/Z; vertices and the bounding sphere are
/// cached at construction.
#[derive(Debug, Clone, Copy)]
pub struct Aabb {
    /// Minimum corner of the bounding box
    pub min: Vec3,
    /// Maximum corner of the bounding box
    pub max: Vec3,
    /// The eight corners, cached at construction
    vertices: [Vec3; 8],
    /// Bounding sphere, cached at construction
    bounding_sphere: Sphere,
}

impl Aabb {
    /// Create a new AABB from min and max points
    pub fn new(min: Vec3, max: Vec3) -> Self {
        let mut vertices = [Vec3::zeros(); 8];
        for (i, vertex) in vertices.iter_mut().enumerate() {
            *vertex = Vec3::new(
                if i & 1 != 0 { max.x } else { min.x },
                if i & 2 != 0 { max.y } else { min.y },
                if i & 4 != 0 { max.z } else { min.z },
            );
        }
        let center = (min + max) * 0.5;
        let bounding_sphere = Sphere::new(center, (max - center).magnitude());
        Self {
            min,
            max,
            vertices,
            bounding_sphere,
        }
    }

    /// Create an AABB centered at a point with given extents
    pub fn from_center_extents(center: Vec3, extents: Vec3) -> Self {
        Self::new(center - extents, center + extents)
    }

    /// Get the center of the AABB
    pub fn center(&self) -> Vec3 {
        self.bounding_sphere.center
    }

    /// The eight corners
    pub fn vertices(&self) -> &[Vec3; 8] {
        &self.vertices
    }

    /// Bounding sphere enclosing the box
    pub fn bounding_sphere(&self) -> &Sphere {
        &self.bounding_sphere
    }

    /// World axes (identical for every AABB)
    pub fn axes(&self) -> [Vec3; 3] {
        [
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
        ]
    }

    /// The six face quads, derived from the cached vertices
    pub fn planes(&self) -> [BoxPlane; 6] {
        planes_from_vertices(&self.vertices, &self.axes())
    }

    /// Check if this AABB contains a point
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.x >= self.min.x && point.x <= self.max.x &&
        point.y >= self.min.y && point.y <= self.max.y &&
        point.z >= self.min.z && point.z <= self.max.z
    }

    /// Check if this AABB intersects another AABB
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x && self.max.x >= other.min.x &&
        self.min.y <= other.max.y && self.max.y >= other.min.y &&
        self.min.z <= other.max.z && self.max.z >= other.min.z
    }
}

/// Oriented bounding box defined by eight explicit world-space vertices.
///
/// Axes, bounding sphere, and the width/height extents are derived from the
/// vertex list once at construction. Transforming produces a new box.
#[derive(Debug, Clone, Copy)]
pub struct OrientedBox {
    vertices: [Vec3; 8],
    axes: [Vec3; 3],
    bounding_sphere: Sphere,
    width: f32,
    height: f32,
}

impl OrientedBox {
    /// Build a box from eight vertices following the shared ordering
    /// convention (bit 0 = +X edge, bit 1 = +Y edge, bit 2 = +Z edge of the
    /// box's local frame).
    pub fn from_vertices(vertices: [Vec3; 8]) -> Self {
        let edge_x = vertices[1] - vertices[0];
        let edge_y = vertices[2] - vertices[0];
        let edge_z = vertices[4] - vertices[0];
        let axes = [
            edge_x.normalize(),
            edge_y.normalize(),
            edge_z.normalize(),
        ];
        let center = (vertices[0] + vertices[7]) * 0.5;
        let mut radius_sq = 0.0f32;
        for vertex in &vertices {
            radius_sq = radius_sq.max((vertex - center).magnitude_squared());
        }
        Self {
            vertices,
            axes,
            bounding_sphere: Sphere::new(center, radius_sq.sqrt()),
            width: edge_x.magnitude(),
            height: edge_y.magnitude(),
        }
    }

    /// Promote an AABB to an oriented box (world axes)
    pub fn from_aabb(aabb: &Aabb) -> Self {
        Self::from_vertices(*aabb.vertices())
    }

    /// A new box with every vertex transformed by the matrix
    pub fn transformed(&self, matrix: &Mat4) -> Self {
        let mut vertices = self.vertices;
        for vertex in &mut vertices {
            *vertex = transform_point(matrix, *vertex);
        }
        Self::from_vertices(vertices)
    }

    /// The three local unit axes
    pub fn axes(&self) -> [Vec3; 3] {
        self.axes
    }

    /// The eight corners
    pub fn vertices(&self) -> &[Vec3; 8] {
        &self.vertices
    }

    /// Center of the box
    pub fn center(&self) -> Vec3 {
        self.bounding_sphere.center
    }

    /// Bounding sphere enclosing the box
    pub fn bounding_sphere(&self) -> &Sphere {
        &self.bounding_sphere
    }

    /// Extent along the local X axis
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Extent along the local Y axis
    pub fn height(&self) -> f32 {
        self.height
    }

    /// The six face quads
    pub fn planes(&self) -> [BoxPlane; 6] {
        planes_from_vertices(&self.vertices, &self.axes)
    }
}

fn planes_from_vertices(vertices: &[Vec3; 8], axes: &[Vec3; 3]) -> [BoxPlane; 6] {
    FACES.map(|(indices, axis, sign)| BoxPlane {
        normal: axes[axis] * sign,
        corners: indices.map(|i| vertices[i]),
    })
}
