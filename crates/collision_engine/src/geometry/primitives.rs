//! Primitive collision shapes
//!
//! Provides basic geometric primitives (rays, planes, spheres, triangles).
//! All of these are plain value objects, recreated per query and never
//! mutated in place.

use crate::foundation::math::Vec3;
use crate::scene::CollisionObjectKey;
use crate::terrain::TerrainKind;

/// A ray for ray casting and picking
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// The origin point of the ray in world space
    pub origin: Vec3,
    /// The direction of the ray (normalized at construction)
    pub direction: Vec3,
}

impl Ray {
    /// Creates a new ray with the given origin and direction
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Plane defined by a unit normal and a signed distance constant
#[derive(Debug, Clone, Copy)]
pub struct Plane {
    /// Normal vector (normalized at construction)
    pub normal: Vec3,
    /// Signed distance from origin along the normal
    pub distance: f32,
}

impl Plane {
    /// Create a new plane from a normal and distance constant
    pub fn new(normal: Vec3, distance: f32) -> Self {
        Self {
            normal: normal.normalize(),
            distance,
        }
    }

    /// Create a plane passing through three points (counter-clockwise winding)
    pub fn from_points(a: Vec3, b: Vec3, c: Vec3) -> Self {
        let normal = (b - a).cross(&(c - a)).normalize();
        Self {
            normal,
            distance: -normal.dot(&a),
        }
    }

    /// Create a plane from a normal and a point on the plane
    pub fn from_normal_point(normal: Vec3, point: Vec3) -> Self {
        let normal = normal.normalize();
        Self {
            normal,
            distance: -normal.dot(&point),
        }
    }

    /// Calculate signed distance from plane to point
    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        self.normal.dot(&point) + self.distance
    }
}

/// A sphere for collision and broad-phase tests
#[derive(Debug, Clone, Copy)]
pub struct Sphere {
    /// The center position of the sphere in world space
    pub center: Vec3,
    /// The radius of the sphere
    pub radius: f32,
    /// Cached squared radius
    pub radius_sq: f32,
}

impl Sphere {
    /// Creates a new sphere with the given center and radius
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self {
            center,
            radius,
            radius_sq: radius * radius,
        }
    }

    /// Check if this sphere intersects with another
    pub fn intersects(&self, other: &Sphere) -> bool {
        let distance_squared = (self.center - other.center).magnitude_squared();
        let radius_sum = self.radius + other.radius;
        distance_squared <= radius_sum * radius_sum
    }

    /// Check if a point lies inside or on the sphere
    pub fn contains_point(&self, point: Vec3) -> bool {
        (point - self.center).magnitude_squared() <= self.radius_sq
    }

    /// Smallest sphere enclosing both spheres
    pub fn merged(&self, other: &Sphere) -> Sphere {
        let delta = other.center - self.center;
        let dist = delta.magnitude();

        // One sphere already contains the other
        if dist + other.radius <= self.radius {
            return *self;
        }
        if dist + self.radius <= other.radius {
            return *other;
        }

        let radius = (dist + self.radius + other.radius) * 0.5;
        let center = if dist > 1e-6 {
            self.center + delta * ((radius - self.radius) / dist)
        } else {
            self.center
        };
        Sphere::new(center, radius)
    }
}

/// A classified triangle for collision detection
///
/// Produced by transforming a collision mesh's local-space triangles into
/// world space per collision object instance. The face normal is computed
/// at construction from the vertex winding (right-hand rule).
#[derive(Debug, Clone, Copy)]
pub struct Triangle {
    /// First vertex in world space
    pub v0: Vec3,
    /// Second vertex
    pub v1: Vec3,
    /// Third vertex
    pub v2: Vec3,
    /// Unit face normal
    pub normal: Vec3,
    /// Surface classification
    pub kind: TerrainKind,
    /// Back-reference to the owning collision object, if any
    pub object: Option<CollisionObjectKey>,
}

impl Triangle {
    /// Creates a new triangle; the normal follows the vertex winding
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3, kind: TerrainKind) -> Self {
        let normal = (v1 - v0).cross(&(v2 - v0)).normalize();
        Self {
            v0,
            v1,
            v2,
            normal,
            kind,
            object: None,
        }
    }

    /// Attach the owning collision object key
    pub fn with_object(mut self, object: CollisionObjectKey) -> Self {
        self.object = Some(object);
        self
    }

    /// Calculates the centroid (center point) of the triangle
    pub fn centroid(&self) -> Vec3 {
        (self.v0 + self.v1 + self.v2) / 3.0
    }

    /// Vertical extent of the triangle (max-y minus min-y)
    pub fn height(&self) -> f32 {
        let max_y = self.v0.y.max(self.v1.y).max(self.v2.y);
        let min_y = self.v0.y.min(self.v1.y).min(self.v2.y);
        max_y - min_y
    }

    /// The three directed edges as (start, end) pairs
    pub fn edges(&self) -> [(Vec3, Vec3); 3] {
        [
            (self.v0, self.v1),
            (self.v1, self.v2),
            (self.v2, self.v0),
        ]
    }

    /// The supporting plane of the triangle
    pub fn plane(&self) -> Plane {
        Plane::from_normal_point(self.normal, self.v0)
    }

    /// Bounding sphere around the centroid
    pub fn bounding_sphere(&self) -> Sphere {
        let center = self.centroid();
        let radius_sq = (self.v0 - center)
            .magnitude_squared()
            .max((self.v1 - center).magnitude_squared())
            .max((self.v2 - center).magnitude_squared());
        Sphere::new(center, radius_sq.sqrt())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_plane_from_points_distance() {
        // Floor plane at y = 2
        let plane = Plane::from_points(
            Vec3::new(0.0, 2.0, 0.0),
            Vec3::new(1.0, 2.0, 1.0),
            Vec3::new(1.0, 2.0, 0.0),
        );
        assert_relative_eq!(plane.normal.y.abs(), 1.0, epsilon = 1e-6);
        assert_relative_eq!(
            plane.distance_to_point(Vec3::new(5.0, 3.0, -2.0)).abs(),
            1.0,
            epsilon = 1e-5
        );
    }

    #[test]
    fn test_sphere_merged_encloses_both() {
        let a = Sphere::new(Vec3::new(-1.0, 0.0, 0.0), 1.0);
        let b = Sphere::new(Vec3::new(3.0, 0.0, 0.0), 0.5);
        let merged = a.merged(&b);
        assert!(merged.contains_point(Vec3::new(-2.0, 0.0, 0.0)));
        assert!(merged.contains_point(Vec3::new(3.5, 0.0, 0.0)));
    }

    #[test]
    fn test_sphere_merged_nested_keeps_outer() {
        let outer = Sphere::new(Vec3::zeros(), 4.0);
        let inner = Sphere::new(Vec3::new(1.0, 0.0, 0.0), 1.0);
        let merged = outer.merged(&inner);
        assert_relative_eq!(merged.radius, 4.0, epsilon = 1e-6);
    }

    #[test]
    fn test_triangle_normal_and_height() {
        let tri = Triangle::new(
            Vec3::new(-1.0, 0.0, -1.0),
            Vec3::new(1.0, 0.0, 1.0),
            Vec3::new(1.0, 0.0, -1.0),
            TerrainKind::Stone,
        );
        assert_relative_eq!(tri.normal, Vec3::new(0.0, 1.0, 0.0), epsilon = 1e-6);
        assert_relative_eq!(tri.height(), 0.0, epsilon = 1e-6);

        let wall = Triangle::new(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 2.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            TerrainKind::Stone,
        );
        assert_relative_eq!(wall.height(), 2.0, epsilon = 1e-6);
    }
}
