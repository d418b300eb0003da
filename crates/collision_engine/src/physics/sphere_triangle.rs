//! Sphere-triangle penetration
//!
//! The narrow-phase test the movement resolver leans on: face case first
//! (a bidirectional ray from the sphere center along the inverse normal,
//! limited to the radius), then the three clamped edge closest-points,
//! keeping the smallest resulting depth.

use crate::foundation::math::{up, Vec3};
use crate::geometry::{Ray, Sphere, Triangle};
use crate::physics::depth::CollisionDepth;
use crate::physics::raycast::{ray_triangle, RayCastOptions};
use crate::physics::CONTACT_EPSILON;

/// Penetration of a sphere against a classified triangle, or `None`.
pub fn sphere_triangle(sphere: &Sphere, tri: &Triangle) -> Option<CollisionDepth> {
    // Face case: pierce the triangle along its inverse normal
    let probe = Ray::new(sphere.center, -tri.normal);
    let opts = RayCastOptions::bidirectional_within(sphere.radius);
    if let Some((point, _t)) = ray_triangle(&probe, tri, opts) {
        return resolve_point(sphere, point);
    }

    // Edge cases: closest point on each edge, keep the smallest depth
    let mut best = None;
    for (a, b) in tri.edges() {
        let edge = b - a;
        let len_sq = edge.magnitude_squared();
        if len_sq < 1e-12 {
            continue;
        }
        let t = ((sphere.center - a).dot(&edge) / len_sq).clamp(0.0, 1.0);
        let closest = a + edge * t;
        if let Some(depth) = resolve_point(sphere, closest) {
            CollisionDepth::apply_if_smaller(&mut best, depth);
        }
    }
    best
}

/// Resolve penetration against a single contact point.
///
/// The push-out axis runs from the point to the sphere center; the vertical
/// escape is how far the point sits below the sphere surface at the same
/// horizontal offset, which is only defined while that offset is within the
/// radius.
fn resolve_point(sphere: &Sphere, point: Vec3) -> Option<CollisionDepth> {
    let delta = sphere.center - point;
    let dist_sq = delta.magnitude_squared();
    if dist_sq > sphere.radius_sq {
        return None;
    }
    let dist = dist_sq.sqrt();
    let amount = sphere.radius - dist;
    if amount < CONTACT_EPSILON {
        return None;
    }
    let axis = if dist > 1e-6 { delta / dist } else { up() };

    let horizontal_sq = delta.x * delta.x + delta.z * delta.z;
    let radicand = sphere.radius_sq - horizontal_sq;
    let vertical_escape = if radicand >= 0.0 {
        Some(radicand.sqrt() + point.y - sphere.center.y)
    } else {
        None
    };

    Some(CollisionDepth::with_vertical(amount, axis, vertical_escape))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::TerrainKind;
    use approx::assert_relative_eq;

    fn floor_triangle() -> Triangle {
        Triangle::new(
            Vec3::new(-5.0, 0.0, -5.0),
            Vec3::new(5.0, 0.0, 5.0),
            Vec3::new(5.0, 0.0, -5.0),
            TerrainKind::Dirt,
        )
    }

    #[test]
    fn test_face_penetration_depth_and_axis() {
        let sphere = Sphere::new(Vec3::new(1.0, 0.3, -1.0), 0.5);
        let depth = sphere_triangle(&sphere, &floor_triangle()).expect("sphere dips into floor");
        assert_relative_eq!(depth.amount, 0.2, epsilon = 1e-5);
        assert_relative_eq!(depth.axis, Vec3::new(0.0, 1.0, 0.0), epsilon = 1e-5);
        // Contact point directly below the center: escape lifts the sphere
        // until it rests on the surface
        assert_relative_eq!(depth.vertical_escape.unwrap(), 0.2, epsilon = 1e-5);
    }

    #[test]
    fn test_clear_sphere_reports_none() {
        let sphere = Sphere::new(Vec3::new(0.0, 1.0, 0.0), 0.5);
        assert!(sphere_triangle(&sphere, &floor_triangle()).is_none());
    }

    #[test]
    fn test_edge_contact_beyond_face() {
        // Sphere hovering past the x = 5 boundary of the triangle: the face
        // probe misses, the edge from (5,0,5) to (5,0,-5)... closest edge
        // point still penetrates.
        let sphere = Sphere::new(Vec3::new(5.3, 0.2, 0.0), 0.5);
        let depth = sphere_triangle(&sphere, &floor_triangle()).expect("edge contact");
        // Closest edge point is (5, 0, 0); distance = sqrt(0.3^2 + 0.2^2)
        let expected = 0.5 - (0.3f32 * 0.3 + 0.2 * 0.2).sqrt();
        assert_relative_eq!(depth.amount, expected, epsilon = 1e-5);
        assert!(depth.axis.x > 0.0);
    }

    #[test]
    fn test_wall_contact_vertical_escape_is_point_local() {
        // Vertical wall at x = 1, sphere pressing into it from the side.
        // The escape measures clearance over the contact point only; the
        // resolver's slope policy is what stops walls being climbed.
        let wall = Triangle::new(
            Vec3::new(1.0, 0.0, -1.0),
            Vec3::new(1.0, 0.0, 1.0),
            Vec3::new(1.0, 2.0, 0.0),
            TerrainKind::Stone,
        );
        let sphere = Sphere::new(Vec3::new(0.51, 1.0, 0.0), 0.5);
        let depth = sphere_triangle(&sphere, &wall).expect("pressed into wall");
        assert_relative_eq!(depth.amount, 0.01, epsilon = 1e-4);
        assert!(depth.axis.x < 0.0);
        let expected = (0.5f32 * 0.5 - 0.49 * 0.49).sqrt();
        assert_relative_eq!(depth.vertical_escape.unwrap(), expected, epsilon = 1e-4);
    }
}
