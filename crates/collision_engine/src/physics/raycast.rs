//! Ray query solvers
//!
//! Ray tests against planes, triangles, spheres and boxes. These back the
//! camera occlusion, picking, floor-snapping and shadow projection queries,
//! so their tolerances are part of observable behavior.

use crate::foundation::math::Vec3;
use crate::geometry::{OrientedBox, Plane, Ray, Sphere, Triangle};
use crate::physics::{EDGE_TEST_EPSILON, RAY_PARALLEL_EPSILON};
use crate::terrain::CollisionProperty;

/// Options shared by the parametric ray solvers
#[derive(Debug, Clone, Copy, Default)]
pub struct RayCastOptions {
    /// Accept hits behind the ray origin (negative t)
    pub bidirectional: bool,
    /// Reject hits farther than this distance along the ray
    pub max_len: Option<f32>,
}

impl RayCastOptions {
    /// Forward-only, unlimited length
    pub fn forward() -> Self {
        Self::default()
    }

    /// Forward-only with a length limit
    pub fn within(max_len: f32) -> Self {
        Self {
            bidirectional: false,
            max_len: Some(max_len),
        }
    }

    /// Both directions with a length limit
    pub fn bidirectional_within(max_len: f32) -> Self {
        Self {
            bidirectional: true,
            max_len: Some(max_len),
        }
    }
}

/// Result of a ray query against world collision data
#[derive(Debug, Clone, Copy)]
pub struct RayCollision {
    /// Collision metadata of the struck surface
    pub property: CollisionProperty,
    /// World-space hit point
    pub point: Vec3,
    /// Distance along the ray to the hit
    pub distance: f32,
}

/// Solve the ray-plane intersection parameter.
///
/// Rejects near-parallel rays, hits behind the origin (unless
/// bidirectional), and hits beyond the optional length limit.
pub fn ray_plane(ray: &Ray, plane: &Plane, opts: RayCastOptions) -> Option<f32> {
    let denom = plane.normal.dot(&ray.direction);
    if denom.abs() <= RAY_PARALLEL_EPSILON {
        return None;
    }
    let t = -plane.distance_to_point(ray.origin) / denom;
    if t < 0.0 && !opts.bidirectional {
        return None;
    }
    if let Some(max_len) = opts.max_len {
        if t.abs() > max_len {
            return None;
        }
    }
    Some(t)
}

/// Ray-triangle intersection: plane solve plus the three edge tests.
///
/// The edge tests use the signed cross-product against the face normal with
/// an inclusive tolerance, so rays grazing an edge still count as hits.
/// Returns the hit point and the ray parameter.
pub fn ray_triangle(ray: &Ray, tri: &Triangle, opts: RayCastOptions) -> Option<(Vec3, f32)> {
    let t = ray_plane(ray, &tri.plane(), opts)?;
    let point = ray.point_at(t);

    for (a, b) in tri.edges() {
        let side = (b - a).cross(&(point - a)).dot(&tri.normal);
        if side < -EDGE_TEST_EPSILON {
            return None;
        }
    }
    Some((point, t))
}

/// Boolean ray-sphere test.
///
/// True when the origin is already inside the sphere, or when the closest
/// approach point along the (forward) ray lies within the radius.
pub fn ray_sphere(ray: &Ray, sphere: &Sphere) -> bool {
    if sphere.contains_point(ray.origin) {
        return true;
    }
    let to_center = sphere.center - ray.origin;
    let projected = to_center.dot(&ray.direction);
    if projected < 0.0 {
        return false; // Aiming away
    }
    let closest = ray.point_at(projected);
    (closest - sphere.center).magnitude_squared() <= sphere.radius_sq
}

/// Ray-box intersection via the six face quads.
///
/// Broad-phase rejects on the box's bounding sphere, then keeps the closest
/// face-plane hit whose point passes the quad containment test.
pub fn ray_box(ray: &Ray, bx: &OrientedBox, opts: RayCastOptions) -> Option<(Vec3, f32)> {
    if !ray_sphere(ray, bx.bounding_sphere()) {
        return None;
    }

    let mut best: Option<(Vec3, f32)> = None;
    for face in bx.planes() {
        let plane = Plane::from_normal_point(face.normal, face.corners[0]);
        let t = match ray_plane(ray, &plane, opts) {
            Some(t) => t,
            None => continue,
        };
        let point = ray.point_at(t);
        if !face.contains(point) {
            continue;
        }
        match best {
            Some((_, best_t)) if best_t.abs() <= t.abs() => {}
            _ => best = Some((point, t)),
        }
    }
    best
}
