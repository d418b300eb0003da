//! Separating-Axis-Theorem penetration solvers
//!
//! Box-box and box-triangle minimum-penetration depth. Projection is over
//! the full vertex sets, so arbitrarily oriented boxes are supported. Any
//! candidate axis without overlap proves separation and short-circuits;
//! overlaps below `CONTACT_EPSILON` count as touching, not colliding.

use crate::foundation::math::Vec3;
use crate::geometry::{OrientedBox, Triangle};
use crate::physics::depth::{CollisionDepth, ProjectionRange};
use crate::physics::{CONTACT_EPSILON, DEGENERATE_AXIS_EPSILON};

/// Minimum-penetration depth of box `a` against box `b`, or `None` if any
/// of the 15 candidate axes (3 + 3 face normals, 9 edge cross products)
/// separates them.
pub fn box_box(a: &OrientedBox, b: &OrientedBox) -> Option<CollisionDepth> {
    let a_vertices: &[Vec3] = a.vertices();
    let b_vertices: &[Vec3] = b.vertices();
    let mut best = None;

    for axis in a.axes() {
        if !test_axis(axis, a_vertices, b_vertices, &mut best) {
            return None;
        }
    }
    for axis in b.axes() {
        if !test_axis(axis, a_vertices, b_vertices, &mut best) {
            return None;
        }
    }
    for a_axis in a.axes() {
        for b_axis in b.axes() {
            let cross = a_axis.cross(&b_axis);
            if cross.magnitude_squared() < DEGENERATE_AXIS_EPSILON {
                continue; // Near-parallel edges, axis already covered
            }
            if !test_axis(cross.normalize(), a_vertices, b_vertices, &mut best) {
                return None;
            }
        }
    }

    best
}

/// Minimum-penetration depth of a box against a triangle.
///
/// Candidate axes: the box's 3 face normals, the triangle's face normal,
/// and the cross of each box axis with each of the triangle's principal
/// axes (the three edge directions plus the face normal).
pub fn box_triangle(bx: &OrientedBox, tri: &Triangle) -> Option<CollisionDepth> {
    let box_vertices: &[Vec3] = bx.vertices();
    let tri_vertices = [tri.v0, tri.v1, tri.v2];
    let mut best = None;

    for axis in bx.axes() {
        if !test_axis(axis, box_vertices, &tri_vertices, &mut best) {
            return None;
        }
    }
    if !test_axis(tri.normal, box_vertices, &tri_vertices, &mut best) {
        return None;
    }

    let principal = [
        tri.v1 - tri.v0,
        tri.v2 - tri.v1,
        tri.v0 - tri.v2,
        tri.normal,
    ];
    for box_axis in bx.axes() {
        for tri_axis in &principal {
            let cross = box_axis.cross(tri_axis);
            if cross.magnitude_squared() < DEGENERATE_AXIS_EPSILON {
                continue;
            }
            if !test_axis(cross.normalize(), box_vertices, &tri_vertices, &mut best) {
                return None;
            }
        }
    }

    best
}

/// Project both vertex sets onto one axis and fold the overlap into `best`.
/// Returns `false` when the axis separates the shapes (or the contact is
/// within touching tolerance), which terminates the whole test.
fn test_axis(axis: Vec3, a_vertices: &[Vec3], b_vertices: &[Vec3], best: &mut Option<CollisionDepth>) -> bool {
    let range_a = ProjectionRange::project(axis, a_vertices);
    let range_b = ProjectionRange::project(axis, b_vertices);
    match range_a.overlap_amount(&range_b) {
        None => false,
        Some(amount) if amount.abs() < CONTACT_EPSILON => false,
        Some(amount) => {
            CollisionDepth::apply_if_smaller(best, CollisionDepth::from_axis(amount, axis));
            true
        }
    }
}
