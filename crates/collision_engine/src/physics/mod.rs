//! Intersection solvers and the resolution & query engine
//!
//! The solvers in this module are stateless and operate only on geometry
//! primitives; the resolver and query functions on top take every piece of
//! world state (areas, spatial indices, volumes) as explicit parameters so
//! they stay reentrant and testable in isolation.
//!
//! The tolerance constants below are behavior policy, not error margins:
//! they must stay exactly as-is to reproduce the terrain-stability behavior
//! the shipped world data was tuned against.

pub mod depth;
pub mod sat;
pub mod raycast;
pub mod sphere_triangle;
pub mod resolver;
pub mod queries;
pub mod separation;

pub use depth::{CollisionDepth, ProjectionRange};
pub use raycast::{ray_box, ray_plane, ray_sphere, ray_triangle, RayCastOptions, RayCollision};
pub use resolver::{resolve_movement, CollisionContext, MovementReport, MoverKind};
pub use queries::{collide_nav_sphere, nearest_floor, nearest_local_collision};
pub use separation::{push_apart, Mover, MoverFlags};
pub use sphere_triangle::sphere_triangle;

/// Overlaps smaller than this count as touching, not colliding.
pub const CONTACT_EPSILON: f32 = 1e-4;

/// A candidate SAT axis with squared length below this is degenerate.
pub const DEGENERATE_AXIS_EPSILON: f32 = 1e-4;

/// An escape axis this close to horizontal has no finite vertical escape.
pub const VERTICAL_AXIS_EPSILON: f32 = 1e-4;

/// Rays closer than this to parallel with a plane never intersect it.
pub const RAY_PARALLEL_EPSILON: f32 = 1e-5;

/// Inclusive tolerance of the triangle edge "inside" tests.
pub const EDGE_TEST_EPSILON: f32 = 1e-6;

/// Faces flatter than this but taller than the step height are ambiguous
/// stairs-vs-wall cases and are never climbed.
pub const FLAT_SLOPE_THRESHOLD: f32 = 0.75;

/// Faces steeper than this are slid along instead of climbed.
pub const STEEP_SLOPE_THRESHOLD: f32 = 0.5;
