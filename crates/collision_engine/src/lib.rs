//! # Collision Engine
//!
//! Kinematic collision detection and movement resolution for a real-time
//! 3D world client. This crate is the geometric core only: it takes entity
//! positions, velocities and pre-partitioned terrain meshes from its
//! callers and hands back resolved positions, collision metadata and ray
//! query results. No rendering, no rigid-body dynamics, no networking.
//!
//! ## Layers
//!
//! - [`geometry`]: rays, planes, spheres, triangles, boxes
//! - [`physics`]: SAT and ray solvers, sphere-triangle penetration, the
//!   continuous position resolver, nearest-collision queries, push-apart
//! - [`spatial`]: the coarse 2D collision grid and its ray marcher
//! - [`scene`]: areas, collision objects, interaction volumes
//! - [`terrain`]: closed surface classification and collision properties
//! - [`config`]: movement tuning with TOML/RON round-tripping
//!
//! ## Quick Start
//!
//! ```rust
//! use collision_engine::prelude::*;
//!
//! // One flat floor triangle pair spanning x,z in [-5, 5]
//! let vertices = [
//!     Vec3::new(-5.0, 0.0, -5.0),
//!     Vec3::new(5.0, 0.0, -5.0),
//!     Vec3::new(5.0, 0.0, 5.0),
//!     Vec3::new(-5.0, 0.0, 5.0),
//! ];
//! let indices = [0u32, 2, 1, 0, 3, 2];
//! let template = CollisionMeshTemplate::from_vertices(&vertices, &indices);
//!
//! let mut area = Area::new(AreaId(0), 10.0);
//! area.insert_object(
//!     &template,
//!     Mat4::identity(),
//!     CollisionProperty::terrain_only(TerrainKind::Grass),
//! )
//! .unwrap();
//!
//! // Drop an entity onto the floor
//! let cfg = ResolverConfig::default();
//! let mut ctx = CollisionContext::new(0.5, MoverKind::Player);
//! ctx.gravity_pass = true;
//! let mut position = Vec3::new(0.0, 1.0, 0.0);
//! for _ in 0..4 {
//!     resolve_movement(&[&area], &mut position, Vec3::new(0.0, -0.33, 0.0), &ctx, &cfg);
//! }
//! assert!((position.y - 0.5).abs() < 1e-3);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod geometry;
pub mod terrain;
pub mod scene;
pub mod spatial;
pub mod physics;
pub mod config;

/// Common imports for engine users
pub mod prelude {
    pub use crate::config::{Config, ResolverConfig};
    pub use crate::foundation::math::{Mat4, Vec3};
    pub use crate::geometry::{Aabb, OrientedBox, Plane, Ray, Sphere, Triangle};
    pub use crate::physics::{
        collide_nav_sphere, nearest_floor, nearest_local_collision, push_apart,
        resolve_movement, CollisionContext, CollisionDepth, MovementReport, Mover, MoverFlags,
        MoverKind, RayCastOptions, RayCollision,
    };
    pub use crate::scene::{
        Area, AreaId, CollisionMeshTemplate, CollisionObject, InteractionVolume,
    };
    pub use crate::spatial::march_terrain_grid;
    pub use crate::terrain::{CollisionProperty, TerrainKind};
}
