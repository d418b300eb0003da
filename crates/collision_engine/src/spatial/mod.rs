//! Spatial partitioning
//!
//! A coarse 2D cell grid buckets collision object groups by their bounding
//! sphere centers, giving the resolver and the ray marcher a cheap way to
//! narrow the candidate set without scanning a whole area.

pub mod grid;
pub mod ray_march;

pub use grid::{CellCoord, CollisionGrid, CollisionObjectGroup, GroupKey};
pub use ray_march::march_terrain_grid;
