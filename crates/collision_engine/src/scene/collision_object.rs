//! Collision mesh representations
//!
//! Collision meshes are authored in model space and instantiated into world
//! space once per collision object when an area loads. The engine only ever
//! sees the world-space result; templates stay untouched so one mesh can
//! back many placed instances.

use log::warn;

use crate::foundation::math::{transform_point, Mat4, Vec3};
use crate::geometry::{Sphere, Triangle};
use crate::scene::CollisionObjectKey;
use crate::terrain::CollisionProperty;

/// A collision mesh template stored in model space (local coordinates)
#[derive(Debug, Clone)]
pub struct CollisionMeshTemplate {
    /// Triangles in model space as vertex triples, never modified
    pub local_triangles: Vec<[Vec3; 3]>,
}

impl CollisionMeshTemplate {
    /// Creates a new collision mesh template from model-space vertices and
    /// indices. Degenerate (zero-area) triangles are dropped with a warning
    /// rather than poisoning later normal computations.
    pub fn from_vertices(vertices: &[Vec3], indices: &[u32]) -> Self {
        let mut triangles = Vec::new();

        for chunk in indices.chunks(3) {
            if chunk.len() == 3 {
                let v0 = vertices[chunk[0] as usize];
                let v1 = vertices[chunk[1] as usize];
                let v2 = vertices[chunk[2] as usize];
                let area_sq = (v1 - v0).cross(&(v2 - v0)).magnitude_squared();
                if area_sq < 1e-12 {
                    warn!("dropping degenerate collision triangle {:?}", chunk);
                    continue;
                }
                triangles.push([v0, v1, v2]);
            }
        }

        Self {
            local_triangles: triangles,
        }
    }

    /// Number of triangles in the template
    pub fn triangle_count(&self) -> usize {
        self.local_triangles.len()
    }
}

/// One placed instance of a collision mesh: world-space triangles plus a
/// world bounding sphere and the local/world transform pair. Immutable per
/// frame.
#[derive(Debug, Clone)]
pub struct CollisionObject {
    /// Pre-transformed world-space triangles
    pub triangles: Vec<Triangle>,
    /// Bounding sphere enclosing all triangles, in world space
    pub bounding_sphere: Sphere,
    /// Model-to-world transform this instance was placed with
    pub local_to_world: Mat4,
    /// Cached inverse of `local_to_world`
    pub world_to_local: Mat4,
    /// Collision metadata shared by all triangles of this object
    pub property: CollisionProperty,
}

impl CollisionObject {
    /// Instantiate a template into world space.
    ///
    /// `world_to_local` must be the verified inverse of `local_to_world`;
    /// `Area::insert_object` performs that check and is the only caller.
    pub(crate) fn instantiate(
        template: &CollisionMeshTemplate,
        local_to_world: Mat4,
        world_to_local: Mat4,
        property: CollisionProperty,
        key: CollisionObjectKey,
    ) -> Self {
        let triangles: Vec<Triangle> = template
            .local_triangles
            .iter()
            .map(|[a, b, c]| {
                Triangle::new(
                    transform_point(&local_to_world, *a),
                    transform_point(&local_to_world, *b),
                    transform_point(&local_to_world, *c),
                    property.terrain,
                )
                .with_object(key)
            })
            .collect();

        let center = triangles
            .iter()
            .fold(Vec3::zeros(), |acc, tri| acc + tri.centroid())
            / (triangles.len().max(1) as f32);

        let mut radius_sq = 0.0f32;
        for tri in &triangles {
            for vertex in [tri.v0, tri.v1, tri.v2] {
                radius_sq = radius_sq.max((vertex - center).magnitude_squared());
            }
        }

        Self {
            triangles,
            bounding_sphere: Sphere::new(center, radius_sq.sqrt()),
            local_to_world,
            world_to_local,
            property,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::TerrainKind;
    use approx::assert_relative_eq;
    use slotmap::SlotMap;

    fn quad_template() -> CollisionMeshTemplate {
        // Unit quad in the XZ plane, normals up
        let vertices = [
            Vec3::new(-1.0, 0.0, -1.0),
            Vec3::new(1.0, 0.0, -1.0),
            Vec3::new(1.0, 0.0, 1.0),
            Vec3::new(-1.0, 0.0, 1.0),
        ];
        let indices = [0u32, 2, 1, 0, 3, 2];
        CollisionMeshTemplate::from_vertices(&vertices, &indices)
    }

    #[test]
    fn test_template_drops_degenerate_triangles() {
        let vertices = [
            Vec3::zeros(),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0), // collinear
            Vec3::new(0.0, 0.0, 1.0),
        ];
        let indices = [0u32, 1, 2, 0, 1, 3];
        let template = CollisionMeshTemplate::from_vertices(&vertices, &indices);
        assert_eq!(template.triangle_count(), 1);
    }

    #[test]
    fn test_instantiate_transforms_and_bounds() {
        let template = quad_template();
        let matrix = Mat4::new_translation(&Vec3::new(10.0, 2.0, 0.0));
        let inverse = matrix.try_inverse().unwrap();

        let mut keys: SlotMap<CollisionObjectKey, ()> = SlotMap::with_key();
        let key = keys.insert(());

        let object = CollisionObject::instantiate(
            &template,
            matrix,
            inverse,
            CollisionProperty::terrain_only(TerrainKind::Grass),
            key,
        );

        assert_eq!(object.triangles.len(), 2);
        assert_relative_eq!(
            object.bounding_sphere.center,
            Vec3::new(10.0, 2.0, 0.0),
            epsilon = 1e-4
        );
        for tri in &object.triangles {
            assert_relative_eq!(tri.normal.y, 1.0, epsilon = 1e-5);
            assert_eq!(tri.object, Some(key));
            assert_eq!(tri.kind, TerrainKind::Grass);
        }
    }
}
