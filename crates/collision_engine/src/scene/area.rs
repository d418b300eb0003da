//! World areas
//!
//! An area is one independently-meshed region of the world (main zone,
//! sub-zone, ship interior) with its own coarse collision grid. Areas are
//! built outside the tick loop and are read-only while any resolution or
//! query call is in progress.

use log::debug;
use slotmap::SlotMap;

use crate::foundation::math::{Mat4, Vec3};
use crate::scene::collision_object::{CollisionMeshTemplate, CollisionObject};
use crate::scene::{CollisionObjectKey, SceneError};
use crate::spatial::grid::{CollisionGrid, CollisionObjectGroup};
use crate::terrain::CollisionProperty;

/// Identifier of one world area (main zone, sub-zone, ship)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AreaId(pub u32);

/// One independently-meshed spatial region with its own collision grid
#[derive(Debug, Clone)]
pub struct Area {
    id: AreaId,
    objects: SlotMap<CollisionObjectKey, CollisionObject>,
    grid: CollisionGrid,
}

impl Area {
    /// Create an empty area with the given grid cell size
    pub fn new(id: AreaId, cell_size: f32) -> Self {
        Self {
            id,
            objects: SlotMap::with_key(),
            grid: CollisionGrid::new(cell_size),
        }
    }

    /// Area identifier
    pub fn id(&self) -> AreaId {
        self.id
    }

    /// The area's coarse collision grid
    pub fn grid(&self) -> &CollisionGrid {
        &self.grid
    }

    /// Look up a collision object by key
    pub fn object(&self, key: CollisionObjectKey) -> Option<&CollisionObject> {
        self.objects.get(key)
    }

    /// Number of collision objects in the area
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Instantiate a collision mesh template into this area.
    ///
    /// The template's triangles are transformed into world space, a world
    /// bounding sphere is computed, and the object is bucketed into the
    /// grid by its sphere center.
    pub fn insert_object(
        &mut self,
        template: &CollisionMeshTemplate,
        local_to_world: Mat4,
        property: CollisionProperty,
    ) -> Result<CollisionObjectKey, SceneError> {
        let world_to_local = local_to_world
            .try_inverse()
            .ok_or(SceneError::DegenerateTransform)?;

        let key = self.objects.insert_with_key(|key| {
            CollisionObject::instantiate(template, local_to_world, world_to_local, property, key)
        });

        let sphere = self.objects[key].bounding_sphere;
        self.grid.insert_object(key, sphere);
        debug!(
            "area {:?}: registered collision object ({} triangles, radius {:.2})",
            self.id,
            self.objects[key].triangles.len(),
            sphere.radius
        );
        Ok(key)
    }

    /// Groups whose bounding spheres overlap the query footprint
    pub fn groups_near(&self, position: Vec3, radius: f32) -> Vec<&CollisionObjectGroup> {
        self.grid.groups_near(position, radius)
    }

    /// Objects of a group, resolved through the slotmap
    pub fn objects_of<'a>(
        &'a self,
        group: &'a CollisionObjectGroup,
    ) -> impl Iterator<Item = &'a CollisionObject> {
        group.objects.iter().filter_map(|&key| self.objects.get(key))
    }
}
