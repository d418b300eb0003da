//! Coarse 2D collision grid
//!
//! Terrain is partitioned on the horizontal plane only: a cell is a square
//! column keyed by integer (x, z) coordinates. Each cell holds zero or more
//! collision object groups; a group is a bucket of objects queried
//! together, with a merged bounding sphere for broad-phase rejects.

use std::collections::HashMap;

use slotmap::SlotMap;

use crate::foundation::math::Vec3;
use crate::geometry::Sphere;
use crate::scene::CollisionObjectKey;

slotmap::new_key_type! {
    /// Stable key of a collision object group within its grid
    pub struct GroupKey;
}

/// Integer coordinates of a grid cell on the horizontal plane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellCoord {
    /// Cell column along world X
    pub x: i32,
    /// Cell column along world Z
    pub z: i32,
}

impl CellCoord {
    /// The four edge-adjacent neighbors
    pub fn neighbors(self) -> [CellCoord; 4] {
        [
            CellCoord { x: self.x - 1, z: self.z },
            CellCoord { x: self.x + 1, z: self.z },
            CellCoord { x: self.x, z: self.z - 1 },
            CellCoord { x: self.x, z: self.z + 1 },
        ]
    }
}

/// A spatially-bucketed set of collision objects queried together
#[derive(Debug, Clone)]
pub struct CollisionObjectGroup {
    /// Keys of the member objects
    pub objects: Vec<CollisionObjectKey>,
    /// Merged bounding sphere of all member objects
    pub bounding_sphere: Sphere,
}

/// The coarse grid of one area
#[derive(Debug, Clone)]
pub struct CollisionGrid {
    cell_size: f32,
    cells: HashMap<CellCoord, Vec<GroupKey>>,
    groups: SlotMap<GroupKey, CollisionObjectGroup>,
}

impl CollisionGrid {
    /// Create an empty grid with the given cell edge length
    pub fn new(cell_size: f32) -> Self {
        assert!(cell_size > 0.0, "grid cell size must be positive");
        Self {
            cell_size,
            cells: HashMap::new(),
            groups: SlotMap::with_key(),
        }
    }

    /// Cell edge length
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// The cell containing a world position
    pub fn cell_of(&self, position: Vec3) -> CellCoord {
        CellCoord {
            x: (position.x / self.cell_size).floor() as i32,
            z: (position.z / self.cell_size).floor() as i32,
        }
    }

    /// Horizontal bounds of a cell as (min_x, min_z, max_x, max_z)
    pub fn cell_bounds(&self, cell: CellCoord) -> (f32, f32, f32, f32) {
        let min_x = cell.x as f32 * self.cell_size;
        let min_z = cell.z as f32 * self.cell_size;
        (min_x, min_z, min_x + self.cell_size, min_z + self.cell_size)
    }

    /// Register an object under the cell containing its bounding sphere
    /// center, extending that cell's group (one group per cell is the
    /// common case; the map supports more for externally built layouts).
    pub fn insert_object(&mut self, key: CollisionObjectKey, sphere: Sphere) {
        let cell = self.cell_of(sphere.center);
        let keys = self.cells.entry(cell).or_default();
        if let Some(&group_key) = keys.first() {
            let group = &mut self.groups[group_key];
            group.objects.push(key);
            group.bounding_sphere = group.bounding_sphere.merged(&sphere);
        } else {
            let group_key = self.groups.insert(CollisionObjectGroup {
                objects: vec![key],
                bounding_sphere: sphere,
            });
            keys.push(group_key);
        }
    }

    /// Groups registered under one cell
    pub fn groups_in_cell(&self, cell: CellCoord) -> impl Iterator<Item = (GroupKey, &CollisionObjectGroup)> {
        self.cells
            .get(&cell)
            .into_iter()
            .flatten()
            .map(move |&key| (key, &self.groups[key]))
    }

    /// Groups whose bounding spheres intersect the query sphere, gathered
    /// from every cell the query footprint touches.
    pub fn groups_near(&self, position: Vec3, radius: f32) -> Vec<&CollisionObjectGroup> {
        let min = self.cell_of(position - Vec3::new(radius, 0.0, radius));
        let max = self.cell_of(position + Vec3::new(radius, 0.0, radius));
        let query = Sphere::new(position, radius);

        let mut found = Vec::new();
        for x in min.x..=max.x {
            for z in min.z..=max.z {
                for (_, group) in self.groups_in_cell(CellCoord { x, z }) {
                    if group.bounding_sphere.intersects(&query) {
                        found.push(group);
                    }
                }
            }
        }
        found
    }

    /// Number of registered groups
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn dummy_key() -> CollisionObjectKey {
        let mut map: SlotMap<CollisionObjectKey, ()> = SlotMap::with_key();
        map.insert(())
    }

    #[test]
    fn test_cell_of_negative_coordinates() {
        let grid = CollisionGrid::new(10.0);
        assert_eq!(grid.cell_of(Vec3::new(-0.1, 0.0, 25.0)), CellCoord { x: -1, z: 2 });
        assert_eq!(grid.cell_of(Vec3::new(0.0, 0.0, 0.0)), CellCoord { x: 0, z: 0 });
    }

    #[test]
    fn test_insert_extends_cell_group() {
        let mut grid = CollisionGrid::new(10.0);
        grid.insert_object(dummy_key(), Sphere::new(Vec3::new(1.0, 0.0, 1.0), 2.0));
        grid.insert_object(dummy_key(), Sphere::new(Vec3::new(8.0, 0.0, 8.0), 2.0));
        assert_eq!(grid.group_count(), 1);

        let groups = grid.groups_near(Vec3::new(5.0, 0.0, 5.0), 1.0);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].objects.len(), 2);
    }

    #[test]
    fn test_groups_near_reaches_adjacent_cells() {
        let mut grid = CollisionGrid::new(10.0);
        grid.insert_object(dummy_key(), Sphere::new(Vec3::new(12.0, 0.0, 0.0), 3.0));
        // Query from the neighboring cell, footprint crossing the boundary
        let groups = grid.groups_near(Vec3::new(9.0, 0.0, 0.0), 1.5);
        assert_eq!(groups.len(), 1);
    }
}
