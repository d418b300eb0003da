//! Breadth-first grid ray marcher
//!
//! Long-range terrain queries (picking, line-of-sight) walk the coarse cell
//! grid along the ray's horizontal projection instead of scanning a whole
//! area. Expansion is restricted to the two neighbors matching the sign of
//! the ray's horizontal direction, so the search stays a narrow cone and
//! the visited cell count is linear in the step budget.

use std::collections::{HashSet, VecDeque};

use log::debug;

use crate::geometry::Ray;
use crate::physics::raycast::{ray_sphere, ray_triangle, RayCastOptions, RayCollision};
use crate::scene::Area;
use crate::spatial::grid::{CellCoord, CollisionGrid, GroupKey};

/// Find the nearest terrain hit along a ray, visiting at most `max_steps`
/// grid-cell hops from the origin cell.
///
/// The search stops at the first breadth depth that produced a hit (all
/// cells of that depth are still drained so the closest hit of the depth
/// wins), or once the step budget is exhausted.
pub fn march_terrain_grid(area: &Area, ray: &Ray, max_steps: usize) -> Option<RayCollision> {
    let grid = area.grid();
    let start = grid.cell_of(ray.origin);

    let step_x = horizontal_sign(ray.direction.x);
    let step_z = horizontal_sign(ray.direction.z);

    let mut frontier: VecDeque<(CellCoord, usize)> = VecDeque::new();
    let mut visited: HashSet<CellCoord> = HashSet::new();
    let mut tested: HashSet<GroupKey> = HashSet::new();
    frontier.push_back((start, 0));
    visited.insert(start);

    let mut best: Option<RayCollision> = None;
    let mut hit_depth = 0usize;

    while let Some((cell, depth)) = frontier.pop_front() {
        if best.is_some() && depth > hit_depth {
            break;
        }
        if !ray_crosses_cell(grid, cell, ray) {
            continue;
        }

        // Objects regularly spill over their nominal cell, so the cell's
        // own groups and its four neighbors are tested together
        for test_cell in std::iter::once(cell).chain(cell.neighbors()) {
            for (key, group) in grid.groups_in_cell(test_cell) {
                if !tested.insert(key) {
                    continue;
                }
                if !ray_sphere(ray, &group.bounding_sphere) {
                    continue;
                }
                for object in area.objects_of(group) {
                    if !ray_sphere(ray, &object.bounding_sphere) {
                        continue;
                    }
                    for tri in &object.triangles {
                        let (point, t) = match ray_triangle(ray, tri, RayCastOptions::forward()) {
                            Some(hit) => hit,
                            None => continue,
                        };
                        let closer = match &best {
                            Some(current) => t < current.distance,
                            None => true,
                        };
                        if closer {
                            best = Some(RayCollision {
                                property: object.property,
                                point,
                                distance: t,
                            });
                            hit_depth = depth;
                        }
                    }
                }
            }
        }

        if depth < max_steps {
            for next in [
                CellCoord { x: cell.x + step_x, z: cell.z },
                CellCoord { x: cell.x, z: cell.z + step_z },
            ] {
                if next != cell && visited.insert(next) {
                    frontier.push_back((next, depth + 1));
                }
            }
        }
    }

    if best.is_none() {
        debug!(
            "grid march exhausted: {} cells visited, no hit within {} steps",
            visited.len(),
            max_steps
        );
    }
    best
}

fn horizontal_sign(component: f32) -> i32 {
    if component > 1e-6 {
        1
    } else if component < -1e-6 {
        -1
    } else {
        0
    }
}

/// Horizontal slab test: does the ray's 2D projection cross this cell's
/// bounds? Cells containing the origin trivially cross.
fn ray_crosses_cell(grid: &CollisionGrid, cell: CellCoord, ray: &Ray) -> bool {
    let (min_x, min_z, max_x, max_z) = grid.cell_bounds(cell);

    if ray.origin.x >= min_x
        && ray.origin.x <= max_x
        && ray.origin.z >= min_z
        && ray.origin.z <= max_z
    {
        return true;
    }

    let mut tmin = 0.0f32;
    let mut tmax = f32::MAX;

    // Per-axis slab clipping; an axis the ray never advances on must
    // already hold the origin, else the cell can never be crossed
    if ray.direction.x.abs() > 1e-6 {
        let inv = 1.0 / ray.direction.x;
        let t1 = (min_x - ray.origin.x) * inv;
        let t2 = (max_x - ray.origin.x) * inv;
        tmin = tmin.max(t1.min(t2));
        tmax = tmax.min(t1.max(t2));
    } else if ray.origin.x < min_x || ray.origin.x > max_x {
        return false;
    }

    if ray.direction.z.abs() > 1e-6 {
        let inv = 1.0 / ray.direction.z;
        let t3 = (min_z - ray.origin.z) * inv;
        let t4 = (max_z - ray.origin.z) * inv;
        tmin = tmin.max(t3.min(t4));
        tmax = tmax.min(t3.max(t4));
    } else if ray.origin.z < min_z || ray.origin.z > max_z {
        return false;
    }

    tmax >= tmin
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{Mat4, Vec3};
    use crate::scene::{AreaId, CollisionMeshTemplate};
    use crate::terrain::{CollisionProperty, TerrainKind};
    use approx::assert_abs_diff_eq;

    fn wall_template() -> CollisionMeshTemplate {
        // Wall quad in the YZ plane at x = 0 (translated on insertion)
        let vertices = [
            Vec3::new(0.0, -2.0, -2.0),
            Vec3::new(0.0, -2.0, 2.0),
            Vec3::new(0.0, 2.0, 2.0),
            Vec3::new(0.0, 2.0, -2.0),
        ];
        let indices = [0u32, 1, 2, 0, 2, 3];
        CollisionMeshTemplate::from_vertices(&vertices, &indices)
    }

    #[test]
    fn test_empty_terrain_terminates_within_budget() {
        let area = Area::new(AreaId(0), 10.0);
        let ray = Ray::new(Vec3::new(3.0, 1.0, 3.0), Vec3::new(0.7, -0.1, 0.7));
        assert!(march_terrain_grid(&area, &ray, 16).is_none());
    }

    #[test]
    fn test_distant_wall_found_through_cells() {
        let mut area = Area::new(AreaId(0), 10.0);
        area.insert_object(
            &wall_template(),
            Mat4::new_translation(&Vec3::new(24.0, 0.0, 0.0)),
            CollisionProperty::terrain_only(TerrainKind::Stone),
        )
        .unwrap();

        let ray = Ray::new(Vec3::new(0.0, 0.5, 0.0), Vec3::new(1.0, 0.0, 0.0));
        let hit = march_terrain_grid(&area, &ray, 8).expect("wall two cells away");
        assert_abs_diff_eq!(hit.distance, 24.0, epsilon = 1e-3);
        assert_eq!(hit.property.terrain, TerrainKind::Stone);
    }

    #[test]
    fn test_step_budget_bounds_the_search() {
        let mut area = Area::new(AreaId(0), 10.0);
        area.insert_object(
            &wall_template(),
            Mat4::new_translation(&Vec3::new(55.0, 0.0, 0.0)),
            CollisionProperty::terrain_only(TerrainKind::Stone),
        )
        .unwrap();

        let ray = Ray::new(Vec3::new(0.0, 0.5, 0.0), Vec3::new(1.0, 0.0, 0.0));
        // Wall sits five cells out; a two-hop budget cannot reach it
        assert!(march_terrain_grid(&area, &ray, 2).is_none());
        assert!(march_terrain_grid(&area, &ray, 6).is_some());
    }
}
