//! Nearest-collision queries
//!
//! Floor snapping, local-area raycasts across multiple world areas, and
//! the nav-sphere probe the pathing AI uses to validate waypoints. All of
//! these take the candidate areas explicitly and never mutate anything.

use crate::config::ResolverConfig;
use crate::foundation::math::{down, Vec3};
use crate::geometry::{Ray, Sphere};
use crate::physics::depth::CollisionDepth;
use crate::physics::raycast::{ray_sphere, ray_triangle, RayCastOptions, RayCollision};
use crate::physics::sphere_triangle::sphere_triangle;
use crate::scene::{Area, AreaId};

/// Closest terrain hit along a ray across the given areas.
///
/// Broad phase narrows by grid cells around the ray origin and object
/// bounding spheres; narrow phase is the exact ray-triangle test. Returns
/// the owning area together with the hit.
pub fn nearest_local_collision(
    areas: &[&Area],
    ray: &Ray,
    opts: RayCastOptions,
    cfg: &ResolverConfig,
) -> Option<(AreaId, RayCollision)> {
    let search_radius = opts.max_len.unwrap_or(cfg.local_ray_radius);
    let mut best: Option<(AreaId, RayCollision)> = None;

    for area in areas {
        for group in area.groups_near(ray.origin, search_radius) {
            if !ray_sphere(ray, &group.bounding_sphere) {
                continue;
            }
            for object in area.objects_of(group) {
                if !ray_sphere(ray, &object.bounding_sphere) {
                    continue;
                }
                for tri in &object.triangles {
                    let (point, t) = match ray_triangle(ray, tri, opts) {
                        Some(hit) => hit,
                        None => continue,
                    };
                    let closer = match &best {
                        Some((_, current)) => t.abs() < current.distance.abs(),
                        None => true,
                    };
                    if closer {
                        best = Some((
                            area.id(),
                            RayCollision {
                                property: object.property,
                                point,
                                distance: t,
                            },
                        ));
                    }
                }
            }
        }
    }
    best
}

/// Closest floor below a position, within the configured probe range.
pub fn nearest_floor(
    areas: &[&Area],
    position: Vec3,
    cfg: &ResolverConfig,
) -> Option<RayCollision> {
    let ray = Ray::new(position, down());
    nearest_local_collision(
        areas,
        &ray,
        RayCastOptions::within(cfg.floor_probe_range),
        cfg,
    )
    .map(|(_, hit)| hit)
}

/// Probe a navigation sphere against the areas' terrain.
///
/// Returns the escape distance of the shallowest penetration when the
/// sphere is blocked: the vertical escape when one is defined, otherwise
/// the penetration magnitude. `None` means the position is clear.
pub fn collide_nav_sphere(areas: &[&Area], position: Vec3, radius: f32) -> Option<f32> {
    let sphere = Sphere::new(position, radius);
    let mut best: Option<CollisionDepth> = None;

    for area in areas {
        for group in area.groups_near(position, radius) {
            for object in area.objects_of(group) {
                if !object.bounding_sphere.intersects(&sphere) {
                    continue;
                }
                for tri in &object.triangles {
                    if !tri.bounding_sphere().intersects(&sphere) {
                        continue;
                    }
                    if let Some(depth) = sphere_triangle(&sphere, tri) {
                        CollisionDepth::apply_if_smaller(&mut best, depth);
                    }
                }
            }
        }
    }

    best.map(|depth| depth.vertical_escape.unwrap_or_else(|| depth.amount.abs()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Mat4;
    use crate::scene::CollisionMeshTemplate;
    use crate::terrain::{CollisionProperty, TerrainKind};
    use approx::assert_abs_diff_eq;

    fn flat_area(id: u32, height: f32, kind: TerrainKind) -> Area {
        let vertices = [
            Vec3::new(-5.0, 0.0, -5.0),
            Vec3::new(5.0, 0.0, -5.0),
            Vec3::new(5.0, 0.0, 5.0),
            Vec3::new(-5.0, 0.0, 5.0),
        ];
        let indices = [0u32, 2, 1, 0, 3, 2];
        let template = CollisionMeshTemplate::from_vertices(&vertices, &indices);
        let mut area = Area::new(AreaId(id), 10.0);
        area.insert_object(
            &template,
            Mat4::new_translation(&Vec3::new(0.0, height, 0.0)),
            CollisionProperty::terrain_only(kind),
        )
        .unwrap();
        area
    }

    #[test]
    fn test_nearest_floor_reports_distance_and_property() {
        let area = flat_area(0, 0.0, TerrainKind::Sand);
        let hit = nearest_floor(&[&area], Vec3::new(1.0, 3.0, 1.0), &ResolverConfig::default())
            .expect("floor below");
        assert_abs_diff_eq!(hit.distance, 3.0, epsilon = 1e-4);
        assert_abs_diff_eq!(hit.point.y, 0.0, epsilon = 1e-4);
        assert_eq!(hit.property.terrain, TerrainKind::Sand);
    }

    #[test]
    fn test_nearest_floor_none_when_out_of_range() {
        let area = flat_area(0, 0.0, TerrainKind::Sand);
        let mut cfg = ResolverConfig::default();
        cfg.floor_probe_range = 2.0;
        assert!(nearest_floor(&[&area], Vec3::new(0.0, 3.0, 0.0), &cfg).is_none());
    }

    #[test]
    fn test_nearest_local_collision_picks_closer_area() {
        // A "ship deck" hangs above the main area floor
        let main = flat_area(0, 0.0, TerrainKind::Grass);
        let ship = flat_area(1, 2.0, TerrainKind::Metal);
        let ray = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::new(0.0, -1.0, 0.0));

        let (id, hit) = nearest_local_collision(
            &[&main, &ship],
            &ray,
            RayCastOptions::within(10.0),
            &ResolverConfig::default(),
        )
        .expect("deck above floor");
        assert_eq!(id, AreaId(1));
        assert_eq!(hit.property.terrain, TerrainKind::Metal);
        assert_abs_diff_eq!(hit.distance, 3.0, epsilon = 1e-4);
    }

    #[test]
    fn test_nav_sphere_blocked_and_clear() {
        let area = flat_area(0, 0.0, TerrainKind::Stone);
        let blocked = collide_nav_sphere(&[&area], Vec3::new(0.5, 0.3, 0.5), 0.5)
            .expect("sphere dips into floor");
        assert_abs_diff_eq!(blocked, 0.2, epsilon = 1e-4);

        assert!(collide_nav_sphere(&[&area], Vec3::new(0.5, 5.0, 0.5), 0.5).is_none());
    }
}
