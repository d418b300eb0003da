//! Continuous position resolver
//!
//! Integrates a frame's velocity in fixed sub-steps, resolving each step
//! against nearby terrain triangles and the frame's interaction volumes.
//! Near-horizontal faces resolve before walls for stability, and the
//! vertical-escape policy decides per contact whether to climb or push out.

use std::collections::HashMap;

use crate::config::ResolverConfig;
use crate::foundation::math::{down, Vec3};
use crate::geometry::{Aabb, OrientedBox, Sphere, Triangle};
use crate::physics::sat;
use crate::physics::sphere_triangle::sphere_triangle;
use crate::physics::{FLAT_SLOPE_THRESHOLD, STEEP_SLOPE_THRESHOLD};
use crate::scene::{Area, AreaId, InteractionVolume};
use crate::terrain::{CollisionProperty, TerrainKind};

/// Entity kind feeding the climbing policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoverKind {
    /// The player character: conservative climbing rules
    Player,
    /// AI-driven entities: liberal climbing during the gravity pass so they
    /// do not get stuck on irregular terrain
    Npc,
}

/// Read-only context of one movement resolution call
#[derive(Debug, Clone, Copy)]
pub struct CollisionContext<'a> {
    /// Collision sphere radius of the entity
    pub radius: f32,
    /// Whether this is the vertical (gravity) pass of the frame
    pub gravity_pass: bool,
    /// Whether the entity is currently in free fall
    pub free_fall: bool,
    /// Entity kind
    pub kind: MoverKind,
    /// Interaction volumes active this frame
    pub volumes: &'a [InteractionVolume],
}

impl<'a> CollisionContext<'a> {
    /// Context with no volumes and all pass flags cleared
    pub fn new(radius: f32, kind: MoverKind) -> Self {
        Self {
            radius,
            gravity_pass: false,
            free_fall: false,
            kind,
            volumes: &[],
        }
    }
}

/// Collision metadata gathered over one `resolve_movement` call
#[derive(Debug, Clone, Default)]
pub struct MovementReport {
    /// Last terrain property struck per area
    pub terrain: HashMap<AreaId, CollisionProperty>,
    /// Properties of every interaction volume struck
    pub volumes: Vec<CollisionProperty>,
}

impl MovementReport {
    /// Whether anything was struck at all
    pub fn collided(&self) -> bool {
        !self.terrain.is_empty() || !self.volumes.is_empty()
    }
}

/// Resolve a frame of movement, mutating `position` in place.
///
/// The velocity is integrated in `cfg.sub_step_length` increments (last
/// step shortened to fit exactly). Resolution stops early once a step
/// produces negligible net displacement, bounding the iteration count on
/// chronic collisions.
pub fn resolve_movement(
    areas: &[&Area],
    position: &mut Vec3,
    velocity: Vec3,
    ctx: &CollisionContext<'_>,
    cfg: &ResolverConfig,
) -> MovementReport {
    let mut report = MovementReport::default();

    let length = velocity.magnitude();
    if length <= f32::EPSILON {
        return report;
    }
    let direction = velocity / length;

    let mut remaining = length;
    while remaining > 0.0 {
        let step = remaining.min(cfg.sub_step_length);
        remaining -= step;

        let before = *position;
        *position += direction * step;

        resolve_step(areas, position, ctx, cfg, &mut report);

        if (*position - before).magnitude_squared()
            < cfg.min_step_displacement * cfg.min_step_displacement
        {
            break;
        }
    }

    report
}

/// Resolve all collisions at the current tentative position of one sub-step.
fn resolve_step(
    areas: &[&Area],
    position: &mut Vec3,
    ctx: &CollisionContext<'_>,
    cfg: &ResolverConfig,
    report: &mut MovementReport,
) {
    let mut step_terrain: Vec<(AreaId, CollisionProperty)> = Vec::new();

    for area in areas {
        let entity = Sphere::new(*position, ctx.radius);
        let mut candidates: Vec<Triangle> = Vec::new();
        for group in area.groups_near(*position, ctx.radius) {
            for object in area.objects_of(group) {
                if !object.bounding_sphere.intersects(&entity) {
                    continue;
                }
                for tri in &object.triangles {
                    if tri.bounding_sphere().intersects(&entity) {
                        candidates.push(*tri);
                    }
                }
            }
        }

        // Near-horizontal faces (floors, ceilings) first: resolving against
        // them before walls keeps step edges stable
        candidates.sort_by(|a, b| {
            b.normal
                .y
                .abs()
                .partial_cmp(&a.normal.y.abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut struck: Option<CollisionProperty> = None;
        for tri in &candidates {
            // Hit faces seen from behind must not pull the entity through
            if tri.plane().distance_to_point(*position) < 0.0 {
                continue;
            }
            let sphere = Sphere::new(*position, ctx.radius);
            let depth = match sphere_triangle(&sphere, tri) {
                Some(depth) => depth,
                None => continue,
            };

            match depth.vertical_escape {
                Some(escape)
                    if accept_vertical_escape(escape, tri.kind, Some(tri), ctx, cfg) =>
                {
                    position.y += escape;
                }
                _ => *position += depth.displacement(),
            }
            struck = Some(property_of(tri, area));
        }
        if let Some(property) = struck {
            step_terrain.push((area.id(), property));
        }
    }

    // Interaction volumes: tested as boxes against the entity's bounds and
    // reported with priority over this step's terrain
    let mut volume_hit = false;
    for volume in ctx.volumes {
        let entity_box = OrientedBox::from_aabb(&Aabb::from_center_extents(
            *position,
            Vec3::new(ctx.radius, ctx.radius, ctx.radius),
        ));
        let depth = match sat::box_box(&entity_box, &volume.bounds) {
            Some(depth) => depth,
            None => continue,
        };
        volume_hit = true;
        if !report.volumes.contains(&volume.property) {
            report.volumes.push(volume.property);
        }

        if volume.solid {
            match depth.vertical_escape {
                Some(escape)
                    if accept_vertical_escape(
                        escape,
                        volume.property.terrain,
                        None,
                        ctx,
                        cfg,
                    ) =>
                {
                    position.y += escape;
                }
                _ => *position += depth.displacement(),
            }
        }
    }

    if !volume_hit {
        for (id, property) in step_terrain {
            report.terrain.insert(id, property);
        }
    }
}

/// Vertical-escape acceptance policy.
///
/// Decides whether a contact is climbed (pure-Y escape) or pushed out along
/// its separating axis. `surface` is the terrain triangle when one exists;
/// volume contacts have no face to run the slope checks against.
pub fn accept_vertical_escape(
    escape: f32,
    kind: TerrainKind,
    surface: Option<&Triangle>,
    ctx: &CollisionContext<'_>,
    cfg: &ResolverConfig,
) -> bool {
    // AI entities climb liberally while gravity is applied
    if ctx.kind == MoverKind::Npc && ctx.gravity_pass {
        return true;
    }
    if escape > kind.step_ceiling(cfg.step_height) {
        return false;
    }
    if let Some(tri) = surface {
        let slope = tri.normal.dot(&down());
        // Flat-but-tall faces are ambiguous stairs-vs-wall cases
        if slope < FLAT_SLOPE_THRESHOLD && tri.height() > cfg.step_height {
            return false;
        }
        // Steep faces slide instead of climbing
        if slope < STEEP_SLOPE_THRESHOLD {
            return false;
        }
    }
    // Climbing mid-fall produces ledge-walking artifacts at high frame rates
    if ctx.free_fall {
        return false;
    }
    true
}

/// Property reported for a struck triangle: the owning object's full
/// property when the back-reference resolves, else the bare classification.
fn property_of(tri: &Triangle, area: &Area) -> CollisionProperty {
    tri.object
        .and_then(|key| area.object(key))
        .map(|object| object.property)
        .unwrap_or_else(|| CollisionProperty::terrain_only(tri.kind))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ResolverConfig;
    use crate::foundation::math::Mat4;
    use crate::scene::CollisionMeshTemplate;
    use approx::assert_abs_diff_eq;

    fn flat_area(id: u32, half: f32, kind: TerrainKind) -> Area {
        let vertices = [
            Vec3::new(-half, 0.0, -half),
            Vec3::new(half, 0.0, -half),
            Vec3::new(half, 0.0, half),
            Vec3::new(-half, 0.0, half),
        ];
        let indices = [0u32, 2, 1, 0, 3, 2];
        let template = CollisionMeshTemplate::from_vertices(&vertices, &indices);
        let mut area = Area::new(AreaId(id), 10.0);
        area.insert_object(
            &template,
            Mat4::identity(),
            CollisionProperty::terrain_only(kind),
        )
        .unwrap();
        area
    }

    /// Triangle with `normal = (sqrt(1 - slope^2), -slope, 0)` and the
    /// requested vertical extent.
    fn slanted_triangle(slope: f32, height: f32, kind: TerrainKind) -> Triangle {
        let lateral = (1.0 - slope * slope).sqrt();
        let in_plane = Vec3::new(0.0, 0.0, 1.0);
        let downhill = Vec3::new(-slope, -lateral, 0.0);
        let scale = height / lateral;
        Triangle::new(Vec3::zeros(), in_plane, downhill * scale, kind)
    }

    fn player_ctx<'a>(radius: f32) -> CollisionContext<'a> {
        CollisionContext::new(radius, MoverKind::Player)
    }

    #[test]
    fn test_gravity_probe_lands_on_floor() {
        let area = flat_area(0, 5.0, TerrainKind::Grass);
        let areas = [&area];
        let cfg = ResolverConfig::default();
        let mut ctx = player_ctx(0.5);
        ctx.gravity_pass = true;

        let mut position = Vec3::new(0.0, 1.0, 0.0);
        let gravity = Vec3::new(0.0, -0.33, 0.0);

        let first = resolve_movement(&areas, &mut position, gravity, &ctx, &cfg);
        assert!(!first.collided());
        assert_abs_diff_eq!(position.y, 0.67, epsilon = 1e-4);

        let second = resolve_movement(&areas, &mut position, gravity, &ctx, &cfg);
        assert_abs_diff_eq!(position.y, 0.5, epsilon = 1e-4);
        let property = second.terrain.get(&AreaId(0)).expect("floor struck");
        assert_eq!(property.terrain, TerrainKind::Grass);
    }

    #[test]
    fn test_resting_entity_stays_put() {
        let area = flat_area(0, 5.0, TerrainKind::Stone);
        let areas = [&area];
        let cfg = ResolverConfig::default();
        let mut ctx = player_ctx(0.5);
        ctx.gravity_pass = true;

        let mut position = Vec3::new(1.0, 0.5, 1.0);
        resolve_movement(&areas, &mut position, Vec3::new(0.0, -0.5, 0.0), &ctx, &cfg);
        assert_abs_diff_eq!(position.y, 0.5, epsilon = 1e-3);
        assert_abs_diff_eq!(position.x, 1.0, epsilon = 1e-4);
    }

    #[test]
    fn test_step_height_boundary() {
        let cfg = ResolverConfig::default();
        let ctx = player_ctx(0.5);
        let stair = slanted_triangle(0.8, 0.3, TerrainKind::Stone);

        assert!(accept_vertical_escape(0.4, stair.kind, Some(&stair), &ctx, &cfg));
        assert!(!accept_vertical_escape(0.401, stair.kind, Some(&stair), &ctx, &cfg));
    }

    #[test]
    fn test_object_ceiling_is_halved() {
        let cfg = ResolverConfig::default();
        let ctx = player_ctx(0.5);
        let crate_face = slanted_triangle(0.8, 0.3, TerrainKind::Object);

        assert!(accept_vertical_escape(0.2, crate_face.kind, Some(&crate_face), &ctx, &cfg));
        assert!(!accept_vertical_escape(0.3, crate_face.kind, Some(&crate_face), &ctx, &cfg));
    }

    #[test]
    fn test_steep_slope_is_never_climbed() {
        let cfg = ResolverConfig::default();
        let ctx = player_ctx(0.5);

        let steep_low = slanted_triangle(0.4, 0.1, TerrainKind::Stone);
        assert!(!accept_vertical_escape(0.05, steep_low.kind, Some(&steep_low), &ctx, &cfg));

        let steep_tall = slanted_triangle(0.4, 2.0, TerrainKind::Stone);
        assert!(!accept_vertical_escape(0.05, steep_tall.kind, Some(&steep_tall), &ctx, &cfg));
    }

    #[test]
    fn test_shallow_stair_is_always_climbed() {
        let cfg = ResolverConfig::default();
        let ctx = player_ctx(0.5);
        let stair = slanted_triangle(0.9, 0.1, TerrainKind::Stone);
        assert!(accept_vertical_escape(0.1, stair.kind, Some(&stair), &ctx, &cfg));
    }

    #[test]
    fn test_free_fall_rejects_climbing() {
        let cfg = ResolverConfig::default();
        let mut ctx = player_ctx(0.5);
        ctx.free_fall = true;
        let stair = slanted_triangle(0.9, 0.1, TerrainKind::Stone);
        assert!(!accept_vertical_escape(0.1, stair.kind, Some(&stair), &ctx, &cfg));
    }

    #[test]
    fn test_npc_gravity_pass_climbs_anything() {
        let cfg = ResolverConfig::default();
        let mut ctx = CollisionContext::new(0.5, MoverKind::Npc);
        ctx.gravity_pass = true;
        let wall = slanted_triangle(0.2, 3.0, TerrainKind::Stone);
        assert!(accept_vertical_escape(2.0, wall.kind, Some(&wall), &ctx, &cfg));
    }

    #[test]
    fn test_water_volume_reported_with_priority() {
        let area = flat_area(0, 5.0, TerrainKind::Stone);
        let areas = [&area];
        let cfg = ResolverConfig::default();

        let water = InteractionVolume {
            bounds: OrientedBox::from_aabb(&Aabb::from_center_extents(
                Vec3::new(0.0, 0.5, 0.0),
                Vec3::new(2.0, 1.0, 2.0),
            )),
            property: CollisionProperty::terrain_only(TerrainKind::Water),
            solid: false,
        };
        let volumes = [water];
        let mut ctx = player_ctx(0.5);
        ctx.volumes = &volumes;

        let mut position = Vec3::new(-1.0, 0.5, 0.0);
        let report = resolve_movement(
            &areas,
            &mut position,
            Vec3::new(0.5, 0.0, 0.0),
            &ctx,
            &cfg,
        );
        assert!(report.volumes.iter().any(|p| p.terrain == TerrainKind::Water));
        // Water never blocks movement
        assert_abs_diff_eq!(position.x, -0.5, epsilon = 1e-4);
    }

    #[test]
    fn test_solid_volume_blocks_movement() {
        let area = flat_area(0, 20.0, TerrainKind::Stone);
        let areas = [&area];
        let cfg = ResolverConfig::default();

        let door = InteractionVolume {
            bounds: OrientedBox::from_aabb(&Aabb::from_center_extents(
                Vec3::new(3.0, 1.0, 0.0),
                Vec3::new(0.5, 1.0, 4.0),
            )),
            property: CollisionProperty::terrain_only(TerrainKind::Metal),
            solid: true,
        };
        let volumes = [door];
        let mut ctx = player_ctx(0.5);
        ctx.volumes = &volumes;

        let mut position = Vec3::new(1.5, 1.0, 0.0);
        let report = resolve_movement(
            &areas,
            &mut position,
            Vec3::new(2.0, 0.0, 0.0),
            &ctx,
            &cfg,
        );
        assert!(report.volumes.iter().any(|p| p.terrain == TerrainKind::Metal));
        // The door face sits at x = 2.5; the entity's sphere radius keeps
        // its center at or before the face
        assert!(position.x <= 2.5 + 1e-3);
    }
}
