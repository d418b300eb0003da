//! Gravity probe demo: drop a player onto a floor, then walk it into a
//! crate to show the push-out and step policy at work.

use collision_engine::prelude::*;
use log::info;

fn floor_template(half: f32) -> CollisionMeshTemplate {
    let vertices = [
        Vec3::new(-half, 0.0, -half),
        Vec3::new(half, 0.0, -half),
        Vec3::new(half, 0.0, half),
        Vec3::new(-half, 0.0, half),
    ];
    let indices = [0u32, 2, 1, 0, 3, 2];
    CollisionMeshTemplate::from_vertices(&vertices, &indices)
}

fn crate_template(half: f32, height: f32) -> CollisionMeshTemplate {
    // Four walls and a lid, normals outward
    let vertices = [
        Vec3::new(-half, 0.0, -half),
        Vec3::new(half, 0.0, -half),
        Vec3::new(half, 0.0, half),
        Vec3::new(-half, 0.0, half),
        Vec3::new(-half, height, -half),
        Vec3::new(half, height, -half),
        Vec3::new(half, height, half),
        Vec3::new(-half, height, half),
    ];
    let indices = [
        0u32, 4, 5, 0, 5, 1, // -z wall
        1, 5, 6, 1, 6, 2, // +x wall
        2, 6, 7, 2, 7, 3, // +z wall
        3, 7, 4, 3, 4, 0, // -x wall
        4, 7, 6, 4, 6, 5, // lid
    ];
    CollisionMeshTemplate::from_vertices(&vertices, &indices)
}

fn main() {
    env_logger::init();

    let mut area = Area::new(AreaId(0), 10.0);
    area.insert_object(
        &floor_template(20.0),
        Mat4::identity(),
        CollisionProperty::terrain_only(TerrainKind::Grass),
    )
    .expect("floor mesh");
    area.insert_object(
        &crate_template(0.6, 0.8),
        Mat4::new_translation(&Vec3::new(3.0, 0.0, 0.0)),
        CollisionProperty::terrain_only(TerrainKind::Object),
    )
    .expect("crate mesh");

    let areas = [&area];
    let cfg = ResolverConfig::default();

    let mut gravity_ctx = CollisionContext::new(0.5, MoverKind::Player);
    gravity_ctx.gravity_pass = true;
    let walk_ctx = CollisionContext::new(0.5, MoverKind::Player);

    let mut position = Vec3::new(0.0, 4.0, 0.0);
    info!("dropping player from {position:?}");

    for tick in 0..40 {
        let report = resolve_movement(
            &areas,
            &mut position,
            Vec3::new(0.0, -0.33, 0.0),
            &gravity_ctx,
            &cfg,
        );
        if let Some(property) = report.terrain.get(&AreaId(0)) {
            info!(
                "tick {tick}: rested at y={:.3} on {}",
                position.y,
                property.terrain.footstep_material()
            );
            break;
        }
    }

    info!("walking toward the crate at x=3");
    for _ in 0..40 {
        resolve_movement(
            &areas,
            &mut position,
            Vec3::new(0.1, 0.0, 0.0),
            &walk_ctx,
            &cfg,
        );
        resolve_movement(
            &areas,
            &mut position,
            Vec3::new(0.0, -0.33, 0.0),
            &gravity_ctx,
            &cfg,
        );
    }
    info!(
        "final position {position:?} (crate wall should have stopped the walk)"
    );
}
