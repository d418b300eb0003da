//! Grid ray marcher demo: pick distant pillars across grid cells and snap
//! a probe point to the floor below it.

use collision_engine::prelude::*;
use log::info;

fn pillar_template(half: f32, height: f32) -> CollisionMeshTemplate {
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
        0u32, 4, 5, 0, 5, 1,
        1, 5, 6, 1, 6, 2,
        2, 6, 7, 2, 7, 3,
        3, 7, 4, 3, 4, 0,
    ];
    CollisionMeshTemplate::from_vertices(&vertices, &indices)
}

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

fn main() {
    env_logger::init();

    let mut area = Area::new(AreaId(0), 10.0);
    area.insert_object(
        &floor_template(60.0),
        Mat4::identity(),
        CollisionProperty::terrain_only(TerrainKind::Dirt),
    )
    .expect("floor mesh");
    for (i, x) in [18.0f32, 37.0, 52.0].into_iter().enumerate() {
        area.insert_object(
            &pillar_template(1.0, 4.0),
            Mat4::new_translation(&Vec3::new(x, 0.0, 0.0)),
            CollisionProperty::new(TerrainKind::Stone, Some(i as u16), None),
        )
        .expect("pillar mesh");
    }

    let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(1.0, 0.0, 0.0));
    match march_terrain_grid(&area, &ray, 12) {
        Some(hit) => info!(
            "march hit {} at distance {:.2} (light group {:?})",
            hit.property.terrain.footstep_material(),
            hit.distance,
            hit.property.light
        ),
        None => info!("march found nothing within budget"),
    }

    let cfg = ResolverConfig::default();
    match nearest_floor(&[&area], Vec3::new(5.0, 6.0, 5.0), &cfg) {
        Some(hit) => info!(
            "floor snap: {} at y={:.2}",
            hit.property.terrain.footstep_material(),
            hit.point.y
        ),
        None => info!("no floor below probe"),
    }

    match collide_nav_sphere(&[&area], Vec3::new(18.0, 0.4, 0.0), 0.5) {
        Some(escape) => info!("nav probe blocked, escape distance {escape:.3}"),
        None => info!("nav probe clear"),
    }
}
