use glam::Vec3;
use hecs::Entity;

use crate::{
    components::{
        blackboard::{Blackboard, keys},
        enemy::Enemy,
        health::Health,
        id::EnemyId,
        spatial::Transform,
    },
    engine::game_state::GameState,
    registry::enemies::{ENEMY_REGISTRY, EnemyRow},
};

pub fn spawn_enemy(
    state: &mut GameState,
    row: &EnemyRow,
    location: Vec3,
    patrol_points: [Vec3; 2],
) -> Entity {
    let enemy = Enemy {
        base_damage: row.base_damage,
        stun_chance: row.stun_chance,
        attack_wait_time: row.attack_wait_time,
        hit_react_delay_min: row.hit_react_delay_min,
        hit_react_delay_max: row.hit_react_delay_max,
        death_time: row.death_time,
        health_bar_display_time: row.health_bar_display_time,
        impact_sound: row.impact_sound.clone(),
        impact_particles: row.impact_particles.clone(),
        ..Default::default()
    };

    let mut blackboard = Blackboard::default();
    blackboard.set_bool(keys::CAN_ATTACK, true);
    blackboard.set_vector(keys::PATROL_POINT, patrol_points[0]);
    blackboard.set_vector(keys::PATROL_POINT_2, patrol_points[1]);

    state.world.spawn((
        enemy,
        Health::new(row.max_health),
        Transform::from_translation(location),
        blackboard,
    ))
}

pub fn spawn_enemy_by_id(
    state: &mut GameState,
    id: &EnemyId,
    location: Vec3,
    patrol_points: [Vec3; 2],
) -> Option<Entity> {
    let row = ENEMY_REGISTRY.get(id)?.clone();
    Some(spawn_enemy(state, &row, location, patrol_points))
}
