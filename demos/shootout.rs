extern crate ironsight;

use glam::Vec3;
use ironsight::{
    components::{
        ammo::{AmmoReserve, AmmoType},
        combat::CombatController,
        health::Health,
        weapon::Weapon,
    },
    entities,
    registry::enemies::GRUX_ID,
    systems,
    test_utils::fixtures,
};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut state = fixtures::game_state();
    let character = entities::character::spawn_character_with_default_weapon(&mut state, Vec3::ZERO);
    let enemy = entities::enemy::spawn_enemy_by_id(
        &mut state,
        &GRUX_ID,
        Vec3::new(600.0, 0.0, 0.0),
        [Vec3::new(500.0, 100.0, 0.0), Vec3::new(700.0, -100.0, 0.0)],
    )
    .expect("built-in enemy row");

    println!("== shootout: hold the trigger until the clip runs dry ==");
    systems::combat::fire_button_pressed(&mut state, character);
    for frame in 0..240 {
        state.tick(1.0 / 60.0);
        if frame % 30 == 0 {
            report(&state, character, enemy);
        }
    }
    systems::combat::fire_button_released(&mut state, character);

    println!("== the enemy closes in and swings back ==");
    systems::enemy::set_in_attack_range(&mut state, enemy, true);
    systems::enemy::melee_strike(&mut state, enemy, character);
    for _ in 0..120 {
        state.tick(1.0 / 60.0);
    }
    report(&state, character, enemy);

    println!("== finish it off ==");
    systems::enemy::take_damage(&mut state, enemy, 1000.0, Some(character));
    for _ in 0..240 {
        state.tick(1.0 / 60.0);
    }
    println!(
        "enemy still in the world: {}",
        state.world.contains(enemy)
    );
}

fn report(state: &ironsight::engine::game_state::GameState, character: hecs::Entity, enemy: hecs::Entity) {
    let combat = state.world.get::<&CombatController>(character).unwrap();
    let weapon_ammo = combat
        .equipped_weapon()
        .and_then(|weapon| state.world.get::<&Weapon>(weapon).ok())
        .map(|weapon| weapon.ammo())
        .unwrap_or(0);
    let reserve = state
        .world
        .get::<&AmmoReserve>(character)
        .map(|reserve| reserve.carried(AmmoType::NineMm))
        .unwrap_or(0);
    let enemy_health = state
        .world
        .get::<&Health>(enemy)
        .map(|health| health.current())
        .unwrap_or(0.0);
    println!(
        "state={} clip={} carried={} enemy_health={} crosshair={:.2}",
        combat.state(),
        weapon_ammo,
        reserve,
        enemy_health,
        systems::combat::crosshair_spread_multiplier(&state.world, character),
    );
}
