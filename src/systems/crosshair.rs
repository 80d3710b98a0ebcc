use hecs::Entity;

use crate::{
    components::{combat::CombatController, crosshair::CrosshairSpread, spatial::Kinematics},
    engine::{game_state::GameState, scheduler::TimerAction},
    utils::math::{interp_to, map_range_clamped},
};

/// Planar speed that maps to a fully spread velocity factor.
const WALK_SPEED_MAX: f32 = 600.0;
const IN_AIR_TARGET: f32 = 2.25;
const IN_AIR_SPREAD_RATE: f32 = 2.25;
const IN_AIR_SHRINK_RATE: f32 = 30.0;
const AIM_TARGET: f32 = 0.6;
const AIM_RATE: f32 = 30.0;
const SHOOTING_TARGET: f32 = 0.3;
const SHOOTING_RATE: f32 = 60.0;

/// Per-frame update of the four spread factors. Velocity maps linearly from
/// planar speed; the rest exponentially approach their per-condition
/// targets.
pub(crate) fn update_spread(state: &mut GameState, delta_time: f32) {
    for (_entity, (spread, kinematics, combat)) in
        state
            .world
            .query_mut::<(&mut CrosshairSpread, &Kinematics, &CombatController)>()
    {
        spread.velocity_factor =
            map_range_clamped(kinematics.planar_speed(), 0.0, WALK_SPEED_MAX, 0.0, 1.0);

        spread.in_air_factor = if !kinematics.grounded {
            // Spread slowly while airborne, shrink fast on landing.
            interp_to(spread.in_air_factor, IN_AIR_TARGET, delta_time, IN_AIR_SPREAD_RATE)
        } else {
            interp_to(spread.in_air_factor, 0.0, delta_time, IN_AIR_SHRINK_RATE)
        };

        spread.aim_factor = if combat.aiming {
            interp_to(spread.aim_factor, AIM_TARGET, delta_time, AIM_RATE)
        } else {
            interp_to(spread.aim_factor, 0.0, delta_time, AIM_RATE)
        };

        spread.shooting_factor = if spread.firing_window {
            interp_to(spread.shooting_factor, SHOOTING_TARGET, delta_time, SHOOTING_RATE)
        } else {
            interp_to(spread.shooting_factor, 0.0, delta_time, SHOOTING_RATE)
        };
    }
}

/// Opens the post-shot window during which the shooting factor grows.
pub(crate) fn start_crosshair_bullet_fire(state: &mut GameState, character: Entity) {
    let shoot_window = state
        .world
        .get::<&CombatController>(character)
        .map(|combat| combat.timings.shoot_window)
        .unwrap_or(0.05);

    let Ok(mut spread) = state.world.get::<&mut CrosshairSpread>(character) else {
        return;
    };
    spread.firing_window = true;
    if let Some(timer) = spread.shoot_timer.take() {
        state.scheduler.cancel(timer);
    }
    spread.shoot_timer = Some(
        state
            .scheduler
            .schedule_once(shoot_window, TimerAction::FinishCrosshairFire(character)),
    );
}

pub(crate) fn finish_crosshair_fire(state: &mut GameState, character: Entity) {
    let Ok(mut spread) = state.world.get::<&mut CrosshairSpread>(character) else {
        return;
    };
    spread.firing_window = false;
    spread.shoot_timer = None;
}
