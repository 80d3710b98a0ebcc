use glam::{Quat, Vec3};
use hecs::{Entity, World};
use rand::Rng;

use crate::{
    components::{
        item::{Item, ItemState},
        spatial::Transform,
        weapon::Weapon,
    },
    engine::{game_state::GameState, scheduler::TimerAction},
    systems::{helpers::get_component_mut, items::set_item_state},
};

/// How long a thrown weapon stays in the Falling state before it settles.
pub const THROW_WEAPON_TIME: f32 = 0.7;
const THROW_IMPULSE: f32 = 2000.0;
/// Tilt of the throw direction below the horizontal right vector.
const THROW_TILT_DEGREES: f32 = -20.0;
/// Random yaw applied on top, so dropped weapons scatter.
const THROW_YAW_JITTER_DEGREES: f32 = 30.0;
/// Cadence of the idle glow pulse on settled pickups.
pub const PULSE_INTERVAL: f32 = 5.0;

/// Hurls the weapon out of the character's hands: a randomized impulse, the
/// Falling state, and a settle timer that returns it to Pickup.
pub fn throw_weapon(state: &mut GameState, weapon: Entity) {
    let impulse = {
        let Ok(mut transform) = state.world.get::<&mut Transform>(weapon) else {
            return;
        };
        transform.pitch = 0.0;
        transform.roll = 0.0;
        let forward = transform.forward();
        let right = transform.right();
        let tilted = Quat::from_axis_angle(forward, THROW_TILT_DEGREES.to_radians()) * right;
        let jitter = rand::rng().random_range(0.0..=THROW_YAW_JITTER_DEGREES);
        (Quat::from_axis_angle(Vec3::Z, jitter.to_radians()) * tilted) * THROW_IMPULSE
    };
    state.services.presentation.apply_impulse(weapon, impulse);

    {
        let mut weapon_comp = get_component_mut::<Weapon>(&mut state.world, weapon);
        weapon_comp.falling = true;
        if let Some(timer) = weapon_comp.settle_timer.take() {
            state.scheduler.cancel(timer);
        }
        weapon_comp.settle_timer = Some(
            state
                .scheduler
                .schedule_once(THROW_WEAPON_TIME, TimerAction::WeaponSettled(weapon)),
        );
        // Pulsing resumes once the weapon lands.
        if let Some(timer) = weapon_comp.pulse_timer.take() {
            state.scheduler.cancel(timer);
        }
    }

    set_item_state(state, weapon, ItemState::Falling);
    state.services.presentation.enable_glow(weapon);
}

/// Settle timer: the thrown weapon becomes a collectible pickup again and
/// starts pulsing its glow.
pub(crate) fn weapon_settled(state: &mut GameState, weapon: Entity) {
    {
        let Ok(mut weapon_comp) = state.world.get::<&mut Weapon>(weapon) else {
            return;
        };
        if !weapon_comp.falling {
            return;
        }
        weapon_comp.falling = false;
        weapon_comp.settle_timer = None;
        weapon_comp.pulse_timer = Some(
            state
                .scheduler
                .schedule_once(PULSE_INTERVAL, TimerAction::GlowPulse(weapon)),
        );
    }
    set_item_state(state, weapon, ItemState::Pickup);
}

/// Periodic glow pulse while the weapon sits in the world; stops re-arming
/// the moment the weapon leaves the Pickup state.
pub(crate) fn glow_pulse(state: &mut GameState, weapon: Entity) {
    let still_pickup = state
        .world
        .get::<&Item>(weapon)
        .map(|item| item.state() == ItemState::Pickup)
        .unwrap_or(false);

    let Ok(mut weapon_comp) = state.world.get::<&mut Weapon>(weapon) else {
        return;
    };
    if still_pickup {
        weapon_comp.pulse_timer = Some(
            state
                .scheduler
                .schedule_once(PULSE_INTERVAL, TimerAction::GlowPulse(weapon)),
        );
        drop(weapon_comp);
        state.services.presentation.pulse_glow(weapon);
    } else {
        weapon_comp.pulse_timer = None;
    }
}

/// Falling weapons stay upright: pitch and roll are zeroed every frame while
/// physics carries them.
pub(crate) fn keep_falling_upright(world: &mut World) {
    for (_entity, (weapon, transform)) in world.query_mut::<(&Weapon, &mut Transform)>() {
        if weapon.falling {
            transform.pitch = 0.0;
            transform.roll = 0.0;
        }
    }
}
