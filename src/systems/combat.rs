use glam::Vec3;
use hecs::{Entity, World};
use rand::Rng;
use tracing::debug;

use crate::{
    components::{
        ammo::AmmoReserve,
        combat::{CombatController, CombatState},
        crosshair::CrosshairSpread,
        enemy::Enemy,
        id::MontageSectionId,
        item::{Item, ItemState},
        spatial::{CameraRig, Transform},
        weapon::Weapon,
    },
    engine::{game_state::GameState, scheduler::TimerAction},
    systems::{self, helpers::get_component_mut, items::set_item_state},
};

/// Range of the crosshair aim trace.
const WEAPON_TRACE_RANGE: f32 = 50_000.0;
/// Barrel approximation relative to the character's pose.
const MUZZLE_FORWARD_OFFSET: f32 = 60.0;
const MUZZLE_HEIGHT_OFFSET: f32 = 50.0;
/// The muzzle trace overshoots the aim point so near-miss geometry behind it
/// still blocks the beam.
const BEAM_OVERSHOOT: f32 = 1.25;

pub const HIP_FIRE_SECTION: &str = "StartFire";
pub const EQUIP_SECTION: &str = "Equip";
pub const CHARACTER_HIT_REACT_SECTION: &str = "HitReactFront";

pub fn weapon_has_ammo(world: &World, character: Entity) -> bool {
    let Ok(combat) = world.get::<&CombatController>(character) else {
        return false;
    };
    let Some(weapon) = combat.equipped_weapon else {
        return false;
    };
    world
        .get::<&Weapon>(weapon)
        .map(|weapon| weapon.ammo() > 0)
        .unwrap_or(false)
}

pub fn carrying_ammo(world: &World, character: Entity) -> bool {
    let Ok(combat) = world.get::<&CombatController>(character) else {
        return false;
    };
    let Some(weapon) = combat.equipped_weapon else {
        return false;
    };
    let Ok(weapon) = world.get::<&Weapon>(weapon) else {
        return false;
    };
    world
        .get::<&AmmoReserve>(character)
        .map(|reserve| reserve.carried(weapon.ammo_type) > 0)
        .unwrap_or(false)
}

/// Fires one shot: feedback, the two-stage hit trace, the ammo decrement and
/// the fire-rate timer. A no-op unless the character is unoccupied with a
/// loaded weapon.
pub fn fire_weapon(state: &mut GameState, character: Entity) {
    let weapon = {
        let Ok(combat) = state.world.get::<&CombatController>(character) else {
            return;
        };
        if combat.state != CombatState::Unoccupied {
            return;
        }
        let Some(weapon) = combat.equipped_weapon else {
            return;
        };
        weapon
    };
    if !weapon_has_ammo(&state.world, character) {
        return;
    }

    let fire_sound = state
        .world
        .get::<&Weapon>(weapon)
        .ok()
        .and_then(|w| w.fire_sound.clone());
    if let Some(sound) = fire_sound {
        state.services.presentation.play_sound(&sound);
    }

    send_bullet(state, character, weapon);

    state
        .services
        .presentation
        .play_montage_section(character, &MontageSectionId::from_str(HIP_FIRE_SECTION));
    systems::crosshair::start_crosshair_bullet_fire(state, character);

    get_component_mut::<Weapon>(&mut state.world, weapon).decrement_ammo();
    start_fire_timer(state, character, weapon);
}

/// Two-stage hit trace: the crosshair ray finds the aim point, then a
/// muzzle ray toward it finds the authoritative impact. Hitting an enemy
/// routes damage and hit feedback to it.
fn send_bullet(state: &mut GameState, character: Entity, weapon: Entity) {
    let Ok(camera) = state.world.get::<&CameraRig>(character).map(|c| *c) else {
        return;
    };
    let muzzle = {
        let Ok(transform) = state.world.get::<&Transform>(character) else {
            return;
        };
        transform.translation
            + transform.forward() * MUZZLE_FORWARD_OFFSET
            + Vec3::Z * MUZZLE_HEIGHT_OFFSET
    };

    let (muzzle_flash, impact_particles, beam_particles, damage) = {
        let Ok(weapon_comp) = state.world.get::<&Weapon>(weapon) else {
            return;
        };
        (
            weapon_comp.muzzle_flash.clone(),
            weapon_comp.impact_particles.clone(),
            weapon_comp.beam_particles.clone(),
            weapon_comp.damage,
        )
    };

    if let Some(particles) = muzzle_flash {
        state.services.presentation.spawn_particles(&particles, muzzle);
    }

    let (beam_end, hit_entity) = beam_end_location(state, muzzle, &camera);

    if let Some(particles) = impact_particles {
        state
            .services
            .presentation
            .spawn_particles(&particles, beam_end);
    }
    if let Some(particles) = beam_particles {
        state
            .services
            .presentation
            .spawn_beam(&particles, muzzle, beam_end);
    }

    if let Some(target) = hit_entity
        && state.world.get::<&Enemy>(target).is_ok()
    {
        systems::enemy::bullet_hit(state, target, beam_end);
        systems::enemy::take_damage(state, target, damage, Some(character));
    }
}

fn beam_end_location(state: &GameState, muzzle: Vec3, camera: &CameraRig) -> (Vec3, Option<Entity>) {
    // Stage 1: crosshair trace outward for the tentative aim point.
    let mut end = camera.location + camera.forward() * WEAPON_TRACE_RANGE;
    if let Some(hit) = state
        .services
        .trace
        .trace_ray(camera.location, camera.forward(), WEAPON_TRACE_RANGE)
    {
        end = hit.location;
    }

    // Stage 2: muzzle trace toward the aim point; anything it hits earlier
    // is the real impact.
    let to_end = end - muzzle;
    let distance = to_end.length() * BEAM_OVERSHOOT;
    let mut hit_entity = None;
    if distance > f32::EPSILON
        && let Some(hit) = state
            .services
            .trace
            .trace_ray(muzzle, to_end.normalize(), distance)
    {
        end = hit.location;
        hit_entity = hit.entity;
    }
    (end, hit_entity)
}

fn start_fire_timer(state: &mut GameState, character: Entity, weapon: Entity) {
    let fire_rate = state
        .world
        .get::<&Weapon>(weapon)
        .map(|w| w.fire_rate)
        .unwrap_or(0.0);
    let delay = if fire_rate > 0.0 { 1.0 / fire_rate } else { 0.0 };

    let mut combat = get_component_mut::<CombatController>(&mut state.world, character);
    combat.state = CombatState::FireTimerInProgress;
    if let Some(timer) = combat.fire_timer.take() {
        state.scheduler.cancel(timer);
    }
    combat.fire_timer = Some(
        state
            .scheduler
            .schedule_once(delay, TimerAction::AutoFireReset(character)),
    );
}

/// Fire-rate timer: back to Unoccupied, then either keep the automatic
/// cadence going or reload an empty clip.
pub(crate) fn auto_fire_reset(state: &mut GameState, character: Entity) {
    {
        let Ok(mut combat) = state.world.get::<&mut CombatController>(character) else {
            return;
        };
        if combat.state != CombatState::FireTimerInProgress {
            return;
        }
        combat.state = CombatState::Unoccupied;
        combat.fire_timer = None;
    }
    drain_pending_pickup(state, character);

    if weapon_has_ammo(&state.world, character) {
        let (button_held, automatic) = {
            let Ok(combat) = state.world.get::<&CombatController>(character) else {
                return;
            };
            let automatic = combat
                .equipped_weapon
                .and_then(|weapon| state.world.get::<&Weapon>(weapon).ok())
                .map(|weapon| weapon.automatic)
                .unwrap_or(false);
            (combat.fire_button_pressed, automatic)
        };
        if button_held && automatic {
            fire_weapon(state, character);
        }
    } else {
        reload_weapon(state, character);
    }
}

/// Starts a reload if the character is idle, armed and carrying compatible
/// ammo; otherwise does nothing.
pub fn reload_weapon(state: &mut GameState, character: Entity) {
    let (weapon, reload_time) = {
        let Ok(combat) = state.world.get::<&CombatController>(character) else {
            return;
        };
        if combat.state != CombatState::Unoccupied {
            return;
        }
        let Some(weapon) = combat.equipped_weapon else {
            return;
        };
        (weapon, combat.timings.reload_time)
    };
    if !carrying_ammo(&state.world, character) {
        return;
    }
    let Ok(section) = state
        .world
        .get::<&Weapon>(weapon)
        .map(|w| w.reload_section.clone())
    else {
        return;
    };

    {
        let mut combat = get_component_mut::<CombatController>(&mut state.world, character);
        combat.state = CombatState::Reloading;
        if let Some(timer) = combat.reload_timer.take() {
            state.scheduler.cancel(timer);
        }
        combat.reload_timer = Some(
            state
                .scheduler
                .schedule_once(reload_time, TimerAction::FinishReloading(character)),
        );
    }
    state
        .services
        .presentation
        .play_montage_section(character, &section);
}

/// Reload timer: moves ammo from the reserve into the magazine. This is the
/// only place ammo crosses between the two pools. The weapon is re-checked
/// here; dropping it mid-reload leaves both pools untouched.
pub(crate) fn finish_reloading(state: &mut GameState, character: Entity) {
    {
        let Ok(mut combat) = state.world.get::<&mut CombatController>(character) else {
            return;
        };
        if combat.state != CombatState::Reloading {
            return;
        }
        combat.state = CombatState::Unoccupied;
        combat.reload_timer = None;
    }

    let weapon = state
        .world
        .get::<&CombatController>(character)
        .ok()
        .and_then(|combat| combat.equipped_weapon);
    if let Some(weapon) = weapon
        && let Ok((ammo_type, space)) = state
            .world
            .get::<&Weapon>(weapon)
            .map(|w| (w.ammo_type, w.magazine_space()))
    {
        // Take what fits; `take_up_to` caps at what is actually carried.
        let taken =
            get_component_mut::<AmmoReserve>(&mut state.world, character).take_up_to(ammo_type, space);
        if taken > 0 {
            get_component_mut::<Weapon>(&mut state.world, weapon).reload_ammo(taken);
        }
        debug!(?character, %ammo_type, taken, "reload complete");
    }

    drain_pending_pickup(state, character);
}

/// Attaches `weapon` as the equipped weapon, replacing the slot atomically.
pub fn equip_weapon(state: &mut GameState, character: Entity, weapon: Entity) {
    if state.world.get::<&Weapon>(weapon).is_err() {
        return;
    }
    state.services.presentation.attach_to_hand(character, weapon);
    {
        let Ok(mut combat) = state.world.get::<&mut CombatController>(character) else {
            return;
        };
        combat.equipped_weapon = Some(weapon);
    }
    set_item_state(state, weapon, ItemState::Equipped);

    let equip_sound = state
        .world
        .get::<&Item>(weapon)
        .ok()
        .and_then(|item| item.equip_sound.clone());
    if let Some(sound) = equip_sound {
        state.services.presentation.play_sound(&sound);
    }
}

/// Detaches and throws the equipped weapon, leaving the slot empty.
pub fn drop_weapon(state: &mut GameState, character: Entity) {
    let weapon = {
        let Ok(mut combat) = state.world.get::<&mut CombatController>(character) else {
            return;
        };
        combat.equipped_weapon.take()
    };
    let Some(weapon) = weapon else { return };
    state.services.presentation.detach(weapon);
    systems::weapons::throw_weapon(state, weapon);
}

/// Drop the old weapon, equip the new one. Coming from a pickup delivery the
/// equip animation briefly occupies the combat slot.
pub fn swap_weapon(state: &mut GameState, character: Entity, new_weapon: Entity) {
    drop_weapon(state, character);
    equip_weapon(state, character, new_weapon);

    let entered_equipping = {
        let Ok(mut combat) = state.world.get::<&mut CombatController>(character) else {
            return;
        };
        if combat.state == CombatState::Unoccupied {
            let equip_time = combat.timings.equip_time;
            combat.state = CombatState::Equipping;
            if let Some(timer) = combat.equip_timer.take() {
                state.scheduler.cancel(timer);
            }
            combat.equip_timer = Some(
                state
                    .scheduler
                    .schedule_once(equip_time, TimerAction::FinishEquipping(character)),
            );
            true
        } else {
            false
        }
    };
    if entered_equipping {
        state
            .services
            .presentation
            .play_montage_section(character, &MontageSectionId::from_str(EQUIP_SECTION));
    }
}

pub(crate) fn finish_equipping(state: &mut GameState, character: Entity) {
    {
        let Ok(mut combat) = state.world.get::<&mut CombatController>(character) else {
            return;
        };
        if combat.state != CombatState::Equipping {
            return;
        }
        combat.state = CombatState::Unoccupied;
        combat.equip_timer = None;
    }
    drain_pending_pickup(state, character);
}

/// Applies a deferred weapon pickup once the combat slot is free again.
pub(crate) fn drain_pending_pickup(state: &mut GameState, character: Entity) {
    let pending = {
        let Ok(mut combat) = state.world.get::<&mut CombatController>(character) else {
            return;
        };
        if combat.state != CombatState::Unoccupied {
            return;
        }
        combat.pending_pickup.take()
    };
    if let Some(item) = pending
        && state.world.contains(item)
    {
        systems::items::get_pickup_item(state, character, item);
    }
}

/// Rolls the character's stun resist; on a failed resist the combat slot is
/// seized for a fixed stun window and any in-flight action is abandoned.
pub fn stun_character(state: &mut GameState, character: Entity) {
    let stun_chance = {
        let Ok(combat) = state.world.get::<&CombatController>(character) else {
            return;
        };
        combat.stun_chance
    };
    if rand::rng().random::<f32>() >= stun_chance {
        return;
    }
    apply_stun(state, character);
}

pub(crate) fn apply_stun(state: &mut GameState, character: Entity) {
    {
        let Ok(mut combat) = state.world.get::<&mut CombatController>(character) else {
            return;
        };
        let stun_time = combat.timings.stun_time;
        for timer in [
            combat.fire_timer.take(),
            combat.reload_timer.take(),
            combat.equip_timer.take(),
            combat.stun_timer.take(),
        ]
        .into_iter()
        .flatten()
        {
            state.scheduler.cancel(timer);
        }
        combat.state = CombatState::Stunned;
        combat.stun_timer = Some(
            state
                .scheduler
                .schedule_once(stun_time, TimerAction::RecoverFromStun(character)),
        );
    }
    state.services.presentation.play_montage_section(
        character,
        &MontageSectionId::from_str(CHARACTER_HIT_REACT_SECTION),
    );
}

pub(crate) fn recover_from_stun(state: &mut GameState, character: Entity) {
    {
        let Ok(mut combat) = state.world.get::<&mut CombatController>(character) else {
            return;
        };
        if combat.state != CombatState::Stunned {
            return;
        }
        combat.state = CombatState::Unoccupied;
        combat.stun_timer = None;
    }
    drain_pending_pickup(state, character);
}

pub fn fire_button_pressed(state: &mut GameState, character: Entity) {
    if let Ok(mut combat) = state.world.get::<&mut CombatController>(character) {
        combat.fire_button_pressed = true;
    } else {
        return;
    }
    fire_weapon(state, character);
}

pub fn fire_button_released(state: &mut GameState, character: Entity) {
    if let Ok(mut combat) = state.world.get::<&mut CombatController>(character) {
        combat.fire_button_pressed = false;
    }
}

pub fn aiming_button_pressed(state: &mut GameState, character: Entity) {
    if let Ok(mut combat) = state.world.get::<&mut CombatController>(character) {
        combat.aiming = true;
    }
}

pub fn aiming_button_released(state: &mut GameState, character: Entity) {
    if let Ok(mut combat) = state.world.get::<&mut CombatController>(character) {
        combat.aiming = false;
    }
}

/// Reload input; same guards as `reload_weapon`.
pub fn reload_button_pressed(state: &mut GameState, character: Entity) {
    reload_weapon(state, character);
}

/// HUD read: the current crosshair spread multiplier.
pub fn crosshair_spread_multiplier(world: &World, character: Entity) -> f32 {
    world
        .get::<&CrosshairSpread>(character)
        .map(|spread| spread.multiplier())
        .unwrap_or(0.5)
}
