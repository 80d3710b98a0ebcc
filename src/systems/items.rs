use glam::Vec3;
use hecs::Entity;
use tracing::debug;

use crate::{
    components::{
        ammo::{Ammo, AmmoReserve},
        combat::{CombatController, CombatState},
        item::{EquipInterp, Item, ItemFocus, ItemState},
        spatial::{CameraRig, Transform},
        weapon::Weapon,
    },
    engine::{game_state::GameState, scheduler::TimerAction},
    registry::curves::{ITEM_SCALE_CURVE_ID, ITEM_Z_CURVE_ID},
    systems::{
        self,
        helpers::{get_component, get_component_mut},
    },
    utils::math::interp_to,
};

/// Duration of the pickup interpolation; matches the item Z curve's domain.
pub const Z_CURVE_TIME: f32 = 0.7;
/// Camera-relative anchor the item flies to.
pub const CAMERA_INTERP_DISTANCE: f32 = 250.0;
pub const CAMERA_INTERP_ELEVATION: f32 = 65.0;
/// Exponential smoothing rate for the item's X/Y while interping.
const ITEM_INTERP_SPEED: f32 = 30.0;
/// Range of the crosshair trace that surfaces pickup widgets.
const ITEM_TRACE_RANGE: f32 = 50_000.0;

/// Atomically sets the item's state and re-applies that state's
/// visibility/collision/physics policy. Safe to call with the current state;
/// the policy application repeats without side effects.
pub fn set_item_state(state: &mut GameState, item: Entity, new_state: ItemState) {
    {
        let Ok(mut item_comp) = state.world.get::<&mut Item>(item) else {
            return;
        };
        debug!(?item, from = %item_comp.state(), to = %new_state, "item state change");
        item_comp.set_state(new_state);
    }
    state
        .services
        .presentation
        .set_item_visual(item, new_state.policy());
}

/// The point in front of the camera where interping items come to rest.
pub fn camera_interp_target(state: &GameState, character: Entity) -> Option<Vec3> {
    let camera = state.world.get::<&CameraRig>(character).ok()?;
    Some(
        camera.location
            + camera.forward() * CAMERA_INTERP_DISTANCE
            + camera.up() * CAMERA_INTERP_ELEVATION,
    )
}

/// Begins flying `item` from the world into `character`'s hands. Returns
/// false (and changes nothing) unless the item is an idle world pickup.
pub fn start_equip_interp(state: &mut GameState, item: Entity, character: Entity) -> bool {
    if !state.world.contains(character) {
        return false;
    }
    {
        let Ok(item_comp) = state.world.get::<&Item>(item) else {
            return false;
        };
        if item_comp.state() != ItemState::Pickup {
            debug!(?item, state = %item_comp.state(), "ignoring pickup of non-idle item");
            return false;
        }
    }
    {
        let Ok(interp) = state.world.get::<&EquipInterp>(item) else {
            return false;
        };
        if interp.interping {
            return false;
        }
    }

    let camera_yaw = match state.world.get::<&CameraRig>(character) {
        Ok(camera) => camera.yaw,
        Err(_) => return false,
    };
    let (start_location, item_yaw) = {
        let transform = get_component::<Transform>(&state.world, item);
        (transform.translation, transform.yaw)
    };

    {
        let mut interp = get_component_mut::<EquipInterp>(&mut state.world, item);
        interp.interping = true;
        interp.start_location = start_location;
        interp.elapsed = 0.0;
        interp.yaw_offset = item_yaw - camera_yaw;
        interp.character = Some(character);
        if let Some(timer) = interp.timer.take() {
            state.scheduler.cancel(timer);
        }
        interp.timer = Some(
            state
                .scheduler
                .schedule_once(Z_CURVE_TIME, TimerAction::FinishItemInterp(item)),
        );
    }

    set_item_state(state, item, ItemState::EquipInterping);

    let pickup_sound = state
        .world
        .get::<&Item>(item)
        .ok()
        .and_then(|i| i.pickup_sound.clone());
    if let Some(sound) = pickup_sound {
        state.services.presentation.play_sound(&sound);
    }
    true
}

/// Per-frame curve-driven motion for every interping item.
pub(crate) fn update_equip_interps(state: &mut GameState, delta_time: f32) {
    let interping: Vec<(Entity, Option<Entity>)> = state
        .world
        .query::<&EquipInterp>()
        .iter()
        .filter(|(_, interp)| interp.interping)
        .map(|(entity, interp)| (entity, interp.character))
        .collect();

    for (item, character) in interping {
        update_item_interp(state, item, character, delta_time);
    }
}

fn update_item_interp(
    state: &mut GameState,
    item: Entity,
    character: Option<Entity>,
    delta_time: f32,
) {
    // With no live character there is no target; the finish timer will still
    // fire and clear the transient state.
    let Some(character) = character else { return };
    if !state.world.contains(character) {
        return;
    }
    let Some(target) = camera_interp_target(state, character) else {
        return;
    };
    let camera_yaw = match state.world.get::<&CameraRig>(character) {
        Ok(camera) => camera.yaw,
        Err(_) => return,
    };

    let (elapsed, start_location, yaw_offset) = {
        let mut interp = get_component_mut::<EquipInterp>(&mut state.world, item);
        interp.elapsed += delta_time;
        (interp.elapsed, interp.start_location, interp.yaw_offset)
    };

    let curve_value = state
        .services
        .curves
        .sample(&ITEM_Z_CURVE_ID, elapsed)
        .unwrap_or(0.0);
    let scale = state.services.curves.sample(&ITEM_SCALE_CURVE_ID, elapsed);

    let mut transform = get_component_mut::<Transform>(&mut state.world, item);
    let location = transform.translation;
    transform.translation = Vec3::new(
        interp_to(location.x, target.x, delta_time, ITEM_INTERP_SPEED),
        interp_to(location.y, target.y, delta_time, ITEM_INTERP_SPEED),
        // Height is driven by the curve alone, not smoothed.
        start_location.z + curve_value * (target.z - start_location.z),
    );
    transform.yaw = camera_yaw + yaw_offset;
    transform.pitch = 0.0;
    transform.roll = 0.0;
    if let Some(scale) = scale {
        transform.scale = scale;
    }
}

/// Ends the interpolation and hands the item to its character. Guarded: a
/// second call (or a stale timer) is a no-op, so delivery happens at most
/// once per interpolation.
pub fn finish_equip_interp(state: &mut GameState, item: Entity) {
    let character = {
        let Ok(mut interp) = state.world.get::<&mut EquipInterp>(item) else {
            return;
        };
        if !interp.interping {
            return;
        }
        interp.interping = false;
        interp.elapsed = 0.0;
        interp.timer = None;
        interp.character.take()
    };

    if let Ok(mut transform) = state.world.get::<&mut Transform>(item) {
        transform.scale = 1.0;
    }

    match character {
        Some(character) if state.world.contains(character) => {
            set_item_state(state, item, ItemState::PickedUp);
            get_pickup_item(state, character, item);
        }
        _ => {
            // Owner vanished mid-flight; put the item back into the world.
            debug!(?item, "interp finished without a live character");
            set_item_state(state, item, ItemState::Pickup);
        }
    }
}

/// Delivery point for a finished interpolation: the single place where a
/// picked-up item mutates inventory or the equip slot.
pub fn get_pickup_item(state: &mut GameState, character: Entity, item: Entity) {
    if state.world.get::<&Weapon>(item).is_ok() {
        let unoccupied = state
            .world
            .get::<&CombatController>(character)
            .map(|combat| combat.state == CombatState::Unoccupied)
            .unwrap_or(false);
        if unoccupied {
            systems::combat::swap_weapon(state, character, item);
        } else {
            // Combat slot is busy; hold the weapon until it frees up.
            debug!(?item, "deferring weapon pickup until unoccupied");
            get_component_mut::<CombatController>(&mut state.world, character).pending_pickup =
                Some(item);
        }
    } else if state.world.get::<&Ammo>(item).is_ok() {
        pickup_ammo(state, character, item);
    }
}

/// Folds an ammo pickup into the reserve and removes it from the world.
fn pickup_ammo(state: &mut GameState, character: Entity, item: Entity) {
    let Ok(ammo) = state.world.get::<&Ammo>(item).map(|a| *a) else {
        return;
    };
    let equip_sound = state
        .world
        .get::<&Item>(item)
        .ok()
        .and_then(|i| i.equip_sound.clone());

    get_component_mut::<AmmoReserve>(&mut state.world, character).add(ammo.ammo_type, ammo.count);
    if let Some(sound) = equip_sound {
        state.services.presentation.play_sound(&sound);
    }

    let should_reload = {
        let combat = get_component::<CombatController>(&state.world, character);
        combat
            .equipped_weapon
            .and_then(|weapon| state.world.get::<&Weapon>(weapon).ok())
            .map(|weapon| weapon.ammo() == 0 && weapon.ammo_type == ammo.ammo_type)
            .unwrap_or(false)
    };

    state.services.presentation.despawn_visual(item);
    let _ = state.world.despawn(item);

    // Topping up an empty weapon of the matching type reloads right away.
    if should_reload {
        systems::combat::reload_weapon(state, character);
    }
}

/// Adjusts the count of pickup overlap volumes the character stands in;
/// leaving the last one stops the per-frame item trace.
pub fn increment_overlapped_count(state: &mut GameState, character: Entity, amount: i32) {
    let Ok(mut focus) = state.world.get::<&mut ItemFocus>(character) else {
        return;
    };
    focus.overlapped_count = (focus.overlapped_count + amount).max(0);
    focus.should_trace = focus.overlapped_count > 0;
}

/// Interact input: starts the pickup interpolation on the focused item.
pub fn select_button_pressed(state: &mut GameState, character: Entity) {
    let focused = state
        .world
        .get::<&ItemFocus>(character)
        .ok()
        .and_then(|focus| focus.focused);
    if let Some(item) = focused {
        start_equip_interp(state, item, character);
    }
}

/// Per-frame crosshair trace that shows the pickup widget of the item the
/// character is looking at, hiding the previous one on focus change.
pub(crate) fn trace_for_items(state: &mut GameState) {
    let characters: Vec<(Entity, bool, Option<Entity>, Vec3, Vec3)> = state
        .world
        .query::<(&ItemFocus, &CameraRig)>()
        .iter()
        .map(|(entity, (focus, camera))| {
            (
                entity,
                focus.should_trace,
                focus.focused,
                camera.location,
                camera.forward(),
            )
        })
        .collect();

    for (character, should_trace, focused, origin, direction) in characters {
        let mut new_focus = None;
        if should_trace
            && let Some(hit) = state
                .services
                .trace
                .trace_ray(origin, direction, ITEM_TRACE_RANGE)
            && let Some(entity) = hit.entity
        {
            let is_world_pickup = state
                .world
                .get::<&Item>(entity)
                .map(|item| item.state() == ItemState::Pickup)
                .unwrap_or(false);
            if is_world_pickup {
                new_focus = Some(entity);
            }
        }

        if new_focus != focused {
            if let Some(previous) = focused {
                state.services.presentation.hide_pickup_widget(previous);
            }
            if let Some(current) = new_focus {
                state.services.presentation.show_pickup_widget(current);
            }
            get_component_mut::<ItemFocus>(&mut state.world, character).focused = new_focus;
        }
    }
}
