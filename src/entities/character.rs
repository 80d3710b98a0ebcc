use glam::Vec3;
use hecs::Entity;

use crate::{
    components::{
        ammo::{AmmoReserve, AmmoType},
        combat::CombatController,
        crosshair::CrosshairSpread,
        health::Health,
        item::ItemFocus,
        spatial::{CameraRig, Kinematics, Transform},
    },
    engine::game_state::GameState,
    registry::weapons::SUBMACHINE_GUN_ID,
    systems,
};

pub const STARTING_9MM_AMMO: u32 = 75;
pub const STARTING_AR_AMMO: u32 = 120;
pub const CHARACTER_MAX_HEALTH: f32 = 100.0;
/// Camera height above the character's feet.
const CAMERA_HEIGHT: f32 = 70.0;

#[derive(Debug, Clone, Copy, Default)]
pub struct CharacterTag;

pub fn spawn_character(state: &mut GameState, location: Vec3) -> Entity {
    state.world.spawn((
        CharacterTag,
        Transform::from_translation(location),
        CameraRig {
            location: location + Vec3::Z * CAMERA_HEIGHT,
            yaw: 0.0,
            pitch: 0.0,
        },
        Kinematics::default(),
        Health::new(CHARACTER_MAX_HEALTH),
        CombatController::default(),
        AmmoReserve::new(&[
            (AmmoType::NineMm, STARTING_9MM_AMMO),
            (AmmoType::AssaultRifle, STARTING_AR_AMMO),
        ]),
        CrosshairSpread::default(),
        ItemFocus::default(),
    ))
}

/// Spawns a character already holding the default submachine gun, the way a
/// freshly placed player starts.
pub fn spawn_character_with_default_weapon(state: &mut GameState, location: Vec3) -> Entity {
    let character = spawn_character(state, location);
    if let Some(weapon) = crate::entities::weapon::spawn_weapon_by_id(state, &SUBMACHINE_GUN_ID, location)
    {
        systems::combat::equip_weapon(state, character, weapon);
    }
    character
}
