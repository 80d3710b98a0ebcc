use glam::Vec3;
use hecs::Entity;

use crate::{
    engine::{
        game_state::GameState,
        services::{Services, TraceService},
    },
    entities,
    registry::{
        ammo::AMMO_9MM_ID,
        curves::RegistryCurves,
        enemies::GRUX_ID,
        weapons::{ASSAULT_RIFLE_ID, SUBMACHINE_GUN_ID},
    },
    systems,
    test_utils::recording::{PresentationLog, RecordingPresentation, StubTrace, TraceScript},
};

/// Headless game state: no geometry, built-in curves, no presentation.
pub fn game_state() -> GameState {
    GameState::headless()
}

/// Game state that records every presentation hook call.
pub fn recording_game_state() -> (GameState, PresentationLog) {
    let (presentation, log) = RecordingPresentation::new();
    let (trace, _) = StubTrace::miss();
    let state = GameState::new(Services::new(
        Box::new(trace),
        Box::new(RegistryCurves),
        Box::new(presentation),
    ));
    (state, log)
}

/// Game state with a scriptable trace in addition to the recording
/// presentation.
pub fn traced_game_state(trace: StubTrace) -> (GameState, PresentationLog) {
    let (presentation, log) = RecordingPresentation::new();
    let state = GameState::new(Services::new(
        Box::new(trace),
        Box::new(RegistryCurves),
        Box::new(presentation),
    ));
    (state, log)
}

/// Game state whose every trace hits a fixed wall 1000 units down +X.
pub fn walled_game_state() -> (GameState, PresentationLog, TraceScript) {
    let (trace, script) = StubTrace::hit_at(Vec3::new(1000.0, 0.0, 0.0));
    let (state, log) = traced_game_state(trace);
    (state, log, script)
}

pub fn character(state: &mut GameState) -> Entity {
    entities::character::spawn_character(state, Vec3::ZERO)
}

/// A character with an equipped submachine gun, ready to fire.
pub fn character_with_smg(state: &mut GameState) -> (Entity, Entity) {
    let character = entities::character::spawn_character(state, Vec3::ZERO);
    let weapon = smg(state, Vec3::ZERO);
    systems::combat::equip_weapon(state, character, weapon);
    (character, weapon)
}

pub fn smg(state: &mut GameState, location: Vec3) -> Entity {
    entities::weapon::spawn_weapon_by_id(state, &SUBMACHINE_GUN_ID, location)
        .expect("built-in weapon row")
}

pub fn rifle(state: &mut GameState, location: Vec3) -> Entity {
    entities::weapon::spawn_weapon_by_id(state, &ASSAULT_RIFLE_ID, location)
        .expect("built-in weapon row")
}

pub fn ammo_box_9mm(state: &mut GameState, location: Vec3) -> Entity {
    entities::ammo::spawn_ammo_by_id(state, &AMMO_9MM_ID, location).expect("built-in ammo row")
}

pub fn grunt(state: &mut GameState, location: Vec3) -> Entity {
    entities::enemy::spawn_enemy_by_id(state, &GRUX_ID, location, [Vec3::X * 100.0, Vec3::Y * 100.0])
        .expect("built-in enemy row")
}

/// Boxed scriptable trace plus its handle, for tests that build their own
/// services.
pub fn scripted_trace() -> (Box<dyn TraceService>, TraceScript) {
    let (trace, script) = StubTrace::miss();
    (Box::new(trace), script)
}
