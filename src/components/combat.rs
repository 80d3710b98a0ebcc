use hecs::Entity;
use strum::Display;

use crate::{components::id::SoundId, engine::scheduler::TimerToken};

/// The character's exclusive combat activity slot. Exactly one state is
/// active; every combat command checks it before doing anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum CombatState {
    Unoccupied,
    FireTimerInProgress,
    Reloading,
    Equipping,
    Stunned,
}

/// Durations for the animation-driven combat windows. The host normally
/// derives these from montage lengths; tests override them freely.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CombatTimings {
    pub reload_time: f32,
    pub equip_time: f32,
    pub stun_time: f32,
    /// Post-shot window during which the crosshair shooting factor grows.
    pub shoot_window: f32,
}

impl Default for CombatTimings {
    fn default() -> Self {
        Self {
            reload_time: 2.2,
            equip_time: 1.4,
            stun_time: 1.0,
            shoot_window: 0.05,
        }
    }
}

/// Combat/ammo controller state for a character. Timer slots hold at most
/// one live token each; starting a slot cancels its predecessor.
#[derive(Debug, Clone)]
pub struct CombatController {
    pub(crate) state: CombatState,
    pub(crate) equipped_weapon: Option<Entity>,
    pub(crate) pending_pickup: Option<Entity>,
    pub fire_button_pressed: bool,
    pub aiming: bool,
    /// Chance in [0, 1] that a melee hit stuns this character.
    pub stun_chance: f32,
    pub timings: CombatTimings,
    pub melee_impact_sound: Option<SoundId>,
    pub(crate) fire_timer: Option<TimerToken>,
    pub(crate) reload_timer: Option<TimerToken>,
    pub(crate) equip_timer: Option<TimerToken>,
    pub(crate) stun_timer: Option<TimerToken>,
}

impl Default for CombatController {
    fn default() -> Self {
        Self {
            state: CombatState::Unoccupied,
            equipped_weapon: None,
            pending_pickup: None,
            fire_button_pressed: false,
            aiming: false,
            stun_chance: 0.25,
            timings: CombatTimings::default(),
            melee_impact_sound: None,
            fire_timer: None,
            reload_timer: None,
            equip_timer: None,
            stun_timer: None,
        }
    }
}

impl CombatController {
    pub fn state(&self) -> CombatState {
        self.state
    }

    pub fn equipped_weapon(&self) -> Option<Entity> {
        self.equipped_weapon
    }

    pub fn pending_pickup(&self) -> Option<Entity> {
        self.pending_pickup
    }

    pub fn is_unoccupied(&self) -> bool {
        self.state == CombatState::Unoccupied
    }
}
