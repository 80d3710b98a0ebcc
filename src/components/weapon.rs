use serde::{Deserialize, Serialize};
use strum::Display;
use tracing::warn;

use crate::{
    components::{
        ammo::AmmoType,
        id::{MontageSectionId, ParticleId, SoundId},
    },
    engine::scheduler::TimerToken,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaponKind {
    SubmachineGun,
    AssaultRifle,
}

/// Firearm state layered on top of an `Item`. Ammo obeys
/// `0 <= ammo <= magazine_capacity` at all times; the two mutators below are
/// the only way the count changes.
#[derive(Debug, Clone)]
pub struct Weapon {
    pub kind: WeaponKind,
    ammo: u32,
    magazine_capacity: u32,
    pub ammo_type: AmmoType,
    pub automatic: bool,
    /// Shots per second; the fire-rate timer runs for `1 / fire_rate`.
    pub fire_rate: f32,
    pub damage: f32,
    pub reload_section: MontageSectionId,
    pub fire_sound: Option<SoundId>,
    pub muzzle_flash: Option<ParticleId>,
    pub impact_particles: Option<ParticleId>,
    pub beam_particles: Option<ParticleId>,
    pub(crate) falling: bool,
    pub(crate) settle_timer: Option<TimerToken>,
    pub(crate) pulse_timer: Option<TimerToken>,
}

impl Weapon {
    pub fn new(
        kind: WeaponKind,
        ammo_type: AmmoType,
        ammo: u32,
        magazine_capacity: u32,
        automatic: bool,
        fire_rate: f32,
        damage: f32,
        reload_section: MontageSectionId,
    ) -> Self {
        debug_assert!(magazine_capacity > 0, "magazine capacity must be positive");
        debug_assert!(fire_rate > 0.0, "fire rate must be positive");
        Self {
            kind,
            ammo: ammo.min(magazine_capacity),
            magazine_capacity,
            ammo_type,
            automatic,
            fire_rate,
            damage,
            reload_section,
            fire_sound: None,
            muzzle_flash: None,
            impact_particles: None,
            beam_particles: None,
            falling: false,
            settle_timer: None,
            pulse_timer: None,
        }
    }

    pub fn ammo(&self) -> u32 {
        self.ammo
    }

    pub fn magazine_capacity(&self) -> u32 {
        self.magazine_capacity
    }

    pub fn magazine_space(&self) -> u32 {
        self.magazine_capacity - self.ammo
    }

    pub fn is_falling(&self) -> bool {
        self.falling
    }

    /// Called once per shot. Saturates at zero; refusing to fire an empty
    /// weapon is the caller's job, not this counter's.
    pub fn decrement_ammo(&mut self) {
        self.ammo = self.ammo.saturating_sub(1);
    }

    /// Adds `amount` rounds. Exceeding the magazine is a caller bug: fatal
    /// in debug builds, clamped with a warning in release builds.
    pub fn reload_ammo(&mut self, amount: u32) {
        debug_assert!(
            self.ammo + amount <= self.magazine_capacity,
            "reload of {amount} rounds exceeds magazine capacity ({}/{})",
            self.ammo,
            self.magazine_capacity
        );
        if self.ammo + amount > self.magazine_capacity {
            warn!(
                ammo = self.ammo,
                amount,
                capacity = self.magazine_capacity,
                "reload exceeds magazine capacity; clamping"
            );
            self.ammo = self.magazine_capacity;
        } else {
            self.ammo += amount;
        }
    }

    pub fn clip_is_full(&self) -> bool {
        self.ammo >= self.magazine_capacity
    }
}
