use std::{collections::HashMap, sync::LazyLock};

use serde::{Deserialize, Serialize};

use crate::{
    components::{
        ammo::AmmoType,
        id::{MontageSectionId, ParticleId, SoundId, WeaponId},
        item::ItemRarity,
        weapon::WeaponKind,
    },
    registry::registry::{Registry, RegistryEntry},
};

/// Static weapon properties, loaded once when a weapon spawns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeaponRow {
    pub id: WeaponId,
    pub name: String,
    pub kind: WeaponKind,
    pub rarity: ItemRarity,
    pub ammo_type: AmmoType,
    pub ammo: u32,
    pub magazine_capacity: u32,
    pub automatic: bool,
    pub fire_rate: f32,
    pub damage: f32,
    pub reload_section: MontageSectionId,
    #[serde(default)]
    pub pickup_sound: Option<SoundId>,
    #[serde(default)]
    pub equip_sound: Option<SoundId>,
    #[serde(default)]
    pub fire_sound: Option<SoundId>,
    #[serde(default)]
    pub muzzle_flash: Option<ParticleId>,
    #[serde(default)]
    pub impact_particles: Option<ParticleId>,
    #[serde(default)]
    pub beam_particles: Option<ParticleId>,
}

impl RegistryEntry for WeaponRow {
    type Id = WeaponId;

    fn id(&self) -> Self::Id {
        self.id.clone()
    }
}

pub static SUBMACHINE_GUN_ID: LazyLock<WeaponId> =
    LazyLock::new(|| WeaponId::from_str("weapon.submachine_gun"));

static SUBMACHINE_GUN: LazyLock<WeaponRow> = LazyLock::new(|| WeaponRow {
    id: SUBMACHINE_GUN_ID.clone(),
    name: "Submachine Gun".to_string(),
    kind: WeaponKind::SubmachineGun,
    rarity: ItemRarity::Common,
    ammo_type: AmmoType::NineMm,
    ammo: 30,
    magazine_capacity: 30,
    automatic: true,
    fire_rate: 10.0,
    damage: 8.0,
    reload_section: MontageSectionId::from_str("ReloadSMG"),
    pickup_sound: Some(SoundId::from_str("sound.weapon_pickup")),
    equip_sound: Some(SoundId::from_str("sound.weapon_equip")),
    fire_sound: Some(SoundId::from_str("sound.smg_fire")),
    muzzle_flash: Some(ParticleId::from_str("particles.muzzle_flash")),
    impact_particles: Some(ParticleId::from_str("particles.impact")),
    beam_particles: Some(ParticleId::from_str("particles.smoke_beam")),
});

pub static ASSAULT_RIFLE_ID: LazyLock<WeaponId> =
    LazyLock::new(|| WeaponId::from_str("weapon.assault_rifle"));

static ASSAULT_RIFLE: LazyLock<WeaponRow> = LazyLock::new(|| WeaponRow {
    id: ASSAULT_RIFLE_ID.clone(),
    name: "Assault Rifle".to_string(),
    kind: WeaponKind::AssaultRifle,
    rarity: ItemRarity::Rare,
    ammo_type: AmmoType::AssaultRifle,
    ammo: 30,
    magazine_capacity: 30,
    automatic: true,
    fire_rate: 8.0,
    damage: 12.0,
    reload_section: MontageSectionId::from_str("ReloadAR"),
    pickup_sound: Some(SoundId::from_str("sound.weapon_pickup")),
    equip_sound: Some(SoundId::from_str("sound.weapon_equip")),
    fire_sound: Some(SoundId::from_str("sound.rifle_fire")),
    muzzle_flash: Some(ParticleId::from_str("particles.muzzle_flash")),
    impact_particles: Some(ParticleId::from_str("particles.impact")),
    beam_particles: Some(ParticleId::from_str("particles.smoke_beam")),
});

pub static WEAPON_REGISTRY: LazyLock<Registry<WeaponId, WeaponRow>> = LazyLock::new(|| Registry {
    entries: HashMap::from([
        (SUBMACHINE_GUN_ID.clone(), SUBMACHINE_GUN.clone()),
        (ASSAULT_RIFLE_ID.clone(), ASSAULT_RIFLE.clone()),
    ]),
});
