use std::{collections::HashMap, sync::LazyLock};

use serde::{Deserialize, Serialize};

use crate::{
    components::{
        ammo::AmmoType,
        id::{AmmoBoxId, SoundId},
        item::ItemRarity,
    },
    registry::registry::{Registry, RegistryEntry},
};

/// Static properties of a loose ammo pickup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmmoRow {
    pub id: AmmoBoxId,
    pub name: String,
    pub rarity: ItemRarity,
    pub ammo_type: AmmoType,
    pub count: u32,
    #[serde(default)]
    pub pickup_sound: Option<SoundId>,
    #[serde(default)]
    pub equip_sound: Option<SoundId>,
}

impl RegistryEntry for AmmoRow {
    type Id = AmmoBoxId;

    fn id(&self) -> Self::Id {
        self.id.clone()
    }
}

pub static AMMO_9MM_ID: LazyLock<AmmoBoxId> = LazyLock::new(|| AmmoBoxId::from_str("ammo.9mm"));

static AMMO_9MM: LazyLock<AmmoRow> = LazyLock::new(|| AmmoRow {
    id: AMMO_9MM_ID.clone(),
    name: "9mm Rounds".to_string(),
    rarity: ItemRarity::Common,
    ammo_type: AmmoType::NineMm,
    count: 30,
    pickup_sound: Some(SoundId::from_str("sound.ammo_pickup")),
    equip_sound: Some(SoundId::from_str("sound.ammo_equip")),
});

pub static AMMO_AR_ID: LazyLock<AmmoBoxId> =
    LazyLock::new(|| AmmoBoxId::from_str("ammo.assault_rifle"));

static AMMO_AR: LazyLock<AmmoRow> = LazyLock::new(|| AmmoRow {
    id: AMMO_AR_ID.clone(),
    name: "Assault Rifle Rounds".to_string(),
    rarity: ItemRarity::Common,
    ammo_type: AmmoType::AssaultRifle,
    count: 30,
    pickup_sound: Some(SoundId::from_str("sound.ammo_pickup")),
    equip_sound: Some(SoundId::from_str("sound.ammo_equip")),
});

pub static AMMO_REGISTRY: LazyLock<Registry<AmmoBoxId, AmmoRow>> = LazyLock::new(|| Registry {
    entries: HashMap::from([
        (AMMO_9MM_ID.clone(), AMMO_9MM.clone()),
        (AMMO_AR_ID.clone(), AMMO_AR.clone()),
    ]),
});
