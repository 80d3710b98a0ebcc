use std::{collections::HashMap, sync::LazyLock};

use serde::{Deserialize, Serialize};

use crate::{
    components::id::{EnemyId, ParticleId, SoundId},
    registry::registry::{Registry, RegistryEntry},
};

/// Static enemy properties, loaded once when an enemy spawns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyRow {
    pub id: EnemyId,
    pub name: String,
    pub max_health: f32,
    pub base_damage: f32,
    pub stun_chance: f32,
    pub attack_wait_time: f32,
    pub hit_react_delay_min: f32,
    pub hit_react_delay_max: f32,
    pub death_time: f32,
    pub health_bar_display_time: f32,
    #[serde(default)]
    pub impact_sound: Option<SoundId>,
    #[serde(default)]
    pub impact_particles: Option<ParticleId>,
}

impl RegistryEntry for EnemyRow {
    type Id = EnemyId;

    fn id(&self) -> Self::Id {
        self.id.clone()
    }
}

pub static GRUX_ID: LazyLock<EnemyId> = LazyLock::new(|| EnemyId::from_str("enemy.grux"));

static GRUX: LazyLock<EnemyRow> = LazyLock::new(|| EnemyRow {
    id: GRUX_ID.clone(),
    name: "Grux".to_string(),
    max_health: 100.0,
    base_damage: 20.0,
    stun_chance: 0.5,
    attack_wait_time: 2.0,
    hit_react_delay_min: 0.5,
    hit_react_delay_max: 3.0,
    death_time: 3.0,
    health_bar_display_time: 4.0,
    impact_sound: Some(SoundId::from_str("sound.bullet_impact")),
    impact_particles: Some(ParticleId::from_str("particles.blood")),
});

pub static ENEMY_REGISTRY: LazyLock<Registry<EnemyId, EnemyRow>> = LazyLock::new(|| Registry {
    entries: HashMap::from([(GRUX_ID.clone(), GRUX.clone())]),
});
