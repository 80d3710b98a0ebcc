use crate::{
    components::id::{ParticleId, SoundId},
    engine::scheduler::TimerToken,
};

/// Melee enemy reaction state: stun rolls, hit-react suppression, attack
/// cadence and the death sequence. AI decision-making lives behind the
/// blackboard; this component only carries what the combat core needs.
#[derive(Debug, Clone)]
pub struct Enemy {
    pub base_damage: f32,
    /// Chance in [0, 1] that a bullet hit staggers this enemy.
    pub stun_chance: f32,
    pub attack_wait_time: f32,
    pub hit_react_delay_min: f32,
    pub hit_react_delay_max: f32,
    pub death_time: f32,
    pub health_bar_display_time: f32,
    pub impact_sound: Option<SoundId>,
    pub impact_particles: Option<ParticleId>,
    pub(crate) can_hit_react: bool,
    pub(crate) can_attack: bool,
    pub(crate) dying: bool,
    pub(crate) in_attack_range: bool,
    pub(crate) hit_react_timer: Option<TimerToken>,
    pub(crate) attack_timer: Option<TimerToken>,
    pub(crate) health_bar_timer: Option<TimerToken>,
    pub(crate) death_timer: Option<TimerToken>,
}

impl Default for Enemy {
    fn default() -> Self {
        Self {
            base_damage: 20.0,
            stun_chance: 0.5,
            attack_wait_time: 2.0,
            hit_react_delay_min: 0.5,
            hit_react_delay_max: 3.0,
            death_time: 3.0,
            health_bar_display_time: 4.0,
            impact_sound: None,
            impact_particles: None,
            can_hit_react: true,
            can_attack: true,
            dying: false,
            in_attack_range: false,
            hit_react_timer: None,
            attack_timer: None,
            health_bar_timer: None,
            death_timer: None,
        }
    }
}

impl Enemy {
    pub fn is_dying(&self) -> bool {
        self.dying
    }

    pub fn can_attack(&self) -> bool {
        self.can_attack
    }

    pub fn can_hit_react(&self) -> bool {
        self.can_hit_react
    }

    pub fn in_attack_range(&self) -> bool {
        self.in_attack_range
    }
}
