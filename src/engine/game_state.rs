use hecs::World;

use crate::{
    engine::{
        scheduler::{TimerAction, TimerScheduler},
        services::Services,
    },
    systems,
};

/// Owns the entity world, the injected host services and the frame-clock
/// scheduler. All combat and item state machines advance synchronously
/// inside `tick`; there is no other source of mutation.
pub struct GameState {
    pub world: World,
    pub services: Services,
    pub scheduler: TimerScheduler,
}

impl GameState {
    pub fn new(services: Services) -> Self {
        Self {
            world: World::new(),
            services,
            scheduler: TimerScheduler::default(),
        }
    }

    pub fn headless() -> Self {
        Self::new(Services::headless())
    }

    /// Advances one frame: expired timers fire first, then the per-frame
    /// systems run. Every dispatched action re-checks entity liveness and
    /// state preconditions, so stale timers are harmless.
    pub fn tick(&mut self, delta_time: f32) {
        let due = self.scheduler.advance(delta_time);
        for action in due {
            self.dispatch(action);
        }

        systems::items::update_equip_interps(self, delta_time);
        systems::weapons::keep_falling_upright(&mut self.world);
        systems::items::trace_for_items(self);
        systems::crosshair::update_spread(self, delta_time);
    }

    fn dispatch(&mut self, action: TimerAction) {
        match action {
            TimerAction::AutoFireReset(character) => {
                systems::combat::auto_fire_reset(self, character)
            }
            TimerAction::FinishReloading(character) => {
                systems::combat::finish_reloading(self, character)
            }
            TimerAction::FinishEquipping(character) => {
                systems::combat::finish_equipping(self, character)
            }
            TimerAction::RecoverFromStun(character) => {
                systems::combat::recover_from_stun(self, character)
            }
            TimerAction::FinishCrosshairFire(character) => {
                systems::crosshair::finish_crosshair_fire(self, character)
            }
            TimerAction::FinishItemInterp(item) => systems::items::finish_equip_interp(self, item),
            TimerAction::WeaponSettled(weapon) => systems::weapons::weapon_settled(self, weapon),
            TimerAction::GlowPulse(weapon) => systems::weapons::glow_pulse(self, weapon),
            TimerAction::ResetHitReact(enemy) => systems::enemy::reset_hit_react(self, enemy),
            TimerAction::ResetEnemyAttack(enemy) => systems::enemy::reset_enemy_attack(self, enemy),
            TimerAction::HideHealthBar(enemy) => systems::enemy::hide_health_bar(self, enemy),
            TimerAction::DespawnEnemy(enemy) => systems::enemy::despawn_enemy(self, enemy),
        }
    }
}
