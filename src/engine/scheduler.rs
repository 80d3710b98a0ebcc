use hecs::Entity;
use tracing::debug;
use uuid::Uuid;

pub type TimerToken = Uuid;

/// Deferred gameplay work, scheduled against the frame clock. Every variant
/// names the entity it belongs to; the dispatcher re-validates liveness and
/// state before acting, so a stale firing degrades to a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    AutoFireReset(Entity),
    FinishReloading(Entity),
    FinishEquipping(Entity),
    RecoverFromStun(Entity),
    FinishCrosshairFire(Entity),
    FinishItemInterp(Entity),
    WeaponSettled(Entity),
    GlowPulse(Entity),
    ResetHitReact(Entity),
    ResetEnemyAttack(Entity),
    HideHealthBar(Entity),
    DespawnEnemy(Entity),
}

#[derive(Debug, Clone, Copy)]
struct ScheduledTimer {
    token: TimerToken,
    remaining: f32,
    action: TimerAction,
}

/// Single-shot frame-clock timers, the only asynchrony primitive in the
/// core. Cancelling a token before it fires discards the firing entirely;
/// holders keep at most one live token per logical timer slot.
#[derive(Default)]
pub struct TimerScheduler {
    entries: Vec<ScheduledTimer>,
}

impl TimerScheduler {
    pub fn schedule_once(&mut self, delay: f32, action: TimerAction) -> TimerToken {
        let token = Uuid::new_v4();
        debug!(?action, delay, %token, "scheduling timer");
        self.entries.push(ScheduledTimer {
            token,
            remaining: delay.max(0.0),
            action,
        });
        token
    }

    pub fn cancel(&mut self, token: TimerToken) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.token != token);
        self.entries.len() != before
    }

    pub fn is_scheduled(&self, token: TimerToken) -> bool {
        self.entries.iter().any(|entry| entry.token == token)
    }

    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    /// Advances the clock and returns the actions whose timers expired, in
    /// expiry order (schedule order for ties).
    pub fn advance(&mut self, delta_time: f32) -> Vec<TimerAction> {
        for entry in &mut self.entries {
            entry.remaining -= delta_time;
        }

        let mut expired = Vec::new();
        let mut live = Vec::with_capacity(self.entries.len());
        for entry in self.entries.drain(..) {
            if entry.remaining <= 0.0 {
                expired.push(entry);
            } else {
                live.push(entry);
            }
        }
        self.entries = live;

        expired.sort_by(|a, b| {
            a.remaining
                .partial_cmp(&b.remaining)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        expired.into_iter().map(|entry| entry.action).collect()
    }
}
