use glam::Vec3;
use hecs::Entity;
use rand::Rng;
use tracing::debug;

use crate::{
    components::{
        blackboard::{Blackboard, keys},
        combat::CombatController,
        enemy::Enemy,
        health::Health,
        id::MontageSectionId,
        spatial::Transform,
    },
    engine::{game_state::GameState, scheduler::TimerAction},
    systems,
};

pub const HIT_REACT_SECTION: &str = "HitReactFront";
pub const DEATH_SECTION: &str = "DeathBack";
const ATTACK_SECTIONS: [&str; 4] = ["AttackLFast", "AttackRFast", "AttackL", "AttackR"];

fn set_blackboard_bool(state: &mut GameState, enemy: Entity, key: &str, value: bool) {
    if let Ok(mut blackboard) = state.world.get::<&mut Blackboard>(enemy) {
        blackboard.set_bool(key, value);
    }
}

/// Bullet impact feedback and the stun roll. Purely reactive: damage is
/// applied separately through `take_damage`.
pub fn bullet_hit(state: &mut GameState, enemy: Entity, hit_location: Vec3) {
    let Ok((impact_sound, impact_particles, dying, stun_chance)) =
        state.world.get::<&Enemy>(enemy).map(|e| {
            (
                e.impact_sound.clone(),
                e.impact_particles.clone(),
                e.dying,
                e.stun_chance,
            )
        })
    else {
        return;
    };

    if let Some(sound) = impact_sound {
        state.services.presentation.play_sound_at(&sound, hit_location);
    }
    if let Some(particles) = impact_particles {
        state
            .services
            .presentation
            .spawn_particles(&particles, hit_location);
    }

    if dying {
        return;
    }

    show_health_bar(state, enemy);

    if rand::rng().random::<f32>() < stun_chance {
        play_hit_react(state, enemy);
    }
}

/// Staggers the enemy unless a previous hit-react is still cooling down.
fn play_hit_react(state: &mut GameState, enemy: Entity) {
    {
        let Ok(mut enemy_comp) = state.world.get::<&mut Enemy>(enemy) else {
            return;
        };
        if !enemy_comp.can_hit_react {
            return;
        }
        enemy_comp.can_hit_react = false;
        let delay = rand::rng()
            .random_range(enemy_comp.hit_react_delay_min..=enemy_comp.hit_react_delay_max);
        if let Some(timer) = enemy_comp.hit_react_timer.take() {
            state.scheduler.cancel(timer);
        }
        enemy_comp.hit_react_timer = Some(
            state
                .scheduler
                .schedule_once(delay, TimerAction::ResetHitReact(enemy)),
        );
    }
    state
        .services
        .presentation
        .play_montage_section(enemy, &MontageSectionId::from_str(HIT_REACT_SECTION));
    set_blackboard_bool(state, enemy, keys::STUNNED, true);
}

pub(crate) fn reset_hit_react(state: &mut GameState, enemy: Entity) {
    {
        let Ok(mut enemy_comp) = state.world.get::<&mut Enemy>(enemy) else {
            return;
        };
        enemy_comp.can_hit_react = true;
        enemy_comp.hit_react_timer = None;
    }
    set_blackboard_bool(state, enemy, keys::STUNNED, false);
}

/// Shows the health bar and re-arms its expiry timer.
fn show_health_bar(state: &mut GameState, enemy: Entity) {
    {
        let Ok(mut enemy_comp) = state.world.get::<&mut Enemy>(enemy) else {
            return;
        };
        if let Some(timer) = enemy_comp.health_bar_timer.take() {
            state.scheduler.cancel(timer);
        }
        let display_time = enemy_comp.health_bar_display_time;
        enemy_comp.health_bar_timer = Some(
            state
                .scheduler
                .schedule_once(display_time, TimerAction::HideHealthBar(enemy)),
        );
    }
    state.services.presentation.show_health_bar(enemy);
}

pub(crate) fn hide_health_bar(state: &mut GameState, enemy: Entity) {
    if let Ok(mut enemy_comp) = state.world.get::<&mut Enemy>(enemy) {
        enemy_comp.health_bar_timer = None;
    }
    state.services.presentation.hide_health_bar(enemy);
}

/// Clamped damage application. Lethal damage triggers the death sequence
/// exactly once; anything after that is a no-op.
pub fn take_damage(state: &mut GameState, enemy: Entity, amount: f32, causer: Option<Entity>) {
    {
        let Ok(enemy_comp) = state.world.get::<&Enemy>(enemy) else {
            return;
        };
        if enemy_comp.dying {
            return;
        }
    }
    if let Some(causer) = causer
        && let Ok(mut blackboard) = state.world.get::<&mut Blackboard>(enemy)
    {
        blackboard.set_entity(keys::TARGET, causer);
    }

    let died = {
        let Ok(mut health) = state.world.get::<&mut Health>(enemy) else {
            return;
        };
        health.damage(amount);
        health.is_dead()
    };
    if died {
        die(state, enemy);
    }
}

/// Death sequence: animation, blackboard flag, AI stop, then removal from
/// the world after a fixed delay.
pub(crate) fn die(state: &mut GameState, enemy: Entity) {
    {
        let Ok(mut enemy_comp) = state.world.get::<&mut Enemy>(enemy) else {
            return;
        };
        if enemy_comp.dying {
            return;
        }
        enemy_comp.dying = true;
        for timer in [
            enemy_comp.health_bar_timer.take(),
            enemy_comp.hit_react_timer.take(),
            enemy_comp.attack_timer.take(),
        ]
        .into_iter()
        .flatten()
        {
            state.scheduler.cancel(timer);
        }
        let death_time = enemy_comp.death_time;
        enemy_comp.death_timer = Some(
            state
                .scheduler
                .schedule_once(death_time, TimerAction::DespawnEnemy(enemy)),
        );
    }
    debug!(?enemy, "enemy died");
    state.services.presentation.hide_health_bar(enemy);
    state
        .services
        .presentation
        .play_montage_section(enemy, &MontageSectionId::from_str(DEATH_SECTION));
    state.services.presentation.stop_ai_movement(enemy);
    set_blackboard_bool(state, enemy, keys::DEAD, true);
}

pub(crate) fn despawn_enemy(state: &mut GameState, enemy: Entity) {
    state.services.presentation.despawn_visual(enemy);
    let _ = state.world.despawn(enemy);
}

/// Melee swing at a character: one of four attack animations, the damage
/// application and the character stun roll, gated by the attack cooldown.
pub fn melee_strike(state: &mut GameState, enemy: Entity, target: Entity) {
    let (base_damage, attack_wait_time) = {
        let Ok(enemy_comp) = state.world.get::<&Enemy>(enemy) else {
            return;
        };
        if enemy_comp.dying || !enemy_comp.can_attack {
            return;
        }
        (enemy_comp.base_damage, enemy_comp.attack_wait_time)
    };

    let section = ATTACK_SECTIONS[rand::rng().random_range(0..ATTACK_SECTIONS.len())];
    state
        .services
        .presentation
        .play_montage_section(enemy, &MontageSectionId::from_str(section));

    {
        let Ok(mut enemy_comp) = state.world.get::<&mut Enemy>(enemy) else {
            return;
        };
        enemy_comp.can_attack = false;
        if let Some(timer) = enemy_comp.attack_timer.take() {
            state.scheduler.cancel(timer);
        }
        enemy_comp.attack_timer = Some(
            state
                .scheduler
                .schedule_once(attack_wait_time, TimerAction::ResetEnemyAttack(enemy)),
        );
    }
    set_blackboard_bool(state, enemy, keys::CAN_ATTACK, false);

    if !state.world.contains(target) {
        return;
    }
    if let Ok(mut health) = state.world.get::<&mut Health>(target) {
        health.damage(base_damage);
    }
    let melee_impact_sound = state
        .world
        .get::<&CombatController>(target)
        .ok()
        .and_then(|combat| combat.melee_impact_sound.clone());
    if let Some(sound) = melee_impact_sound {
        let location = state
            .world
            .get::<&Transform>(target)
            .map(|t| t.translation)
            .unwrap_or(Vec3::ZERO);
        state.services.presentation.play_sound_at(&sound, location);
    }
    systems::combat::stun_character(state, target);
}

pub(crate) fn reset_enemy_attack(state: &mut GameState, enemy: Entity) {
    {
        let Ok(mut enemy_comp) = state.world.get::<&mut Enemy>(enemy) else {
            return;
        };
        enemy_comp.can_attack = true;
        enemy_comp.attack_timer = None;
    }
    set_blackboard_bool(state, enemy, keys::CAN_ATTACK, true);
}

/// External overlap event: the character entered or left melee range.
pub fn set_in_attack_range(state: &mut GameState, enemy: Entity, in_range: bool) {
    if let Ok(mut enemy_comp) = state.world.get::<&mut Enemy>(enemy) {
        enemy_comp.in_attack_range = in_range;
    } else {
        return;
    }
    set_blackboard_bool(state, enemy, keys::IN_ATTACK_RANGE, in_range);
}

/// External aggro event: a character entered the enemy's awareness.
pub fn aggro(state: &mut GameState, enemy: Entity, target: Entity) {
    if let Ok(mut blackboard) = state.world.get::<&mut Blackboard>(enemy) {
        blackboard.set_entity(keys::TARGET, target);
    }
}
