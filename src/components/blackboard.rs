use std::collections::HashMap;

use glam::Vec3;
use hecs::Entity;

/// Keys the combat core writes into an enemy's behavior-tree blackboard.
/// The AI layer owns their interpretation; the core never reads them back
/// for its own decisions.
pub mod keys {
    pub const TARGET: &str = "Target";
    pub const STUNNED: &str = "Stunned";
    pub const IN_ATTACK_RANGE: &str = "InAttackRange";
    pub const CAN_ATTACK: &str = "CanAttack";
    pub const DEAD: &str = "Dead";
    pub const PATROL_POINT: &str = "PatrolPoint";
    pub const PATROL_POINT_2: &str = "PatrolPoint2";
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BlackboardValue {
    Bool(bool),
    Vector(Vec3),
    Entity(Entity),
}

/// External AI memory slots. Write-mostly from the core's point of view; the
/// getters exist for the AI layer and for tests.
#[derive(Debug, Clone, Default)]
pub struct Blackboard {
    slots: HashMap<String, BlackboardValue>,
}

impl Blackboard {
    pub fn set_bool(&mut self, key: &str, value: bool) {
        self.slots
            .insert(key.to_string(), BlackboardValue::Bool(value));
    }

    pub fn set_vector(&mut self, key: &str, value: Vec3) {
        self.slots
            .insert(key.to_string(), BlackboardValue::Vector(value));
    }

    pub fn set_entity(&mut self, key: &str, value: Entity) {
        self.slots
            .insert(key.to_string(), BlackboardValue::Entity(value));
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.slots.get(key) {
            Some(BlackboardValue::Bool(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn get_vector(&self, key: &str) -> Option<Vec3> {
        match self.slots.get(key) {
            Some(BlackboardValue::Vector(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn get_entity(&self, key: &str) -> Option<Entity> {
        match self.slots.get(key) {
            Some(BlackboardValue::Entity(value)) => Some(*value),
            _ => None,
        }
    }
}
