use glam::Vec3;
use hecs::Entity;
use serde::{Deserialize, Serialize};
use strum::Display;

use crate::{components::id::SoundId, engine::scheduler::TimerToken};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemRarity {
    Damaged,
    Common,
    Uncommon,
    Rare,
    Legendary,
}

impl ItemRarity {
    pub fn star_count(self) -> usize {
        match self {
            ItemRarity::Damaged => 1,
            ItemRarity::Common => 2,
            ItemRarity::Uncommon => 3,
            ItemRarity::Rare => 4,
            ItemRarity::Legendary => 5,
        }
    }

    /// Star flags for the pickup widget. Index 0 is reserved and always off;
    /// the active stars form a contiguous run starting at index 1.
    pub fn active_stars(self) -> [bool; 6] {
        let mut stars = [false; 6];
        for star in stars.iter_mut().skip(1).take(self.star_count()) {
            *star = true;
        }
        stars
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ItemState {
    Pickup,
    EquipInterping,
    PickedUp,
    Equipped,
    Falling,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum CollisionResponse {
    Ignore,
    Overlap,
    Block,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum CollisionEnabled {
    NoCollision,
    QueryOnly,
    QueryAndPhysics,
}

/// Visibility/collision/physics policy applied to the host-side visual
/// whenever an item changes state. Re-applying the policy for the current
/// state is always safe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemStatePolicy {
    pub simulate_physics: bool,
    pub visible: bool,
    pub collision_response: CollisionResponse,
    pub collision_enabled: CollisionEnabled,
}

impl ItemState {
    pub fn policy(self) -> ItemStatePolicy {
        match self {
            ItemState::Pickup => ItemStatePolicy {
                simulate_physics: false,
                visible: true,
                collision_response: CollisionResponse::Overlap,
                collision_enabled: CollisionEnabled::QueryOnly,
            },
            ItemState::EquipInterping => ItemStatePolicy {
                simulate_physics: false,
                visible: true,
                collision_response: CollisionResponse::Ignore,
                collision_enabled: CollisionEnabled::NoCollision,
            },
            ItemState::PickedUp => ItemStatePolicy {
                simulate_physics: false,
                visible: false,
                collision_response: CollisionResponse::Ignore,
                collision_enabled: CollisionEnabled::NoCollision,
            },
            ItemState::Equipped => ItemStatePolicy {
                simulate_physics: false,
                visible: true,
                collision_response: CollisionResponse::Ignore,
                collision_enabled: CollisionEnabled::NoCollision,
            },
            // Falling items block the static world so they land instead of
            // dropping through the floor.
            ItemState::Falling => ItemStatePolicy {
                simulate_physics: true,
                visible: true,
                collision_response: CollisionResponse::Block,
                collision_enabled: CollisionEnabled::QueryAndPhysics,
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct Item {
    pub name: String,
    pub rarity: ItemRarity,
    state: ItemState,
    pub pickup_sound: Option<SoundId>,
    pub equip_sound: Option<SoundId>,
}

impl Item {
    pub fn new(name: impl Into<String>, rarity: ItemRarity) -> Self {
        Self {
            name: name.into(),
            rarity,
            state: ItemState::Pickup,
            pickup_sound: None,
            equip_sound: None,
        }
    }

    pub fn state(&self) -> ItemState {
        self.state
    }

    /// State writes go through `systems::items::set_item_state` so the
    /// state policy is always re-applied alongside.
    pub(crate) fn set_state(&mut self, state: ItemState) {
        self.state = state;
    }
}

/// Transient interpolation bookkeeping, only meaningful while the owning
/// item is in the `EquipInterping` state.
#[derive(Debug, Clone, Default)]
pub struct EquipInterp {
    pub(crate) interping: bool,
    pub(crate) start_location: Vec3,
    pub(crate) elapsed: f32,
    pub(crate) yaw_offset: f32,
    pub(crate) character: Option<Entity>,
    pub(crate) timer: Option<TimerToken>,
}

impl EquipInterp {
    pub fn is_interping(&self) -> bool {
        self.interping
    }

    pub fn character(&self) -> Option<Entity> {
        self.character
    }
}

/// Per-character bookkeeping for the "look at items" trace: how many pickup
/// overlap volumes the character stands in, and which item currently has its
/// widget shown.
#[derive(Debug, Clone, Copy, Default)]
pub struct ItemFocus {
    pub(crate) overlapped_count: i32,
    pub(crate) should_trace: bool,
    pub(crate) focused: Option<Entity>,
}

impl ItemFocus {
    pub fn focused(&self) -> Option<Entity> {
        self.focused
    }

    pub fn should_trace(&self) -> bool {
        self.should_trace
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(ItemRarity::Damaged, 1)]
    #[case(ItemRarity::Common, 2)]
    #[case(ItemRarity::Uncommon, 3)]
    #[case(ItemRarity::Rare, 4)]
    #[case(ItemRarity::Legendary, 5)]
    fn active_stars_form_contiguous_prefix(#[case] rarity: ItemRarity, #[case] expected: usize) {
        assert_eq!(rarity.star_count(), expected);

        let stars = rarity.active_stars();
        assert!(!stars[0], "star slot 0 is reserved");
        let active = stars.iter().filter(|s| **s).count();
        assert_eq!(active, expected);
        for i in 1..=expected {
            assert!(stars[i], "{rarity} should light star {i}");
        }
        for star in stars.iter().skip(expected + 1) {
            assert!(!star);
        }
    }

    #[test]
    fn falling_is_the_only_physics_state() {
        use super::ItemState::*;
        for state in [Pickup, EquipInterping, PickedUp, Equipped, Falling] {
            assert_eq!(state.policy().simulate_physics, state == Falling);
        }
    }

    #[test]
    fn picked_up_is_the_only_hidden_state() {
        use super::ItemState::*;
        for state in [Pickup, EquipInterping, PickedUp, Equipped, Falling] {
            assert_eq!(state.policy().visible, state != PickedUp);
        }
    }

    #[test]
    fn policy_is_stable_across_repeated_lookups() {
        assert_eq!(ItemState::Pickup.policy(), ItemState::Pickup.policy());
    }
}
