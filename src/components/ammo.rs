use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmmoType {
    NineMm,
    AssaultRifle,
}

/// A loose ammo pickup in the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ammo {
    pub ammo_type: AmmoType,
    pub count: u32,
}

/// The character's carried ammo, one counter per ammo type. The key set is
/// fixed at construction; counts only move through pickups and reloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmmoReserve {
    counts: HashMap<AmmoType, u32>,
}

impl AmmoReserve {
    pub fn new(starting: &[(AmmoType, u32)]) -> Self {
        let mut counts: HashMap<AmmoType, u32> =
            AmmoType::iter().map(|ammo_type| (ammo_type, 0)).collect();
        for (ammo_type, count) in starting {
            counts.insert(*ammo_type, *count);
        }
        Self { counts }
    }

    pub fn empty() -> Self {
        Self::new(&[])
    }

    pub fn carried(&self, ammo_type: AmmoType) -> u32 {
        self.counts.get(&ammo_type).copied().unwrap_or(0)
    }

    pub fn add(&mut self, ammo_type: AmmoType, amount: u32) {
        if let Some(count) = self.counts.get_mut(&ammo_type) {
            *count += amount;
        }
    }

    /// Removes up to `amount` rounds and returns how many were actually
    /// taken. This is the only way ammo leaves the reserve, so the counter
    /// can never underflow.
    pub fn take_up_to(&mut self, ammo_type: AmmoType, amount: u32) -> u32 {
        let Some(count) = self.counts.get_mut(&ammo_type) else {
            return 0;
        };
        let taken = amount.min(*count);
        *count -= taken;
        taken
    }
}
