use glam::Vec3;
use hecs::Entity;

use crate::{
    components::{
        ammo::Ammo,
        id::AmmoBoxId,
        item::{EquipInterp, Item, ItemState},
        spatial::Transform,
    },
    engine::game_state::GameState,
    registry::ammo::{AMMO_REGISTRY, AmmoRow},
    systems::items::set_item_state,
};

pub fn spawn_ammo(state: &mut GameState, row: &AmmoRow, location: Vec3) -> Entity {
    let mut item = Item::new(row.name.clone(), row.rarity);
    item.pickup_sound = row.pickup_sound.clone();
    item.equip_sound = row.equip_sound.clone();

    let entity = state.world.spawn((
        item,
        Ammo {
            ammo_type: row.ammo_type,
            count: row.count,
        },
        Transform::from_translation(location),
        EquipInterp::default(),
    ));
    set_item_state(state, entity, ItemState::Pickup);
    entity
}

pub fn spawn_ammo_by_id(state: &mut GameState, id: &AmmoBoxId, location: Vec3) -> Option<Entity> {
    let row = AMMO_REGISTRY.get(id)?.clone();
    Some(spawn_ammo(state, &row, location))
}
