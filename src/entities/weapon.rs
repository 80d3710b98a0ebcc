use glam::Vec3;
use hecs::Entity;

use crate::{
    components::{
        item::{EquipInterp, Item, ItemState},
        spatial::Transform,
        weapon::Weapon,
    },
    engine::game_state::GameState,
    registry::weapons::{WEAPON_REGISTRY, WeaponRow},
    systems::items::set_item_state,
};

pub fn spawn_weapon(state: &mut GameState, row: &WeaponRow, location: Vec3) -> Entity {
    let mut item = Item::new(row.name.clone(), row.rarity);
    item.pickup_sound = row.pickup_sound.clone();
    item.equip_sound = row.equip_sound.clone();

    let mut weapon = Weapon::new(
        row.kind,
        row.ammo_type,
        row.ammo,
        row.magazine_capacity,
        row.automatic,
        row.fire_rate,
        row.damage,
        row.reload_section.clone(),
    );
    weapon.fire_sound = row.fire_sound.clone();
    weapon.muzzle_flash = row.muzzle_flash.clone();
    weapon.impact_particles = row.impact_particles.clone();
    weapon.beam_particles = row.beam_particles.clone();

    let entity = state.world.spawn((
        item,
        weapon,
        Transform::from_translation(location),
        EquipInterp::default(),
    ));
    // Applies the Pickup policy to the freshly spawned visual.
    set_item_state(state, entity, ItemState::Pickup);
    entity
}

pub fn spawn_weapon_by_id(
    state: &mut GameState,
    id: &crate::components::id::WeaponId,
    location: Vec3,
) -> Option<Entity> {
    let row = WEAPON_REGISTRY.get(id)?.clone();
    Some(spawn_weapon(state, &row, location))
}
