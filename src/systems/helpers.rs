use std::any::type_name;

use hecs::{Entity, Ref, RefMut, World};

pub fn get_component<'a, T: hecs::Component + 'static>(
    world: &'a World,
    entity: Entity,
) -> Ref<'a, T> {
    world
        .get::<&T>(entity)
        .unwrap_or_else(|_| missing_component_panic::<T>(entity))
}

pub fn get_component_mut<'a, T: hecs::Component + 'static>(
    world: &'a mut World,
    entity: Entity,
) -> RefMut<'a, T> {
    world
        .get::<&mut T>(entity)
        .unwrap_or_else(|_| missing_component_panic::<T>(entity))
}

fn missing_component_panic<T: 'static>(entity: Entity) -> ! {
    panic!(
        "Entity {:?} is missing component of type `{}`",
        entity,
        type_name::<T>()
    );
}
