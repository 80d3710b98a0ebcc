extern crate ironsight;

mod tests {
    use glam::Vec3;
    use ironsight::{
        components::{
            ammo::{AmmoReserve, AmmoType},
            combat::{CombatController, CombatState},
            item::{EquipInterp, Item, ItemState},
            spatial::{CameraRig, Transform},
        },
        systems,
        test_utils::{fixtures, recording::PresentationEvent},
    };

    fn item_state(state: &ironsight::engine::game_state::GameState, item: hecs::Entity) -> ItemState {
        state.world.get::<&Item>(item).unwrap().state()
    }

    #[test]
    fn start_interp_captures_origin_and_plays_the_pickup_sound() {
        let (mut state, log) = fixtures::recording_game_state();
        let character = fixtures::character(&mut state);
        let weapon = fixtures::smg(&mut state, Vec3::new(100.0, 50.0, 0.0));

        assert!(systems::items::start_equip_interp(&mut state, weapon, character));

        assert_eq!(item_state(&state, weapon), ItemState::EquipInterping);
        let interp = state.world.get::<&EquipInterp>(weapon).unwrap();
        assert!(interp.is_interping());
        assert_eq!(interp.character(), Some(character));
        drop(interp);
        assert!(log.borrow().iter().any(|event| matches!(
            event,
            PresentationEvent::Sound(sound) if sound.as_str() == "sound.weapon_pickup"
        )));
    }

    #[test]
    fn a_second_interp_on_the_same_item_is_rejected() {
        let mut state = fixtures::game_state();
        let character = fixtures::character(&mut state);
        let rival = fixtures::character(&mut state);
        let weapon = fixtures::smg(&mut state, Vec3::new(100.0, 0.0, 0.0));

        assert!(systems::items::start_equip_interp(&mut state, weapon, character));
        assert!(!systems::items::start_equip_interp(&mut state, weapon, rival));

        // Still owned by the first character.
        let interp = state.world.get::<&EquipInterp>(weapon).unwrap();
        assert_eq!(interp.character(), Some(character));
    }

    #[test]
    fn interp_rejects_items_that_are_not_world_pickups() {
        let mut state = fixtures::game_state();
        let (character, weapon) = fixtures::character_with_smg(&mut state);
        assert_eq!(item_state(&state, weapon), ItemState::Equipped);
        assert!(!systems::items::start_equip_interp(&mut state, weapon, character));
    }

    #[test]
    fn height_follows_the_curve_while_xy_chase_the_camera_anchor() {
        let mut state = fixtures::game_state();
        let character = fixtures::character(&mut state);
        let weapon = fixtures::smg(&mut state, Vec3::new(100.0, 50.0, 0.0));

        // Camera sits at z=70 looking down +X: the anchor is at
        // (250, 0, 70) + up * 65 = (250, 0, 135).
        let target = systems::items::camera_interp_target(&state, character).unwrap();
        assert!((target - Vec3::new(250.0, 0.0, 135.0)).length() < 1e-3);

        systems::items::start_equip_interp(&mut state, weapon, character);
        state.tick(0.35);

        let transform = state.world.get::<&Transform>(weapon).unwrap();
        // Mid-flight the Z curve overshoots the anchor height.
        assert!(transform.translation.z > target.z);
        // X/Y have been smoothed toward the anchor.
        assert!((transform.translation.x - target.x).abs() < 1.0);
        assert!((transform.translation.y - target.y).abs() < 1.0);
    }

    #[test]
    fn item_yaw_tracks_the_camera_with_the_recorded_offset() {
        let mut state = fixtures::game_state();
        let character = fixtures::character(&mut state);
        let weapon = fixtures::smg(&mut state, Vec3::new(100.0, 0.0, 0.0));
        state.world.get::<&mut Transform>(weapon).unwrap().yaw = 1.0;

        systems::items::start_equip_interp(&mut state, weapon, character);
        // The camera turns mid-flight; the item keeps its relative yaw.
        state.world.get::<&mut CameraRig>(character).unwrap().yaw = 0.5;
        state.tick(0.1);

        let transform = state.world.get::<&Transform>(weapon).unwrap();
        assert!((transform.yaw - 1.5).abs() < 1e-5);
        assert_eq!(transform.pitch, 0.0);
        assert_eq!(transform.roll, 0.0);
    }

    #[test]
    fn finished_interp_delivers_the_weapon_exactly_once() {
        let (mut state, log) = fixtures::recording_game_state();
        let character = fixtures::character(&mut state);
        let weapon = fixtures::smg(&mut state, Vec3::new(100.0, 0.0, 0.0));

        systems::items::start_equip_interp(&mut state, weapon, character);
        for _ in 0..10 {
            state.tick(0.1);
        }

        assert_eq!(item_state(&state, weapon), ItemState::Equipped);
        let combat = state.world.get::<&CombatController>(character).unwrap();
        assert_eq!(combat.equipped_weapon(), Some(weapon));
        assert_eq!(combat.state(), CombatState::Equipping);
        drop(combat);
        // Scale is reset on delivery.
        let transform = state.world.get::<&Transform>(weapon).unwrap();
        assert_eq!(transform.scale, 1.0);
        drop(transform);

        // A stale duplicate finish must not deliver again.
        systems::items::finish_equip_interp(&mut state, weapon);
        let attaches = log
            .borrow()
            .iter()
            .filter(|event| matches!(event, PresentationEvent::Attach(_, _)))
            .count();
        assert_eq!(attaches, 1);
    }

    #[test]
    fn interp_survives_the_character_despawning_mid_flight() {
        let mut state = fixtures::game_state();
        let character = fixtures::character(&mut state);
        let weapon = fixtures::smg(&mut state, Vec3::new(100.0, 0.0, 0.0));

        systems::items::start_equip_interp(&mut state, weapon, character);
        state.tick(0.2);
        state.world.despawn(character).unwrap();
        for _ in 0..8 {
            state.tick(0.1);
        }

        // No delivery happened; the item is collectible again.
        assert_eq!(item_state(&state, weapon), ItemState::Pickup);
        assert!(!state.world.get::<&EquipInterp>(weapon).unwrap().is_interping());
    }

    #[test]
    fn ammo_delivery_tops_up_the_reserve_and_despawns_the_box() {
        let mut state = fixtures::game_state();
        let character = fixtures::character(&mut state);
        let ammo_box = fixtures::ammo_box_9mm(&mut state, Vec3::new(80.0, 0.0, 0.0));

        systems::items::start_equip_interp(&mut state, ammo_box, character);
        for _ in 0..10 {
            state.tick(0.1);
        }

        assert!(!state.world.contains(ammo_box));
        let reserve = state.world.get::<&AmmoReserve>(character).unwrap();
        assert_eq!(reserve.carried(AmmoType::NineMm), 75 + 30);
    }

    #[test]
    fn weapon_delivered_during_a_reload_is_deferred_until_unoccupied() {
        let mut state = fixtures::game_state();
        let (character, old_weapon) = fixtures::character_with_smg(&mut state);
        state
            .world
            .get::<&mut ironsight::components::weapon::Weapon>(old_weapon)
            .unwrap()
            .decrement_ammo();
        let new_weapon = fixtures::rifle(&mut state, Vec3::new(100.0, 0.0, 0.0));

        systems::items::start_equip_interp(&mut state, new_weapon, character);
        systems::combat::reload_weapon(&mut state, character);
        assert_eq!(
            state
                .world
                .get::<&CombatController>(character)
                .unwrap()
                .state(),
            CombatState::Reloading
        );

        // The interp finishes while the reload is still running: the swap is
        // parked, the reload keeps its weapon.
        state.tick(0.8);
        {
            let combat = state.world.get::<&CombatController>(character).unwrap();
            assert_eq!(combat.state(), CombatState::Reloading);
            assert_eq!(combat.equipped_weapon(), Some(old_weapon));
            assert_eq!(combat.pending_pickup(), Some(new_weapon));
        }

        // Reload completes into the old weapon, then the deferred swap runs.
        state.tick(2.0);
        let combat = state.world.get::<&CombatController>(character).unwrap();
        assert_eq!(combat.equipped_weapon(), Some(new_weapon));
        assert_eq!(combat.pending_pickup(), None);
        drop(combat);
        assert_eq!(
            state.world.get::<&Item>(old_weapon).unwrap().state(),
            ItemState::Falling
        );
        assert_eq!(
            state.world.get::<&Item>(new_weapon).unwrap().state(),
            ItemState::Equipped
        );
    }
}
