extern crate ironsight;

mod tests {
    use glam::Vec3;
    use ironsight::{
        components::{
            ammo::{AmmoReserve, AmmoType},
            combat::{CombatController, CombatState},
            item::{Item, ItemState},
            weapon::Weapon,
        },
        systems,
        test_utils::fixtures,
    };

    fn ammo(state: &ironsight::engine::game_state::GameState, weapon: hecs::Entity) -> u32 {
        state.world.get::<&Weapon>(weapon).unwrap().ammo()
    }

    fn combat_state(
        state: &ironsight::engine::game_state::GameState,
        character: hecs::Entity,
    ) -> CombatState {
        state
            .world
            .get::<&CombatController>(character)
            .unwrap()
            .state()
    }

    #[test]
    fn firing_decrements_ammo_and_occupies_the_combat_slot() {
        let mut state = fixtures::game_state();
        let (character, weapon) = fixtures::character_with_smg(&mut state);

        systems::combat::fire_weapon(&mut state, character);

        assert_eq!(ammo(&state, weapon), 29);
        assert_eq!(
            combat_state(&state, character),
            CombatState::FireTimerInProgress
        );
        let reserve = state.world.get::<&AmmoReserve>(character).unwrap();
        assert_eq!(reserve.carried(AmmoType::NineMm), 75);
    }

    #[test]
    fn fire_is_a_no_op_while_the_fire_timer_runs() {
        let mut state = fixtures::game_state();
        let (character, weapon) = fixtures::character_with_smg(&mut state);

        systems::combat::fire_weapon(&mut state, character);
        systems::combat::fire_weapon(&mut state, character);
        systems::combat::fire_weapon(&mut state, character);

        assert_eq!(ammo(&state, weapon), 29);
    }

    #[test]
    fn fire_is_a_no_op_while_reloading() {
        let mut state = fixtures::game_state();
        let (character, weapon) = fixtures::character_with_smg(&mut state);
        state.world.get::<&mut Weapon>(weapon).unwrap().decrement_ammo();

        systems::combat::reload_weapon(&mut state, character);
        assert_eq!(combat_state(&state, character), CombatState::Reloading);
        systems::combat::fire_weapon(&mut state, character);

        assert_eq!(ammo(&state, weapon), 29, "no shot while reloading");
        assert_eq!(combat_state(&state, character), CombatState::Reloading);
    }

    #[test]
    fn fire_is_a_no_op_without_a_weapon_or_without_ammo() {
        let mut state = fixtures::game_state();
        let unarmed = fixtures::character(&mut state);
        systems::combat::fire_weapon(&mut state, unarmed);
        assert_eq!(combat_state(&state, unarmed), CombatState::Unoccupied);

        let (character, weapon) = fixtures::character_with_smg(&mut state);
        {
            let mut weapon_comp = state.world.get::<&mut Weapon>(weapon).unwrap();
            while weapon_comp.ammo() > 0 {
                weapon_comp.decrement_ammo();
            }
        }
        state
            .world
            .insert_one(character, AmmoReserve::empty())
            .unwrap();
        systems::combat::fire_weapon(&mut state, character);
        assert_eq!(combat_state(&state, character), CombatState::Unoccupied);
        assert_eq!(ammo(&state, weapon), 0);
    }

    #[test]
    fn held_fire_button_keeps_the_automatic_cadence_going() {
        let mut state = fixtures::game_state();
        let (character, weapon) = fixtures::character_with_smg(&mut state);

        systems::combat::fire_button_pressed(&mut state, character);
        assert_eq!(ammo(&state, weapon), 29);

        // Each fire-rate window (1 / 10 s) re-fires while the button is held.
        state.tick(0.11);
        assert_eq!(ammo(&state, weapon), 28);
        state.tick(0.11);
        assert_eq!(ammo(&state, weapon), 27);

        systems::combat::fire_button_released(&mut state, character);
        state.tick(0.11);
        state.tick(0.11);
        assert_eq!(ammo(&state, weapon), 27);
        assert_eq!(combat_state(&state, character), CombatState::Unoccupied);
    }

    #[test]
    fn emptying_the_clip_triggers_an_automatic_reload() {
        let mut state = fixtures::game_state();
        let (character, weapon) = fixtures::character_with_smg(&mut state);
        {
            let mut weapon_comp = state.world.get::<&mut Weapon>(weapon).unwrap();
            while weapon_comp.ammo() > 1 {
                weapon_comp.decrement_ammo();
            }
        }

        systems::combat::fire_weapon(&mut state, character);
        assert_eq!(ammo(&state, weapon), 0);
        state.tick(0.11);
        assert_eq!(combat_state(&state, character), CombatState::Reloading);

        state.tick(3.0);
        assert_eq!(combat_state(&state, character), CombatState::Unoccupied);
        assert_eq!(ammo(&state, weapon), 30);
        let reserve = state.world.get::<&AmmoReserve>(character).unwrap();
        assert_eq!(reserve.carried(AmmoType::NineMm), 45);
    }

    #[test]
    fn reload_requires_carried_ammo_of_the_weapons_type() {
        let mut state = fixtures::game_state();
        let (character, weapon) = fixtures::character_with_smg(&mut state);
        state.world.get::<&mut Weapon>(weapon).unwrap().decrement_ammo();
        state
            .world
            .insert_one(character, AmmoReserve::empty())
            .unwrap();

        systems::combat::reload_weapon(&mut state, character);
        assert_eq!(combat_state(&state, character), CombatState::Unoccupied);
    }

    #[test]
    fn reload_without_a_weapon_is_a_no_op() {
        let mut state = fixtures::game_state();
        let character = fixtures::character(&mut state);
        systems::combat::reload_weapon(&mut state, character);
        assert_eq!(combat_state(&state, character), CombatState::Unoccupied);
    }

    #[test]
    fn dropping_the_weapon_mid_reload_finishes_as_a_no_op() {
        let mut state = fixtures::game_state();
        let (character, weapon) = fixtures::character_with_smg(&mut state);
        state.world.get::<&mut Weapon>(weapon).unwrap().decrement_ammo();

        systems::combat::reload_weapon(&mut state, character);
        systems::combat::drop_weapon(&mut state, character);
        state.tick(3.0);

        assert_eq!(combat_state(&state, character), CombatState::Unoccupied);
        // Neither pool moved: the reload found no weapon to fill.
        assert_eq!(ammo(&state, weapon), 29);
        let reserve = state.world.get::<&AmmoReserve>(character).unwrap();
        assert_eq!(reserve.carried(AmmoType::NineMm), 75);
    }

    #[test]
    fn swap_drops_the_old_weapon_and_equips_the_new() {
        let mut state = fixtures::game_state();
        let (character, old_weapon) = fixtures::character_with_smg(&mut state);
        let new_weapon = fixtures::rifle(&mut state, Vec3::new(100.0, 0.0, 0.0));

        systems::combat::swap_weapon(&mut state, character, new_weapon);

        let combat = state.world.get::<&CombatController>(character).unwrap();
        assert_eq!(combat.equipped_weapon(), Some(new_weapon));
        drop(combat);
        assert_eq!(
            state.world.get::<&Item>(old_weapon).unwrap().state(),
            ItemState::Falling
        );
        assert_eq!(
            state.world.get::<&Item>(new_weapon).unwrap().state(),
            ItemState::Equipped
        );
        assert_eq!(combat_state(&state, character), CombatState::Equipping);

        state.tick(2.0);
        assert_eq!(combat_state(&state, character), CombatState::Unoccupied);
        // The dropped weapon has settled back into a pickup by now.
        assert_eq!(
            state.world.get::<&Item>(old_weapon).unwrap().state(),
            ItemState::Pickup
        );
    }

    #[test]
    fn end_to_end_fire_and_reload_bookkeeping() {
        let mut state = fixtures::game_state();
        let (character, weapon) = fixtures::character_with_smg(&mut state);

        for _ in 0..5 {
            systems::combat::fire_weapon(&mut state, character);
            state.tick(0.11);
        }
        assert_eq!(ammo(&state, weapon), 25);
        {
            let reserve = state.world.get::<&AmmoReserve>(character).unwrap();
            assert_eq!(reserve.carried(AmmoType::NineMm), 75);
        }

        systems::combat::reload_weapon(&mut state, character);
        state.tick(3.0);

        assert_eq!(ammo(&state, weapon), 30);
        let reserve = state.world.get::<&AmmoReserve>(character).unwrap();
        assert_eq!(reserve.carried(AmmoType::NineMm), 70);
    }

    #[test]
    fn stunned_character_accepts_no_commands_until_recovery() {
        let mut state = fixtures::game_state();
        let (character, weapon) = fixtures::character_with_smg(&mut state);
        state
            .world
            .get::<&mut CombatController>(character)
            .unwrap()
            .stun_chance = 1.0;

        systems::combat::stun_character(&mut state, character);
        assert_eq!(combat_state(&state, character), CombatState::Stunned);

        systems::combat::fire_weapon(&mut state, character);
        systems::combat::reload_weapon(&mut state, character);
        assert_eq!(ammo(&state, weapon), 30);
        assert_eq!(combat_state(&state, character), CombatState::Stunned);

        state.tick(1.1);
        assert_eq!(combat_state(&state, character), CombatState::Unoccupied);
        systems::combat::fire_weapon(&mut state, character);
        assert_eq!(ammo(&state, weapon), 29);
    }
}
