extern crate ironsight;

mod tests {
    use glam::Vec3;
    use ironsight::{
        components::{crosshair::CrosshairSpread, spatial::Kinematics},
        systems,
        test_utils::fixtures,
    };

    fn multiplier(state: &ironsight::engine::game_state::GameState, character: hecs::Entity) -> f32 {
        state
            .world
            .get::<&CrosshairSpread>(character)
            .unwrap()
            .multiplier()
    }

    #[test]
    fn at_rest_the_multiplier_converges_to_the_baseline() {
        let mut state = fixtures::game_state();
        let character = fixtures::character(&mut state);

        for _ in 0..60 {
            state.tick(1.0 / 60.0);
        }
        assert!((multiplier(&state, character) - 0.5).abs() < 1e-4);
    }

    #[test]
    fn velocity_factor_maps_planar_speed_linearly() {
        let mut state = fixtures::game_state();
        let character = fixtures::character(&mut state);

        state.world.get::<&mut Kinematics>(character).unwrap().velocity =
            Vec3::new(300.0, 0.0, 0.0);
        state.tick(1.0 / 60.0);
        let spread = state.world.get::<&CrosshairSpread>(character).unwrap();
        assert!((spread.velocity_factor() - 0.5).abs() < 1e-5);
        drop(spread);

        state.world.get::<&mut Kinematics>(character).unwrap().velocity =
            Vec3::new(900.0, 0.0, 0.0);
        state.tick(1.0 / 60.0);
        let spread = state.world.get::<&CrosshairSpread>(character).unwrap();
        assert!((spread.velocity_factor() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn airborne_spread_grows_slowly_and_shrinks_fast_on_landing() {
        let mut state = fixtures::game_state();
        let character = fixtures::character(&mut state);

        state.world.get::<&mut Kinematics>(character).unwrap().grounded = false;
        for _ in 0..30 {
            state.tick(1.0 / 60.0);
        }
        let airborne = state
            .world
            .get::<&CrosshairSpread>(character)
            .unwrap()
            .in_air_factor();
        assert!(airborne > 0.5, "airborne factor grew to {airborne}");
        assert!(airborne < 2.25);

        state.world.get::<&mut Kinematics>(character).unwrap().grounded = true;
        for _ in 0..30 {
            state.tick(1.0 / 60.0);
        }
        let landed = state
            .world
            .get::<&CrosshairSpread>(character)
            .unwrap()
            .in_air_factor();
        assert!(landed < 0.01, "landing shrinks the factor, got {landed}");
    }

    #[test]
    fn aiming_tightens_the_crosshair_below_the_baseline() {
        let mut state = fixtures::game_state();
        let character = fixtures::character(&mut state);

        systems::combat::aiming_button_pressed(&mut state, character);
        for _ in 0..30 {
            state.tick(1.0 / 60.0);
        }
        assert!(multiplier(&state, character) < 0.0);

        systems::combat::aiming_button_released(&mut state, character);
        for _ in 0..30 {
            state.tick(1.0 / 60.0);
        }
        assert!((multiplier(&state, character) - 0.5).abs() < 1e-3);
    }

    #[test]
    fn firing_opens_a_brief_shooting_spread_window() {
        let mut state = fixtures::game_state();
        let (character, _weapon) = fixtures::character_with_smg(&mut state);

        systems::combat::fire_weapon(&mut state, character);
        state.tick(0.016);
        let during = state
            .world
            .get::<&CrosshairSpread>(character)
            .unwrap()
            .shooting_factor();
        assert!(during > 0.0);

        // Window closes after ~0.05 s and the factor decays back to zero.
        for _ in 0..30 {
            state.tick(0.016);
        }
        let after = state
            .world
            .get::<&CrosshairSpread>(character)
            .unwrap()
            .shooting_factor();
        assert!(after < 1e-3, "shooting factor decayed to {after}");
    }
}
