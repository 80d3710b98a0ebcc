extern crate ironsight;

mod tests {
    use glam::Vec3;
    use ironsight::{
        components::item::{Item, ItemFocus, ItemState},
        engine::services::TraceHit,
        systems,
        test_utils::{
            fixtures,
            recording::{PresentationEvent, StubTrace},
        },
    };

    #[test]
    fn overlap_count_gates_the_item_trace() {
        let mut state = fixtures::game_state();
        let character = fixtures::character(&mut state);

        systems::items::increment_overlapped_count(&mut state, character, 1);
        systems::items::increment_overlapped_count(&mut state, character, 1);
        assert!(state.world.get::<&ItemFocus>(character).unwrap().should_trace());

        systems::items::increment_overlapped_count(&mut state, character, -1);
        assert!(state.world.get::<&ItemFocus>(character).unwrap().should_trace());
        systems::items::increment_overlapped_count(&mut state, character, -1);
        assert!(!state.world.get::<&ItemFocus>(character).unwrap().should_trace());

        // The counter never goes negative.
        systems::items::increment_overlapped_count(&mut state, character, -5);
        systems::items::increment_overlapped_count(&mut state, character, 1);
        assert!(state.world.get::<&ItemFocus>(character).unwrap().should_trace());
    }

    #[test]
    fn looking_at_a_pickup_shows_its_widget_and_looking_away_hides_it() {
        let (trace, script) = StubTrace::miss();
        let (mut state, log) = fixtures::traced_game_state(trace);
        let character = fixtures::character(&mut state);
        let weapon = fixtures::smg(&mut state, Vec3::new(200.0, 0.0, 0.0));

        systems::items::increment_overlapped_count(&mut state, character, 1);
        *script.borrow_mut() = Some(TraceHit {
            location: Vec3::new(200.0, 0.0, 20.0),
            entity: Some(weapon),
        });
        state.tick(0.016);

        assert_eq!(
            state.world.get::<&ItemFocus>(character).unwrap().focused(),
            Some(weapon)
        );
        assert!(log.borrow().iter().any(|event| matches!(
            event,
            PresentationEvent::ShowPickupWidget(entity) if *entity == weapon
        )));

        // Looking away drops the focus and hides the widget.
        *script.borrow_mut() = None;
        state.tick(0.016);
        assert_eq!(state.world.get::<&ItemFocus>(character).unwrap().focused(), None);
        assert!(log.borrow().iter().any(|event| matches!(
            event,
            PresentationEvent::HidePickupWidget(entity) if *entity == weapon
        )));
    }

    #[test]
    fn select_button_starts_the_interp_on_the_focused_item() {
        let (trace, script) = StubTrace::miss();
        let (mut state, _log) = fixtures::traced_game_state(trace);
        let character = fixtures::character(&mut state);
        let weapon = fixtures::smg(&mut state, Vec3::new(200.0, 0.0, 0.0));

        systems::items::increment_overlapped_count(&mut state, character, 1);
        *script.borrow_mut() = Some(TraceHit {
            location: Vec3::new(200.0, 0.0, 20.0),
            entity: Some(weapon),
        });
        state.tick(0.016);

        systems::items::select_button_pressed(&mut state, character);
        assert_eq!(
            state.world.get::<&Item>(weapon).unwrap().state(),
            ItemState::EquipInterping
        );
    }

    #[test]
    fn equipped_items_are_not_focus_candidates() {
        let (trace, script) = StubTrace::miss();
        let (mut state, log) = fixtures::traced_game_state(trace);
        let (character, weapon) = fixtures::character_with_smg(&mut state);

        systems::items::increment_overlapped_count(&mut state, character, 1);
        *script.borrow_mut() = Some(TraceHit {
            location: Vec3::new(200.0, 0.0, 20.0),
            entity: Some(weapon),
        });
        state.tick(0.016);

        assert_eq!(state.world.get::<&ItemFocus>(character).unwrap().focused(), None);
        assert!(!log.borrow().iter().any(|event| matches!(
            event,
            PresentationEvent::ShowPickupWidget(_)
        )));
    }
}
