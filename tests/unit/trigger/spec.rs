use super::*;

#[test]
fn state_from_progress_has_closed_ends() {
    assert_eq!(TriggerState::from_progress(0.0), TriggerState::Before);
    assert_eq!(TriggerState::from_progress(1e-9), TriggerState::Active);
    assert_eq!(TriggerState::from_progress(0.999), TriggerState::Active);
    assert_eq!(TriggerState::from_progress(1.0), TriggerState::After);
}

#[test]
fn states_are_ordered() {
    assert!(TriggerState::Before < TriggerState::Active);
    assert!(TriggerState::Active < TriggerState::After);
}

#[test]
fn toggle_actions_parse_in_crossing_order() {
    let t: ToggleActions = "play reverse none reset".parse().unwrap();
    assert_eq!(t.for_crossing(Crossing::Enter), ToggleAction::Play);
    assert_eq!(t.for_crossing(Crossing::Leave), ToggleAction::Reverse);
    assert_eq!(t.for_crossing(Crossing::EnterBack), ToggleAction::None);
    assert_eq!(t.for_crossing(Crossing::LeaveBack), ToggleAction::Reset);
    assert_eq!(t.to_string(), "play reverse none reset");
}

#[test]
fn toggle_actions_need_four_words() {
    assert!("play none".parse::<ToggleActions>().is_err());
    assert!("play none none none none".parse::<ToggleActions>().is_err());
    assert!("play none jump none".parse::<ToggleActions>().is_err());
    assert_eq!(
        ToggleActions::default().to_string(),
        "play none none none"
    );
}

#[test]
fn crossings_know_direction_and_target() {
    assert_eq!(Crossing::Enter.direction(), Direction::Forward);
    assert_eq!(Crossing::LeaveBack.direction(), Direction::Backward);
    assert_eq!(Crossing::Leave.target_state(), TriggerState::After);
    assert_eq!(Crossing::EnterBack.target_state(), TriggerState::Active);
}

#[test]
fn builder_records_callbacks() {
    let spec = TriggerSpec::new(TriggerGeometry::new(".a"))
        .label("a")
        .pin(true)
        .on_enter(|_| {})
        .on_bucket(|_, _| {});
    assert!(spec.pin);
    assert!(spec.callbacks.on_enter.is_some());
    assert!(spec.callbacks.on_leave.is_none());
    assert!(spec.callbacks.on_bucket.is_some());
    assert!(format!("{:?}", spec.callbacks).contains("on_enter: true"));
}
