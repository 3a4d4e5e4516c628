use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ScrollError::invalid_thresholds("x")
            .to_string()
            .contains("invalid thresholds:")
    );
    assert!(
        ScrollError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        ScrollError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn missing_anchor_names_trigger_and_selector() {
    let err = ScrollError::missing_anchor(TriggerId(3), ".hero");
    let msg = err.to_string();
    assert!(msg.contains("#3"));
    assert!(msg.contains(".hero"));
    assert!(err.is_recoverable());
    assert!(!ScrollError::validation("x").is_recoverable());
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ScrollError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
