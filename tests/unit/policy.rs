use super::*;

#[test]
fn breakpoint_is_inclusive_for_compact() {
    assert!(ResponsivePolicy::classify(768.0, DEFAULT_BREAKPOINT_PX).is_compact());
    assert!(ResponsivePolicy::classify(375.0, DEFAULT_BREAKPOINT_PX).is_compact());
    assert!(!ResponsivePolicy::classify(769.0, DEFAULT_BREAKPOINT_PX).is_compact());
}

#[test]
fn pointer_effects_follow_class() {
    assert!(!ResponsivePolicy::fixed(DeviceClass::Compact).pointer_effects_enabled());
    assert!(ResponsivePolicy::fixed(DeviceClass::Full).pointer_effects_enabled());
}

#[test]
fn responsive_values_resolve_per_class() {
    let v: Responsive<f64> = serde_json::from_str(r#"{"compact": -100, "full": -200}"#).unwrap();
    assert_eq!(v.resolve(ResponsivePolicy::fixed(DeviceClass::Compact)), -100.0);
    assert_eq!(v.resolve(ResponsivePolicy::fixed(DeviceClass::Full)), -200.0);

    let fixed: Responsive<String> = serde_json::from_str("\"+=300%\"").unwrap();
    assert_eq!(
        fixed.resolve(ResponsivePolicy::fixed(DeviceClass::Compact)),
        "+=300%"
    );
}
