use super::*;

const ALL: [Ease; 13] = [
    Ease::Linear,
    Ease::InQuad,
    Ease::OutQuad,
    Ease::InOutQuad,
    Ease::InCubic,
    Ease::OutCubic,
    Ease::InOutCubic,
    Ease::InQuart,
    Ease::OutQuart,
    Ease::InOutQuart,
    Ease::InQuint,
    Ease::OutQuint,
    Ease::InOutQuint,
];

#[test]
fn endpoints_are_fixed() {
    for e in ALL {
        assert!((e.apply(0.0) - 0.0).abs() < 1e-12, "{e:?} at 0");
        assert!((e.apply(1.0) - 1.0).abs() < 1e-12, "{e:?} at 1");
    }
}

#[test]
fn in_out_is_half_at_midpoint() {
    for e in [
        Ease::InOutQuad,
        Ease::InOutCubic,
        Ease::InOutQuart,
        Ease::InOutQuint,
    ] {
        assert!((e.apply(0.5) - 0.5).abs() < 1e-12, "{e:?}");
    }
}

#[test]
fn input_is_clamped() {
    assert_eq!(Ease::OutCubic.apply(-3.0), 0.0);
    assert_eq!(Ease::OutCubic.apply(7.0), 1.0);
}

#[test]
fn power_names_parse_and_print() {
    assert_eq!("power3.out".parse::<Ease>().unwrap(), Ease::OutQuart);
    assert_eq!("power2.out".parse::<Ease>().unwrap(), Ease::OutCubic);
    assert_eq!("power3.inOut".parse::<Ease>().unwrap(), Ease::InOutQuart);
    assert_eq!("none".parse::<Ease>().unwrap(), Ease::Linear);
    assert_eq!("power4".parse::<Ease>().unwrap(), Ease::OutQuint);
    for e in ALL {
        assert_eq!(e.name().parse::<Ease>().unwrap(), e);
    }
}

#[test]
fn unknown_names_are_rejected() {
    assert!("bounce.out".parse::<Ease>().is_err());
    assert!("power9.out".parse::<Ease>().is_err());
    assert!("power2.sideways".parse::<Ease>().is_err());
}

#[test]
fn serde_uses_names() {
    let s = serde_json::to_string(&Ease::OutQuart).unwrap();
    assert_eq!(s, "\"power3.out\"");
    let e: Ease = serde_json::from_str("\"power2.inOut\"").unwrap();
    assert_eq!(e, Ease::InOutCubic);
}
