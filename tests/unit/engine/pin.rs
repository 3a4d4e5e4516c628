use super::*;
use crate::dom::{ElementDef, HeadlessDocument};
use crate::foundation::core::Viewport;

fn setup() -> (HeadlessDocument, ResolvedGeometry) {
    let mut doc = HeadlessDocument::new(Viewport::new(1000.0, 800.0).unwrap(), 3000.0);
    let el = doc
        .insert(ElementDef::with_class("stage", [0.0, 400.0, 1000.0, 800.0]))
        .unwrap();
    let resolved = ResolvedGeometry {
        anchor: el,
        // "top 25%" with a 2000px pinned distance.
        window: ScrollWindow::new(200.0, 2200.0),
    };
    (doc, resolved)
}

#[test]
fn offset_tracks_progress_over_span() {
    let w = ScrollWindow::new(200.0, 2200.0);
    assert_eq!(pinned_offset(w, 0.0), 0.0);
    assert_eq!(pinned_offset(w, 0.5), 1000.0);
    assert_eq!(pinned_offset(w, 3.0), 2000.0);
}

#[test]
fn pins_at_start_position_and_releases_at_end() {
    let (mut doc, r) = setup();
    let mut pins = PinController::new();
    let id = TriggerId(0);

    let ev = pins.update(id, r, 0.1, &mut doc).unwrap();
    let expected = Rect::new(0.0, 200.0, 1000.0, 1000.0);
    assert_eq!(
        ev,
        PinEvent::Pinned {
            trigger: id,
            screen: expected
        }
    );
    assert_eq!(
        doc.pin_placement(r.anchor),
        Some(PinPlacement::Fixed { screen: expected })
    );

    // Still inside the window: nothing changes.
    assert_eq!(pins.update(id, r, 0.7, &mut doc), None);

    let ev = pins.update(id, r, 1.0, &mut doc).unwrap();
    assert_eq!(
        ev,
        PinEvent::Released {
            trigger: id,
            offset_y: 2000.0
        }
    );
    assert_eq!(pins.update(id, r, 1.0, &mut doc), None);
    assert_eq!(pins.phase(id), PinPhase::AtEnd);
}

#[test]
fn backward_pass_repins_once_and_releases_at_start() {
    let (mut doc, r) = setup();
    let mut pins = PinController::new();
    let id = TriggerId(0);
    pins.update(id, r, 1.0, &mut doc);

    let repin = pins.update(id, r, 0.9, &mut doc);
    assert!(matches!(repin, Some(PinEvent::Pinned { .. })));
    assert_eq!(pins.update(id, r, 0.5, &mut doc), None);

    let ev = pins.update(id, r, 0.0, &mut doc).unwrap();
    assert_eq!(
        ev,
        PinEvent::Released {
            trigger: id,
            offset_y: 0.0
        }
    );
    assert_eq!(
        doc.pin_placement(r.anchor),
        Some(PinPlacement::Flow { offset_y: 0.0 })
    );
}

#[test]
fn spacing_is_written_only_on_change() {
    let (mut doc, r) = setup();
    let mut pins = PinController::new();
    assert!(pins.sync_spacing(TriggerId(0), r, &mut doc));
    assert!(!pins.sync_spacing(TriggerId(0), r, &mut doc));
    assert_eq!(doc.scroll_height(), 5000.0);
}

#[test]
fn reanchor_uses_placeholder_and_new_window() {
    let (mut doc, r) = setup();
    let mut pins = PinController::new();
    let id = TriggerId(0);
    assert_eq!(pins.reanchor(id, r, &mut doc), None);

    pins.update(id, r, 0.5, &mut doc);
    // Viewport shrank: "top 25%" now resolves 50px later.
    let moved = ResolvedGeometry {
        anchor: r.anchor,
        window: ScrollWindow::new(250.0, 2250.0),
    };
    let ev = pins.reanchor(id, moved, &mut doc).unwrap();
    let screen = Rect::new(0.0, 150.0, 1000.0, 950.0);
    assert_eq!(ev, PinEvent::Reanchored { trigger: id, screen });
    assert_eq!(pins.phase(id), PinPhase::Pinned);
}

#[test]
fn release_all_restores_flow_and_spacing() {
    let (mut doc, r) = setup();
    let mut pins = PinController::new();
    let id = TriggerId(0);
    pins.sync_spacing(id, r, &mut doc);
    pins.update(id, r, 0.5, &mut doc);
    pins.release_all(&[(id, r.anchor)], &mut doc);
    assert_eq!(doc.pin_placement(r.anchor), Some(PinPlacement::default()));
    assert_eq!(doc.scroll_height(), 3000.0);
    assert_eq!(pins.phase(id), PinPhase::AtStart);
}
