use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::animation::tween::TweenEngine;
use crate::dom::{ElementDef, HeadlessDocument, PinPlacement};
use crate::foundation::core::{Rect, Viewport};
use crate::geometry::provider::TriggerGeometry;
use crate::policy::{DeviceClass, ResponsivePolicy};
use crate::trigger::spec::TriggerState;

fn setup() -> (ScrollOrchestrator, HeadlessDocument, TweenEngine) {
    let mut doc = HeadlessDocument::new(Viewport::new(1000.0, 500.0).unwrap(), 4000.0);
    doc.insert(ElementDef::with_class("hero", [0.0, 500.0, 1000.0, 300.0]))
        .unwrap();
    doc.insert(ElementDef::with_class("below", [0.0, 800.0, 1000.0, 300.0]))
        .unwrap();
    (
        ScrollOrchestrator::new(ResponsivePolicy::fixed(DeviceClass::Full)),
        doc,
        TweenEngine::new(),
    )
}

fn pinned_hero() -> TriggerSpec {
    let mut geom = TriggerGeometry::new(".hero");
    geom.start = "top top".parse().unwrap();
    geom.end = "+=100%".parse().unwrap();
    TriggerSpec::new(geom).pin(true)
}

#[test]
fn tick_coalesces_scroll_to_last_value() {
    let (mut orch, mut doc, mut tweens) = setup();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let s = seen.clone();
    let id = orch
        .register_trigger(
            TriggerSpec::new(TriggerGeometry::new(".below"))
                .on_update(move |ctx| s.borrow_mut().push(ctx.progress)),
        )
        .unwrap();
    for y in [100.0, 200.0, 450.0] {
        orch.push_event(RawEvent::Scroll { y });
    }
    let report = orch.tick(0.0, &mut doc, &mut tweens);
    assert_eq!(report.batch.coalesced, 3);
    assert_eq!(report.progress.unwrap().scroll_y, Some(450.0));
    // Window for "top bottom" .. "bottom top" is [300, 1100].
    assert_eq!(seen.borrow().len(), 1);
    assert_eq!(orch.trigger(id).unwrap().state(), TriggerState::Active);
}

#[test]
fn idle_tick_runs_no_progress_pass() {
    let (mut orch, mut doc, mut tweens) = setup();
    orch.register_trigger(pinned_hero()).unwrap();
    let report = orch.tick(0.0, &mut doc, &mut tweens);
    assert!(report.batch.is_idle());
    assert!(report.progress.is_none());
}

#[test]
fn resize_during_pin_reanchors_without_touching_progress() {
    let (mut orch, mut doc, mut tweens) = setup();
    let hero = doc.query(".hero").unwrap();
    let id = orch.register_trigger(pinned_hero()).unwrap();

    orch.push_event(RawEvent::Scroll { y: 750.0 });
    let report = orch.tick(0.0, &mut doc, &mut tweens);
    assert_eq!(orch.trigger(id).unwrap().progress(), 0.5);
    assert_eq!(report.progress.unwrap().pins.len(), 1);
    assert_eq!(
        doc.pin_placement(hero),
        Some(PinPlacement::Fixed {
            screen: Rect::new(0.0, 0.0, 1000.0, 300.0)
        })
    );

    let vp = Viewport::new(1000.0, 800.0).unwrap();
    doc.set_viewport(vp);
    doc.set_rect(hero, Rect::new(0.0, 600.0, 1000.0, 900.0));
    orch.push_event(RawEvent::Resize { viewport: vp });
    let report = orch.tick(1.0 / 60.0, &mut doc, &mut tweens);

    assert!(report.progress.is_none());
    assert_eq!(report.refreshed, vec![PinEvent::Reanchored {
        trigger: id,
        screen: Rect::new(0.0, 0.0, 1000.0, 300.0),
    }]);
    assert_eq!(orch.trigger(id).unwrap().progress(), 0.5);
    let window = orch.geometry().cached(id).unwrap().window;
    assert_eq!((window.start, window.end), (600.0, 1400.0));
}

#[test]
fn teardown_releases_pins_and_rejects_new_triggers() {
    let (mut orch, mut doc, mut tweens) = setup();
    let hero = doc.query(".hero").unwrap();
    orch.register_trigger(pinned_hero()).unwrap();
    orch.on_scroll(600.0, &mut doc, &mut tweens);
    assert!(matches!(
        doc.pin_placement(hero),
        Some(PinPlacement::Fixed { .. })
    ));

    orch.teardown(&mut doc);
    assert!(orch.is_torn_down());
    assert_eq!(doc.pin_placement(hero), Some(PinPlacement::default()));
    assert_eq!(doc.scroll_height(), 4000.0);
    assert_eq!(orch.triggers().count(), 0);
    assert!(orch.register_trigger(pinned_hero()).is_err());

    orch.push_event(RawEvent::Scroll { y: 10.0 });
    let report = orch.tick(0.0, &mut doc, &mut tweens);
    assert!(report.batch.is_idle());
}

#[test]
fn pinned_window_ignores_its_own_spacing() {
    let (mut orch, mut doc, mut tweens) = setup();
    let mut geom = TriggerGeometry::new(".hero");
    geom.start = "top top".parse().unwrap();
    geom.end = "top top".parse().unwrap();
    geom.end_anchor = Some(".below".into());
    let id = orch.register_trigger(TriggerSpec::new(geom).pin(true)).unwrap();

    let mut generation = None;
    for _ in 0..5 {
        orch.on_scroll(510.0, &mut doc, &mut tweens);
        orch.on_scroll(510.0, &mut doc, &mut tweens);
        let window = orch.geometry().cached(id).unwrap().window;
        assert_eq!((window.start, window.end), (500.0, 800.0));
        assert_eq!(doc.scroll_height(), 4300.0);
        assert!((orch.trigger(id).unwrap().progress() - 10.0 / 300.0).abs() < 1e-12);
        let g = orch.geometry().generation();
        assert_eq!(*generation.get_or_insert(g), g);
    }
}
