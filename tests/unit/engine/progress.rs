use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::animation::tween::{PropertySet, TweenEngine, TweenOptions};
use crate::dom::{ElementDef, HeadlessDocument};
use crate::foundation::core::Viewport;
use crate::geometry::provider::TriggerGeometry;
use crate::trigger::spec::TriggerSpec;

struct Rig {
    doc: HeadlessDocument,
    tweens: TweenEngine,
    registry: TriggerRegistry,
    geometry: GeometryProvider,
    pins: PinController,
    engine: ProgressEngine,
}

impl Rig {
    fn new() -> Self {
        let mut doc = HeadlessDocument::new(Viewport::new(1000.0, 500.0).unwrap(), 10_000.0);
        // Element top at y, "top top" start, "+=100" end => window [y, y + 100].
        for y in [0.0, 100.0, 200.0] {
            doc.insert(ElementDef::with_class("band", [0.0, y, 1000.0, 100.0]))
                .unwrap();
        }
        Self {
            doc,
            tweens: TweenEngine::new(),
            registry: TriggerRegistry::new(),
            geometry: GeometryProvider::new(),
            pins: PinController::new(),
            engine: ProgressEngine::new(),
        }
    }

    fn geom(el: u32) -> TriggerGeometry {
        TriggerGeometry {
            anchor: crate::foundation::core::ElementId(el).into(),
            start: "top top".parse().unwrap(),
            end: "+=100".parse().unwrap(),
            end_anchor: None,
        }
    }

    fn scroll(&mut self, y: f64) -> FrameReport {
        self.engine.on_scroll(
            y,
            &mut self.registry,
            &mut self.geometry,
            &mut self.pins,
            &mut self.doc,
            &mut self.tweens,
        )
    }
}

#[test]
fn crossings_replay_skipped_states() {
    use TriggerState::*;
    assert_eq!(crossings(Before, After).as_slice(), &[
        Crossing::Enter,
        Crossing::Leave
    ]);
    assert_eq!(crossings(After, Before).as_slice(), &[
        Crossing::EnterBack,
        Crossing::LeaveBack
    ]);
    assert_eq!(crossings(Active, After).as_slice(), &[Crossing::Leave]);
    assert!(crossings(Active, Active).is_empty());
}

#[test]
fn two_sample_jump_emits_enter_then_leave() {
    let mut rig = Rig::new();
    let id = rig.registry.register(TriggerSpec::new(Rig::geom(0))).unwrap();
    assert!(rig.scroll(0.0).transitions.is_empty());
    let report = rig.scroll(101.0);
    let got: Vec<Crossing> = report.transitions.iter().map(|t| t.crossing).collect();
    assert_eq!(got, vec![Crossing::Enter, Crossing::Leave]);
    assert_eq!(rig.registry.get(id).unwrap().state(), TriggerState::After);
    assert_eq!(rig.registry.get(id).unwrap().progress(), 1.0);
}

#[test]
fn callbacks_fire_once_per_crossing_not_per_frame() {
    let mut rig = Rig::new();
    let log = Rc::new(RefCell::new(Vec::new()));
    let (a, b, c, d) = (log.clone(), log.clone(), log.clone(), log.clone());
    rig.registry
        .register(
            TriggerSpec::new(Rig::geom(0))
                .on_enter(move |_| a.borrow_mut().push("enter"))
                .on_leave(move |_| b.borrow_mut().push("leave"))
                .on_enter_back(move |_| c.borrow_mut().push("enter_back"))
                .on_leave_back(move |_| d.borrow_mut().push("leave_back")),
        )
        .unwrap();
    for y in [10.0, 20.0, 30.0, 50.0, 150.0, 160.0, 50.0, 40.0, -5.0, -10.0] {
        rig.scroll(y);
    }
    assert_eq!(
        *log.borrow(),
        vec!["enter", "leave", "enter_back", "leave_back"]
    );
}

#[test]
fn update_and_bucket_callbacks_follow_progress() {
    let mut rig = Rig::new();
    let updates = Rc::new(RefCell::new(Vec::new()));
    let buckets = Rc::new(RefCell::new(Vec::new()));
    let (u, bk) = (updates.clone(), buckets.clone());
    rig.registry
        .register(
            TriggerSpec::new(Rig::geom(0))
                .thresholds(vec![0.25, 0.6])
                .on_update(move |ctx| u.borrow_mut().push(ctx.progress))
                .on_bucket(move |_, i| bk.borrow_mut().push(i)),
        )
        .unwrap();
    for y in [10.0, 10.0, 30.0, 40.0, 60.0, 99.0, 5.0] {
        rig.scroll(y);
    }
    assert_eq!(*updates.borrow(), vec![0.1, 0.3, 0.4, 0.6, 0.99, 0.05]);
    assert_eq!(*buckets.borrow(), vec![1, 2, 0]);
}

#[test]
fn toggle_flag_reports_activity_changes() {
    let mut rig = Rig::new();
    let flags = Rc::new(RefCell::new(Vec::new()));
    let f = flags.clone();
    rig.registry
        .register(TriggerSpec::new(Rig::geom(0)).on_toggle(move |_, on| f.borrow_mut().push(on)))
        .unwrap();
    rig.scroll(50.0);
    rig.scroll(500.0);
    rig.scroll(50.0);
    rig.scroll(-1.0);
    assert_eq!(*flags.borrow(), vec![true, false, true, false]);
}

#[test]
fn toggle_actions_drive_the_associated_tween() {
    let mut rig = Rig::new();
    let el = crate::foundation::core::ElementId(0);
    let to: PropertySet = [("opacity".to_owned(), 1.0)].into_iter().collect();
    let from: PropertySet = [("opacity".to_owned(), 0.0)].into_iter().collect();
    let handle = rig.tweens.animate_from(
        &[el],
        from,
        to,
        TweenOptions {
            paused: true,
            ..TweenOptions::default()
        },
    );
    rig.registry
        .register(
            TriggerSpec::new(Rig::geom(0))
                .animation(handle)
                .toggle_actions("play reverse play reverse".parse().unwrap()),
        )
        .unwrap();

    let r = rig.scroll(50.0);
    assert_eq!(r.transitions[0].action, Some(ToggleAction::Play));
    assert!(rig.tweens.is_playing(handle));

    rig.tweens.tick(10.0, &mut rig.doc);
    let r = rig.scroll(200.0);
    assert_eq!(r.transitions[0].action, Some(ToggleAction::Reverse));
    assert!(rig.tweens.is_playing(handle));
}

#[test]
fn missing_anchor_skips_only_that_trigger() {
    let mut rig = Rig::new();
    let missing = rig
        .registry
        .register(TriggerSpec::new(TriggerGeometry::new(".absent")))
        .unwrap();
    let ok = rig.registry.register(TriggerSpec::new(Rig::geom(1))).unwrap();
    let r = rig.scroll(150.0);
    assert_eq!(r.skipped, vec![missing]);
    assert_eq!(r.transitions.len(), 1);
    assert_eq!(r.transitions[0].trigger, ok);
}

#[test]
fn scrub_seeks_tween_each_frame_until_settled() {
    let mut rig = Rig::new();
    let el = crate::foundation::core::ElementId(2);
    let to: PropertySet = [("y".to_owned(), -200.0)].into_iter().collect();
    let handle = rig.tweens.animate(
        &[el],
        to,
        TweenOptions {
            paused: true,
            ..TweenOptions::default()
        },
    );
    let id = rig
        .registry
        .register(TriggerSpec::new(Rig::geom(0)).animation(handle).scrub(0.0))
        .unwrap();
    let r = rig.scroll(50.0);
    // Scrubbed triggers ignore toggle actions.
    assert_eq!(r.transitions[0].action, None);
    rig.engine
        .advance_scrubs(1.0 / 60.0, &mut rig.registry, &mut rig.tweens);
    assert_eq!(rig.tweens.progress(handle), Some(0.5));
    assert!(rig.registry.get(id).unwrap().is_scrubbed());
}

#[test]
fn reports_number_frames_and_tag_their_transitions() {
    let mut rig = Rig::new();
    rig.registry.register(TriggerSpec::new(Rig::geom(0))).unwrap();
    assert_eq!(rig.scroll(0.0).frame, 1);
    let report = rig.scroll(50.0);
    assert_eq!(report.frame, 2);
    assert_eq!(report.scroll_y, Some(50.0));
    assert!(report.transitions.iter().all(|t| t.frame == 2));
    assert_eq!(report.transitions.len(), 1);
}
