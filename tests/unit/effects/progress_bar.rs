use super::*;
use crate::dom::{ElementDef, HeadlessDocument};
use crate::foundation::core::Viewport;

#[test]
fn fraction_is_clamped_and_safe_for_short_documents() {
    assert_eq!(scroll_fraction(500.0, 2000.0, 1000.0), 0.5);
    assert_eq!(scroll_fraction(-20.0, 2000.0, 1000.0), 0.0);
    assert_eq!(scroll_fraction(5000.0, 2000.0, 1000.0), 1.0);
    assert_eq!(scroll_fraction(0.0, 800.0, 1000.0), 0.0);
    assert_eq!(scroll_fraction(0.0, 1000.0, 1000.0), 0.0);
}

#[test]
fn intersection_uses_strict_edges() {
    assert!(intersects_viewport(Rect::new(0.0, 999.0, 10.0, 1200.0), 1000.0));
    assert!(!intersects_viewport(Rect::new(0.0, 1000.0, 10.0, 1200.0), 1000.0));
    assert!(!intersects_viewport(Rect::new(0.0, -300.0, 10.0, 0.0), 1000.0));
}

#[test]
fn bar_turns_dark_over_footer_and_writes_only_on_change() {
    let mut doc = HeadlessDocument::new(Viewport::new(800.0, 1000.0).unwrap(), 3000.0);
    let bar = doc
        .insert(ElementDef::with_class("progress-bar", [0.0, 0.0, 0.0, 4.0]))
        .unwrap();
    let footer = doc
        .insert(ElementDef::with_class("footer", [0.0, 2500.0, 800.0, 500.0]))
        .unwrap();
    let mut progress = PageProgress::new(bar, Some(footer));

    assert!(progress.update(&mut doc));
    assert_eq!(doc.style(bar, "width"), Some(0.0));
    assert!(!doc.has_class(bar, DARK_CLASS));
    assert!(!progress.update(&mut doc));

    doc.set_scroll_y(1600.0);
    assert!(progress.update(&mut doc));
    assert_eq!(doc.style(bar, "width"), Some(80.0));
    assert!(doc.has_class(bar, DARK_CLASS));

    doc.set_scroll_y(1000.0);
    progress.update(&mut doc);
    assert!(!doc.has_class(bar, DARK_CLASS));
    assert_eq!(progress.width(), Some(50.0));
}
