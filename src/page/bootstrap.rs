//! Page bootstrap: turns a [`PageConfig`] into registered triggers and live effects.

use crate::animation::tween::{TweenEngine, TweenOptions, Tweener};
use crate::dom::{Document, HeadlessDocument};
use crate::effects::pointer::{HoverImage, HoverTilt};
use crate::effects::progress_bar::PageProgress;
use crate::engine::scheduler::RawEvent;
use crate::foundation::error::ScrollResult;
use crate::orchestrator::{ScrollOrchestrator, TickReport};
use crate::page::config::{PageConfig, TriggerAction, TriggerConfig};
use crate::page::trace::{ReplayTrace, TraceStep};
use crate::policy::ResponsivePolicy;
use crate::trigger::registry::TriggerHandle;
use crate::trigger::spec::TriggerSpec;

/// Output of one page frame.
#[derive(Clone, Debug, Default, serde::Serialize)]
pub struct PageFrame {
    /// Orchestrator tick.
    pub tick: TickReport,
    /// Keys pressed since the previous frame, for host-side wiring (e.g. closing a menu
    /// on `Escape`).
    pub keys: Vec<String>,
    /// `true` when the progress bar was rewritten.
    pub progress_bar_changed: bool,
}

/// A bootstrapped page: the orchestrator plus page-level effects.
#[derive(Debug)]
pub struct Page {
    orchestrator: ScrollOrchestrator,
    handles: Vec<TriggerHandle>,
    progress: Option<PageProgress>,
    tilt: Option<HoverTilt>,
    hover: Option<HoverImage>,
}

impl Page {
    /// Register every configured trigger and wire the effects.
    ///
    /// The device class is decided here, once, from the document's viewport width. A
    /// first scroll sample at the document's current offset is queued so the first frame
    /// evaluates every trigger.
    #[tracing::instrument(level = "debug", skip_all, fields(triggers = config.triggers.len()))]
    pub fn build(
        config: &PageConfig,
        doc: &mut dyn Document,
        tweens: &mut dyn Tweener,
    ) -> ScrollResult<Self> {
        config.validate()?;
        let policy = ResponsivePolicy::classify(doc.viewport().width, config.breakpoint);
        tracing::debug!(class = ?policy.class(), "device class decided");

        let mut orchestrator = ScrollOrchestrator::new(policy);
        let mut handles = Vec::with_capacity(config.triggers.len());
        for trigger in &config.triggers {
            if !trigger.applies_to(policy) {
                tracing::debug!(
                    label = ?trigger.label,
                    class = ?policy.class(),
                    "trigger not registered for this device class"
                );
                continue;
            }
            let spec = trigger_spec(trigger, policy, doc, tweens);
            handles.push(orchestrator.register_trigger(spec)?);
        }

        let progress = config.progress_bar.as_ref().and_then(|cfg| {
            let bar = doc.query(&cfg.bar);
            if bar.is_none() {
                tracing::warn!(selector = %cfg.bar, "progress bar element not found");
            }
            let light = cfg.light_section.as_deref().and_then(|s| doc.query(s));
            bar.map(|bar| PageProgress::new(bar, light))
        });
        let tilt = config
            .hover_tilt
            .as_ref()
            .map(|cfg| HoverTilt::new(&doc.query_all(&cfg.targets), policy));
        let hover = config.hover_image.as_ref().and_then(|cfg| {
            let container = doc.query(&cfg.container)?;
            let image = cfg
                .image
                .as_deref()
                .and_then(|s| doc.query(s))
                .unwrap_or(container);
            Some(HoverImage::new(
                container,
                image,
                doc.query_all(&cfg.items),
                policy,
            ))
        });

        orchestrator.push_event(RawEvent::Scroll { y: doc.scroll_y() });
        Ok(Self {
            orchestrator,
            handles,
            progress,
            tilt,
            hover,
        })
    }

    /// Underlying orchestrator.
    pub fn orchestrator(&self) -> &ScrollOrchestrator {
        &self.orchestrator
    }

    /// Handles of the registered triggers, in configuration order.
    pub fn handles(&self) -> &[TriggerHandle] {
        &self.handles
    }

    /// Queue a raw event for the next frame.
    pub fn push_event(&mut self, event: RawEvent) {
        self.orchestrator.push_event(event);
    }

    /// Run one frame: triggers first, then pointer effects, then the progress bar.
    pub fn frame(
        &mut self,
        now: f64,
        doc: &mut dyn Document,
        tweens: &mut dyn Tweener,
    ) -> PageFrame {
        let tick = self.orchestrator.tick(now, doc, tweens);
        let mut keys = Vec::new();

        for event in &tick.batch.discrete {
            match event {
                RawEvent::PointerEnter { target } => {
                    if let Some(hover) = self.hover.as_mut() {
                        hover.on_enter(*target, doc);
                    }
                }
                RawEvent::PointerLeave { target } => {
                    if let Some(hover) = self.hover.as_mut() {
                        hover.on_leave(*target, doc);
                    }
                }
                RawEvent::Key { key } => keys.push(key.clone()),
                _ => {}
            }
        }
        if let Some(position) = tick.batch.pointer {
            if let Some(tilt) = &self.tilt {
                tilt.on_pointer_move(position, doc.viewport(), tweens);
            }
            if let Some(hover) = self.hover.as_mut() {
                hover.on_move(position, doc);
            }
        }

        let progress_bar_changed = self
            .progress
            .as_mut()
            .is_some_and(|bar| bar.update(doc));

        PageFrame {
            tick,
            keys,
            progress_bar_changed,
        }
    }

    /// Tear the orchestrator down; pins are released.
    pub fn teardown(&mut self, doc: &mut dyn Document) {
        self.orchestrator.teardown(doc);
    }
}

fn trigger_spec(
    cfg: &TriggerConfig,
    policy: ResponsivePolicy,
    doc: &mut dyn Document,
    tweens: &mut dyn Tweener,
) -> TriggerSpec {
    let mut spec = TriggerSpec::new(cfg.geometry(policy))
        .pin(cfg.pin)
        .toggle_actions(cfg.toggle_actions);
    if let Some(label) = &cfg.label {
        spec = spec.label(label.clone());
    }
    if let Some(scrub) = &cfg.scrub {
        spec = spec.scrub(scrub.resolve(policy));
    }

    match &cfg.action {
        None => spec,
        Some(TriggerAction::Tween {
            targets,
            from,
            to,
            options,
        }) => {
            let els = doc.query_all(targets);
            if els.is_empty() {
                tracing::warn!(selector = %targets, "tween has no targets");
            }
            let opts = TweenOptions {
                paused: true,
                ..*options
            };
            let to = to.resolve(policy);
            let handle = match from {
                Some(from) => tweens.animate_from(&els, from.clone(), to, opts),
                None => tweens.animate(&els, to, opts),
            };
            spec.animation(handle)
        }
        Some(TriggerAction::ToggleClass { targets, class }) => {
            let els = doc.query_all(targets);
            let class = class.clone();
            spec.on_toggle(move |ctx, active| {
                for &el in &els {
                    ctx.doc.set_class(el, &class, active);
                }
            })
        }
        Some(TriggerAction::ImageSequence {
            target,
            attr,
            frames,
            thresholds,
        }) => {
            let Some(el) = doc.query(target) else {
                tracing::warn!(selector = %target, "image sequence target not found");
                return spec;
            };
            if let Some(first) = frames.first() {
                doc.set_attr(el, attr, first);
            }
            let attr = attr.clone();
            let frames = frames.clone();
            spec.thresholds(thresholds.resolve(policy))
                .on_bucket(move |ctx, bucket| {
                    if let Some(frame) = frames.get(bucket) {
                        ctx.doc.set_attr(el, &attr, frame);
                    }
                })
        }
    }
}

/// A page running against an in-memory document and tween engine.
#[derive(Debug)]
pub struct HeadlessSession {
    page: Page,
    doc: HeadlessDocument,
    tweens: TweenEngine,
    last_now: Option<f64>,
}

impl HeadlessSession {
    /// Build the document described by `config` and bootstrap the page on it.
    pub fn new(config: &PageConfig) -> ScrollResult<Self> {
        let mut doc = HeadlessDocument::from_defs(
            config.document.viewport,
            config.document.content_height,
            &config.document.elements,
        )?;
        let mut tweens = TweenEngine::new();
        let page = Page::build(config, &mut doc, &mut tweens)?;
        Ok(Self {
            page,
            doc,
            tweens,
            last_now: None,
        })
    }

    /// The bootstrapped page.
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// The in-memory document.
    pub fn document(&self) -> &HeadlessDocument {
        &self.doc
    }

    /// Mutable document, for simulating layout changes between frames.
    pub fn document_mut(&mut self) -> &mut HeadlessDocument {
        &mut self.doc
    }

    /// The in-memory tween engine.
    pub fn tweens(&self) -> &TweenEngine {
        &self.tweens
    }

    /// Deliver `event` to the document (scroll, resize) and queue it for the next frame.
    pub fn push(&mut self, event: RawEvent) {
        match &event {
            RawEvent::Scroll { y } => self.doc.set_scroll_y(*y),
            RawEvent::Resize { viewport } => self.doc.set_viewport(*viewport),
            _ => {}
        }
        self.page.push_event(event);
    }

    /// Apply one trace step and run its frame; tweens advance after the triggers.
    pub fn step(&mut self, step: &TraceStep) -> PageFrame {
        for event in &step.events {
            self.push(event.clone());
        }
        let dt = self
            .last_now
            .map(|t| (step.at - t).max(0.0))
            .unwrap_or(0.0);
        self.last_now = Some(step.at);
        let frame = self.page.frame(step.at, &mut self.doc, &mut self.tweens);
        self.tweens.tick(dt, &mut self.doc);
        frame
    }

    /// Run every step of `trace`.
    pub fn replay(&mut self, trace: &ReplayTrace) -> Vec<PageFrame> {
        trace.steps.iter().map(|s| self.step(s)).collect()
    }

    /// Release pins and stop the orchestrator.
    pub fn teardown(&mut self) {
        self.page.teardown(&mut self.doc);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/page/bootstrap.rs"]
mod tests;
