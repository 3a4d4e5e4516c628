//! Scrollcast is a scroll-linked animation orchestrator.
//!
//! It maps a page's scroll position to per-trigger progress and fires state callbacks
//! exactly once per boundary crossing. Pinned regions are held on screen while their
//! progress advances. The public API is frame-oriented:
//!
//! - Register [`TriggerSpec`]s on a [`ScrollOrchestrator`]
//! - Feed it [`RawEvent`]s and call [`ScrollOrchestrator::tick`] once per animation frame
//! - Implement [`Document`] and [`Tweener`] for the host, or use the headless
//!   [`HeadlessDocument`] and [`TweenEngine`]
//!
//! [`PageConfig`] and [`HeadlessSession`] describe and replay whole pages from JSON.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod dom;
pub(crate) mod effects;
pub(crate) mod engine;
pub(crate) mod geometry;
/// Public orchestrator facade.
pub mod orchestrator;
pub(crate) mod page;
/// Device-class policy.
pub mod policy;
/// Threshold-mapped state selection.
pub mod select;
pub(crate) mod trigger;

pub use crate::foundation::core::{
    Direction, ElementId, Point, Rect, ScrollWindow, Size, TriggerId, Vec2, Viewport,
};
pub use crate::foundation::error::{ScrollError, ScrollResult};

pub use crate::animation::ease::Ease;
pub use crate::animation::tween::{
    PropertySet, ToggleAction, TweenEngine, TweenHandle, TweenOptions, Tweener,
};
pub use crate::dom::{Document, ElementDef, HeadlessDocument, PinPlacement};
pub use crate::effects::pointer::{HoverImage, HoverTilt};
pub use crate::effects::progress_bar::{PageProgress, scroll_fraction};
pub use crate::effects::text::{CHAR_STAGGER, Glyph, SplitText, split_chars};
pub use crate::engine::pin::{PinController, PinEvent, PinPhase, pinned_offset};
pub use crate::engine::progress::{FrameReport, TransitionRecord, crossings};
pub use crate::engine::scheduler::{FrameBatch, FrameScheduler, RawEvent};
pub use crate::engine::scrub::ScrubSmoother;
pub use crate::geometry::edge::{Anchor, EdgePoint, EdgeSpec, EndSpec};
pub use crate::geometry::provider::{GeometryProvider, ResolvedGeometry, TriggerGeometry};
pub use crate::orchestrator::{ScrollOrchestrator, TickReport};
pub use crate::page::bootstrap::{HeadlessSession, Page, PageFrame};
pub use crate::page::config::{
    DocumentConfig, HoverImageConfig, HoverTiltConfig, PageConfig, ProgressBarConfig,
    TriggerAction, TriggerConfig,
};
pub use crate::page::trace::{ReplayTrace, TraceStep};
pub use crate::policy::{DeviceClass, Responsive, ResponsivePolicy};
pub use crate::select::{BucketTracker, Thresholds, select_state};
pub use crate::trigger::registry::{Trigger, TriggerHandle, TriggerRegistry};
pub use crate::trigger::spec::{
    Callback, CallbackCtx, Callbacks, Crossing, ToggleActions, TriggerSpec, TriggerState,
    ValueCallback,
};
