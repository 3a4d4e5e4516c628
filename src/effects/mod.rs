//! Page-level effects driven from the frame tick rather than from triggers.

pub(crate) mod pointer;
pub(crate) mod progress_bar;
pub(crate) mod text;
