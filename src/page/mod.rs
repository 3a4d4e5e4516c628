//! Declarative page description, its bootstrap into live triggers, and replay traces.

pub(crate) mod bootstrap;
pub(crate) mod config;
pub(crate) mod trace;
