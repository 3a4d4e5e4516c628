pub(crate) mod pin;
pub(crate) mod progress;
pub(crate) mod scheduler;
pub(crate) mod scrub;
