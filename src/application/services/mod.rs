//! Application services.

/// Per-chat live photo tracking.
pub mod photo_tracker;
/// Pure screen builders.
pub mod screen_renderer;

pub use photo_tracker::PhotoTracker;
