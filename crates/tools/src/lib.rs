//! Developer tooling: the statistics overlay store and the probes that feed it.
//!
//! # Invariants
//! - Overlay entries render in insertion order.
//! - Frame rate is published at most once per elapsed second.

mod alloc;
mod fps;
mod overlay;

pub use alloc::TrackingAllocator;
pub use fps::FpsCounter;
pub use overlay::StatisticsOverlay;
