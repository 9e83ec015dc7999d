//! Input: keyboard and mouse state mapped to free-fly camera motion.
//!
//! # Invariants
//! - Camera logic consumes [`CameraIntent`]s, never raw window events.
//! - Mouse and scroll deltas cover exactly one frame.

mod controller;
mod state;

pub use controller::{CameraController, CameraIntent};
pub use state::{InputState, Key};
