//! Renderer-agnostic core: the free-fly camera and the component lifecycle.
//!
//! # Invariants
//! - Camera direction is unit length after every transform.
//! - Yaw and pitch changes are relative rotations of the current direction.
//! - Components are unloaded exactly once, in reverse registration order.

mod camera;
mod lifecycle;

pub use camera::{FAR_PLANE, FIELD_OF_VIEW, NEAR_PLANE, OrbitCamera};
pub use lifecycle::{BoxError, GameLoop, LifecycleError, Renderable, Stage};
