//! Headless reference backend.
//!
//! [`SimCompositor`], [`SimTree`] and [`SimTimer`] implement the engine's
//! backend traits in memory and virtual time, so a whole indicator session
//! can be driven and sampled without a renderer.

pub mod compositor;
pub mod timer;
pub mod tree;

pub use compositor::{ActiveAnimation, AnimationState, SimCompositor};
pub use timer::SimTimer;
pub use tree::SimTree;
