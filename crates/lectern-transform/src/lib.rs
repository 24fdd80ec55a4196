//! Rotation hooks that rewrite orientation fields stored in tile-entity trees.

pub mod compat;
pub mod error;
pub mod hook;
pub mod rotation;

pub use compat::{ArchitectureCraftHook, CarpentersBlocksHook};
pub use error::TransformError;
pub use hook::{BlockTransformHook, HookChain};
pub use rotation::AxisRotation;
