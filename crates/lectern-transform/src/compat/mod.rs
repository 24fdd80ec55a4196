//! Hooks for tile entities of mods that store their orientation in NBT.

mod architecture_craft;
mod carpenters_blocks;

pub use architecture_craft::ArchitectureCraftHook;
pub use carpenters_blocks::{slope, CarpentersBlocksHook};
