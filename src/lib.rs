pub mod commands;

// Re-export the member crates under one roof
pub use lectern_common as common;
pub use lectern_logger as logger;
pub use lectern_nbt as nbt;
pub use lectern_schematic as schematic;
pub use lectern_transform as transform;
pub use lectern_world as world;

pub use commands::{Command, CommandError};
pub use lectern_logger::{log, LogSeverity};
