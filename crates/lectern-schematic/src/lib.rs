//! Reading and writing Alpha `.schematic` files.

pub mod clipboard;
pub mod error;
pub mod format;
pub mod items;
pub mod reader;
pub mod remap;
pub mod writer;

pub use clipboard::Clipboard;
pub use error::{FormatError, SchematicError};
pub use reader::{read_schematic, read_schematic_gzip, ReadOutcome, SchematicReader};
pub use remap::{Conversion, IdMap, RemapTable};
pub use writer::{write_schematic, write_schematic_gzip, SchematicWriter};
