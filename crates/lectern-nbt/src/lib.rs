//! Named binary tag model and its big-endian stream codec.

pub mod compound;
pub mod error;
pub mod list;
pub mod stream;
pub mod tag;

pub use compound::Compound;
pub use error::NbtError;
pub use list::List;
pub use stream::{decode, decode_slice, encode, NbtFile, MAX_DEPTH};
pub use tag::{Tag, TagType};
