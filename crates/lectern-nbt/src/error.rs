use std::io;

use crate::tag::TagType;

/// Errors raised while decoding or encoding a tag stream.
#[derive(Debug, thiserror::Error)]
pub enum NbtError {
    #[error("IO error: {0}")]
    Io(#[source] io::Error),

    #[error("tag stream ended unexpectedly")]
    Truncated,

    #[error("invalid tag type: {0}")]
    InvalidTagType(u8),

    #[error("negative length prefix: {0}")]
    NegativeLength(i32),

    #[error("list of End tags declares {0} elements")]
    NonEmptyEndList(i32),

    #[error("list declared as {declared} holds a {found} element")]
    ListElementMismatch { declared: TagType, found: TagType },

    #[error("string is not valid UTF-8")]
    InvalidUtf8,

    #[error("tag nesting exceeds {} levels", crate::stream::MAX_DEPTH)]
    DepthLimitExceeded,

    #[error("string of {0} bytes does not fit a 16-bit length prefix")]
    StringTooLong(usize),
}

impl NbtError {
    /// True when the error describes malformed data rather than a failing stream.
    pub fn is_format(&self) -> bool {
        !matches!(self, NbtError::Io(_))
    }
}

impl From<io::Error> for NbtError {
    fn from(err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            NbtError::Truncated
        } else {
            NbtError::Io(err)
        }
    }
}
