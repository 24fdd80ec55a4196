use lectern_nbt::TagType;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransformError {
    #[error("rotation of {0} degrees is not a multiple of 90")]
    NotRightAngle(i32),

    #[error("field {field:?} has type {found}, expected {expected}")]
    FieldType {
        field: &'static str,
        expected: &'static str,
        found: TagType,
    },

    #[error("field {0:?} is missing")]
    MissingField(&'static str),

    #[error("unknown block side {0}")]
    UnknownSide(i8),
}
