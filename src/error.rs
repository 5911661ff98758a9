use crate::ValueType;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReaderError>;

#[derive(Error, Debug)]
pub enum ReaderError {
    #[error("no column named '{0}'")]
    ColumnNotFound(String),
    #[error("column index {0} is out of range for {1} columns")]
    IndexOutOfRange(usize, usize),
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    #[error("{0} is not supported by this reader")]
    NotSupported(&'static str),
    #[error("cannot read {0:?} value as {1}")]
    TypeCast(ValueType, &'static str),
    #[error("entity declares no property named '{0}'")]
    UnknownProperty(String),
    #[error("reader is closed")]
    Closed,
}
