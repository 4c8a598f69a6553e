//! Errors raised while constructing the primitive types.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypesError {
    #[error("invalid account address: {0}")]
    InvalidAddress(String),

    #[error("proposal name is {len} bytes, at most 32 are allowed")]
    NameTooLong { len: usize },

    #[error("proposal name is not valid UTF-8")]
    InvalidName,

    #[error("proposal name contains a NUL byte")]
    NulInName,
}
