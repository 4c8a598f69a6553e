//! Fixed-width proposal names.
//!
//! Names are stored as at most 32 bytes of UTF-8 and exchanged with callers as
//! NUL-padded 32-byte buffers.

use crate::TypesError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A proposal name of at most [`ProposalName::MAX_LEN`] bytes, without NULs.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProposalName(String);

impl ProposalName {
    pub const MAX_LEN: usize = 32;

    pub fn new(name: impl Into<String>) -> Result<Self, TypesError> {
        let name = name.into();
        if name.len() > Self::MAX_LEN {
            return Err(TypesError::NameTooLong { len: name.len() });
        }
        // NUL terminates the padded encoding.
        if name.contains('\0') {
            return Err(TypesError::NulInName);
        }
        Ok(Self(name))
    }

    /// Decode a NUL-padded buffer. The name ends at the first NUL byte.
    pub fn from_bytes32(bytes: [u8; 32]) -> Result<Self, TypesError> {
        let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
        let text = std::str::from_utf8(&bytes[..end]).map_err(|_| TypesError::InvalidName)?;
        Ok(Self(text.to_string()))
    }

    /// Encode as a NUL-padded 32-byte buffer.
    pub fn to_bytes32(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        out[..self.0.len()].copy_from_slice(self.0.as_bytes());
        out
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProposalName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for ProposalName {
    type Error = TypesError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl TryFrom<String> for ProposalName {
    type Error = TypesError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<ProposalName> for String {
    fn from(name: ProposalName) -> Self {
        name.0
    }
}

impl PartialEq<str> for ProposalName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ProposalName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
