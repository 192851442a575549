use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::git::error::{Error, Result};

const OID_HEX_LEN: usize = 40;

/// Object id of a git object: 40 lowercase hex digits.
///
/// Independent of the engine; converted to `git2::Oid` only when handed to
/// [`Engine`](crate::git::Engine).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Oid(String);

impl Oid {
    /// Validate `oid` against the object id grammar.
    ///
    /// Fails with [`Error::InvalidOid`], which is a fatal error kind: the
    /// caller passed something that was never an object id.
    pub fn new(oid: impl Into<String>) -> Result<Self> {
        let oid = oid.into();
        let valid = oid.len() == OID_HEX_LEN
            && oid
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));
        if !valid {
            return Err(Error::InvalidOid { oid });
        }
        Ok(Self(oid))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Abbreviated form, as used in log lines.
    pub fn short(&self, len: usize) -> &str {
        &self.0[..len.min(OID_HEX_LEN)]
    }

    pub(crate) fn from_git2(oid: git2::Oid) -> Self {
        Self(oid.to_string())
    }

    pub(crate) fn to_git2(&self) -> Result<git2::Oid> {
        Ok(git2::Oid::from_str(&self.0)?)
    }
}

impl FromStr for Oid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for Oid {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Self::new(s)
    }
}

impl From<Oid> for String {
    fn from(oid: Oid) -> Self {
        oid.0
    }
}

impl AsRef<str> for Oid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
