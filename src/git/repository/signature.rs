use std::fmt;

use chrono::{DateTime, FixedOffset, Local, TimeZone};
use serde::{Deserialize, Serialize};

use crate::git::engine::Engine;
use crate::git::error::{Error, Result};

/// The "who and when" of a commit.
///
/// Not validated on construction. A signature with an empty email is
/// "unset" and is replaced by the configured identity when a commit is
/// created.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    pub name: String,
    pub email: String,
    pub when: DateTime<FixedOffset>,
}

impl Signature {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        when: DateTime<FixedOffset>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            when,
        }
    }

    /// Signature stamped with the current local time.
    pub fn now(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self::new(name, email, Local::now().fixed_offset())
    }

    pub fn is_unset(&self) -> bool {
        self.email.is_empty()
    }

    pub(crate) fn to_git2(&self) -> Result<git2::Signature<'static>> {
        let offset_minutes = self.when.offset().local_minus_utc() / 60;
        let time = git2::Time::new(self.when.timestamp(), offset_minutes);
        Ok(git2::Signature::new(&self.name, &self.email, &time)?)
    }

    pub(crate) fn from_git2(sig: &git2::Signature<'_>) -> Self {
        let time = sig.when();
        let when = FixedOffset::east_opt(time.offset_minutes() * 60)
            .and_then(|offset| offset.timestamp_opt(time.seconds(), 0).single())
            .unwrap_or_default();
        Self {
            name: sig.name().unwrap_or_default().to_string(),
            email: sig.email().unwrap_or_default().to_string(),
            when,
        }
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Signature{{\"{}\", \"{}\", {}}}",
            self.name,
            self.email,
            self.when.with_timezone(&Local)
        )
    }
}

impl Engine {
    /// The configured `user.name` / `user.email`, stamped with "now".
    pub(crate) fn default_signature(&self) -> Result<Signature> {
        let name = self.config_string("user.name")?.ok_or_else(|| Error::MissingIdentity {
            key: "user.name".to_string(),
        })?;
        let email = self.config_string("user.email")?.ok_or_else(|| Error::MissingIdentity {
            key: "user.email".to_string(),
        })?;

        Ok(Signature::now(name, email))
    }
}
