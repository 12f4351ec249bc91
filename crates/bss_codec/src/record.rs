//! Segment membership records.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EncodeError;

/// Expiration marking a segment for removal.
pub const EXPIRED: i32 = -1;

/// Expiration telling the receiver to apply the member's default.
pub const DEFAULT_EXPIRATION: i32 = 0;

/// Longest explicit expiration: 180 days in minutes.
pub const MAX_EXPIRATION: i32 = 180 * 24 * 60;

/// Largest accepted segment value.
pub const MAX_VALUE: i32 = i32::MAX;

/// One audience segment membership for a user.
///
/// Only the fields selected by the line format are validated and rendered;
/// the rest are carried as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Segment {
    /// Numeric segment id; zero means unset.
    pub id: i32,
    /// Segment code, the alternative to `id`.
    pub code: String,
    /// Member owning the segment code.
    pub member_id: i32,
    /// Expiration in minutes, `EXPIRED` or `DEFAULT_EXPIRATION`.
    pub expiration: i32,
    /// Segment value (score).
    pub value: i32,
    /// Seconds since the epoch. Informational.
    pub timestamp: i64,
}

impl Segment {
    /// Creates a segment addressed by numeric id.
    #[must_use]
    pub fn with_id(id: i32) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    /// Creates a segment addressed by code within a member.
    #[must_use]
    pub fn with_code(code: impl Into<String>, member_id: i32) -> Self {
        Self {
            code: code.into(),
            member_id,
            ..Self::default()
        }
    }

    /// Sets the member id.
    #[must_use]
    pub const fn member_id(mut self, member_id: i32) -> Self {
        self.member_id = member_id;
        self
    }

    /// Sets the expiration in minutes.
    #[must_use]
    pub const fn expiration(mut self, expiration: i32) -> Self {
        self.expiration = expiration;
        self
    }

    /// Marks the segment for removal.
    #[must_use]
    pub const fn removed(self) -> Self {
        self.expiration(EXPIRED)
    }

    /// Sets the value.
    #[must_use]
    pub const fn value(mut self, value: i32) -> Self {
        self.value = value;
        self
    }

    /// Sets the timestamp.
    #[must_use]
    pub const fn timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Returns true if this segment removes the user from the segment.
    #[must_use]
    pub const fn is_removal(&self) -> bool {
        self.expiration == EXPIRED
    }
}

/// Identity space of a user id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Domain {
    /// Platform user id, a stringified 64-bit integer.
    #[default]
    Default,
    /// Apple advertising identifier.
    Idfa,
    /// Android advertising identifier.
    Aaid,
}

impl Domain {
    /// All known domains.
    pub const ALL: [Domain; 3] = [Domain::Default, Domain::Idfa, Domain::Aaid];

    /// Returns the wire code written after the domain separator.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Domain::Default => "",
            Domain::Idfa => "3",
            Domain::Aaid => "8",
        }
    }

    /// Parses a wire code.
    ///
    /// # Errors
    ///
    /// Returns `EncodeError::InvalidDomain` for any code outside the known set.
    pub fn from_code(code: &str) -> Result<Self, EncodeError> {
        Domain::ALL
            .into_iter()
            .find(|d| d.code() == code)
            .ok_or_else(|| EncodeError::invalid_domain(code))
    }

    /// Returns true for the platform user id domain.
    #[must_use]
    pub const fn is_default(self) -> bool {
        matches!(self, Domain::Default)
    }
}

impl FromStr for Domain {
    type Err = EncodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Domain::from_code(s)
    }
}

impl TryFrom<String> for Domain {
    type Error = EncodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Domain::from_code(&value)
    }
}

impl From<Domain> for String {
    fn from(domain: Domain) -> Self {
        domain.code().to_string()
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A user and the segment changes to apply to it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// User id; its format depends on `domain`.
    pub uid: String,
    /// Identity space of `uid`.
    #[serde(default)]
    pub domain: Domain,
    /// Segment additions and removals, in input order.
    #[serde(default)]
    pub segments: Vec<Segment>,
}

impl UserRecord {
    /// Creates a record in the default domain.
    pub fn new(uid: impl Into<String>, segments: Vec<Segment>) -> Self {
        Self {
            uid: uid.into(),
            domain: Domain::Default,
            segments,
        }
    }

    /// Sets the domain.
    #[must_use]
    pub fn with_domain(mut self, domain: Domain) -> Self {
        self.domain = domain;
        self
    }

    /// Appends a segment.
    pub fn push_segment(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    /// Segments being added, in input order.
    pub fn additions(&self) -> impl Iterator<Item = &Segment> + '_ {
        self.segments.iter().filter(|s| !s.is_removal())
    }

    /// Segments being removed, in input order.
    pub fn removals(&self) -> impl Iterator<Item = &Segment> + '_ {
        self.segments.iter().filter(|s| s.is_removal())
    }
}
