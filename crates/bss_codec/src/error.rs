//! Error types for the codec crate.

use std::fmt;
use thiserror::Error;

/// Result type for configuration validation.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type for record encoding.
pub type EncodeResult<T> = Result<T, EncodeError>;

/// Errors raised while validating a line format configuration.
///
/// A configuration that fails validation never produces an encoder.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A separator is not exactly one character.
    #[error("sep{index} should be a single character, got {separator:?}")]
    SeparatorLength {
        /// 1-based separator position.
        index: usize,
        /// The offending separator.
        separator: String,
    },

    /// A separator uses a reserved character.
    #[error("sep{index}: symbols {reserved} are not allowed as separators, got {separator:?}")]
    DisallowedSeparator {
        /// 1-based separator position.
        index: usize,
        /// The offending separator.
        separator: String,
        /// The reserved character set.
        reserved: &'static str,
    },

    /// Neither `SEG_ID` nor `SEG_CODE` was selected.
    #[error("choose at least one of SEG_ID or SEG_CODE")]
    MissingIdentifier,

    /// Both `SEG_ID` and `SEG_CODE` were selected.
    #[error("choose only one of SEG_ID or SEG_CODE")]
    ConflictingIdentifiers,

    /// `SEG_CODE` was selected without `MEMBER_ID`.
    #[error("SEG_CODE requires MEMBER_ID to be selected too")]
    CodeWithoutMemberId,

    /// A segment field name is not recognized.
    #[error("unknown segment field: {name}")]
    UnknownField {
        /// The unrecognized name.
        name: String,
    },
}

/// Which half of a line a segment was rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentList {
    /// Segments being added (expiration other than -1).
    Additions,
    /// Segments being removed (expiration -1).
    Removals,
}

impl fmt::Display for SegmentList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentList::Additions => f.write_str("additions"),
            SegmentList::Removals => f.write_str("removals"),
        }
    }
}

/// Errors raised while encoding a single user record.
///
/// An encode error is scoped to one record; nothing is emitted for it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// The domain code is not one of the known domains.
    #[error("invalid domain: {domain:?}")]
    InvalidDomain {
        /// The rejected domain code.
        domain: String,
    },

    /// The user identifier does not fit the domain's identifier format.
    #[error("invalid uid {uid:?}: {reason}")]
    InvalidUid {
        /// The rejected identifier.
        uid: String,
        /// Why it was rejected.
        reason: String,
    },

    /// `SEG_ID` is selected but the segment id is zero.
    #[error("segment id is zero ({list} segment {index})")]
    ZeroId {
        /// 0-based index within its list.
        index: usize,
        /// List the segment belongs to.
        list: SegmentList,
    },

    /// `SEG_CODE` is selected but the segment code is empty.
    #[error("segment code is empty ({list} segment {index})")]
    EmptyCode {
        /// 0-based index within its list.
        index: usize,
        /// List the segment belongs to.
        list: SegmentList,
    },

    /// `MEMBER_ID` is selected but the member id is zero.
    #[error("segment member id is zero ({list} segment {index})")]
    ZeroMemberId {
        /// 0-based index within its list.
        index: usize,
        /// List the segment belongs to.
        list: SegmentList,
    },

    /// Expiration is outside `[-1, MAX_EXPIRATION]`.
    #[error("expiration out of range: {expiration} ({list} segment {index})")]
    ExpirationOutOfRange {
        /// 0-based index within its list.
        index: usize,
        /// List the segment belongs to.
        list: SegmentList,
        /// The rejected expiration.
        expiration: i32,
    },

    /// Value is negative.
    #[error("value out of range: {value} ({list} segment {index})")]
    ValueOutOfRange {
        /// 0-based index within its list.
        index: usize,
        /// List the segment belongs to.
        list: SegmentList,
        /// The rejected value.
        value: i32,
    },
}

impl EncodeError {
    /// Create an invalid domain error.
    pub fn invalid_domain(domain: impl Into<String>) -> Self {
        Self::InvalidDomain {
            domain: domain.into(),
        }
    }

    /// Create an invalid uid error.
    pub fn invalid_uid(uid: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidUid {
            uid: uid.into(),
            reason: reason.into(),
        }
    }

    /// Returns the failing segment's position, if the error is segment-scoped.
    pub fn segment_index(&self) -> Option<(SegmentList, usize)> {
        match *self {
            EncodeError::ZeroId { index, list }
            | EncodeError::EmptyCode { index, list }
            | EncodeError::ZeroMemberId { index, list }
            | EncodeError::ExpirationOutOfRange { index, list, .. }
            | EncodeError::ValueOutOfRange { index, list, .. } => Some((list, index)),
            EncodeError::InvalidDomain { .. } | EncodeError::InvalidUid { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_names_separator() {
        let err = ConfigError::SeparatorLength {
            index: 3,
            separator: "::".into(),
        };
        assert_eq!(err.to_string(), "sep3 should be a single character, got \"::\"");
    }

    #[test]
    fn encode_error_message_and_index() {
        let err = EncodeError::EmptyCode {
            index: 2,
            list: SegmentList::Additions,
        };
        assert!(err.to_string().starts_with("segment code is empty"));
        assert_eq!(err.segment_index(), Some((SegmentList::Additions, 2)));
        assert_eq!(EncodeError::invalid_domain("5").segment_index(), None);
    }
}
