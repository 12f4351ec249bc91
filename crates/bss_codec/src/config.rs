//! Line format configuration.
//!
//! A [`FormatConfig`] is the editable, deserializable description of a line
//! layout. [`FormatConfig::validate`] turns it into a [`LineFormat`], which is
//! immutable and can be shared across threads and encoders.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Characters that may not be used in any separator.
pub const RESERVED_SEPARATORS: &str = "[](){}$\\/|?*+-";

/// A segment attribute that can be emitted in a line.
///
/// Serialized by its canonical name; unknown names fail with
/// `ConfigError::UnknownField`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum SegmentField {
    /// Numeric segment id.
    SegId,
    /// Segment code.
    SegCode,
    /// Member owning the segment code.
    MemberId,
    /// Expiration in minutes.
    Expiration,
    /// Segment value.
    Value,
    /// Seconds since the epoch.
    Timestamp,
}

impl SegmentField {
    /// All fields in declaration order.
    pub const ALL: [SegmentField; 6] = [
        SegmentField::SegId,
        SegmentField::SegCode,
        SegmentField::MemberId,
        SegmentField::Expiration,
        SegmentField::Value,
        SegmentField::Timestamp,
    ];

    /// Returns the canonical field name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            SegmentField::SegId => "SEG_ID",
            SegmentField::SegCode => "SEG_CODE",
            SegmentField::MemberId => "MEMBER_ID",
            SegmentField::Expiration => "EXPIRATION",
            SegmentField::Value => "VALUE",
            SegmentField::Timestamp => "TIMESTAMP",
        }
    }
}

impl FromStr for SegmentField {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SegmentField::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownField { name: s.to_string() })
    }
}

impl TryFrom<String> for SegmentField {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SegmentField> for &'static str {
    fn from(field: SegmentField) -> Self {
        field.as_str()
    }
}

impl fmt::Display for SegmentField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unvalidated line layout.
///
/// ```
/// use bss_codec::{FormatConfig, SegmentField};
///
/// let format = FormatConfig::new()
///     .with_separators([":", ";", ",", "#", "^"])
///     .with_fields(vec![SegmentField::SegId, SegmentField::Value])
///     .validate()
///     .unwrap();
/// assert_eq!(format.fields().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatConfig {
    /// Separator after the user id.
    pub sep1: String,
    /// Separator between segments.
    pub sep2: String,
    /// Separator between fields of a segment.
    pub sep3: String,
    /// Separator between the additions and the removals.
    pub sep4: String,
    /// Separator before the domain code.
    pub sep5: String,
    /// Segment fields to emit, in order.
    pub segment_fields: Vec<SegmentField>,
}

impl Default for FormatConfig {
    fn default() -> Self {
        LineFormat::MINIMAL.to_config()
    }
}

impl FormatConfig {
    /// Creates a configuration with the minimal preset's values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets all five separators.
    #[must_use]
    pub fn with_separators(mut self, separators: [&str; 5]) -> Self {
        let [sep1, sep2, sep3, sep4, sep5] = separators.map(str::to_string);
        self.sep1 = sep1;
        self.sep2 = sep2;
        self.sep3 = sep3;
        self.sep4 = sep4;
        self.sep5 = sep5;
        self
    }

    /// Sets the segment fields.
    #[must_use]
    pub fn with_fields(mut self, fields: Vec<SegmentField>) -> Self {
        self.segment_fields = fields;
        self
    }

    /// Validates the configuration.
    ///
    /// Checks run in order and the first failure is returned: separator
    /// length, reserved separator characters, id/code selection, and
    /// code without member id.
    ///
    /// # Errors
    ///
    /// Returns the first `ConfigError` found.
    pub fn validate(&self) -> ConfigResult<LineFormat> {
        let raw = [&self.sep1, &self.sep2, &self.sep3, &self.sep4, &self.sep5];
        let mut seps = [' '; 5];
        for (i, sep) in raw.into_iter().enumerate() {
            seps[i] = check_separator(i + 1, sep)?;
        }
        check_fields(&self.segment_fields)?;

        let [after_uid, between_segments, between_fields, before_removals, before_domain] = seps;
        Ok(LineFormat {
            separators: Separators {
                after_uid,
                between_segments,
                between_fields,
                before_removals,
                before_domain,
            },
            fields: Cow::Owned(self.segment_fields.clone()),
        })
    }
}

fn check_separator(index: usize, separator: &str) -> ConfigResult<char> {
    let mut chars = separator.chars();
    let (Some(c), None) = (chars.next(), chars.next()) else {
        return Err(ConfigError::SeparatorLength {
            index,
            separator: separator.to_string(),
        });
    };
    if RESERVED_SEPARATORS.contains(c) {
        return Err(ConfigError::DisallowedSeparator {
            index,
            separator: separator.to_string(),
            reserved: RESERVED_SEPARATORS,
        });
    }
    Ok(c)
}

fn check_fields(fields: &[SegmentField]) -> ConfigResult<()> {
    let has = |field| fields.contains(&field);

    match (has(SegmentField::SegId), has(SegmentField::SegCode)) {
        (false, false) => return Err(ConfigError::MissingIdentifier),
        (true, true) => return Err(ConfigError::ConflictingIdentifiers),
        _ => {}
    }
    if has(SegmentField::SegCode) && !has(SegmentField::MemberId) {
        return Err(ConfigError::CodeWithoutMemberId);
    }
    Ok(())
}

/// The five separators of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Separators {
    /// `SEP1`, after the user id.
    pub after_uid: char,
    /// `SEP2`, between segments.
    pub between_segments: char,
    /// `SEP3`, between fields of a segment.
    pub between_fields: char,
    /// `SEP4`, before the removals.
    pub before_removals: char,
    /// `SEP5`, before the domain code.
    pub before_domain: char,
}

const STANDARD_SEPARATORS: Separators = Separators {
    after_uid: ':',
    between_segments: ';',
    between_fields: ':',
    before_removals: '#',
    before_domain: '^',
};

/// A validated line layout.
///
/// Obtained from [`FormatConfig::validate`] or one of the presets. It cannot
/// be modified after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineFormat {
    separators: Separators,
    fields: Cow<'static, [SegmentField]>,
}

impl LineFormat {
    /// Segment ids only.
    pub const MINIMAL: LineFormat = LineFormat {
        separators: STANDARD_SEPARATORS,
        fields: Cow::Borrowed(&[SegmentField::SegId]),
    };

    /// Segment id, expiration, value and timestamp.
    pub const FULL: LineFormat = LineFormat {
        separators: STANDARD_SEPARATORS,
        fields: Cow::Borrowed(&[
            SegmentField::SegId,
            SegmentField::Expiration,
            SegmentField::Value,
            SegmentField::Timestamp,
        ]),
    };

    /// Segment code, member id, expiration, value and timestamp.
    pub const FULL_EXTERNAL: LineFormat = LineFormat {
        separators: STANDARD_SEPARATORS,
        fields: Cow::Borrowed(&[
            SegmentField::SegCode,
            SegmentField::MemberId,
            SegmentField::Expiration,
            SegmentField::Value,
            SegmentField::Timestamp,
        ]),
    };

    /// Returns the separators.
    #[must_use]
    pub const fn separators(&self) -> &Separators {
        &self.separators
    }

    /// Returns the selected fields in output order.
    #[must_use]
    pub fn fields(&self) -> &[SegmentField] {
        &self.fields
    }

    /// Converts back to an editable configuration.
    #[must_use]
    pub fn to_config(&self) -> FormatConfig {
        let s = &self.separators;
        FormatConfig {
            sep1: s.after_uid.to_string(),
            sep2: s.between_segments.to_string(),
            sep3: s.between_fields.to_string(),
            sep4: s.before_removals.to_string(),
            sep5: s.before_domain.to_string(),
            segment_fields: self.fields.to_vec(),
        }
    }
}

impl TryFrom<FormatConfig> for LineFormat {
    type Error = ConfigError;

    fn try_from(config: FormatConfig) -> Result<Self, Self::Error> {
        config.validate()
    }
}
