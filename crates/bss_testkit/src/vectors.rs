//! Shared line encoding vectors.
//!
//! Vectors pair an input with its expected line or error message so that
//! every encoder front end can be checked against the same cases.

use bss_codec::{Domain, FormatConfig, LineFormat, Segment, SegmentField, UserRecord, MAX_EXPIRATION};
use serde::{Deserialize, Serialize};

/// Returns a preset line format by name (`minimal`, `full`, `full_external`).
pub fn preset(name: &str) -> Option<LineFormat> {
    match name {
        "minimal" => Some(LineFormat::MINIMAL),
        "full" => Some(LineFormat::FULL),
        "full_external" => Some(LineFormat::FULL_EXTERNAL),
        _ => None,
    }
}

/// A line encoding vector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineVector {
    /// Unique identifier for this vector.
    pub id: String,
    /// Human-readable description.
    pub description: String,
    /// Preset name, see [`preset`].
    pub preset: String,
    /// Record to encode.
    pub user: UserRecord,
    /// Expected line, without newline.
    pub expected_line: Option<String>,
    /// Expected error message (if this should fail).
    pub expected_error: Option<String>,
}

impl LineVector {
    fn ok(id: &str, description: &str, preset: &str, user: UserRecord, line: &str) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            preset: preset.into(),
            user,
            expected_line: Some(line.into()),
            expected_error: None,
        }
    }

    fn err(id: &str, description: &str, preset: &str, user: UserRecord, error: &str) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            preset: preset.into(),
            user,
            expected_line: None,
            expected_error: Some(error.into()),
        }
    }

    /// Returns the vector's line format.
    ///
    /// # Panics
    ///
    /// Panics if the preset name is unknown.
    pub fn format(&self) -> LineFormat {
        preset(&self.preset).unwrap_or_else(|| panic!("unknown preset {}", self.preset))
    }
}

/// A configuration validation vector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigVector {
    /// Unique identifier for this vector.
    pub id: String,
    /// Human-readable description.
    pub description: String,
    /// Configuration to validate.
    pub config: FormatConfig,
    /// Expected error message (if this should fail).
    pub expected_error: Option<String>,
}

fn full_segment(id: i32) -> Segment {
    Segment::with_id(id).expiration(1440).value(123)
}

/// Line encoding vectors.
pub fn line_vectors() -> Vec<LineVector> {
    vec![
        LineVector::ok(
            "minimal_additions",
            "Minimal preset, two additions",
            "minimal",
            UserRecord::new("12345", vec![Segment::with_id(100), Segment::with_id(101)]),
            "12345:100;101",
        ),
        LineVector::ok(
            "minimal_removals",
            "Minimal preset, two removals",
            "minimal",
            UserRecord::new(
                "12345",
                vec![Segment::with_id(100).removed(), Segment::with_id(101).removed()],
            ),
            "12345:#100;101",
        ),
        LineVector::ok(
            "full_additions",
            "Full preset renders the unset timestamp as 0",
            "full",
            UserRecord::new("12345", vec![full_segment(100), full_segment(101)]),
            "12345:100:1440:123:0;101:1440:123:0",
        ),
        LineVector::ok(
            "full_idfa",
            "Full preset with the IDFA domain suffix",
            "full",
            UserRecord::new("0000-123123-132123123-3212312", vec![full_segment(100), full_segment(101)])
                .with_domain(Domain::Idfa),
            "0000-123123-132123123-3212312:100:1440:123:0;101:1440:123:0^3",
        ),
        LineVector::ok(
            "full_aaid_mixed",
            "Additions, removals and the AAID domain suffix",
            "full",
            UserRecord::new("u-1", vec![full_segment(5), Segment::with_id(6).removed()])
                .with_domain(Domain::Aaid),
            "u-1:5:1440:123:0#6:-1:0:0^8",
        ),
        LineVector::ok(
            "full_max_expiration",
            "Expiration of exactly 180 days is accepted",
            "full",
            UserRecord::new("1", vec![Segment::with_id(1).expiration(MAX_EXPIRATION)]),
            "1:1:259200:0:0",
        ),
        LineVector::err(
            "full_expiration_too_large",
            "Expiration one minute past 180 days is rejected",
            "full",
            UserRecord::new("1", vec![Segment::with_id(1).expiration(MAX_EXPIRATION + 1)]),
            "expiration out of range: 259201 (additions segment 0)",
        ),
        LineVector::ok(
            "full_external",
            "Segment code with its member id",
            "full_external",
            UserRecord::new("7", vec![Segment::with_code("abc", 958).value(10)]),
            "7:abc:958:0:10:0",
        ),
        LineVector::err(
            "full_external_empty_code",
            "A segment without a code cannot use the external preset",
            "full_external",
            UserRecord::new("7", vec![Segment::with_code("abc", 958), Segment::with_id(100).member_id(958)]),
            "segment code is empty (additions segment 1)",
        ),
        LineVector::err(
            "minimal_zero_id_removal",
            "Zero id in the removals is located within the removals",
            "minimal",
            UserRecord::new("7", vec![Segment::with_id(3), Segment::with_id(0).removed()]),
            "segment id is zero (removals segment 0)",
        ),
    ]
}

/// Configuration validation vectors.
pub fn config_vectors() -> Vec<ConfigVector> {
    let base = FormatConfig::new();
    let vector = |id: &str, description: &str, config: FormatConfig, error: Option<&str>| {
        ConfigVector {
            id: id.into(),
            description: description.into(),
            config,
            expected_error: error.map(String::from),
        }
    };

    vec![
        vector("minimal", "Minimal preset values", base.clone(), None),
        vector(
            "tab_space",
            "Tab and space separators",
            base.clone().with_separators(["\t", " ", ",", "#", "^"]),
            None,
        ),
        vector(
            "long_separator",
            "Two-character separator",
            base.clone().with_separators([":", ";", "::", "#", "^"]),
            Some("sep3 should be a single character, got \"::\""),
        ),
        vector(
            "reserved_separator",
            "Pipe is reserved",
            base.clone().with_separators([":", ";", ":", "#", "|"]),
            Some("sep5: symbols [](){}$\\/|?*+- are not allowed as separators, got \"|\""),
        ),
        vector(
            "no_identifier",
            "Neither SEG_ID nor SEG_CODE",
            base.clone().with_fields(vec![SegmentField::Value]),
            Some("choose at least one of SEG_ID or SEG_CODE"),
        ),
        vector(
            "both_identifiers",
            "Both SEG_ID and SEG_CODE",
            base.clone().with_fields(vec![
                SegmentField::SegId,
                SegmentField::SegCode,
                SegmentField::MemberId,
            ]),
            Some("choose only one of SEG_ID or SEG_CODE"),
        ),
        vector(
            "code_without_member",
            "SEG_CODE without MEMBER_ID",
            base.with_fields(vec![SegmentField::SegCode]),
            Some("SEG_CODE requires MEMBER_ID to be selected too"),
        ),
    ]
}
