//! Property-based test generators using proptest.
//!
//! Provides strategies for generating records and line formats that
//! satisfy the encoders' validity rules. Generated separators never occur
//! inside generated uids, codes or numbers, so rendered lines can be split
//! back apart.

use bss_codec::{
    Domain, FormatConfig, LineFormat, Segment, SegmentField, UserRecord, EXPIRED,
    MAX_EXPIRATION,
};
use proptest::prelude::*;
use uuid::Uuid;

/// Characters usable as separators by generated formats.
pub const SEPARATOR_POOL: &[char] = &[':', ';', ',', '#', '^', '@', '!', '~', '=', '&', '%', '\t', ' '];

/// Strategy for a valid separator.
pub fn separator_strategy() -> impl Strategy<Value = char> {
    prop::sample::select(SEPARATOR_POOL)
}

/// Strategy for five pairwise distinct separators.
pub fn separators_strategy() -> impl Strategy<Value = [char; 5]> {
    Just(SEPARATOR_POOL.to_vec())
        .prop_shuffle()
        .prop_map(|pool| [pool[0], pool[1], pool[2], pool[3], pool[4]])
}

/// Strategy for a valid field selection, in random order.
///
/// Exactly one of `SEG_ID` and `SEG_CODE` is selected, and `SEG_CODE`
/// always comes with `MEMBER_ID`.
pub fn segment_fields_strategy() -> impl Strategy<Value = Vec<SegmentField>> {
    let identifier = prop_oneof![
        Just(vec![SegmentField::SegId]),
        Just(vec![SegmentField::SegCode, SegmentField::MemberId]),
        Just(vec![SegmentField::SegId, SegmentField::MemberId]),
    ];
    let extras = prop::sample::subsequence(
        vec![
            SegmentField::Expiration,
            SegmentField::Value,
            SegmentField::Timestamp,
        ],
        0..=3,
    );
    (identifier, extras)
        .prop_map(|(mut fields, extras)| {
            fields.extend(extras);
            fields
        })
        .prop_shuffle()
}

/// Strategy for a validated line format.
pub fn line_format_strategy() -> impl Strategy<Value = LineFormat> {
    (separators_strategy(), segment_fields_strategy()).prop_map(|(seps, fields)| {
        let seps = seps.map(String::from);
        FormatConfig {
            sep1: seps[0].clone(),
            sep2: seps[1].clone(),
            sep3: seps[2].clone(),
            sep4: seps[3].clone(),
            sep5: seps[4].clone(),
            segment_fields: fields,
        }
        .validate()
        .expect("generated format is valid")
    })
}

/// Strategy for a domain.
pub fn domain_strategy() -> impl Strategy<Value = Domain> {
    prop::sample::select(Domain::ALL.to_vec())
}

/// Strategy for a platform user id.
pub fn platform_uid_strategy() -> impl Strategy<Value = String> {
    (1..=i64::MAX).prop_map(|n| n.to_string())
}

/// Strategy for a device id.
pub fn device_uid_strategy() -> impl Strategy<Value = String> {
    any::<u128>().prop_map(|n| Uuid::from_u128(n).to_string())
}

/// Strategy for a uid that fits `domain`.
pub fn uid_strategy(domain: Domain) -> BoxedStrategy<String> {
    if domain.is_default() {
        platform_uid_strategy().boxed()
    } else {
        device_uid_strategy().boxed()
    }
}

fn segment_with_expiration(
    expiration: impl Strategy<Value = i32>,
) -> impl Strategy<Value = Segment> {
    (
        1..=i32::MAX,
        "[a-z0-9_]{1,12}",
        1..=i32::MAX,
        expiration,
        0..=i32::MAX,
        0..=4_102_444_800i64,
    )
        .prop_map(|(id, code, member_id, expiration, value, timestamp)| Segment {
            id,
            code,
            member_id,
            expiration,
            value,
            timestamp,
        })
}

/// Strategy for a valid segment addition.
pub fn addition_strategy() -> impl Strategy<Value = Segment> {
    segment_with_expiration(0..=MAX_EXPIRATION)
}

/// Strategy for a valid segment removal.
pub fn removal_strategy() -> impl Strategy<Value = Segment> {
    segment_with_expiration(Just(EXPIRED))
}

/// Strategy for a valid segment, mostly additions.
pub fn segment_strategy() -> impl Strategy<Value = Segment> {
    prop_oneof![
        3 => addition_strategy(),
        1 => removal_strategy(),
    ]
}

/// Strategy for a valid user record.
pub fn user_record_strategy() -> impl Strategy<Value = UserRecord> {
    domain_strategy().prop_flat_map(|domain| {
        (
            uid_strategy(domain),
            prop::collection::vec(segment_strategy(), 0..8),
        )
            .prop_map(move |(uid, segments)| UserRecord {
                uid,
                domain,
                segments,
            })
    })
}

/// Strategy for a batch of valid user records.
pub fn user_batch_strategy(max_users: usize) -> impl Strategy<Value = Vec<UserRecord>> {
    prop::collection::vec(user_record_strategy(), 0..max_users)
}

/// Configuration for property tests.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
        }
    }
}

impl PropTestConfig {
    /// Creates a configuration for quick tests.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
        }
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}
