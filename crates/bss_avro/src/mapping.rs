//! Mapping of user records onto the container schema.

use apache_avro::types::Value;
use bss_codec::{
    check_field, Domain, EncodeError, EncodeResult, Segment, SegmentField, SegmentList,
    UserRecord,
};
use uuid::Uuid;

/// Union branch of a platform user id.
const UID_LONG_BRANCH: u32 = 0;

/// Union branch of a device id.
const UID_DEVICE_BRANCH: u32 = 1;

/// Returns the schema enum position and symbol of a device domain.
fn domain_symbol(domain: Domain) -> Option<(u32, &'static str)> {
    match domain {
        Domain::Default => None,
        Domain::Idfa => Some((0, "idfa")),
        Domain::Aaid => Some((4, "aaid")),
    }
}

/// Maps a user record to an Avro value of the `bss.user` schema.
///
/// Removals keep their `-1` expiration.
///
/// # Errors
///
/// Returns `EncodeError::InvalidUid` if the uid does not match its domain
/// (a 64-bit integer for the default domain, a UUID otherwise), or a range
/// error for a segment's expiration or value.
pub fn user_value(user: &UserRecord) -> EncodeResult<Value> {
    Ok(Value::Record(vec![
        ("uid".to_string(), uid_value(user)?),
        ("segments".to_string(), segments_value(&user.segments)?),
    ]))
}

fn uid_value(user: &UserRecord) -> EncodeResult<Value> {
    let Some((position, symbol)) = domain_symbol(user.domain) else {
        let id: i64 = user.uid.parse().map_err(|e| {
            EncodeError::invalid_uid(&user.uid, format!("platform user id must be an i64: {e}"))
        })?;
        return Ok(Value::Union(UID_LONG_BRANCH, Box::new(Value::Long(id))));
    };

    Uuid::parse_str(&user.uid).map_err(|e| {
        EncodeError::invalid_uid(&user.uid, format!("device id must be a UUID: {e}"))
    })?;

    let device = Value::Record(vec![
        ("id".to_string(), Value::String(user.uid.clone())),
        (
            "domain".to_string(),
            Value::Enum(position, symbol.to_string()),
        ),
    ]);
    Ok(Value::Union(UID_DEVICE_BRANCH, Box::new(device)))
}

fn segments_value(segments: &[Segment]) -> EncodeResult<Value> {
    let mut additions = 0;
    let mut removals = 0;
    let mut items = Vec::with_capacity(segments.len());

    for segment in segments {
        let (list, index) = if segment.is_removal() {
            removals += 1;
            (SegmentList::Removals, removals - 1)
        } else {
            additions += 1;
            (SegmentList::Additions, additions - 1)
        };
        check_field(SegmentField::Expiration, segment, index, list)?;
        check_field(SegmentField::Value, segment, index, list)?;
        items.push(segment_value(segment));
    }

    Ok(Value::Array(items))
}

fn segment_value(segment: &Segment) -> Value {
    Value::Record(vec![
        ("id".to_string(), Value::Int(segment.id)),
        ("code".to_string(), Value::String(segment.code.clone())),
        ("member_id".to_string(), Value::Int(segment.member_id)),
        ("expiration".to_string(), Value::Int(segment.expiration)),
        ("timestamp".to_string(), Value::Long(segment.timestamp)),
        ("value".to_string(), Value::Int(segment.value)),
    ])
}
