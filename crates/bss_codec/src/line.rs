//! Legacy BSS line encoder.
//!
//! A line has the shape
//!
//! ```text
//! UID SEP1 ADDS [SEP4 REMOVES] [SEP5 DOMAIN]
//! ```
//!
//! where `ADDS` and `REMOVES` are segments joined by `SEP2`, and each segment
//! is its selected fields joined by `SEP3` in configured order. Segments with
//! expiration `-1` go to `REMOVES`, everything else to `ADDS`, each keeping its
//! input order.

use std::fmt::Write;

use crate::config::{LineFormat, SegmentField};
use crate::error::{EncodeError, EncodeResult, SegmentList};
use crate::record::{Segment, UserRecord, EXPIRED, MAX_EXPIRATION};

impl LineFormat {
    /// Renders one record as a line, without a trailing newline.
    ///
    /// # Errors
    ///
    /// Returns an `EncodeError` if a selected field of any segment is invalid.
    ///
    /// # Example
    ///
    /// ```
    /// use bss_codec::{LineFormat, Segment, UserRecord};
    ///
    /// let user = UserRecord::new("12345", vec![Segment::with_id(100), Segment::with_id(101)]);
    /// assert_eq!(LineFormat::MINIMAL.format_line(&user).unwrap(), "12345:100;101");
    /// ```
    pub fn format_line(&self, user: &UserRecord) -> EncodeResult<String> {
        let mut line = String::with_capacity(user.uid.len() + 16 * user.segments.len());
        self.write_line(user, &mut line)?;
        Ok(line)
    }

    /// Appends one rendered record to `buf`, without a trailing newline.
    ///
    /// On error `buf` is left exactly as it was.
    ///
    /// # Errors
    ///
    /// Returns an `EncodeError` if a selected field of any segment is invalid.
    pub fn write_line(&self, user: &UserRecord, buf: &mut String) -> EncodeResult<()> {
        let start = buf.len();
        let result = self.render(user, buf);
        if result.is_err() {
            buf.truncate(start);
        }
        result
    }

    fn render(&self, user: &UserRecord, buf: &mut String) -> EncodeResult<()> {
        let seps = self.separators();

        buf.push_str(&user.uid);
        buf.push(seps.after_uid);

        self.render_list(user.additions(), SegmentList::Additions, buf)?;

        let mut removals = user.removals().peekable();
        if removals.peek().is_some() {
            buf.push(seps.before_removals);
            self.render_list(removals, SegmentList::Removals, buf)?;
        }

        if !user.domain.is_default() {
            buf.push(seps.before_domain);
            buf.push_str(user.domain.code());
        }
        Ok(())
    }

    fn render_list<'a>(
        &self,
        segments: impl Iterator<Item = &'a Segment>,
        list: SegmentList,
        buf: &mut String,
    ) -> EncodeResult<()> {
        for (index, segment) in segments.enumerate() {
            if index > 0 {
                buf.push(self.separators().between_segments);
            }
            for (j, field) in self.fields().iter().enumerate() {
                if j > 0 {
                    buf.push(self.separators().between_fields);
                }
                render_field(*field, segment, index, list, buf)?;
            }
        }
        Ok(())
    }
}

/// Validates one field of a segment against its range rule.
///
/// `index` and `list` locate the segment in the error.
///
/// # Errors
///
/// Returns the `EncodeError` for the field's rule.
pub fn check_field(
    field: SegmentField,
    segment: &Segment,
    index: usize,
    list: SegmentList,
) -> EncodeResult<()> {
    match field {
        SegmentField::SegId if segment.id == 0 => Err(EncodeError::ZeroId { index, list }),
        SegmentField::SegCode if segment.code.is_empty() => {
            Err(EncodeError::EmptyCode { index, list })
        }
        SegmentField::MemberId if segment.member_id == 0 => {
            Err(EncodeError::ZeroMemberId { index, list })
        }
        SegmentField::Expiration if !(EXPIRED..=MAX_EXPIRATION).contains(&segment.expiration) => {
            Err(EncodeError::ExpirationOutOfRange {
                index,
                list,
                expiration: segment.expiration,
            })
        }
        SegmentField::Value if segment.value < 0 => Err(EncodeError::ValueOutOfRange {
            index,
            list,
            value: segment.value,
        }),
        SegmentField::SegId
        | SegmentField::SegCode
        | SegmentField::MemberId
        | SegmentField::Expiration
        | SegmentField::Value => Ok(()),
        // Timestamps are informational and never rejected.
        SegmentField::Timestamp => Ok(()),
    }
}

fn render_field(
    field: SegmentField,
    segment: &Segment,
    index: usize,
    list: SegmentList,
    buf: &mut String,
) -> EncodeResult<()> {
    check_field(field, segment, index, list)?;

    // Writing into a String cannot fail.
    let _ = match field {
        SegmentField::SegId => write!(buf, "{}", segment.id),
        SegmentField::SegCode => buf.write_str(&segment.code),
        SegmentField::MemberId => write!(buf, "{}", segment.member_id),
        SegmentField::Expiration => write!(buf, "{}", segment.expiration),
        SegmentField::Value => write!(buf, "{}", segment.value),
        SegmentField::Timestamp => write!(buf, "{}", segment.timestamp),
    };
    Ok(())
}
