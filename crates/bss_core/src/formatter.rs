//! Segment data formatter.

use std::io::{BufWriter, Write};

use bss_avro::AvroWriter;
use bss_codec::{LineFormat, UserRecord};
use tracing::{debug, trace};

use crate::config::{DataFormat, OutputConfig};
use crate::error::{BssError, BssResult};

enum Encoder<W: Write> {
    Text {
        format: LineFormat,
        sink: BufWriter<W>,
        line: String,
    },
    Container(AvroWriter<BufWriter<W>>),
}

/// Writes user segment data to a sink as BSS text lines or an Avro container.
///
/// The formatter buffers its output; call [`SegmentDataFormatter::close`] to
/// flush it and get the sink back. A formatter and its sink are meant for a
/// single writer.
///
/// # Example
///
/// ```
/// use bss_codec::{LineFormat, Segment, UserRecord};
/// use bss_core::SegmentDataFormatter;
///
/// let mut formatter = SegmentDataFormatter::text(Vec::new(), LineFormat::MINIMAL);
/// formatter
///     .append(&[UserRecord::new("12345", vec![Segment::with_id(100)])])
///     .unwrap();
/// let out = formatter.close().unwrap();
/// assert_eq!(out, b"12345:100\n");
/// ```
pub struct SegmentDataFormatter<W: Write> {
    encoder: Encoder<W>,
    records: u64,
}

impl<W: Write> SegmentDataFormatter<W> {
    /// Creates a formatter for `format`.
    ///
    /// `line` is required for [`DataFormat::Text`] and ignored for
    /// [`DataFormat::Container`].
    ///
    /// # Errors
    ///
    /// Returns `BssError::MissingLineFormat` for text output without a line
    /// format, or `BssError::Container` if the container cannot be opened.
    pub fn new(sink: W, format: DataFormat, line: Option<LineFormat>) -> BssResult<Self> {
        let sink = BufWriter::new(sink);
        let encoder = match format {
            DataFormat::Text => Encoder::Text {
                format: line.ok_or(BssError::MissingLineFormat)?,
                sink,
                line: String::new(),
            },
            DataFormat::Container => Encoder::Container(AvroWriter::open(sink)?),
        };
        debug!(%format, "opened segment data formatter");
        Ok(Self {
            encoder,
            records: 0,
        })
    }

    /// Creates a text formatter.
    pub fn text(sink: W, format: LineFormat) -> Self {
        debug!(format = "text", "opened segment data formatter");
        Self {
            encoder: Encoder::Text {
                format,
                sink: BufWriter::new(sink),
                line: String::new(),
            },
            records: 0,
        }
    }

    /// Creates an Avro container formatter.
    ///
    /// # Errors
    ///
    /// Returns `BssError::Container` if the container cannot be opened.
    pub fn container(sink: W) -> BssResult<Self> {
        Self::new(sink, DataFormat::Container, None)
    }

    /// Creates a formatter from an output configuration.
    ///
    /// # Errors
    ///
    /// Returns `BssError::Config` if the line layout is invalid, plus the
    /// errors of [`SegmentDataFormatter::new`].
    pub fn from_config(sink: W, config: &OutputConfig) -> BssResult<Self> {
        let line = match config.format {
            DataFormat::Text => config.line_format()?,
            DataFormat::Container => None,
        };
        Self::new(sink, config.format, line)
    }

    /// Returns the output encoding.
    #[must_use]
    pub fn format(&self) -> DataFormat {
        match self.encoder {
            Encoder::Text { .. } => DataFormat::Text,
            Encoder::Container(_) => DataFormat::Container,
        }
    }

    /// Returns the number of records written so far.
    #[must_use]
    pub fn records_written(&self) -> u64 {
        self.records
    }

    /// Appends a batch of user records.
    ///
    /// Text output stops at the first record that fails to encode; lines
    /// written before it stay written. Container output maps the whole batch
    /// before appending any of it.
    ///
    /// # Errors
    ///
    /// Returns the first encode error, or the sink's I/O error.
    pub fn append(&mut self, users: &[UserRecord]) -> BssResult<()> {
        match &mut self.encoder {
            Encoder::Text { format, sink, line } => {
                for user in users {
                    line.clear();
                    format.write_line(user, line)?;
                    line.push('\n');
                    sink.write_all(line.as_bytes())?;
                    self.records += 1;
                }
            }
            Encoder::Container(writer) => {
                writer.append(users)?;
                self.records += users.len() as u64;
            }
        }
        trace!(batch = users.len(), total = self.records, "appended segment data");
        Ok(())
    }

    /// Flushes all buffered output and returns the sink.
    ///
    /// For container output this also writes the final block.
    ///
    /// # Errors
    ///
    /// Returns the sink's I/O error, or `BssError::Container` if the
    /// container cannot be finished.
    pub fn close(self) -> BssResult<W> {
        let sink = match self.encoder {
            Encoder::Text { sink, .. } => sink,
            Encoder::Container(writer) => writer.finish()?,
        };
        let sink = sink.into_inner().map_err(|e| e.into_error())?;
        debug!(records = self.records, "closed segment data formatter");
        Ok(sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bss_codec::{EncodeError, Segment, SegmentList};

    fn users() -> Vec<UserRecord> {
        vec![
            UserRecord::new("12345", vec![Segment::with_id(55), Segment::with_id(100)]),
            UserRecord::new("12346", vec![Segment::with_id(55), Segment::with_id(102)]),
        ]
    }

    #[test]
    fn text_lines() {
        let mut formatter = SegmentDataFormatter::text(Vec::new(), LineFormat::MINIMAL);
        formatter.append(&users()).unwrap();
        assert_eq!(formatter.records_written(), 2);
        let out = formatter.close().unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "12345:55;100\n12346:55;102\n");
    }

    #[test]
    fn text_requires_line_format() {
        let result = SegmentDataFormatter::new(Vec::new(), DataFormat::Text, None);
        assert!(matches!(result, Err(BssError::MissingLineFormat)));
    }

    #[test]
    fn empty_batch_writes_nothing() {
        let mut formatter = SegmentDataFormatter::text(Vec::new(), LineFormat::FULL);
        formatter.append(&[]).unwrap();
        assert!(formatter.close().unwrap().is_empty());
    }

    #[test]
    fn text_stops_at_first_bad_record() {
        let mut batch = users();
        batch.insert(1, UserRecord::new("bad", vec![Segment::with_id(0)]));

        let mut formatter = SegmentDataFormatter::text(Vec::new(), LineFormat::MINIMAL);
        let err = formatter.append(&batch).unwrap_err();
        assert_eq!(
            err.as_encode(),
            Some(&EncodeError::ZeroId {
                index: 0,
                list: SegmentList::Additions
            })
        );
        assert_eq!(formatter.records_written(), 1);

        let out = formatter.close().unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "12345:55;100\n");
    }

    #[test]
    fn container_ignores_line_format() {
        let formatter =
            SegmentDataFormatter::new(Vec::new(), DataFormat::Container, Some(LineFormat::FULL))
                .unwrap();
        assert_eq!(formatter.format(), DataFormat::Container);
    }

    #[test]
    fn from_config_validates_line() {
        let config = OutputConfig::text(bss_codec::FormatConfig::new().with_separators([
            "|", ";", ":", "#", "^",
        ]));
        assert!(matches!(
            SegmentDataFormatter::from_config(Vec::new(), &config),
            Err(BssError::Config(_))
        ));
    }
}
