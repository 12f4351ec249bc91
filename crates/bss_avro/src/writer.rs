//! Avro object container writer.

use std::io::Write;
use std::sync::LazyLock;

use apache_avro::{Schema, Writer};
use bss_codec::{EncodeResult, UserRecord};
use tracing::{debug, trace};

use crate::error::{ContainerError, ContainerResult};
use crate::mapping::user_value;

/// The `bss.user` schema written into every container header.
pub const SCHEMA_JSON: &str = include_str!("../schema/user_segments.avsc");

static SCHEMA: LazyLock<Result<Schema, String>> =
    LazyLock::new(|| Schema::parse_str(SCHEMA_JSON).map_err(|e| e.to_string()));

/// Returns the parsed container schema.
///
/// # Errors
///
/// Returns `ContainerError::Schema` if the embedded schema is invalid.
pub fn schema() -> ContainerResult<&'static Schema> {
    SCHEMA
        .as_ref()
        .map_err(|message| ContainerError::Schema(message.clone()))
}

/// Writes user records into an Avro object container.
///
/// The container header is written with the first block. Records are
/// buffered into blocks by the Avro writer; [`AvroWriter::finish`] writes the
/// last block and hands the sink back.
pub struct AvroWriter<W: Write> {
    writer: Writer<'static, W>,
    records: u64,
}

impl<W: Write> AvroWriter<W> {
    /// Opens a container over `sink`.
    ///
    /// # Errors
    ///
    /// Returns `ContainerError::Schema` if the embedded schema is invalid.
    pub fn open(sink: W) -> ContainerResult<Self> {
        let schema = schema()?;
        debug!("opened avro container writer");
        Ok(Self {
            writer: Writer::new(schema, sink),
            records: 0,
        })
    }

    /// Appends a batch of records.
    ///
    /// Every record is mapped before any is appended, so a mapping error
    /// leaves the container untouched.
    ///
    /// # Errors
    ///
    /// Returns `ContainerError::Encode` for a record that does not fit the
    /// schema, or `ContainerError::Avro` if writing fails.
    pub fn append(&mut self, users: &[UserRecord]) -> ContainerResult<()> {
        let values = users.iter().map(user_value).collect::<EncodeResult<Vec<_>>>()?;
        self.writer.extend(values)?;
        self.records += users.len() as u64;
        trace!(batch = users.len(), total = self.records, "appended avro batch");
        Ok(())
    }

    /// Returns the number of records appended so far.
    #[must_use]
    pub fn records_written(&self) -> u64 {
        self.records
    }

    /// Writes the pending block and returns the sink.
    ///
    /// # Errors
    ///
    /// Returns `ContainerError::Avro` if the final write fails.
    pub fn finish(self) -> ContainerResult<W> {
        let records = self.records;
        let sink = self.writer.into_inner()?;
        debug!(records, "finished avro container");
        Ok(sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apache_avro::types::Value;
    use apache_avro::Reader;
    use bss_codec::{Domain, Segment};

    fn read_all(bytes: &[u8]) -> Vec<Value> {
        Reader::new(bytes)
            .unwrap()
            .map(|value| value.unwrap())
            .collect()
    }

    #[test]
    fn schema_parses() {
        let schema = schema().unwrap();
        assert!(matches!(schema, Schema::Record(_)));
    }

    #[test]
    fn write_and_read_back() {
        let users = vec![
            UserRecord::new(
                "12345",
                vec![
                    Segment::with_id(100).expiration(259_200).value(123),
                    Segment::with_id(101).expiration(1440).value(123),
                ],
            ),
            UserRecord::new(
                "6d92078a-8246-4ba4-ae5b-76104861e7dc",
                vec![Segment::with_code("auto", 7).removed()],
            )
            .with_domain(Domain::Idfa),
        ];

        let mut writer = AvroWriter::open(Vec::new()).unwrap();
        writer.append(&users).unwrap();
        assert_eq!(writer.records_written(), 2);
        let bytes = writer.finish().unwrap();

        let expected: Vec<Value> = users.iter().map(|u| user_value(u).unwrap()).collect();
        assert_eq!(read_all(&bytes), expected);
    }

    #[test]
    fn batches_accumulate() {
        let mut writer = AvroWriter::open(Vec::new()).unwrap();
        for uid in ["1", "2", "3"] {
            writer
                .append(&[UserRecord::new(uid, vec![Segment::with_id(9)])])
                .unwrap();
        }
        let bytes = writer.finish().unwrap();
        assert_eq!(read_all(&bytes).len(), 3);
    }

    #[test]
    fn bad_record_rejects_whole_batch() {
        let mut writer = AvroWriter::open(Vec::new()).unwrap();
        let users = vec![
            UserRecord::new("1", vec![Segment::with_id(9)]),
            UserRecord::new("not-a-number", vec![Segment::with_id(9)]),
        ];
        assert!(matches!(
            writer.append(&users),
            Err(ContainerError::Encode(_))
        ));
        assert_eq!(writer.records_written(), 0);
    }
}
