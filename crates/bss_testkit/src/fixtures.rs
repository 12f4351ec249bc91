//! Record fixtures and test sinks.

use std::io::{self, Write};

use bss_codec::{Segment, UserRecord};

/// Parses a small CSV table into records, one segment per row.
///
/// The header names the columns; `UID` and `SegID` are required, and
/// `Expiration` and `Value` are optional. Blank lines and surrounding
/// whitespace are ignored.
///
/// ```
/// use bss_testkit::users_from_csv;
///
/// let users = users_from_csv("
///     UID,SegID,Expiration,Value
///     12345,100,1440,123
/// ");
/// assert_eq!(users[0].segments[0].expiration, 1440);
/// ```
///
/// # Panics
///
/// Panics on a missing column or a non-numeric cell.
pub fn users_from_csv(input: &str) -> Vec<UserRecord> {
    let mut lines = input.lines().map(str::trim).filter(|l| !l.is_empty());
    let header: Vec<&str> = lines.next().expect("missing header").split(',').collect();
    let column = |name: &str| header.iter().position(|h| *h == name);
    let uid_col = column("UID").expect("missing UID column");
    let seg_col = column("SegID").expect("missing SegID column");
    let exp_col = column("Expiration");
    let value_col = column("Value");

    lines
        .map(|line| {
            let cells: Vec<&str> = line.split(',').collect();
            let number = |col: usize| -> i32 {
                cells[col]
                    .parse()
                    .unwrap_or_else(|e| panic!("bad number {:?}: {e}", cells[col]))
            };
            let mut segment = Segment::with_id(number(seg_col));
            if let Some(col) = exp_col {
                segment = segment.expiration(number(col));
            }
            if let Some(col) = value_col {
                segment = segment.value(number(col));
            }
            UserRecord::new(cells[uid_col], vec![segment])
        })
        .collect()
}

/// Creates `count` platform users, each with the given segment ids.
pub fn sample_users(count: usize, segment_ids: &[i32]) -> Vec<UserRecord> {
    (0..count)
        .map(|i| {
            let segments = segment_ids.iter().map(|id| Segment::with_id(*id)).collect();
            UserRecord::new((100_000 + i).to_string(), segments)
        })
        .collect()
}

/// A sink that accepts a fixed number of bytes and then fails.
#[derive(Debug, Default)]
pub struct FailingWriter {
    /// Bytes accepted so far.
    pub written: Vec<u8>,
    capacity: usize,
}

impl FailingWriter {
    /// Creates a sink that fails once more than `capacity` bytes are written.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            written: Vec::new(),
            capacity,
        }
    }
}

impl Write for FailingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.written.len() + buf.len() > self.capacity {
            return Err(io::Error::new(io::ErrorKind::WriteZero, "sink is full"));
        }
        self.written.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
