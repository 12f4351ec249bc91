//! # BSS Avro
//!
//! Avro object container output for segment uploads.
//!
//! Each [`UserRecord`](bss_codec::UserRecord) becomes one `bss.user` record:
//!
//! - `uid`: a `long` for the default domain, or a `device_id { id, domain }`
//!   record for device domains
//! - `segments`: one record per segment with `id`, `code`, `member_id`,
//!   `expiration`, `timestamp` and `value`
//!
//! Removals are written with expiration `-1`.
//!
//! ## Usage
//!
//! ```
//! use bss_avro::AvroWriter;
//! use bss_codec::{Segment, UserRecord};
//!
//! let mut writer = AvroWriter::open(Vec::new()).unwrap();
//! writer
//!     .append(&[UserRecord::new("12345", vec![Segment::with_id(100)])])
//!     .unwrap();
//! let bytes = writer.finish().unwrap();
//! assert!(bytes.starts_with(b"Obj\x01"));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod mapping;
mod writer;

pub use error::{ContainerError, ContainerResult};
pub use mapping::user_value;
pub use writer::{schema, AvroWriter, SCHEMA_JSON};
