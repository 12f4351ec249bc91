//! # BSS Core
//!
//! Writes advertiser segment membership updates for batch segment upload.
//!
//! This crate provides:
//! - [`SegmentDataFormatter`], one append/close contract over two encodings
//! - [`DataFormat`]: legacy text lines or an Avro object container
//! - [`OutputConfig`], a deserializable description of the output
//!
//! The record model and the line format live in [`bss_codec`], which is
//! re-exported here.
//!
//! ## Usage
//!
//! ```
//! use bss_core::{DataFormat, LineFormat, Segment, SegmentDataFormatter, UserRecord};
//!
//! let users = vec![
//!     UserRecord::new("12345", vec![Segment::with_id(100).expiration(1440).value(123)]),
//!     UserRecord::new("12346", vec![Segment::with_id(101).removed()]),
//! ];
//!
//! let mut formatter =
//!     SegmentDataFormatter::new(Vec::new(), DataFormat::Text, Some(LineFormat::FULL)).unwrap();
//! formatter.append(&users).unwrap();
//! let out = String::from_utf8(formatter.close().unwrap()).unwrap();
//! assert_eq!(out, "12345:100:1440:123:0\n12346:#101:-1:0:0\n");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod formatter;

pub use bss_codec::{
    ConfigError, Domain, EncodeError, FormatConfig, LineFormat, Segment, SegmentField,
    SegmentList, UserRecord,
};
pub use bss_avro::ContainerError;
pub use config::{DataFormat, OutputConfig};
pub use error::{BssError, BssResult};
pub use formatter::SegmentDataFormatter;
