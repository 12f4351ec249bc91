//! # BSS Codec
//!
//! Segment membership records and the legacy BSS line format.
//!
//! This crate provides:
//! - The record model: [`UserRecord`], [`Segment`], [`Domain`]
//! - Line layout configuration: [`FormatConfig`], validated into a [`LineFormat`]
//! - The line encoder: [`LineFormat::format_line`]
//!
//! ## Line Format
//!
//! ```text
//! UID SEP1 ADDS [SEP4 REMOVES] [SEP5 DOMAIN]
//! ```
//!
//! - Segments with expiration `-1` are removals, all others additions
//! - Segments are joined by `SEP2`, their fields by `SEP3`
//! - The domain suffix is omitted for the default domain
//!
//! ## Usage
//!
//! ```
//! use bss_codec::{Domain, LineFormat, Segment, UserRecord};
//!
//! let user = UserRecord::new(
//!     "0000-1111",
//!     vec![
//!         Segment::with_id(100).expiration(1440).value(123),
//!         Segment::with_id(101).removed(),
//!     ],
//! )
//! .with_domain(Domain::Idfa);
//!
//! let line = LineFormat::FULL.format_line(&user).unwrap();
//! assert_eq!(line, "0000-1111:100:1440:123:0#101:-1:0:0^3");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod line;
mod record;

pub use config::{FormatConfig, LineFormat, SegmentField, Separators, RESERVED_SEPARATORS};
pub use error::{ConfigError, ConfigResult, EncodeError, EncodeResult, SegmentList};
pub use line::check_field;
pub use record::{
    Domain, Segment, UserRecord, DEFAULT_EXPIRATION, EXPIRED, MAX_EXPIRATION, MAX_VALUE,
};

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn line_format_is_shareable() {
        assert_send_sync::<LineFormat>();
    }

    #[test]
    fn shared_format_across_threads() {
        let format = std::sync::Arc::new(LineFormat::FULL);
        let handles: Vec<_> = (1..=4)
            .map(|i| {
                let format = format.clone();
                std::thread::spawn(move || {
                    let user = UserRecord::new(i.to_string(), vec![Segment::with_id(i)]);
                    format.format_line(&user).unwrap()
                })
            })
            .collect();
        let lines: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(lines[0], "1:1:0:0:0");
        assert_eq!(lines[3], "4:4:0:0:0");
    }
}
