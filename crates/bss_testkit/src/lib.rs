//! # BSS Testkit
//!
//! Test utilities for the BSS segment encoders.
//!
//! This crate provides:
//! - Property-based test generators using proptest
//! - Record fixtures and failing sinks
//! - Shared line vectors with expected output
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bss_testkit::prelude::*;
//!
//! proptest! {
//!     #[test]
//!     fn line_starts_with_uid(format in line_format_strategy(), user in user_record_strategy()) {
//!         let line = format.format_line(&user).unwrap();
//!         prop_assert!(line.starts_with(&user.uid));
//!     }
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod vectors;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::vectors::*;
    pub use proptest::prelude::*;
}

pub use fixtures::*;
pub use generators::*;
pub use vectors::*;
