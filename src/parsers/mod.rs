//! JSON parser for exported conversation archives
//!
//! # Error Handling Strategy
//!
//! This module follows a **graceful degradation** approach suitable for CLI tools:
//!
//! - **Individual conversation failures**: A conversation that does not deserialize is
//!   logged as a warning and skipped, so one odd record does not block the whole export.
//!
//! - **Catastrophic failure detection**: If >50% of conversations fail to parse, or the
//!   file is not a JSON array at all, the parser returns an error.
//!
//! - **Error propagation**: Uses `anyhow::Result` with context. Structural problems inside
//!   a parsed conversation (cycles, missing messages) are not detected here; they surface
//!   later as `LinearizeError`.

pub mod archive;
pub mod deserializers;

pub use archive::{parse_archive, parse_archive_file};
