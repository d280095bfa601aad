//! Building blocks of the reconstruction engine.
//!
//! - [`dialect`] - which line-start shape a line has, if any
//! - [`confidence`] - initial scores and the multi-line downgrade
//! - [`content`] - text / media / deleted detection
//! - [`timestamp`] - best-effort timestamp normalisation
//!
//! The stateful part, which stitches lines into messages, lives in
//! [`crate::parser`].

pub mod confidence;
pub mod content;
pub mod dialect;
pub mod timestamp;

pub use confidence::{
    Assessment, downgrade_for_continuation, initial_assessment, multiline_assessment,
};
pub use content::{DELETED_MARKER, MEDIA_OMITTED_MARKER, detect_content_type};
pub use dialect::{Dialect, LineMatch, classify_line};
pub use timestamp::normalize_timestamp;
