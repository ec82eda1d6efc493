//! Shared data model for the error-based extraction engine.
//!
//! Every type here is process-wide or session-wide state with no behaviour
//! beyond the invariants spelled out in its doc comment. Components that
//! drive the extraction (marker extraction, chunk reassembly, planning, the
//! worker pool) consume these types rather than inventing their own.

mod buffer;
mod cancel;
mod chars;
mod chunk;
mod cursor;
mod dbms;
mod expression;
mod fields;
mod resume;

pub use buffer::{OutputBuffer, RowValue};
pub use cancel::CancelFlag;
pub use chars::SafeCharMap;
pub use chunk::ChunkState;
pub use cursor::RowCursor;
pub use dbms::DbmsId;
pub use expression::{Expression, Markers};
pub use fields::ProjectedFields;
pub use resume::ResumeEntry;

/// `None` means *no data bytes located*; distinct from `Some(String::new())`
/// ("found but empty"). See `ChunkState` for how the two arise.
pub type RetrievalResult = Option<String>;
