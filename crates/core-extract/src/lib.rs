//! C1 Marker & Extractor, C2 ChunkReassembler, C7 CharRestorer.
//!
//! This is the fragile-text-protocol layer: turning a raw HTTP response into
//! an assembled scalar value, chunk by chunk, for a single DBMS dialect.

mod chunk;
mod error;
mod marker;
mod restore;

pub use chunk::retrieve_scalar;
pub use error::ExtractError;
pub use marker::Extractor;
pub use restore::restore_chars;
