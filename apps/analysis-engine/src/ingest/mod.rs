//! CSV ingest: header alias resolution and typed cell conversion.
//!
//! Produces the [`CanonicalTable`](crate::trades::CanonicalTable) consumed by
//! trade reconstruction.

mod aliases;
mod reader;

pub use aliases::{ResolvedHeaders, normalize_header, resolve_headers};
pub use reader::{parse_csv, parse_timestamp};
