//! Infrastructure Layer
//!
//! Adapters exposing the application to the outside world:
//!
//! - **Driver Adapters (Inbound)**
//!   - `http/`: REST API controllers
//!
//! CSV ingest lives in [`crate::ingest`]; it is pure and has no I/O of its own.

pub mod http;
