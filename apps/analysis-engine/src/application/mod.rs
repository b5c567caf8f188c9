//! Application Layer
//!
//! The application layer orchestrates the trade and analytics modules
//! through use cases. It defines:
//!
//! - **Use Cases**: upload parsing and full analysis
//! - **DTOs**: Data transfer objects for API boundaries

pub mod dto;
pub mod use_cases;

pub use dto::*;
pub use use_cases::*;
