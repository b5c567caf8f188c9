//! Data Transfer Objects (DTOs)
//!
//! DTOs are used for API boundaries and use case inputs/outputs.

mod analysis_dto;
mod upload_dto;

pub use analysis_dto::{AnalysisRequestDto, AnalysisResponseDto, NotionalDataDto};
pub use upload_dto::UploadResponseDto;
