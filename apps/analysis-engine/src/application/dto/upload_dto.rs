//! Upload DTOs

use serde::{Deserialize, Serialize};

use crate::trades::{Trade, TradeFormat};

/// DTO returned after reconstructing trades from an uploaded export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadResponseDto {
    /// Reconstructed round-trip trades.
    pub trades: Vec<Trade>,
    /// Number of trades.
    pub total_trades: usize,
    /// Distinct symbols, sorted.
    pub symbols: Vec<String>,
    /// Layout the export was read as.
    pub format: TradeFormat,
}
