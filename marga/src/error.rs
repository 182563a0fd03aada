//! Error types for route building

use thiserror::Error;

use crate::config::ConfigLoadError;

/// Route building error type.
///
/// "No path between two nodes" is deliberately not an error: the pathfinder
/// reports it as [`crate::pathfinding::UNREACHABLE_DISTANCE`] so the optimizer
/// still produces a tour.
#[derive(Error, Debug)]
pub enum RouteError {
    #[error("No layout defined for warehouse {warehouse_id} floor {floor_id}")]
    LayoutNotFound { warehouse_id: u64, floor_id: u64 },

    #[error("Location {location_id} not found")]
    LocationNotFound { location_id: u64 },

    #[error("Picking item {item_id} not found")]
    PickingItemNotFound { item_id: u64 },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigLoadError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl RouteError {
    /// Short error code for logging/metrics.
    pub fn code(&self) -> &'static str {
        match self {
            Self::LayoutNotFound { .. } => "LAYOUT_NOT_FOUND",
            Self::LocationNotFound { .. } => "LOCATION_NOT_FOUND",
            Self::PickingItemNotFound { .. } => "PICKING_ITEM_NOT_FOUND",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::Store(_) => "STORE",
            Self::Config(_) => "CONFIG",
            Self::Io(_) => "IO",
            Self::Serialization(_) => "SERIALIZATION",
        }
    }
}

pub type Result<T> = std::result::Result<T, RouteError>;
