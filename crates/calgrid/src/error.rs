use calgrid_core::calendar::OptionsError;
use calgrid_core::legend::LegendError;
use thiserror::Error;

/// Errors for a host row that cannot become an event.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RowError {
    #[error("Event row has no id")]
    MissingId,
    #[error("Event row {id} has no start date")]
    MissingStart { id: String },
    #[error("Event row {id} has an unparseable date: {value}")]
    InvalidDate { id: String, value: String },
}

/// Errors that can occur while setting up or serializing a render.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Invalid calendar options: {0}")]
    Options(#[from] OptionsError),
    #[error("Invalid legend colors: {0}")]
    Legend(#[from] LegendError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for calgrid operations.
pub type Result<T> = std::result::Result<T, RenderError>;
