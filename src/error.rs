use thiserror::Error;

/// Failure taxonomy for a yardage book run.
///
/// `InvalidInput` and `InvalidBounds` are reported before anything is
/// rendered. `DataFetch` aborts the whole run since no hole can proceed
/// without the shared Overpass prerequisite. The per-hole variants
/// (`MissingAttribute`, `GreenNotFound`, `TooManyWaypoints`) are logged and
/// the batch continues with the next hole.
#[derive(Debug, Error)]
pub enum BookError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid bounding box: {0}")]
    InvalidBounds(String),

    #[error("data fetch failed: {0}")]
    DataFetch(String),

    #[error("hole {hole}: missing {attr}, skipping")]
    MissingAttribute { hole: String, attr: &'static str },

    #[error("hole {hole}: no green polygon contains the green-center waypoint")]
    GreenNotFound { hole: String },

    #[error("hole {hole}: {count} waypoints found, at most 4 are supported")]
    TooManyWaypoints { hole: String, count: usize },

    #[error("failed to write output: {0}")]
    Output(String),
}

impl From<reqwest::Error> for BookError {
    fn from(err: reqwest::Error) -> Self {
        BookError::DataFetch(err.to_string())
    }
}
