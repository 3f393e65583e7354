use thiserror::Error;

#[derive(Error, Debug)]
pub enum TripError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid itinerary: {0}")]
    Itinerary(String),
    #[error("camera error: {0}")]
    Camera(String),
    #[error("view runtime stopped")]
    RuntimeClosed,
    #[error("{0}")]
    Other(String),
}

impl From<String> for TripError {
    fn from(err: String) -> Self {
        Self::Other(err)
    }
}
