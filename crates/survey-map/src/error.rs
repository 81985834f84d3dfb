use thiserror::Error;

#[derive(Debug, Error)]
pub enum MapError {
    #[error("unknown logical field: {name}")]
    UnknownField { name: String },
    #[error("candidate list for {field} is empty")]
    EmptyCandidates { field: String },
}

pub type Result<T> = std::result::Result<T, MapError>;
