use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown user: {identity}")]
    UnknownIdentity { identity: String },

    #[error(transparent)]
    Ingest(#[from] survey_ingest::IngestError),
}

pub type Result<T> = std::result::Result<T, CoreError>;
