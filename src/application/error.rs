use crate::domain::{ids::MalformedId, patch::PatchError};

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("invalid identifier `{0}`")]
    InvalidIdentifier(String),
    #[error("not found")]
    NotFound,
    #[error("{0}")]
    Validation(String),
    #[error("store failure: {0}")]
    Store(#[from] anyhow::Error),
    #[error("authentication failed")]
    Authentication,
}

impl From<MalformedId> for ServiceError {
    fn from(MalformedId(raw): MalformedId) -> Self { Self::InvalidIdentifier(raw) }
}

impl From<PatchError> for ServiceError {
    fn from(e: PatchError) -> Self { Self::Validation(e.to_string()) }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
