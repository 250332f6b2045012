use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("token store error: {0}")]
    TokenStoreError(String),

    #[error("{0}")]
    Other(String),
}
