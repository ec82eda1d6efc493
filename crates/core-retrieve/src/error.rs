use core_extract::ExtractError;

#[derive(Debug, thiserror::Error)]
pub enum RetrieveError {
    #[error(transparent)]
    Extract(#[from] ExtractError),
}
