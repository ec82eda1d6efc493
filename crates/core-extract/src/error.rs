use core_contracts::RequesterError;

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error(transparent)]
    Requester(#[from] RequesterError),
}
