use core_retrieve::RetrieveError;

#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    #[error(transparent)]
    Retrieve(#[from] RetrieveError),
}
