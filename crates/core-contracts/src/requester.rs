/// A followed-redirect's response body, tagged with the request UID it was
/// observed under. The extractor only trusts this when it matches the
/// *current* request's UID, to avoid splicing an unrelated request's
/// leaked error text into this one's result (§4.1).
#[derive(Debug, Clone)]
pub struct RedirectMessage {
    pub uid: u64,
    pub body: String,
}

/// One HTTP round trip's worth of response data, as the Requester
/// collaborator hands it back. `request_uid` is assigned monotonically by
/// the Requester per call; callers use it only to correlate `last_redirect`
/// with the request that produced it.
#[derive(Debug, Clone, Default)]
pub struct ResponsePage {
    pub body: Option<String>,
    pub headers: Option<String>,
    pub request_uid: u64,
    pub last_redirect: Option<RedirectMessage>,
}

#[derive(Debug, thiserror::Error)]
pub enum RequesterError {
    #[error("transport failure: {0}")]
    Transport(String),
}

/// HTTP request transport (§6). Out of scope here: redirect tracking,
/// retries, encoding detection all live behind this seam in whatever
/// implementation a caller supplies.
pub trait Requester: Send + Sync {
    /// Issues the crafted payload and returns the resulting page. `content`
    /// mirrors upstream's `content=True` flag: when false, implementations
    /// may omit the response body and return only headers.
    fn query_page(&self, payload: &str, content: bool) -> Result<ResponsePage, RequesterError>;
}
