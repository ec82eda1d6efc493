//! Contracts for the collaborators spec.md §1/§6 deliberately keeps out of
//! scope: HTTP transport, payload templating/field parsing, the resume
//! cache, and the operator-facing console. The extraction engine is
//! written entirely against these traits; a real tool supplies concrete
//! implementations (HTTP client with redirect/encoding handling, the
//! actual payload builder, a persistent cache, a real terminal).
//!
//! `core-contracts` also ships the trivial reference implementations
//! (`InMemoryResumeStore`, `PassthroughEncoder`) used by tests and by the
//! `inj-bin` demo — neither is a substitute for a production
//! implementation of the collaborator it stands in for.

mod agent;
mod display;
mod operator_ui;
mod requester;
mod resume_store;

pub use agent::PayloadBuilder;
pub use display::{DisplayEncoder, PassthroughEncoder};
pub use operator_ui::OperatorUi;
pub use requester::{RedirectMessage, Requester, RequesterError, ResponsePage};
pub use resume_store::{InMemoryResumeStore, ResumeStore};
