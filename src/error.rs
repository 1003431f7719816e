use thiserror::Error;

use crate::diagnostics::Diagnostics;
use crate::handler::HandlerError;
use crate::resources::RegistryError;
use crate::terraform::state::StateError;
use crate::version::VersionError;

#[derive(Debug, Error)]
pub enum PdError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Version(#[from] VersionError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("invalid resource configuration:\n{0}")]
    Invalid(#[from] Diagnostics),

    #[error(transparent)]
    Handler(#[from] HandlerError),

    #[error(transparent)]
    State(#[from] StateError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no tracked resource at address '{0}'")]
    NotTracked(String),
}
