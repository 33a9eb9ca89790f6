// ruta/src/error.rs

use anyhow::Error as AnyhowError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RutaError {
  #[error("Unknown action: no binding named '{name}' is registered")]
  UnknownAction { name: String },

  #[error("Named route '{name}' reached execution without being resolved to an action")]
  UnresolvedAction { name: String },

  #[error("Unexpected route variant at {at}: expected {expected}, found {found}")]
  UnexpectedVariant {
    at: &'static str,
    expected: &'static str,
    found: &'static str,
  },

  #[error("Argument type mismatch for action '{action_name}' (expected {expected_type})")]
  ArgsTypeMismatch {
    action_name: String,
    expected_type: String,
  },

  #[error("Error in user-provided handler or external operation. Source: {source}")]
  HandlerError {
    #[source]
    source: AnyhowError,
  },

  #[error("Internal ruta error: {0}")]
  Internal(String),
}

// This is the key conversion ruta provides for external errors: anything a
// handler surfaces through anyhow becomes a HandlerError.
impl From<AnyhowError> for RutaError {
  fn from(err: AnyhowError) -> Self {
    RutaError::HandlerError { source: err }
  }
}

pub type RutaResult<T, E = RutaError> = std::result::Result<T, E>;
